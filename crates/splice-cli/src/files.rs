//! File boundary for the patch engines.
//!
//! The engines only see text. This module reads the target file once and, if
//! the text changed, replaces it through a temporary file in the same
//! directory so a failed write never leaves a truncated target behind.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use splice_core::InjectionRecipe;
use tempfile::NamedTempFile;

use crate::errors::AppError;

pub(crate) fn read_target(path: &Utf8Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadTarget {
        path: path.to_owned(),
        source,
    })
}

pub(crate) fn read_recipe(path: &Utf8Path) -> Result<InjectionRecipe, AppError> {
    let json = fs::read_to_string(path).map_err(|source| AppError::ReadRecipe {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| AppError::ParseRecipe {
        path: path.to_owned(),
        source,
    })
}

/// Replaces `path` with `contents`, keeping the original permissions.
pub(crate) fn replace_target(path: &Utf8Path, contents: &str) -> Result<(), AppError> {
    let write_error = |source| AppError::WriteTarget {
        path: path.to_owned(),
        source,
    };

    let directory = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    let mut temp_file = NamedTempFile::new_in(&directory).map_err(write_error)?;
    temp_file
        .write_all(contents.as_bytes())
        .map_err(write_error)?;
    temp_file.as_file().sync_all().map_err(write_error)?;

    let permissions = fs::metadata(path).map_err(write_error)?.permissions();
    fs::set_permissions(temp_file.path(), permissions).map_err(write_error)?;

    temp_file
        .persist(path)
        .map_err(|error| write_error(error.error))?;
    Ok(())
}
