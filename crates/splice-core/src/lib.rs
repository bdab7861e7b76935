//! Structural text-patch engines for the Splice toolchain.
//!
//! This crate turns the full text of one source file into new text. It never
//! touches the filesystem; callers read a file, hand its contents to an
//! engine, and decide what to do with the result.
//!
//! - **Selector merging** via [`SelectorMerge`] shares a stylesheet rule set
//!   between two selectors by merging the target into every selector list
//!   that names the source.
//! - **Anchor injection** via [`AnchorInjector`] adds a guarded import,
//!   injects statements before a block opening, and swaps a markup fragment
//!   in a component template.
//!
//! Both engines are idempotent. A run that changes nothing reports why via
//! [`NoOpReason`], so a file that was already patched can be told apart from
//! one whose anchors have drifted.
//!
//! # Example: Selector Merging
//!
//! ```
//! use splice_core::SelectorMerge;
//!
//! let merge = SelectorMerge::new(".source-a", ".target-b")?;
//! let result = merge.apply(".source-a { color: red; }");
//!
//! assert_eq!(result.output(), ".source-a, .target-b { color: red; }");
//! assert!(!merge.apply(result.output()).has_changes());
//! # Ok::<(), splice_core::PatchError>(())
//! ```
//!
//! # Example: Anchor Injection
//!
//! ```
//! use splice_core::{AnchorInjector, InjectionStep, presets};
//!
//! let injector = AnchorInjector::new(presets::markdown_description_recipe())?;
//! let report = injector.apply("use leptos::task::spawn_local;\n");
//!
//! assert!(report.has_changes());
//! assert!(report.output().contains("use pulldown_cmark::{Parser, html};"));
//! assert!(
//!     !report
//!         .status(InjectionStep::BlockInjection)
//!         .is_some_and(|status| status.is_applied())
//! );
//! # Ok::<(), splice_core::PatchError>(())
//! ```

mod error;
mod injection;
mod outcome;
pub mod presets;
mod selector;
mod text;

pub use error::PatchError;
pub use injection::{AnchorInjector, InjectionReport, InjectionRecipe, InjectionStep, StepReport};
pub use outcome::{NoOpReason, PatchResult, PatchStatus};
pub use selector::{LineKind, SelectorMerge};

#[cfg(test)]
mod tests;
