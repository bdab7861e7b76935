//! Built-in patches for the Leptos task UI.
//!
//! These reproduce the two patches the UI needed: letting the edit-task modal
//! reuse the new-task modal's styles, and rendering a task description as
//! Markdown through `pulldown_cmark`.

use crate::injection::InjectionRecipe;
use crate::selector::SelectorMerge;

/// Selector whose rules are shared with the edit-task modal.
pub const MODAL_SOURCE_SELECTOR: &str = ".new-task-modal";

/// Selector that receives the new-task modal's rules.
pub const MODAL_TARGET_SELECTOR: &str = ".edit-task-modal";

/// Returns the merge that styles the edit-task modal like the new-task modal.
#[must_use]
pub fn modal_selector_merge() -> SelectorMerge {
    SelectorMerge::from_trusted(MODAL_SOURCE_SELECTOR, MODAL_TARGET_SELECTOR)
}

/// Returns the recipe that renders the task description as Markdown.
#[must_use]
pub fn markdown_description_recipe() -> InjectionRecipe {
    InjectionRecipe {
        import_marker: "use pulldown_cmark".to_owned(),
        import_anchor_line: "use leptos::task::spawn_local;".to_owned(),
        new_import_line: "use pulldown_cmark::{Parser, html};".to_owned(),
        binding_pattern: r"let \(all_pass, checks, _suggestions\) = qa_report\.get\(\);"
            .to_owned(),
        block_open_token: "view! {".to_owned(),
        injected_statements: concat!(
            "let mut html_output = String::new();\n",
            "let parser = Parser::new(&desc);\n",
            "html::push_html(&mut html_output, parser);",
        )
        .to_owned(),
        old_fragment: r#"<p class="td-spec-text">{d}</p>"#.to_owned(),
        new_fragment:
            r#"<div class="td-spec-text markdown-body" inner_html={html_output.clone()}></div>"#
                .to_owned(),
    }
}
