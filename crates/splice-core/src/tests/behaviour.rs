//! Behaviour-driven development (BDD) step definitions for splice-core scenarios.

mod scenarios;

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{AnchorInjector, InjectionRecipe, InjectionStep, PatchStatus, SelectorMerge};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Selector merge under test.
    merge: Option<SelectorMerge>,
    /// Injection engine under test.
    injector: Option<AnchorInjector>,
    /// Input text.
    input: Option<String>,
    /// Output of the last run.
    output: Option<String>,
    /// Statuses reported by the last run.
    statuses: Vec<(Option<InjectionStep>, PatchStatus)>,
}

impl TestWorld {
    fn input(&self) -> &str {
        self.input.as_deref().expect("input text should be set")
    }

    fn output(&self) -> &str {
        self.output.as_deref().expect("a patch should have run")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes and expands `\n` and `\"` escapes.
fn unquote(s: &str) -> String {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
}

fn test_recipe() -> InjectionRecipe {
    InjectionRecipe {
        import_marker: "SpecialParser".to_owned(),
        import_anchor_line: "use leptos::task::spawn_local;".to_owned(),
        new_import_line: "use special::SpecialParser;".to_owned(),
        binding_pattern: r"let \(all_pass, checks\) = report\.get\(\);".to_owned(),
        block_open_token: "view! {".to_owned(),
        injected_statements: "let mut out = String::new();".to_owned(),
        old_fragment: r#"<p class="x">{d}</p>"#.to_owned(),
        new_fragment: r#"<div class="x" inner_html={out.clone()}></div>"#.to_owned(),
    }
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("a selector merge from {source} to {target}")]
fn given_selector_merge(world: &RefCell<TestWorld>, source: String, target: String) {
    let merge = SelectorMerge::new(unquote(&source), unquote(&target)).expect("selectors");
    world.borrow_mut().merge = Some(merge);
}

#[given("the test injection recipe")]
fn given_test_recipe(world: &RefCell<TestWorld>) {
    let injector = AnchorInjector::new(test_recipe()).expect("recipe");
    world.borrow_mut().injector = Some(injector);
}

#[given("the text {text}")]
fn given_text(world: &RefCell<TestWorld>, text: String) {
    world.borrow_mut().input = Some(unquote(&text));
}

// =============================================================================
// When Steps
// =============================================================================

fn run_merge(world: &RefCell<TestWorld>, passes: usize) {
    let mut w = world.borrow_mut();
    let merge = w.merge.clone().expect("selector merge should be set");
    let mut text = w.input().to_owned();
    for _ in 0..passes {
        let result = merge.apply(&text);
        w.statuses = vec![(None, result.status().clone())];
        text = result.into_output();
    }
    w.output = Some(text);
}

fn run_injection(world: &RefCell<TestWorld>, passes: usize) {
    let mut w = world.borrow_mut();
    let injector = w.injector.clone().expect("injector should be set");
    let mut text = w.input().to_owned();
    for _ in 0..passes {
        let report = injector.apply(&text);
        w.statuses = report
            .steps()
            .iter()
            .map(|step| (Some(step.step), step.status.clone()))
            .collect();
        text = report.into_output();
    }
    w.output = Some(text);
}

#[when("the selector merge is applied")]
fn when_merge_applied(world: &RefCell<TestWorld>) {
    run_merge(world, 1);
}

#[when("the selector merge is applied twice")]
fn when_merge_applied_twice(world: &RefCell<TestWorld>) {
    run_merge(world, 2);
}

#[when("the injection is applied")]
fn when_injection_applied(world: &RefCell<TestWorld>) {
    run_injection(world, 1);
}

#[when("the injection is applied twice")]
fn when_injection_applied_twice(world: &RefCell<TestWorld>) {
    run_injection(world, 2);
}

#[when("the block injection is applied")]
fn when_block_injection_applied(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let injector = w.injector.clone().expect("injector should be set");
    let result = injector.inject_block(w.input());
    w.statuses = vec![(Some(InjectionStep::BlockInjection), result.status().clone())];
    w.output = Some(result.into_output());
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("the output is {expected}")]
fn then_output_is(world: &RefCell<TestWorld>, expected: String) {
    let w = world.borrow();
    assert_eq!(w.output(), unquote(&expected));
}

#[then("the output equals the input")]
fn then_output_equals_input(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert_eq!(w.output(), w.input());
}

#[then("the count of {text} in the output is {count}")]
fn then_output_count(world: &RefCell<TestWorld>, text: String, count: usize) {
    let w = world.borrow();
    let needle = unquote(&text);
    assert_eq!(
        w.output().matches(needle.as_str()).count(),
        count,
        "unexpected number of '{needle}' in: {}",
        w.output()
    );
}

#[then("the output contains {text}")]
fn then_output_contains(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    let needle = unquote(&text);
    assert!(
        w.output().contains(needle.as_str()),
        "Expected output to contain '{needle}', got: {}",
        w.output()
    );
}

#[then("the patch made changes")]
fn then_patch_changed(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(w.statuses.iter().any(|(_, status)| status.is_applied()));
}

#[then("the patch made no changes")]
fn then_patch_unchanged(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(w.statuses.iter().all(|(_, status)| !status.is_applied()));
}

#[then("the block injection step applied")]
fn then_block_injection_applied(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let applied = w
        .statuses
        .iter()
        .any(|(step, status)| *step == Some(InjectionStep::BlockInjection) && status.is_applied());
    assert!(applied, "statuses: {:?}", w.statuses);
}

#[then("the no-op reason is {reason}")]
fn then_no_op_reason(world: &RefCell<TestWorld>, reason: String) {
    let w = world.borrow();
    let expected = unquote(&reason);
    let found = w.statuses.iter().any(|(_, status)| {
        status
            .reason()
            .is_some_and(|r| r.to_string().starts_with(expected.as_str()))
    });
    assert!(found, "Expected a '{expected}' no-op, got {:?}", w.statuses);
}
