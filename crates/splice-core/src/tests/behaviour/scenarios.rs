//! Scenario bindings for the `splice-core` BDD feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Inline rule gains the target selector"
)]
fn inline_rule_merged(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Bare selector line is duplicated for the target"
)]
fn bare_selector_duplicated(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Selector merge is idempotent"
)]
fn selector_merge_idempotent(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Guarded import is inserted once"
)]
fn guarded_import_once(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Statements are injected before the block opening"
)]
fn statements_injected(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Missing anchor leaves the template unchanged"
)]
fn missing_anchor_unchanged(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/splice_core.feature",
    name = "Fragment is replaced"
)]
fn fragment_replaced(world: RefCell<TestWorld>) {
    drop(world);
}
