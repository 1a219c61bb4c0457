/// State management module
///
/// This module handles all list state, including:
/// - Shared data structures (data.rs)
/// - Data sources for the initial rows (catalog.rs)
/// - Diffing two list versions into per-row operations (reconcile.rs)
/// - The current list and its copy-on-toggle policy (list.rs)

pub mod data;
pub mod catalog;
pub mod reconcile;
pub mod list;
