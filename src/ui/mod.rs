/// User interface module
///
/// - `list_screen.rs` - poster list with in-place expansion
/// - `detail_screen.rs` - full-size poster
/// - `transition.rs` - shared-element grow animation between the two

pub mod list_screen;
pub mod detail_screen;
pub mod transition;
