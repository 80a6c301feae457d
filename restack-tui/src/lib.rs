pub mod app;
pub mod components;
pub mod keymap;
pub mod theme;

pub use app::{EditorOutcome, run};
pub use theme::Theme;
