//! UI modules for the Poemshelf viewer

mod components;
mod library;
mod settings;
pub mod theme;

pub use components::{render_about_dialog, render_header};
pub use library::render_library;
pub use settings::render_settings;
