//! Application contract between the window runtime and a viewer.

mod app;

pub use app::{App, AppControl};
