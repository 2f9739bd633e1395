//! Rendering functions for the picker.

mod picker;

pub use picker::{format_row, render_picker};
