//! Turns a format specification like `%{time} [%{module}] %{message}` into a
//! reusable formatter, and renders records through it.

mod color;
mod format;

pub use color::Color;
pub use format::{
    ColorStyle, Conversion, DEFAULT_FORMAT, Formatter, MAX_WIDTH, Segment, Spec, Verb,
};
