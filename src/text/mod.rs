//! Text handling for definition terms
//!
//! Terms are parsed into literal and link segments before rendering.

pub mod markup;

pub use markup::{parse_term, plain_text, to_html, Segment};
