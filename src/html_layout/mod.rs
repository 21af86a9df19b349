//! HTML Layout for the anatomy widget
//!
//! This module turns a definition list into a display list holding both
//! projections (pins and description entries) for the DOM adapter to write.

pub mod anatomy;
pub mod display_list;

pub use anatomy::{entry_id, entry_index, render, RenderOptions};
pub use display_list::{AnatomyView, RenderEntry, RenderPin};
