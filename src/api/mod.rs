//! Component Anatomy WASM API
//!
//! This module provides the JavaScript-facing API for the anatomy widget.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation and logging
//! - `anatomy`: The `ComponentAnatomy` class, one instance per host element

pub mod helpers;
pub mod anatomy;

pub use anatomy::ComponentAnatomy;
