//! Models module for the component anatomy widget
//!
//! Definition records, the loosely typed payloads that become them, and the
//! layout orientation.

pub mod definition;
pub mod orientation;
pub mod serde_helpers;

// Re-export commonly used types
pub use definition::{DefinitionDraft, DefinitionList, DefinitionPatch, DefinitionRecord};
pub use orientation::Orientation;
pub use serde_helpers::Coordinate;
