//! Display List for the anatomy widget
//!
//! This module defines the output structure handed to the DOM adapter (or to
//! JavaScript). It carries everything needed to build the pin overlay and the
//! description list without further computation.

use serde::Serialize;

use crate::models::Orientation;
use crate::text::{to_html, Segment};

/// Top-level display list: both projections of one definition list
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnatomyView {
    /// Layout direction, only affects styling
    pub orientation: Orientation,

    /// Whether entries are editable and clicks place pins
    pub edit: bool,

    /// Pins in list order; `pins[i]` pairs with `entries[i]`
    pub pins: Vec<RenderPin>,

    /// Description entries in list order
    pub entries: Vec<RenderEntry>,
}

/// A positioned pin marker
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderPin {
    /// Index in the definition list
    pub index: usize,

    /// CSS `left`, e.g. `"64%"`
    pub left: String,

    /// CSS `top`, e.g. `"53%"`
    pub top: String,

    /// Id of the paired entry (`aria-describedby`)
    pub described_by: String,

    /// Marked with `aria-current` while its entry is hovered or focused
    pub current: bool,
}

/// A description entry
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderEntry {
    /// Index in the definition list
    pub index: usize,

    /// Element id, referenced by the paired pin
    pub id: String,

    /// Rendered term content
    pub content: Vec<Segment>,

    /// `contenteditable` in edit mode
    pub editable: bool,
}

impl AnatomyView {
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Index of the pin currently marked, if any
    pub fn current_pin(&self) -> Option<usize> {
        self.pins.iter().find(|p| p.current).map(|p| p.index)
    }
}

impl RenderEntry {
    /// Escaped HTML for this entry's content
    pub fn inner_html(&self) -> String {
        to_html(&self.content)
    }
}
