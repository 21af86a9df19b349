//! Projection rendering
//!
//! Pure function from a definition list to an [`AnatomyView`]. Every call
//! builds both projections from scratch; there is no diffing.

use super::display_list::{AnatomyView, RenderEntry, RenderPin};
use crate::models::{DefinitionRecord, Orientation};
use crate::text::parse_term;

/// Options that shape the view but not the data
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub edit: bool,
    pub orientation: Orientation,
    /// Index of the pin to mark current; ignored when out of range
    pub current: Option<usize>,
}

/// Id of the description entry at `index`
pub fn entry_id(index: usize) -> String {
    format!("item-{}", index)
}

/// Parse an entry id back into its index
pub fn entry_index(id: &str) -> Option<usize> {
    id.strip_prefix("item-")?.parse().ok()
}

/// Build both projections for `list`
pub fn render(list: &[DefinitionRecord], options: &RenderOptions) -> AnatomyView {
    let mut view = AnatomyView {
        orientation: options.orientation,
        edit: options.edit,
        pins: Vec::with_capacity(list.len()),
        entries: Vec::with_capacity(list.len()),
    };

    for (index, record) in list.iter().enumerate() {
        let id = entry_id(index);

        view.pins.push(RenderPin {
            index,
            left: record.left(),
            top: record.top(),
            described_by: id.clone(),
            current: options.current == Some(index),
        });

        view.entries.push(RenderEntry {
            index,
            id,
            content: parse_term(&record.term),
            editable: options.edit,
        });
    }

    view
}
