//! Interaction controller
//!
//! Translates pointer and focus gestures into store operations. Each gesture
//! is a single transition; invalid gestures are ignored without error.

use super::AnatomyWidget;
use crate::models::{DefinitionDraft, DefinitionPatch};
use crate::text::{parse_term, plain_text};

/// A click on the annotated area, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerClick {
    pub fn new(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
        }
    }

    /// Click position as whole percentages, `None` outside the area
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((
            to_percent(self.offset_x, self.width)?,
            to_percent(self.offset_y, self.height)?,
        ))
    }
}

fn to_percent(offset: f64, extent: f64) -> Option<f64> {
    if !offset.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return None;
    }
    if offset < 0.0 || offset > extent {
        return None;
    }
    Some((offset / extent * 100.0).round())
}

impl AnatomyWidget {
    /// Place a new pin with the placeholder term
    ///
    /// Only in edit mode. Returns the index of the new definition.
    pub fn place_pin(&mut self, click: PointerClick) -> Option<usize> {
        if !self.config.edit {
            log::debug!("click ignored: not in edit mode");
            return None;
        }
        let Some((x, y)) = click.position() else {
            log::debug!("click ignored: outside the annotated area {:?}", click);
            return None;
        };

        let draft = DefinitionDraft {
            x: Some(x.into()),
            y: Some(y.into()),
            term: Some(self.config.placeholder().to_string()),
        };
        let index = self.store.create(draft);
        self.refresh(true);
        index
    }

    /// Mark the pin paired with entry `index` as current (hover or focus)
    pub fn highlight(&mut self, index: usize) -> &mut Self {
        if index >= self.view.pins.len() {
            return self;
        }
        if self.current != Some(index) {
            self.current = Some(index);
            self.refresh(false);
        }
        self
    }

    /// Clear the marking if entry `index` holds it (hover leave)
    pub fn unhighlight(&mut self, index: usize) -> &mut Self {
        if self.current == Some(index) {
            self.current = None;
            self.refresh(false);
        }
        self
    }

    /// Index of the pin currently marked
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Commit the edited text of entry `index` when it loses focus
    ///
    /// Empty text (after trimming) removes the definition. Text identical to
    /// what the entry already displays keeps the stored term, so links are
    /// not flattened by a focus without an edit. Any other text is stored
    /// trimmed of surrounding whitespace.
    pub fn commit(&mut self, index: usize, text: &str) -> &mut Self {
        let Some(record) = self.store.get().into_iter().nth(index) else {
            log::debug!("commit ignored: no definition at {}", index);
            return self;
        };

        let text = text.trim();
        if text.is_empty() {
            return self.remove(index);
        }
        if text == plain_text(&parse_term(&record.term)).trim() {
            if self.current == Some(index) {
                self.current = None;
                self.refresh(false);
            }
            return self;
        }

        self.update(index, DefinitionPatch::term(text))
    }
}
