//! Definition records
//!
//! A definition pairs a pin position (percentages of the annotated area) with
//! a term. Only validated records are ever stored; loosely typed input goes
//! through [`DefinitionDraft`] and [`DefinitionPatch`] first.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{deserialize_percent, serialize_percent, Coordinate};

/// A validated definition: position in [0, 100] and a non-empty term
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DefinitionRecord {
    /// Horizontal position, percent of the area width
    #[serde(serialize_with = "serialize_percent", deserialize_with = "deserialize_percent")]
    pub x: f64,

    /// Vertical position, percent of the area height
    #[serde(serialize_with = "serialize_percent", deserialize_with = "deserialize_percent")]
    pub y: f64,

    /// Display text, may contain `[text](href)` links
    pub term: String,
}

/// Ordered list of definitions; position in the list is the pin index
pub type DefinitionList = Vec<DefinitionRecord>;

impl DefinitionRecord {
    /// Build a record, returning `None` when any field is unusable
    pub fn new(x: impl Into<Coordinate>, y: impl Into<Coordinate>, term: impl Into<String>) -> Option<Self> {
        DefinitionDraft {
            x: Some(x.into()),
            y: Some(y.into()),
            term: Some(term.into()),
        }
        .into_record()
    }

    /// Check that the record still satisfies the store invariants
    pub fn is_valid(&self) -> bool {
        is_percent(self.x) && is_percent(self.y) && is_usable_term(&self.term)
    }

    /// CSS `left` value for the pin
    pub fn left(&self) -> String {
        format!("{}%", self.x)
    }

    /// CSS `top` value for the pin
    pub fn top(&self) -> String {
        format!("{}%", self.y)
    }
}

/// Payload for `create`: every field optional, coordinates loosely typed
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DefinitionDraft {
    #[serde(default)]
    pub x: Option<Coordinate>,
    #[serde(default)]
    pub y: Option<Coordinate>,
    #[serde(default)]
    pub term: Option<String>,
}

impl DefinitionDraft {
    /// Validate the draft into a record
    pub fn into_record(self) -> Option<DefinitionRecord> {
        let x = self.x.as_ref()?.percent()?;
        let y = self.y.as_ref()?.percent()?;
        let term = self.term.filter(|t| is_usable_term(t))?;
        Some(DefinitionRecord { x, y, term })
    }
}

impl From<DefinitionRecord> for DefinitionDraft {
    fn from(record: DefinitionRecord) -> Self {
        Self {
            x: Some(Coordinate::Number(record.x)),
            y: Some(Coordinate::Number(record.y)),
            term: Some(record.term),
        }
    }
}

/// Payload for `update`: fields left `None` are untouched
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DefinitionPatch {
    #[serde(default)]
    pub x: Option<Coordinate>,
    #[serde(default)]
    pub y: Option<Coordinate>,
    #[serde(default)]
    pub term: Option<String>,
}

impl DefinitionPatch {
    /// Patch that replaces only the term
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    /// Merge into `record`, yielding the updated copy if it stays valid
    pub fn apply(&self, record: &DefinitionRecord) -> Option<DefinitionRecord> {
        let x = match &self.x {
            Some(c) => c.percent()?,
            None => record.x,
        };
        let y = match &self.y {
            Some(c) => c.percent()?,
            None => record.y,
        };
        let term = match &self.term {
            Some(t) if is_usable_term(t) => t.clone(),
            Some(_) => return None,
            None => record.term.clone(),
        };
        Some(DefinitionRecord { x, y, term })
    }
}

fn is_percent(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

fn is_usable_term(term: &str) -> bool {
    !term.trim().is_empty()
}
