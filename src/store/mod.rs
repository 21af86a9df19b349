//! Definition store
//!
//! Owns the persisted transport string for a widget's definitions. The
//! transport is the source of truth: every read decodes it, every mutation
//! re-encodes the whole list. An empty list is stored as no value at all.

pub mod codec;

pub use codec::TransportError;

use crate::models::{DefinitionDraft, DefinitionList, DefinitionPatch, DefinitionRecord};

/// Canonical, ordered definition list for one widget
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefinitionStore {
    transport: Option<String>,
}

impl DefinitionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing transport value
    pub fn from_transport(transport: Option<String>) -> Self {
        Self { transport }
    }

    /// Raw transport value, `None` when nothing is persisted
    pub fn transport(&self) -> Option<&str> {
        self.transport.as_deref()
    }

    /// Replace the raw transport value (external attribute change)
    ///
    /// The value is kept verbatim, even if it does not decode.
    pub fn set_transport(&mut self, transport: Option<String>) {
        self.transport = transport;
    }

    /// Decode the current list; malformed or absent input yields an empty list
    pub fn get(&self) -> DefinitionList {
        let Some(transport) = self.transport.as_deref() else {
            return Vec::new();
        };

        match codec::decode(transport) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("ignoring malformed definitions: {}", e);
                Vec::new()
            }
        }
    }

    /// Store `list`, dropping invalid records; an empty result clears the transport
    pub fn set(&mut self, list: impl IntoIterator<Item = DefinitionRecord>) {
        let list: DefinitionList = list.into_iter().filter(DefinitionRecord::is_valid).collect();

        if list.is_empty() {
            self.transport = None;
            return;
        }

        match codec::encode(&list) {
            Ok(encoded) => self.transport = Some(encoded),
            Err(e) => log::warn!("failed to encode {} definitions: {}", list.len(), e),
        }
    }

    /// Number of decodable records
    pub fn len(&self) -> usize {
        self.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record; invalid drafts are ignored
    ///
    /// Returns the new record's index when it was appended.
    pub fn create(&mut self, draft: DefinitionDraft) -> Option<usize> {
        let Some(record) = draft.into_record() else {
            log::debug!("create ignored: draft is missing a position or term");
            return None;
        };

        let mut list = self.get();
        list.push(record);
        let index = list.len() - 1;
        self.set(list);
        Some(index)
    }

    /// Drop the record at `index`; later records shift down by one
    pub fn remove(&mut self, index: usize) -> bool {
        let mut list = self.get();
        if index >= list.len() {
            log::debug!("remove ignored: index {} out of range (len {})", index, list.len());
            return false;
        }

        list.remove(index);
        self.set(list);
        true
    }

    /// Merge `patch` into the record at `index`
    pub fn update(&mut self, index: usize, patch: &DefinitionPatch) -> bool {
        let mut list = self.get();
        let Some(record) = list.get_mut(index) else {
            log::debug!("update ignored: index {} out of range", index);
            return false;
        };

        match patch.apply(record) {
            Some(updated) => *record = updated,
            None => {
                log::debug!("update ignored: patch would invalidate record {}", index);
                return false;
            }
        }

        self.set(list);
        true
    }

    /// Empty the list and remove the transport value
    pub fn clear(&mut self) {
        self.transport = None;
    }
}
