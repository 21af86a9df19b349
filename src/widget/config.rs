//! Widget configuration derived from host attributes

use crate::models::Orientation;

/// Attribute holding the transport-encoded definitions
pub const ATTR_DEFINITIONS: &str = "definitions";
/// Presence flag enabling edit mode
pub const ATTR_EDIT: &str = "edit";
/// Default term for newly placed pins
pub const ATTR_PLACEHOLDER: &str = "placeholder";
/// `horizontal` or `vertical`
pub const ATTR_ORIENTATION: &str = "orientation";

/// Attributes whose change triggers a re-render
pub const OBSERVED_ATTRIBUTES: [&str; 3] = [ATTR_DEFINITIONS, ATTR_EDIT, ATTR_ORIENTATION];

pub const DEFAULT_PLACEHOLDER: &str = "placeholder";

/// Non-data widget settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetConfig {
    /// Edit mode: place pins on click, edit entries in place
    pub edit: bool,

    /// Explicit placeholder; `None` uses [`DEFAULT_PLACEHOLDER`]
    placeholder: Option<String>,

    /// Explicit orientation; `None` means the attribute is absent
    orientation: Option<Orientation>,
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Term given to pins placed by clicking
    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    /// Raw placeholder attribute
    pub fn placeholder_attribute(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Set the placeholder; empty or absent falls back to the default
    pub fn set_placeholder(&mut self, value: Option<&str>) {
        self.placeholder = value.filter(|v| !v.is_empty()).map(str::to_string);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    /// Raw orientation attribute
    pub fn orientation_attribute(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Set the orientation from an attribute value
    ///
    /// Unknown values leave the attribute absent. Returns whether the value
    /// was accepted.
    pub fn set_orientation(&mut self, value: Option<&str>) -> bool {
        match value.map(str::parse::<Orientation>) {
            Some(Ok(orientation)) => {
                self.orientation = Some(orientation);
                true
            }
            Some(Err(e)) => {
                log::debug!("{}, removing orientation attribute", e);
                self.orientation = None;
                false
            }
            None => {
                self.orientation = None;
                true
            }
        }
    }
}
