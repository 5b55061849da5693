//! Spottable node types: NodeId, NodeMeta.

use slotmap::new_key_type;

use crate::geometry::Region;

new_key_type! {
    /// Unique identifier for a registered spottable node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Metadata describing a single spottable node.
///
/// The engine never owns the underlying UI element; the adapter registers this
/// metadata at mount time and pushes region updates as the element moves. The
/// `kind`/`id`/`classes` fields exist for [`Selector`](crate::selector::Selector)
/// matching, mirroring how a DOM adapter would expose tag, id, and class
/// attributes.
#[derive(Debug, Clone)]
pub struct NodeMeta {
    /// Node kind name (e.g. "Button", "MenuItem").
    pub kind: String,
    /// Optional stable id, used for lookup after registration (`#id` selector).
    pub id: Option<String>,
    /// Classes (`.class` selector).
    pub classes: Vec<String>,
    /// Disabled nodes stay registered but are excluded from candidacy.
    pub disabled: bool,
    /// Current bounding box, pushed by the adapter. Not cached across frames
    /// by the engine.
    pub region: Region,
}

impl NodeMeta {
    /// Create a new `NodeMeta` with the given kind and sensible defaults.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            classes: Vec::new(),
            disabled: false,
            region: Region::EMPTY,
        }
    }

    /// Set the stable id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set the disabled flag (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the bounding region (builder).
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}
