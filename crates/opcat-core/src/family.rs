//! Functional families manifest.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Family assigned to algorithms whose family is missing or unknown.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One entry of `families.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilyDef {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FamilyDef {
    /// Create a family with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The static list of families, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyManifest {
    families: Vec<FamilyDef>,
}

impl FamilyManifest {
    /// Build a manifest from already parsed entries.
    pub fn new(families: Vec<FamilyDef>) -> Self {
        Self { families }
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let manifest = Self::from_json(&content).map_err(|e| Error::json(path, e))?;

        tracing::info!(
            path = %path.display(),
            families = manifest.families.len(),
            "families manifest loaded"
        );
        if !manifest.contains(UNCATEGORIZED) {
            tracing::warn!(
                path = %path.display(),
                "manifest has no {} family, algorithms falling back to it get no family",
                UNCATEGORIZED
            );
        }

        Ok(manifest)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Check whether a family name is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.families.iter().any(|family| family.name == name)
    }

    /// Iterate over the families in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &FamilyDef> {
        self.families.iter()
    }
}
