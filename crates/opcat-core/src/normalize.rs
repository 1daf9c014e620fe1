//! Default filling and value encoding for catalog definitions.

use std::fmt;

use serde_json::Value;

use crate::config::SyncConfig;
use crate::family::{FamilyManifest, UNCATEGORIZED};
use crate::model::{Catalog, CatalogDef, ItemDef, Parameter, ParameterDef, ProfileItem};

/// Description used when none is provided.
pub const DEFAULT_DESCRIPTION: &str = "no description";

/// Entry point used when none is provided.
pub const MISSING_ENTRY_POINT: &str = "missing";

/// Content-quality issue found while normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
    /// The catalog has no label; its name is used instead.
    MissingCatalogLabel { catalog: String },
    /// An input, output or parameter has no label; its name is used instead.
    MissingItemLabel { catalog: String, item: String },
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeWarning::MissingCatalogLabel { catalog } => {
                write!(f, "label is missing for operator {}", catalog)
            }
            NormalizeWarning::MissingItemLabel { catalog, item } => {
                write!(f, "label is missing for item {} of {}", item, catalog)
            }
        }
    }
}

/// Result of normalizing one catalog definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub catalog: Catalog,
    pub warnings: Vec<NormalizeWarning>,
}

/// Fill in defaults and encode parameter values.
///
/// Never fails: every missing field has a default. Each warning is logged as
/// well as returned.
pub fn normalize(def: CatalogDef, families: &FamilyManifest, config: &SyncConfig) -> Normalized {
    let mut warnings = Vec::new();
    let name = def.name;

    let family = match def.family {
        Some(family) if families.contains(&family) => family,
        Some(family) => {
            tracing::debug!(
                catalog = %name,
                family = %family,
                "unknown family, using {}",
                UNCATEGORIZED
            );
            UNCATEGORIZED.to_string()
        }
        None => UNCATEGORIZED.to_string(),
    };

    let label = def.label.unwrap_or_else(|| {
        warnings.push(NormalizeWarning::MissingCatalogLabel {
            catalog: name.clone(),
        });
        name.clone()
    });

    let entry_point = format!(
        "{}{}",
        config.entry_point_prefix,
        def.entry_point.as_deref().unwrap_or(MISSING_ENTRY_POINT)
    );

    let inputs = def
        .inputs
        .into_iter()
        .map(|item| normalize_item(&name, item, &mut warnings))
        .collect();
    let parameters = def
        .parameters
        .into_iter()
        .map(|param| normalize_parameter(&name, param, &mut warnings))
        .collect();
    let outputs = def
        .outputs
        .into_iter()
        .map(|item| normalize_item(&name, item, &mut warnings))
        .collect();

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Normalized {
        catalog: Catalog {
            label,
            description: def
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            family,
            entry_point,
            visibility: def.visibility.unwrap_or(true),
            inputs,
            outputs,
            parameters,
            name,
        },
        warnings,
    }
}

fn profile_item(
    catalog: &str,
    name: String,
    label: Option<String>,
    description: Option<String>,
    data_format: String,
    warnings: &mut Vec<NormalizeWarning>,
) -> ProfileItem {
    let label = label.unwrap_or_else(|| {
        warnings.push(NormalizeWarning::MissingItemLabel {
            catalog: catalog.to_string(),
            item: name.clone(),
        });
        name.clone()
    });

    ProfileItem {
        name,
        label,
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        data_format,
    }
}

fn normalize_item(
    catalog: &str,
    item: ItemDef,
    warnings: &mut Vec<NormalizeWarning>,
) -> ProfileItem {
    profile_item(
        catalog,
        item.name,
        item.label,
        item.description,
        item.data_format,
        warnings,
    )
}

fn normalize_parameter(
    catalog: &str,
    param: ParameterDef,
    warnings: &mut Vec<NormalizeWarning>,
) -> Parameter {
    Parameter {
        item: profile_item(
            catalog,
            param.name,
            param.label,
            param.description,
            param.data_format,
            warnings,
        ),
        domain: param.domain.map(encode_domain),
        default_value: param.default_value.map(encode_default_value),
    }
}

/// Domains are JSON-array-like strings; single quotes become double quotes so
/// the stored text is valid JSON.
pub fn encode_domain(domain: Value) -> String {
    let text = match domain {
        Value::String(text) => text,
        other => other.to_string(),
    };
    text.replace('\'', "\"")
}

/// Render a default value with its type tag: quoted strings, bare booleans,
/// numbers as written.
pub fn encode_default_value(value: Value) -> String {
    match value {
        Value::String(text) => format!("\"{}\"", text),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::FamilyDef;

    fn families() -> FamilyManifest {
        FamilyManifest::new(vec![
            FamilyDef::new(UNCATEGORIZED),
            FamilyDef::new("Stats"),
        ])
    }

    fn parse(json: &str) -> CatalogDef {
        serde_json::from_str(json).unwrap()
    }

    fn run(json: &str) -> Normalized {
        normalize(parse(json), &families(), &SyncConfig::default())
    }

    #[test]
    fn test_missing_label_defaults_to_name_with_one_warning() {
        let normalized = run(
            r#"{"name": "quality", "inputs": [{"name": "ts", "label": "TS", "type": "ts_list"}]}"#,
        );

        assert_eq!(normalized.catalog.label, "quality");
        assert_eq!(
            normalized.warnings,
            vec![NormalizeWarning::MissingCatalogLabel {
                catalog: "quality".to_string()
            }]
        );
    }

    #[test]
    fn test_present_label_is_kept_without_warning() {
        let normalized = run(r#"{"name": "quality", "label": "Quality"}"#);
        assert_eq!(normalized.catalog.label, "Quality");
        assert!(normalized.warnings.is_empty());
    }

    #[test]
    fn test_top_level_defaults() {
        let catalog = run(r#"{"name": "quality", "label": "Q"}"#).catalog;

        assert_eq!(catalog.description, DEFAULT_DESCRIPTION);
        assert_eq!(catalog.family, UNCATEGORIZED);
        assert_eq!(catalog.entry_point, "ikats.algo.missing");
        assert!(catalog.visibility);
        assert!(catalog.inputs.is_empty());
        assert!(catalog.outputs.is_empty());
        assert!(catalog.parameters.is_empty());
    }

    #[test]
    fn test_explicit_fields_are_kept() {
        let catalog = run(
            r#"{
                "name": "quality",
                "label": "Q",
                "description": "Quality indicators",
                "family": "Stats",
                "entry_point": "quality.main::run",
                "visibility": false
            }"#,
        )
        .catalog;

        assert_eq!(catalog.description, "Quality indicators");
        assert_eq!(catalog.family, "Stats");
        assert_eq!(catalog.entry_point, "ikats.algo.quality.main::run");
        assert!(!catalog.visibility);
    }

    #[test]
    fn test_unknown_family_falls_back_to_uncategorized() {
        let catalog = run(r#"{"name": "quality", "label": "Q", "family": "Astrology"}"#).catalog;
        assert_eq!(catalog.family, UNCATEGORIZED);
    }

    #[test]
    fn test_entry_point_prefix_from_config() {
        let config = SyncConfig::default().with_entry_point_prefix("acme.");
        let normalized = normalize(
            parse(r#"{"name": "q", "label": "Q", "entry_point": "q::run"}"#),
            &families(),
            &config,
        );
        assert_eq!(normalized.catalog.entry_point, "acme.q::run");
    }

    #[test]
    fn test_item_defaults_and_warnings() {
        let normalized = run(
            r#"{
                "name": "quality",
                "label": "Q",
                "inputs": [{"name": "ts", "type": "ts_list"}],
                "parameters": [{"name": "period", "label": "Period", "type": "number"}],
                "outputs": [{"name": "table", "description": "Result table", "type": "table"}]
            }"#,
        );

        let catalog = &normalized.catalog;
        assert_eq!(catalog.inputs[0].label, "ts");
        assert_eq!(catalog.inputs[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(catalog.parameters[0].item.label, "Period");
        assert_eq!(catalog.outputs[0].label, "table");
        assert_eq!(catalog.outputs[0].description, "Result table");
        assert_eq!(normalized.warnings.len(), 2);
        assert!(normalized.warnings.contains(&NormalizeWarning::MissingItemLabel {
            catalog: "quality".to_string(),
            item: "ts".to_string(),
        }));
    }

    #[test]
    fn test_parameter_domain_encoding() {
        let catalog = run(
            r#"{
                "name": "q",
                "label": "Q",
                "parameters": [
                    {"name": "a", "label": "A", "type": "list", "domain": "['mean','max']"},
                    {"name": "b", "label": "B", "type": "list"},
                    {"name": "c", "label": "C", "type": "list", "domain": ["x", "y"]}
                ]
            }"#,
        )
        .catalog;

        assert_eq!(catalog.parameters[0].domain.as_deref(), Some(r#"["mean","max"]"#));
        assert_eq!(catalog.parameters[1].domain, None);
        assert_eq!(catalog.parameters[2].domain.as_deref(), Some(r#"["x","y"]"#));
    }

    #[test]
    fn test_parameter_default_value_encoding() {
        let catalog = run(
            r#"{
                "name": "q",
                "label": "Q",
                "parameters": [
                    {"name": "s", "label": "S", "type": "text", "default_value": "x"},
                    {"name": "t", "label": "T", "type": "bool", "default_value": true},
                    {"name": "f", "label": "F", "type": "bool", "default_value": false},
                    {"name": "n", "label": "N", "type": "number", "default_value": 3},
                    {"name": "r", "label": "R", "type": "number", "default_value": 0.5},
                    {"name": "z", "label": "Z", "type": "number", "default_value": null},
                    {"name": "m", "label": "M", "type": "number"}
                ]
            }"#,
        )
        .catalog;

        let defaults: Vec<Option<&str>> = catalog
            .parameters
            .iter()
            .map(|p| p.default_value.as_deref())
            .collect();
        assert_eq!(
            defaults,
            vec![
                Some("\"x\""),
                Some("true"),
                Some("false"),
                Some("3"),
                Some("0.5"),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = NormalizeWarning::MissingItemLabel {
            catalog: "q".to_string(),
            item: "ts".to_string(),
        };
        assert_eq!(warning.to_string(), "label is missing for item ts of q");
    }
}
