//! Catalog definitions as read from `catalog_def*.json`, and their normalized
//! form ready for SQL generation.

use serde::Deserialize;
use serde_json::Value;

/// One algorithm/implementation pair as written by operator authors.
///
/// Unknown keys are ignored. `name` is the only required top-level key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub visibility: Option<bool>,
    #[serde(default)]
    pub inputs: Vec<ItemDef>,
    #[serde(default)]
    pub outputs: Vec<ItemDef>,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
}

/// An input or output slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_format: String,
}

/// A parameter slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_format: String,
    /// Enumerated or range constraint, usually a JSON-array-like string.
    #[serde(default)]
    pub domain: Option<Value>,
    /// Default value of any JSON type. JSON `null` reads as absent.
    #[serde(default)]
    pub default_value: Option<Value>,
}

/// A catalog with every optional field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub name: String,
    pub label: String,
    pub description: String,
    /// Family name, guaranteed to be listed in the manifest or the
    /// `Uncategorized` sentinel.
    pub family: String,
    /// Fully qualified entry point path.
    pub entry_point: String,
    pub visibility: bool,
    pub inputs: Vec<ProfileItem>,
    pub outputs: Vec<ProfileItem>,
    pub parameters: Vec<Parameter>,
}

/// Normalized input or output slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileItem {
    pub name: String,
    pub label: String,
    pub description: String,
    pub data_format: String,
}

/// Normalized parameter slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub item: ProfileItem,
    /// Domain text with single quotes turned into double quotes.
    pub domain: Option<String>,
    /// Type-tagged default rendering: `"x"` for strings, `true`/`false`
    /// for booleans, JSON text otherwise.
    pub default_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_catalog() {
        let def: CatalogDef = serde_json::from_str(r#"{"name": "cut_ts"}"#).unwrap();
        assert_eq!(def.name, "cut_ts");
        assert!(def.label.is_none());
        assert!(def.visibility.is_none());
        assert!(def.inputs.is_empty());
        assert!(def.parameters.is_empty());
    }

    #[test]
    fn test_deserialize_full_catalog() {
        let def: CatalogDef = serde_json::from_str(
            r#"{
                "name": "cut_ts",
                "label": "Cut TS",
                "family": "Preprocessing_TS__Transforming",
                "entry_point": "cut.main::cut_ts",
                "visibility": false,
                "inputs": [{"name": "ts", "type": "ts_list"}],
                "parameters": [
                    {"name": "min", "type": "number", "default_value": 3},
                    {"name": "mode", "type": "list", "domain": "['a','b']", "default_value": null}
                ],
                "outputs": [{"name": "result", "label": "Result", "type": "ts_list"}],
                "extra": {"ignored": true}
            }"#,
        )
        .unwrap();

        assert_eq!(def.visibility, Some(false));
        assert_eq!(def.inputs[0].data_format, "ts_list");
        assert_eq!(def.parameters[0].default_value, Some(Value::from(3)));
        assert_eq!(def.parameters[1].default_value, None);
        assert_eq!(def.parameters[1].domain, Some(Value::from("['a','b']")));
        assert_eq!(def.outputs[0].label.as_deref(), Some("Result"));
    }

    #[test]
    fn test_item_without_type_is_rejected() {
        let result = serde_json::from_str::<CatalogDef>(
            r#"{"name": "x", "inputs": [{"name": "ts"}]}"#,
        );
        assert!(result.is_err());
    }
}
