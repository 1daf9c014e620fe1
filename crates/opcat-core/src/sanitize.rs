//! Single-quote escaping for values embedded as SQL literals.

use std::borrow::Cow;

use crate::family::FamilyDef;
use crate::model::{Catalog, Parameter, ProfileItem};

/// Double every single quote of `value`.
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    if value.contains('\'') {
        Cow::Owned(value.replace('\'', "''"))
    } else {
        Cow::Borrowed(value)
    }
}

fn escape_in_place(value: &mut String) {
    if let Cow::Owned(escaped) = escape_quotes(value) {
        *value = escaped;
    }
}

fn escape_opt_in_place(value: &mut Option<String>) {
    if let Some(value) = value {
        escape_in_place(value);
    }
}

/// Escape every string leaf of a structure in place.
///
/// Non-string fields are left untouched.
pub trait Sanitize {
    fn sanitize(&mut self);
}

impl Sanitize for ProfileItem {
    fn sanitize(&mut self) {
        escape_in_place(&mut self.name);
        escape_in_place(&mut self.label);
        escape_in_place(&mut self.description);
        escape_in_place(&mut self.data_format);
    }
}

impl Sanitize for Parameter {
    fn sanitize(&mut self) {
        self.item.sanitize();
        escape_opt_in_place(&mut self.domain);
        escape_opt_in_place(&mut self.default_value);
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self) {
        for value in self.iter_mut() {
            value.sanitize();
        }
    }
}

impl Sanitize for Catalog {
    fn sanitize(&mut self) {
        escape_in_place(&mut self.name);
        escape_in_place(&mut self.label);
        escape_in_place(&mut self.description);
        escape_in_place(&mut self.family);
        escape_in_place(&mut self.entry_point);
        self.inputs.sanitize();
        self.outputs.sanitize();
        self.parameters.sanitize();
    }
}

impl Sanitize for FamilyDef {
    fn sanitize(&mut self) {
        escape_in_place(&mut self.name);
        escape_opt_in_place(&mut self.label);
        escape_opt_in_place(&mut self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: &str) -> ProfileItem {
        ProfileItem {
            name: name.to_string(),
            label: name.to_string(),
            description: description.to_string(),
            data_format: "ts_list".to_string(),
        }
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes("it's a test"), "it''s a test");
        assert_eq!(escape_quotes("''"), "''''");
        assert!(matches!(escape_quotes("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_sanitize_catalog_recurses_into_items() {
        let mut catalog = Catalog {
            name: "o'algo".to_string(),
            label: "O'Algo".to_string(),
            description: "it's a test".to_string(),
            family: "Uncategorized".to_string(),
            entry_point: "ikats.algo.missing".to_string(),
            visibility: false,
            inputs: vec![item("ts", "the input's series")],
            outputs: vec![item("out", "plain")],
            parameters: vec![Parameter {
                item: item("p", "user's choice"),
                domain: Some(r#"["a","b"]"#.to_string()),
                default_value: Some(r#""l'x""#.to_string()),
            }],
        };

        catalog.sanitize();

        assert_eq!(catalog.name, "o''algo");
        assert_eq!(catalog.label, "O''Algo");
        assert_eq!(catalog.description, "it''s a test");
        assert!(!catalog.visibility);
        assert_eq!(catalog.inputs[0].description, "the input''s series");
        assert_eq!(catalog.outputs[0].description, "plain");
        assert_eq!(catalog.parameters[0].item.description, "user''s choice");
        assert_eq!(catalog.parameters[0].domain.as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(
            catalog.parameters[0].default_value.as_deref(),
            Some(r#""l''x""#)
        );
    }

    #[test]
    fn test_sanitize_family_keeps_absent_fields() {
        let mut family = FamilyDef::new("Stat's").with_description("What's that");
        family.sanitize();

        assert_eq!(family.name, "Stat''s");
        assert!(family.label.is_none());
        assert_eq!(family.description.as_deref(), Some("What''s that"));
    }
}
