//! SQL generation for families, catalogs and catalog reset.
//!
//! Foreign keys are resolved with name lookups inside each statement, so a
//! catalog's statements only succeed when executed in order within the same
//! batch: algorithm, implementation, then one profile item and its link per
//! input, parameter and output.

use crate::config::SyncConfig;
use crate::family::FamilyManifest;
use crate::model::{Catalog, ProfileItem};
use crate::sanitize::{escape_quotes, Sanitize};
use crate::statement::{render_script, SqlValue, Statement};

const INSERT_FAMILY: &str = r#"INSERT INTO catalogue_functionalfamilydao ("name", "desc", "label") VALUES ($1, $2, $3);"#;

const INSERT_ALGORITHM: &str = r#"INSERT INTO catalogue_algorithmdao ("name", "label", "desc", "family_id") VALUES ($1, $2, $3, (SELECT id FROM catalogue_functionalfamilydao WHERE "name" = $4));"#;

const INSERT_IMPLEMENTATION: &str = r#"INSERT INTO catalogue_implementationdao ("name", "label", "desc", "algo_id", "execution_plugin", "library_address", "visibility") VALUES ($1, $2, $3, (SELECT id FROM catalogue_algorithmdao WHERE "name" = $1), $4, $5, $6);"#;

const INSERT_PROFILE_ITEM: &str = r#"INSERT INTO catalogue_profileitemdao ("name", "label", "desc", "direction", "dtype", "order_index", "data_format") VALUES ($1, $2, $3, $4, $5, $6, $7);"#;

const INSERT_PARAMETER_ITEM: &str = r#"INSERT INTO catalogue_profileitemdao ("name", "label", "desc", "direction", "dtype", "order_index", "data_format", "domain_of_values", "default_value") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);"#;

const LINK_INPUT: &str = r#"INSERT INTO catalogue_implementationdao_input_desc_items ("implementationdao_id", "profileitemdao_id") VALUES ((SELECT id FROM catalogue_implementationdao WHERE "name" = $1), (SELECT id FROM catalogue_profileitemdao WHERE "name" = $2));"#;

const LINK_OUTPUT: &str = r#"INSERT INTO catalogue_implementationdao_output_desc_items ("implementationdao_id", "profileitemdao_id") VALUES ((SELECT id FROM catalogue_implementationdao WHERE "name" = $1), (SELECT id FROM catalogue_profileitemdao WHERE "name" = $2));"#;

/// Catalog tables, most dependent first, with their reset statement.
pub const RESET_TABLES: [(&str, &str); 8] = [
    (
        "custom_customizedparameterdao",
        "TRUNCATE TABLE custom_customizedparameterdao RESTART IDENTITY CASCADE;",
    ),
    (
        "custom_customizedalgodao",
        "TRUNCATE TABLE custom_customizedalgodao RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_implementationdao_input_desc_items",
        "TRUNCATE TABLE catalogue_implementationdao_input_desc_items RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_implementationdao_output_desc_items",
        "TRUNCATE TABLE catalogue_implementationdao_output_desc_items RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_profileitemdao",
        "TRUNCATE TABLE catalogue_profileitemdao RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_implementationdao",
        "TRUNCATE TABLE catalogue_implementationdao RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_algorithmdao",
        "TRUNCATE TABLE catalogue_algorithmdao RESTART IDENTITY CASCADE;",
    ),
    (
        "catalogue_functionalfamilydao",
        "TRUNCATE TABLE catalogue_functionalfamilydao RESTART IDENTITY CASCADE;",
    ),
];

/// Role of a profile item within an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
    Input,
    Parameter,
    Output,
}

impl ItemRole {
    /// 0 when consumed by the implementation, 1 when produced.
    pub fn direction(self) -> i32 {
        match self {
            ItemRole::Input | ItemRole::Parameter => 0,
            ItemRole::Output => 1,
        }
    }

    /// 0 for scalar configuration values, 1 for data payloads.
    pub fn dtype(self) -> i32 {
        match self {
            ItemRole::Parameter => 0,
            ItemRole::Input | ItemRole::Output => 1,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            ItemRole::Input => "_i_",
            ItemRole::Parameter => "_p_",
            ItemRole::Output => "_o_",
        }
    }

    /// Parameters share the input association table.
    fn link_sql(self) -> &'static str {
        match self {
            ItemRole::Input | ItemRole::Parameter => LINK_INPUT,
            ItemRole::Output => LINK_OUTPUT,
        }
    }
}

/// Globally unique profile item name, e.g. `cut_ts__i__ts`.
pub fn profile_item_name(algorithm: &str, role: ItemRole, item: &str) -> String {
    format!("{}_{}_{}", algorithm, role.marker(), item)
}

/// One insert per manifest family.
pub fn family_statements(families: &FamilyManifest) -> Vec<Statement> {
    families
        .iter()
        .map(|family| {
            Statement::new(
                INSERT_FAMILY,
                vec![
                    family.name.clone().into(),
                    family.description.clone().into(),
                    family.label.clone().into(),
                ],
            )
        })
        .collect()
}

/// Truncation statements for every catalog table.
pub fn reset_statements() -> Vec<Statement> {
    RESET_TABLES
        .iter()
        .map(|&(_, sql)| Statement::new(sql, Vec::new()))
        .collect()
}

/// Ordered statements loading one normalized catalog.
pub fn catalog_statements(catalog: &Catalog, config: &SyncConfig) -> Vec<Statement> {
    let item_count = catalog.inputs.len() + catalog.parameters.len() + catalog.outputs.len();
    let mut statements = Vec::with_capacity(2 + 2 * item_count);

    statements.push(Statement::new(
        INSERT_ALGORITHM,
        vec![
            catalog.name.as_str().into(),
            catalog.label.as_str().into(),
            catalog.description.as_str().into(),
            catalog.family.as_str().into(),
        ],
    ));
    statements.push(Statement::new(
        INSERT_IMPLEMENTATION,
        vec![
            catalog.name.as_str().into(),
            catalog.label.as_str().into(),
            catalog.description.as_str().into(),
            config.execution_plugin.as_str().into(),
            catalog.entry_point.as_str().into(),
            catalog.visibility.into(),
        ],
    ));

    let mut order_index: i32 = 0;
    let mut push_item = |role: ItemRole, item: &ProfileItem, extra: Option<[SqlValue; 2]>| {
        let name = profile_item_name(&catalog.name, role, &item.name);
        let mut params: Vec<SqlValue> = vec![
            name.as_str().into(),
            item.label.as_str().into(),
            item.description.as_str().into(),
            role.direction().into(),
            role.dtype().into(),
            order_index.into(),
            item.data_format.as_str().into(),
        ];
        let sql = match extra {
            Some(extra) => {
                params.extend(extra);
                INSERT_PARAMETER_ITEM
            }
            None => INSERT_PROFILE_ITEM,
        };

        statements.push(Statement::new(sql, params));
        statements.push(Statement::new(
            role.link_sql(),
            vec![catalog.name.as_str().into(), name.into()],
        ));
        order_index += 1;
    };

    for input in &catalog.inputs {
        push_item(ItemRole::Input, input, None);
    }
    for param in &catalog.parameters {
        let extra = [
            param.domain.clone().into(),
            param.default_value.clone().into(),
        ];
        push_item(ItemRole::Parameter, &param.item, Some(extra));
    }
    for output in &catalog.outputs {
        push_item(ItemRole::Output, output, None);
    }

    statements
}

/// SQL script loading one catalog, with every literal quote-escaped.
pub fn catalog_script(catalog: &Catalog, config: &SyncConfig) -> String {
    let mut catalog = catalog.clone();
    catalog.sanitize();
    let config = config
        .clone()
        .with_execution_plugin(escape_quotes(&config.execution_plugin));
    render_script(&catalog_statements(&catalog, &config))
}

/// SQL script inserting every family, with every literal quote-escaped.
pub fn families_script(families: &FamilyManifest) -> String {
    let families = FamilyManifest::new(
        families
            .iter()
            .cloned()
            .map(|mut family| {
                family.sanitize();
                family
            })
            .collect(),
    );
    render_script(&family_statements(&families))
}

/// SQL script truncating every catalog table.
pub fn reset_script() -> String {
    render_script(&reset_statements())
}
