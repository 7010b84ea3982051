use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InspectError;

/// Free-form attributes attached to schemas, tables and columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attrs {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub charset: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: String,
    #[serde(default)]
    pub null: bool,
    #[serde(flatten)]
    pub attrs: Attrs,
}

/// What an index part points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKey {
    Column(String),
    Expr(String),
}

impl PartKey {
    /// Text shown for this part in the indexes view.
    pub fn label(&self) -> &str {
        match self {
            PartKey::Column(name) => name,
            PartKey::Expr(expr) => expr,
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            PartKey::Column(name) => Some(name),
            PartKey::Expr(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIndexPart", into = "RawIndexPart")]
pub struct IndexPart {
    pub key: PartKey,
    pub desc: bool,
}

impl IndexPart {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            key: PartKey::Column(name.into()),
            desc: false,
        }
    }

    pub fn expr(expr: impl Into<String>) -> Self {
        Self {
            key: PartKey::Expr(expr.into()),
            desc: false,
        }
    }
}

/// Wire shape of an index part: exactly one of `column` / `expr` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawIndexPart {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    desc: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    column: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    expr: String,
}

impl TryFrom<RawIndexPart> for IndexPart {
    type Error = String;

    fn try_from(raw: RawIndexPart) -> Result<Self, Self::Error> {
        let key = match (raw.column.is_empty(), raw.expr.is_empty()) {
            (false, true) => PartKey::Column(raw.column),
            (true, false) => PartKey::Expr(raw.expr),
            (false, false) => {
                return Err(format!(
                    "index part sets both column '{}' and expr '{}'",
                    raw.column, raw.expr
                ))
            }
            (true, true) => return Err("index part sets neither column nor expr".to_string()),
        };
        Ok(Self {
            key,
            desc: raw.desc,
        })
    }
}

impl From<IndexPart> for RawIndexPart {
    fn from(part: IndexPart) -> Self {
        let (column, expr) = match part.key {
            PartKey::Column(name) => (name, String::new()),
            PartKey::Expr(expr) => (String::new(), expr),
        };
        Self {
            desc: part.desc,
            column,
            expr,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub parts: Vec<IndexPart>,
}

impl Index {
    /// True if any column part of this index names `column`.
    pub fn covers(&self, column: &str) -> bool {
        self.parts.iter().any(|p| p.key.column() == Some(column))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    pub table: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub references: References,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Index>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl Table {
    pub fn is_primary_key_column(&self, column: &str) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|pk| pk.covers(column))
    }

    pub fn is_foreign_key_column(&self, column: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.columns.iter().any(|c| c == column))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

/// Root of an `atlas schema inspect` JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectData {
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

impl InspectData {
    /// Check the structural invariants the dashboard relies on.
    ///
    /// Foreign-key target tables are not checked: they may live in a schema
    /// that was not inspected.
    pub fn validate(&self) -> Result<(), InspectError> {
        let mut schema_names = HashSet::new();
        for schema in &self.schemas {
            if !schema_names.insert(schema.name.as_str()) {
                return Err(invalid(format!("duplicate schema '{}'", schema.name)));
            }

            let mut table_names = HashSet::new();
            for table in &schema.tables {
                if !table_names.insert(table.name.as_str()) {
                    return Err(invalid(format!(
                        "duplicate table '{}' in schema '{}'",
                        table.name, schema.name
                    )));
                }
                validate_table(&schema.name, table)?;
            }
        }
        Ok(())
    }
}

fn validate_table(schema: &str, table: &Table) -> Result<(), InspectError> {
    let mut columns = HashSet::new();
    for col in &table.columns {
        if !columns.insert(col.name.as_str()) {
            return Err(invalid(format!(
                "duplicate column '{}' in table '{}.{}'",
                col.name, schema, table.name
            )));
        }
    }

    if let Some(pk) = &table.primary_key {
        for name in pk.parts.iter().filter_map(|p| p.key.column()) {
            if !columns.contains(name) {
                return Err(invalid(format!(
                    "primary key of '{}.{}' references missing column '{}'",
                    schema, table.name, name
                )));
            }
        }
    }

    for fk in &table.foreign_keys {
        if let Some(missing) = fk.columns.iter().find(|c| !columns.contains(c.as_str())) {
            return Err(invalid(format!(
                "foreign key '{}' of '{}.{}' references missing column '{}'",
                fk.name, schema, table.name, missing
            )));
        }
        if fk.columns.len() != fk.references.columns.len() {
            return Err(invalid(format!(
                "foreign key '{}' of '{}.{}' maps {} column(s) onto {}",
                fk.name,
                schema,
                table.name,
                fk.columns.len(),
                fk.references.columns.len()
            )));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> InspectError {
    InspectError::InvalidData(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP_JSON: &str = r#"{
        "schemas": [{
            "name": "shop",
            "charset": "utf8mb4",
            "tables": [
                {
                    "name": "users",
                    "columns": [
                        {"name": "id", "type": "int"},
                        {"name": "email", "type": "varchar(255)", "null": true, "comment": "login"}
                    ],
                    "primary_key": {"parts": [{"column": "id"}]},
                    "indexes": [
                        {"name": "email_idx", "unique": true, "parts": [{"column": "email"}]},
                        {"name": "lower_email", "parts": [{"expr": "lower(email)", "desc": true}]}
                    ]
                },
                {
                    "name": "orders",
                    "columns": [{"name": "id"}, {"name": "user_id"}],
                    "foreign_keys": [{
                        "name": "orders_user_fk",
                        "columns": ["user_id"],
                        "references": {"table": "users", "columns": ["id"]}
                    }]
                }
            ]
        }]
    }"#;

    #[test]
    fn test_decode_atlas_document() {
        let data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        assert_eq!(data.schemas.len(), 1);
        let shop = &data.schemas[0];
        assert_eq!(shop.attrs.charset, "utf8mb4");

        let users = &shop.tables[0];
        assert_eq!(users.columns[1].data_type, "varchar(255)");
        assert!(users.columns[1].null);
        assert_eq!(users.columns[1].attrs.comment, "login");
        assert!(!users.columns[0].null);
        assert!(users.primary_key.as_ref().unwrap().name.is_none());

        let expr = &users.indexes[1].parts[0];
        assert_eq!(expr.key, PartKey::Expr("lower(email)".to_string()));
        assert!(expr.desc);

        data.validate().unwrap();
    }

    #[test]
    fn test_index_part_requires_exactly_one_target() {
        let both = r#"{"column": "a", "expr": "lower(a)"}"#;
        assert!(serde_json::from_str::<IndexPart>(both).is_err());
        let neither = r#"{"desc": true}"#;
        assert!(serde_json::from_str::<IndexPart>(neither).is_err());
    }

    #[test]
    fn test_index_part_serializes_back_to_wire_shape() {
        let json = serde_json::to_string(&IndexPart::expr("a + b")).unwrap();
        assert_eq!(json, r#"{"expr":"a + b"}"#);
    }

    #[test]
    fn test_key_membership() {
        let data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        let users = &data.schemas[0].tables[0];
        let orders = &data.schemas[0].tables[1];
        assert!(users.is_primary_key_column("id"));
        assert!(!users.is_primary_key_column("email"));
        assert!(orders.is_foreign_key_column("user_id"));
        assert!(!orders.is_foreign_key_column("id"));
    }

    #[test]
    fn test_validate_rejects_duplicate_columns() {
        let mut data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        data.schemas[0].tables[0].columns.push(Column {
            name: "id".to_string(),
            ..Default::default()
        });
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column 'id'"));
    }

    #[test]
    fn test_validate_rejects_dangling_primary_key() {
        let mut data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        data.schemas[0].tables[0].primary_key = Some(Index {
            parts: vec![IndexPart::column("nope")],
            ..Default::default()
        });
        assert!(matches!(data.validate(), Err(InspectError::InvalidData(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_foreign_key() {
        let mut data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        data.schemas[0].tables[1].foreign_keys[0]
            .references
            .columns
            .push("email".to_string());
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_dangling_target_table() {
        let mut data: InspectData = serde_json::from_str(SHOP_JSON).unwrap();
        data.schemas[0].tables[1].foreign_keys[0].references.table = "ghosts".to_string();
        assert!(data.validate().is_ok());
    }
}
