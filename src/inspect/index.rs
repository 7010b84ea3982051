use std::collections::HashMap;

use crate::error::ScopeError;

use super::{InspectData, Schema, Table};

/// Composite key identifying a table across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub schema: String,
    pub table: String,
}

impl TableKey {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

/// Read-only lookup structures over the loaded tree.
///
/// Owns the tree; lookups hand out borrows into it. Built once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SchemaIndex {
    schemas: Vec<Schema>,
    schema_by_name: HashMap<String, usize>,
    table_by_key: HashMap<TableKey, (usize, usize)>,
}

impl SchemaIndex {
    pub fn build(data: InspectData) -> Result<Self, ScopeError> {
        if data.schemas.is_empty() {
            return Err(ScopeError::NoSchemaData);
        }

        let table_count = data.schemas.iter().map(|s| s.tables.len()).sum();
        let mut schema_by_name = HashMap::with_capacity(data.schemas.len());
        let mut table_by_key = HashMap::with_capacity(table_count);

        for (si, schema) in data.schemas.iter().enumerate() {
            schema_by_name.insert(schema.name.clone(), si);
            for (ti, table) in schema.tables.iter().enumerate() {
                table_by_key.insert(TableKey::new(&schema.name, &table.name), (si, ti));
            }
        }

        Ok(Self {
            schemas: data.schemas,
            schema_by_name,
            table_by_key,
        })
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schema_by_name.get(name).map(|&i| &self.schemas[i])
    }

    pub fn table(&self, key: &TableKey) -> Option<&Table> {
        self.table_by_key
            .get(key)
            .map(|&(si, ti)| &self.schemas[si].tables[ti])
    }

    pub fn contains(&self, key: &TableKey) -> bool {
        self.table_by_key.contains_key(key)
    }

    /// Table names of `schema` in source order; empty for an unknown schema.
    pub fn table_names(&self, schema: &str) -> Vec<String> {
        self.schema(schema)
            .map(|s| s.tables.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default()
    }

    /// The schema following `name` in source order, wrapping around.
    pub fn next_schema(&self, name: &str) -> &Schema {
        let next = self
            .schema_by_name
            .get(name)
            .map_or(0, |&i| (i + 1) % self.schemas.len());
        &self.schemas[next]
    }

    /// Startup selection: first schema, and its first table when it has one.
    pub fn default_selection(&self) -> (&str, Option<TableKey>) {
        let schema = &self.schemas[0];
        let table = schema
            .tables
            .first()
            .map(|t| TableKey::new(&schema.name, &t.name));
        (&schema.name, table)
    }
}
