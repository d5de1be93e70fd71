//! Column schema for table-backed resources.
//!
//! Every resource is described by a static [`ResourceSpec`]: its table, its
//! primary key, and the ordered list of [`Column`]s. Identifiers used in SQL
//! only ever come from these statics.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{ErrorCode, ResourceCatalog};

/// A scalar column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Integer(v) => Value::from(*v),
            FieldValue::Float(v) => Value::from(*v),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Storage type of a column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    /// Text restricted to a fixed set of values.
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Column {
    /// Database column name.
    pub name: &'static str,
    /// JSON field name.
    pub field: &'static str,
    pub kind: ColumnKind,
    /// Must be supplied (and non-null) on create.
    pub required: bool,
    /// Stored but never serialized into a response.
    pub write_only: bool,
    /// Accepted from request bodies.
    pub writable: bool,
}

impl Column {
    pub const fn new(field: &'static str, name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            field,
            kind,
            required: false,
            write_only: false,
            writable: true,
        }
    }

    pub const fn text(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, ColumnKind::Text)
    }

    pub const fn integer(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, ColumnKind::Integer)
    }

    pub const fn float(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, ColumnKind::Float)
    }

    pub const fn boolean(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, ColumnKind::Boolean)
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn write_only(self) -> Self {
        Self { write_only: true, ..self }
    }

    /// Server-managed: never read from input, never written to output.
    pub const fn internal(self) -> Self {
        Self {
            write_only: true,
            writable: false,
            ..self
        }
    }
}

/// Application-level uniqueness guard on one column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniqueField {
    pub column: &'static str,
    pub code: ErrorCode,
    pub message: &'static str,
}

/// A column that must reference an existing row of another resource on create.
#[derive(Debug, Copy, Clone)]
pub struct ParentRef {
    pub column: &'static str,
    pub resource: &'static ResourceSpec,
}

#[derive(Debug)]
pub struct ResourceSpec {
    /// Singular name, used in logs and routes.
    pub name: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    pub id_field: &'static str,
    pub columns: &'static [Column],
    pub unique: &'static [UniqueField],
    pub parent: Option<ParentRef>,
    pub catalog: ResourceCatalog,
}

impl ResourceSpec {
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_by_field(&self, field: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Columns that appear in responses.
    pub fn readable_columns(&self) -> impl Iterator<Item = &'static Column> + use<> {
        let columns: &'static [Column] = self.columns;
        columns.iter().filter(|c| !c.write_only)
    }
}

/// Ordered set of column assignments, at most one per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(&'static Column, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column`, replacing any previous value for it.
    pub fn insert(&mut self, column: &'static Column, value: FieldValue) {
        match self.entries.iter_mut().find(|(c, _)| c.name == column.name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn with(mut self, column: &'static Column, value: FieldValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(c, _)| c.name == column)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, column: &str) -> Option<FieldValue> {
        let idx = self.entries.iter().position(|(c, _)| c.name == column)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static Column, &FieldValue)> {
        self.entries.iter().map(|(c, v)| (*c, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One stored row, keyed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub fields: BTreeMap<&'static str, FieldValue>,
}

impl Record {
    /// Materialize a full row: every column of `spec`, `Null` where unset.
    pub fn from_fields(spec: &ResourceSpec, id: i64, fields: &FieldSet) -> Self {
        let fields = spec
            .columns
            .iter()
            .map(|c| (c.name, fields.get(c.name).cloned().unwrap_or(FieldValue::Null)))
            .collect();
        Self { id, fields }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: &FieldSet) {
        for (column, value) in changes.iter() {
            self.fields.insert(column.name, value.clone());
        }
    }

    /// Response representation: primary key plus every readable column.
    pub fn to_json(&self, spec: &ResourceSpec) -> Value {
        let mut map = Map::new();
        map.insert(spec.id_field.to_string(), Value::from(self.id));
        for column in spec.readable_columns() {
            let value = self.get(column.name).map_or(Value::Null, FieldValue::to_json);
            map.insert(column.field.to_string(), value);
        }
        Value::Object(map)
    }
}
