use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use travelhub_core::{Column, FieldSet, FieldValue, Record, ResourceSpec};

use super::{RecordStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Record>,
}

/// In-memory record store.
///
/// Intended for tests/dev. Ids are assigned per table starting at 1 and are
/// never reused. No unique constraints are enforced.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, spec: &ResourceSpec, f: impl FnOnce(Option<&Table>) -> T) -> Result<T, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(f(tables.get(spec.table)))
    }

    fn write<T>(&self, spec: &ResourceSpec, f: impl FnOnce(&mut Table) -> T) -> Result<T, StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(f(tables.entry(spec.table).or_default()))
    }
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert(&self, spec: &'static ResourceSpec, fields: &FieldSet) -> Result<i64, StoreError> {
        self.write(spec, |table| {
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, Record::from_fields(spec, id, fields));
            id
        })
    }

    async fn find_all(
        &self,
        spec: &'static ResourceSpec,
        window: Option<(i64, i64)>,
    ) -> Result<Vec<Record>, StoreError> {
        self.read(spec, |table| {
            let Some(table) = table else {
                return Vec::new();
            };
            let rows = table.rows.values().cloned();
            match window {
                Some((limit, offset)) => rows.skip(to_index(offset)).take(to_index(limit)).collect(),
                None => rows.collect(),
            }
        })
    }

    async fn find_one(&self, spec: &'static ResourceSpec, id: i64) -> Result<Option<Record>, StoreError> {
        self.read(spec, |table| table.and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn find_by(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
        value: &FieldValue,
    ) -> Result<Option<Record>, StoreError> {
        self.read(spec, |table| {
            table.and_then(|t| {
                t.rows
                    .values()
                    .find(|r| r.get(column.name) == Some(value))
                    .cloned()
            })
        })
    }

    async fn exists(&self, spec: &'static ResourceSpec, id: i64) -> Result<bool, StoreError> {
        self.read(spec, |table| table.is_some_and(|t| t.rows.contains_key(&id)))
    }

    async fn column_values(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
    ) -> Result<Vec<FieldValue>, StoreError> {
        self.read(spec, |table| {
            table
                .map(|t| {
                    t.rows
                        .values()
                        .map(|r| r.get(column.name).cloned().unwrap_or(FieldValue::Null))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn update(&self, spec: &'static ResourceSpec, id: i64, changes: &FieldSet) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }
        self.write(spec, |table| match table.rows.get_mut(&id) {
            Some(record) => {
                record.apply(changes);
                1
            }
            None => 0,
        })
    }

    async fn delete(&self, spec: &'static ResourceSpec, id: i64) -> Result<u64, StoreError> {
        self.write(spec, |table| u64::from(table.rows.remove(&id).is_some()))
    }
}
