//! Generic CRUD over one table-backed resource.

use std::sync::Arc;

use tracing::instrument;

use travelhub_core::{
    Collection, ErrorCode, FieldSet, FieldValue, PageRequest, Record, ResourceSpec, ServiceError,
    ServiceResult, UniqueField,
};

use crate::store::{RecordStore, StoreError};

/// CRUD service instantiated per resource.
///
/// Holds no state besides the shared store: every operation re-reads.
#[derive(Clone)]
pub struct CrudService {
    spec: &'static ResourceSpec,
    store: Arc<dyn RecordStore>,
}

impl CrudService {
    pub fn new(spec: &'static ResourceSpec, store: Arc<dyn RecordStore>) -> Self {
        Self { spec, store }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Insert a new row and return it as stored.
    ///
    /// Parent reference and uniqueness are checked first. The uniqueness
    /// check is read-then-write; a database unique constraint, when present,
    /// still turns a lost race into `conflict`.
    #[instrument(skip(self, input), fields(resource = self.spec.name))]
    pub async fn create(&self, input: FieldSet) -> ServiceResult<Record> {
        let create_failed = self.spec.catalog.create_failed;

        self.check_parent(&input, create_failed).await?;
        self.check_unique(&input, create_failed).await?;

        let id = self
            .store
            .insert(self.spec, &input)
            .await
            .map_err(|e| self.store_failure("create", create_failed, e))?;

        match self.find_one(id).await? {
            Some(record) => {
                tracing::info!(resource = self.spec.name, id, "created");
                Ok(record)
            }
            None => Err(self.internal(
                "create",
                create_failed,
                format!("{} {id} vanished after insert", self.spec.name),
            )),
        }
    }

    #[instrument(skip(self), fields(resource = self.spec.name))]
    pub async fn find_all(&self, page: PageRequest) -> ServiceResult<Collection<Record>> {
        let rows = self
            .store
            .find_all(self.spec, page.window())
            .await
            .map_err(|e| self.store_failure("find_all", self.spec.catalog.list_failed, e))?;

        Ok(Collection::new(rows, page))
    }

    /// `Ok(None)` when no row has this id.
    #[instrument(skip(self), fields(resource = self.spec.name))]
    pub async fn find_one(&self, id: i64) -> ServiceResult<Option<Record>> {
        self.store
            .find_one(self.spec, id)
            .await
            .map_err(|e| self.store_failure("find_one", self.spec.catalog.find_failed, e))
    }

    /// Partial update: only the supplied columns change. An empty change set
    /// is a successful no-op once the row is known to exist.
    #[instrument(skip(self, changes), fields(resource = self.spec.name, columns = changes.len()))]
    pub async fn update(&self, id: i64, changes: FieldSet) -> ServiceResult<()> {
        let update_failed = self.spec.catalog.update_failed;

        self.ensure_exists("update", id, update_failed).await?;
        if changes.is_empty() {
            return Ok(());
        }

        self.store
            .update(self.spec, id, &changes)
            .await
            .map_err(|e| self.store_failure("update", update_failed, e))?;

        tracing::info!(resource = self.spec.name, id, "updated");
        Ok(())
    }

    /// Physical delete. Rows in other tables referencing this one are left as is.
    #[instrument(skip(self), fields(resource = self.spec.name))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let delete_failed = self.spec.catalog.delete_failed;

        self.ensure_exists("delete", id, delete_failed).await?;
        self.store
            .delete(self.spec, id)
            .await
            .map_err(|e| self.store_failure("delete", delete_failed, e))?;

        tracing::info!(resource = self.spec.name, id, "deleted");
        Ok(())
    }

    async fn ensure_exists(&self, operation: &'static str, id: i64, code: ErrorCode) -> ServiceResult<()> {
        let exists = self
            .store
            .exists(self.spec, id)
            .await
            .map_err(|e| self.store_failure(operation, code, e))?;

        if exists {
            Ok(())
        } else {
            Err(self.not_found())
        }
    }

    async fn check_parent(&self, input: &FieldSet, code: ErrorCode) -> ServiceResult<()> {
        let Some(parent) = self.spec.parent else {
            return Ok(());
        };

        let exists = match input.get(parent.column).and_then(FieldValue::as_i64) {
            Some(parent_id) => self
                .store
                .exists(parent.resource, parent_id)
                .await
                .map_err(|e| self.store_failure("create", code, e))?,
            None => false,
        };

        if exists {
            Ok(())
        } else {
            let catalog = parent.resource.catalog;
            tracing::debug!(resource = self.spec.name, parent = parent.resource.name, "parent missing");
            Err(ServiceError::not_found(catalog.not_found_message, catalog.does_not_exist))
        }
    }

    async fn check_unique(&self, input: &FieldSet, code: ErrorCode) -> ServiceResult<()> {
        for unique in self.spec.unique {
            let Some(candidate) = input.get(unique.column) else {
                continue;
            };
            let Some(column) = self.spec.column(unique.column) else {
                continue;
            };
            if candidate.is_null() {
                continue;
            }

            let taken = self
                .store
                .column_values(self.spec, column)
                .await
                .map_err(|e| self.store_failure("create", code, e))?;

            if taken.contains(candidate) {
                tracing::debug!(resource = self.spec.name, column = unique.column, "unique value taken");
                return Err(ServiceError::conflict(unique.message, unique.code));
            }
        }
        Ok(())
    }

    pub(crate) fn not_found(&self) -> ServiceError {
        let catalog = self.spec.catalog;
        ServiceError::not_found(catalog.not_found_message, catalog.does_not_exist)
    }

    pub(crate) fn internal(&self, operation: &'static str, code: ErrorCode, message: String) -> ServiceError {
        tracing::error!(resource = self.spec.name, operation, code = code.value(), error = %message, "operation failed");
        ServiceError::internal(message, code)
    }

    /// Classify a storage failure: unique violations become `conflict`,
    /// everything else `internalServerError` with the operation's code.
    pub(crate) fn store_failure(&self, operation: &'static str, code: ErrorCode, err: StoreError) -> ServiceError {
        match &err {
            StoreError::UniqueViolation { constraint, .. } => {
                tracing::warn!(resource = self.spec.name, operation, error = %err, "unique constraint rejected write");
                match self.unique_for(constraint.as_deref()) {
                    Some(unique) => ServiceError::conflict(unique.message, unique.code),
                    None => ServiceError::conflict(err.to_string(), code),
                }
            }
            _ => self.internal(operation, code, err.to_string()),
        }
    }

    fn unique_for(&self, constraint: Option<&str>) -> Option<&'static UniqueField> {
        let uniques: &'static [UniqueField] = self.spec.unique;
        match constraint {
            Some(name) => uniques
                .iter()
                .find(|u| name.split('_').any(|part| part == u.column))
                .or_else(|| uniques.first()),
            None => uniques.first(),
        }
    }
}
