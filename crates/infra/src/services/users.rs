//! Users: CRUD plus password hashing.
//!
//! Passwords are never stored in clear: `create` and `update` replace the
//! supplied password with an Argon2 hash under a fresh salt. Neither column is
//! ever serialized (both are write-only in the user schema).

use std::sync::Arc;

use tracing::instrument;

use travelhub_auth::{generate_salt, hash_password};
use travelhub_core::resources::USERS;
use travelhub_core::{Collection, ErrorCode, FieldSet, FieldValue, PageRequest, Record, ServiceResult};

use crate::services::crud::CrudService;
use crate::store::RecordStore;

pub const PASSWORD: &str = "password";
pub const SALT: &str = "salt";
pub const USERNAME: &str = "username";

#[derive(Clone)]
pub struct UserService {
    crud: CrudService,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            crud: CrudService::new(&USERS, store),
        }
    }

    #[instrument(skip(self, input), fields(resource = "user"))]
    pub async fn create(&self, mut input: FieldSet) -> ServiceResult<Record> {
        self.hash_into(&mut input, "create", USERS.catalog.create_failed)?;
        self.crud.create(input).await
    }

    pub async fn find_all(&self, page: PageRequest) -> ServiceResult<Collection<Record>> {
        self.crud.find_all(page).await
    }

    pub async fn find_one(&self, id: i64) -> ServiceResult<Option<Record>> {
        self.crud.find_one(id).await
    }

    /// Partial update; a supplied password is re-hashed with a new salt.
    #[instrument(skip(self, changes), fields(resource = "user"))]
    pub async fn update(&self, id: i64, mut changes: FieldSet) -> ServiceResult<()> {
        self.hash_into(&mut changes, "update", USERS.catalog.update_failed)?;
        self.crud.update(id, changes).await
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.crud.delete(id).await
    }

    /// Full row (hash and salt included) for a username, if any.
    #[instrument(skip(self))]
    pub async fn find_credentials(&self, username: &str) -> ServiceResult<Option<Record>> {
        let Some(column) = USERS.column(USERNAME) else {
            return Ok(None);
        };

        self.crud
            .store()
            .find_by(&USERS, column, &FieldValue::text(username))
            .await
            .map_err(|e| self.crud.store_failure("find_credentials", USERS.catalog.find_failed, e))
    }

    fn hash_into(&self, fields: &mut FieldSet, operation: &'static str, code: ErrorCode) -> ServiceResult<()> {
        let Some(FieldValue::Text(password)) = fields.get(PASSWORD) else {
            return Ok(());
        };
        let (Some(password_column), Some(salt_column)) = (USERS.column(PASSWORD), USERS.column(SALT)) else {
            return Ok(());
        };

        let salt = generate_salt();
        let hash = hash_password(password, &salt)
            .map_err(|e| self.crud.internal(operation, code, e.to_string()))?;

        fields.insert(password_column, FieldValue::Text(hash));
        fields.insert(salt_column, FieldValue::Text(salt));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use travelhub_auth::verify_password;
    use travelhub_core::ErrorKind;

    use super::*;
    use crate::services::testing::memory;

    fn user(username: &str, email: Option<&str>, password: &str) -> FieldSet {
        let mut set = FieldSet::new()
            .with(USERS.column(USERNAME).unwrap(), FieldValue::text(username))
            .with(USERS.column(PASSWORD).unwrap(), FieldValue::text(password));
        if let Some(email) = email {
            set.insert(USERS.column("email").unwrap(), FieldValue::text(email));
        }
        set
    }

    fn text<'a>(record: &'a Record, column: &str) -> &'a str {
        record.get(column).and_then(FieldValue::as_text).unwrap()
    }

    #[tokio::test]
    async fn create_stores_a_salted_hash() {
        let users = UserService::new(memory());
        let created = users.create(user("a", None, "p")).await.unwrap();

        let hash = text(&created, PASSWORD);
        let salt = text(&created, SALT);
        assert_ne!(hash, "p");
        assert!(verify_password("p", salt, hash).unwrap());

        let json = created.to_json(&USERS);
        assert!(json.get("password").is_none());
        assert!(json.get("salt").is_none());
        assert_eq!(json["username"], "a");
    }

    #[tokio::test]
    async fn usernames_and_emails_are_unique() {
        let users = UserService::new(memory());
        users.create(user("a", Some("a@x.io"), "p")).await.unwrap();

        let err = users.create(user("a", None, "p")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), ErrorCode::USER_USERNAME_MUST_UNIQUE);

        let err = users.create(user("b", Some("a@x.io"), "p")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::USER_EMAIL_MUST_UNIQUE);

        // Absent emails never collide with each other.
        users.create(user("c", None, "p")).await.unwrap();
        users.create(user("d", None, "p")).await.unwrap();
    }

    #[tokio::test]
    async fn password_update_rehashes_with_new_salt() {
        let users = UserService::new(memory());
        let created = users.create(user("a", None, "old")).await.unwrap();

        let changes = FieldSet::new().with(USERS.column(PASSWORD).unwrap(), FieldValue::text("new"));
        users.update(created.id, changes).await.unwrap();

        let after = users.find_credentials("a").await.unwrap().unwrap();
        assert_ne!(text(&after, SALT), text(&created, SALT));
        assert!(verify_password("new", text(&after, SALT), text(&after, PASSWORD)).unwrap());
        assert!(!verify_password("old", text(&after, SALT), text(&after, PASSWORD)).unwrap());
    }

    #[tokio::test]
    async fn unknown_username_has_no_credentials() {
        let users = UserService::new(memory());
        assert!(users.find_credentials("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_user_is_not_found_with_user_code() {
        let users = UserService::new(memory());
        let err = users.delete(5).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::USER_DOES_NOT_EXIST);
    }
}
