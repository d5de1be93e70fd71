//! Services: the only layer that turns storage outcomes into classified
//! `ServiceError`s.

pub mod auth;
pub mod charts;
pub mod crud;
pub mod users;

pub use auth::{AuthService, LoginResult};
pub use charts::{ChartPoint, ChartsService};
pub use crud::CrudService;
pub use users::UserService;

use async_trait::async_trait;

use travelhub_core::{Collection, FieldSet, PageRequest, Record, ResourceSpec, ServiceResult};

/// CRUD surface shared by every resource controller.
#[async_trait]
pub trait ResourceService: Send + Sync {
    fn spec(&self) -> &'static ResourceSpec;

    async fn create(&self, input: FieldSet) -> ServiceResult<Record>;

    async fn find_all(&self, page: PageRequest) -> ServiceResult<Collection<Record>>;

    async fn find_one(&self, id: i64) -> ServiceResult<Option<Record>>;

    async fn update(&self, id: i64, changes: FieldSet) -> ServiceResult<()>;

    async fn delete(&self, id: i64) -> ServiceResult<()>;
}

#[async_trait]
impl ResourceService for CrudService {
    fn spec(&self) -> &'static ResourceSpec {
        CrudService::spec(self)
    }

    async fn create(&self, input: FieldSet) -> ServiceResult<Record> {
        CrudService::create(self, input).await
    }

    async fn find_all(&self, page: PageRequest) -> ServiceResult<Collection<Record>> {
        CrudService::find_all(self, page).await
    }

    async fn find_one(&self, id: i64) -> ServiceResult<Option<Record>> {
        CrudService::find_one(self, id).await
    }

    async fn update(&self, id: i64, changes: FieldSet) -> ServiceResult<()> {
        CrudService::update(self, id, changes).await
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        CrudService::delete(self, id).await
    }
}

#[async_trait]
impl ResourceService for UserService {
    fn spec(&self) -> &'static ResourceSpec {
        &travelhub_core::resources::USERS
    }

    async fn create(&self, input: FieldSet) -> ServiceResult<Record> {
        UserService::create(self, input).await
    }

    async fn find_all(&self, page: PageRequest) -> ServiceResult<Collection<Record>> {
        UserService::find_all(self, page).await
    }

    async fn find_one(&self, id: i64) -> ServiceResult<Option<Record>> {
        UserService::find_one(self, id).await
    }

    async fn update(&self, id: i64, changes: FieldSet) -> ServiceResult<()> {
        UserService::update(self, id, changes).await
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        UserService::delete(self, id).await
    }
}
