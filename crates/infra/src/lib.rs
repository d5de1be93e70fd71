//! Infrastructure layer: configuration, database pool, record stores and the
//! services built on top of them.

pub mod config;
pub mod db;
pub mod services;
pub mod store;

pub use config::{ConfigError, DatabaseConfig};
pub use services::{AuthService, ChartPoint, ChartsService, CrudService, LoginResult, ResourceService, UserService};
pub use store::{InMemoryStore, PostgresStore, RecordStore, StoreError};
