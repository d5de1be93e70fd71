//! `travelhub-core`: domain building blocks shared by every layer.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy and code catalog, the uniform response body, pagination
//! types, and the column schema of every resource.

pub mod catalog;
pub mod collection;
pub mod error;
pub mod resources;
pub mod response;
pub mod schema;

pub use catalog::{ErrorCode, ResourceCatalog};
pub use collection::{Collection, PageInfo, PageRequest};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use response::{AppResponse, ErrorDetail, MessageType};
pub use schema::{Column, ColumnKind, FieldSet, FieldValue, ParentRef, Record, ResourceSpec, UniqueField};
