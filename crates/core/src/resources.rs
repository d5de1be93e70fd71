//! Static definitions of every table-backed resource.

use crate::catalog::{self, ErrorCode, messages};
use crate::schema::{Column, ColumnKind, ParentRef, ResourceSpec, UniqueField};

pub const USER_ROLES: &[&str] = &["admin", "user"];

pub static TOURS: ResourceSpec = ResourceSpec {
    name: "tour",
    table: "tours",
    id_column: "tourid",
    id_field: "tourId",
    columns: &[
        Column::text("title", "title").required(),
        Column::text("duration", "duration"),
        Column::text("startTime", "starttime"),
        Column::float("rating", "rating"),
        Column::text("hotel", "hotel"),
        Column::float("price", "price"),
        Column::text("vehicle", "vehicle").required(),
        Column::text("type", "type").required(),
        Column::text("numberOfPeople", "numberofpeople"),
        Column::text("description", "description"),
        Column::integer("numberOfBooking", "numberofbooking"),
        Column::text("image", "image"),
        Column::boolean("isTrending", "istrending"),
    ],
    unique: &[UniqueField {
        column: "title",
        code: ErrorCode::TOUR_TITLE_MUST_UNIQUE,
        message: messages::TOUR_TITLE_MUST_UNIQUE,
    }],
    parent: None,
    catalog: catalog::TOUR,
};

pub static DESTINATIONS: ResourceSpec = ResourceSpec {
    name: "destination",
    table: "destinations",
    id_column: "destinationid",
    id_field: "destinationId",
    columns: &[
        Column::integer("tourId", "tourid").required(),
        Column::text("name", "name").required(),
        Column::text("address", "address"),
        Column::text("description", "description"),
        Column::text("content", "content"),
        Column::text("image", "image"),
    ],
    unique: &[UniqueField {
        column: "name",
        code: ErrorCode::DESTINATION_NAME_MUST_UNIQUE,
        message: messages::DESTINATION_NAME_MUST_UNIQUE,
    }],
    parent: None,
    catalog: catalog::DESTINATION,
};

pub static FORMS: ResourceSpec = ResourceSpec {
    name: "form",
    table: "forms",
    id_column: "formid",
    id_field: "formId",
    columns: &[
        Column::integer("tourId", "tourid").required(),
        Column::text("name", "name").required(),
        Column::text("phoneNumber", "phonenumber").required(),
        Column::text("email", "email").required(),
        Column::integer("numberOfPeople", "numberofpeople"),
        Column::text("startTime", "starttime"),
        Column::text("endTime", "endtime"),
    ],
    unique: &[],
    parent: None,
    catalog: catalog::FORM,
};

pub static REVIEWS: ResourceSpec = ResourceSpec {
    name: "review",
    table: "reviews",
    id_column: "reviewid",
    id_field: "reviewId",
    columns: &[
        Column::integer("userId", "userid").required(),
        Column::text("name", "name").required(),
        Column::text("email", "email").required(),
        Column::integer("tourId", "tourid").required(),
        Column::float("rating", "rating"),
        Column::text("content", "content"),
    ],
    unique: &[],
    parent: None,
    catalog: catalog::REVIEW,
};

pub static CONTACTS: ResourceSpec = ResourceSpec {
    name: "contact",
    table: "contacts",
    id_column: "contactid",
    id_field: "contactId",
    columns: &[
        Column::integer("userId", "userid").required(),
        Column::text("name", "name").required(),
        Column::text("phoneNumber", "phonenumber").required(),
        Column::text("email", "email").required(),
        Column::text("title", "title"),
        Column::text("description", "description"),
    ],
    unique: &[],
    parent: None,
    catalog: catalog::CONTACT,
};

pub static PRODUCTS: ResourceSpec = ResourceSpec {
    name: "product",
    table: "products",
    id_column: "productid",
    id_field: "productId",
    columns: &[
        Column::text("name", "name").required(),
        Column::float("price", "price").required(),
        Column::integer("quantity", "quantity").required(),
        Column::text("description", "description"),
        Column::text("category", "category"),
        Column::text("image", "image"),
        Column::integer("count", "count"),
    ],
    unique: &[],
    parent: None,
    catalog: catalog::PRODUCT,
};

pub static ORDERS: ResourceSpec = ResourceSpec {
    name: "order",
    table: "orders",
    id_column: "orderid",
    id_field: "orderId",
    columns: &[
        Column::integer("productId", "productid").required(),
        Column::integer("quantity", "quantity").required(),
    ],
    unique: &[],
    parent: Some(ParentRef {
        column: "productid",
        resource: &PRODUCTS,
    }),
    catalog: catalog::ORDER,
};

pub static USERS: ResourceSpec = ResourceSpec {
    name: "user",
    table: "users",
    id_column: "userid",
    id_field: "userId",
    columns: &[
        Column::text("username", "username").required(),
        Column::text("email", "email"),
        Column::text("name", "name"),
        Column::new("role", "role", ColumnKind::OneOf(USER_ROLES)),
        Column::text("password", "password").required().write_only(),
        Column::text("salt", "salt").internal(),
    ],
    unique: &[
        UniqueField {
            column: "username",
            code: ErrorCode::USER_USERNAME_MUST_UNIQUE,
            message: messages::USER_USERNAME_MUST_UNIQUE,
        },
        UniqueField {
            column: "email",
            code: ErrorCode::USER_EMAIL_MUST_UNIQUE,
            message: messages::USER_EMAIL_MUST_UNIQUE,
        },
    ],
    parent: None,
    catalog: catalog::USER,
};

/// Resources served by the generic CRUD routes (users have their own).
pub static CRUD_RESOURCES: [&ResourceSpec; 7] = [
    &TOURS,
    &DESTINATIONS,
    &FORMS,
    &REVIEWS,
    &CONTACTS,
    &PRODUCTS,
    &ORDERS,
];
