//! Error code catalog.
//!
//! Codes are grouped in blocks: `10XX` generic/auth failures, `20XX` users,
//! then one `2NXX` block per resource. Within a resource block the last two
//! digits identify the failing operation.

use serde::{Deserialize, Serialize};

/// Numeric error code carried in every error body (`errorCode`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u32);

impl ErrorCode {
    pub const VALIDATION_ERROR: Self = Self(1001);
    pub const JWT_VALIDATION_ERROR: Self = Self(1002);
    pub const MISSING_JWT_TOKEN: Self = Self(1003);
    pub const INVALID_PASSWORD: Self = Self(1104);

    pub const USER_DOES_NOT_EXIST: Self = Self(2001);
    pub const USER_EMAIL_MUST_UNIQUE: Self = Self(2009);
    pub const USER_USERNAME_MUST_UNIQUE: Self = Self(2012);

    pub const TOUR_TITLE_MUST_UNIQUE: Self = Self(2102);
    pub const DESTINATION_NAME_MUST_UNIQUE: Self = Self(2202);
    pub const PRODUCT_DOES_NOT_EXIST: Self = Self(2604);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable messages paired with the codes above.
pub mod messages {
    pub const MISSING_JWT_TOKEN: &str = "Missing JWT token";
    pub const INVALID_JWT_TOKEN: &str = "Invalid token";
    pub const INVALID_PASSWORD: &str = "Invalid password! Please try again!";

    pub const USER_DOES_NOT_EXIST: &str = "User doesn't exist! Please input another email!";
    pub const USER_EMAIL_MUST_UNIQUE: &str = "User's email must be unique";
    pub const USER_USERNAME_MUST_UNIQUE: &str = "User's username must be unique";

    pub const TOUR_TITLE_MUST_UNIQUE: &str = "Tour's title must be unique";
    pub const TOUR_DOES_NOT_EXIST: &str = "Tour does not exist";
    pub const DESTINATION_NAME_MUST_UNIQUE: &str = "Destination's name must be unique";
    pub const DESTINATION_DOES_NOT_EXIST: &str = "Destination does not exist";
    pub const FORM_DOES_NOT_EXIST: &str = "Form does not exist";
    pub const REVIEW_DOES_NOT_EXIST: &str = "Review does not exist";
    pub const CONTACT_DOES_NOT_EXIST: &str = "Contact does not exist";
    pub const PRODUCT_DOES_NOT_EXIST: &str = "Product does not exist";
    pub const ORDER_DOES_NOT_EXIST: &str = "Order does not exist";
}

/// Per-resource operation codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    pub list_failed: ErrorCode,
    pub create_failed: ErrorCode,
    pub does_not_exist: ErrorCode,
    pub find_failed: ErrorCode,
    pub update_failed: ErrorCode,
    pub delete_failed: ErrorCode,
    pub not_found_message: &'static str,
}

impl ResourceCatalog {
    /// Catalog for a resource whose codes follow the `base + 01..07` layout.
    const fn block(base: u32, not_found_message: &'static str) -> Self {
        Self {
            list_failed: ErrorCode(base + 1),
            create_failed: ErrorCode(base + 3),
            does_not_exist: ErrorCode(base + 4),
            find_failed: ErrorCode(base + 5),
            update_failed: ErrorCode(base + 6),
            delete_failed: ErrorCode(base + 7),
            not_found_message,
        }
    }
}

// Users predate the block layout and keep their historical codes.
pub const USER: ResourceCatalog = ResourceCatalog {
    list_failed: ErrorCode(2007),
    create_failed: ErrorCode(2008),
    does_not_exist: ErrorCode::USER_DOES_NOT_EXIST,
    find_failed: ErrorCode(2004),
    update_failed: ErrorCode(2003),
    delete_failed: ErrorCode(2006),
    not_found_message: messages::USER_DOES_NOT_EXIST,
};

pub const TOUR: ResourceCatalog = ResourceCatalog::block(2100, messages::TOUR_DOES_NOT_EXIST);
pub const DESTINATION: ResourceCatalog =
    ResourceCatalog::block(2200, messages::DESTINATION_DOES_NOT_EXIST);
pub const FORM: ResourceCatalog = ResourceCatalog::block(2300, messages::FORM_DOES_NOT_EXIST);
pub const REVIEW: ResourceCatalog = ResourceCatalog::block(2400, messages::REVIEW_DOES_NOT_EXIST);
pub const CONTACT: ResourceCatalog = ResourceCatalog::block(2500, messages::CONTACT_DOES_NOT_EXIST);
pub const PRODUCT: ResourceCatalog = ResourceCatalog::block(2600, messages::PRODUCT_DOES_NOT_EXIST);
pub const ORDER: ResourceCatalog = ResourceCatalog::block(2700, messages::ORDER_DOES_NOT_EXIST);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_blocks_follow_operation_layout() {
        assert_eq!(TOUR.list_failed.value(), 2101);
        assert_eq!(TOUR.create_failed.value(), 2103);
        assert_eq!(TOUR.does_not_exist.value(), 2104);
        assert_eq!(TOUR.delete_failed.value(), 2107);
        assert_eq!(ORDER.update_failed.value(), 2706);
        assert_eq!(PRODUCT.does_not_exist, ErrorCode::PRODUCT_DOES_NOT_EXIST);
    }

    #[test]
    fn user_codes_are_historical() {
        assert_eq!(USER.does_not_exist.value(), 2001);
        assert_eq!(USER.create_failed.value(), 2008);
        assert_eq!(USER.list_failed.value(), 2007);
    }

    #[test]
    fn code_serializes_as_bare_number() {
        let json = serde_json::to_value(ErrorCode::TOUR_TITLE_MUST_UNIQUE).unwrap();
        assert_eq!(json, serde_json::json!(2102));
    }
}
