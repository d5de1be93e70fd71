use travelhub_auth::UserRole;

/// Identity of the bearer of a validated session token.
///
/// Present in request extensions on every route behind the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: i64,
    username: String,
    role: Option<UserRole>,
}

impl AuthenticatedUser {
    pub fn new(user_id: i64, username: impl Into<String>, role: Option<UserRole>) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }
}
