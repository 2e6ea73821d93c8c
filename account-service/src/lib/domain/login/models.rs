use uuid::Uuid;

/// Login view of an account.
///
/// The login flow only reads accounts; creation and updates go through the
/// resource services. The account store adapter maps the user aggregate
/// into this shape.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Result of a successful login: the account identity plus a signed
/// session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}
