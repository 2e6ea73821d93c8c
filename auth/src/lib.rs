//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the account service:
//! - Password hashing (Argon2id)
//! - Credential verification with a decoy-hash path for missing accounts
//! - JWT session token generation and validation
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Credential Verification
//! ```
//! use auth::{CredentialVerifier, PasswordHasher};
//!
//! let verifier = CredentialVerifier::new();
//! let hash = PasswordHasher::new().hash("my_password").unwrap();
//!
//! // Stored hash present: outcome depends on the password
//! assert!(verifier.verify("my_password", Some(&hash)).unwrap());
//!
//! // No account found: the comparison still runs, against a decoy hash
//! assert!(!verifier.verify("my_password", None).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_account("account123", "a@example.com".to_string(), 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! ```

pub mod credentials;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use credentials::CredentialVerifier;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
