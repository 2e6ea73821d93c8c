pub mod accounts;
pub mod repositories;
pub mod tokens;
