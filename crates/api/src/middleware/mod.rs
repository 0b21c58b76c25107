//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the caller, decoded from a Bearer token.
//! - [`rbac::RequireAdmin`]: `admin` only.
//! - [`rbac::RequireManager`]: `admin` or `supervisor`.
//! - [`rbac::RequireAuth`]: any authenticated user.

pub mod auth;
pub mod rbac;
