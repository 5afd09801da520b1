//! Service layer: business operations on top of `models`.
//! - Place lifecycle and ownership-checked CRUD.
//! - Registration, login and session tokens.
//! - Blob storage seam for uploaded photos.

pub mod errors;
pub mod auth;
pub mod place;
pub mod runtime;
pub mod storage;
pub mod user_service;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
