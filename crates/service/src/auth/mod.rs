//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, password login and session token checks live here so the
//! web layer only deals with cookies and redirects.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
