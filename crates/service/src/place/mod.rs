//! Place module: typed inputs, repository seam, lifecycle manager and the
//! ownership-checked CRUD service.

pub mod domain;
pub mod photo;
pub mod repository;
pub mod repo;
pub mod lifecycle;
pub mod service;

pub use domain::Place;
pub use lifecycle::PlaceLifecycle;
pub use service::PlaceService;
