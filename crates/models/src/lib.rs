//! SeaORM entities for the travel wishlist plus the field validation that
//! belongs next to them.

pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod place;

#[cfg(test)]
mod tests;
