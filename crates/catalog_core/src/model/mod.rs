//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical entities shared by services and every backend.
//! - Own field-level validation so no backend re-implements business rules.
//!
//! # Invariants
//! - Entity fields are private; validated constructors and update methods
//!   are the only way to obtain or mutate an instance.
//! - Every entity carries a non-nil UUID identity from construction on.

pub mod game;
pub mod genre;
pub mod rating;
pub mod user;
pub mod validation;
