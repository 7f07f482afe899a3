//! Aggregates composed from several domain entities.
//!
//! # Responsibility
//! - Hold business rules that span entities (one rating per user and game).
//! - Derive read statistics without owning any persistence.

pub mod game_details;
