//! Domain logic for the quiz bank backend.
//!
//! Nothing in this crate talks to the database directly. Persistence is
//! reached through the [`approval::ApprovalStore`] trait, implemented by
//! `quizbank-db`.

pub mod approval;
pub mod content;
pub mod error;
pub mod roles;
pub mod status;
pub mod types;
