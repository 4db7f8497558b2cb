//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Status columns are stored as lookup-table ids and serialized as their
//! names through the helpers below.

pub mod category;
pub mod keyword;
pub mod quiz;
pub mod report;
pub mod score;
pub mod stats;
pub mod subject;
pub mod user;
pub mod vote;

use serde::Serializer;
use quizbank_core::status::{ContentStatus, ReportStatus, StatusId};

pub(crate) fn serialize_content_status<S: Serializer>(
    id: &StatusId,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(ContentStatus::from_id(*id).map_or("unknown", ContentStatus::as_str))
}

pub(crate) fn serialize_report_status<S: Serializer>(
    id: &StatusId,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(ReportStatus::from_id(*id).map_or("unknown", ReportStatus::as_str))
}
