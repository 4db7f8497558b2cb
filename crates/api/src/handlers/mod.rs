pub mod approval;
pub mod auth;
pub mod category;
pub mod keyword;
pub mod quiz;
pub mod report;
pub mod score;
pub mod stats;
pub mod subject;
