//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod keyword_repo;
pub mod quiz_repo;
pub mod report_repo;
pub mod score_repo;
pub mod stats_repo;
pub mod subject_repo;
pub mod user_repo;
pub mod vote_repo;

pub use category_repo::CategoryRepo;
pub use keyword_repo::KeywordRepo;
pub use quiz_repo::QuizRepo;
pub use report_repo::ReportRepo;
pub use score_repo::ScoreRepo;
pub use stats_repo::StatsRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
