pub mod roster;
pub mod student;

pub use roster::RosterDocument;
pub use student::{GameFormat, NewStudent, RankingEntry, RatingsUpdate, Student, StudentSummary};
