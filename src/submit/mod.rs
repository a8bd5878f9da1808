//! Submission — turns a finished session into response-log rows and keeps
//! the aggregates table current.

pub mod adapter;
pub mod rows;

pub use adapter::{RespondentCounts, SubmissionAdapter};
pub use rows::{build_rows, log_headers};
