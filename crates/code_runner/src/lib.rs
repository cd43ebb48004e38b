//! code_runner - executes editor source on Judge0
//!
//! HTML never leaves the process; it becomes a local preview.

pub mod error;
pub mod judge0;
pub mod outcome;
pub mod runner;

pub use error::{ExecutionError, TRANSPORT_FAILURE_MESSAGE};
pub use judge0::{Judge0Client, SubmissionRequest, SubmissionResult, SubmissionStatus};
pub use outcome::{ExecutionOutcome, ExecutionReport};
pub use runner::ExecutionRunner;
