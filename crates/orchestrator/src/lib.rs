//! Job orchestration for the generation service.
//!
//! Submission uploads the panel's images, resolves the pipeline and
//! posts the job; monitoring then polls status on an adaptive schedule
//! until a terminal outcome, broadcasting progress along the way. The
//! [`Orchestrator`] ties both halves together and enforces that at most
//! one job is monitored at a time.

pub mod events;
pub mod interval;
pub mod monitor;
pub mod orchestrator;
pub mod session;
pub mod submit;

pub use events::JobEvent;
pub use monitor::{Monitor, Outcome, Tick};
pub use orchestrator::Orchestrator;
pub use submit::{SubmitError, SubmitRequest};
