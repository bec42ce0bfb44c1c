//! Client core for the DataChat conversational database assistant.
//!
//! The rendering shell binds its events to [`commands`]; everything below
//! that boundary is headless and testable without a UI: the provisioning
//! workflow in [`provision`], the backend contract in [`api`], and the
//! connection-list service in [`state`].

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod notify;
pub mod provision;
pub mod state;

pub use api::{ApiError, ApiResult, ConnectionRepository, FailureKind};
pub use config::ClientConfig;
pub use models::{ConnectionDraft, ConnectionRecord, SubmissionState};
pub use notify::{Navigator, NotificationKind, NotificationSink, TracingSink};
pub use provision::SubmissionController;
pub use state::{AppState, ConnectionRegistry};
