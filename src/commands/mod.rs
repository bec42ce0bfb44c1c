//! UI event boundary: the thin functions a shell binds its form events,
//! buttons, and screens to. All workflow decisions live in the layers
//! below; nothing here inspects status codes or touches the draft directly.

use uuid::Uuid;

use crate::api::ApiResult;
use crate::models::{ConnectionRecord, SubmissionState};
use crate::state::AppState;

pub fn set_connection_name(state: &AppState, name: &str) {
    state.submission.set_name(name);
}

pub fn set_connection_dsn(state: &AppState, dsn: &str) {
    state.submission.set_dsn(dsn);
}

pub fn mark_sample(state: &AppState, is_sample: bool) {
    state.submission.set_sample(is_sample);
}

/// Run one creation attempt for the current draft.
pub async fn submit_connection(state: &AppState) -> SubmissionState {
    state.submission.submit().await
}

pub fn reset_submission(state: &AppState) {
    state.submission.reset();
}

/// Jump to the sample-dataset setup screen, unless a submission is in
/// flight.
pub fn open_sample_setup(state: &AppState) {
    if state.submission.state() == SubmissionState::Submitting {
        return;
    }
    state.navigator.to_sample_setup();
}

/// Refresh from the backend and return the new snapshot.
pub async fn load_connections(state: &AppState) -> ApiResult<Vec<ConnectionRecord>> {
    state.registry.refresh().await?;
    Ok(state.registry.snapshot())
}

pub async fn get_connection(state: &AppState, id: Uuid) -> ApiResult<ConnectionRecord> {
    state.repo.get_connection(id).await
}

pub async fn delete_connection(state: &AppState, id: Uuid) -> ApiResult<()> {
    state.repo.delete_connection(id).await?;
    state.registry.refresh().await
}
