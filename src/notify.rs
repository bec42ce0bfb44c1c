/// Severity of a transient user-facing message. A duplicate connection is
/// reported as `Info`: the connection the user asked for already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Transient message display, fire-and-forget. Implemented by the UI shell
/// (snackbar, toast); [`TracingSink`] serves headless runs.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Navigation targets the provisioning workflow can trigger. The shell owns
/// the routing table; the workflow only ever asks for these two moves.
pub trait Navigator: Send + Sync {
    fn after_success(&self);
    fn to_sample_setup(&self);
}

/// Routes notifications into the log stream.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Info => tracing::info!("{message}"),
            NotificationKind::Error => tracing::warn!("{message}"),
        }
    }
}
