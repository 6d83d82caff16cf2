//! User-facing notice contract.
//!
//! The presentation mechanism is an external collaborator: the core only
//! calls through this trait, fire-and-forget, and never reads a result
//! back.

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Displays a titled message to the user.
pub trait Notifier {
    /// Present a notice of `kind` with a title and optional detail text.
    ///
    /// The detail may be non-human-readable; it is passed through verbatim.
    fn notify(&self, kind: NoticeKind, title: &str, detail: Option<&str>);

    /// Present a success notice.
    fn success(&self, title: &str) {
        self.notify(NoticeKind::Success, title, None);
    }

    /// Present an error notice with failure detail.
    fn error(&self, title: &str, detail: &str) {
        self.notify(NoticeKind::Error, title, Some(detail));
    }
}

/// Routes notices to the diagnostic log.
///
/// The library default when no interactive surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, detail: Option<&str>) {
        match kind {
            NoticeKind::Success => tracing::info!(title, detail, "notice"),
            NoticeKind::Error => tracing::error!(title, detail, "notice"),
        }
    }
}
