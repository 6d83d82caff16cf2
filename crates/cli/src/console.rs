//! Terminal presentation of notices.

use shopkeeper_client::{NoticeKind, Notifier};

/// Prints notices to the terminal: successes to stdout, errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn notify(&self, kind: NoticeKind, title: &str, detail: Option<&str>) {
        match (kind, detail) {
            (NoticeKind::Success, Some(detail)) => println!("ok: {title} ({detail})"),
            (NoticeKind::Success, None) => println!("ok: {title}"),
            (NoticeKind::Error, Some(detail)) => eprintln!("error: {title}: {detail}"),
            (NoticeKind::Error, None) => eprintln!("error: {title}"),
        }
    }
}
