use std::sync::Mutex;

/// Blocking notification shown to the user when a submission fails
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notifications to stderr.
///
/// Waiting for the user to acknowledge is left to the caller, outside the
/// async submit path.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}

/// Keeps every notification, for callers that show them later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), ["first", "second"]);
        assert_eq!(notifier.last().as_deref(), Some("second"));
    }

    #[test]
    fn console_notifier_returns_without_waiting_for_input() {
        // Runs on the async submit path, so it must not read stdin
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new());
        notifier.notify("bad input");
        notifier.notify("");
    }

    #[test]
    fn shared_notifier_records_through_arc() {
        let shared = Arc::new(RecordingNotifier::new());
        let handle: Arc<RecordingNotifier> = Arc::clone(&shared);
        handle.notify("bad input");
        assert_eq!(shared.messages(), ["bad input"]);
    }
}
