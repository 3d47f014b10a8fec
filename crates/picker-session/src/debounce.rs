use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period after the last keystroke before a search term settles.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Turns a stream of keystrokes into settled search terms.
///
/// Each [`SearchDebouncer::push`] restarts the timer; only a term that stays
/// unchanged for the full delay is delivered on the receiver returned by
/// [`SearchDebouncer::new`]. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, term: impl Into<String>) {
        self.cancel();
        let term = term.into();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session was dropped.
            let _ = tx.send(term);
        }));
    }

    /// Drops any term still waiting to settle.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delivers_term_after_delay() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("shirt");

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok().as_deref(), Some("shirt"));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_settle_once() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(SEARCH_DEBOUNCE);
        for term in ["s", "sh", "shi", "shir", "shirt"] {
            debouncer.push(term);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(SEARCH_DEBOUNCE).await;

        assert_eq!(rx.try_recv().ok().as_deref(), Some("shirt"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_term() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("hat");
        debouncer.cancel();
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
