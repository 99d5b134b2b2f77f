//! The chat panel controller.
//!
//! Accepts submissions, appends user messages, and schedules one delayed
//! reply per accepted submission. Replies are independent: nothing links
//! a reply to its submission beyond the text embedded in it, and
//! overlapping replies land in timer expiry order.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::message::Message;
use crate::responder::{Responder, SimulatedResponder};
use crate::sink::{DisplaySink, InputSource};
use crate::timer::{schedule_once, TimerHandle};

/// A user action that submits the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pointer activation of the send control.
    SendControl,
    /// Key-down of Enter in the input field.
    EnterKey,
}

/// Handle to a scheduled reply.
///
/// Dropping it leaves the reply scheduled.
#[derive(Debug)]
pub struct ReplyHandle {
    id: u64,
    timer: TimerHandle,
}

impl ReplyHandle {
    /// Sequence number of the submission this reply belongs to.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cancel the reply if it has not been appended yet.
    pub fn cancel(&self) {
        if !self.timer.is_finished() {
            info!(reply = self.id, "cancelling pending reply");
        }
        self.timer.cancel();
    }

    /// Whether the reply has been appended or cancelled.
    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }
}

/// Decrements the pending counter when the reply task ends, fired or not.
struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn new(pending: &Arc<AtomicUsize>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(pending))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Binds an input source and triggers to a display sink.
pub struct ChatController<S: DisplaySink, R: Responder = SimulatedResponder> {
    sink: Arc<S>,
    responder: Arc<R>,
    delay: Duration,
    next_id: AtomicU64,
    pending: Arc<AtomicUsize>,
}

impl<S: DisplaySink> ChatController<S, SimulatedResponder> {
    /// Create a controller using the simulated responder described by `config`.
    pub fn from_config(sink: S, config: &Config) -> Self {
        Self::new(
            sink,
            SimulatedResponder::new(config.reply_template.clone()),
            config.reply_delay(),
        )
    }
}

impl<S: DisplaySink, R: Responder> ChatController<S, R> {
    pub fn new(sink: S, responder: R, delay: Duration) -> Self {
        Self {
            sink: Arc::new(sink),
            responder: Arc::new(responder),
            delay,
            next_id: AtomicU64::new(1),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of replies scheduled but not yet appended or cancelled.
    pub fn pending_replies(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Submit raw text.
    ///
    /// Whitespace-only text is ignored and returns `None`. Otherwise the
    /// trimmed text is appended as a user message and a reply is scheduled.
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, raw: &str) -> Option<ReplyHandle> {
        let text = raw.trim();
        if text.is_empty() {
            debug!("ignoring empty submission");
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        debug!(reply = id, len = text.len(), "accepted submission");

        self.sink.append(Message::user(text));
        self.sink.scroll_to_bottom();

        let sink = Arc::clone(&self.sink);
        let responder = Arc::clone(&self.responder);
        let text = text.to_owned();
        let guard = PendingGuard::new(&self.pending);

        let timer = schedule_once(self.delay, move || {
            let _guard = guard;
            let reply = responder.reply(&text);
            sink.append(Message::assistant(reply));
            sink.scroll_to_bottom();
            debug!(reply = id, "appended reply");
        });

        Some(ReplyHandle { id, timer })
    }

    /// Submit the input's current value, clearing it when accepted.
    pub fn submit_from<I: InputSource + ?Sized>(&self, input: &mut I) -> Option<ReplyHandle> {
        let handle = self.submit(&input.value())?;
        input.clear();
        Some(handle)
    }

    /// Handle a trigger. Every trigger submits independently.
    pub fn trigger<I: InputSource + ?Sized>(
        &self,
        trigger: Trigger,
        input: &mut I,
    ) -> Option<ReplyHandle> {
        debug!(?trigger, "submit triggered");
        self.submit_from(input)
    }
}
