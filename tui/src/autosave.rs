use std::time::Duration;

use tokio::task::JoinHandle;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

/// Quiet period between the last edit and the draft write.
pub(crate) const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounced draft persistence: each edit cancels the armed timer and arms a
/// fresh one, so a typing burst produces exactly one `DraftSaveDue` after
/// the quiet period. The generation counter lets the main loop discard a
/// fire that raced with a newer edit.
pub(crate) struct DraftAutosave {
    app_event_tx: AppEventSender,
    delay: Duration,
    generation: u64,
    pending: Option<PendingSave>,
}

struct PendingSave {
    chapter_id: String,
    task: JoinHandle<()>,
}

impl DraftAutosave {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self::with_delay(app_event_tx, SAVE_DEBOUNCE)
    }

    pub(crate) fn with_delay(app_event_tx: AppEventSender, delay: Duration) -> Self {
        Self {
            app_event_tx,
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub(crate) fn schedule(&mut self, chapter_id: String) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let delay = self.delay;
        let tx = self.app_event_tx.clone();
        let event_chapter_id = chapter_id.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(AppEvent::DraftSaveDue {
                chapter_id: event_chapter_id,
                generation,
            });
        });
        self.pending = Some(PendingSave { chapter_id, task });
    }

    /// Abort the armed timer, if any, and return the chapter whose save was
    /// pending so the caller can flush it immediately.
    pub(crate) fn cancel(&mut self) -> Option<String> {
        let pending = self.pending.take()?;
        pending.task.abort();
        Some(pending.chapter_id)
    }

    /// Whether a fired timer is still the most recent one.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Mark the armed timer as consumed after its event was handled.
    pub(crate) fn acknowledge(&mut self) {
        self.pending = None;
    }
}
