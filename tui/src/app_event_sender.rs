use tokio::sync::mpsc::UnboundedSender;

use crate::app_event::AppEvent;

#[derive(Clone, Debug)]
pub(crate) struct AppEventSender {
    pub(crate) app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub(crate) fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Queue an event for the main loop. Failure means the loop is gone and
    /// the process is shutting down, so it is logged rather than propagated.
    pub(crate) fn send(&self, event: AppEvent) {
        if let Err(err) = self.app_event_tx.send(event) {
            tracing::error!("failed to queue app event: {err}");
        }
    }
}
