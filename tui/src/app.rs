use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use praxis_core::Dataset;
use praxis_core::MotifCatalog;
use ratatui::layout::Rect;
use tokio::select;
use tokio::sync::mpsc::unbounded_channel;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::autosave::DraftAutosave;
use crate::command_palette::CommandPalette;
use crate::command_palette::PaletteAction;
use crate::command_palette::PaletteSignal;
use crate::controller::ViewController;
use crate::controller::ViewState;
use crate::draft_store::DraftStore;
use crate::focus_view::FocusSignal;
use crate::focus_view::FocusView;
use crate::master_view::MasterView;
use crate::part_view::PartView;
use crate::toast::TOAST_TTL;
use crate::toast::ToastQueue;
use crate::tui;

pub(crate) struct App {
    dataset: Arc<Dataset>,
    motifs: MotifCatalog,
    app_event_tx: AppEventSender,
    controller: ViewController,
    palette: CommandPalette,
    master: MasterView,
    part: PartView,
    focus: Option<FocusView>,
    drafts: DraftStore,
    autosave: DraftAutosave,
    toasts: ToastQueue,
}

impl App {
    pub(crate) async fn run(
        tui: &mut tui::Tui,
        dataset: Arc<Dataset>,
        motifs: MotifCatalog,
        state_dir: &Path,
    ) -> Result<()> {
        use tokio_stream::StreamExt;
        let (tx, mut app_event_rx) = unbounded_channel();
        let app_event_tx = AppEventSender::new(tx);

        let mut app = Self {
            controller: ViewController::new(dataset.clone()),
            palette: CommandPalette::new(&dataset),
            master: MasterView::new(app_event_tx.clone()),
            part: PartView::new(app_event_tx.clone()),
            focus: None,
            drafts: DraftStore::new(state_dir),
            autosave: DraftAutosave::new(app_event_tx.clone()),
            toasts: ToastQueue::new(),
            dataset,
            motifs,
            app_event_tx,
        };

        let terminal_events = tui.event_stream();
        tokio::pin!(terminal_events);

        app.draw(tui)?;
        loop {
            let running = select! {
                Some(event) = app_event_rx.recv() => app.handle_app_event(event),
                Some(Ok(event)) = terminal_events.next() => app.handle_terminal_event(event),
            };
            if !running {
                break;
            }
            app.draw(tui)?;
        }
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key)
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
            {
                self.handle_key_event(key)
            }
            // Resizes and the rest fall through to the redraw after the
            // select loop.
            _ => true,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => return false,
            // The palette shortcut is global for the lifetime of the app.
            KeyEvent {
                code: KeyCode::Char('k'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.app_event_tx.send(AppEvent::TogglePalette);
                return true;
            }
            _ => {}
        }

        if self.controller.palette_open() {
            match self.palette.handle_key(key) {
                Some(PaletteSignal::Close) => self.controller.toggle_palette(),
                Some(PaletteSignal::Commit(action)) => {
                    self.dispatch_palette_action(action);
                    self.controller.toggle_palette();
                }
                None => {}
            }
            return true;
        }

        if let Some(focus) = &mut self.focus {
            match focus.handle_key(key) {
                Some(FocusSignal::Edited) => {
                    let chapter_id = focus.chapter_id().to_string();
                    self.autosave.schedule(chapter_id);
                }
                Some(FocusSignal::Close) => self.app_event_tx.send(AppEvent::CloseFocus),
                None => {}
            }
            return true;
        }

        match self.controller.view() {
            ViewState::Master => self.master.handle_key(key, &self.dataset, &self.motifs),
            ViewState::Part { part_id } => {
                self.part
                    .handle_key(key, &self.dataset, &self.controller, part_id);
            }
        }
        true
    }

    fn handle_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::ExitRequest => return false,
            AppEvent::SelectPart(part_id) => {
                self.controller.select_part(part_id);
                self.part.reset_selection();
            }
            AppEvent::ReturnToMaster => self.controller.return_to_master(),
            AppEvent::SelectLensFilter(filter) => self.controller.select_lens_filter(filter),
            AppEvent::SelectStatusFilter(filter) => {
                self.controller.select_status_filter(filter);
                self.part.reset_selection();
            }
            AppEvent::SetGoldenThread(thread) => {
                let was_master = self.controller.view() == ViewState::Master;
                self.controller.set_golden_thread(thread);
                if was_master && self.controller.view() != ViewState::Master {
                    self.part.reset_selection();
                }
            }
            AppEvent::OpenFocus(chapter_id) => self.open_focus(chapter_id),
            AppEvent::CloseFocus => self.close_focus(),
            AppEvent::TogglePalette => {
                self.controller.toggle_palette();
                if self.controller.palette_open() {
                    self.palette.reset();
                }
            }
            AppEvent::DraftSaveDue {
                chapter_id,
                generation,
            } => self.on_draft_save_due(&chapter_id, generation),
            AppEvent::ToastTick => self.toasts.prune_expired(),
        }
        true
    }

    fn dispatch_palette_action(&mut self, action: PaletteAction) {
        match action {
            PaletteAction::OpenChapter {
                chapter_id,
                part_id,
            } => {
                self.app_event_tx.send(AppEvent::SelectPart(part_id));
                self.app_event_tx.send(AppEvent::OpenFocus(chapter_id));
            }
            PaletteAction::GoToPart { part_id } => {
                self.app_event_tx.send(AppEvent::SelectPart(part_id));
            }
            PaletteAction::SetLensFilter(filter) => {
                self.app_event_tx.send(AppEvent::SelectLensFilter(filter));
            }
            PaletteAction::SetStatusFilter(filter) => {
                self.app_event_tx.send(AppEvent::SelectStatusFilter(filter));
            }
        }
    }

    fn open_focus(&mut self, chapter_id: String) {
        // Switching focus targets flushes the previous chapter's pending
        // write before its buffer is dropped.
        self.flush_pending_draft();
        self.controller.open_focus(chapter_id.clone());
        let draft = match self.drafts.load(&chapter_id) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("failed to load draft for `{chapter_id}`: {err}");
                String::new()
            }
        };
        self.focus = Some(FocusView::new(chapter_id, draft));
    }

    fn close_focus(&mut self) {
        self.flush_pending_draft();
        self.controller.close_focus();
        self.focus = None;
    }

    /// Write a pending draft immediately instead of waiting out the
    /// debounce, honoring the at-most-one-fire contract by cancelling the
    /// armed timer first.
    fn flush_pending_draft(&mut self) {
        if let Some(chapter_id) = self.autosave.cancel()
            && let Some(focus) = &self.focus
            && focus.chapter_id() == chapter_id
        {
            let text = focus.draft().to_string();
            self.persist_draft(&chapter_id, &text);
        }
    }

    fn on_draft_save_due(&mut self, chapter_id: &str, generation: u64) {
        if !self.autosave.is_current(generation) {
            return;
        }
        self.autosave.acknowledge();
        if let Some(focus) = &self.focus
            && focus.chapter_id() == chapter_id
        {
            let text = focus.draft().to_string();
            self.persist_draft(chapter_id, &text);
        }
    }

    /// A failed write is logged and otherwise surfaced only by the
    /// acknowledgment toast never appearing.
    fn persist_draft(&mut self, chapter_id: &str, text: &str) {
        match self.drafts.save(chapter_id, text) {
            Ok(()) => {
                self.toasts.push("Draft saved".to_string());
                let tx = self.app_event_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(TOAST_TTL).await;
                    tx.send(AppEvent::ToastTick);
                });
            }
            Err(err) => {
                tracing::error!("failed to persist draft for `{chapter_id}`: {err}");
            }
        }
    }

    #[cfg(test)]
    fn drain_app_events(
        &mut self,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    ) -> Vec<String> {
        let mut handled = Vec::new();
        while let Ok(event) = rx.try_recv() {
            handled.push(format!("{event:?}"));
            self.handle_app_event(event);
        }
        handled
    }

    fn draw(&self, tui: &mut tui::Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            match self.controller.view() {
                ViewState::Master => self.master.render(area, buf, &self.dataset, &self.motifs),
                ViewState::Part { part_id } => self.part.render(
                    area,
                    buf,
                    &self.dataset,
                    &self.motifs,
                    &self.controller,
                    part_id,
                ),
            }
            if let Some(focus) = &self.focus {
                focus.render(area, buf, &self.dataset);
            }
            if self.controller.palette_open() {
                self.palette.render(area, buf);
            }
            let toast_area = Rect::new(
                area.x,
                area.bottom().saturating_sub(2),
                area.width,
                area.height.min(1),
            );
            self.toasts.render(toast_area, buf);
        })
    }
}
