use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use praxis_core::Chapter;
use praxis_core::ChapterStatus;
use praxis_core::Dataset;
use praxis_core::LensFilter;
use praxis_core::LensKey;
use praxis_core::MotifCatalog;
use praxis_core::Part;
use praxis_core::StatusFilter;
use praxis_core::part_progress;
use praxis_core::thread_display_match;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Gauge;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use strum::IntoEnumIterator;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::controller::ViewController;
use crate::text_formatting::truncate_text;

const PART_HINT: &str =
    "←/→ part · ↑/↓ chapter · Enter focus · l lens · s status · x clear trace · Esc master";
const NOT_FOUND_HINT: &str = "Press Esc to return to the master matrix.";
const CARD_HEIGHT: u16 = 3;

/// The dashboard for one part: part tabs, progress, filter controls, and
/// the chapter cards the active filters admit.
pub(crate) struct PartView {
    selected: usize,
    app_event_tx: AppEventSender,
}

impl PartView {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self {
            selected: 0,
            app_event_tx,
        }
    }

    pub(crate) fn reset_selection(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn handle_key(
        &mut self,
        key: KeyEvent,
        dataset: &Dataset,
        controller: &ViewController,
        part_id: u32,
    ) {
        match key.code {
            KeyCode::Esc => self.app_event_tx.send(AppEvent::ReturnToMaster),
            KeyCode::Left => {
                if let Some(neighbor) = neighbor_part(dataset, part_id, -1) {
                    self.app_event_tx.send(AppEvent::SelectPart(neighbor));
                }
            }
            KeyCode::Right => {
                if let Some(neighbor) = neighbor_part(dataset, part_id, 1) {
                    self.app_event_tx.send(AppEvent::SelectPart(neighbor));
                }
            }
            KeyCode::Up => self.move_selection(-1, dataset, controller, part_id),
            KeyCode::Down => self.move_selection(1, dataset, controller, part_id),
            KeyCode::Enter => {
                if let Some(part) = dataset.part(part_id) {
                    let chapters = visible_chapters(part, controller.status_filter());
                    if let Some(chapter) = chapters.get(self.selected) {
                        self.app_event_tx
                            .send(AppEvent::OpenFocus(chapter.id.clone()));
                    }
                }
            }
            KeyCode::Char('l') => {
                self.app_event_tx.send(AppEvent::SelectLensFilter(
                    next_lens_filter(controller.lens_filter()),
                ));
            }
            KeyCode::Char('s') => {
                self.app_event_tx.send(AppEvent::SelectStatusFilter(
                    next_status_filter(controller.status_filter()),
                ));
            }
            KeyCode::Char('x') => {
                if controller.golden_thread().is_some() {
                    self.app_event_tx.send(AppEvent::SetGoldenThread(None));
                }
            }
            _ => {}
        }
    }

    fn move_selection(
        &mut self,
        delta: isize,
        dataset: &Dataset,
        controller: &ViewController,
        part_id: u32,
    ) {
        let Some(part) = dataset.part(part_id) else {
            return;
        };
        let count = visible_chapters(part, controller.status_filter()).len();
        if count == 0 {
            return;
        }
        let idx = self.selected as isize + delta;
        self.selected = idx.clamp(0, (count - 1) as isize) as usize;
    }

    pub(crate) fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        dataset: &Dataset,
        motifs: &MotifCatalog,
        controller: &ViewController,
        part_id: u32,
    ) {
        if area.height < 6 {
            return;
        }
        let Some(part) = dataset.part(part_id) else {
            self.render_not_found(area, buf, part_id);
            return;
        };

        self.render_tabs(Rect::new(area.x, area.y, area.width, 1), buf, dataset, part_id);

        let title = Rect::new(area.x, area.y + 1, area.width, 1);
        Paragraph::new(Line::from(part.title.clone().bold())).render(title, buf);

        let progress = part_progress(part) / 100.0;
        let gauge_area = Rect::new(area.x, area.y + 2, area.width.min(48), 1);
        Gauge::default()
            .ratio(progress)
            .label(format!("{:.0}% final", progress * 100.0))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .render(gauge_area, buf);

        let filters = Rect::new(area.x, area.y + 3, area.width, 1);
        let mut filter_line = Line::from(vec![
            "Status: ".dim(),
            Span::from(controller.status_filter().label()),
            " · Lens: ".dim(),
            Span::from(controller.lens_filter().label()),
        ]);
        if let Some(thread) = controller.golden_thread() {
            filter_line.push_span(" · Tracing: ".dim());
            filter_line.push_span(thread.display_name().yellow());
        }
        Paragraph::new(filter_line).render(filters, buf);

        let list = Rect::new(
            area.x,
            area.y + 5,
            area.width,
            area.height.saturating_sub(6),
        );
        self.render_chapters(list, buf, part, motifs, controller);

        let hint = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        Paragraph::new(Line::from(PART_HINT))
            .style(Style::default().dim())
            .render(hint, buf);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer, dataset: &Dataset, part_id: u32) {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (idx, part) in dataset.parts.iter().enumerate() {
            if idx > 0 {
                spans.push(" - ".into());
            }
            if part.id == part_id {
                spans.push(format!("[Part {}]", part.id).bold());
            } else {
                spans.push(format!("part {}", part.id).dim());
            }
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_chapters(
        &self,
        area: Rect,
        buf: &mut Buffer,
        part: &Part,
        motifs: &MotifCatalog,
        controller: &ViewController,
    ) {
        let chapters = visible_chapters(part, controller.status_filter());
        if chapters.is_empty() {
            Paragraph::new(Line::from("No chapters match the active filters.".italic()))
                .style(Style::default().dim())
                .render(Rect::new(area.x, area.y, area.width, 1), buf);
            return;
        }

        let max_cards = (area.height / CARD_HEIGHT) as usize;
        let mut start = 0usize;
        if chapters.len() > max_cards && max_cards > 0 {
            let half = max_cards / 2;
            if self.selected > half {
                start = (self.selected - half).min(chapters.len() - max_cards);
            }
        }

        for (visible_idx, chapter) in chapters.iter().enumerate().skip(start).take(max_cards) {
            let y = area.y + ((visible_idx - start) as u16) * CARD_HEIGHT;
            let dimmed = controller
                .golden_thread()
                .is_some_and(|thread| !thread_display_match(chapter, thread, motifs));
            self.render_card(
                Rect::new(area.x, y, area.width, CARD_HEIGHT),
                buf,
                chapter,
                controller.lens_filter(),
                visible_idx == self.selected,
                dimmed,
            );
        }
    }

    fn render_card(
        &self,
        area: Rect,
        buf: &mut Buffer,
        chapter: &Chapter,
        lens_filter: LensFilter,
        selected: bool,
        dimmed: bool,
    ) {
        let marker = if selected { "> ".bold() } else { "  ".into() };
        let mut header = Line::from(vec![marker]);
        header.push_span(Span::from(chapter.status.glyph()));
        header.push_span(Span::from(format!(" Ch.{} ", chapter.chapter)));
        if selected {
            header.push_span(chapter.title.clone().bold().cyan());
        } else {
            header.push_span(chapter.title.clone().bold());
        }
        header.push_span(format!("  {}", chapter.status.label()).dim());
        for flag in &chapter.revision_flags {
            header.push_span(Span::from(format!(" {}", flag.glyph)));
        }
        if dimmed {
            header = header.style(Style::default().dim());
        }
        Paragraph::new(header).render(Rect::new(area.x, area.y, area.width, 1), buf);

        if area.height < 2 {
            return;
        }
        let detail_width = area.width.saturating_sub(4) as usize;
        let detail = match lens_filter {
            LensFilter::All => Line::from(
                truncate_text(&chapter.synthesis, detail_width)
                    .italic()
                    .dim(),
            ),
            LensFilter::Key(key) => {
                let text = chapter.lenses.get(key);
                let shown = if text.trim().is_empty() { "—" } else { text };
                Line::from(vec![
                    Span::from(key.glyph()),
                    Span::from(" "),
                    truncate_text(shown, detail_width).dim(),
                ])
            }
        };
        let detail = if dimmed {
            detail.style(Style::default().dim())
        } else {
            detail
        };
        Paragraph::new(detail).render(
            Rect::new(area.x + 4, area.y + 1, area.width.saturating_sub(4), 1),
            buf,
        );
    }

    fn render_not_found(&self, area: Rect, buf: &mut Buffer, part_id: u32) {
        let message = Rect::new(area.x, area.y + 1, area.width, 1);
        Paragraph::new(Line::from(
            format!("Error: Part {part_id} not found.").red(),
        ))
        .render(message, buf);
        let hint = Rect::new(area.x, area.y + 3, area.width, 1);
        Paragraph::new(Line::from(NOT_FOUND_HINT))
            .style(Style::default().dim())
            .render(hint, buf);
    }
}

/// Chapters the status filter admits, in chapter order. The lens filter
/// never hides a chapter; it selects which annotation the card shows.
fn visible_chapters(part: &Part, status_filter: StatusFilter) -> Vec<&Chapter> {
    part.chapters
        .iter()
        .filter(|chapter| status_filter.admits(chapter.status))
        .collect()
}

fn neighbor_part(dataset: &Dataset, part_id: u32, delta: isize) -> Option<u32> {
    let idx = dataset.parts.iter().position(|part| part.id == part_id)?;
    let count = dataset.parts.len() as isize;
    let next = (idx as isize + delta).rem_euclid(count);
    dataset.parts.get(next as usize).map(|part| part.id)
}

fn next_lens_filter(current: LensFilter) -> LensFilter {
    let keys: Vec<LensKey> = LensKey::iter().collect();
    match current {
        LensFilter::All => keys.first().copied().map_or(LensFilter::All, LensFilter::Key),
        LensFilter::Key(key) => match keys.iter().position(|k| *k == key) {
            Some(idx) if idx + 1 < keys.len() => LensFilter::Key(keys[idx + 1]),
            _ => LensFilter::All,
        },
    }
}

fn next_status_filter(current: StatusFilter) -> StatusFilter {
    let statuses: Vec<ChapterStatus> = ChapterStatus::iter().collect();
    match current {
        StatusFilter::All => statuses
            .first()
            .copied()
            .map_or(StatusFilter::All, StatusFilter::Status),
        StatusFilter::Status(status) => match statuses.iter().position(|s| *s == status) {
            Some(idx) if idx + 1 < statuses.len() => StatusFilter::Status(statuses[idx + 1]),
            _ => StatusFilter::All,
        },
    }
}
