use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use praxis_core::ChapterStatus;
use praxis_core::Dataset;
use praxis_core::GoldenThread;
use praxis_core::LensCount;
use praxis_core::MotifCatalog;
use praxis_core::MotifCount;
use praxis_core::global_lens_density;
use praxis_core::motif_counts;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::heatmap::frequency_row;

const MASTER_HINT: &str =
    "Tab pane · ↑/↓ select · Enter open/trace · Ctrl+K palette · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MasterPane {
    Parts,
    LensDensity,
    Motifs,
}

impl MasterPane {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            MasterPane::Parts => 0,
            MasterPane::LensDensity => 1,
            MasterPane::Motifs => 2,
        }
    }

    fn next(self) -> Self {
        match self {
            MasterPane::Parts => MasterPane::LensDensity,
            MasterPane::LensDensity => MasterPane::Motifs,
            MasterPane::Motifs => MasterPane::Parts,
        }
    }

    fn prev(self) -> Self {
        match self {
            MasterPane::Parts => MasterPane::Motifs,
            MasterPane::LensDensity => MasterPane::Parts,
            MasterPane::Motifs => MasterPane::LensDensity,
        }
    }
}

/// The master matrix: every part at a glance, plus the two global trackers
/// (lens density and motif frequency) that seed golden threads.
pub(crate) struct MasterView {
    pane: MasterPane,
    selections: [usize; MasterPane::COUNT],
    app_event_tx: AppEventSender,
}

impl MasterView {
    pub(crate) fn new(app_event_tx: AppEventSender) -> Self {
        Self {
            pane: MasterPane::Parts,
            selections: [0; MasterPane::COUNT],
            app_event_tx,
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        key: KeyEvent,
        dataset: &Dataset,
        motifs: &MotifCatalog,
    ) {
        match key.code {
            KeyCode::Tab => self.pane = self.pane.next(),
            KeyCode::BackTab => self.pane = self.pane.prev(),
            KeyCode::Up => self.move_selection(-1, dataset, motifs),
            KeyCode::Down => self.move_selection(1, dataset, motifs),
            KeyCode::Enter => self.activate(dataset, motifs),
            KeyCode::Char('q') => self.app_event_tx.send(AppEvent::ExitRequest),
            _ => {}
        }
    }

    fn row_count(&self, dataset: &Dataset, motifs: &MotifCatalog) -> usize {
        match self.pane {
            MasterPane::Parts => dataset.parts.len(),
            MasterPane::LensDensity => global_lens_density(dataset).len(),
            MasterPane::Motifs => motif_counts(dataset, motifs).len(),
        }
    }

    fn move_selection(&mut self, delta: isize, dataset: &Dataset, motifs: &MotifCatalog) {
        let count = self.row_count(dataset, motifs);
        if count == 0 {
            return;
        }
        let idx = self.selections[self.pane.index()] as isize + delta;
        self.selections[self.pane.index()] = idx.clamp(0, (count - 1) as isize) as usize;
    }

    fn activate(&mut self, dataset: &Dataset, motifs: &MotifCatalog) {
        let selected = self.selections[self.pane.index()];
        match self.pane {
            MasterPane::Parts => {
                if let Some(part) = dataset.parts.get(selected) {
                    self.app_event_tx.send(AppEvent::SelectPart(part.id));
                }
            }
            MasterPane::LensDensity => {
                if let Some(count) = global_lens_density(dataset).get(selected) {
                    self.app_event_tx
                        .send(AppEvent::SetGoldenThread(Some(GoldenThread::Lens {
                            key: count.key,
                        })));
                }
            }
            MasterPane::Motifs => {
                if let Some(count) = motif_counts(dataset, motifs).get(selected) {
                    self.app_event_tx
                        .send(AppEvent::SetGoldenThread(Some(GoldenThread::Motif {
                            name: count.name.to_string(),
                        })));
                }
            }
        }
    }

    pub(crate) fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        dataset: &Dataset,
        motifs: &MotifCatalog,
    ) {
        if area.height < 4 {
            return;
        }
        let header = Rect::new(area.x, area.y, area.width, 1);
        let mut header_line = Line::from("Master Matrix".bold());
        header_line.push_span(
            format!(
                "   {} parts · {} chapters",
                dataset.parts.len(),
                dataset.chapter_count()
            )
            .dim(),
        );
        Paragraph::new(header_line).render(header, buf);

        let mut y = area.y + 2;
        y = self.render_parts(area, buf, y, dataset);
        y = self.render_lens_density(area, buf, y, dataset);
        self.render_motifs(area, buf, y, dataset, motifs);

        let hint = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        Paragraph::new(Line::from(MASTER_HINT))
            .style(Style::default().dim())
            .render(hint, buf);
    }

    fn section_header(&self, pane: MasterPane, title: &str) -> Line<'static> {
        if self.pane == pane {
            Line::from(format!("[{title}]").bold())
        } else {
            Line::from(title.to_string().dim())
        }
    }

    fn render_parts(&self, area: Rect, buf: &mut Buffer, start_y: u16, dataset: &Dataset) -> u16 {
        let mut y = start_y;
        if y >= area.bottom() {
            return y;
        }
        Paragraph::new(self.section_header(MasterPane::Parts, "Parts"))
            .render(Rect::new(area.x, y, area.width, 1), buf);
        y += 1;
        for (idx, part) in dataset.parts.iter().enumerate() {
            if y >= area.bottom().saturating_sub(1) {
                return y;
            }
            let selected = self.pane == MasterPane::Parts
                && idx == self.selections[MasterPane::Parts.index()];
            let marker = if selected { "> ".bold() } else { "  ".into() };
            let finals = part
                .chapters
                .iter()
                .filter(|chapter| chapter.status == ChapterStatus::Final)
                .count();
            let mut line = Line::from(vec![marker]);
            if selected {
                line.push_span(part.title.clone().bold().cyan());
            } else {
                line.push_span(Span::from(part.title.clone()));
            }
            line.push_span(
                format!("   {} chapters · {} final", part.chapters.len(), finals).dim(),
            );
            Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }
        y + 1
    }

    fn render_lens_density(
        &self,
        area: Rect,
        buf: &mut Buffer,
        start_y: u16,
        dataset: &Dataset,
    ) -> u16 {
        let mut y = start_y;
        if y >= area.bottom() {
            return y;
        }
        Paragraph::new(self.section_header(MasterPane::LensDensity, "Global Lens Density"))
            .render(Rect::new(area.x, y, area.width, 1), buf);
        y += 1;
        let counts = global_lens_density(dataset);
        let max = counts.iter().map(|count| count.count).max().unwrap_or(0);
        for (idx, LensCount { key, count }) in counts.into_iter().enumerate() {
            if y >= area.bottom().saturating_sub(1) {
                return y;
            }
            let selected = self.pane == MasterPane::LensDensity
                && idx == self.selections[MasterPane::LensDensity.index()];
            let row = frequency_row(
                selected,
                key.glyph(),
                key.display_name(),
                count,
                max,
                Color::Magenta,
            );
            Paragraph::new(row).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }
        y + 1
    }

    fn render_motifs(
        &self,
        area: Rect,
        buf: &mut Buffer,
        start_y: u16,
        dataset: &Dataset,
        motifs: &MotifCatalog,
    ) {
        let mut y = start_y;
        if y >= area.bottom() {
            return;
        }
        Paragraph::new(self.section_header(MasterPane::Motifs, "Global Motif Tracker"))
            .render(Rect::new(area.x, y, area.width, 1), buf);
        y += 1;
        let counts = motif_counts(dataset, motifs);
        let max = counts.iter().map(|count| count.count).max().unwrap_or(0);
        for (idx, MotifCount { name, count }) in counts.into_iter().enumerate() {
            if y >= area.bottom().saturating_sub(1) {
                return;
            }
            let selected = self.pane == MasterPane::Motifs
                && idx == self.selections[MasterPane::Motifs.index()];
            let row = frequency_row(selected, "", name, count, max, Color::Red);
            Paragraph::new(row).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc::unbounded_channel;

    fn fixture() -> (
        MasterView,
        Dataset,
        MotifCatalog,
        tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    ) {
        let (tx, rx) = unbounded_channel();
        let view = MasterView::new(AppEventSender::new(tx));
        let dataset = Dataset::builtin().expect("bundled dataset");
        let motifs = MotifCatalog::standard().expect("motif catalog");
        (view, dataset, motifs, rx)
    }

    fn press(view: &mut MasterView, dataset: &Dataset, motifs: &MotifCatalog, code: KeyCode) {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE), dataset, motifs);
    }

    #[test]
    fn enter_on_a_part_row_navigates() {
        let (mut view, dataset, motifs, mut rx) = fixture();
        press(&mut view, &dataset, &motifs, KeyCode::Down);
        press(&mut view, &dataset, &motifs, KeyCode::Enter);
        match rx.try_recv() {
            Ok(AppEvent::SelectPart(part_id)) => {
                assert_eq!(part_id, dataset.parts[1].id);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn enter_on_a_lens_row_traces_a_thread() {
        let (mut view, dataset, motifs, mut rx) = fixture();
        press(&mut view, &dataset, &motifs, KeyCode::Tab);
        press(&mut view, &dataset, &motifs, KeyCode::Enter);
        let expected = global_lens_density(&dataset)[0].key;
        match rx.try_recv() {
            Ok(AppEvent::SetGoldenThread(Some(GoldenThread::Lens { key }))) => {
                assert_eq!(key, expected);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn enter_on_a_motif_row_traces_a_thread() {
        let (mut view, dataset, motifs, mut rx) = fixture();
        press(&mut view, &dataset, &motifs, KeyCode::Tab);
        press(&mut view, &dataset, &motifs, KeyCode::Tab);
        press(&mut view, &dataset, &motifs, KeyCode::Down);
        press(&mut view, &dataset, &motifs, KeyCode::Enter);
        let expected = motif_counts(&dataset, &motifs)[1].name;
        match rx.try_recv() {
            Ok(AppEvent::SetGoldenThread(Some(GoldenThread::Motif { name }))) => {
                assert_eq!(name, expected);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn selection_clamps_at_the_edges() {
        let (mut view, dataset, motifs, _rx) = fixture();
        press(&mut view, &dataset, &motifs, KeyCode::Up);
        assert_eq!(view.selections[0], 0);
        for _ in 0..20 {
            press(&mut view, &dataset, &motifs, KeyCode::Down);
        }
        assert_eq!(view.selections[0], dataset.parts.len() - 1);
    }

    #[test]
    fn quit_key_requests_exit() {
        let (mut view, dataset, motifs, mut rx) = fixture();
        press(&mut view, &dataset, &motifs, KeyCode::Char('q'));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));
    }
}
