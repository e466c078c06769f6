use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use praxis_core::ChapterStatus;
use praxis_core::Dataset;
use praxis_core::LensFilter;
use praxis_core::LensKey;
use praxis_core::StatusFilter;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use strum::IntoEnumIterator;

use crate::text_formatting::truncate_text;

const PALETTE_HINT: &str = "↑/↓ select · Enter run · Esc close";
const MAX_VISIBLE_RESULTS: usize = 10;

/// Status filter options in palette order.
const STATUS_OPTIONS: [(StatusFilter, &str, &str); 4] = [
    (StatusFilter::All, "Filter: All Statuses", "📂"),
    (
        StatusFilter::Status(ChapterStatus::Review),
        "Filter: Needs Review",
        "🧪",
    ),
    (
        StatusFilter::Status(ChapterStatus::Draft),
        "Filter: Draft",
        "⬜",
    ),
    (
        StatusFilter::Status(ChapterStatus::Final),
        "Filter: Final",
        "✅",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Chapter,
    Part,
    LensFilter,
    StatusFilter,
}

impl CommandKind {
    fn icon(self) -> &'static str {
        match self {
            CommandKind::Chapter => "📄",
            CommandKind::Part => "🗂️",
            CommandKind::LensFilter | CommandKind::StatusFilter => "⚙️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PaletteAction {
    OpenChapter { chapter_id: String, part_id: u32 },
    GoToPart { part_id: u32 },
    SetLensFilter(LensFilter),
    SetStatusFilter(StatusFilter),
}

#[derive(Debug, Clone)]
struct PaletteCommand {
    kind: CommandKind,
    title: String,
    action: PaletteAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PaletteSignal {
    Close,
    Commit(PaletteAction),
}

/// Fuzzy-free command search over four static projections of the dataset:
/// chapters, parts, lens filter options, status filter options. Filtering
/// is case-insensitive substring containment on the display title; an
/// empty query narrows to chapters and parts only.
pub(crate) struct CommandPalette {
    commands: Vec<PaletteCommand>,
    query: String,
    selected: usize,
}

impl CommandPalette {
    pub(crate) fn new(dataset: &Dataset) -> Self {
        Self {
            commands: Self::build_commands(dataset),
            query: String::new(),
            selected: 0,
        }
    }

    fn build_commands(dataset: &Dataset) -> Vec<PaletteCommand> {
        let mut commands = Vec::new();
        for part in &dataset.parts {
            for chapter in &part.chapters {
                commands.push(PaletteCommand {
                    kind: CommandKind::Chapter,
                    title: format!("P{} Ch.{}: {}", part.id, chapter.chapter, chapter.title),
                    action: PaletteAction::OpenChapter {
                        chapter_id: chapter.id.clone(),
                        part_id: part.id,
                    },
                });
            }
        }
        for part in &dataset.parts {
            commands.push(PaletteCommand {
                kind: CommandKind::Part,
                title: format!("Go to Part {}: {}", part.id, part.title),
                action: PaletteAction::GoToPart { part_id: part.id },
            });
        }
        commands.push(PaletteCommand {
            kind: CommandKind::LensFilter,
            title: "📚 Filter: All Lenses".to_string(),
            action: PaletteAction::SetLensFilter(LensFilter::All),
        });
        for key in LensKey::iter() {
            commands.push(PaletteCommand {
                kind: CommandKind::LensFilter,
                title: format!("{} Filter: {}", key.glyph(), key.display_name()),
                action: PaletteAction::SetLensFilter(LensFilter::Key(key)),
            });
        }
        for (filter, label, glyph) in STATUS_OPTIONS {
            commands.push(PaletteCommand {
                kind: CommandKind::StatusFilter,
                title: format!("{glyph} {label}"),
                action: PaletteAction::SetStatusFilter(filter),
            });
        }
        commands
    }

    /// Clear the query and selection; called on every reopen.
    pub(crate) fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    fn result_indices(&self) -> Vec<usize> {
        if self.query.is_empty() {
            return self
                .commands
                .iter()
                .enumerate()
                .filter(|(_, command)| {
                    matches!(command.kind, CommandKind::Chapter | CommandKind::Part)
                })
                .map(|(idx, _)| idx)
                .collect();
        }
        let needle = self.query.to_lowercase();
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, command)| command.title.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<PaletteSignal> {
        match key.code {
            KeyCode::Esc => Some(PaletteSignal::Close),
            KeyCode::Down => {
                let count = self.result_indices().len();
                if count > 0 {
                    self.selected = (self.selected + 1) % count;
                }
                None
            }
            KeyCode::Up => {
                let count = self.result_indices().len();
                if count > 0 {
                    self.selected = (self.selected + count - 1) % count;
                }
                None
            }
            KeyCode::Enter => {
                let results = self.result_indices();
                let command_idx = results.get(self.selected)?;
                let command = self.commands.get(*command_idx)?;
                Some(PaletteSignal::Commit(command.action.clone()))
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.selected = 0;
                None
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.query.push(c);
                self.selected = 0;
                None
            }
            _ => None,
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        let width = area.width.min(64);
        let height = area.height.min((MAX_VISIBLE_RESULTS + 4) as u16);
        if height < 4 || width < 20 {
            return;
        }
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + area.height.saturating_sub(height) / 3;
        let palette = Rect::new(x, y, width, height);
        Clear.render(palette, buf);

        let input = Rect::new(palette.x, palette.y, palette.width, 1);
        let mut input_line = Line::from(vec!["Search: ".dim()]);
        if self.query.is_empty() {
            input_line.push_span("chapters, parts, or filters…".dim().italic());
        } else {
            input_line.push_span(Span::from(self.query.clone()));
        }
        input_line.push_span("▏".dim());
        Paragraph::new(input_line).render(input, buf);

        let list = Rect::new(
            palette.x,
            palette.y + 2,
            palette.width,
            palette.height.saturating_sub(3),
        );
        let results = self.result_indices();
        if results.is_empty() {
            Paragraph::new(Line::from("No results found.".dim().italic()))
                .render(Rect::new(list.x, list.y, list.width, 1), buf);
        } else {
            let max_rows = list.height as usize;
            let mut start = 0usize;
            if results.len() > max_rows && max_rows > 0 {
                let half = max_rows / 2;
                if self.selected > half {
                    start = (self.selected - half).min(results.len() - max_rows);
                }
            }
            for (visible_idx, command_idx) in
                results.iter().enumerate().skip(start).take(max_rows)
            {
                let Some(command) = self.commands.get(*command_idx) else {
                    continue;
                };
                let row_y = list.y + (visible_idx - start) as u16;
                let marker = if visible_idx == self.selected {
                    "> ".bold()
                } else {
                    "  ".into()
                };
                let title = truncate_text(&command.title, width.saturating_sub(7) as usize);
                let mut line = Line::from(vec![marker]);
                line.push_span(Span::from(command.kind.icon()));
                line.push_span(Span::from(" "));
                if visible_idx == self.selected {
                    line.push_span(title.bold().cyan());
                } else {
                    line.push_span(Span::from(title));
                }
                Paragraph::new(line).render(Rect::new(list.x, row_y, list.width, 1), buf);
            }
        }

        let hint = Rect::new(
            palette.x,
            palette.y + palette.height.saturating_sub(1),
            palette.width,
            1,
        );
        Paragraph::new(Line::from(PALETTE_HINT))
            .style(Style::default().dim())
            .render(hint, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette() -> (CommandPalette, Dataset) {
        let dataset = Dataset::builtin().expect("bundled dataset");
        (CommandPalette::new(&dataset), dataset)
    }

    fn press(palette: &mut CommandPalette, code: KeyCode) -> Option<PaletteSignal> {
        palette.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(palette: &mut CommandPalette, text: &str) {
        for c in text.chars() {
            press(palette, KeyCode::Char(c));
        }
    }

    #[test]
    fn empty_query_lists_chapters_then_parts() {
        let (palette, dataset) = palette();
        let results = palette.result_indices();
        assert_eq!(
            results.len(),
            dataset.chapter_count() + dataset.parts.len()
        );
        let chapters = dataset.chapter_count();
        for (pos, command_idx) in results.iter().enumerate() {
            let kind = palette.commands[*command_idx].kind;
            if pos < chapters {
                assert_eq!(kind, CommandKind::Chapter);
            } else {
                assert_eq!(kind, CommandKind::Part);
            }
        }
    }

    #[test]
    fn typing_reveals_filter_commands() {
        let (mut palette, _) = palette();
        type_str(&mut palette, "filter:");
        let results = palette.result_indices();
        assert!(!results.is_empty());
        assert!(results.iter().all(|idx| {
            matches!(
                palette.commands[*idx].kind,
                CommandKind::LensFilter | CommandKind::StatusFilter
            )
        }));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (mut palette, _) = palette();
        type_str(&mut palette, "INTAKE");
        let results = palette.result_indices();
        assert_eq!(results.len(), 1);
        assert!(palette.commands[results[0]].title.contains("Intake"));
    }

    #[test]
    fn unmatched_query_yields_no_results() {
        let (mut palette, _) = palette();
        type_str(&mut palette, "zzzz no such thing");
        assert!(palette.result_indices().is_empty());
        assert_eq!(press(&mut palette, KeyCode::Enter), None);
    }

    #[test]
    fn arrows_wrap_modulo_result_count() {
        let (mut palette, _) = palette();
        let n = palette.result_indices().len();
        assert!(n > 1);
        press(&mut palette, KeyCode::Up);
        assert_eq!(palette.selected, n - 1);
        press(&mut palette, KeyCode::Down);
        assert_eq!(palette.selected, 0);
        press(&mut palette, KeyCode::Down);
        assert_eq!(palette.selected, 1);
    }

    #[test]
    fn query_change_resets_selection() {
        let (mut palette, _) = palette();
        press(&mut palette, KeyCode::Down);
        press(&mut palette, KeyCode::Down);
        assert_eq!(palette.selected, 2);
        press(&mut palette, KeyCode::Char('p'));
        assert_eq!(palette.selected, 0);
        press(&mut palette, KeyCode::Down);
        press(&mut palette, KeyCode::Backspace);
        assert_eq!(palette.selected, 0);
    }

    #[test]
    fn reopen_resets_query_and_selection() {
        let (mut palette, _) = palette();
        type_str(&mut palette, "part");
        press(&mut palette, KeyCode::Down);
        palette.reset();
        assert_eq!(palette.query, "");
        assert_eq!(palette.selected, 0);
    }

    #[test]
    fn enter_commits_the_indexed_result() {
        let (mut palette, dataset) = palette();
        let first_chapter = dataset.chapters().next().unwrap();
        match press(&mut palette, KeyCode::Enter) {
            Some(PaletteSignal::Commit(PaletteAction::OpenChapter {
                chapter_id,
                part_id,
            })) => {
                assert_eq!(chapter_id, first_chapter.id);
                assert_eq!(part_id, first_chapter.part);
            }
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[test]
    fn part_commands_commit_navigation() {
        let (mut palette, dataset) = palette();
        type_str(&mut palette, "go to part 2");
        match press(&mut palette, KeyCode::Enter) {
            Some(PaletteSignal::Commit(PaletteAction::GoToPart { part_id })) => {
                assert_eq!(part_id, 2);
                assert!(dataset.part(part_id).is_some());
            }
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[test]
    fn status_commands_commit_the_filter() {
        let (mut palette, _) = palette();
        type_str(&mut palette, "needs review");
        match press(&mut palette, KeyCode::Enter) {
            Some(PaletteSignal::Commit(PaletteAction::SetStatusFilter(
                StatusFilter::Status(ChapterStatus::Review),
            ))) => {}
            other => panic!("unexpected signal: {other:?}"),
        }
    }

    #[test]
    fn escape_closes() {
        let (mut palette, _) = palette();
        assert_eq!(press(&mut palette, KeyCode::Esc), Some(PaletteSignal::Close));
    }
}
