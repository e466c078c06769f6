use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use praxis_core::Chapter;
use praxis_core::Dataset;
use praxis_core::LensKey;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::Wrap;
use strum::IntoEnumIterator;

const FOCUS_HINT: &str = "type to draft · Enter newline · Esc close · saves automatically";

/// What a key press did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusSignal {
    /// The draft text changed; a debounced save should be (re)scheduled.
    Edited,
    /// The overlay should close, flushing any pending save.
    Close,
}

/// The full-screen drafting overlay for a single chapter: annotations on
/// the left, a plain text drafting buffer on the right. The draft is read
/// once when the overlay opens and persisted on a debounced schedule while
/// the user types.
pub(crate) struct FocusView {
    chapter_id: String,
    draft: String,
}

impl FocusView {
    pub(crate) fn new(chapter_id: String, draft: String) -> Self {
        Self { chapter_id, draft }
    }

    pub(crate) fn chapter_id(&self) -> &str {
        &self.chapter_id
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<FocusSignal> {
        match key.code {
            KeyCode::Esc => Some(FocusSignal::Close),
            KeyCode::Enter => {
                self.draft.push('\n');
                Some(FocusSignal::Edited)
            }
            KeyCode::Backspace => self.draft.pop().map(|_| FocusSignal::Edited),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.draft.push(c);
                Some(FocusSignal::Edited)
            }
            _ => None,
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, dataset: &Dataset) {
        if area.height < 5 || area.width < 30 {
            return;
        }
        Clear.render(area, buf);

        let Some(chapter) = dataset.chapter(&self.chapter_id) else {
            // Focus state can only be set from existing chapters; a missing
            // record still degrades to a plain message rather than a crash.
            Paragraph::new(Line::from(
                format!("Chapter `{}` not found.", self.chapter_id).red(),
            ))
            .render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
            return;
        };

        let header = Rect::new(area.x, area.y, area.width, 1);
        let header_line = Line::from(vec![
            "Focus: ".dim(),
            chapter.title.clone().bold(),
            format!("   Part {} / Chapter {}", chapter.part, chapter.chapter).dim(),
        ]);
        Paragraph::new(header_line).render(header, buf);

        let body_y = area.y + 2;
        let body_height = area.height.saturating_sub(3);
        let left_width = (area.width / 3).max(20);
        let left = Rect::new(area.x, body_y, left_width, body_height);
        let right = Rect::new(
            area.x + left_width + 2,
            body_y,
            area.width.saturating_sub(left_width + 2),
            body_height,
        );

        Paragraph::new(annotation_text(chapter))
            .wrap(Wrap { trim: false })
            .render(left, buf);
        self.render_draft_pane(right, buf);

        let hint = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        Paragraph::new(Line::from(FOCUS_HINT))
            .style(Style::default().dim())
            .render(hint, buf);
    }

    fn render_draft_pane(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 2 {
            return;
        }
        Paragraph::new(Line::from("Drafting Area".bold()))
            .render(Rect::new(area.x, area.y, area.width, 1), buf);
        let body = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
        let mut text: Vec<Line<'static>> = Vec::new();
        if self.draft.is_empty() {
            text.push(Line::from("Begin drafting here…".dim().italic()));
        } else {
            for line in self.draft.lines() {
                text.push(Line::from(line.to_string()));
            }
            if self.draft.ends_with('\n') {
                text.push(Line::from(""));
            }
        }
        if let Some(last) = text.last_mut() {
            last.push_span("▌".dim());
        }
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: false })
            .render(body, buf);
    }
}

fn annotation_text(chapter: &Chapter) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from("Preview".bold().cyan()));
    lines.push(Line::from(chapter.preview_text.clone()));
    lines.push(Line::from(""));
    for key in LensKey::iter() {
        lines.push(Line::from(vec![
            Span::from(key.glyph()),
            Span::from(" "),
            key.display_name().bold(),
        ]));
        let content = chapter.lenses.get(key);
        let shown = if content.trim().is_empty() { "—" } else { content };
        lines.push(Line::from(shown.to_string().dim()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec!["🔮 ".into(), "Synthesis".bold()]));
    lines.push(Line::from(chapter.synthesis.clone().dim()));
    Text::from(lines)
}
