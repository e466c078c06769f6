use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::text_formatting::truncate_text;

const BAR_WIDTH: usize = 16;
const LABEL_WIDTH: usize = 28;

/// A proportional frequency bar scaled to the maximum count in the group.
/// The denominator is floored at one so an all-zero group renders empty
/// bars instead of dividing by zero.
pub(crate) fn count_bar(count: usize, max: usize, color: Color) -> Span<'static> {
    let max = max.max(1);
    let filled = (count * BAR_WIDTH / max).min(BAR_WIDTH);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    Span::styled(bar, Style::default().fg(color))
}

/// One heatmap row: selection marker, glyph, padded label, bar, count.
pub(crate) fn frequency_row(
    selected: bool,
    glyph: &str,
    label: &str,
    count: usize,
    max: usize,
    color: Color,
) -> Line<'static> {
    let marker = if selected { "> ".bold() } else { "  ".into() };
    let text = format!("{:<LABEL_WIDTH$}", truncate_text(label, LABEL_WIDTH));
    let mut line = Line::from(vec![marker]);
    if !glyph.is_empty() {
        line.push_span(Span::from(glyph.to_string()));
        line.push_span(Span::from(" "));
    }
    if selected {
        line.push_span(text.bold().cyan());
    } else {
        line.push_span(Span::from(text));
    }
    line.push_span(count_bar(count, max, color));
    line.push_span(format!(" {count:>3}").dim());
    line
}
