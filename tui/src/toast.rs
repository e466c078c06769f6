use std::collections::VecDeque;
use std::time::Duration;
use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

pub(crate) const TOAST_TTL: Duration = Duration::from_secs(2);
const MAX_TOASTS: usize = 2;

/// Short-lived acknowledgment lines shown at the bottom of the frame, e.g.
/// after a draft write lands. An entry that outlives its TTL stops
/// rendering; `ToastTick` events trigger the repaint that makes it vanish.
pub(crate) struct ToastQueue {
    entries: VecDeque<ToastEntry>,
}

struct ToastEntry {
    message: String,
    expires_at: Instant,
}

impl ToastQueue {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, message: String) {
        self.prune_expired();
        self.entries.push_back(ToastEntry {
            message,
            expires_at: Instant::now() + TOAST_TTL,
        });
        while self.entries.len() > MAX_TOASTS {
            self.entries.pop_front();
        }
    }

    pub(crate) fn prune_expired(&mut self) {
        let now = Instant::now();
        while matches!(self.entries.front(), Some(entry) if entry.expires_at <= now) {
            self.entries.pop_front();
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let now = Instant::now();
        let mut y = area.y;
        for entry in self.entries.iter().filter(|entry| entry.expires_at > now) {
            if y >= area.y + area.height {
                break;
            }
            let line =
                Line::from(entry.message.clone()).style(Style::default().fg(Color::Yellow));
            Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }
    }
}
