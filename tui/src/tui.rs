use std::io::Stdout;
use std::io::stdout;

use color_eyre::eyre::Result;
use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal lifecycle wrapper: raw mode and the alternate screen are
/// entered on construction and must be restored on every exit path,
/// including panics (see `install_panic_hook`).
pub(crate) struct Tui {
    pub(crate) terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub(crate) fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    /// Undo raw mode and the alternate screen. Safe to call more than once;
    /// errors are ignored because the terminal may already be gone.
    pub(crate) fn restore() {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }

    /// Chain a panic hook that restores the terminal before the default
    /// hook prints, so a panic message is not swallowed by the alternate
    /// screen.
    pub(crate) fn install_panic_hook() {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            Self::restore();
            default_hook(info);
        }));
    }

    pub(crate) fn event_stream(&self) -> EventStream {
        EventStream::new()
    }

    pub(crate) fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}
