pub mod events;
pub mod view;

use std::io;

use crossterm::{
    cursor,
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{backend::CrosstermBackend, Terminal};

use crate::{app, ui::UI};
use view::JokeView;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl UI for Tui {
    fn render_app(&mut self, state: &app::State) -> io::Result<()> {
        self.terminal.draw(|f| {
            let rect = f.size();
            f.render_widget(JokeView::new(state), rect);
        })?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            crate::error!("Unable to restore terminal: {}", e);
        }
    }
}

pub fn create_ui() -> io::Result<Tui> {
    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    Ok(Tui { terminal })
}

/// Undoes everything [create_ui] did to the terminal. Safe to call more than
/// once, which the panic hook relies on.
pub fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()
}
