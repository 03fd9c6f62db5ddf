pub mod backtrace;

use std::{io, time::Duration};

use crate::input::Key;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    Key(Key),
    Redraw,
}

pub trait UI {
    fn render_app(&mut self, state: &crate::app::State) -> io::Result<()>;
}

pub trait UiEvents {
    /// Wait up to `timeout` for the next event
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>>;
}
