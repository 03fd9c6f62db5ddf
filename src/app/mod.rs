pub mod jobs;
pub mod looper;
pub mod state;

use std::io;

use crate::ui::UI;
pub use state::AppState as State;

pub struct App<T: UI> {
    pub state: State,
    pub ui: T,
}

impl<T: UI> App<T> {
    pub fn new(state: State, ui: T) -> Self {
        Self { state, ui }
    }

    pub fn render(&mut self) -> io::Result<()> {
        self.ui.render_app(&self.state)?;
        self.state.requested_redraw = false;
        Ok(())
    }
}
