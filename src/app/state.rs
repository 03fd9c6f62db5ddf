use std::sync::Arc;

use crate::{
    input::UserAction,
    jokes::{AcquireError, AcquireOutcome, AcquireRequest, JokeId, JokeSource, JokeStore},
};

use super::jobs::Jobs;

pub struct AppState {
    pub running: bool,
    pub requested_redraw: bool,

    pub store: JokeStore,
    pub source: Arc<dyn JokeSource>,

    /// How many jokes the in-flight acquisition has accepted so far
    pub progress: usize,

    selected: Option<JokeId>,
    echo: Option<String>,

    pub jobs: Jobs,
}

impl AppState {
    pub fn new(store: JokeStore, source: Arc<dyn JokeSource>) -> Self {
        Self {
            running: true,
            requested_redraw: false,
            store,
            source,
            progress: 0,
            selected: None,
            echo: None,
            jobs: Jobs::default(),
        }
    }

    /// Restore the last session's jokes, or start fetching some. Must be
    /// called from within a tokio runtime context.
    pub fn initialize(&mut self) {
        if let Some(request) = self.store.initialize() {
            self.spawn_acquire(request);
        }
    }

    pub fn handle_action(&mut self, action: UserAction) {
        if self.store.is_loading() && !action.allowed_while_loading() {
            return;
        }

        match action {
            UserAction::SelectNext => self.move_selection(1),
            UserAction::SelectPrevious => self.move_selection(-1),

            UserAction::VoteUp => self.with_selected(|store, id| store.vote(id, 1)),
            UserAction::VoteDown => self.with_selected(|store, id| store.vote(id, -1)),
            UserAction::ToggleLock => self.with_selected(|store, id| store.toggle_lock(id)),

            UserAction::Regenerate => {
                let request = self.store.regenerate();
                self.spawn_acquire(request);
            }
            UserAction::ResetVotes => {
                self.store.reset_votes();
                self.echo("Votes reset.".to_string());
            }

            UserAction::Quit => {
                self.running = false;
                self.jobs.cancel_all();
            }
        };

        self.request_redraw();
    }

    // ======= acquisition ====================================

    fn spawn_acquire(&mut self, request: AcquireRequest) {
        self.progress = 0;
        let source = self.source.clone();

        self.jobs.spawn(move |ctx| async move {
            let progress_ctx = ctx.clone();
            let outcome = request
                .run(source.as_ref(), move |accepted, _target| {
                    // NOTE: if this fails the app is shutting down anyway
                    let _ = progress_ctx.run(move |state| {
                        state.progress = accepted;
                        state.request_redraw();
                        Ok(())
                    });
                })
                .await;

            ctx.run(move |state| {
                state.on_acquired(outcome);
                Ok(())
            })
        });
    }

    pub fn on_acquired(&mut self, outcome: AcquireOutcome) {
        let accepted = outcome.accepted.len();
        match self.store.finish_acquire(outcome) {
            None => crate::info!("Fetched {} new jokes", accepted),
            Some(e @ AcquireError::Exhausted { .. }) => self.echo_warning(e.to_string()),
            Some(e) => self.echo_error(e.to_string()),
        }

        self.progress = 0;
        self.request_redraw();
    }

    // ======= selection ======================================

    /// The id of the currently-selected joke. If nothing has been explicitly
    /// selected (or the selection no longer exists) this is the joke shown
    /// first.
    pub fn selected_id(&self) -> Option<&str> {
        if let Some(id) = &self.selected {
            if self.store.by_id(id).is_some() {
                return Some(id.as_str());
            }
        }

        self.store
            .display_order()
            .first()
            .map(|joke| joke.id.as_str())
    }

    fn move_selection(&mut self, delta: isize) {
        let order = self.store.display_order();
        if order.is_empty() {
            return;
        }

        let current = self
            .selected_id()
            .and_then(|id| order.iter().position(|joke| joke.id == id))
            .unwrap_or(0);
        let last = (order.len() - 1) as isize;
        let next = (current as isize + delta).max(0).min(last) as usize;

        self.selected = Some(order[next].id.clone());
    }

    fn with_selected<F: FnOnce(&mut JokeStore, &str)>(&mut self, f: F) {
        if let Some(id) = self.selected_id().map(|id| id.to_string()) {
            // Keep following this joke wherever the re-sort puts it
            f(&mut self.store, &id);
            self.selected = Some(id);
        }
    }

    // ======= redraw =========================================

    pub fn request_redraw(&mut self) {
        self.requested_redraw = true;
    }

    // ======= echo ===========================================

    pub fn echo_line(&self) -> Option<&str> {
        self.echo.as_ref().map(|s| s.as_str())
    }

    pub fn clear_echo(&mut self) {
        self.echo = None;
    }

    pub fn echo(&mut self, text: String) {
        crate::info!("{}", text);
        self.echo = Some(text);
        self.request_redraw();
    }

    pub fn echo_warning(&mut self, text: String) {
        crate::warn!("{}", text);
        self.echo = Some(format!("WARN: {}", text));
        self.request_redraw();
    }

    pub fn echo_error(&mut self, text: String) {
        crate::error!("{}", text);
        self.echo = Some(format!("ERR: {}", text));
        self.request_redraw();
    }
}
