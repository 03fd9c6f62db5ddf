use std::{io, time::Duration};

use crate::{
    app::{jobs::Jobs, App},
    input::keymap,
    ui::{UiEvent, UiEvents, UI},
};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Runs the app until the user quits. Must be called from within a tokio
/// runtime context, since acquisition jobs are spawned onto it.
pub fn app_loop<U: UI, E: UiEvents>(app: &mut App<U>, events: &mut E) -> io::Result<()> {
    app.state.initialize();
    app.render()?;

    while app.state.running {
        let mut dirty = Jobs::process(&mut app.state)?;

        match events.poll_event(POLL_TIMEOUT)? {
            Some(UiEvent::Key(key)) => {
                if let Some(action) = keymap::action_for(key) {
                    app.state.clear_echo();
                    app.state.handle_action(action);
                }
            }
            Some(UiEvent::Redraw) => dirty = true,
            None => {}
        };

        if !app.state.running {
            break;
        }

        if dirty || app.state.requested_redraw {
            app.render()?;
        }
    }

    app.state.jobs.cancel_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        app::state::tests::test_state,
        input::KeysParsable,
        jokes::tests::joke,
    };

    struct MemoryUiEvents {
        events: VecDeque<UiEvent>,
    }

    impl MemoryUiEvents {
        fn from_keys(keys: &str) -> Self {
            Self {
                events: keys.into_keys().into_iter().map(UiEvent::Key).collect(),
            }
        }
    }

    impl UiEvents for MemoryUiEvents {
        fn poll_event(&mut self, _timeout: Duration) -> io::Result<Option<UiEvent>> {
            match self.events.pop_front() {
                Some(event) => Ok(Some(event)),
                None => Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "Ran out of events without quitting",
                )),
            }
        }
    }

    /// Records the vote tally (in display order) every time it's asked to render
    #[derive(Default)]
    struct RecordingUI {
        frames: Vec<Vec<(String, i32)>>,
    }

    impl UI for RecordingUI {
        fn render_app(&mut self, state: &crate::app::State) -> io::Result<()> {
            self.frames.push(
                state
                    .store
                    .display_order()
                    .iter()
                    .map(|j| (j.id.clone(), j.votes))
                    .collect(),
            );
            Ok(())
        }
    }

    fn tally(pairs: &[(&str, i32)]) -> Vec<(String, i32)> {
        pairs.iter().map(|(id, v)| (id.to_string(), *v)).collect()
    }

    #[test]
    fn renders_after_each_action_until_quit() {
        let state = test_state(vec![joke("a", 2, false), joke("b", 3, false)], &[]);
        let mut app = App::new(state, RecordingUI::default());
        let mut events = MemoryUiEvents::from_keys("j++xq");

        app_loop(&mut app, &mut events).expect("loop");

        assert!(!app.state.running);
        assert_eq!(
            app.ui.frames,
            vec![
                tally(&[("b", 3), ("a", 2)]),
                tally(&[("b", 3), ("a", 2)]), // j
                tally(&[("a", 3), ("b", 3)]), // + (ties keep list order)
                tally(&[("a", 4), ("b", 3)]), // +
            ]
        );
    }

    #[test]
    fn propagates_event_errors() {
        let state = test_state(vec![joke("a", 0, false)], &[]);
        let mut app = App::new(state, RecordingUI::default());
        let mut events = MemoryUiEvents::from_keys("+");

        let result = app_loop(&mut app, &mut events);

        assert_eq!(
            result.map_err(|e| e.kind()),
            Err(io::ErrorKind::UnexpectedEof)
        );
    }
}
