use std::{io, time::Duration};

use crossterm::event::{Event, KeyCode, KeyModifiers};

use crate::{
    input::Key,
    ui::{UiEvent, UiEvents},
};

// ======= Conversions ====================================

impl From<crossterm::event::KeyEvent> for Key {
    fn from(ev: crossterm::event::KeyEvent) -> Self {
        match ev.code {
            KeyCode::Char(ch) => {
                // NOTE: capital ascii letters from crossterm include the SHIFT modifier, but
                // symbols like + do not. For consistency, let's remove SHIFT from letters, too:
                if ch.is_alphabetic() && ch == ch.to_ascii_uppercase() {
                    return Key::new(ev.code, ev.modifiers - KeyModifiers::SHIFT);
                }
            }

            KeyCode::BackTab => {
                return Key::new(KeyCode::Tab, ev.modifiers | KeyModifiers::SHIFT);
            }

            _ => {} // fall through for default:
        }

        Key::new(ev.code, ev.modifiers)
    }
}

// ======= TuiEvents ======================================

#[derive(Default)]
pub struct TuiEvents;

impl UiEvents for TuiEvents {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }

        match crossterm::event::read()? {
            Event::Resize(_, _) => Ok(Some(UiEvent::Redraw)),
            Event::Key(key) => Ok(Some(UiEvent::Key(key.into()))),
            Event::Mouse(_) => Ok(None),
        }
    }
}
