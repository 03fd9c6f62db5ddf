use std::str::FromStr;

use super::{Key, KeyCode, KeyModifiers};

// ======= Single-key parsing =============================

impl From<char> for Key {
    fn from(ch: char) -> Self {
        KeyCode::Char(ch).into()
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(s)
    }
}

// ======= Main string -> keys parsing ====================

#[derive(Debug, PartialEq)]
pub enum KeyParseError {
    InvalidModifier(String),
    InvalidKey(String),
}

impl std::fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyParseError::InvalidModifier(m) => write!(f, "Invalid modifier: {}", m),
            KeyParseError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

fn parse_key(s: &str) -> Result<Key, KeyParseError> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        // easy case:
        return Ok(ch.into());
    }

    let s = if s.starts_with("<") && s.ends_with(">") {
        &s[1..s.len() - 1]
    } else {
        s
    };

    let mut modifiers = KeyModifiers::empty();
    let mut code = KeyCode::Char('\0');

    let parts = s.split("-").count();
    for (i, part) in s.split("-").enumerate() {
        if i < parts - 1 {
            modifiers |= match part {
                "a" | "alt" => KeyModifiers::ALT,
                "c" | "ctrl" => KeyModifiers::CONTROL,
                "s" | "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::InvalidModifier(part.to_string())),
            };
        } else if let (Some(ch), 1) = (part.chars().next(), part.chars().count()) {
            code = KeyCode::Char(ch);
        } else {
            code = match part {
                "space" => KeyCode::Char(' '),
                "bs" | "backspace" => KeyCode::Backspace,
                "cr" | "enter" => KeyCode::Enter,
                "esc" => KeyCode::Esc,
                "tab" => KeyCode::Tab,

                "left" => KeyCode::Left,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "right" => KeyCode::Right,

                "pagedown" => KeyCode::PageDown,
                "pageup" => KeyCode::PageUp,

                _ => return Err(KeyParseError::InvalidKey(part.to_string())),
            };
        }
    }

    Ok(Key { code, modifiers })
}

/// Splits a vim-style key sequence like `jj+<c-c>` into individual keys.
/// Unparseable `<...>` sequences are dropped.
fn parse_keys(s: &str) -> Vec<Key> {
    let mut v: Vec<Key> = Vec::new();
    let mut pending_key = String::default();
    let mut in_special = false;

    for ch in s.chars() {
        if !in_special && ch == '<' {
            in_special = true;
        } else if in_special && ch == '>' {
            if let Ok(key) = parse_key(&pending_key.to_lowercase()) {
                v.push(key);
            }

            // reset
            in_special = false;
            pending_key.clear();
        } else if in_special {
            pending_key.push(ch);
        } else {
            // easy case: simple key
            v.push(ch.into());
        }
    }

    v
}

// ======= Conveniences ===================================

pub trait KeysParsable {
    fn into_keys(&self) -> Vec<Key>;
}

impl KeysParsable for &str {
    fn into_keys(&self) -> Vec<Key> {
        parse_keys(self)
    }
}

impl KeysParsable for String {
    fn into_keys(&self) -> Vec<Key> {
        parse_keys(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod parse_key {
        use super::*;

        #[test]
        fn simple_chars() {
            assert_eq!("+".parse::<Key>(), Ok(Key::from('+')));
            assert_eq!("j".parse::<Key>(), Ok(Key::from('j')));
        }

        #[test]
        fn ctrl_modifier() {
            assert_eq!(
                "<c-c>".parse::<Key>(),
                Ok(Key::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            );
        }

        #[test]
        fn named_keys() {
            assert_eq!("<down>".parse::<Key>(), Ok(Key::from(KeyCode::Down)));
            assert_eq!("<space>".parse::<Key>(), Ok(Key::from(' ')));
        }

        #[test]
        fn invalid_key() {
            assert_eq!(
                "<c-nope>".parse::<Key>(),
                Err(KeyParseError::InvalidKey("nope".to_string()))
            );
        }
    }

    #[cfg(test)]
    mod parse_keys {
        use super::*;

        #[test]
        fn mixed_sequence() {
            assert_eq!(
                "j+<down><c-c>".into_keys(),
                vec![
                    Key::from('j'),
                    Key::from('+'),
                    Key::from(KeyCode::Down),
                    Key::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                ]
            );
        }
    }
}
