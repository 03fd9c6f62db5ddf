use tui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Paragraph, Widget},
};

use crate::{app, jokes::JokeRecord};

const HEADER_HEIGHT: u16 = 3;

/// Renders the app's jokes, best first, or a progress indicator while
/// they're being fetched
pub struct JokeView<'a> {
    state: &'a app::State,
}

impl<'a> JokeView<'a> {
    pub fn new(state: &'a app::State) -> Self {
        Self { state }
    }
}

impl<'a> Widget for JokeView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let body = Rect::new(area.x, area.y, area.width, area.height - 1);
        if self.state.store.is_loading() {
            render_loading(self.state, body, buf);
        } else {
            render_header(body, buf);
            render_jokes(self.state, body, buf);
        }

        let echo_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        render_echo(self.state, echo_area, buf);
    }
}

fn render_loading(state: &app::State, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Spans::from(Span::styled(
            "Loading jokes...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(format!("{}/{}", state.progress, state.store.target())),
        Spans::from(""),
        Spans::from(Span::styled(
            "q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    // Render vertically centered
    let widget_height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height / 2).saturating_sub(widget_height / 2);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, widget_height), buf);
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Magenta);
    let hint_style = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Spans::from(vec![
            Span::styled("[n]", key_style),
            Span::from(" New jokes  "),
            Span::styled("[r]", key_style),
            Span::from(" Reset votes  "),
            Span::styled("[q]", key_style),
            Span::from(" Quit"),
        ]),
        Spans::from(Span::styled(
            "j/k select  +/- vote  l lock",
            hint_style,
        )),
    ];

    let height = HEADER_HEIGHT.min(area.height);
    Paragraph::new(lines).render(Rect::new(area.x, area.y, area.width, height), buf);
}

/// Width of everything in a joke row before its text
const ROW_PREFIX_WIDTH: usize = 14;

/// Greedily wraps `text` on whitespace into lines of at most `width` chars.
/// Words longer than `width` get a line to themselves.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

fn joke_lines(joke: &JokeRecord, selected: bool, width: u16) -> Vec<Spans<'static>> {
    let style = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let lock_style = if joke.locked {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_width = (width as usize).saturating_sub(ROW_PREFIX_WIDTH).max(1);
    let mut text_lines = wrap_words(&joke.text, text_width).into_iter();

    let mut lines = vec![Spans::from(vec![
        Span::from(if selected { "> " } else { "  " }),
        Span::styled("▲▼ ", Style::default().fg(Color::DarkGray)),
        Span::styled(if joke.locked { "[L] " } else { "[ ] " }, lock_style),
        Span::styled(format!("{:>3}  ", joke.votes), style),
        Span::styled(text_lines.next().unwrap_or_default(), style),
    ])];

    for continued in text_lines {
        lines.push(Spans::from(vec![
            Span::from(" ".repeat(ROW_PREFIX_WIDTH)),
            Span::styled(continued, style),
        ]));
    }

    lines
}

fn render_jokes(state: &app::State, area: Rect, buf: &mut Buffer) {
    if area.height <= HEADER_HEIGHT {
        return;
    }

    let selected = state.selected_id();
    let lines: Vec<Spans> = state
        .store
        .display_order()
        .into_iter()
        .flat_map(|joke| joke_lines(joke, Some(joke.id.as_str()) == selected, area.width))
        .collect();

    let list_area = Rect::new(
        area.x,
        area.y + HEADER_HEIGHT,
        area.width,
        area.height - HEADER_HEIGHT,
    );
    Paragraph::new(lines).render(list_area, buf);
}

fn render_echo(state: &app::State, area: Rect, buf: &mut Buffer) {
    let text = match state.echo_line() {
        Some(text) => text,
        None => return,
    };

    let style = if text.starts_with("ERR") {
        Style::default().fg(Color::Red)
    } else if text.starts_with("WARN") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Paragraph::new(Spans::from(Span::styled(text, style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{feed, test_state};
    use crate::jokes::tests::joke;
    use indoc::indoc;

    fn render_lines(state: &app::State, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        JokeView::new(state).render(area, &mut buf);

        (0..height)
            .map(|y| {
                let line: String = (0..width).map(|x| buf.get(x, y).symbol.as_str()).collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    fn render_to_string(state: &app::State, width: u16, height: u16) -> String {
        let mut s = String::new();
        for line in render_lines(state, width, height) {
            s.push_str(&line);
            s.push('\n');
        }
        s
    }

    #[test]
    fn renders_jokes_best_first() {
        let state = test_state(vec![joke("a", 2, false), joke("b", 5, true)], &[]);

        assert_eq!(
            render_to_string(&state, 44, 7),
            indoc! {"
                [n] New jokes  [r] Reset votes  [q] Quit
                j/k select  +/- vote  l lock

                > ▲▼ [L]   5  joke b
                  ▲▼ [ ]   2  joke a


            "}
        );
    }

    #[test]
    fn renders_selection_and_echo() {
        let mut state = test_state(vec![joke("a", 2, false), joke("b", 5, false)], &[]);
        feed(&mut state, "jr");

        assert_eq!(
            render_to_string(&state, 44, 7),
            indoc! {"
                [n] New jokes  [r] Reset votes  [q] Quit
                j/k select  +/- vote  l lock

                > ▲▼ [ ]   0  joke a
                  ▲▼ [ ]   0  joke b

                Votes reset.
            "}
        );
    }

    #[test]
    fn wraps_long_jokes_under_their_text() {
        let mut long = joke("a", 12, false);
        long.text = "Why did the scarecrow win an award".to_string();
        let state = test_state(vec![long], &[]);

        assert_eq!(
            render_lines(&state, 30, 7)[3..6].to_vec(),
            vec![
                "> ▲▼ [ ]  12  Why did the",
                "              scarecrow win an",
                "              award",
            ]
        );
    }

    #[test]
    fn renders_loading_progress() {
        let mut state = test_state(vec![], &[]);
        state.progress = 2;

        assert_eq!(
            render_lines(&state, 20, 7),
            vec![
                "",
                "  Loading jokes...",
                "         2/5",
                "",
                "      q to quit",
                "",
                "",
            ]
        );
    }

    #[test]
    fn survives_tiny_areas() {
        let state = test_state(vec![joke("a", 2, false)], &[]);
        render_lines(&state, 5, 1);
        render_lines(&state, 1, 3);
        render_lines(&state, 0, 0);
    }

    #[cfg(test)]
    mod wrap_words {
        use super::*;

        #[test]
        fn fits_on_one_line() {
            assert_eq!(wrap_words("knock knock", 20), vec!["knock knock"]);
        }

        #[test]
        fn breaks_on_words() {
            assert_eq!(
                wrap_words("who is there? interrupting cow", 12),
                vec!["who is", "there?", "interrupting", "cow"]
            );
        }

        #[test]
        fn empty_text_is_one_empty_line() {
            assert_eq!(wrap_words("", 10), vec![""]);
        }
    }
}
