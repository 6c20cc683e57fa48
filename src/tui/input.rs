use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single-line text input with a cursor and a placeholder shown while the
/// field is empty.
#[derive(Debug, Clone)]
pub struct InputBox {
    content: String,
    /// Cursor position in characters, not bytes.
    cursor: usize,
    placeholder: &'static str,
}

impl InputBox {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            placeholder,
        }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = self.char_to_byte_pos(self.cursor);
        self.content.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Backspace: remove the character before the cursor.
    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let start = self.char_to_byte_pos(self.cursor);
            let end = self.char_to_byte_pos(self.cursor + 1);
            self.content.drain(start..end);
        }
    }

    /// Delete: remove the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor < self.content.chars().count() {
            let start = self.char_to_byte_pos(self.cursor);
            let end = self.char_to_byte_pos(self.cursor + 1);
            self.content.drain(start..end);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn char_to_byte_pos(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

/// Render the input box. An empty unfocused field shows the placeholder in
/// a dim style, like the original desktop app's grey prompt text.
pub fn render_input_box(f: &mut Frame, input: &InputBox, label: &str, focused: bool, area: Rect) {
    let border_color = if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let label_span = Span::styled(
        format!("{label} "),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    // the placeholder stays visible until the first character is typed;
    // while the field has focus the cursor sits on its first cell
    if input.content().is_empty() {
        let mut placeholder = input.placeholder.chars();
        let mut spans = vec![label_span];
        if focused {
            let first = placeholder.next().unwrap_or(' ').to_string();
            spans.push(Span::styled(
                first,
                Style::default().fg(Color::Black).bg(Color::White),
            ));
        }
        spans.push(Span::styled(
            placeholder.as_str().to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let chars: Vec<char> = input.content().chars().collect();
    let before: String = chars[..input.cursor].iter().collect();
    let cursor_char = chars
        .get(input.cursor)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = if input.cursor < chars.len() {
        chars[input.cursor + 1..].iter().collect()
    } else {
        String::new()
    };

    let mut spans = vec![
        label_span,
        Span::styled(before, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled(
            cursor_char,
            Style::default().fg(Color::Black).bg(Color::White),
        ));
    } else {
        spans.push(Span::styled(cursor_char, Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(after, Style::default().fg(Color::White)));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

/// Apply an editing key to the input box; returns false for keys the box
/// does not consume.
pub fn handle_edit_key(input: &mut InputBox, key: crossterm::event::KeyEvent) -> bool {
    use crossterm::event::KeyCode;
    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.delete_back();
            true
        }
        KeyCode::Delete => {
            input.delete_forward();
            true
        }
        KeyCode::Left => {
            input.move_left();
            true
        }
        KeyCode::Right => {
            input.move_right();
            true
        }
        KeyCode::Home => {
            input.move_home();
            true
        }
        KeyCode::End => {
            input.move_end();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_keeps_cursor_within_bounds() {
        let mut input = InputBox::new("hint");
        for c in "abc".chars() {
            input.insert(c);
        }
        input.move_left();
        input.delete_back();
        assert_eq!(input.content(), "ac");
        input.move_home();
        input.delete_forward();
        assert_eq!(input.content(), "c");
        input.move_end();
        input.delete_forward();
        assert_eq!(input.content(), "c");
    }

    #[test]
    fn insert_is_utf8_safe() {
        let mut input = InputBox::new("hint");
        input.insert('é');
        input.insert('x');
        input.move_left();
        input.move_left();
        input.insert('a');
        assert_eq!(input.content(), "aéx");
    }

    fn rendered_text(input: &InputBox, focused: bool) -> String {
        let backend = ratatui::backend::TestBackend::new(40, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_input_box(f, input, "Package:", focused, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn placeholder_shows_while_empty_regardless_of_focus() {
        let input = InputBox::new("Enter package name...");
        for focused in [true, false] {
            let text = rendered_text(&input, focused);
            assert!(
                text.contains("Enter package name..."),
                "placeholder missing with focused={focused}"
            );
        }
    }

    #[test]
    fn typed_content_replaces_the_placeholder() {
        let mut input = InputBox::new("Enter package name...");
        input.insert('r');
        let text = rendered_text(&input, true);
        assert!(text.contains('r'));
        assert!(!text.contains("Enter package name..."));
    }
}
