/// Text and cursor of a leaf being edited. The cursor counts chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = char_count(&text);
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole text and parks the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = char_count(&self.text);
    }

    pub fn insert_char(&mut self, ch: char) {
        let pos = self.cursor.min(char_count(&self.text));
        let byte_pos = byte_index_at_char(&self.text, pos);
        self.text.insert(byte_pos, ch);
        self.cursor = pos + 1;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = self.cursor.min(char_count(&self.text));
        if pos == 0 {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.text, pos - 1);
        self.text.remove(byte_pos);
        self.cursor = pos - 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = self.cursor.min(char_count(&self.text));
        if pos >= char_count(&self.text) {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.text, pos);
        self.text.remove(byte_pos);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= char_count(&self.text) {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = char_count(&self.text);
    }

    pub fn delete_word_left(&mut self) -> bool {
        let mut chars: Vec<char> = self.text.chars().collect();
        let pos = self.cursor.min(chars.len());
        let mut start = pos;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == pos {
            return false;
        }
        chars.drain(start..pos);
        self.text = chars.into_iter().collect();
        self.cursor = start;
        true
    }
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | ':' | '"' | '[' | ']' | '{' | '}')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}
