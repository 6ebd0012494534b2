use serde::{Deserialize, Serialize};

/// Rule deciding whether the next typed character is capitalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Casing {
    Upper,
    Lower,
    WordUpper,
    #[default]
    SentenceUpper,
}

impl Casing {
    pub fn as_str(self) -> &'static str {
        match self {
            Casing::Upper => "UPPER",
            Casing::Lower => "LOWER",
            Casing::WordUpper => "WORD_UPPER",
            Casing::SentenceUpper => "SENTENCE_UPPER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "UPPER" => Some(Casing::Upper),
            "LOWER" => Some(Casing::Lower),
            "WORD_UPPER" => Some(Casing::WordUpper),
            "SENTENCE_UPPER" => Some(Casing::SentenceUpper),
            _ => None,
        }
    }
}

fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Whether the character typed after `content` should be upper-cased.
pub fn should_capitalize_next(content: &str, casing: Casing) -> bool {
    match casing {
        Casing::Upper => true,
        Casing::Lower => false,
        Casing::SentenceUpper => {
            let mut rev = content.chars().rev();
            match rev.next() {
                None => true,
                Some(last) if is_sentence_end(last) => true,
                Some(last) if last.is_whitespace() => rev.next().is_some_and(is_sentence_end),
                Some(_) => false,
            }
        }
        Casing::WordUpper => content
            .chars()
            .next_back()
            .is_some_and(|last| is_sentence_end(last) || last.is_whitespace()),
    }
}

/// What an append did to the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Nothing to append; buffer untouched.
    Ignored,
    Appended,
    /// The buffer reached `max_length` and was cut to exactly that length.
    Clamped,
}

impl AppendOutcome {
    pub fn changed(self) -> bool {
        self != AppendOutcome::Ignored
    }
}

/// The in-progress string. Only ever grows at the end or loses its last character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    max_length: usize,
    casing: Casing,
}

impl TextBuffer {
    pub fn new(initial: &str, max_length: usize, casing: Casing) -> Self {
        let mut content = initial.to_string();
        if max_length > 0 {
            content = content.chars().take(max_length).collect();
        }
        Self {
            content,
            max_length,
            casing,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn casing(&self) -> Casing {
        self.casing
    }

    pub fn should_capitalize_next(&self) -> bool {
        should_capitalize_next(&self.content, self.casing)
    }

    /// Append `s`, add a space after sentence punctuation, then enforce `max_length`.
    pub fn append(&mut self, s: &str) -> AppendOutcome {
        if s.is_empty() {
            return AppendOutcome::Ignored;
        }
        self.content.push_str(s);
        if self.content.chars().next_back().is_some_and(is_sentence_end) {
            self.content.push(' ');
        }

        if self.max_length > 0 && self.len() >= self.max_length {
            if let Some((cut, _)) = self.content.char_indices().nth(self.max_length) {
                self.content.truncate(cut);
            }
            return AppendOutcome::Clamped;
        }
        AppendOutcome::Appended
    }

    pub fn push_char(&mut self, ch: char) -> AppendOutcome {
        let mut buf = [0u8; 4];
        self.append(ch.encode_utf8(&mut buf))
    }

    /// Remove the final character. Returns false on an empty buffer.
    pub fn delete_last(&mut self) -> bool {
        self.content.pop().is_some()
    }

    pub fn into_string(self) -> String {
        self.content
    }
}
