//! Character-by-character reveal of a reply

use serde::Serialize;
use std::sync::Arc;

/// One unit of progress in a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "glyph", rename_all = "snake_case")]
pub enum RevealStep {
    /// A visible character
    Glyph(char),
    /// A `\n` in the source, shown as a line break
    LineBreak,
}

/// Progress through a reply; `cursor` is the byte offset of the next
/// unrevealed character and always sits on a char boundary.
///
/// The text is shared, so cloning a reveal on every tick copies only the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    text: Arc<str>,
    cursor: usize,
}

impl Reveal {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
        }
    }

    /// Reveal the next character, or `None` once everything is shown
    pub fn advance(&mut self) -> Option<RevealStep> {
        let next = self.text.get(self.cursor..)?.chars().next()?;
        self.cursor += next.len_utf8();
        Some(if next == '\n' {
            RevealStep::LineBreak
        } else {
            RevealStep::Glyph(next)
        })
    }

    /// Text revealed so far, a prefix of the full reply
    pub fn partial(&self) -> &str {
        self.text.get(..self.cursor).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text.to_string()
    }
}
