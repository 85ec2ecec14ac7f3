//! The line being composed, with history recall.

use crate::history::HistoryStack;

/// Characters the prompt accepts from typed input.
pub const ALLOWED_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890-+*/_=<>!@#$%^&*(){}[]\"',.?;:|\\/ ";

#[derive(Debug, Clone, Default)]
pub struct Prompt {
    line: String,
    history: HistoryStack,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Append a typed character. Returns `false` if it was filtered out.
    pub fn insert(&mut self, c: char) -> bool {
        if !ALLOWED_CHARACTERS.contains(c) {
            return false;
        }
        self.line.push(c);
        self.history.edit();
        true
    }

    /// Delete the last character.
    pub fn backspace(&mut self) {
        if self.line.pop().is_some() {
            self.history.edit();
        }
    }

    /// Replace the composing line with an older entry, if there is one.
    pub fn history_back(&mut self) {
        if let Some(line) = self.history.navigate_back() {
            self.line = line;
        }
    }

    /// Replace the composing line with a newer entry, or clear it.
    pub fn history_forward(&mut self) {
        self.line = self.history.navigate_forward().unwrap_or_default();
    }

    /// Take the composing line and commit it to history. Blank lines are
    /// returned but not remembered.
    pub fn submit(&mut self) -> String {
        let line = std::mem::take(&mut self.line);
        if !line.trim().is_empty() {
            self.history.commit(&line);
        }
        line
    }
}
