//! Output produced by the console for its presentation layer.

/// Abstract emphasis of an output line. The host decides how each kind
/// looks (colour, prefix, icon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Info,
    Warning,
    Error,
    Success,
    Highlight,
}

/// One item in the console's pending-output queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// A formatted line of text.
    Line { kind: Emphasis, text: String },
    /// Signal to the host to clear its scrollback.
    Clear,
    /// Signal to the host to show the console panel.
    Open,
    /// Signal to the host to hide the console panel.
    Close,
}

impl ConsoleOutput {
    /// Build a text line. Surrounding whitespace is trimmed and continuation
    /// lines are indented by two spaces.
    pub fn line(kind: Emphasis, text: &str) -> Self {
        Self::Line {
            kind,
            text: text.trim().replace('\n', "\n  "),
        }
    }

    /// The text of a line, or `None` for signals.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Line { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The emphasis of a line, or `None` for signals.
    pub fn kind(&self) -> Option<Emphasis> {
        match self {
            Self::Line { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_trims_and_indents() {
        let out = ConsoleOutput::line(Emphasis::Info, "  print - prints\n  print <text|string>  ");
        assert_eq!(out.text(), Some("print - prints\n    print <text|string>"));
        assert_eq!(out.kind(), Some(Emphasis::Info));
    }

    #[test]
    fn signals_have_no_text() {
        assert_eq!(ConsoleOutput::Clear.text(), None);
        assert_eq!(ConsoleOutput::Open.kind(), None);
    }
}
