//! Signature grammar compiler.
//!
//! A signature is a whitespace-separated list of tokens. Each token is
//! either a bare literal word (`alias`, `new`) or a typed placeholder
//! `<name:type>` where the type code is one of:
//!
//! | code | captures | shown as |
//! |------|----------|----------|
//! | `i`  | `[0-9]+` | `int` |
//! | `f`  | `[0-9]+[.]*[0-9]*` | `float` |
//! | `s`  | `.+` | `string` |
//! | `b`  | `[yn]` | `y/n` |
//!
//! Compilation produces an anchored matcher and a display form such as
//! `alias new <alias|string> to <commands|string>`. Captured values are
//! passed to handlers as raw text; converting them is the handler's job.

use std::sync::LazyLock;

use devcon_types::error::{ConsoleError, Result};
use regex::Regex;

static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("literal pattern is valid"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([^:<>]+):([ifsb])>$").expect("placeholder pattern is valid"));

/// Type of a placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Int,
    Float,
    Text,
    YesNo,
}

impl PlaceholderKind {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "i" => Some(Self::Int),
            "f" => Some(Self::Float),
            "s" => Some(Self::Text),
            "b" => Some(Self::YesNo),
            _ => None,
        }
    }

    /// Capture group used in the matcher.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Int => "([0-9]+)",
            Self::Float => "([0-9]+[.]*[0-9]*)",
            Self::Text => "(.+)",
            Self::YesNo => "([yn])",
        }
    }

    /// Readable hint used in the display form.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "string",
            Self::YesNo => "y/n",
        }
    }
}

/// A named placeholder in a compiled signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub kind: PlaceholderKind,
}

/// A compiled signature: matcher plus display text.
#[derive(Debug, Clone)]
pub struct Signature {
    raw: String,
    display: String,
    matcher: Regex,
    placeholders: Vec<Placeholder>,
}

impl Signature {
    /// Compile a signature from the compact grammar.
    ///
    /// Fails on the first token that is neither a literal word nor a
    /// well-formed placeholder, so a signature never half-compiles.
    pub fn compile(raw: &str) -> Result<Self> {
        let mut display = Vec::new();
        let mut pattern = Vec::new();
        let mut placeholders = Vec::new();

        for token in raw.split_whitespace() {
            if LITERAL.is_match(token) {
                display.push(token.to_string());
                pattern.push(regex::escape(token));
                continue;
            }

            if let Some(caps) = PLACEHOLDER.captures(token)
                && let Some(kind) = PlaceholderKind::from_code(&caps[2])
            {
                let name = caps[1].to_string();
                display.push(format!("<{name}|{}>", kind.hint()));
                pattern.push(kind.pattern().to_string());
                placeholders.push(Placeholder { name, kind });
                continue;
            }

            return Err(ConsoleError::Compile {
                signature: raw.to_string(),
                token: token.to_string(),
            });
        }

        if pattern.is_empty() {
            return Err(ConsoleError::Compile {
                signature: raw.to_string(),
                token: String::new(),
            });
        }

        let matcher = Regex::new(&format!("^{}$", pattern.join(" "))).map_err(|e| {
            ConsoleError::Compile {
                signature: raw.to_string(),
                token: e.to_string(),
            }
        })?;

        Ok(Self {
            raw: raw.to_string(),
            display: display.join(" "),
            matcher,
            placeholders,
        })
    }

    /// Build a signature from a hand-written pattern and display text.
    ///
    /// The pattern is wrapped so it always has to match the whole line.
    pub fn custom(pattern: &str, display: &str) -> Result<Self> {
        let matcher = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            ConsoleError::CustomMatcher {
                display: display.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            display: display.to_string(),
            matcher,
            placeholders: Vec::new(),
        })
    }

    /// The source text this signature was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Human-readable form shown by help.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The anchored regex lines are matched against.
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Typed placeholders, left to right. Empty for custom signatures.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Number of values a match hands to the handler.
    pub fn arity(&self) -> usize {
        self.matcher.captures_len() - 1
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    /// Match a full line and return its captures left to right.
    ///
    /// Optional groups that did not take part in the match yield an empty
    /// string so the handler always receives `arity()` values.
    pub fn captures(&self, line: &str) -> Option<Vec<String>> {
        let caps = self.matcher.captures(line)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}
