//! Command declarations, the compiled registry, and line resolution.
//!
//! Commands are declared as plain data ([`CommandSpec`]) with a handler
//! closure bound to each signature, then compiled once into a
//! [`CommandRegistry`]. A registry that builds successfully has every
//! signature compiled and every handler bound; there is no partially
//! registered state.

use std::collections::HashSet;
use std::fmt;

use devcon_types::error::{ConsoleError, Result};
use regex::Regex;

use crate::console::Console;
use crate::signature::Signature;

/// Handler invoked with the captures of a matched signature.
pub type Handler = Box<dyn Fn(&mut Console, &[String]) -> Result<()>>;

enum Grammar {
    Compact(String),
    Custom { pattern: String, display: String },
}

/// Declaration of one signature, before compilation.
pub struct SignatureSpec {
    grammar: Grammar,
    hint: String,
    handler: Option<Handler>,
}

impl SignatureSpec {
    /// A signature written in the compact grammar, e.g. `print <text:s>`.
    pub fn grammar(raw: &str, hint: &str) -> Self {
        Self {
            grammar: Grammar::Compact(raw.to_string()),
            hint: hint.to_string(),
            handler: None,
        }
    }

    /// A signature with a hand-written pattern, for syntax the grammar
    /// cannot express.
    pub fn custom(pattern: &str, display: &str, hint: &str) -> Self {
        Self {
            grammar: Grammar::Custom {
                pattern: pattern.to_string(),
                display: display.to_string(),
            },
            hint: hint.to_string(),
            handler: None,
        }
    }

    /// Bind the handler that runs when this signature matches.
    pub fn bind<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Console, &[String]) -> Result<()> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    fn source(&self) -> &str {
        match &self.grammar {
            Grammar::Compact(raw) => raw,
            Grammar::Custom { display, .. } => display,
        }
    }
}

/// Declaration of one command: name, description, signatures in priority
/// order.
pub struct CommandSpec {
    name: String,
    description: String,
    signatures: Vec<SignatureSpec>,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.to_string(),
            signatures: Vec::new(),
        }
    }

    /// Append a signature. Earlier signatures win when several match.
    pub fn signature(mut self, spec: SignatureSpec) -> Self {
        self.signatures.push(spec);
        self
    }
}

/// A compiled signature bound to its handler.
pub struct SignatureDescriptor {
    signature: Signature,
    hint: String,
    handler: Handler,
}

impl SignatureDescriptor {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Run the bound handler.
    pub fn invoke(&self, console: &mut Console, captures: &[String]) -> Result<()> {
        (self.handler)(console, captures)
    }
}

impl fmt::Debug for SignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureDescriptor")
            .field("display", &self.signature.display())
            .field("hint", &self.hint)
            .finish_non_exhaustive()
    }
}

/// A compiled command.
#[derive(Debug)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    signatures: Vec<SignatureDescriptor>,
    help: Regex,
}

impl CommandDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signatures(&self) -> &[SignatureDescriptor] {
        &self.signatures
    }

    /// Whether `line` asks for this command's help (`name ?` or `help name`).
    pub fn is_help_request(&self, line: &str) -> bool {
        self.help.is_match(line)
    }

    /// Description followed by every signature and its hint.
    pub fn help_text(&self) -> String {
        let mut text = format!("{} - {}", self.name, self.description);
        for sig in &self.signatures {
            text.push_str(&format!("\n  {} - {}", sig.signature.display(), sig.hint));
        }
        text
    }

    /// First signature (in declaration order) matching `line`.
    pub fn match_line(&self, line: &str) -> Option<(&SignatureDescriptor, Vec<String>)> {
        self.signatures
            .iter()
            .find_map(|sig| sig.signature.captures(line).map(|caps| (sig, caps)))
    }
}

/// Outcome of resolving a line against the registry.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The line asked for help on a command.
    Help(&'a CommandDescriptor),
    /// The line matched a signature.
    Invoke {
        command: &'a CommandDescriptor,
        signature: &'a SignatureDescriptor,
        captures: Vec<String>,
    },
}

/// All registered commands, in registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// Compile every declaration.
    ///
    /// Any malformed signature, missing handler, or duplicate name fails
    /// the whole build.
    pub fn build(specs: Vec<CommandSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut commands = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.name.clone()) {
                return Err(ConsoleError::DuplicateCommand(spec.name));
            }

            let mut signatures = Vec::with_capacity(spec.signatures.len());
            for sig in spec.signatures {
                let signature = match &sig.grammar {
                    Grammar::Compact(raw) => Signature::compile(raw)?,
                    Grammar::Custom { pattern, display } => Signature::custom(pattern, display)?,
                };
                let source = sig.source().to_string();
                let Some(handler) = sig.handler else {
                    return Err(ConsoleError::UnresolvedHandler {
                        command: spec.name,
                        signature: source,
                    });
                };
                signatures.push(SignatureDescriptor {
                    signature,
                    hint: sig.hint,
                    handler,
                });
            }

            let name = regex::escape(&spec.name);
            let help = Regex::new(&format!(r"(^{name}\s[?]$)|(^help\s{name}$)")).map_err(|e| {
                ConsoleError::Compile {
                    signature: spec.name.clone(),
                    token: e.to_string(),
                }
            })?;

            log::debug!(
                "Registered command '{}' ({} signatures)",
                spec.name,
                signatures.len()
            );
            commands.push(CommandDescriptor {
                name: spec.name,
                description: spec.description,
                signatures,
                help,
            });
        }

        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The command whose help pattern matches `line`, if any.
    pub fn match_help(&self, line: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.is_help_request(line))
    }

    /// The first matching signature across all commands.
    pub fn match_command(&self, line: &str) -> Option<(&SignatureDescriptor, Vec<String>)> {
        self.commands.iter().find_map(|c| c.match_line(line))
    }

    /// Resolve a line the way the dispatcher does: commands in
    /// registration order, and for each one its help pattern first, then its
    /// signatures in declaration order. First hit wins.
    pub fn resolve(&self, line: &str) -> Option<Resolution<'_>> {
        for command in &self.commands {
            if command.is_help_request(line) {
                return Some(Resolution::Help(command));
            }
            if let Some((signature, captures)) = command.match_line(line) {
                return Some(Resolution::Invoke {
                    command,
                    signature,
                    captures,
                });
            }
        }
        None
    }

    /// Whether any signature accepts `line`.
    pub fn is_valid(&self, line: &str) -> bool {
        self.match_command(line).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Console, _: &[String]) -> Result<()> {
        Ok(())
    }

    fn sample() -> CommandRegistry {
        CommandRegistry::build(vec![
            CommandSpec::new("print", "prints text")
                .signature(SignatureSpec::grammar("print <text:s>", "prints the text").bind(noop)),
            CommandSpec::new("fontsize", "changes the font size")
                .signature(SignatureSpec::grammar("fontsize reset", "default size").bind(noop))
                .signature(SignatureSpec::grammar("fontsize <fs:i>", "explicit size").bind(noop)),
            CommandSpec::new("shout", "prints loudly")
                .signature(SignatureSpec::grammar("shout <text:s>", "loud").bind(noop)),
        ])
        .unwrap()
    }

    #[test]
    fn build_keeps_registration_order() {
        let reg = sample();
        let names: Vec<&str> = reg.commands().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["print", "fontsize", "shout"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn help_patterns() {
        let reg = sample();
        assert_eq!(reg.match_help("help print").map(|c| c.name()), Some("print"));
        assert_eq!(reg.match_help("print ?").map(|c| c.name()), Some("print"));
        assert!(reg.match_help("print").is_none());
        assert!(reg.match_help("help printer").is_none());
    }

    #[test]
    fn help_wins_over_signature() {
        let reg = sample();
        // `print ?` would also match `print <text:s>`.
        assert!(matches!(reg.resolve("print ?"), Some(Resolution::Help(c)) if c.name() == "print"));
    }

    #[test]
    fn declaration_order_is_priority() {
        let reg = sample();
        let (sig, caps) = reg.match_command("fontsize reset").unwrap();
        assert_eq!(sig.signature().raw(), "fontsize reset");
        assert!(caps.is_empty());

        let (sig, caps) = reg.match_command("fontsize 12").unwrap();
        assert_eq!(sig.signature().raw(), "fontsize <fs:i>");
        assert_eq!(caps, ["12"]);
    }

    #[test]
    fn no_match_resolves_to_none() {
        let reg = sample();
        assert!(reg.resolve("fontsize big").is_none());
        assert!(!reg.is_valid("nothing here"));
    }

    #[test]
    fn help_text_lists_signatures_in_order() {
        let reg = sample();
        let help = reg.get("fontsize").unwrap().help_text();
        assert_eq!(
            help,
            "fontsize - changes the font size\n  fontsize reset - default size\n  fontsize <fs|int> - explicit size"
        );
    }

    #[test]
    fn missing_handler_is_unresolved() {
        let err = CommandRegistry::build(vec![
            CommandSpec::new("print", "prints text")
                .signature(SignatureSpec::grammar("print <text:s>", "prints")),
        ])
        .unwrap_err();
        match err {
            ConsoleError::UnresolvedHandler { command, signature } => {
                assert_eq!(command, "print");
                assert_eq!(signature, "print <text:s>");
            },
            other => panic!("expected unresolved handler, got {other:?}"),
        }
    }

    #[test]
    fn bad_signature_aborts_build() {
        let err = CommandRegistry::build(vec![
            CommandSpec::new("ok", "fine").signature(SignatureSpec::grammar("ok", "fine").bind(noop)),
            CommandSpec::new("bad", "broken")
                .signature(SignatureSpec::grammar("bad <x:q>", "broken").bind(noop)),
        ])
        .unwrap_err();
        assert!(err.is_startup_error());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = CommandRegistry::build(vec![
            CommandSpec::new("print", "a").signature(SignatureSpec::grammar("print", "a").bind(noop)),
            CommandSpec::new(" print ", "b").signature(SignatureSpec::grammar("print x", "b").bind(noop)),
        ])
        .unwrap_err();
        assert!(matches!(err, ConsoleError::DuplicateCommand(name) if name == "print"));
    }

    #[test]
    fn custom_signature_registers() {
        let reg = CommandRegistry::build(vec![CommandSpec::new("color", "sets colour").signature(
            SignatureSpec::custom(r"color #([0-9a-f]{6})", "color #<rrggbb>", "hex colour")
                .bind(noop),
        )])
        .unwrap();
        let (_, caps) = reg.match_command("color #00ff00").unwrap();
        assert_eq!(caps, ["00ff00"]);
        assert!(reg.get("color").unwrap().help_text().contains("color #<rrggbb> - hex colour"));
    }
}
