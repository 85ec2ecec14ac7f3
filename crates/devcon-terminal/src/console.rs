//! The console context and its dispatcher.
//!
//! A [`Console`] owns everything the interpreter mutates: alias table, event
//! hooks, delay sequencer, prompt, font size and the pending-output queue.
//! Handlers receive `&mut Console`, so they can print, change state, or
//! dispatch further lines.
//!
//! Dispatch of one line:
//!
//! 1. A line equal to an alias is replaced by the alias text, split on `;`,
//!    and each statement is dispatched in turn (expanding aliases again).
//! 2. Otherwise commands are tried in registration order. For each command
//!    its help pattern is checked first, then its signatures in declaration
//!    order. The first hit wins.
//! 3. Nothing matched: the line is rejected with a single syntax error.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use devcon_types::config::ConsoleConfig;
use devcon_types::error::{ConsoleError, Result};
use devcon_types::output::{ConsoleOutput, Emphasis};
use devcon_types::state::PersistedState;

use crate::alias::{AliasTable, Removal, split_statements};
use crate::events::{EventHooks, LifecycleHook};
use crate::prompt::Prompt;
use crate::registry::{CommandRegistry, Resolution};
use crate::sequencer::{DelayRequest, PendingSequence, Sequencer};
use crate::store::StateStore;

/// How a composing line would be handled, for syntax colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Empty,
    /// Matches a command signature.
    Valid,
    /// Is a registered alias.
    Alias,
    /// Asks for a command's help.
    Help,
    Invalid,
}

/// One interpreter instance.
pub struct Console {
    registry: Rc<CommandRegistry>,
    config: ConsoleConfig,
    aliases: AliasTable,
    events: EventHooks,
    sequencer: Sequencer,
    prompt: Prompt,
    font_size: i32,
    open: bool,
    /// Current alias expansion depth.
    depth: usize,
    output: VecDeque<ConsoleOutput>,
    store: Box<dyn StateStore>,
}

impl Console {
    /// Create a console, restoring aliases, event hooks and font size from
    /// `store`.
    pub fn new(
        registry: CommandRegistry,
        config: ConsoleConfig,
        store: Box<dyn StateStore>,
    ) -> Result<Self> {
        config.validate()?;
        let state = store.load()?;
        let font_size = config.clamp_font_size(state.font_size);
        let sequencer = Sequencer::new(config.max_delay_secs);
        Ok(Self {
            registry: Rc::new(registry),
            aliases: AliasTable::from_map(state.alias_map),
            events: EventHooks::from_map(&state.event_map),
            sequencer,
            prompt: Prompt::new(),
            font_size,
            open: false,
            depth: 0,
            output: VecDeque::new(),
            store,
            config,
        })
    }

    // -- Accessors --

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn events(&self) -> &EventHooks {
        &self.events
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut Prompt {
        &mut self.prompt
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether any suspended sequence is waiting for the delay to drain.
    pub fn has_pending(&self) -> bool {
        self.sequencer.has_pending()
    }

    /// The state as it would be persisted.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            font_size: self.font_size,
            alias_map: self.aliases.entries().clone(),
            event_map: self.events.to_map(),
        }
    }

    // -- Output --

    pub fn print(&mut self, kind: Emphasis, text: &str) {
        self.output.push_back(ConsoleOutput::line(kind, text));
    }

    pub fn info(&mut self, text: &str) {
        self.print(Emphasis::Info, text);
    }

    pub fn warn(&mut self, text: &str) {
        self.print(Emphasis::Warning, text);
    }

    pub fn error(&mut self, text: &str) {
        self.print(Emphasis::Error, text);
    }

    pub fn success(&mut self, text: &str) {
        self.print(Emphasis::Success, text);
    }

    /// Queue a signal for the host.
    pub fn signal(&mut self, signal: ConsoleOutput) {
        self.output.push_back(signal);
    }

    pub fn pending_output(&self) -> &VecDeque<ConsoleOutput> {
        &self.output
    }

    /// Hand every queued output to the host.
    pub fn drain_output(&mut self) -> Vec<ConsoleOutput> {
        self.output.drain(..).collect()
    }

    fn report(&mut self, err: &ConsoleError) {
        log::debug!("Dispatch failed: {err}");
        self.error(&err.to_string());
    }

    // -- Input --

    /// Submit the composing line: echo it, dispatch it, remember it.
    pub fn submit(&mut self) {
        let line = self.prompt.submit();
        if line.trim().is_empty() {
            return;
        }
        let echo = format!("{}{}", self.config.prompt, line);
        self.print(Emphasis::Highlight, &echo);
        self.execute(&line);
    }

    /// Dispatch a line as if the user had entered it. Errors are reported
    /// through the output queue.
    pub fn execute(&mut self, line: &str) {
        if let Err(e) = self.dispatch(line) {
            self.report(&e);
        }
    }

    /// Dispatch one line. Handlers may call this again.
    pub fn dispatch(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(statements) = self.aliases.expand(line) {
            return self.expand_alias(line, statements);
        }

        let registry = Rc::clone(&self.registry);
        match registry.resolve(line) {
            Some(Resolution::Help(command)) => {
                let text = command.help_text();
                self.info(&text);
                Ok(())
            },
            Some(Resolution::Invoke {
                command,
                signature,
                captures,
            }) => {
                log::debug!(
                    "Dispatching '{line}' to {} [{}]",
                    command.name(),
                    signature.signature().display()
                );
                signature.invoke(self, &captures)
            },
            None => Err(ConsoleError::DispatchRejected),
        }
    }

    /// Classify a line for syntax colouring without running anything.
    pub fn highlight(&self, line: &str) -> LineClass {
        if line.is_empty() {
            LineClass::Empty
        } else if self.registry.is_valid(line) {
            LineClass::Valid
        } else if self.aliases.lookup(line).is_some() {
            LineClass::Alias
        } else if self.registry.match_help(line).is_some() {
            LineClass::Help
        } else {
            LineClass::Invalid
        }
    }

    // -- Sequencing --

    fn expand_alias(&mut self, alias: &str, statements: Vec<String>) -> Result<()> {
        let limit = self.config.max_alias_depth;
        if self.depth >= limit {
            return Err(ConsoleError::RecursionLimit {
                alias: alias.to_string(),
                limit,
            });
        }
        log::debug!(
            "Expanding alias '{alias}' into {} statements (depth {})",
            statements.len(),
            self.depth
        );
        self.depth += 1;
        let result = self.run_statements(statements.into());
        self.depth -= 1;
        result
    }

    /// Run statements in order until the delay counter becomes non-zero;
    /// park whatever is left.
    ///
    /// A failing statement is reported and the next one still runs. A
    /// recursion-limit error aborts the whole chain.
    fn run_statements(&mut self, mut statements: VecDeque<String>) -> Result<()> {
        while let Some(statement) = statements.pop_front() {
            if self.sequencer.is_waiting() {
                statements.push_front(statement);
                self.sequencer.park(PendingSequence {
                    statements,
                    depth: self.depth,
                });
                return Ok(());
            }
            match self.dispatch(&statement) {
                Ok(()) => {},
                Err(e @ ConsoleError::RecursionLimit { .. }) => return Err(e),
                Err(e) => self.report(&e),
            }
        }
        Ok(())
    }

    /// Run `;`-separated statements through the sequencer.
    pub fn run_sequence(&mut self, text: &str) -> Result<()> {
        self.run_statements(split_statements(text).into())
    }

    /// Advance the delay counter and resume parked sequences that are due.
    pub fn tick(&mut self, elapsed: Duration) {
        self.sequencer.advance(elapsed);
        while let Some(task) = self.sequencer.pop_ready() {
            let rest = self.sequencer.take_parked();
            let outer = std::mem::replace(&mut self.depth, task.depth);
            if let Err(e) = self.run_statements(task.statements) {
                self.report(&e);
            }
            self.depth = outer;
            self.sequencer.restore_parked(rest);
        }
    }

    /// Add to the shared delay counter, warning when the request is clamped.
    pub fn request_delay(&mut self, seconds: f64) {
        match self.sequencer.request_delay(seconds) {
            DelayRequest::Clamped { requested, applied } => {
                log::warn!("Delay of {requested}s clamped to {applied}s");
                self.warn(&format!(
                    "Delay of {requested} is too much, clamping it to {applied}"
                ));
            },
            DelayRequest::Accepted(secs) => log::debug!(
                "Delaying sequences by {secs}s ({:.2}s pending)",
                self.sequencer.remaining()
            ),
            DelayRequest::Ignored => {},
        }
    }

    // -- Event hooks --

    /// Run the command bound to `hook`, if any.
    pub fn fire(&mut self, hook: LifecycleHook) {
        let Some(command) = self.events.command(hook).map(str::to_string) else {
            return;
        };
        log::info!("Firing {hook}: {command}");
        if let Err(e) = self.run_sequence(&command) {
            self.report(&e);
        }
    }

    pub fn register_event(&mut self, hook_name: &str, command: &str) -> Result<()> {
        let hook = self.events.register(hook_name, command)?;
        self.persist();
        self.success(&format!("Event '{hook}' registered"));
        Ok(())
    }

    pub fn remove_event(&mut self, hook_name: &str) -> Result<()> {
        let hook: LifecycleHook = hook_name.parse()?;
        if self.events.unbind(hook.name())? {
            self.persist();
            self.info(&format!("Removed event '{hook}'"));
        }
        Ok(())
    }

    pub fn list_events(&mut self) {
        let lines: Vec<String> = self
            .events
            .iter()
            .map(|(hook, command)| format!("{hook} => {command}"))
            .collect();
        if lines.is_empty() {
            self.info("No event hooks registered");
        }
        for line in lines {
            self.info(&line);
        }
    }

    // -- Aliases --

    pub fn register_alias(&mut self, alias: &str, command: &str) -> Result<()> {
        self.aliases.register(alias, command)?;
        self.persist();
        self.success(&format!("Registered alias '{}'", alias.trim()));
        Ok(())
    }

    /// Remove one alias, or all of them for `all`. Unknown names do nothing.
    pub fn deregister_alias(&mut self, alias: &str) {
        match self.aliases.deregister(alias) {
            Removal::All(count) => {
                self.persist();
                self.info(&format!("Removed all aliases ({count})"));
            },
            Removal::One => {
                self.persist();
                self.info(&format!("Removed alias '{}'", alias.trim()));
            },
            Removal::Missing => {},
        }
    }

    pub fn print_alias(&mut self, alias: &str) -> Result<()> {
        let lines: Vec<String> = self
            .aliases
            .print(alias)?
            .into_iter()
            .map(|(name, text)| format!("{name} => {text}"))
            .collect();
        if lines.is_empty() {
            self.info("No aliases registered");
        }
        for line in lines {
            self.info(&line);
        }
        Ok(())
    }

    // -- Panel state --

    pub fn set_font_size(&mut self, size: i32) {
        self.font_size = self.config.clamp_font_size(size);
        self.persist();
        self.info(&format!("Font size set to {}", self.font_size));
    }

    pub fn reset_font_size(&mut self) {
        self.set_font_size(self.config.default_font_size);
    }

    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.signal(ConsoleOutput::Open);
        }
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.signal(ConsoleOutput::Close);
        }
    }

    pub fn clear(&mut self) {
        self.signal(ConsoleOutput::Clear);
    }

    fn persist(&mut self) {
        let state = self.snapshot();
        if let Err(e) = self.store.save(&state) {
            log::warn!("Failed to save console state: {e}");
            self.warn(&format!("Failed to save console state: {e}"));
        }
    }
}
