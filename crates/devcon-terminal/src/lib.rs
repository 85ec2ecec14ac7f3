//! Command interpreter for the developer console.
//!
//! Commands are declared as data with a compact signature grammar
//! (`alias new <alias:s> to <commands:s>`), compiled into a registry of
//! anchored line matchers, and dispatched by a [`Console`] that also owns
//! aliases, lifecycle hooks, the delay sequencer and input history.

mod alias;
mod commands;
mod console;
mod events;
mod history;
mod prompt;
mod registry;
mod sequencer;
mod signature;
mod store;

/// Alias table and the reserved `all` name.
pub use alias::{AliasTable, RESERVED_ALIAS, Removal, split_statements};
/// Every built-in command declaration, in registration order.
pub use commands::builtin_commands;
/// The interpreter context and its line classification.
pub use console::{Console, LineClass};
/// Lifecycle hooks and their bindings.
pub use events::{EventHooks, LifecycleHook};
/// Back/forward history over submitted lines.
pub use history::HistoryStack;
/// The composing line.
pub use prompt::{ALLOWED_CHARACTERS, Prompt};
/// Command declarations and the compiled registry.
pub use registry::{
    CommandDescriptor, CommandRegistry, CommandSpec, Handler, Resolution, SignatureDescriptor,
    SignatureSpec,
};
/// Shared delay counter and parked sequences.
pub use sequencer::{DelayRequest, PendingSequence, Sequencer};
/// Compiled signatures.
pub use signature::{Placeholder, PlaceholderKind, Signature};
/// Persisted-state backends.
pub use store::{JsonFileStore, MemoryStore, StateStore};
