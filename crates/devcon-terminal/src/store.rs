//! Where the console keeps its persisted state.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use devcon_types::error::Result;
use devcon_types::state::PersistedState;

/// Storage backend for [`PersistedState`].
pub trait StateStore {
    /// Read the saved state. Stores with nothing saved yet return defaults.
    fn load(&self) -> Result<PersistedState>;

    /// Replace the saved state.
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            log::info!("No saved state at {}, starting fresh", self.path.display());
            return Ok(PersistedState::default());
        }
        let json = std::fs::read_to_string(&self.path)?;
        let state = PersistedState::from_json(&json)?;
        log::info!(
            "Loaded {} aliases and {} event hooks from {}",
            state.alias_map.len(),
            state.event_map.len(),
            self.path.display()
        );
        Ok(state)
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, state.to_json()?)?;
        log::debug!("Saved console state to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store. Clones share the same state, so a caller can keep a
/// handle and inspect what the console saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<PersistedState>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    /// A copy of the currently stored state.
    pub fn snapshot(&self) -> PersistedState {
        self.state.borrow().clone()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<PersistedState> {
        Ok(self.snapshot())
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        *self.state.borrow_mut() = state.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
