//! Lifecycle event hooks.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use devcon_types::error::{ConsoleError, Result};

/// The closed set of lifecycle points a command can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleHook {
    OnStartup,
    OnShutdown,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 2] = [Self::OnStartup, Self::OnShutdown];

    pub fn name(self) -> &'static str {
        match self {
            Self::OnStartup => "OnStartup",
            Self::OnShutdown => "OnShutdown",
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifecycleHook {
    type Err = ConsoleError;

    /// Hook names are matched case-insensitively so `onstartup` typed at the
    /// prompt works.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|hook| hook.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConsoleError::InvalidHook(s.to_string()))
    }
}

/// Command text bound to each lifecycle hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventHooks {
    bindings: BTreeMap<LifecycleHook, String>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted entries, skipping unknown hook names.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut hooks = Self::new();
        for (name, command) in map {
            match name.parse::<LifecycleHook>() {
                Ok(hook) => hooks.bind(hook, command),
                Err(_) => log::warn!("Ignoring persisted binding for unknown event '{name}'"),
            }
        }
        hooks
    }

    /// Persistable form keyed by hook name.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|(hook, command)| (hook.name().to_string(), command.clone()))
            .collect()
    }

    /// Bind `command` to the hook called `hook_name`.
    pub fn register(&mut self, hook_name: &str, command: &str) -> Result<LifecycleHook> {
        let hook = hook_name.parse()?;
        self.bind(hook, command);
        Ok(hook)
    }

    pub fn bind(&mut self, hook: LifecycleHook, command: &str) {
        self.bindings.insert(hook, command.trim().to_string());
    }

    /// Remove a binding. Returns whether one existed.
    pub fn unbind(&mut self, hook_name: &str) -> Result<bool> {
        let hook: LifecycleHook = hook_name.parse()?;
        Ok(self.bindings.remove(&hook).is_some())
    }

    pub fn command(&self, hook: LifecycleHook) -> Option<&str> {
        self.bindings.get(&hook).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifecycleHook, &str)> {
        self.bindings.iter().map(|(hook, cmd)| (*hook, cmd.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hook_names() {
        assert_eq!("OnStartup".parse::<LifecycleHook>().unwrap(), LifecycleHook::OnStartup);
        assert_eq!("onshutdown".parse::<LifecycleHook>().unwrap(), LifecycleHook::OnShutdown);
        assert!(matches!(
            "OnTick".parse::<LifecycleHook>(),
            Err(ConsoleError::InvalidHook(name)) if name == "OnTick"
        ));
    }

    #[test]
    fn register_and_lookup() {
        let mut hooks = EventHooks::new();
        let hook = hooks.register("OnStartup", " print ready ").unwrap();
        assert_eq!(hook, LifecycleHook::OnStartup);
        assert_eq!(hooks.command(LifecycleHook::OnStartup), Some("print ready"));
        assert_eq!(hooks.command(LifecycleHook::OnShutdown), None);
    }

    #[test]
    fn register_unknown_hook_fails() {
        let mut hooks = EventHooks::new();
        assert!(hooks.register("OnCrash", "print x").is_err());
        assert!(hooks.is_empty());
    }

    #[test]
    fn unbind_reports_presence() {
        let mut hooks = EventHooks::new();
        hooks.bind(LifecycleHook::OnShutdown, "print bye");
        assert!(hooks.unbind("OnShutdown").unwrap());
        assert!(!hooks.unbind("OnShutdown").unwrap());
        assert!(hooks.unbind("whenever").is_err());
    }

    #[test]
    fn map_round_trip_drops_unknown() {
        let mut map = BTreeMap::new();
        map.insert("OnStartup".to_string(), "print hi".to_string());
        map.insert("OnTick".to_string(), "print tick".to_string());
        let hooks = EventHooks::from_map(&map);
        let back = hooks.to_map();
        assert_eq!(back.len(), 1);
        assert_eq!(back.get("OnStartup").map(String::as_str), Some("print hi"));
    }
}
