//! User-defined aliases.
//!
//! An alias maps a whole input line to substitution text. The text is split
//! on `;` into statements; each statement is dispatched on its own and goes
//! through alias expansion again.

use std::collections::BTreeMap;

use devcon_types::error::{ConsoleError, Result};

/// Keyword meaning "every alias". It can never be registered.
pub const RESERVED_ALIAS: &str = "all";

/// What `deregister` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The whole table was cleared; holds the number of entries removed.
    All(usize),
    /// One alias was removed.
    One,
    /// The alias was not registered.
    Missing,
}

/// Split substitution text into trimmed, non-empty statements.
pub fn split_statements(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted entries. A stored `all` entry is dropped.
    pub fn from_map(mut entries: BTreeMap<String, String>) -> Self {
        if entries.remove(RESERVED_ALIAS).is_some() {
            log::warn!("Dropping persisted alias '{RESERVED_ALIAS}'");
        }
        Self { entries }
    }

    /// The raw substitution text for `line`, if it is an alias.
    pub fn lookup(&self, line: &str) -> Option<&str> {
        self.entries.get(line.trim()).map(String::as_str)
    }

    /// The statements `line` expands to, if it is an alias.
    pub fn expand(&self, line: &str) -> Option<Vec<String>> {
        self.lookup(line).map(split_statements)
    }

    /// Register or replace an alias.
    pub fn register(&mut self, alias: &str, command: &str) -> Result<()> {
        let alias = alias.trim();
        if alias == RESERVED_ALIAS {
            return Err(ConsoleError::ReservedName(alias.to_string()));
        }
        if alias.is_empty() {
            return Err(ConsoleError::InvalidArgument("alias name is empty".to_string()));
        }
        self.entries.insert(alias.to_string(), command.trim().to_string());
        Ok(())
    }

    /// Remove an alias, or every alias for `all`. Unknown names are a no-op.
    pub fn deregister(&mut self, alias: &str) -> Removal {
        let alias = alias.trim();
        if alias == RESERVED_ALIAS {
            let count = self.entries.len();
            self.entries.clear();
            return Removal::All(count);
        }
        match self.entries.remove(alias) {
            Some(_) => Removal::One,
            None => Removal::Missing,
        }
    }

    /// Entries to print for `alias`: every entry for `all`, else the one
    /// named entry.
    pub fn print(&self, alias: &str) -> Result<Vec<(&str, &str)>> {
        let alias = alias.trim();
        if alias == RESERVED_ALIAS {
            return Ok(self
                .entries
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect());
        }
        self.entries
            .get_key_value(alias)
            .map(|(k, v)| vec![(k.as_str(), v.as_str())])
            .ok_or_else(|| ConsoleError::UnknownAlias(alias.to_string()))
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_name_rejected() {
        let mut table = AliasTable::new();
        let err = table.register("all", "print x").unwrap_err();
        assert!(matches!(err, ConsoleError::ReservedName(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn expand_splits_and_trims() {
        let mut table = AliasTable::new();
        table.register("g", "print hi; print bye ;;").unwrap();
        assert_eq!(
            table.expand("g"),
            Some(vec!["print hi".to_string(), "print bye".to_string()])
        );
        assert_eq!(table.expand(" g "), table.expand("g"));
        assert_eq!(table.expand("h"), None);
    }

    #[test]
    fn register_replaces() {
        let mut table = AliasTable::new();
        table.register("g", "print a").unwrap();
        table.register("g", "print b").unwrap();
        assert_eq!(table.lookup("g"), Some("print b"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn deregister_all_clears() {
        let mut table = AliasTable::new();
        table.register("a", "print a").unwrap();
        table.register("b", "print b").unwrap();
        assert_eq!(table.deregister("all"), Removal::All(2));
        assert!(table.is_empty());
    }

    #[test]
    fn deregister_unknown_is_noop() {
        let mut table = AliasTable::new();
        table.register("a", "print a").unwrap();
        assert_eq!(table.deregister("zzz"), Removal::Missing);
        assert_eq!(table.len(), 1);
        assert_eq!(table.deregister("a"), Removal::One);
    }

    #[test]
    fn print_unknown_is_error() {
        let table = AliasTable::new();
        assert!(matches!(table.print("x"), Err(ConsoleError::UnknownAlias(name)) if name == "x"));
    }

    #[test]
    fn print_all_is_sorted() {
        let mut table = AliasTable::new();
        table.register("b", "print b").unwrap();
        table.register("a", "print a").unwrap();
        let entries = table.print("all").unwrap();
        assert_eq!(entries, [("a", "print a"), ("b", "print b")]);
    }

    #[test]
    fn from_map_drops_reserved() {
        let mut map = BTreeMap::new();
        map.insert("all".to_string(), "print oops".to_string());
        map.insert("ok".to_string(), "print ok".to_string());
        let table = AliasTable::from_map(map);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("ok"), Some("print ok"));
    }
}
