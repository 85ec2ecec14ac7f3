//! Back/forward history over committed input lines.
//!
//! A recalled line sits between the two stacks and belongs to neither, the
//! same way a browser's current page sits between its back and forward
//! lists.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    back: Vec<String>,
    forward: Vec<String>,
    recalled: Option<String>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed line. Clears the forward stack.
    pub fn commit(&mut self, line: &str) {
        if let Some(recalled) = self.recalled.take() {
            self.back.push(recalled);
        }
        self.back.push(line.to_string());
        self.forward.clear();
    }

    /// Step to an older line. `None` (and no change) when there is nothing
    /// older.
    pub fn navigate_back(&mut self) -> Option<String> {
        let line = self.back.pop()?;
        if let Some(recalled) = self.recalled.replace(line.clone()) {
            self.forward.push(recalled);
        }
        Some(line)
    }

    /// Step to a newer line. `None` means the composing line goes back to
    /// empty.
    pub fn navigate_forward(&mut self) -> Option<String> {
        if let Some(recalled) = self.recalled.take() {
            self.back.push(recalled);
        }
        let line = self.forward.pop()?;
        self.recalled = Some(line.clone());
        Some(line)
    }

    /// The composing line was edited: forward history is discarded.
    pub fn edit(&mut self) {
        if let Some(recalled) = self.recalled.take() {
            self.back.push(recalled);
        }
        self.forward.clear();
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Every remembered line, oldest first.
    pub fn entries(&self) -> Vec<&str> {
        self.back
            .iter()
            .chain(self.recalled.iter())
            .chain(self.forward.iter().rev())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_back_forward() {
        let mut h = HistoryStack::new();
        h.commit("a");
        h.commit("b");
        assert_eq!(h.navigate_back().as_deref(), Some("b"));
        assert_eq!(h.navigate_back().as_deref(), Some("a"));
        assert_eq!(h.navigate_forward().as_deref(), Some("b"));
    }

    #[test]
    fn commit_clears_forward() {
        let mut h = HistoryStack::new();
        h.commit("a");
        h.commit("b");
        h.navigate_back();
        h.navigate_back();
        h.navigate_forward();
        h.commit("c");
        assert!(!h.can_go_forward());
        assert_eq!(h.navigate_forward(), None);
    }

    #[test]
    fn back_on_empty_is_none() {
        let mut h = HistoryStack::new();
        assert_eq!(h.navigate_back(), None);
        assert_eq!(h.navigate_forward(), None);
    }

    #[test]
    fn back_stops_at_oldest() {
        let mut h = HistoryStack::new();
        h.commit("a");
        assert_eq!(h.navigate_back().as_deref(), Some("a"));
        assert_eq!(h.navigate_back(), None);
        assert_eq!(h.entries(), ["a"]);
    }

    #[test]
    fn forward_past_newest_returns_to_empty() {
        let mut h = HistoryStack::new();
        h.commit("a");
        h.navigate_back();
        assert_eq!(h.navigate_forward(), None);
        assert_eq!(h.navigate_back().as_deref(), Some("a"));
    }

    #[test]
    fn edit_discards_forward() {
        let mut h = HistoryStack::new();
        h.commit("a");
        h.commit("b");
        h.navigate_back();
        h.navigate_back();
        h.edit();
        assert!(!h.can_go_forward());
        assert_eq!(h.entries(), ["a"]);
    }

    #[test]
    fn entries_oldest_first() {
        let mut h = HistoryStack::new();
        h.commit("a");
        h.commit("b");
        h.commit("c");
        h.navigate_back();
        h.navigate_back();
        assert_eq!(h.entries(), ["a", "b", "c"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn back_then_forward_returns_to_same(lines in proptest::collection::vec("[a-z]{1,6}", 3..10)) {
                let mut h = HistoryStack::new();
                for line in &lines {
                    h.commit(line);
                }
                h.navigate_back();
                let older = h.navigate_back();
                h.navigate_back();
                let again = h.navigate_forward();
                prop_assert_eq!(older, again);
            }

            #[test]
            fn navigation_never_loses_lines(
                lines in proptest::collection::vec("[a-z]{1,6}", 1..10),
                moves in proptest::collection::vec(any::<bool>(), 0..20),
            ) {
                let mut h = HistoryStack::new();
                for line in &lines {
                    h.commit(line);
                }
                for back in moves {
                    if back { h.navigate_back(); } else { h.navigate_forward(); }
                }
                let expected: Vec<&str> = lines.iter().map(String::as_str).collect();
                prop_assert_eq!(h.entries(), expected);
            }
        }
    }
}
