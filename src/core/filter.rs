//! # Filter
//!
//! Live search plus manual exclusions over one node's children.
//!
//! ```text
//! Filter
//! ├── candidates   // snapshot of the node's child lists, never modified
//! ├── search       // buffer being edited, with a byte cursor
//! ├── committed    // last search confirmed with Enter
//! ├── excluded     // names toggled off by hand
//! └── matches      // indices into candidates, recomputed after every edit
//! ```
//!
//! Matching is a case-insensitive substring test on the child's name and
//! keeps the original child order.

use std::collections::HashSet;

use log::debug;

use super::cached::{NodeId, ObjectTree};
use super::explorer::{PerView, View};

#[derive(Debug, Clone)]
struct Entry {
    id: NodeId,
    name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    candidates: PerView<Vec<Entry>>,
    matches: PerView<Vec<usize>>,
    search: String,
    cursor: usize,
    committed: String,
    excluded: HashSet<String>,
    /// Keystrokes go to the search buffer.
    pub receiving_input: bool,
    /// The filter panel is open; excluded names stay listed with a marker.
    pub browsing: bool,
}

impl Filter {
    /// Filter over the children of `node`. Uncached nodes get an empty filter.
    pub fn for_node(tree: &ObjectTree, node: NodeId) -> Self {
        let entries = |ids: &[NodeId]| -> Vec<Entry> {
            ids.iter()
                .map(|&id| Entry {
                    id,
                    name: tree.get(id).name.clone(),
                })
                .collect()
        };
        let candidates = match tree.get(node).children() {
            Some(c) => PerView {
                public: entries(&c.public),
                private: entries(&c.private),
                items: entries(&c.items),
            },
            None => PerView::default(),
        };
        let mut filter = Self {
            candidates,
            ..Self::default()
        };
        filter.refresh();
        filter
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Cursor position in characters, for drawing.
    pub fn cursor(&self) -> usize {
        self.search[..self.cursor].chars().count()
    }

    pub fn is_active(&self) -> bool {
        !self.committed.is_empty() || !self.search.is_empty() || !self.excluded.is_empty()
    }

    pub fn start_search(&mut self) {
        self.receiving_input = true;
        self.cursor = self.search.len();
    }

    pub fn add_char(&mut self, c: char) {
        self.search.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.refresh();
    }

    pub fn backspace(&mut self) {
        let Some(prev) = self.search[..self.cursor].chars().next_back() else {
            return;
        };
        self.cursor -= prev.len_utf8();
        self.search.remove(self.cursor);
        self.refresh();
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.search[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.search[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Keep the current matches and leave input mode.
    pub fn end_search(&mut self) {
        self.committed = self.search.clone();
        self.receiving_input = false;
        debug!("search committed: {:?}", self.committed);
    }

    /// Drop in-progress edits and go back to the last committed search.
    pub fn cancel_search(&mut self) {
        self.search = self.committed.clone();
        self.cursor = self.search.len();
        self.receiving_input = false;
        self.refresh();
    }

    /// Flip the manual exclusion of one attribute.
    pub fn toggle(&mut self, name: &str) {
        if !self.excluded.remove(name) {
            self.excluded.insert(name.to_string());
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn clear_filters(&mut self) {
        self.excluded.clear();
        self.search.clear();
        self.committed.clear();
        self.cursor = 0;
        self.refresh();
    }

    /// Children currently listed for `view`, in original order.
    ///
    /// While browsing, excluded names stay listed so they can be toggled back.
    pub fn visible(&self, view: View) -> Vec<NodeId> {
        let candidates = self.candidates.get(view);
        self.matches
            .get(view)
            .iter()
            .map(|&i| &candidates[i])
            .filter(|entry| self.browsing || !self.excluded.contains(&entry.name))
            .map(|entry| entry.id)
            .collect()
    }

    /// How many children of `view` are not listed right now.
    pub fn hidden_count(&self, view: View) -> usize {
        self.candidates.get(view).len() - self.visible(view).len()
    }

    pub fn total(&self, view: View) -> usize {
        self.candidates.get(view).len()
    }

    fn refresh(&mut self) {
        let needle = self.search.to_lowercase();
        let matching = |entries: &[Entry]| -> Vec<usize> {
            entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.name.to_lowercase().contains(&needle))
                .map(|(i, _)| i)
                .collect()
        };
        self.matches = PerView {
            public: matching(&self.candidates.public),
            private: matching(&self.candidates.private),
            items: matching(&self.candidates.items),
        };
    }
}
