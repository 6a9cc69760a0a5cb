//! # Explorer
//!
//! The left-hand pane's state: which node is open, which of its child lists
//! is shown, what is selected, and how to move up and down the graph.
//!
//! ```text
//! Explorer
//! ├── tree: ObjectTree        // owns every cached node
//! ├── current: NodeId         // node whose children are listed
//! ├── view: View              // public / private / items
//! ├── selection: PerView      // one index per view, each clamped to its list
//! ├── filter: Filter          // search + exclusions for `current`
//! ├── stack: NavigationStack  // frames above `current`
//! └── width_offset: i16       // layout only
//! ```

use std::mem;

use log::debug;

use super::cached::{CachedObject, DisplayLimits, NodeId, ObjectTree};
use super::error::ExploreError;
use super::filter::Filter;
use super::overview::{Page, inspect_report};
use super::stack::{NavigationStack, StackFrame};
use crate::object::ObjectRef;

/// Narrowest the explorer pane may get.
pub const MIN_PANE_WIDTH: u16 = 12;
/// Columns always left for the overview pane.
pub const OVERVIEW_RESERVE: u16 = 20;

const DEFAULT_TERMINAL_WIDTH: u16 = 80;

/// Which child list of the current node is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Public,
    Private,
    /// Indexed entries of a container.
    Items,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Public => "public",
            View::Private => "private",
            View::Items => "items",
        }
    }

    fn initial(node: &CachedObject) -> Self {
        if node.is_container() {
            View::Items
        } else {
            View::Public
        }
    }

    fn next(self, container: bool) -> Self {
        match (self, container) {
            (View::Items, _) => View::Public,
            (View::Public, _) => View::Private,
            (View::Private, true) => View::Items,
            (View::Private, false) => View::Public,
        }
    }
}

/// One value for each [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerView<T> {
    pub public: T,
    pub private: T,
    pub items: T,
}

impl<T> PerView<T> {
    pub fn get(&self, view: View) -> &T {
        match view {
            View::Public => &self.public,
            View::Private => &self.private,
            View::Items => &self.items,
        }
    }

    pub fn get_mut(&mut self, view: View) -> &mut T {
        match view {
            View::Public => &mut self.public,
            View::Private => &mut self.private,
            View::Items => &mut self.items,
        }
    }
}

#[derive(Debug)]
pub struct Explorer {
    tree: ObjectTree,
    current: NodeId,
    view: View,
    selection: PerView<usize>,
    filter: Filter,
    stack: NavigationStack,
    width_offset: i16,
    terminal_width: u16,
}

impl Explorer {
    pub fn new(root: ObjectRef, name: &str, limits: DisplayLimits) -> Self {
        let mut tree = ObjectTree::new(root, name, limits);
        tree.cache_children(NodeId::ROOT);
        let view = View::initial(tree.root());
        let filter = Filter::for_node(&tree, NodeId::ROOT);
        Self {
            tree,
            current: NodeId::ROOT,
            view,
            selection: PerView::default(),
            filter,
            stack: NavigationStack::new(),
            width_offset: 0,
            terminal_width: DEFAULT_TERMINAL_WIDTH,
        }
    }

    pub fn tree(&self) -> &ObjectTree {
        &self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_node(&self) -> &CachedObject {
        self.tree.get(self.current)
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Selection index in the active view.
    pub fn selection(&self) -> usize {
        *self.selection.get(self.view)
    }

    fn selection_mut(&mut self) -> &mut usize {
        self.selection.get_mut(self.view)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut NavigationStack {
        &mut self.stack
    }

    /// Children listed in the active view after filtering.
    pub fn visible(&self) -> Vec<NodeId> {
        self.filter.visible(self.view)
    }

    pub fn hidden_count(&self) -> usize {
        self.filter.hidden_count(self.view)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.visible().get(self.selection()).copied()
    }

    pub fn selected_object(&self) -> Option<&CachedObject> {
        self.selected().map(|id| self.tree.get(id))
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn move_up(&mut self) {
        let selection = self.selection_mut();
        *selection = selection.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        let selection = self.selection_mut();
        if *selection + 1 < len {
            *selection += 1;
        }
    }

    pub fn move_top(&mut self) {
        *self.selection_mut() = 0;
    }

    pub fn move_bottom(&mut self) {
        *self.selection_mut() = self.visible().len().saturating_sub(1);
    }

    /// Clamps the active view's index only; the others keep their place.
    fn clamp_selection(&mut self) {
        let last = self.visible().len().saturating_sub(1);
        let selection = self.selection_mut();
        *selection = (*selection).min(last);
    }

    pub fn toggle_visibility(&mut self) {
        self.view = self.view.next(self.current_node().is_container());
        self.clamp_selection();
        debug!("view switched to {}", self.view.label());
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Open the selected child, remembering where we were.
    pub fn explore_selected_object(&mut self) -> Result<(), ExploreError> {
        let child = self.selected().ok_or(ExploreError::NothingSelected)?;
        if !self.tree.get(child).is_accessible() {
            return Err(self.not_explorable(child));
        }
        self.tree.cache_children(child);
        if !self.tree.get(child).is_navigable() {
            return Err(self.not_explorable(child));
        }

        let mut filter = Filter::for_node(&self.tree, child);
        filter.browsing = self.filter.browsing;
        let frame = StackFrame {
            node: self.current,
            view: self.view,
            selection: mem::take(&mut self.selection),
            filter: mem::replace(&mut self.filter, filter),
        };
        self.stack.push(frame);
        self.current = child;
        self.view = View::initial(self.tree.get(child));
        debug!(
            "descended into {} (depth {})",
            self.current_node().dotpath,
            self.stack.depth()
        );
        Ok(())
    }

    /// Go back to the parent. Returns false at the root.
    pub fn explore_parent_obj(&mut self) -> bool {
        match self.stack.pop() {
            Some(frame) => {
                self.restore(frame);
                true
            }
            None => false,
        }
    }

    /// Jump to the ancestor under the stack cursor. Returns false if the
    /// cursor is on the current node.
    pub fn explore_selected_stack_object(&mut self) -> bool {
        match self.stack.select() {
            Some(frame) => {
                self.restore(frame);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, frame: StackFrame) {
        let browsing = self.filter.browsing;
        self.current = frame.node;
        self.view = frame.view;
        self.selection = frame.selection;
        self.filter = frame.filter;
        self.filter.browsing = browsing;
        self.filter.receiving_input = false;
        self.clamp_selection();
        debug!(
            "returned to {} (depth {})",
            self.current_node().dotpath,
            self.stack.depth()
        );
    }

    /// Inspection report for the selected child, caching its children first.
    pub fn inspect_selected(&mut self) -> Result<Page, ExploreError> {
        let id = self.selected().ok_or(ExploreError::NothingSelected)?;
        self.tree.cache_children(id);
        Ok(inspect_report(&self.tree, id))
    }

    fn not_explorable(&self, id: NodeId) -> ExploreError {
        ExploreError::NotExplorable {
            path: self.tree.get(id).dotpath.clone(),
        }
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Apply an edit to the filter, then clamp the selection to what is left.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut Filter)) {
        edit(&mut self.filter);
        self.clamp_selection();
    }

    /// Flip the exclusion of the selected attribute.
    pub fn toggle_selected_filter(&mut self) -> Result<(), ExploreError> {
        let name = self
            .selected_object()
            .map(|node| node.name.clone())
            .ok_or(ExploreError::NothingSelected)?;
        self.update_filter(|filter| filter.toggle(&name));
        Ok(())
    }

    // ========================================================================
    // Width
    // ========================================================================

    pub fn set_terminal_width(&mut self, width: u16) {
        self.terminal_width = width;
    }

    /// Explorer pane width for a terminal `total` columns wide.
    pub fn pane_width(&self, total: u16) -> u16 {
        let base = i32::from(total.saturating_sub(2) / 4);
        let max = total.saturating_sub(OVERVIEW_RESERVE).max(MIN_PANE_WIDTH);
        let width = (base + i32::from(self.width_offset)).max(0);
        u16::try_from(width).unwrap_or(u16::MAX).clamp(MIN_PANE_WIDTH, max)
    }

    pub fn increase_width(&mut self) {
        let max = self
            .terminal_width
            .saturating_sub(OVERVIEW_RESERVE)
            .max(MIN_PANE_WIDTH);
        let width = self.pane_width(self.terminal_width);
        if width < max {
            self.set_width(width + 1);
        }
    }

    pub fn decrease_width(&mut self) {
        let width = self.pane_width(self.terminal_width);
        if width > MIN_PANE_WIDTH {
            self.set_width(width - 1);
        }
    }

    pub fn reset_width(&mut self) {
        self.width_offset = 0;
    }

    fn set_width(&mut self, width: u16) {
        let base = i32::from(self.terminal_width.saturating_sub(2) / 4);
        let offset = i32::from(width) - base;
        self.width_offset = i16::try_from(offset).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::value;
    use crate::test_support::{nested_object, sample_explorer};
    use serde_json::json;

    fn selected_name(explorer: &Explorer) -> Option<String> {
        explorer.selected_object().map(|n| n.name.clone())
    }

    #[test]
    fn test_root_starts_on_public_view() {
        let explorer = sample_explorer();
        assert_eq!(explorer.view(), View::Public);
        assert_eq!(selected_name(&explorer).as_deref(), Some("a"));
        assert!(explorer.stack().is_empty());
    }

    #[test]
    fn test_moves_are_clamped() {
        let mut explorer = sample_explorer();
        explorer.move_up();
        assert_eq!(explorer.selection(), 0);
        explorer.move_bottom();
        explorer.move_down();
        assert_eq!(explorer.selection(), 2);
        explorer.move_top();
        assert_eq!(explorer.selection(), 0);
    }

    #[test]
    fn test_descend_then_ascend_restores_selection() {
        let mut explorer = sample_explorer();
        explorer.move_down();
        explorer.explore_selected_object().unwrap();
        assert_eq!(explorer.current_node().dotpath, "root.b");
        assert_eq!(explorer.stack().depth(), 1);
        assert_eq!(explorer.selection(), 0);
        assert!(explorer.explore_parent_obj());
        assert_eq!(explorer.current(), NodeId::ROOT);
        assert_eq!(explorer.selection(), 1);
        assert_eq!(selected_name(&explorer).as_deref(), Some("b"));
        assert!(!explorer.explore_parent_obj());
    }

    #[test]
    fn test_leaf_cannot_be_explored() {
        let mut explorer = sample_explorer();
        let err = explorer.explore_selected_object().unwrap_err();
        assert!(matches!(err, ExploreError::NotExplorable { ref path } if path == "root.a"));
        assert!(explorer.stack().is_empty());
    }

    #[test]
    fn test_toggle_visibility_clamps_selection() {
        let mut explorer = sample_explorer();
        explorer.move_bottom();
        explorer.toggle_visibility();
        assert_eq!(explorer.view(), View::Private);
        assert_eq!(explorer.selection(), 0);
        assert_eq!(selected_name(&explorer).as_deref(), Some("_x"));
        explorer.toggle_visibility();
        assert_eq!(explorer.view(), View::Public);
    }

    #[test]
    fn test_each_view_keeps_its_own_selection() {
        let mut explorer = sample_explorer();
        explorer.move_bottom();
        explorer.toggle_visibility();
        explorer.toggle_visibility();
        assert_eq!(explorer.selection(), 2);
        assert_eq!(selected_name(&explorer).as_deref(), Some("c"));
    }

    #[test]
    fn test_ascend_restores_every_view_index() {
        let mut explorer = sample_explorer();
        explorer.move_down();
        explorer.toggle_visibility();
        explorer.toggle_visibility();
        explorer.explore_selected_object().unwrap();
        explorer.explore_parent_obj();
        assert_eq!(selected_name(&explorer).as_deref(), Some("b"));
        explorer.toggle_visibility();
        assert_eq!(selected_name(&explorer).as_deref(), Some("_x"));
        explorer.toggle_visibility();
        assert_eq!(selected_name(&explorer).as_deref(), Some("b"));
    }

    #[test]
    fn test_container_cycles_through_items() {
        let mut explorer = Explorer::new(value(json!([1, 2])), "xs", DisplayLimits::default());
        assert_eq!(explorer.view(), View::Items);
        assert_eq!(selected_name(&explorer).as_deref(), Some("[0]"));
        explorer.toggle_visibility();
        assert_eq!(explorer.view(), View::Public);
        assert_eq!(explorer.selected(), None);
        explorer.toggle_visibility();
        explorer.toggle_visibility();
        assert_eq!(explorer.view(), View::Items);
    }

    #[test]
    fn test_stack_jump_discards_intermediate_levels() {
        let mut explorer = Explorer::new(nested_object(3), "root", DisplayLimits::default());
        for _ in 0..3 {
            explorer.explore_selected_object().unwrap();
        }
        assert_eq!(explorer.stack().depth(), 3);
        explorer.stack_mut().begin_browsing();
        explorer.stack_mut().move_up();
        explorer.stack_mut().move_up();
        assert!(explorer.explore_selected_stack_object());
        assert_eq!(explorer.stack().depth(), 1);
        assert_eq!(explorer.current_node().dotpath, "root.child");
    }

    #[test]
    fn test_filter_is_restored_on_ascend() {
        let mut explorer = sample_explorer();
        explorer.update_filter(|f| {
            f.start_search();
            f.add_char('b');
            f.end_search();
        });
        explorer.explore_selected_object().unwrap();
        assert_eq!(explorer.filter().search_text(), "");
        explorer.explore_parent_obj();
        assert_eq!(explorer.filter().search_text(), "b");
        assert_eq!(selected_name(&explorer).as_deref(), Some("b"));
    }

    #[test]
    fn test_filter_clamps_selection() {
        let mut explorer = sample_explorer();
        explorer.move_bottom();
        explorer.update_filter(|f| {
            f.start_search();
            f.add_char('a');
        });
        assert_eq!(explorer.selection(), 0);
        assert_eq!(selected_name(&explorer).as_deref(), Some("a"));
    }

    #[test]
    fn test_pane_width_bounds() {
        let mut explorer = sample_explorer();
        explorer.set_terminal_width(82);
        assert_eq!(explorer.pane_width(82), 20);
        for _ in 0..200 {
            explorer.decrease_width();
        }
        assert_eq!(explorer.pane_width(82), MIN_PANE_WIDTH);
        for _ in 0..200 {
            explorer.increase_width();
        }
        assert_eq!(explorer.pane_width(82), 62);
        explorer.decrease_width();
        assert_eq!(explorer.pane_width(82), 61);
        explorer.reset_width();
        assert_eq!(explorer.pane_width(82), 20);
    }
}
