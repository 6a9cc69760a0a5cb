//! # Navigation Stack
//!
//! History of the nodes above the one currently open. The top frame is
//! always the parent of the current node, and the stack is empty exactly
//! at the root.
//!
//! ```text
//! frames[0]   root       selection: 1   ← cursor 0
//! frames[1]   root.b     selection: 0   ← cursor 1
//! (current)   root.b.q                  ← cursor 2 == len
//! ```
//!
//! The cursor is only used while the stack view is open. It ranges over
//! every frame plus one extra slot for the current node.

use super::cached::NodeId;
use super::explorer::{PerView, View};
use super::filter::Filter;

/// Everything needed to come back to a node exactly as it was left.
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub node: NodeId,
    pub view: View,
    pub selection: PerView<usize>,
    pub filter: Filter,
}

impl StackFrame {
    /// Selection index in the view that was active when the node was left.
    pub fn active_selection(&self) -> usize {
        *self.selection.get(self.view)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    frames: Vec<StackFrame>,
    cursor: usize,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Open the stack view with the cursor on the current node.
    pub fn begin_browsing(&mut self) {
        self.cursor = self.frames.len();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
    }

    pub fn move_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_bottom(&mut self) {
        self.cursor = self.frames.len();
    }

    /// Jump to the frame under the cursor, discarding every frame above it
    /// in one step. Returns `None` when the cursor is on the current node.
    pub fn select(&mut self) -> Option<StackFrame> {
        if self.cursor >= self.frames.len() {
            return None;
        }
        self.frames.truncate(self.cursor + 1);
        let frame = self.frames.pop();
        self.cursor = self.frames.len();
        frame
    }
}
