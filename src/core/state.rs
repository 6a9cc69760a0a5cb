//! # Session State
//!
//! Everything one exploring session needs, in one place. No terminal types.
//!
//! ```text
//! Session
//! ├── explorer: Explorer       // left pane: tree, selection, filter, stack
//! ├── overview: Overview       // right pane render modes
//! ├── mode: Mode               // which overlay owns the keyboard
//! ├── help_pane: HelpPane      // key bindings / about
//! ├── border: BorderStyle      // Alert while an error is flashed
//! └── last_error: Option<String>
//! ```
//!
//! State changes only happen through `handle_key()` in action.rs and the
//! alert helpers below.

use log::{debug, warn};

use super::cached::DisplayLimits;
use super::error::ExploreError;
use super::explorer::Explorer;
use super::overview::Overview;
use crate::object::ObjectRef;

/// Which part of the UI receives keys. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    StackBrowsing,
    FilterBrowsing,
    FilterInput,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpPane {
    #[default]
    KeyBindings,
    About,
}

impl HelpPane {
    pub fn toggle(self) -> Self {
        match self {
            HelpPane::KeyBindings => HelpPane::About,
            HelpPane::About => HelpPane::KeyBindings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Normal,
    Alert,
}

#[derive(Debug)]
pub struct Session {
    pub explorer: Explorer,
    pub overview: Overview,
    pub help_pane: HelpPane,
    pub border: BorderStyle,
    pub last_error: Option<String>,
    mode: Mode,
    /// Mode to go back to when help closes.
    behind_help: Mode,
}

impl Session {
    pub fn new(root: ObjectRef, name: &str, limits: DisplayLimits) -> Self {
        Self {
            explorer: Explorer::new(root, name, limits),
            overview: Overview::default(),
            help_pane: HelpPane::default(),
            border: BorderStyle::default(),
            last_error: None,
            mode: Mode::Normal,
            behind_help: Mode::Normal,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes, keeping the filter panel flags in step.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        debug!("mode {:?} -> {:?}", self.mode, mode);
        if mode == Mode::Help {
            self.behind_help = self.mode;
        }
        self.mode = mode;
        let (browsing, input) = match mode {
            Mode::FilterBrowsing => (true, false),
            Mode::FilterInput => (true, true),
            // Help sits on top of whatever was open.
            Mode::Help => return,
            _ => (false, false),
        };
        self.explorer.update_filter(|filter| {
            filter.browsing = browsing;
            filter.receiving_input = input;
        });
    }

    pub fn close_help(&mut self) {
        let back = self.behind_help;
        self.behind_help = Mode::Normal;
        self.mode = back;
    }

    /// The mode drawn beneath the help overlay, or the current one.
    pub fn underlying_mode(&self) -> Mode {
        match self.mode {
            Mode::Help => self.behind_help,
            mode => mode,
        }
    }

    /// Start the error flash for a recoverable failure.
    pub fn raise_alert(&mut self, err: &ExploreError) {
        warn!("key handling failed: {err}");
        self.border = BorderStyle::Alert;
        self.last_error = Some(err.to_string());
    }

    pub fn clear_alert(&mut self) {
        self.border = BorderStyle::Normal;
    }
}
