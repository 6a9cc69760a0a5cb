//! # TUI Components
//!
//! Every panel of the explorer screen, one file each.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from borrowed session data:
//! - `OverviewPane`: preview, `type` / `len` row, docstring
//! - `FilterPanel`: search line and exclusion count
//! - `HelpPanel`: key bindings / about, drawn over the overview
//!
//! ### Stateful Components
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! for one frame:
//! - `ExplorerPane` / `StackView`: lists that keep a `ListState` offset
//! - `Pager`: full-screen scroll view over a `PagerState` (also an
//!   `EventHandler`, since it owns the keyboard while open)
//!
//! ### Props-Based Data Flow
//!
//! Components never reach into `Session` on their own. The caller passes
//! what they show:
//! ```rust,ignore
//! OverviewPane::new(explorer.selected_object(), session.overview).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file, shared text helpers)
//! ├── explorer_pane.rs  (attribute / item list)
//! ├── stack_view.rs     (navigation history tree)
//! ├── filter_panel.rs   (live search line)
//! ├── overview.rs       (right-hand pane)
//! ├── help.rs           (help overlay + help pages)
//! └── pager.rs          (full-screen viewer)
//! ```

pub mod explorer_pane;
pub mod filter_panel;
pub mod help;
pub mod overview;
pub mod pager;
pub mod stack_view;

pub use explorer_pane::ExplorerPane;
pub use filter_panel::FilterPanel;
pub use help::{HelpPanel, help_page};
pub use overview::OverviewPane;
pub use pager::{Pager, PagerEvent, PagerState};
pub use stack_view::StackView;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, ending in "…" if
/// anything was cut.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
