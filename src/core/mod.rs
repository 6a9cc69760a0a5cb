//! # Core Exploration Logic
//!
//! This module contains objscope's navigation engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Key (events)         │
//!                    │  • handle_key()         │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cached`]: `ObjectTree` / `CachedObject`, the lazily built node cache
//! - [`filter`]: live search and manual exclusions
//! - [`stack`]: navigation history
//! - [`explorer`]: selection, views, descend / ascend
//! - [`overview`]: right pane render modes and pager pages
//! - [`state`]: the `Session` struct, all session state in one place
//! - [`action`]: `Key`, `Effect` and `handle_key()`
//! - [`config`]: settings file and override hierarchy
//! - [`error`]: `ExploreError`

pub mod action;
pub mod cached;
pub mod config;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod overview;
pub mod stack;
pub mod state;

pub use action::{Effect, Key, handle_key};
pub use error::ExploreError;
pub use state::Session;
