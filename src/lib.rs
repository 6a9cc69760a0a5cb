//! objscope: an interactive terminal explorer for object graphs.
//!
//! Anything implementing [`Inspect`] can be opened with [`explore`]:
//!
//! ```no_run
//! use objscope::Inspect;
//! use objscope::object::json::JsonNode;
//!
//! let doc = JsonNode::parse(r#"{"name": "demo", "tags": ["a", "b"]}"#).unwrap();
//! if let Some(picked) = objscope::explore(doc.into_ref(), "doc") {
//!     println!("picked a {}", picked.type_name());
//! }
//! ```
//!
//! The explorer takes over the terminal until the user quits (`q`, giving
//! `None`) or returns the selected object (`r`).

use std::error::Error as _;

use log::error;

pub mod core;
pub mod object;
pub mod tui;

#[cfg(test)]
mod test_support;

pub use crate::core::ExploreError;
pub use crate::core::config::ResolvedConfig;
pub use crate::object::{Inspect, ObjectRef};

use crate::core::Session;

/// Explore `object` with default settings.
///
/// Returns the object picked with `r`, or `None` on quit. A terminal failure
/// is logged, reported on stderr and also gives `None`.
pub fn explore(object: ObjectRef, name: &str) -> Option<ObjectRef> {
    explore_with_config(object, name, &ResolvedConfig::default())
}

/// [`explore`] with explicit settings.
pub fn explore_with_config(
    object: ObjectRef,
    name: &str,
    config: &ResolvedConfig,
) -> Option<ObjectRef> {
    match try_explore(object, name, config) {
        Ok(selected) => selected,
        Err(err) => {
            error!("exploring `{name}` failed: {err}");
            eprintln!("{}", diagnostic(&err));
            None
        }
    }
}

/// Like [`explore_with_config`], but hands unrecoverable errors back.
pub fn try_explore(
    object: ObjectRef,
    name: &str,
    config: &ResolvedConfig,
) -> Result<Option<ObjectRef>, ExploreError> {
    let session = Session::new(object, name, config.limits);
    tui::run(session, config)
}

/// The error followed by its chain of causes, one per line.
pub fn diagnostic(err: &ExploreError) -> String {
    let mut out = format!("objscope: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    out
}
