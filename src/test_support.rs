//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use serde_json::json;

use crate::core::cached::DisplayLimits;
use crate::core::explorer::Explorer;
use crate::core::state::Session;
use crate::object::{AccessError, ObjectRef, Record, value};

/// Public `a`, `b`, `c` and private `_x`. Only `b` can be explored.
pub fn sample_object() -> ObjectRef {
    let b = Record::new("Inner")
        .attr("q", value(json!(true)))
        .attr("r", value(json!(null)))
        .into_ref();
    Record::new("Sample")
        .with_doc("A small object for tests.")
        .attr("c", value(json!("three")))
        .attr("a", value(json!(1)))
        .attr("_x", value(json!(4.5)))
        .attr("b", b)
        .into_ref()
}

/// `fine`, `zeta` and a `broken` getter that always fails.
pub fn flaky_object() -> ObjectRef {
    Record::new("Flaky")
        .attr("zeta", value(json!([1, 2])))
        .getter("broken", || Err(AccessError::Raised("getter exploded".into())))
        .attr("fine", value(json!("ok")))
        .into_ref()
}

/// `depth` levels of `child` attributes, ending in an object with one `leaf`.
pub fn nested_object(depth: usize) -> ObjectRef {
    let mut obj = Record::new("Leafy").attr("leaf", value(json!(0))).into_ref();
    for _ in 0..depth {
        obj = Record::new("Level").attr("child", obj).into_ref();
    }
    obj
}

pub fn sample_explorer() -> Explorer {
    Explorer::new(sample_object(), "root", DisplayLimits::default())
}

pub fn sample_session() -> Session {
    Session::new(sample_object(), "root", DisplayLimits::default())
}

pub fn flaky_session() -> Session {
    Session::new(flaky_object(), "root", DisplayLimits::default())
}

pub fn nested_session(depth: usize) -> Session {
    Session::new(nested_object(depth), "root", DisplayLimits::default())
}

/// Everything drawn on a test terminal, one line per row.
pub fn screen(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width).max(1))
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
