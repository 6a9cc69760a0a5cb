//! Errors raised while handling a key.
//!
//! Everything except [`ExploreError::Terminal`] is recoverable: the event
//! loop flashes the border and keeps going.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("`{path}` has nothing to explore")]
    NotExplorable { path: String },

    #[error("no attribute is selected")]
    NothingSelected,

    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),
}

impl ExploreError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ExploreError::Terminal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_terminal_errors_are_fatal() {
        let err = ExploreError::from(io::Error::other("gone"));
        assert!(!err.is_recoverable());
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("gone"));
    }

    #[test]
    fn test_navigation_errors_are_recoverable() {
        let err = ExploreError::NotExplorable { path: "root.a".into() };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "`root.a` has nothing to explore");
    }
}
