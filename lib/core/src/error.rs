//! Shared error plumbing for agency-toolkit.
//!
//! Every crate in the workspace owns its error enums (`SchemaError`,
//! `TransformError`, `IoError`, ...) and returns them wrapped in a rootcause
//! `Report`. Callers higher up the stack wrap lower reports with their own
//! context through `.context()`, so a failing workflow step surfaces as
//! "step failed" over "workflow failed" over "generator failed".

use rootcause::Report;

/// Result alias over a rootcause [`Report`].
///
/// `C` is the outermost context type; `()` means an untyped report.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Renders a report as its context messages, outermost first, joined with
/// `": "`. Source locations and tree glyphs are left out.
pub fn message_chain<C: ?Sized>(report: &Report<C>) -> String {
    report
        .iter_reports()
        .map(|node| node.format_current_context().to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootcause::prelude::*;
    use std::fmt;

    #[derive(Debug)]
    struct Missing(&'static str);

    impl fmt::Display for Missing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "missing {}", self.0)
        }
    }

    impl std::error::Error for Missing {}

    fn lookup(found: bool) -> Result<u8, Missing> {
        if found {
            Ok(7)
        } else {
            Err(Missing("entry").into())
        }
    }

    #[test]
    fn ok_passes_through() {
        assert_eq!(lookup(true).expect("should be ok"), 7);
    }

    #[test]
    fn error_keeps_its_message() {
        let err = lookup(false).expect_err("should fail");
        assert!(err.to_string().contains("missing entry"));
    }

    #[test]
    fn message_chain_of_single_report_is_its_message() {
        let err = lookup(false).expect_err("should fail");
        assert_eq!(message_chain(&err), "missing entry");
    }

    #[test]
    fn message_chain_joins_contexts_outermost_first() {
        let err = lookup(false)
            .context(Missing("index"))
            .expect_err("should fail");
        assert_eq!(message_chain(&err), "missing index: missing entry");
    }
}
