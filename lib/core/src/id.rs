//! Strongly-typed identifiers for assets and jobs.
//!
//! Identifiers wrap a ULID, which gives 128 bits of uniqueness (the same
//! class as a UUID) and sorts by creation time. They display with a short
//! type prefix, e.g. `ast_01HV...` or `job_01HV...`, and serialize as the
//! bare ULID.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Generates a fresh identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of an asset held by the asset registry.
    AssetId,
    "ast"
);

define_id!(
    /// Identifier of a tracked job.
    JobId,
    "job"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn asset_id_display_has_prefix() {
        assert!(AssetId::new().to_string().starts_with("ast_"));
    }

    #[test]
    fn job_id_display_has_prefix() {
        assert!(JobId::new().to_string().starts_with("job_"));
    }

    #[test]
    fn ids_sort_by_creation() {
        let first = AssetId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = AssetId::new();
        assert!(first < second);
    }

    #[test]
    fn fresh_ids_are_distinct() {
        let ids: HashSet<AssetId> = (0..64).map(|_| AssetId::new()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn serializes_as_bare_ulid() {
        let id = AssetId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let bare = id.to_string().trim_start_matches("ast_").to_string();
        assert_eq!(json, format!("\"{bare}\""));
        let parsed: AssetId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
