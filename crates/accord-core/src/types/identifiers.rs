//! String-backed ID types.
//!
//! Each ID type wraps its own `String` so a `CallId` cannot be passed
//! where a `ContractId` is expected.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mint a fresh random identifier.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Contract identifier.
    ContractId,
    "ct"
);

define_id!(
    /// Frontend call-site identifier.
    CallId,
    "call"
);

define_id!(
    /// Field mismatch identifier.
    MismatchId,
    "mm"
);

impl ContractId {
    /// Deterministic identity for a `(method, normalized path)` pair.
    ///
    /// The same endpoint yields the same id across runs, which is what a
    /// store merges on.
    pub fn for_endpoint(method: &str, normalized_path: &str) -> Self {
        let key = format!("{}:{}", method.to_ascii_uppercase(), normalized_path);
        Self(format!("ct_{:016x}", xxh3_64(key.as_bytes())))
    }
}
