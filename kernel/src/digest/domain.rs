//! Typed domain separators for canonical hashing.
//!
//! Every hash computation selects a domain via [`HashDomain`]; adding a
//! domain is a single line in the macro invocation below.

/// Declares `HashDomain`, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Each variant maps to a unique, null-terminated prefix fed to
        /// SHA-256 ahead of the payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domains in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical puzzle-set encoding (binds a report to its input).
    PuzzleSet => b"CATENA::PUZZLE_SET::V1\0",

    /// Search report, timing fields excluded.
    SearchReport => b"CATENA::SEARCH_REPORT::V1\0",

    /// Chain (ordered puzzle ids) fingerprint.
    Chain => b"CATENA::CHAIN::V1\0",
}
