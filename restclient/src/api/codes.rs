//! Domain error codes reported by an API in its error bodies

use std::collections::HashMap;
use std::fmt::Debug;

/// A closed set of named error codes an API can return.
///
/// Each member has a stable `code` (the value found in response bodies) and
/// a human readable `name`.
pub trait ErrorCode: Debug + Clone + Send + Sync + 'static {
    fn code(&self) -> &str;

    fn name(&self) -> &str;

    /// Every member of the set.
    fn all() -> &'static [Self];

    /// Lookup table from code to member.
    fn by_code() -> HashMap<String, Self> {
        Self::all()
            .iter()
            .map(|member| (member.code().to_string(), member.clone()))
            .collect()
    }
}

/// Error-code set with no members, for APIs without domain error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoErrorCode {}

impl ErrorCode for NoErrorCode {
    fn code(&self) -> &str {
        match *self {}
    }

    fn name(&self) -> &str {
        match *self {}
    }

    fn all() -> &'static [Self] {
        &[]
    }
}
