//! Train identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Advertised identifier of one train run, e.g. `"43212"`.
///
/// Unique within a day. Used to join the list phase of a query to the
/// detail phase; never stored beyond a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainIdent(String);

impl TrainIdent {
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
