use acadexa_intent::Intent;
use thiserror::Error;

use crate::principal::Role;

/// Failures raised by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset could not be decoded.
    #[error("Failed to decode dataset: {0}")]
    Decode(#[from] serde_json::Error),

    /// The dataset decoded but contradicts itself.
    #[error("Inconsistent dataset: {0}")]
    Inconsistent(String),

    /// Any other backend failure.
    #[error("Record store backend error: {0}")]
    Backend(String),
}

/// Errors that [`Dispatcher::submit_command`](crate::Dispatcher::submit_command)
/// surfaces to its caller.
///
/// Unmatched commands and missing records are not errors; they come back as
/// ordinary envelopes.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The principal may not run this intent against this target. The message
    /// never says whether the target exists.
    #[error("Not authorized to perform '{intent}'")]
    Unauthorized {
        /// The intent that was refused.
        intent: Intent,
    },

    /// The role needs a linked profile and the account has none.
    #[error("Account with role '{role}' is not linked to a {role} profile")]
    ProfileNotLinked {
        /// The caller's role.
        role: Role,
    },

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A result row could not be turned into JSON.
    #[error("Failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DispatchError {
    /// Stable machine-readable tag for the transport layer.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Unauthorized { .. } => "forbidden",
            DispatchError::ProfileNotLinked { .. } => "profile_not_linked",
            DispatchError::Store(_) => "store_failure",
            DispatchError::Encode(_) => "encode_failure",
        }
    }
}

/// A role name outside the closed set.
#[derive(Debug, Error)]
#[error("'{0}' is not a known role")]
pub struct UnknownRole(pub String);

/// An assessment category name outside the closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not an assessment category")]
pub struct UnknownCategory(pub String);
