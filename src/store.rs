use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::{encode_preserving, SUBMITTED_FOR_APPROVAL_GUARD};
use crate::types::{Conjunction, Element, Triggers};

/// The only script call this editor assigns to a policy.
pub const REQUEST_APPROVAL_BY_USERS: &str = "ApprovalRequests.request_approval_by_users";

/// Parameters of the approval-request script call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptParams {
    pub user_ids: Vec<String>,
    pub required_approval_count: u32,
}

/// One `{call, params}` entry of a policy's script.
///
/// The script editor itself is out of scope; this crate only emits the call
/// alongside the trigger on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCall {
    pub call: String,
    pub params: ScriptParams,
}

impl ScriptCall {
    /// The request-approval-by-users call with the given approver ids.
    #[must_use]
    pub fn request_approval_by_users(user_ids: Vec<String>, required_approval_count: u32) -> Self {
        ScriptCall {
            call: REQUEST_APPROVAL_BY_USERS.to_owned(),
            params: ScriptParams {
                user_ids,
                required_approval_count,
            },
        }
    }
}

/// The save-request body: the whole committed triggers plus the non-trigger
/// fields, in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyPayload {
    pub name: String,
    pub description: String,
    pub trigger: Conjunction,
    pub script: Vec<ScriptCall>,
}

impl PolicyPayload {
    /// Assemble a save request from committed triggers.
    ///
    /// `unmatched` carries the decoder-preserved foreign elements forward;
    /// pass an empty slice for a policy built from scratch.
    #[must_use]
    pub fn build(
        name: &str,
        description: &str,
        triggers: &Triggers,
        unmatched: &[Element],
        script: ScriptCall,
    ) -> Self {
        PolicyPayload {
            name: name.to_owned(),
            description: description.to_owned(),
            trigger: encode_preserving(triggers, SUBMITTED_FOR_APPROVAL_GUARD, unmatched),
            script: vec![script],
        }
    }
}

/// A policy resource as returned by the server, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResource {
    pub id: String,
    pub name: String,
    pub description: String,
    pub trigger: Conjunction,
    pub script: Vec<ScriptCall>,
}

/// A rejected fetch or save.
///
/// Non-fatal and retryable: the caller's triggers working copy is never
/// touched by a failed save, so nothing is lost on resubmit.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("approval policy '{0}' not found")]
    NotFound(String),

    #[error("save rejected: {0}")]
    Rejected(String),
}

/// The external policy resource collaborator.
///
/// Implementations wrap whatever transport the application uses; this crate
/// only defines the exchange shape.
pub trait PolicyStore {
    /// Fetch a policy by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no such policy exists.
    fn fetch(&self, id: &str) -> Result<PolicyResource, StoreError>;

    /// Create a new policy from a payload, returning the stored resource.
    ///
    /// # Errors
    ///
    /// [`StoreError::Rejected`] when the server refuses the payload.
    fn create(&mut self, payload: &PolicyPayload) -> Result<PolicyResource, StoreError>;

    /// Update an existing policy.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] or [`StoreError::Rejected`].
    fn update(&mut self, id: &str, payload: &PolicyPayload) -> Result<PolicyResource, StoreError>;
}
