use tracing::debug;

use crate::types::{SessionError, TriggerKey, Triggers};

/// Which single trigger (or none) is being added or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Adding,
    Editing(TriggerKey),
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Adding => "adding",
            SessionState::Editing(_) => "editing",
        }
    }
}

/// The edit-session state machine governing the triggers working copy.
///
/// At most one trigger is in add/edit state at a time. Beginning an add or
/// edit snapshots the committed triggers; `cancel` restores from the
/// snapshot (wholesale when adding, only the edited key when editing) and
/// `confirm` promotes the in-progress edits. Confirming does not persist
/// anything; persistence happens on the outer form's submit.
///
/// Invariants: a snapshot exists iff the session is not idle; an edited key
/// exists iff the session is editing.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    triggers: Triggers,
    state: SessionState,
    snapshot: Option<Triggers>,
}

impl EditSession {
    /// Start a session over freshly decoded (or empty, for a new policy)
    /// triggers.
    #[must_use]
    pub fn new(triggers: Triggers) -> Self {
        EditSession {
            triggers,
            state: SessionState::Idle,
            snapshot: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The triggers working copy.
    #[must_use]
    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Mutable access to the working copy for field edits.
    pub fn triggers_mut(&mut self) -> &mut Triggers {
        &mut self.triggers
    }

    /// Consume the session, yielding the committed triggers.
    #[must_use]
    pub fn into_triggers(self) -> Triggers {
        self.triggers
    }

    /// Begin adding a new trigger.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless the session is idle.
    pub fn begin_add(&mut self) -> Result<(), SessionError> {
        self.require_idle("begin_add")?;
        self.snapshot = Some(self.triggers.clone());
        self.state = SessionState::Adding;
        debug!("session: idle -> adding");
        Ok(())
    }

    /// Begin editing the trigger under `key`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless the session is idle;
    /// [`SessionError::MissingTrigger`] when the slot is empty.
    pub fn begin_edit(&mut self, key: TriggerKey) -> Result<(), SessionError> {
        self.require_idle("begin_edit")?;
        if !self.triggers.contains(key) {
            return Err(SessionError::MissingTrigger(key));
        }
        self.snapshot = Some(self.triggers.clone());
        self.state = SessionState::Editing(key);
        debug!(%key, "session: idle -> editing");
        Ok(())
    }

    /// Discard the in-progress edits.
    ///
    /// Adding restores the whole snapshot (a trigger-type selection may have
    /// touched unrelated fields); editing restores only the edited key.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] when the session is idle.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        let snapshot = match (self.state, self.snapshot.take()) {
            (SessionState::Idle, _) | (_, None) => {
                return Err(SessionError::InvalidTransition {
                    state: self.state.name(),
                    action: "cancel",
                })
            }
            (_, Some(snapshot)) => snapshot,
        };

        match self.state {
            SessionState::Adding => {
                self.triggers = snapshot;
            }
            SessionState::Editing(key) => {
                self.triggers.set_value(key, snapshot.value(key));
            }
            SessionState::Idle => unreachable!("idle rejected above"),
        }
        debug!(state = self.state.name(), "session: cancelled");
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Commit the in-progress edits as the new working copy.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] when the session is idle.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            return Err(SessionError::InvalidTransition {
                state: self.state.name(),
                action: "confirm",
            });
        }
        self.snapshot = None;
        debug!(state = self.state.name(), "session: confirmed");
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Delete a committed trigger. Only valid while idle.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] when a trigger is being added or
    /// edited.
    pub fn delete(&mut self, key: TriggerKey) -> Result<(), SessionError> {
        self.require_idle("delete")?;
        self.triggers.remove(key);
        debug!(%key, "session: trigger deleted");
        Ok(())
    }

    fn require_idle(&self, action: &'static str) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                state: self.state.name(),
                action,
            })
        }
    }
}
