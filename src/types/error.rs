use thiserror::Error;

use super::TriggerKey;

/// Errors produced while projecting a conjunction into [`Triggers`](super::Triggers).
///
/// Unknown field names are not errors; those leaves are preserved verbatim.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("amount bound is not an integer minor-units value: {raw}")]
    InvalidAmount { raw: String },

    #[error("currency operand is not a currency code: {raw}")]
    InvalidCurrency { raw: String },
}

/// Edit-session transition requested from an invalid state.
///
/// These are programming errors in the caller, not user-recoverable
/// conditions; the session state is left unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("no '{0}' trigger to edit")]
    MissingTrigger(TriggerKey),
}

/// Errors converting the scratch amount view back into a trigger.
#[derive(Debug, Error, PartialEq)]
pub enum AmountInputError {
    #[error("amount value is required")]
    MissingValue,

    #[error("both range bounds are required")]
    MissingRangeBound,

    #[error("range lower bound {lower} exceeds upper bound {upper}")]
    InvertedRange { lower: i64, upper: i64 },

    #[error("no minor-units conversion for currency '{0}'")]
    Conversion(String),
}

/// A string that is not one of the four trigger keys.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown trigger key '{0}'")]
pub struct UnknownTriggerKey(pub String);
