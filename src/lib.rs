mod decode;
mod encode;
mod error;
mod session;
mod store;
mod types;

pub use decode::{decode, Decoded};
pub use encode::{encode, encode_preserving, SUBMITTED_FOR_APPROVAL_GUARD};
pub use error::PolicyError;
pub use session::{EditSession, SessionState};
pub use store::{
    PolicyPayload, PolicyResource, PolicyStore, ScriptCall, ScriptParams, StoreError,
    REQUEST_APPROVAL_BY_USERS,
};
pub use types::{
    AmountInput, AmountInputError, AmountOperator, AmountTrigger, CatalogEntry, Condition,
    Conjunction, DecodeError, Element, FieldKind, FieldRef, MinorUnits, Operator, RightOperand,
    Scalar, SessionError, TriggerCatalog, TriggerKey, TriggerValue, Triggers, UnknownOperator,
    UnknownTriggerKey, AMOUNT_FIELD, COUNTERPART_FIELD, CREATOR_FIELD, CURRENCY_FIELD, TAGS_FIELD,
};
