mod amount_input;
mod ast;
mod catalog;
mod error;
mod operator;
mod triggers;

pub use amount_input::{AmountInput, AmountOperator, MinorUnits};
pub use ast::{Condition, Conjunction, Element, FieldRef, RightOperand, Scalar};
pub use catalog::{
    CatalogEntry, FieldKind, TriggerCatalog, AMOUNT_FIELD, COUNTERPART_FIELD, CREATOR_FIELD,
    CURRENCY_FIELD, TAGS_FIELD,
};
pub use error::{AmountInputError, DecodeError, SessionError, UnknownTriggerKey};
pub use operator::{Operator, UnknownOperator};
pub use triggers::{AmountTrigger, TriggerKey, TriggerValue, Triggers};
