use tracing::{debug, trace};

use crate::types::{
    AmountTrigger, Condition, Conjunction, DecodeError, Element, Operator, RightOperand, Triggers,
    AMOUNT_FIELD, COUNTERPART_FIELD, CREATOR_FIELD, CURRENCY_FIELD, TAGS_FIELD,
};

/// Fallback currency when amount bounds arrive without a currency leaf.
const DEFAULT_CURRENCY: &str = "EUR";

/// The result of projecting a conjunction into form state.
///
/// The projection is partial by design: the server rule language is richer
/// than this editor. Everything the projection does not understand is kept
/// verbatim in `unmatched` so a later [`reencode`](Decoded::reencode) loses
/// nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub triggers: Triggers,
    /// Leaves and opaque elements outside the trigger catalog, in discovery
    /// order. Guard literals are excluded; the encoder re-emits the fixed
    /// guard itself.
    pub unmatched: Vec<Element>,
}

impl Decoded {
    /// Serialize back to a conjunction, re-merging the unmatched elements
    /// after the trigger leaves.
    #[must_use]
    pub fn reencode(&self, guard: &str) -> Conjunction {
        crate::encode::encode_preserving(&self.triggers, guard, &self.unmatched)
    }
}

/// Accumulates the single amount slot across the pass: the currency leaf and
/// the bound leaves may arrive in either order.
#[derive(Default)]
struct PendingAmount {
    currency: Option<String>,
    bounds: Vec<(Operator, i64)>,
    seen: bool,
}

impl PendingAmount {
    fn finish(self) -> Option<AmountTrigger> {
        self.seen.then(|| AmountTrigger {
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            value: self.bounds,
        })
    }
}

/// Project a conjunction into typed [`Triggers`] plus the elements the
/// trigger catalog does not cover.
///
/// Guard strings are skipped, malformed or unknown leaves are preserved in
/// [`Decoded::unmatched`], and the four trigger slots are populated from the
/// catalog fields. Each slot is present iff at least one matching leaf was
/// found; amount bounds keep their discovery order.
///
/// # Errors
///
/// Returns [`DecodeError`] when an amount bound cannot be coerced to integer
/// minor units, or a currency operand is not a string. Unknown field names
/// never fail.
pub fn decode(conjunction: &Conjunction) -> Result<Decoded, DecodeError> {
    let mut triggers = Triggers::new();
    let mut amount = PendingAmount::default();
    let mut unmatched = Vec::new();

    for element in &conjunction.all {
        let leaf = match element {
            Element::Guard(guard) => {
                trace!(guard, "skipping guard literal");
                continue;
            }
            Element::Opaque(_) => {
                debug!("preserving opaque element");
                unmatched.push(element.clone());
                continue;
            }
            Element::Leaf(leaf) => leaf,
        };

        match (leaf.left_operand.name.as_str(), leaf.operator) {
            (CURRENCY_FIELD, Operator::Eq) => {
                let code = leaf
                    .right_operand
                    .as_scalar()
                    .and_then(|s| s.as_str())
                    .ok_or_else(|| DecodeError::InvalidCurrency {
                        raw: display_operand(&leaf.right_operand),
                    })?;
                amount.currency = Some(code.to_owned());
                amount.seen = true;
            }
            (AMOUNT_FIELD, op) => {
                let scalar =
                    leaf.right_operand
                        .as_scalar()
                        .ok_or_else(|| DecodeError::InvalidAmount {
                            raw: display_operand(&leaf.right_operand),
                        })?;
                let minor = scalar
                    .as_minor_units()
                    .ok_or_else(|| DecodeError::InvalidAmount {
                        raw: scalar.to_string(),
                    })?;
                amount.bounds.push((op, minor));
                amount.seen = true;
            }
            (COUNTERPART_FIELD, Operator::In) => {
                triggers.counterpart_id = Some(id_set(leaf));
            }
            (CREATOR_FIELD, Operator::In) => {
                triggers.was_created_by_user_id = Some(id_set(leaf));
            }
            (TAGS_FIELD, Operator::In) => {
                triggers.tags = Some(id_set(leaf));
            }
            (field, operator) => {
                debug!(field, %operator, "preserving leaf outside trigger catalog");
                unmatched.push(element.clone());
            }
        }
    }

    triggers.amount = amount.finish();

    Ok(Decoded {
        triggers,
        unmatched,
    })
}

fn id_set(leaf: &Condition) -> Vec<String> {
    leaf.right_operand
        .as_set()
        .iter()
        .map(crate::types::Scalar::as_id)
        .collect()
}

fn display_operand(operand: &RightOperand) -> String {
    match operand {
        RightOperand::One(s) => s.to_string(),
        RightOperand::Many(_) => "[..]".to_owned(),
    }
}
