use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Operator;

/// The closed set of trigger categories this editor understands.
///
/// Each key maps to at most one slot in [`Triggers`]; the variant order here
/// is the fixed order the encoder emits leaves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKey {
    WasCreatedByUserId,
    Tags,
    CounterpartId,
    Amount,
}

impl TriggerKey {
    /// All keys in encoder order.
    pub const ALL: [TriggerKey; 4] = [
        TriggerKey::WasCreatedByUserId,
        TriggerKey::Tags,
        TriggerKey::CounterpartId,
        TriggerKey::Amount,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKey::WasCreatedByUserId => "was_created_by_user_id",
            TriggerKey::Tags => "tags",
            TriggerKey::CounterpartId => "counterpart_id",
            TriggerKey::Amount => "amount",
        }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKey {
    type Err = super::UnknownTriggerKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "was_created_by_user_id" => Ok(TriggerKey::WasCreatedByUserId),
            "tags" => Ok(TriggerKey::Tags),
            "counterpart_id" => Ok(TriggerKey::CounterpartId),
            "amount" => Ok(TriggerKey::Amount),
            other => Err(super::UnknownTriggerKey(other.to_owned())),
        }
    }
}

/// The amount trigger: a currency plus one bound (`value.len() == 1`) or a
/// `>=`/`<=` range (`value.len() == 2`, order not guaranteed).
///
/// Bounds are integer minor units; conversion to display values happens at
/// the [`AmountInput`](super::AmountInput) boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountTrigger {
    pub currency: String,
    pub value: Vec<(Operator, i64)>,
}

impl AmountTrigger {
    /// A single-bound amount trigger.
    #[must_use]
    pub fn single(operator: Operator, bound: i64, currency: &str) -> Self {
        AmountTrigger {
            currency: currency.to_owned(),
            value: vec![(operator, bound)],
        }
    }

    /// An inclusive range trigger (`>= lower` and `<= upper`).
    #[must_use]
    pub fn range(lower: i64, upper: i64, currency: &str) -> Self {
        AmountTrigger {
            currency: currency.to_owned(),
            value: vec![(Operator::Gte, lower), (Operator::Lte, upper)],
        }
    }

    #[must_use]
    pub fn is_range(&self) -> bool {
        self.value.len() == 2
    }

    /// The bound carried by the given operator, if present.
    #[must_use]
    pub fn bound(&self, operator: Operator) -> Option<i64> {
        self.value
            .iter()
            .find(|(op, _)| *op == operator)
            .map(|(_, n)| *n)
    }
}

/// The value held in one trigger slot, for keyed access across
/// heterogeneously-typed slots.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerValue {
    Amount(AmountTrigger),
    Ids(Vec<String>),
}

/// The decoded, form-editable projection of a conjunction: at most one
/// entry per [`TriggerKey`].
///
/// Created fresh per edit session, mutated in place by field edits, and
/// promoted back to a [`Conjunction`](super::Conjunction) only at save time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Triggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterpart_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_created_by_user_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Triggers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        TriggerKey::ALL.iter().all(|key| !self.contains(*key))
    }

    /// Whether the given slot is populated.
    #[must_use]
    pub fn contains(&self, key: TriggerKey) -> bool {
        match key {
            TriggerKey::Amount => self.amount.is_some(),
            TriggerKey::CounterpartId => self.counterpart_id.is_some(),
            TriggerKey::WasCreatedByUserId => self.was_created_by_user_id.is_some(),
            TriggerKey::Tags => self.tags.is_some(),
        }
    }

    /// A copy of the value in the given slot.
    #[must_use]
    pub fn value(&self, key: TriggerKey) -> Option<TriggerValue> {
        match key {
            TriggerKey::Amount => self.amount.clone().map(TriggerValue::Amount),
            TriggerKey::CounterpartId => self.counterpart_id.clone().map(TriggerValue::Ids),
            TriggerKey::WasCreatedByUserId => {
                self.was_created_by_user_id.clone().map(TriggerValue::Ids)
            }
            TriggerKey::Tags => self.tags.clone().map(TriggerValue::Ids),
        }
    }

    /// Replace the given slot wholesale. `None` clears it.
    ///
    /// An `Amount` value written to an id-set key (or vice versa) clears the
    /// slot; the caller mixed up keys and the slot types don't line up.
    pub fn set_value(&mut self, key: TriggerKey, value: Option<TriggerValue>) {
        match key {
            TriggerKey::Amount => {
                self.amount = match value {
                    Some(TriggerValue::Amount(a)) => Some(a),
                    _ => None,
                };
            }
            TriggerKey::CounterpartId => {
                self.counterpart_id = match value {
                    Some(TriggerValue::Ids(ids)) => Some(ids),
                    _ => None,
                };
            }
            TriggerKey::WasCreatedByUserId => {
                self.was_created_by_user_id = match value {
                    Some(TriggerValue::Ids(ids)) => Some(ids),
                    _ => None,
                };
            }
            TriggerKey::Tags => {
                self.tags = match value {
                    Some(TriggerValue::Ids(ids)) => Some(ids),
                    _ => None,
                };
            }
        }
    }

    /// Clear the given slot.
    pub fn remove(&mut self, key: TriggerKey) {
        self.set_value(key, None);
    }

    /// The populated keys, in encoder order.
    #[must_use]
    pub fn keys(&self) -> Vec<TriggerKey> {
        TriggerKey::ALL
            .into_iter()
            .filter(|key| self.contains(*key))
            .collect()
    }
}
