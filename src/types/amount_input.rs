use std::fmt;
use std::str::FromStr;

use super::operator::UnknownOperator;
use super::{AmountInputError, AmountTrigger, Operator};

/// Major/minor unit conversion seam.
///
/// Implemented by the embedding application's currency formatter; this crate
/// only moves integers across it. `None` means the currency has no known
/// conversion.
pub trait MinorUnits {
    fn to_minor_units(&self, major: f64, currency: &str) -> Option<i64>;
    fn from_minor_units(&self, minor: i64, currency: &str) -> Option<f64>;
}

/// Operator choices offered by the amount condition form.
///
/// `Range` is a pseudo-operator: it exists only in this scratch view and
/// expands to a `>=`/`<=` bound pair in the canonical trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOperator {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Range,
}

impl AmountOperator {
    /// The scratch operator corresponding to a single stored bound.
    /// `None` for membership operators, which never target the amount field.
    #[must_use]
    pub fn from_operator(op: Operator) -> Option<AmountOperator> {
        match op {
            Operator::Gt => Some(AmountOperator::Gt),
            Operator::Lt => Some(AmountOperator::Lt),
            Operator::Gte => Some(AmountOperator::Gte),
            Operator::Lte => Some(AmountOperator::Lte),
            Operator::Eq => Some(AmountOperator::Eq),
            _ => None,
        }
    }

    /// The wire operator for a single-bound trigger. `None` for `Range`,
    /// which expands to two bounds instead.
    #[must_use]
    pub fn to_operator(self) -> Option<Operator> {
        match self {
            AmountOperator::Gt => Some(Operator::Gt),
            AmountOperator::Lt => Some(Operator::Lt),
            AmountOperator::Gte => Some(Operator::Gte),
            AmountOperator::Lte => Some(Operator::Lte),
            AmountOperator::Eq => Some(Operator::Eq),
            AmountOperator::Range => None,
        }
    }
}

impl fmt::Display for AmountOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_operator() {
            Some(op) => write!(f, "{op}"),
            None => f.write_str("range"),
        }
    }
}

impl FromStr for AmountOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "range" {
            return Ok(AmountOperator::Range);
        }
        let op = s.parse::<Operator>()?;
        AmountOperator::from_operator(op).ok_or_else(|| UnknownOperator(s.to_owned()))
    }
}

/// The UI-editable scratch view of the canonical amount trigger.
///
/// Derived on demand from [`AmountTrigger`] and applied back through
/// [`apply`](AmountInput::apply); never stored alongside the canonical
/// value, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountInput {
    pub operator: AmountOperator,
    /// Major-units value for the single-bound operators.
    pub value: Option<f64>,
    /// Major-units inclusive lower bound, `Range` only.
    pub range_lower: Option<f64>,
    /// Major-units inclusive upper bound, `Range` only.
    pub range_upper: Option<f64>,
    pub currency: String,
}

impl AmountInput {
    /// An empty input for a freshly added amount condition.
    #[must_use]
    pub fn new(currency: &str) -> Self {
        AmountInput {
            operator: AmountOperator::Eq,
            value: None,
            range_lower: None,
            range_upper: None,
            currency: currency.to_owned(),
        }
    }

    /// Derive the scratch view from a canonical trigger.
    ///
    /// Range bounds are identified by operator (`>=` is the lower bound)
    /// rather than position, since the decoder does not normalize bound
    /// order. Values whose currency has no conversion stay `None`.
    #[must_use]
    pub fn derive(trigger: &AmountTrigger, units: &impl MinorUnits) -> Self {
        let convert = |minor: i64| units.from_minor_units(minor, &trigger.currency);

        if trigger.is_range() {
            let lower = trigger
                .bound(Operator::Gte)
                .unwrap_or(trigger.value[0].1);
            let upper = trigger
                .bound(Operator::Lte)
                .unwrap_or(trigger.value[1].1);
            AmountInput {
                operator: AmountOperator::Range,
                value: None,
                range_lower: convert(lower),
                range_upper: convert(upper),
                currency: trigger.currency.clone(),
            }
        } else {
            let (op, minor) = trigger
                .value
                .first()
                .map_or((Operator::Eq, 0), |(op, n)| (*op, *n));
            AmountInput {
                operator: AmountOperator::from_operator(op).unwrap_or(AmountOperator::Eq),
                value: convert(minor),
                range_lower: None,
                range_upper: None,
                currency: trigger.currency.clone(),
            }
        }
    }

    /// Convert the scratch view back into a canonical trigger.
    ///
    /// # Errors
    ///
    /// Returns [`AmountInputError`] when a required field is missing, the
    /// range is inverted, or the currency has no minor-units conversion.
    pub fn apply(&self, units: &impl MinorUnits) -> Result<AmountTrigger, AmountInputError> {
        let convert = |major: f64| {
            units
                .to_minor_units(major, &self.currency)
                .ok_or_else(|| AmountInputError::Conversion(self.currency.clone()))
        };

        match self.operator.to_operator() {
            Some(op) => {
                let major = self.value.ok_or(AmountInputError::MissingValue)?;
                Ok(AmountTrigger::single(op, convert(major)?, &self.currency))
            }
            None => {
                let (lower, upper) = match (self.range_lower, self.range_upper) {
                    (Some(lo), Some(hi)) => (lo, hi),
                    _ => return Err(AmountInputError::MissingRangeBound),
                };
                let lower = convert(lower)?;
                let upper = convert(upper)?;
                if lower > upper {
                    return Err(AmountInputError::InvertedRange { lower, upper });
                }
                Ok(AmountTrigger::range(lower, upper, &self.currency))
            }
        }
    }
}
