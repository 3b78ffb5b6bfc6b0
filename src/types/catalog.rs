use super::{Conjunction, TriggerKey};

/// Field name of the amount comparison leaves.
pub const AMOUNT_FIELD: &str = "invoice.amount";
/// Field name of the currency equality leaf paired with amount bounds.
pub const CURRENCY_FIELD: &str = "invoice.currency";
/// Field name of the counterpart membership leaf.
pub const COUNTERPART_FIELD: &str = "invoice.counterpart_id";
/// Field name of the creator-user membership leaf.
pub const CREATOR_FIELD: &str = "invoice.was_created_by_user_id";
/// Field name of the tag membership leaf.
pub const TAGS_FIELD: &str = "invoice.tags.id";

/// The semantic kind of a known field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A comparison bound on the invoice amount (minor units).
    AmountBound,
    /// The currency-equality companion of the amount bounds.
    Currency,
    /// Membership of an opaque entity id in a set.
    IdSet(TriggerKey),
}

/// One entry of the fixed trigger catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub field: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        field: AMOUNT_FIELD,
        kind: FieldKind::AmountBound,
        label: "Amount",
    },
    CatalogEntry {
        field: CURRENCY_FIELD,
        kind: FieldKind::Currency,
        label: "Currency",
    },
    CatalogEntry {
        field: COUNTERPART_FIELD,
        kind: FieldKind::IdSet(TriggerKey::CounterpartId),
        label: "Counterparts",
    },
    CatalogEntry {
        field: CREATOR_FIELD,
        kind: FieldKind::IdSet(TriggerKey::WasCreatedByUserId),
        label: "Created by user",
    },
    CatalogEntry {
        field: TAGS_FIELD,
        kind: FieldKind::IdSet(TriggerKey::Tags),
        label: "Tags",
    },
];

/// The fixed registry mapping known field names to their semantic kind and
/// human label. Anything outside it is opaque to this editor.
#[derive(Debug)]
pub struct TriggerCatalog;

impl TriggerCatalog {
    /// Look up a field name.
    #[must_use]
    pub fn lookup(field: &str) -> Option<&'static CatalogEntry> {
        ENTRIES.iter().find(|entry| entry.field == field)
    }

    /// All catalog entries, in declaration order.
    #[must_use]
    pub fn entries() -> &'static [CatalogEntry] {
        ENTRIES
    }

    /// The human label for a trigger key.
    #[must_use]
    pub fn label(key: TriggerKey) -> &'static str {
        match key {
            TriggerKey::Amount => "Amount",
            TriggerKey::CounterpartId => "Counterparts",
            TriggerKey::WasCreatedByUserId => "Created by user",
            TriggerKey::Tags => "Tags",
        }
    }

    /// The unique known labels referenced by a conjunction's leaves, in
    /// discovery order. Used by policy list views to summarize a policy's
    /// triggers without decoding it.
    #[must_use]
    pub fn summarize(conjunction: &Conjunction) -> Vec<&'static str> {
        let mut labels = Vec::new();
        for leaf in conjunction.leaves() {
            if let Some(entry) = Self::lookup(&leaf.left_operand.name) {
                if !labels.contains(&entry.label) {
                    labels.push(entry.label);
                }
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, Element, Operator};

    #[test]
    fn lookup_known_fields() {
        let entry = TriggerCatalog::lookup(TAGS_FIELD).unwrap();
        assert_eq!(entry.kind, FieldKind::IdSet(TriggerKey::Tags));
        assert_eq!(entry.label, "Tags");

        assert_eq!(
            TriggerCatalog::lookup(AMOUNT_FIELD).unwrap().kind,
            FieldKind::AmountBound
        );
    }

    #[test]
    fn lookup_unknown_field_returns_none() {
        assert!(TriggerCatalog::lookup("invoice.memo").is_none());
    }

    #[test]
    fn every_trigger_key_has_a_label() {
        for key in TriggerKey::ALL {
            assert!(!TriggerCatalog::label(key).is_empty());
        }
    }

    #[test]
    fn summarize_deduplicates_and_skips_unknowns() {
        let conjunction = Conjunction::new(vec![
            Element::Guard("{event_name == 'submitted_for_approval'}".to_owned()),
            Condition::comparison(AMOUNT_FIELD, Operator::Gte, 1000).into(),
            Condition::comparison(AMOUNT_FIELD, Operator::Lte, 5000).into(),
            Condition::equality(CURRENCY_FIELD, "EUR").into(),
            Condition::membership(TAGS_FIELD, &["t1".to_owned()]).into(),
            Condition::equality("invoice.memo", "urgent").into(),
        ]);

        assert_eq!(
            TriggerCatalog::summarize(&conjunction),
            vec!["Amount", "Currency", "Tags"]
        );
    }
}
