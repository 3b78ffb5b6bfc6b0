use crate::types::{
    Condition, Conjunction, Element, Triggers, AMOUNT_FIELD, COUNTERPART_FIELD, CREATOR_FIELD,
    CURRENCY_FIELD, TAGS_FIELD,
};

/// The boilerplate precondition every policy trigger starts with. Not a
/// trigger itself; passed through unchanged and never edited.
pub const SUBMITTED_FOR_APPROVAL_GUARD: &str = "{event_name == 'submitted_for_approval'}";

/// Serialize committed triggers into a fresh conjunction.
///
/// Leaf order is deterministic: the guard, then creator users, tags,
/// counterparts, and amount (bounds in stored order, then the currency
/// equality leaf). A key that is absent or empty contributes zero leaves.
///
/// This alone is lossy with respect to leaves the decoder did not
/// recognize; use [`encode_preserving`] to carry those forward.
#[must_use]
pub fn encode(triggers: &Triggers, guard: &str) -> Conjunction {
    encode_preserving(triggers, guard, &[])
}

/// Like [`encode`], but re-merges elements preserved by the decoder after
/// the trigger leaves.
#[must_use]
pub fn encode_preserving(triggers: &Triggers, guard: &str, unmatched: &[Element]) -> Conjunction {
    let mut all: Vec<Element> = vec![Element::Guard(guard.to_owned())];

    if let Some(ids) = non_empty(&triggers.was_created_by_user_id) {
        all.push(Condition::membership(CREATOR_FIELD, ids).into());
    }
    if let Some(ids) = non_empty(&triggers.tags) {
        all.push(Condition::membership(TAGS_FIELD, ids).into());
    }
    if let Some(ids) = non_empty(&triggers.counterpart_id) {
        all.push(Condition::membership(COUNTERPART_FIELD, ids).into());
    }
    if let Some(amount) = triggers.amount.as_ref().filter(|a| !a.value.is_empty()) {
        for (operator, bound) in &amount.value {
            all.push(Condition::comparison(AMOUNT_FIELD, *operator, *bound).into());
        }
        all.push(Condition::equality(CURRENCY_FIELD, amount.currency.as_str()).into());
    }

    all.extend(unmatched.iter().cloned());
    Conjunction::new(all)
}

fn non_empty(ids: &Option<Vec<String>>) -> Option<&Vec<String>> {
    ids.as_ref().filter(|ids| !ids.is_empty())
}
