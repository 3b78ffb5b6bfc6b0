use policy_triggers::{
    decode, encode, AmountTrigger, Condition, Conjunction, Element, Operator, TriggerKey,
    Triggers, AMOUNT_FIELD, CURRENCY_FIELD, SUBMITTED_FOR_APPROVAL_GUARD,
};

fn full_triggers() -> Triggers {
    let mut triggers = Triggers::new();
    triggers.amount = Some(AmountTrigger::range(1000, 5000, "EUR"));
    triggers.counterpart_id = Some(vec!["c1".to_owned()]);
    triggers.was_created_by_user_id = Some(vec!["u1".to_owned(), "u2".to_owned()]);
    triggers.tags = Some(vec!["t1".to_owned()]);
    triggers
}

#[test]
fn known_fields_round_trip_exactly() {
    let triggers = full_triggers();
    let conjunction = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
    let decoded = decode(&conjunction).unwrap();

    assert_eq!(decoded.triggers, triggers);
    assert!(decoded.unmatched.is_empty());
}

#[test]
fn round_trip_survives_the_json_wire() {
    let triggers = full_triggers();
    let json = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD)
        .to_json()
        .unwrap();
    let decoded = decode(&Conjunction::from_json(&json).unwrap()).unwrap();
    assert_eq!(decoded.triggers, triggers);
}

#[test]
fn range_leg_order_does_not_change_the_decoded_range() {
    let base = r#"{"operator": "%OP%", "left_operand": {"name": "invoice.amount"}, "right_operand": %N%}"#;
    let lower = base.replace("%OP%", ">=").replace("%N%", "1000");
    let upper = base.replace("%OP%", "<=").replace("%N%", "5000");
    let currency =
        r#"{"operator": "==", "left_operand": {"name": "invoice.currency"}, "right_operand": "EUR"}"#;

    let forward =
        Conjunction::from_json(&format!(r#"{{"all": [{lower}, {upper}, {currency}]}}"#)).unwrap();
    let backward =
        Conjunction::from_json(&format!(r#"{{"all": [{currency}, {upper}, {lower}]}}"#)).unwrap();

    let a = decode(&forward).unwrap().triggers.amount.unwrap();
    let b = decode(&backward).unwrap().triggers.amount.unwrap();

    // Discovery order differs, the unordered {>=, <=} pair does not.
    assert_eq!(a.bound(Operator::Gte), b.bound(Operator::Gte));
    assert_eq!(a.bound(Operator::Lte), b.bound(Operator::Lte));
    assert_eq!(a.currency, b.currency);
}

#[test]
fn drop_then_reencode_is_not_a_round_trip() {
    let foreign = Condition::equality("invoice.memo", "urgent");
    let mut conjunction = encode(&full_triggers(), SUBMITTED_FOR_APPROVAL_GUARD);
    conjunction.all.push(foreign.clone().into());

    let decoded = decode(&conjunction).unwrap();

    // Plain encode drops the foreign leaf: the documented fidelity gap.
    let lossy = encode(&decoded.triggers, SUBMITTED_FOR_APPROVAL_GUARD);
    assert_ne!(lossy, conjunction);
    assert!(lossy.leaves().all(|leaf| leaf.left_operand.name != "invoice.memo"));

    // The preserving path closes it.
    let preserved = decoded.reencode(SUBMITTED_FOR_APPROVAL_GUARD);
    assert!(preserved
        .leaves()
        .any(|leaf| *leaf == foreign));
}

#[test]
fn amount_range_wire_layout() {
    let mut triggers = Triggers::new();
    triggers.amount = Some(AmountTrigger::range(1000, 5000, "EUR"));

    let conjunction = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
    let json: serde_json::Value = serde_json::to_value(&conjunction).unwrap();
    let all = json["all"].as_array().unwrap();

    assert_eq!(all.len(), 4);
    assert_eq!(all[0], SUBMITTED_FOR_APPROVAL_GUARD.to_owned());
    assert_eq!(all[1]["operator"], ">=");
    assert_eq!(all[1]["left_operand"]["name"], AMOUNT_FIELD);
    assert_eq!(all[1]["right_operand"], 1000);
    assert_eq!(all[2]["operator"], "<=");
    assert_eq!(all[2]["right_operand"], 5000);
    assert_eq!(all[3]["operator"], "==");
    assert_eq!(all[3]["left_operand"]["name"], CURRENCY_FIELD);
    assert_eq!(all[3]["right_operand"], "EUR");
}

#[test]
fn single_bound_amount_wire_layout() {
    let mut triggers = Triggers::new();
    triggers.amount = Some(AmountTrigger::single(Operator::Gt, 200, "USD"));

    let conjunction = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
    let json: serde_json::Value = serde_json::to_value(&conjunction).unwrap();
    let all = json["all"].as_array().unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(all[1]["operator"], ">");
    assert_eq!(all[1]["right_operand"], 200);
    assert_eq!(all[2]["right_operand"], "USD");
}

#[test]
fn decoding_a_reencoded_policy_is_stable() {
    // Fixed point: once decoded and re-encoded, further cycles are identity.
    let raw = r#"{"all": [
        "{event_name == 'submitted_for_approval'}",
        {"operator": "in", "left_operand": {"name": "invoice.tags.id"}, "right_operand": ["t1"]},
        {"operator": "exists", "left_operand": {"name": "invoice.project_id"}, "right_operand": true},
        {"operator": ">", "left_operand": {"name": "invoice.amount"}, "right_operand": "250"}
    ]}"#;

    let first = decode(&Conjunction::from_json(raw).unwrap()).unwrap();
    let once = first.reencode(SUBMITTED_FOR_APPROVAL_GUARD);
    let second = decode(&once).unwrap();
    let twice = second.reencode(SUBMITTED_FOR_APPROVAL_GUARD);

    assert_eq!(first, second);
    assert_eq!(once, twice);
    assert!(second.triggers.contains(TriggerKey::Amount));
    assert_eq!(second.unmatched.len(), 1, "foreign 'exists' leaf survives");
}

#[test]
fn empty_elements_array_decodes_to_empty_triggers() {
    let decoded = decode(&Conjunction::default()).unwrap();
    assert!(decoded.triggers.is_empty());
    assert_eq!(
        encode(&decoded.triggers, SUBMITTED_FOR_APPROVAL_GUARD).all,
        vec![Element::Guard(SUBMITTED_FOR_APPROVAL_GUARD.to_owned())]
    );
}
