
use policy_triggers::{
    decode, encode, AmountTrigger, Conjunction, EditSession, Operator, TriggerCatalog, TriggerKey,
    TriggerValue, SUBMITTED_FOR_APPROVAL_GUARD,
};
use proptest::prelude::*;
use strategies::{arb_triggers, arb_trigger_key};

// ---------------------------------------------------------------------------
// Invariant 1: encode ∘ decode identity over the known keys
//
// Every well-formed Triggers value survives a trip through the wire format,
// including a serde round trip of the conjunction itself.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn encode_then_decode_is_identity(triggers in arb_triggers()) {
        let conjunction = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
        let decoded = decode(&conjunction).unwrap();
        prop_assert_eq!(&decoded.triggers, &triggers);
        prop_assert!(decoded.unmatched.is_empty());
    }

    #[test]
    fn encode_then_decode_through_json(triggers in arb_triggers()) {
        let json = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD).to_json().unwrap();
        let decoded = decode(&Conjunction::from_json(&json).unwrap()).unwrap();
        prop_assert_eq!(decoded.triggers, triggers);
    }

    #[test]
    fn encode_is_deterministic(triggers in arb_triggers()) {
        let a = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
        let b = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: session cancel restores, confirm commits
//
// Cancelling an edit restores exactly the edited key and never disturbs the
// others; cancelling an add restores everything; confirming keeps the edits.
// ---------------------------------------------------------------------------

fn scribble(session: &mut EditSession, key: TriggerKey) {
    let value = match key {
        TriggerKey::Amount => {
            TriggerValue::Amount(AmountTrigger::single(Operator::Eq, 424_242, "USD"))
        }
        _ => TriggerValue::Ids(vec!["scribbled".to_owned()]),
    };
    session.triggers_mut().set_value(key, Some(value));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn edit_cancel_restores_the_whole_working_copy(
        triggers in arb_triggers(),
        key in arb_trigger_key(),
    ) {
        let mut session = EditSession::new(triggers.clone());
        if !triggers.contains(key) {
            // Nothing to edit under this key; the transition must refuse.
            prop_assert!(session.begin_edit(key).is_err());
            return Ok(());
        }

        session.begin_edit(key).unwrap();
        scribble(&mut session, key);
        session.cancel().unwrap();
        prop_assert_eq!(session.triggers(), &triggers);
    }

    #[test]
    fn add_cancel_restores_the_whole_working_copy(
        triggers in arb_triggers(),
        scribbled in arb_triggers(),
    ) {
        let mut session = EditSession::new(triggers.clone());
        session.begin_add().unwrap();
        *session.triggers_mut() = scribbled;
        session.cancel().unwrap();
        prop_assert_eq!(session.triggers(), &triggers);
    }

    #[test]
    fn confirm_commits_exactly_the_scribbled_value(
        triggers in arb_triggers(),
        key in arb_trigger_key(),
    ) {
        let mut session = EditSession::new(triggers.clone());
        session.begin_add().unwrap();
        scribble(&mut session, key);
        session.confirm().unwrap();

        prop_assert!(session.triggers().contains(key));
        for other in TriggerKey::ALL {
            if other != key {
                prop_assert_eq!(session.triggers().value(other), triggers.value(other));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: catalog summary agrees with the encoder
//
// Every label the summary reports for an encoded conjunction corresponds to
// a populated trigger slot (amount implies its currency companion).
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn summary_labels_match_populated_slots(triggers in arb_triggers()) {
        let conjunction = encode(&triggers, SUBMITTED_FOR_APPROVAL_GUARD);
        let labels = TriggerCatalog::summarize(&conjunction);

        for key in triggers.keys() {
            let expect_label = match key {
                // A bound-less amount slot encodes no leaves at all.
                TriggerKey::Amount => triggers
                    .amount
                    .as_ref()
                    .is_some_and(|amount| !amount.value.is_empty()),
                _ => match triggers.value(key) {
                    Some(TriggerValue::Ids(ids)) => !ids.is_empty(),
                    _ => false,
                },
            };
            prop_assert_eq!(
                labels.contains(&TriggerCatalog::label(key)),
                expect_label,
                "label mismatch for {}", key
            );
        }
    }
}
