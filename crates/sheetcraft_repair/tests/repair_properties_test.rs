//! Property tests for the repair pipeline.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use sheetcraft_repair::{balance_quotes, close_brackets, is_balanced, repair};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ,.{}\\[\\]\"\\\\]{0,24}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn page() -> impl Strategy<Value = Value> {
    ("[a-zA-Z ]{1,20}", prop::collection::vec(0i64..100, 1..5))
        .prop_map(|(title, items)| json!({"title": title, "items": items}))
}

proptest! {
    #[test]
    fn valid_json_is_returned_unchanged(value in json_value()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(repair(&text).unwrap(), value.clone());

        let pretty = serde_json::to_string_pretty(&value).unwrap();
        prop_assert_eq!(repair(&pretty).unwrap(), value);
    }

    #[test]
    fn closing_truncated_json_balances_counts(value in json_value(), cut in 0.0f64..1.0) {
        let text = serde_json::to_string(&value).unwrap();
        let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let end = boundaries[((boundaries.len() - 1) as f64 * cut) as usize];

        for candidate in close_brackets(&balance_quotes(&text[..end])) {
            prop_assert!(is_balanced(&candidate), "unbalanced: {}", candidate);
        }
    }

    #[test]
    fn dropped_trailing_closers_restore_value(value in json_value(), drop in 1usize..8) {
        let text = serde_json::to_string(&value).unwrap();
        let closers = text.len() - text.trim_end_matches(['}', ']']).len();
        prop_assume!(closers > 0);

        let truncated = &text[..text.len() - drop.min(closers)];
        prop_assert_eq!(repair(truncated).unwrap(), value);
    }

    #[test]
    fn one_missing_separator_is_restored(pages in prop::collection::vec(page(), 2..6), at in any::<prop::sample::Index>()) {
        let joined: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
        let gap = at.index(joined.len() - 1);
        let mut text = String::from("[");
        for (i, page) in joined.iter().enumerate() {
            text.push_str(page);
            if i + 1 < joined.len() && i != gap {
                text.push(',');
            }
        }
        text.push(']');

        prop_assert_eq!(repair(&text).unwrap(), Value::Array(pages));
    }

    #[test]
    fn unterminated_string_is_closed(title in "[a-zA-Z0-9]{1,12}( [a-zA-Z0-9]{1,12}){0,3}") {
        let raw = format!(r#"{{"title": "{}"#, title);
        prop_assert_eq!(repair(&raw).unwrap(), json!({"title": title}));
    }

    #[test]
    fn loops_collapse_to_single_unit(unit in "[a-z]{50,80}", reps in 5usize..10) {
        let raw = format!(r#"[{{"word": "{}"#, unit.repeat(reps));
        prop_assert_eq!(repair(&raw).unwrap(), json!([{"word": unit}]));
    }

    #[test]
    fn repaired_output_reserializes(value in json_value(), cut in 0.0f64..1.0) {
        let text = serde_json::to_string(&value).unwrap();
        let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let end = boundaries[((boundaries.len() - 1) as f64 * cut) as usize];

        if let Ok(repaired) = repair(&text[..end]) {
            let again = serde_json::to_string(&repaired).unwrap();
            prop_assert_eq!(serde_json::from_str::<Value>(&again).unwrap(), repaired);
        }
    }
}
