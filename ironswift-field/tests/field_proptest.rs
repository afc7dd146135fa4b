/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Property-based tests for splitting and formatting fields.

use ironswift_field::{Field, FieldConfig, FieldDescriptor, Registry};
use proptest::prelude::*;
use std::sync::Arc;

fn descriptor(name: &str) -> Arc<FieldDescriptor> {
    Arc::clone(Registry::standard().lookup(name).unwrap())
}

/// Address lines as the wire carries them
fn address_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z0-9 ][A-Z0-9 /.,-]{0,34}", 1..=4)
}

/// Address lines where any line, the last one included, may be blank
fn address_lines_with_blanks() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![Just(String::new()), "[A-Z0-9 ][A-Z0-9 /.,-]{0,34}"],
        1..=4,
    )
}

/// Raw values mixing free text, separators and common field shapes
fn raw_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z0-9/:,. \r\n]{0,40}",
        ":[A-Z]{4}//[A-Z0-9]{1,12}",
        ":[A-Z]{4}//[0-9]{14}",
        "[0-9]{6}[A-Z]{3}[0-9]{1,5},[0-9]{0,2}",
        "(/[A-Z0-9]{1,10}\r\n)?[A-Z ]{1,20}(\r\n[A-Z ]{0,20}){0,4}",
    ]
}

proptest! {
    #[test]
    fn prop_component_count_is_fixed(value in "\\PC{0,80}") {
        for name in Registry::standard().names() {
            let outcome = Field::parse(descriptor(name), &value, FieldConfig::default());
            prop_assert_eq!(
                outcome.field.component_count(),
                outcome.field.descriptor().component_count()
            );
        }
    }

    #[test]
    fn prop_single_line_value_round_trips(value in "[^\r\n]{0,60}") {
        for name in ["20", "32A", "79"] {
            let field = Field::from_value(descriptor(name), &value);
            prop_assert_eq!(field.value(), value.clone());
        }
    }

    #[test]
    fn prop_clean_values_round_trip(value in raw_value()) {
        for descriptor in Registry::standard().descriptors() {
            let outcome = Field::parse(Arc::clone(descriptor), &value, FieldConfig::default());
            if outcome.is_clean() {
                prop_assert_eq!(outcome.field.value(), value.clone(), "{}", descriptor.name());
            }
        }
    }

    #[test]
    fn prop_party_lines_round_trip(party in "[A-Z0-9/]{1,35}", lines in address_lines_with_blanks()) {
        let value = std::iter::once(party).chain(lines).collect::<Vec<_>>().join("\r\n");
        let outcome = Field::parse(descriptor("50F"), &value, FieldConfig::default());
        prop_assert!(outcome.remainder.is_none());
        prop_assert_eq!(outcome.field.value(), value);
    }

    #[test]
    fn prop_components_round_trip(
        account in proptest::option::of("[A-Z0-9]{1,34}"),
        lines in address_lines(),
    ) {
        let mut field = Field::new(descriptor("50K"));
        if let Some(account) = &account {
            field.set_component(1, account.as_str()).unwrap();
        }
        for (i, line) in lines.iter().enumerate() {
            field.set_component(i + 2, line.as_str()).unwrap();
        }
        prop_assert!(field.is_valid());
        let parsed = Field::from_value(descriptor("50K"), &field.value());
        prop_assert_eq!(parsed.components(), field.components());
    }

    #[test]
    fn prop_absence_is_trailing_without_groups(value in "[A-Z0-9:/,]{0,40}") {
        for name in ["32A", "98C", "95P", "13C"] {
            let field = Field::from_value(descriptor(name), &value);
            let first_absent = field.components().iter().position(Option::is_none);
            if let Some(first) = first_absent {
                prop_assert!(field.components()[first..].iter().all(Option::is_none));
            }
        }
    }

    #[test]
    fn prop_label_map_round_trip(reference in "[A-Z0-9]{1,16}", narrative in "[A-Z ]{1,50}") {
        for (name, value) in [("20", &reference), ("79", &narrative)] {
            let field = Field::from_value(descriptor(name), value);
            let rebuilt = Field::from_label_map(descriptor(name), field.to_label_map());
            prop_assert_eq!(rebuilt, field);
        }
    }
}
