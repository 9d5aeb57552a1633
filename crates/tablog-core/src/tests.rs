//! Unit tests for tablog-core primitives.

use crate::{Scalar, TabularRecord};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Fetch a float field or panic with the offending value.
fn float(table: &TabularRecord, key: &str) -> f64 {
    match table.get(key) {
        Some(Scalar::Float(x)) => *x,
        other => panic!("expected float at {key:?}, got {other:?}"),
    }
}

#[cfg(test)]
mod value {
    use crate::Scalar;

    #[test]
    fn from_conversions() {
        assert_eq!(Scalar::from(3i32), Scalar::Int(3));
        assert_eq!(Scalar::from(7u32), Scalar::Int(7));
        assert_eq!(Scalar::from(11usize), Scalar::Int(11));
        assert_eq!(Scalar::from(2.5f32), Scalar::Float(2.5));
        assert_eq!(Scalar::from(true), Scalar::Bool(true));
        assert_eq!(Scalar::from("x"), Scalar::Str("x".into()));
    }

    #[test]
    fn display_rendering() {
        assert_eq!(Scalar::Int(7).to_string(), "7");
        assert_eq!(Scalar::Float(0.25).to_string(), "0.25");
        assert_eq!(Scalar::Float(2.0).to_string(), "2"); // Rust float Display drops ".0"
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Str("hello".into()).to_string(), "hello");
    }
}

#[cfg(test)]
mod record {
    use crate::{Scalar, TabularRecord};

    #[test]
    fn insertion_order_preserved() {
        let mut table = TabularRecord::new();
        table.record("zeta", 1);
        table.record("alpha", 2);
        table.record("mid", 3);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn overwrite_keeps_slot() {
        let mut table = TabularRecord::new();
        table.record("a", 1);
        table.record("b", 2);
        table.record("a", 10);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["a", "b"], "overwrite must not move the key");
        assert_eq!(table.get("a"), Some(&Scalar::Int(10)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn get_unknown_is_none() {
        let table = TabularRecord::new();
        assert!(table.get("missing").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn iter_pairs_keys_with_values() {
        let mut table = TabularRecord::new();
        table.record("a", 1);
        table.record("b", "two");
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("a", &Scalar::Int(1)));
        assert_eq!(pairs[1], ("b", &Scalar::Str("two".into())));
    }

    #[test]
    fn clear_resets_fields() {
        let mut table = TabularRecord::new();
        table.disable_warnings();
        table.record("a", 1);
        table.clear();
        assert!(table.is_empty());
        assert!(table.get("a").is_none());

        // Usable again after clear.
        table.record("b", 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), ["b"]);
    }
}

#[cfg(test)]
mod input {
    use crate::{LogInput, TabularRecord};

    #[test]
    fn from_conversions() {
        let owned = String::from("resume");
        assert!(matches!(LogInput::from(&owned), LogInput::Message("resume")));
        assert!(matches!(LogInput::from("go"), LogInput::Message("go")));

        let table = TabularRecord::new();
        assert!(matches!(LogInput::from(&table), LogInput::Tabular(_)));
    }
}

#[cfg(test)]
mod stats {
    use super::float;
    use crate::{StatPlacement, TabularRecord};

    #[test]
    fn known_slice() {
        let mut table = TabularRecord::new();
        table.record_stats("Loss", &[1.0, 2.0, 3.0, 4.0], StatPlacement::Back);
        assert_eq!(float(&table, "LossAverage"), 2.5);
        assert_eq!(float(&table, "LossMedian"), 2.5);
        assert_eq!(float(&table, "LossMin"), 1.0);
        assert_eq!(float(&table, "LossMax"), 4.0);
        // Population std: sqrt(mean of squared deviations) = sqrt(1.25).
        assert!((float(&table, "LossStd") - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_slice_records_nan() {
        let mut table = TabularRecord::new();
        table.record_stats("Reward", &[], StatPlacement::Back);
        for stat in ["Average", "Std", "Median", "Min", "Max"] {
            assert!(float(&table, &format!("Reward{stat}")).is_nan(), "{stat} should be NaN");
        }
    }

    #[test]
    fn placement_front() {
        let mut table = TabularRecord::new();
        table.record_stats("Loss", &[1.0], StatPlacement::Front);
        assert_eq!(float(&table, "AverageLoss"), 1.0);
        assert!(table.get("LossAverage").is_none());
    }

    #[test]
    fn median_odd_length() {
        let mut table = TabularRecord::new();
        table.record_stats("V", &[3.0, 1.0, 2.0], StatPlacement::Back);
        assert_eq!(float(&table, "VMedian"), 2.0);
    }

    #[test]
    fn stat_key_order() {
        let mut table = TabularRecord::new();
        table.record_stats("X", &[1.0], StatPlacement::Back);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["XAverage", "XStd", "XMedian", "XMin", "XMax"]);
    }
}

#[cfg(test)]
mod consumed {
    use crate::TabularRecord;

    #[test]
    fn mark_through_shared_ref() {
        let mut table = TabularRecord::new();
        table.record("a", 1);
        let shared: &TabularRecord = &table;
        shared.mark("a");
        assert!(table.is_marked("a"));
        assert!(!table.is_marked("b"));
    }

    #[test]
    fn mark_all_covers_every_field() {
        let mut table = TabularRecord::new();
        table.record("a", 1);
        table.record("b", 2);
        table.mark_all();
        assert!(table.is_marked("a"));
        assert!(table.is_marked("b"));
    }

    #[test]
    fn clear_resets_marks() {
        let mut table = TabularRecord::new();
        table.record("a", 1);
        table.mark("a");
        table.clear();
        assert!(!table.is_marked("a"));
    }
}

#[cfg(test)]
mod prefix {
    use crate::TabularRecord;

    #[test]
    fn prefix_applied_to_new_keys() {
        let mut table = TabularRecord::new();
        table.push_prefix("Train/");
        table.record("Loss", 0.5);
        assert_eq!(table.keys().collect::<Vec<_>>(), ["Train/Loss"]);
        assert!(table.get("Train/Loss").is_some());
        assert!(table.get("Loss").is_none());
    }

    #[test]
    fn prefixes_nest_and_pop() {
        let mut table = TabularRecord::new();
        table.push_prefix("A/");
        table.push_prefix("B/");
        table.record("x", 1);
        table.pop_prefix();
        table.record("y", 2);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["A/B/x", "A/y"]);
    }

    #[test]
    #[should_panic(expected = "empty prefix stack")]
    fn pop_without_push_panics() {
        let mut table = TabularRecord::new();
        table.pop_prefix();
    }
}

#[cfg(test)]
mod display {
    use crate::TabularRecord;

    #[test]
    fn aligned_table() {
        let mut table = TabularRecord::new();
        table.record("Epoch", 3usize);
        table.record("Loss", 0.25);
        assert_eq!(
            table.to_string(),
            "-----  ----\n\
             Epoch  3\n\
             Loss   0.25\n\
             -----  ----"
        );
    }

    #[test]
    fn keys_sorted_for_rendering() {
        let mut table = TabularRecord::new();
        table.record("B", 2);
        table.record("A", 1);
        let out = table.to_string();
        let first_row = out.lines().nth(1).unwrap();
        assert!(first_row.starts_with('A'), "got {first_row:?}");
    }

    #[test]
    fn empty_record_renders_nothing() {
        let table = TabularRecord::new();
        assert_eq!(table.to_string(), "");
    }
}

#[cfg(test)]
mod warn_once {
    use crate::WarnOnce;

    #[test]
    fn fires_once_per_key() {
        let mut warn = WarnOnce::new();
        assert!(warn.should_warn("k"));
        assert!(!warn.should_warn("k"));
    }

    #[test]
    fn distinct_keys_independent() {
        let mut warn = WarnOnce::new();
        assert!(warn.should_warn("a"));
        assert!(warn.should_warn("b"));
        assert!(!warn.should_warn("a"));
    }

    #[test]
    fn disable_suppresses_everything() {
        let mut warn = WarnOnce::new();
        warn.disable();
        assert!(warn.is_disabled());
        assert!(!warn.should_warn("never-seen"));
    }
}
