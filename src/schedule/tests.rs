use super::*;
use serde_json::json;

#[test]
fn test_from_json_reads_rows() {
    let value = json!({
        "E1": { "1": "early", "2": "mid" },
        "E2": { "1": "早" },
    });

    let (table, warnings) = ShiftTable::from_json(&value, 30);

    assert!(warnings.is_empty());
    assert_eq!(table.len(), 2);
    assert_eq!(table.shift("E1", 1), Some(&ShiftCode::Early));
    assert_eq!(table.shift("E1", 2), Some(&ShiftCode::Mid));
    assert_eq!(table.shift("E2", 1), Some(&ShiftCode::Early));
    assert_eq!(table.shift("E2", 2), None);
}

#[test]
fn test_from_json_skips_last_updated() {
    let value = json!({
        "_lastUpdated": "2025-10-01T08:00:00Z",
        "E1": { "1": "early" },
    });

    let (table, warnings) = ShiftTable::from_json(&value, 31);

    assert!(warnings.is_empty());
    assert_eq!(table.employee_ids().collect::<Vec<_>>(), vec!["E1"]);
}

#[test]
fn test_from_json_skips_out_of_range_days() {
    let value = json!({
        "E1": { "0": "early", "31": "mid", "abc": "noon", "30": "evening" },
    });

    let (table, warnings) = ShiftTable::from_json(&value, 30);

    assert_eq!(table.shift("E1", 30), Some(&ShiftCode::Evening));
    assert_eq!(table.shift("E1", 31), None);
    assert_eq!(warnings.len(), 3);
    assert!(warnings
        .iter()
        .all(|w| matches!(w, InputWarning::InvalidDay { employee, .. } if employee == "E1")));
}

#[test]
fn test_from_json_rejects_non_canonical_day_keys() {
    let value = json!({
        "E1": { "01": "early", "2": "mid" },
        "E2": { "+1": "early" },
        "E3": { " 1": "early", "1 ": "mid" },
    });

    let (table, warnings) = ShiftTable::from_json(&value, 31);

    for employee in ["E1", "E2", "E3"] {
        assert_eq!(table.shift(employee, 1), None, "{employee} kept day 1");
    }
    assert_eq!(table.shift("E1", 2), Some(&ShiftCode::Mid));

    let mut keys: Vec<&str> = warnings
        .iter()
        .filter_map(|w| match w {
            InputWarning::InvalidDay { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![" 1", "+1", "01", "1 "]);
    assert_eq!(warnings.len(), 4);
}

#[test]
fn test_from_json_empty_and_null_shifts_are_absent() {
    let value = json!({
        "E1": { "1": "", "2": null, "3": 7 },
    });

    let (table, warnings) = ShiftTable::from_json(&value, 30);

    assert_eq!(table.len(), 1);
    assert_eq!(table.shift("E1", 1), None);
    assert_eq!(table.shift("E1", 2), None);
    assert_eq!(table.shift("E1", 3), None);
    assert_eq!(
        warnings,
        vec![InputWarning::InvalidShift {
            employee: "E1".to_string(),
            day: 3
        }]
    );
}

#[test]
fn test_from_json_keeps_employee_with_bad_row() {
    let value = json!({ "E1": "oops", "E2": null });

    let (table, warnings) = ShiftTable::from_json(&value, 30);

    assert_eq!(table.employee_ids().collect::<Vec<_>>(), vec!["E1", "E2"]);
    assert_eq!(
        warnings,
        vec![InputWarning::InvalidRow {
            employee: "E1".to_string()
        }]
    );
}

#[test]
fn test_from_json_rejects_non_object() {
    let (table, warnings) = ShiftTable::from_json(&json!([1, 2, 3]), 30);
    assert!(table.is_empty());
    assert_eq!(warnings, vec![InputWarning::ScheduleNotObject]);
}

#[test]
fn test_name_lookup_falls_back_to_id() {
    let (names, warnings) = NameTable::from_json(&json!({ "E1": "Alice", "E2": 42 }));

    assert_eq!(names.display_name("E1"), "Alice");
    assert_eq!(names.display_name("E2"), "E2");
    assert_eq!(names.display_name("E9"), "E9");
    assert_eq!(
        warnings,
        vec![InputWarning::InvalidName {
            employee: "E2".to_string()
        }]
    );
}

#[test]
fn test_names_from_non_object() {
    let (names, warnings) = NameTable::from_json(&json!("nope"));
    assert!(names.is_empty());
    assert_eq!(warnings, vec![InputWarning::NamesNotObject]);
}

#[test]
fn test_name_table_from_iter() {
    let names: NameTable = [("E1", "Alice"), ("E2", "Bob")].into_iter().collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names.display_name("E2"), "Bob");
}
