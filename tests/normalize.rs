//! Integration tests for normalization, JSON decoding and lookups.

use selectrank::lookup::{find_by_index, find_by_value, set_disabled_by_value};
use selectrank::option::LOADING_FAILED_CLASS;
use selectrank::{
    HeaderGroup, OptionDataError, OptionRecord, RawEntry, SelectOption, normalize, normalize_json,
    parse_entries,
};

/// Deeply nested groups flatten in traversal order.
#[test]
fn deep_nesting_flattens_in_order() {
    let inner = HeaderGroup::new(vec![RawEntry::from("c"), RawEntry::from("d")]);
    let middle = HeaderGroup::new(vec![RawEntry::from("b"), inner.into()]);
    let entries = vec![
        RawEntry::from("a"),
        middle.into(),
        OptionRecord::new("E", "e").into(),
    ];

    let options = normalize(&entries);
    let pairs: Vec<(usize, &str)> = options
        .iter()
        .map(|o| (o.index, o.value.as_str()))
        .collect();
    assert_eq!(pairs, [(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e")]);
}

/// Headers containing only headers contribute nothing.
#[test]
fn empty_groups_vanish() {
    let entries = vec![
        HeaderGroup::new(vec![HeaderGroup::new(vec![]).into()]).into(),
        RawEntry::from("only"),
    ];
    let options = normalize(&entries);
    assert_eq!(options, vec![SelectOption::new("only", "only")]);
}

/// Malformed JSON nodes surface as `InvalidOptionData` with a path.
#[test]
fn malformed_json_reports_path() {
    let err = normalize_json(r#"["a", {"header": true, "data": [{"header": true}]}]"#)
        .unwrap_err();
    match err {
        OptionDataError::InvalidOptionData { path, reason } => {
            assert_eq!(path, "$[1].data[0]");
            assert!(reason.contains("data"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Truncated JSON is a JSON error, not an option error.
#[test]
fn truncated_json() {
    assert!(matches!(
        parse_entries(r#"["a", "#),
        Err(OptionDataError::Json(_))
    ));
}

/// The failure entry a controller installs after a fetch error.
#[test]
fn load_failed_entry() {
    let options = selectrank::renumber(vec![SelectOption::load_failed()]);
    assert_eq!(options[0].index, 0);
    assert!(options[0].has_class(LOADING_FAILED_CLASS));
}

/// Lookups operate on normalized lists.
#[test]
fn lookups_after_normalize() {
    let mut options = normalize_json(r#"[{"header": true, "data": [1, 2]}, 2, 3]"#).unwrap();
    assert_eq!(find_by_index(&options, -2).map(|o| o.index), Some(2));
    assert_eq!(find_by_value(&options, "2"), [1, 2]);
    assert_eq!(set_disabled_by_value(&mut options, "2", true), [1, 2]);
    assert!(!options[0].disabled && options[1].disabled && options[2].disabled);
}
