//! Flattening of grouped option input into an indexed list.
//!
//! Header groups are expanded depth-first in place. A single counter runs
//! across the whole walk, so indices stay contiguous across groups and header
//! nodes never consume one.

use serde_json::Value;

use crate::error::OptionDataError;
use crate::option::{OptionRecord, RawEntry, SelectOption, entries_from_json};

/// Flatten raw entries into a list of options with indices `0..n`.
///
/// # Arguments
///
/// * `entries` - Primitive values, option records and header groups, in
///   display order. Groups may nest.
///
/// # Returns
///
/// One [`SelectOption`] per non-header leaf, in depth-first order, with
/// `index` equal to its position. Records lacking a `value` take their
/// `text` and vice versa.
///
/// # Examples
///
/// ```
/// use selectrank::normalize::normalize;
/// use selectrank::option::{HeaderGroup, RawEntry};
///
/// let entries = vec![
///     RawEntry::from("a"),
///     HeaderGroup::new(vec![RawEntry::from("b"), RawEntry::from("c")]).into(),
///     RawEntry::from("d"),
/// ];
/// let options = normalize(&entries);
/// let indices: Vec<usize> = options.iter().map(|o| o.index).collect();
/// assert_eq!(indices, [0, 1, 2, 3]);
/// assert_eq!(options[2].text, "c");
/// ```
pub fn normalize(entries: &[RawEntry]) -> Vec<SelectOption> {
    let mut out = Vec::with_capacity(entries.len());
    flatten_into(entries, &mut out);
    out
}

fn flatten_into(entries: &[RawEntry], out: &mut Vec<SelectOption>) {
    for entry in entries {
        match entry {
            RawEntry::Header(group) => flatten_into(&group.data, out),
            RawEntry::Primitive(v) => {
                let index = out.len();
                out.push(SelectOption::new(v.as_str(), v.as_str()).with_index(index));
            }
            RawEntry::Record(record) => {
                let index = out.len();
                out.push(option_from_record(record, index));
            }
        }
    }
}

fn option_from_record(record: &OptionRecord, index: usize) -> SelectOption {
    // A record always has at least one of the two; the decoder enforces it.
    let text = record
        .text
        .clone()
        .or_else(|| record.value.clone())
        .unwrap_or_default();
    let value = record.value.clone().unwrap_or_else(|| text.clone());

    let mut option = SelectOption::new(text, value).with_index(index);
    if let Some(description) = &record.description {
        option = option.with_description(description.as_str());
    }
    option.extra_class = record.extra_class.clone();
    option.disabled = record.disabled;
    option
}

/// Re-assign `index = position` on an already-flat list.
pub fn renumber(mut options: Vec<SelectOption>) -> Vec<SelectOption> {
    for (i, option) in options.iter_mut().enumerate() {
        option.index = i;
    }
    options
}

/// Decode a JSON array and flatten it.
pub fn normalize_value(value: &Value) -> Result<Vec<SelectOption>, OptionDataError> {
    let entries = entries_from_json(value)?;
    Ok(normalize(&entries))
}

/// Parse JSON text and flatten it.
pub fn normalize_json(json: &str) -> Result<Vec<SelectOption>, OptionDataError> {
    let value: Value = serde_json::from_str(json)?;
    normalize_value(&value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::option::HeaderGroup;

    fn indices(options: &[SelectOption]) -> Vec<usize> {
        options.iter().map(|o| o.index).collect()
    }

    #[test]
    fn empty_input() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn primitive_becomes_text_and_value() {
        let options = normalize(&[RawEntry::from("x")]);
        assert_eq!(options, vec![SelectOption::new("x", "x")]);
    }

    #[test]
    fn nested_groups_share_one_counter() {
        let entries = vec![
            HeaderGroup::new(vec![
                RawEntry::from("a"),
                HeaderGroup::new(vec![RawEntry::from("b")]).into(),
            ])
            .into(),
            RawEntry::from("c"),
            HeaderGroup::new(vec![]).into(),
            HeaderGroup::new(vec![RawEntry::from("d")]).into(),
        ];
        let options = normalize(&entries);
        assert_eq!(indices(&options), [0, 1, 2, 3]);
        let texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn record_missing_value_mirrors_text() {
        let options = normalize(&[OptionRecord::text_only("Apple").into()]);
        assert_eq!(options[0].value, "Apple");
    }

    #[test]
    fn record_missing_text_mirrors_value() {
        let record = OptionRecord {
            value: Some("v".to_owned()),
            ..OptionRecord::default()
        };
        let options = normalize(&[record.into()]);
        assert_eq!(options[0].text, "v");
    }

    #[test]
    fn record_keeps_optional_fields() {
        let record = OptionRecord::new("A", "a")
            .with_description("desc")
            .with_extra_class("tag");
        let options = normalize(&[RawEntry::from("z"), record.into()]);
        assert_eq!(options[1].index, 1);
        assert_eq!(options[1].description.as_deref(), Some("desc"));
        assert_eq!(options[1].extra_class.as_deref(), Some("tag"));
    }

    #[test]
    fn normalizing_is_idempotent_on_flat_input() {
        let entries = vec![RawEntry::from("a"), RawEntry::from("b")];
        assert_eq!(normalize(&entries), normalize(&entries));
    }

    #[test]
    fn renumber_overwrites_stale_indices() {
        let options = vec![
            SelectOption::new("a", "a").with_index(7),
            SelectOption::new("b", "b").with_index(7),
        ];
        assert_eq!(indices(&renumber(options)), [0, 1]);
    }

    #[test]
    fn normalize_value_reports_bad_headers() {
        let err = normalize_value(&json!([{"header": true, "data": "nope"}])).unwrap_err();
        assert!(matches!(err, OptionDataError::InvalidOptionData { .. }));
    }

    #[test]
    fn normalize_json_flattens_groups() {
        let options =
            normalize_json(r#"[{"header": true, "data": [{"text": "A", "value": 1}]}, 2]"#)
                .unwrap();
        assert_eq!(indices(&options), [0, 1]);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[1].text, "2");
    }
}
