//! Option records and the raw input entries they are built from.
//!
//! Raw input arrives as a heterogeneous array: primitive values, option-shaped
//! records, or header groups that nest further entries. [`RawEntry`] is the
//! typed form of one such node; [`SelectOption`] is a normalized, indexed
//! entry produced by [`normalize`](crate::normalize::normalize).

use std::borrow::Cow;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::OptionDataError;
use crate::search::fields::SearchFields;

/// Tag marking an entry the controller should not display in the list.
pub const HIDDEN_CLASS: &str = "hidden";
/// Tag marking a synthesized placeholder entry.
pub const PLACEHOLDER_CLASS: &str = "placeholder";
/// Tag marking the entry shown while remote data is being fetched.
pub const LOADING_CLASS: &str = "loading";
/// Tag marking the entry shown after a remote fetch failed.
pub const LOADING_FAILED_CLASS: &str = "loading-failed";

/// One selectable entry in a normalized list.
///
/// `index` is owned by the normalizer: it is overwritten every time the list
/// is rebuilt and always equals the option's position in the list it belongs
/// to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    /// Display label.
    pub text: String,
    /// Underlying value, already coerced to a string.
    pub value: String,
    /// Position in the flattened list.
    #[serde(default)]
    pub index: usize,
    /// Optional secondary searchable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Presentation tag; never used by ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_class: Option<String>,
    /// Whether the controller should refuse to select this option.
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip)]
    search: OnceLock<CachedSearch>,
}

/// Projections together with the content they were computed from.
#[derive(Debug, Clone)]
struct CachedSearch {
    text: String,
    value: String,
    description: Option<String>,
    fields: SearchFields,
}

impl CachedSearch {
    fn new(option: &SelectOption, keep_diacritics: bool) -> Self {
        Self {
            text: option.text.clone(),
            value: option.value.clone(),
            description: option.description.clone(),
            fields: SearchFields::new(option, keep_diacritics),
        }
    }

    fn is_current(&self, option: &SelectOption, keep_diacritics: bool) -> bool {
        self.fields.keep_diacritics() == keep_diacritics
            && self.text == option.text
            && self.value == option.value
            && self.description == option.description
    }
}

// The search cache is derived data, so it takes no part in equality.
impl PartialEq for SelectOption {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.value == other.value
            && self.index == other.index
            && self.description == other.description
            && self.extra_class == other.extra_class
            && self.disabled == other.disabled
    }
}

impl Eq for SelectOption {}

impl SelectOption {
    /// Create an option with the given label and value at index 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use selectrank::SelectOption;
    ///
    /// let opt = SelectOption::new("Apple", "apple").with_description("a red fruit");
    /// assert_eq!(opt.text, "Apple");
    /// assert_eq!(opt.description.as_deref(), Some("a red fruit"));
    /// ```
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the secondary searchable text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self.search = OnceLock::new();
        self
    }

    /// Set the presentation tag.
    pub fn with_extra_class(mut self, extra_class: impl Into<String>) -> Self {
        self.extra_class = Some(extra_class.into());
        self
    }

    /// Set the index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// A hidden placeholder option with an empty value at index 0.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::new(text, "").with_extra_class(format!("{HIDDEN_CLASS} {PLACEHOLDER_CLASS}"))
    }

    /// The single entry a controller shows while remote data is in flight.
    pub fn loading() -> Self {
        Self::new("", "").with_extra_class(LOADING_CLASS)
    }

    /// The single entry a controller shows after a remote fetch failed.
    pub fn load_failed() -> Self {
        Self::new("", "").with_extra_class(LOADING_FAILED_CLASS)
    }

    /// Whether this option carries the `placeholder` tag.
    pub fn is_placeholder(&self) -> bool {
        self.has_class(PLACEHOLDER_CLASS)
    }

    /// Whether the whitespace-separated `extra_class` contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.extra_class
            .as_deref()
            .is_some_and(|tags| tags.split_whitespace().any(|t| t == class))
    }

    /// Search projections for this option, computed on first use.
    ///
    /// The cache holds the projections for the first `keep_diacritics` mode
    /// asked for, keyed on the `text`, `value` and `description` they were
    /// built from. A request in the other mode, or after any of those fields
    /// was reassigned, is computed fresh and not cached; call
    /// [`refresh_search_fields`](Self::refresh_search_fields) to cache the
    /// new content.
    pub fn search_fields(&self, keep_diacritics: bool) -> Cow<'_, SearchFields> {
        let cached = self
            .search
            .get_or_init(|| CachedSearch::new(self, keep_diacritics));
        if cached.is_current(self, keep_diacritics) {
            Cow::Borrowed(&cached.fields)
        } else {
            Cow::Owned(SearchFields::new(self, keep_diacritics))
        }
    }

    /// Drop any cached projections so the next search caches fresh ones.
    pub fn refresh_search_fields(&mut self) {
        self.search = OnceLock::new();
    }

    /// Whether search projections matching the current content are cached.
    pub fn has_cached_search_fields(&self) -> bool {
        self.search.get().is_some_and(|cached| {
            cached.text == self.text
                && cached.value == self.value
                && cached.description == self.description
        })
    }
}

/// An option-shaped input record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionRecord {
    /// Display label. Falls back to `value` when absent.
    pub text: Option<String>,
    /// Underlying value. Falls back to `text` when absent.
    pub value: Option<String>,
    /// Optional secondary searchable text.
    pub description: Option<String>,
    /// Presentation tag.
    pub extra_class: Option<String>,
    /// Initial disabled state.
    pub disabled: bool,
}

impl OptionRecord {
    /// Record with both a label and a value.
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Record with only a label; its value will mirror the label.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set the secondary searchable text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the presentation tag.
    pub fn with_extra_class(mut self, extra_class: impl Into<String>) -> Self {
        self.extra_class = Some(extra_class.into());
        self
    }
}

/// A non-selectable group label with nested entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderGroup {
    /// Group label, if any. Not materialized as an option.
    pub label: Option<String>,
    /// Grouped entries; may contain further header groups.
    pub data: Vec<RawEntry>,
}

impl HeaderGroup {
    /// Group the given entries without a label.
    pub fn new(data: Vec<RawEntry>) -> Self {
        Self { label: None, data }
    }

    /// Set the group label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One node of raw option input.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    /// A primitive value, rendered to its string form.
    Primitive(String),
    /// An option-shaped record.
    Record(OptionRecord),
    /// A header group whose entries are flattened in place.
    Header(HeaderGroup),
}

impl From<&str> for RawEntry {
    fn from(value: &str) -> Self {
        RawEntry::Primitive(value.to_owned())
    }
}

impl From<String> for RawEntry {
    fn from(value: String) -> Self {
        RawEntry::Primitive(value)
    }
}

impl From<OptionRecord> for RawEntry {
    fn from(record: OptionRecord) -> Self {
        RawEntry::Record(record)
    }
}

impl From<HeaderGroup> for RawEntry {
    fn from(group: HeaderGroup) -> Self {
        RawEntry::Header(group)
    }
}

impl RawEntry {
    /// Interpret one JSON node as a raw entry.
    ///
    /// `path` names the node in error messages.
    pub fn from_json(value: &Value, path: &str) -> Result<Self, OptionDataError> {
        match value {
            Value::String(s) => Ok(RawEntry::Primitive(s.clone())),
            Value::Number(n) => Ok(RawEntry::Primitive(n.to_string())),
            Value::Bool(b) => Ok(RawEntry::Primitive(b.to_string())),
            Value::Null => Err(OptionDataError::invalid(path, "null is not an option")),
            Value::Array(_) => Err(OptionDataError::invalid(
                path,
                "nested arrays must be wrapped in a header group",
            )),
            Value::Object(map) => {
                if map.get("header").is_some_and(is_truthy) {
                    let Some(Value::Array(items)) = map.get("data") else {
                        return Err(OptionDataError::invalid(
                            path,
                            "header group has no `data` array",
                        ));
                    };
                    let data = items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| Self::from_json(item, &format!("{path}.data[{i}]")))
                        .collect::<Result<Vec<_>, _>>()?;
                    let label = scalar_string(map.get("text"), path, "text")?;
                    return Ok(RawEntry::Header(HeaderGroup { label, data }));
                }

                let text = scalar_string(map.get("text"), path, "text")?;
                let value = scalar_string(map.get("value"), path, "value")?;
                if text.is_none() && value.is_none() {
                    return Err(OptionDataError::invalid(
                        path,
                        "option record has neither `text` nor `value`",
                    ));
                }
                Ok(RawEntry::Record(OptionRecord {
                    text,
                    value,
                    description: scalar_string(map.get("description"), path, "description")?,
                    extra_class: scalar_string(map.get("extraClass"), path, "extraClass")?,
                    disabled: map.get("disabled").is_some_and(is_truthy),
                }))
            }
        }
    }
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RawEntry::from_json(&value, "$").map_err(serde::de::Error::custom)
    }
}

/// Parse a JSON array of raw entries, as served by a "load from URL" endpoint.
///
/// # Examples
///
/// ```
/// use selectrank::option::{RawEntry, parse_entries};
///
/// let entries = parse_entries(r#"["a", {"header": true, "data": [1, 2]}]"#).unwrap();
/// assert_eq!(entries[0], RawEntry::Primitive("a".to_owned()));
/// assert!(matches!(entries[1], RawEntry::Header(_)));
/// ```
pub fn parse_entries(json: &str) -> Result<Vec<RawEntry>, OptionDataError> {
    let value: Value = serde_json::from_str(json)?;
    entries_from_json(&value)
}

/// Interpret a JSON array value as a list of raw entries.
pub fn entries_from_json(value: &Value) -> Result<Vec<RawEntry>, OptionDataError> {
    let Value::Array(items) = value else {
        return Err(OptionDataError::NotAnArray(json_kind(value)));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| RawEntry::from_json(item, &format!("$[{i}]")))
        .collect()
}

/// JS-style truthiness for flag fields such as `header` and `disabled`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a scalar field to a string. `null` and a missing field are `None`.
fn scalar_string(
    value: Option<&Value>,
    path: &str,
    field: &str,
) -> Result<Option<String>, OptionDataError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(OptionDataError::invalid(
            path,
            format!("`{field}` must be a scalar, found {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
