//! Configuration for default selection and search ranking.
//!
//! [`SelectConfig`] carries the widget settings that drive
//! [`select_default`](crate::default::select_default). [`SearchConfig`] holds
//! the thresholds and field weights used by
//! [`SearchEngine`](crate::search::SearchEngine). Both are immutable values:
//! the engine copies its configuration at construction, so two engines never
//! share tuning by accident.
//!
//! Both deserialize from the widget's camelCase JSON configuration, where
//! `false` is accepted in place of an absent setting.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder text used when a placeholder is forced without one configured.
pub const DEFAULT_PLACEHOLDER: &str = "Please choose an option";

/// Widget settings read by the default-selection chain.
///
/// # Examples
///
/// ```
/// use selectrank::SelectConfig;
///
/// let config: SelectConfig =
///     serde_json::from_str(r#"{"defaultIndex": -1, "placeholder": false}"#).unwrap();
/// assert_eq!(config.default_index, Some(-1));
/// assert_eq!(config.placeholder, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectConfig {
    /// Index of the option to preselect; negative counts from the end.
    #[serde(deserialize_with = "int_or_false")]
    pub default_index: Option<isize>,
    /// Value of the option to preselect.
    #[serde(deserialize_with = "scalar_or_false")]
    pub default_value: Option<String>,
    /// Start with an empty placeholder regardless of other settings.
    pub default_empty: bool,
    /// Placeholder text; `Some("")` is an empty placeholder.
    #[serde(deserialize_with = "scalar_or_false")]
    pub placeholder: Option<String>,
    /// Multi-select widget.
    pub multiple: bool,
    /// Multi-select widget rendering selections as tags.
    pub multiple_tags: bool,
}

impl SelectConfig {
    /// Preselect the option at `index`.
    pub fn with_default_index(mut self, index: isize) -> Self {
        self.default_index = Some(index);
        self
    }

    /// Preselect the first option with `value`.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Show `text` as a placeholder.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Start with an empty placeholder.
    pub fn with_default_empty(mut self, default_empty: bool) -> Self {
        self.default_empty = default_empty;
        self
    }

    /// Mark the widget as multi-select.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Mark the widget as multi-select with tags.
    pub fn with_multiple_tags(mut self, multiple_tags: bool) -> Self {
        self.multiple_tags = multiple_tags;
        self
    }

    /// Whether either multi-select mode is on.
    pub fn is_multiple(&self) -> bool {
        self.multiple || self.multiple_tags
    }
}

/// Per-field weights used by containment scoring and the prefix bonus.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchWeights {
    /// Lowercased label, substring occurrences.
    pub text: f64,
    /// Label tokens, exact token matches.
    pub text_tokens: f64,
    /// Bonus when the query prefixes the label.
    pub text_prefix: f64,
    /// Lowercased value, substring occurrences.
    pub value: f64,
    /// Value tokens, exact token matches.
    pub value_tokens: f64,
    /// Bonus when the query prefixes the value.
    pub value_prefix: f64,
    /// Lowercased description, substring occurrences.
    pub description: f64,
    /// Description tokens, exact token matches.
    pub description_tokens: f64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            text: 30.0,
            text_tokens: 10.0,
            text_prefix: 50.0,
            value: 30.0,
            value_tokens: 10.0,
            value_prefix: 50.0,
            description: 15.0,
            description_tokens: 30.0,
        }
    }
}

/// Thresholds and weights for the search engine.
///
/// # Defaults
///
/// - `minimum_value_length`: `1`
/// - `minimum_score`: `0` (cards scoring exactly the minimum are kept)
/// - `keep_diacritics`: `true` (no accent folding)
/// - `weights`: [`SearchWeights::default`]
///
/// # Examples
///
/// ```
/// use selectrank::SearchConfig;
///
/// let config = SearchConfig::default().with_minimum_score(-50);
/// assert_eq!(config.minimum_value_length, 1);
/// assert_eq!(config.minimum_score, -50);
/// assert!(config.keep_diacritics);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Queries with fewer characters leave search inactive. Surrounding
    /// whitespace counts; a blank query is always inactive.
    pub minimum_value_length: usize,
    /// Cards scoring strictly below this are filtered out.
    pub minimum_score: i64,
    /// When `false`, combining marks are stripped before comparison so that
    /// `cafe` matches `caf\u{e9}`.
    pub keep_diacritics: bool,
    /// Field weights.
    pub weights: SearchWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            minimum_value_length: 1,
            minimum_score: 0,
            keep_diacritics: true,
            weights: SearchWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Set the minimum query length.
    pub fn with_minimum_value_length(mut self, len: usize) -> Self {
        self.minimum_value_length = len;
        self
    }

    /// Set the minimum score a card needs to be kept.
    pub fn with_minimum_score(mut self, score: i64) -> Self {
        self.minimum_score = score;
        self
    }

    /// Toggle diacritic folding.
    pub fn with_keep_diacritics(mut self, keep: bool) -> Self {
        self.keep_diacritics = keep;
        self
    }

    /// Replace the field weights.
    pub fn with_weights(mut self, weights: SearchWeights) -> Self {
        self.weights = weights;
        self
    }
}

fn int_or_false<'de, D: Deserializer<'de>>(d: D) -> Result<Option<isize>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| isize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("index {n} is not an integer"))),
        other => Err(D::Error::custom(format!(
            "expected an integer or false, found {other}"
        ))),
    }
}

fn scalar_or_false<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string, number or false, found {other}"
        ))),
    }
}
