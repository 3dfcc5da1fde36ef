//! Search projections of an option and the fields they are scored on.
//!
//! [`SearchFields`] is computed once per option and cached on it. A
//! [`ScoreField`] names one projection and knows its weight, in the same way
//! a key names one extractable value of an item.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::SearchWeights;
use crate::option::SelectOption;

/// Prepare a string for comparison by optionally stripping diacritics.
///
/// When `keep_diacritics` is `false`, applies Unicode NFD decomposition and
/// removes combining marks, so `caf\u{e9}` becomes `cafe`. Returns
/// [`Cow::Borrowed`] whenever nothing had to be removed.
///
/// # Examples
///
/// ```
/// use selectrank::search::fields::prepare_value_for_comparison;
///
/// assert_eq!(prepare_value_for_comparison("cafe\u{0301}", false), "cafe");
/// assert_eq!(prepare_value_for_comparison("cafe\u{0301}", true), "cafe\u{0301}");
/// ```
pub fn prepare_value_for_comparison(s: &str, keep_diacritics: bool) -> Cow<'_, str> {
    // ASCII never carries combining marks.
    if keep_diacritics || s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// Lowercase `s` after optional diacritic stripping.
pub(crate) fn fold(s: &str, keep_diacritics: bool) -> String {
    prepare_value_for_comparison(s, keep_diacritics).to_lowercase()
}

fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_owned).collect()
}

/// Lowercase and tokenized projections of an option's searchable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFields {
    keep_diacritics: bool,
    /// Lowercased label.
    pub text: String,
    /// Whitespace-separated tokens of `text`.
    pub text_tokens: Vec<String>,
    /// Lowercased value.
    pub value: String,
    /// Whitespace-separated tokens of `value`.
    pub value_tokens: Vec<String>,
    /// Lowercased description; `None` when absent or empty.
    pub description: Option<String>,
    /// Whitespace-separated tokens of `description`.
    pub description_tokens: Option<Vec<String>>,
}

impl SearchFields {
    /// Project `option` for searching.
    pub fn new(option: &SelectOption, keep_diacritics: bool) -> Self {
        let text = fold(&option.text, keep_diacritics);
        let value = fold(&option.value, keep_diacritics);
        let description = option
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| fold(d, keep_diacritics));

        Self {
            keep_diacritics,
            text_tokens: tokens(&text),
            text,
            value_tokens: tokens(&value),
            value,
            description_tokens: description.as_deref().map(tokens),
            description,
        }
    }

    /// The diacritics mode these projections were computed in.
    pub fn keep_diacritics(&self) -> bool {
        self.keep_diacritics
    }
}

/// What a [`ScoreField`] resolves to on a particular option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget<'a> {
    /// Whole string; matched by substring occurrence count.
    Str(&'a str),
    /// Token list; matched by exact token equality.
    Tokens(&'a [String]),
}

/// One scored projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreField {
    /// Lowercased label.
    Text,
    /// Label tokens.
    TextTokens,
    /// Lowercased value.
    Value,
    /// Value tokens.
    ValueTokens,
    /// Lowercased description.
    Description,
    /// Description tokens.
    DescriptionTokens,
}

impl ScoreField {
    /// Every field that takes part in containment scoring, in scoring order.
    pub const ALL: [ScoreField; 6] = [
        ScoreField::Text,
        ScoreField::TextTokens,
        ScoreField::Value,
        ScoreField::ValueTokens,
        ScoreField::Description,
        ScoreField::DescriptionTokens,
    ];

    /// Containment weight of this field.
    pub fn weight(self, weights: &SearchWeights) -> f64 {
        match self {
            ScoreField::Text => weights.text,
            ScoreField::TextTokens => weights.text_tokens,
            ScoreField::Value => weights.value,
            ScoreField::ValueTokens => weights.value_tokens,
            ScoreField::Description => weights.description,
            ScoreField::DescriptionTokens => weights.description_tokens,
        }
    }

    /// The projection this field reads, or `None` when the option lacks it.
    pub fn target(self, fields: &SearchFields) -> Option<FieldTarget<'_>> {
        match self {
            ScoreField::Text => Some(FieldTarget::Str(&fields.text)),
            ScoreField::TextTokens => Some(FieldTarget::Tokens(&fields.text_tokens)),
            ScoreField::Value => Some(FieldTarget::Str(&fields.value)),
            ScoreField::ValueTokens => Some(FieldTarget::Tokens(&fields.value_tokens)),
            ScoreField::Description => fields.description.as_deref().map(FieldTarget::Str),
            ScoreField::DescriptionTokens => {
                fields.description_tokens.as_deref().map(FieldTarget::Tokens)
            }
        }
    }
}
