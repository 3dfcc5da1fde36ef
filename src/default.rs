//! Choice of the option preselected when a widget is built or rebuilt.
//!
//! [`select_default`] walks a fixed priority chain and always lands on exactly
//! one option. When a placeholder is in force it is synthesized and prepended
//! to the returned list; the caller's list is taken by value, so nothing
//! shared is mutated behind its back.

use tracing::debug;

use crate::config::{DEFAULT_PLACEHOLDER, SelectConfig};
use crate::lookup::resolve_index;
use crate::normalize::renumber;
use crate::option::SelectOption;

/// Whether the widget is being built for the first time or rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Build<'a> {
    /// First build; no previous selection exists.
    #[default]
    Initial,
    /// Rebuild after a data replacement.
    Rebuild {
        /// The value the widget had selected before the rebuild, if any.
        selected_value: Option<&'a str>,
    },
}

/// Which rule of the chain produced the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// A placeholder option was synthesized and prepended.
    Placeholder,
    /// The value selected before a rebuild still exists.
    Preserved,
    /// `default_index` resolved to an option.
    Index,
    /// `default_value` matched an option.
    Value,
    /// Fallback to the first option.
    First,
}

/// Outcome of [`select_default`].
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultSelection {
    /// The list the controller should render; starts with the placeholder
    /// when [`source`](Self::source) is [`DefaultSource::Placeholder`].
    pub options: Vec<SelectOption>,
    /// Position of the chosen option in `options`.
    pub selected: usize,
    /// The rule that picked it.
    pub source: DefaultSource,
}

impl DefaultSelection {
    /// The chosen option.
    pub fn option(&self) -> &SelectOption {
        &self.options[self.selected]
    }
}

/// Pick the option to preselect.
///
/// Rules, first match wins:
///
/// 1. A multi-select widget with neither `default_index` nor `default_value`
///    gets a placeholder ([`DEFAULT_PLACEHOLDER`] unless one is configured).
/// 2. `default_empty` forces an empty placeholder.
/// 3. If a placeholder is in force, or `options` is empty, a placeholder is
///    prepended and chosen.
/// 4. On rebuild, the previously selected value is kept if still present.
/// 5. `default_index`, negative counting from the end.
/// 6. `default_value`.
/// 7. The first option.
///
/// `options` is re-numbered first, so stale indices on the input are
/// harmless.
///
/// # Arguments
///
/// * `config` - The widget's default-selection settings
/// * `options` - The normalized list, consumed
/// * `build` - [`Build::Initial`] or a rebuild carrying the value selected
///   before it
///
/// # Returns
///
/// A [`DefaultSelection`] holding the final list (with any placeholder at
/// index 0), the position of the chosen option and the rule that chose it.
///
/// # Examples
///
/// ```
/// use selectrank::{Build, DefaultSource, SelectConfig, SelectOption, select_default};
///
/// let options = vec![SelectOption::new("a", "a"), SelectOption::new("b", "b")];
/// let config = SelectConfig::default().with_default_index(-1);
/// let sel = select_default(&config, options, Build::Initial);
/// assert_eq!(sel.option().text, "b");
/// assert_eq!(sel.source, DefaultSource::Index);
/// ```
pub fn select_default(
    config: &SelectConfig,
    options: Vec<SelectOption>,
    build: Build<'_>,
) -> DefaultSelection {
    let options = renumber(options);

    if let Some(text) = placeholder_in_force(config, options.is_empty()) {
        debug!(placeholder = %text, "default selection: placeholder");
        return with_placeholder(options, text);
    }

    let picked = preserved(&options, build)
        .map(|i| (i, DefaultSource::Preserved))
        .or_else(|| by_index(&options, config.default_index).map(|i| (i, DefaultSource::Index)))
        .or_else(|| {
            config
                .default_value
                .as_deref()
                .and_then(|v| first_with_value(&options, v))
                .map(|i| (i, DefaultSource::Value))
        });

    // `options` is non-empty here: an empty list always takes the placeholder.
    let (selected, source) = picked.unwrap_or((0, DefaultSource::First));
    debug!(selected, ?source, "default selection");
    DefaultSelection {
        options,
        selected,
        source,
    }
}

/// The placeholder text to synthesize, if rules 1 to 3 put one in force.
fn placeholder_in_force(config: &SelectConfig, is_empty: bool) -> Option<String> {
    let mut placeholder = config.placeholder.clone();

    if config.is_multiple() && config.default_index.is_none() && config.default_value.is_none() {
        placeholder.get_or_insert_with(|| DEFAULT_PLACEHOLDER.to_owned());
    }

    if config.default_empty {
        placeholder = Some(String::new());
    }

    match placeholder {
        Some(text) => Some(text),
        None if is_empty => Some(DEFAULT_PLACEHOLDER.to_owned()),
        None => None,
    }
}

fn with_placeholder(options: Vec<SelectOption>, text: String) -> DefaultSelection {
    let mut list = Vec::with_capacity(options.len() + 1);
    list.push(SelectOption::placeholder(text));
    list.extend(options);
    DefaultSelection {
        options: renumber(list),
        selected: 0,
        source: DefaultSource::Placeholder,
    }
}

fn preserved(options: &[SelectOption], build: Build<'_>) -> Option<usize> {
    match build {
        Build::Rebuild {
            selected_value: Some(value),
        } => first_with_value(options, value),
        _ => None,
    }
}

fn by_index(options: &[SelectOption], index: Option<isize>) -> Option<usize> {
    resolve_index(options.len(), index?)
}

fn first_with_value(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|o| o.value == value)
}
