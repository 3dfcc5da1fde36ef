//! Index, value and text addressing of a normalized option list.
//!
//! Every operation comes in a single-item form and an explicit batch form
//! (`*_all_*`) that maps the single form over a slice of keys. Value and text
//! lookups return every matching position, in list order.

use tracing::warn;

use crate::option::SelectOption;

/// Resolve a possibly negative index against a list of `len` items.
///
/// Negative indices count from the end (`-1` is the last item).
///
/// # Arguments
///
/// * `len` - Length of the list being indexed
/// * `index` - Requested position, negative to count from the end
///
/// # Returns
///
/// The position in `0..len`, or `None` when the resolved position is out of
/// range.
///
/// # Examples
///
/// ```
/// use selectrank::lookup::resolve_index;
///
/// assert_eq!(resolve_index(4, 1), Some(1));
/// assert_eq!(resolve_index(4, -1), Some(3));
/// assert_eq!(resolve_index(4, -5), None);
/// assert_eq!(resolve_index(4, 4), None);
/// ```
pub fn resolve_index(len: usize, index: isize) -> Option<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index.unsigned_abs()
    };
    (resolved < len).then_some(resolved)
}

/// The option at `index`, negative counting from the end.
pub fn find_by_index(options: &[SelectOption], index: isize) -> Option<&SelectOption> {
    resolve_index(options.len(), index).map(|i| &options[i])
}

/// Positions of every option whose value equals `value`.
pub fn find_by_value(options: &[SelectOption], value: &str) -> Vec<usize> {
    positions(options, |o| o.value == value)
}

/// Positions of every option whose label equals `text`.
pub fn find_by_text(options: &[SelectOption], text: &str) -> Vec<usize> {
    positions(options, |o| o.text == text)
}

/// Batch form of [`find_by_index`].
pub fn find_all_by_index<'a>(
    options: &'a [SelectOption],
    indices: &[isize],
) -> Vec<Option<&'a SelectOption>> {
    indices.iter().map(|&i| find_by_index(options, i)).collect()
}

/// Batch form of [`find_by_value`].
pub fn find_all_by_value<S: AsRef<str>>(options: &[SelectOption], values: &[S]) -> Vec<Vec<usize>> {
    values
        .iter()
        .map(|v| find_by_value(options, v.as_ref()))
        .collect()
}

/// Batch form of [`find_by_text`].
pub fn find_all_by_text<S: AsRef<str>>(options: &[SelectOption], texts: &[S]) -> Vec<Vec<usize>> {
    texts
        .iter()
        .map(|t| find_by_text(options, t.as_ref()))
        .collect()
}

/// Set the disabled flag of the option at `index`.
///
/// Returns the resolved position, or `None` (with a warning) when there is
/// no such option.
pub fn set_disabled_by_index(
    options: &mut [SelectOption],
    index: isize,
    disabled: bool,
) -> Option<usize> {
    let Some(pos) = resolve_index(options.len(), index) else {
        warn!(index, len = options.len(), "no option to toggle at index");
        return None;
    };
    options[pos].disabled = disabled;
    Some(pos)
}

/// Set the disabled flag of every option whose value equals `value`.
pub fn set_disabled_by_value(
    options: &mut [SelectOption],
    value: &str,
    disabled: bool,
) -> Vec<usize> {
    let hits = find_by_value(options, value);
    if hits.is_empty() {
        warn!(value, "no option to toggle with value");
    }
    toggle(options, &hits, disabled);
    hits
}

/// Set the disabled flag of every option whose label equals `text`.
pub fn set_disabled_by_text(
    options: &mut [SelectOption],
    text: &str,
    disabled: bool,
) -> Vec<usize> {
    let hits = find_by_text(options, text);
    if hits.is_empty() {
        warn!(text, "no option to toggle with text");
    }
    toggle(options, &hits, disabled);
    hits
}

/// Batch form of [`set_disabled_by_index`].
pub fn set_disabled_all_by_index(
    options: &mut [SelectOption],
    indices: &[isize],
    disabled: bool,
) -> Vec<Option<usize>> {
    indices
        .iter()
        .map(|&i| set_disabled_by_index(options, i, disabled))
        .collect()
}

/// Batch form of [`set_disabled_by_value`].
pub fn set_disabled_all_by_value<S: AsRef<str>>(
    options: &mut [SelectOption],
    values: &[S],
    disabled: bool,
) -> Vec<Vec<usize>> {
    values
        .iter()
        .map(|v| set_disabled_by_value(options, v.as_ref(), disabled))
        .collect()
}

/// Batch form of [`set_disabled_by_text`].
pub fn set_disabled_all_by_text<S: AsRef<str>>(
    options: &mut [SelectOption],
    texts: &[S],
    disabled: bool,
) -> Vec<Vec<usize>> {
    texts
        .iter()
        .map(|t| set_disabled_by_text(options, t.as_ref(), disabled))
        .collect()
}

fn positions(options: &[SelectOption], pred: impl Fn(&SelectOption) -> bool) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, o)| pred(o))
        .map(|(i, _)| i)
        .collect()
}

fn toggle(options: &mut [SelectOption], positions: &[usize], disabled: bool) {
    for &pos in positions {
        options[pos].disabled = disabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SelectOption> {
        vec![
            SelectOption::new("One", "1"),
            SelectOption::new("Two", "2"),
            SelectOption::new("Deux", "2"),
            SelectOption::new("Three", "3"),
        ]
    }

    #[test]
    fn resolve_index_bounds() {
        assert_eq!(resolve_index(0, 0), None);
        assert_eq!(resolve_index(0, -1), None);
        assert_eq!(resolve_index(3, -3), Some(0));
        assert_eq!(resolve_index(3, isize::MIN), None);
        assert_eq!(resolve_index(3, 2), Some(2));
    }

    #[test]
    fn find_by_index_negative() {
        let options = sample();
        assert_eq!(find_by_index(&options, -1).map(|o| o.text.as_str()), Some("Three"));
        assert!(find_by_index(&options, 9).is_none());
    }

    #[test]
    fn find_by_value_returns_every_match() {
        assert_eq!(find_by_value(&sample(), "2"), [1, 2]);
        assert!(find_by_value(&sample(), "9").is_empty());
    }

    #[test]
    fn find_by_text_is_exact() {
        assert_eq!(find_by_text(&sample(), "Two"), [1]);
        assert!(find_by_text(&sample(), "two").is_empty());
    }

    #[test]
    fn batch_forms_map_single_forms() {
        let options = sample();
        let found = find_all_by_index(&options, &[0, -1, 7]);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].map(|o| o.value.as_str()), Some("1"));
        assert!(found[2].is_none());

        assert_eq!(find_all_by_value(&options, &["2", "3"]), vec![vec![1, 2], vec![3]]);
        assert_eq!(find_all_by_text(&options, &["One"]), vec![vec![0]]);
    }

    #[test]
    fn disable_and_reenable_by_index() {
        let mut options = sample();
        assert_eq!(set_disabled_by_index(&mut options, -2, true), Some(2));
        assert!(options[2].disabled);
        assert_eq!(set_disabled_by_index(&mut options, 2, false), Some(2));
        assert!(!options[2].disabled);
        assert_eq!(set_disabled_by_index(&mut options, 8, true), None);
    }

    #[test]
    fn disable_by_value_touches_all_matches() {
        let mut options = sample();
        assert_eq!(set_disabled_by_value(&mut options, "2", true), [1, 2]);
        let disabled: Vec<bool> = options.iter().map(|o| o.disabled).collect();
        assert_eq!(disabled, [false, true, true, false]);
    }

    #[test]
    fn batch_disable() {
        let mut options = sample();
        let hits = set_disabled_all_by_text(&mut options, &["One", "Nope"], true);
        assert_eq!(hits, vec![vec![0], vec![]]);
        let hits = set_disabled_all_by_index(&mut options, &[3], true);
        assert_eq!(hits, vec![Some(3)]);
        let hits = set_disabled_all_by_value(&mut options, &["1", "3"], false);
        assert_eq!(hits, vec![vec![0], vec![3]]);
        assert!(options.iter().all(|o| !o.disabled));
    }
}
