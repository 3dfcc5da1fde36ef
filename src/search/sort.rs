//! Ordering of score cards.
//!
//! Higher score first; equal scores keep list order by comparing the option
//! index, so repeated searches over the same list order identically.

use std::cmp::Ordering;

use crate::search::ScoreCard;

/// Two-level comparator for score cards: score descending, then index
/// ascending.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use selectrank::{ScoreCard, SelectOption};
/// use selectrank::search::sort::compare_score_cards;
///
/// let a = ScoreCard { index: 0, item: SelectOption::new("a", "a"), score: 10 };
/// let b = ScoreCard { index: 1, item: SelectOption::new("b", "b"), score: 20 };
/// assert_eq!(compare_score_cards(&a, &b), Ordering::Greater);
/// ```
pub fn compare_score_cards(a: &ScoreCard, b: &ScoreCard) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index))
}
