//! Weighted relevance ranking of options against a typed query.
//!
//! Every query re-scores the full option list. An option's score is the sum
//! of two contributions:
//!
//! - **Containment**: for each [`ScoreField`] and each query token, a field
//!   containing the token `n` times earns `weight * n * 10`; a field that is
//!   present but lacks the token costs `weight`. Absent fields (no
//!   description) contribute nothing.
//! - **Prefix bonus**: when the whole query prefixes the lowercased label or
//!   value, that field's prefix weight is added.
//!
//! Scores are floored to integers, sorted descending (ties by index) and
//! cards below [`SearchConfig::minimum_score`] are dropped.
//!
//! Query tokens are matched as literal text, so characters such as `.` or `*`
//! carry no pattern meaning.

pub mod fields;
pub mod sort;

use memchr::memmem::Finder;
use tracing::{debug, trace};

use crate::config::{SearchConfig, SearchWeights};
use crate::normalize::normalize;
use crate::option::{RawEntry, SelectOption};
use fields::{FieldTarget, ScoreField, SearchFields, fold};
use sort::compare_score_cards;

/// One ranked option.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    /// Position of the option in the ranked list.
    pub index: usize,
    /// The option, with `index` set to its position.
    pub item: SelectOption,
    /// Floored relevance score.
    pub score: i64,
}

/// Result of a search pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was too short; show the unfiltered list.
    Inactive,
    /// Cards that met the minimum score, best first. May be empty.
    Ranked(Vec<ScoreCard>),
}

impl SearchOutcome {
    /// Whether a search actually ran.
    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Ranked(_))
    }

    /// The ranked cards, or `None` when search is inactive.
    pub fn cards(&self) -> Option<&[ScoreCard]> {
        match self {
            SearchOutcome::Inactive => None,
            SearchOutcome::Ranked(cards) => Some(cards),
        }
    }

    /// Consume the outcome, returning the cards when search ran.
    pub fn into_cards(self) -> Option<Vec<ScoreCard>> {
        match self {
            SearchOutcome::Inactive => None,
            SearchOutcome::Ranked(cards) => Some(cards),
        }
    }
}

/// Query data prepared once per search and shared across all options.
struct PreparedQuery {
    tokens: Vec<String>,
    /// Literal substring searchers, one per token.
    finders: Vec<Finder<'static>>,
    /// Tokens re-joined by single spaces, for the prefix bonus.
    joined: String,
}

impl PreparedQuery {
    fn new(query: &str, keep_diacritics: bool) -> Self {
        let tokens: Vec<String> = fold(query, keep_diacritics)
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        let finders = tokens
            .iter()
            .map(|t| Finder::new(t.as_bytes()).into_owned())
            .collect();
        let joined = tokens.join(" ");
        Self {
            tokens,
            finders,
            joined,
        }
    }
}

/// Number of times `token` occurs in `target`.
fn occurrences(target: FieldTarget<'_>, token: &str, finder: &Finder<'_>) -> usize {
    match target {
        FieldTarget::Str(s) => finder.find_iter(s.as_bytes()).count(),
        FieldTarget::Tokens(words) => words.iter().filter(|w| *w == token).count(),
    }
}

/// Score one option's projections against a prepared query.
fn score_fields(fields: &SearchFields, pq: &PreparedQuery, weights: &SearchWeights) -> i64 {
    let mut score = 0.0;

    for field in ScoreField::ALL {
        let Some(target) = field.target(fields) else {
            continue;
        };
        let weight = field.weight(weights);
        for (token, finder) in pq.tokens.iter().zip(&pq.finders) {
            let count = occurrences(target, token, finder);
            if count > 0 {
                score += weight * count as f64 * 10.0;
            } else {
                // Charged on every present field, even ones unrelated to
                // the match.
                score -= weight;
            }
        }
    }

    if fields.text.starts_with(&pq.joined) {
        score += weights.text_prefix;
    }
    if fields.value.starts_with(&pq.joined) {
        score += weights.value_prefix;
    }

    score.floor() as i64
}

/// Whether `query` is long enough to start a search.
///
/// The length is counted on the query as typed; trimming only decides
/// whether there is anything to search for at all.
fn is_searchable(query: &str, minimum_value_length: usize) -> bool {
    !query.trim().is_empty() && query.chars().count() >= minimum_value_length
}

/// Rank `options` against `query` without retaining anything.
///
/// Search projections are cached on the options themselves, so repeated
/// calls over the same list only tokenize each option once.
///
/// # Arguments
///
/// * `config` - Minimum query length, minimum score, diacritics mode and
///   field weights.
/// * `options` - The normalized list. Positions in this slice become the
///   card indices, whatever `index` the options carry.
/// * `query` - The raw query text.
///
/// # Returns
///
/// [`SearchOutcome::Inactive`] when `query` is blank or has fewer chars than
/// `config.minimum_value_length`. Otherwise [`SearchOutcome::Ranked`] with
/// the cards scoring at least `config.minimum_score`, best first and ties in
/// list order.
///
/// # Examples
///
/// ```
/// use selectrank::{SearchConfig, SearchOutcome, SelectOption, rank_options};
///
/// let options = vec![
///     SelectOption::new("Apple", "apple"),
///     SelectOption::new("Banana", "banana"),
/// ];
/// let outcome = rank_options(&SearchConfig::default(), &options, "ap");
/// let cards = outcome.cards().unwrap();
/// assert_eq!(cards.len(), 1);
/// assert_eq!(cards[0].item.text, "Apple");
///
/// assert_eq!(rank_options(&SearchConfig::default(), &options, "  "), SearchOutcome::Inactive);
/// ```
pub fn rank_options(config: &SearchConfig, options: &[SelectOption], query: &str) -> SearchOutcome {
    if !is_searchable(query, config.minimum_value_length) {
        debug!(query, "search inactive: query below minimum length");
        return SearchOutcome::Inactive;
    }

    let pq = PreparedQuery::new(query, config.keep_diacritics);

    let mut cards: Vec<ScoreCard> = options
        .iter()
        .enumerate()
        .filter_map(|(pos, option)| {
            let fields = option.search_fields(config.keep_diacritics);
            let score = score_fields(&fields, &pq, &config.weights);
            trace!(pos, text = %option.text, score, "scored option");
            (score >= config.minimum_score).then(|| ScoreCard {
                index: pos,
                item: option.clone().with_index(pos),
                score,
            })
        })
        .collect();

    cards.sort_by(compare_score_cards);

    debug!(
        query,
        scored = options.len(),
        kept = cards.len(),
        "search ranked"
    );
    SearchOutcome::Ranked(cards)
}

/// A search engine holding its configuration and the last ranking it made.
///
/// # Examples
///
/// ```
/// use selectrank::{SearchConfig, SearchEngine, SelectOption};
///
/// let options = vec![SelectOption::new("Apricot", "apricot")];
/// let mut engine = SearchEngine::new(SearchConfig::default());
/// assert!(engine.rank(&options, "apr").is_active());
/// assert_eq!(engine.last_results().map(|r| r.len()), Some(1));
///
/// assert!(!engine.rank(&options, "").is_active());
/// assert!(engine.last_results().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    last_results: Option<Vec<ScoreCard>>,
}

impl SearchEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            last_results: None,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank an already-normalized list.
    ///
    /// Indices on the returned cards are positions in `options`, whatever
    /// `index` the options carried before.
    pub fn rank(&mut self, options: &[SelectOption], query: &str) -> SearchOutcome {
        let outcome = rank_options(&self.config, options, query);
        self.last_results = outcome.cards().map(<[ScoreCard]>::to_vec);
        outcome
    }

    /// Normalize raw entries and rank the result.
    pub fn rank_entries(&mut self, entries: &[RawEntry], query: &str) -> SearchOutcome {
        let options = normalize(entries);
        self.rank(&options, query)
    }

    /// The cards from the most recent active search, or `None` when the last
    /// query was too short or nothing has been ranked yet.
    pub fn last_results(&self) -> Option<&[ScoreCard]> {
        self.last_results.as_deref()
    }
}
