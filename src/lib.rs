#![warn(missing_docs)]

//! The data layer of a selectable-list widget.
//!
//! `selectrank` turns heterogeneous option input (primitives, records and
//! nested header groups) into a flat indexed list, picks the option to
//! preselect under a fixed priority chain, and ranks options against a typed
//! query with a weighted containment score. Rendering and event handling are
//! left to the caller.

/// Errors raised while decoding raw option data.
pub mod error;

/// Option records and raw input entries.
pub mod option;

/// Flattening of grouped input into an indexed list.
pub mod normalize;

/// Configuration for default selection and search.
pub mod config;

/// Choice of the preselected option.
pub mod default;

/// Index, value and text addressing of a normalized list.
pub mod lookup;

/// Weighted relevance ranking.
pub mod search;

// Re-export primary public API types and functions at the crate root.
pub use config::{DEFAULT_PLACEHOLDER, SearchConfig, SearchWeights, SelectConfig};
pub use default::{Build, DefaultSelection, DefaultSource, select_default};
pub use error::OptionDataError;
pub use normalize::{normalize, normalize_json, normalize_value, renumber};
pub use option::{HeaderGroup, OptionRecord, RawEntry, SelectOption, parse_entries};
pub use search::{ScoreCard, SearchEngine, SearchOutcome, rank_options};
