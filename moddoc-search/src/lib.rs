//! Search over loaded declaration trees.
//!
//! The entry point is [`Library`]: an explicit, owned index over the module
//! files currently loaded. There is no process-wide state; to reload, build
//! a new `Library` and drop the old one (replace-on-reload). The index is
//! never mutated incrementally.
//!
//! - `library`: predicate search with materialized structural paths and
//!   ancestor chains, and module-ownership resolution.
//! - `rank`: the fuzzy/substring text ranking used by user-facing queries.
//! - `resolve`: the cross-reference resolver deciding whether two identifier
//!   occurrences denote the same declaration, via their encoded origin
//!   coordinates.
//! - `group`: presentation grouping of matches by owning module.

pub mod group;
pub mod library;
pub mod rank;
pub mod resolve;

pub use group::{group_by_module, ModuleGroup};
pub use library::{Library, Match, Node, PathStep, SearchError};
pub use rank::{levenshtein, matches_query, similarity, SIMILARITY_THRESHOLD};
pub use resolve::{equal_origin, Resolution};
