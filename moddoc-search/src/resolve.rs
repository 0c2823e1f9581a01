//! Cross-reference resolution: does an identifier occurrence denote a given
//! declaration?
//!
//! Origin coordinates travel through rendered markup as `"L:C-L:C"` strings,
//! so equality is decided by decoding that encoding back into four integers
//! and comparing them exactly. File identity is not part of the comparison.
//! Identifiers without an origin are unresolvable, never an error.

use crate::library::{Library, Match};
use log::warn;
use moddoc_model::{Coords, Identifier};

/// Outcome of resolving an encoded origin to its declaration.
///
/// `NotFound` and `Ambiguous` are non-fatal: the caller surfaces a warning
/// and, for ambiguity, proceeds with the first match in traversal order.
#[derive(Debug, Clone)]
pub enum Resolution<'lib> {
    Found(Match<'lib>),
    NotFound,
    /// More than one declaration carries these coordinates; matches are in
    /// traversal order.
    Ambiguous(Vec<Match<'lib>>),
}

impl<'lib> Resolution<'lib> {
    /// Best-effort result: the unique match, or the first of an ambiguous
    /// set.
    pub fn best(&self) -> Option<&Match<'lib>> {
        match self {
            Resolution::Found(m) => Some(m),
            Resolution::NotFound => None,
            Resolution::Ambiguous(matches) => matches.first(),
        }
    }
}

/// Whether the identifier's origin matches the encoded coordinates exactly,
/// on all four components.
pub fn equal_origin(id: &Identifier, origin: &str) -> bool {
    let Some(span) = id.origin.as_ref() else {
        return false;
    };
    match Coords::decode(origin) {
        Ok(coords) => coords.matches(span),
        Err(_) => false,
    }
}

impl Library {
    /// Find the declaration a rendered identifier points at: equal name,
    /// origin-equal coordinates, and a definition kind (occurrences inside
    /// declarations never resolve to themselves).
    pub fn resolve_origin<'lib>(&'lib self, name: &str, origin: &str) -> Resolution<'lib> {
        let mut matches = self.search(|node| {
            node.name() == Some(name)
                && node.kind().is_some_and(|kind| kind.is_definition())
                && node
                    .identifier()
                    .is_some_and(|id| equal_origin(id, origin))
        });

        match matches.len() {
            0 => {
                warn!("couldn't find a definition for '{}' at {}", name, origin);
                Resolution::NotFound
            }
            1 => Resolution::Found(matches.remove(0)),
            _ => {
                warn!(
                    "found {} definitions for '{}' at {}, using the first",
                    matches.len(),
                    name,
                    origin
                );
                Resolution::Ambiguous(matches)
            }
        }
    }
}
