//! Typed model of a compiler-emitted declaration tree.
//!
//! The compiler dumps one JSON document per module: a `ModuleDecl` with its
//! ordered definitions, each definition carrying an identifier (display name
//! plus source span and optional origin span), a signature, a docstring, and
//! possibly nested definitions and fields. This crate owns that shape:
//!
//! - `ast`: the tree itself, as closed tagged unions. Every consumer matches
//!   exhaustively; there is no kind-string dispatch past the load boundary.
//! - `load`: the tolerant conversion from raw JSON into the typed tree.
//!   Unrecognized kinds are reported and skipped here, once, so renderers
//!   and the search engine never see them.
//! - `span`: source spans and the compact `"L:C-L:C"` position encoding used
//!   to carry coordinates through rendered markup.
//! - `paths`: normalization of compiler-emitted source paths for links.
//!
//! Trees are loaded as immutable snapshots; nothing in this crate mutates a
//! loaded module in place.

pub mod ast;
pub mod load;
pub mod paths;
pub mod span;

pub use ast::{
    DefKind, Definition, Effectful, Field, Identifier, ModuleDoc, ModuleFile, Param, SignatureRef,
    Type,
};
pub use load::LoadError;
pub use span::{Coords, PosIdError, Span};
