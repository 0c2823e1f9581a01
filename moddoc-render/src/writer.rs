//! The capability interface implemented by every output format.

use moddoc_model::Identifier;

/// Sink for one render pass over a declaration tree.
///
/// The dump driver calls `heading` in pre-order and hands the writer
/// everything it needs to produce markup: the logical depth, the kind tag
/// (used as a CSS class in HTML), the already-rendered label and signature,
/// and whether the heading is table-of-contents-only.
///
/// Implementations own their depth-tracking state; `current_depth` starts at
/// the sentinel -1 so the very first heading (always depth 1) opens a scope.
pub trait Writer {
    /// Record a heading at `depth`, emitting scope markers as needed.
    ///
    /// `only_toc` headings update depth state but produce no long-form body;
    /// the table-of-contents writer renders them like any other heading.
    fn heading(&mut self, depth: i32, kind: &str, label: &str, signature: &str, only_toc: bool);

    /// Emit a link.
    fn url(&mut self, name: &str, href: &str);

    /// Emit a (already sanitized) documentation comment.
    fn add_doc(&mut self, doc: &str);

    /// Render an identifier occurrence as an inline fragment for use inside
    /// labels and signatures. Formats that support cross-referencing attach
    /// the encoded source and origin coordinates here.
    fn id(&self, id: &Identifier) -> String;

    /// Emit raw output.
    fn write(&mut self, content: &str);

    /// Depth of the last heading, or -1 before the first one.
    fn current_depth(&self) -> i32;
}
