//! Rendering of declaration trees into browsable documentation.
//!
//! Architecture
//!
//!     - Writer trait: the capability interface every output format
//!       implements (heading, url, add_doc, id, write). See [`writer`].
//!     - Dump driver: pre-order traversal of a module tree, pushing headings
//!       and docs through a Writer. See [`dump`].
//!     - Format implementations: HTML body, HTML table-of-contents and
//!       Markdown writers. The two HTML writers share the depth-stack
//!       mechanism that turns tree depth into balanced nested-list markup.
//!
//!     The output format is selected once, by configuration, and everything
//!     downstream only talks to the trait.
//!
//! Depth accounting
//!
//!     Writers record the depth of the last heading they saw (sentinel -1
//!     before the first one). A deeper heading opens one scope, a shallower
//!     one closes `previous - new` scopes, an equal one closes nothing.
//!     Every pass must call `finish()` so trailing scopes are closed;
//!     the table-of-contents pass and the body pass run independent stacks
//!     over the same tree and each balances on its own.

pub mod dump;
pub mod html;
pub mod markdown;
pub mod signature;
pub mod writer;

pub use html::{render_module_html, HtmlBundle, HtmlTocWriter, HtmlWriter};
pub use markdown::{render_module_markdown, MarkdownWriter};
pub use writer::Writer;
