//! Pre-order dump of a module tree through a [`Writer`].
//!
//! Traversal order is fixed: a definition's heading and doc first, then its
//! nested definitions, then its fields (operations before constructors).
//! Depth grows by exactly one per descent, which is what keeps the writers'
//! close-scope accounting non-negative.

use crate::signature::show_signature;
use crate::writer::Writer;
use moddoc_model::{Definition, Field, ModuleFile};

/// Link bases for the module header ("jump to source" and example usage).
#[derive(Debug, Clone)]
pub struct Links {
    pub source_base: String,
    pub examples_base: String,
}

impl Default for Links {
    fn default() -> Self {
        Links {
            source_base: "https://github.com/effekt-lang/effekt/tree/master".to_string(),
            examples_base: "https://github.com/effekt-lang/effekt/tree/master/examples/stdlib"
                .to_string(),
        }
    }
}

/// Dump a complete module: heading, source links, doc, then definitions.
pub fn dump_module(w: &mut dyn Writer, depth: i32, file: &ModuleFile, links: &Links) {
    w.heading(depth, "Module", &file.module.path, "", false);
    w.write("Jump to source: ");
    w.url(
        &file.source,
        &format!("{}/{}", links.source_base, file.source),
    );
    w.write("<br>Example usage: ");
    w.url(
        &format!("examples/stdlib/{}", file.module.path),
        &format!("{}/{}", links.examples_base, file.module.path),
    );
    dump_doc(w, &file.module.doc);

    for def in &file.module.defs {
        dump_definition(w, depth + 1, def);
    }
}

pub fn dump_definition(w: &mut dyn Writer, depth: i32, def: &Definition) {
    let label = w.id(&def.id);
    let signature = show_signature(w, def.signature());
    w.heading(depth, def.kind.as_str(), &label, &signature, false);
    dump_doc(w, &def.doc);

    for nested in &def.definitions {
        dump_definition(w, depth + 1, nested);
    }

    dump_fields(w, depth, &def.ops);
    dump_fields(w, depth, &def.ctors);
}

fn dump_fields(w: &mut dyn Writer, depth: i32, fields: &[Field]) {
    for field in fields {
        let label = w.id(&field.id);
        let signature = show_signature(w, field.signature());
        w.heading(depth + 1, field.kind.as_str(), &label, &signature, false);
        dump_doc(w, &field.doc);
    }
}

/// Table-of-contents-only entry for the aggregate index page: the module
/// heading is a link to the per-module page and emits no body.
pub fn dump_index_entry(w: &mut dyn Writer, depth: i32, file: &ModuleFile, prelude: bool) {
    let class = if prelude {
        " class=\"moduleLink prelude\""
    } else {
        " class=\"moduleLink\""
    };
    let label = format!(
        "<a href=\"{path}.html\"{class}>{path}</a>",
        path = file.module.path,
        class = class
    );
    w.heading(depth, "Module", &label, "", true);
}

fn dump_doc(w: &mut dyn Writer, doc: &str) {
    w.add_doc(&sanitize_doc(doc));
}

/// Doc comments keep one leading space per line from the comment syntax;
/// drop it so Markdown constructs stay intact.
pub fn sanitize_doc(doc: &str) -> String {
    doc.split('\n')
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}
