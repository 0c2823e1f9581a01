//! Markdown output.
//!
//! Stateless compared to HTML: heading depth maps 1:1 to the number of `#`
//! markers, identifiers render as bare names, and there is no separate
//! table-of-contents pass (the front matter asks the downstream document
//! processor for one).

use crate::dump;
use crate::writer::Writer;
use moddoc_model::{Identifier, ModuleFile};

const FRONT_MATTER: &str = "---
title: Library Documentation
geometry: margin=1in
papersize: a4
toc: yes
---

";

pub struct MarkdownWriter {
    out: String,
    current_depth: i32,
}

impl MarkdownWriter {
    pub fn new() -> Self {
        MarkdownWriter {
            out: String::new(),
            current_depth: -1,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for MarkdownWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for MarkdownWriter {
    fn heading(&mut self, depth: i32, kind: &str, label: &str, _signature: &str, only_toc: bool) {
        self.current_depth = depth;
        if only_toc {
            return;
        }
        self.out.push_str(&format!(
            "{} {} ({})\n",
            "#".repeat(depth.max(1) as usize),
            label,
            kind
        ));
    }

    fn url(&mut self, name: &str, href: &str) {
        self.out.push_str(&format!("[{}]({})", name, href));
    }

    fn add_doc(&mut self, doc: &str) {
        self.out.push_str(&format!("{}\n", doc));
    }

    fn id(&self, id: &Identifier) -> String {
        id.name.clone()
    }

    fn write(&mut self, content: &str) {
        self.out.push_str(content);
    }

    fn current_depth(&self) -> i32 {
        self.current_depth
    }
}

/// Render one module as a Markdown document with the fixed front matter.
pub fn render_module_markdown(file: &ModuleFile, links: &dump::Links) -> String {
    let mut w = MarkdownWriter::new();
    w.write(FRONT_MATTER);
    dump::dump_module(&mut w, 1, file, links);
    w.finish()
}
