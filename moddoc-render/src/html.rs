//! HTML output: the body writer, the table-of-contents writer, the page
//! template, and the multi-document bundle.
//!
//! Both writers project tree depth into nested `<ul class=subtree>` lists.
//! A heading one level deeper than the previous one opens a subtree, a
//! shallower heading closes as many subtrees as the depth difference, and
//! `finish()` closes whatever is still open. The TOC must appear before the
//! body in the final page while both are produced incrementally, so both
//! streams buffer completely and are only stitched together at the end.

use crate::dump;
use crate::writer::Writer;
use moddoc_model::{paths, Identifier, ModuleFile};
use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

/// Rewrite backtick-quoted fragments into inline code elements.
fn htmlify(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    INLINE_CODE
        .replace_all(text, "<code class=\"inline\">$1</code>")
        .into_owned()
}

/// Render an identifier as a span carrying both encoded coordinate spans.
/// The origin attribute stays empty when the identifier has no declaration
/// site; the resolver treats that as unresolvable.
fn id_span(id: &Identifier) -> String {
    let origin_id = id
        .origin
        .as_ref()
        .map(|origin| origin.pos_id())
        .unwrap_or_default();
    let origin_file = id
        .origin
        .as_ref()
        .map(|origin| paths::strip_source(&origin.file))
        .unwrap_or("");

    format!(
        "<span class=\"id\" data-sourceSource=\"{}\" data-source=\"{}\" data-originSource=\"{}\" data-origin=\"{}\">{}</span>",
        paths::strip_source(&id.source.file),
        id.source.pos_id(),
        origin_file,
        origin_id,
        id.name
    )
}

/// Scope-marker transition shared by both HTML writers.
///
/// Returns the markers to emit before a heading at `depth`, given the depth
/// of the previous heading, and updates that state.
fn transition(current_depth: &mut i32, depth: i32) -> String {
    let mut out = String::new();
    if depth > *current_depth {
        out.push_str("<ul class=subtree>");
    }
    if depth < *current_depth {
        out.push_str(&"</ul>".repeat((*current_depth - depth) as usize));
    }
    *current_depth = depth;
    out
}

fn trailing_closers(current_depth: i32) -> String {
    "</ul>".repeat(current_depth.max(0) as usize)
}

/// HTML body writer: headings with signatures, docs, links, identifiers.
pub struct HtmlWriter {
    out: String,
    current_depth: i32,
}

impl HtmlWriter {
    pub fn new() -> Self {
        HtmlWriter {
            out: String::new(),
            current_depth: -1,
        }
    }

    /// Close all open subtrees and return the buffered output.
    pub fn finish(mut self) -> String {
        let closers = trailing_closers(self.current_depth);
        self.out.push_str(&closers);
        self.out
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlWriter {
    fn heading(&mut self, depth: i32, kind: &str, label: &str, signature: &str, only_toc: bool) {
        let mut out = transition(&mut self.current_depth, depth);
        if !only_toc {
            out.push_str(&format!(
                "<li class=\"heading {kind}\" title=\"{kind}\">{label} <small class=\"signature\">{signature}</small></li>",
                kind = kind,
                label = label,
                signature = htmlify(signature),
            ));
        }
        self.out.push_str(&out);
    }

    fn url(&mut self, name: &str, href: &str) {
        self.out
            .push_str(&format!("<a href=\"{}\">{}</a>", href, name));
    }

    fn add_doc(&mut self, doc: &str) {
        if doc.trim().is_empty() {
            return;
        }
        self.out.push_str(&format!(
            "<div class=\"markdownWrap\"><pre class=\"markdown doc\">{}</pre></div>",
            doc
        ));
    }

    fn id(&self, id: &Identifier) -> String {
        id_span(id)
    }

    fn write(&mut self, content: &str) {
        self.out.push_str(content);
    }

    fn current_depth(&self) -> i32 {
        self.current_depth
    }
}

/// Table-of-contents writer: headings only, everything else is dropped.
pub struct HtmlTocWriter {
    out: String,
    current_depth: i32,
}

impl HtmlTocWriter {
    pub fn new() -> Self {
        HtmlTocWriter {
            out: String::new(),
            current_depth: -1,
        }
    }

    pub fn finish(mut self) -> String {
        let closers = trailing_closers(self.current_depth);
        self.out.push_str(&closers);
        self.out
    }
}

impl Default for HtmlTocWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlTocWriter {
    fn heading(&mut self, depth: i32, kind: &str, label: &str, _signature: &str, _only_toc: bool) {
        let mut out = transition(&mut self.current_depth, depth);
        out.push_str(&format!(
            "<li class=\"heading {kind}\">{label}</li>",
            kind = kind,
            label = label
        ));
        self.out.push_str(&out);
    }

    fn url(&mut self, _name: &str, _href: &str) {}

    fn add_doc(&mut self, _doc: &str) {}

    fn id(&self, id: &Identifier) -> String {
        id_span(id)
    }

    fn write(&mut self, _content: &str) {}

    fn current_depth(&self) -> i32 {
        self.current_depth
    }
}

struct HtmlTemplate {
    start: String,
    end: &'static str,
}

fn html_template(toc: &str) -> HtmlTemplate {
    let start = format!(
        r#"<!DOCTYPE html>
<html>
<meta>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width" />
  <link rel="stylesheet" href="module.css" type="text/css" charset="utf-8" />
</meta>
<body>
  <main>
  <ul class="toc tree">
    <li class="header">
      <div class="brand">
        <span>Library Documentation</span>
      </div>
      <input class="search" type="search" spellcheck=false placeholder="Search" id="search"></input>
    </li>
    {toc}
    <li class="searchResults"></li>
  </ul>
  <ul class="view tree">
"#,
        toc = toc
    );

    HtmlTemplate {
        start,
        end: r#"
  </ul>
  </main>
  <script src="module.js" type="module" charset="utf-8"></script>
</body></html>"#,
    }
}

/// Render one module into a complete HTML page.
///
/// The table-of-contents pass and the body pass each run their own
/// depth-stack over the same tree and close out independently.
pub fn render_module_html(file: &ModuleFile, links: &dump::Links) -> String {
    let mut toc = HtmlTocWriter::new();
    dump::dump_module(&mut toc, 1, file, links);
    let toc_html = toc.finish();

    let mut body = HtmlWriter::new();
    dump::dump_module(&mut body, 1, file, links);
    let body_html = body.finish();

    let template = html_template(&toc_html);
    format!("{}{}{}", template.start, body_html, template.end)
}

/// Renders many independent module trees into one continuous page sharing a
/// single template wrapper.
///
/// Each dispatched tree starts its own open/close accounting at the top
/// level, while both output streams keep accumulating. Only `finish`
/// determines final layout: template prologue, the fully accumulated
/// table-of-contents, the fully accumulated body, then the epilogue —
/// output ordering is not arrival ordering.
pub struct HtmlBundle {
    toc: HtmlTocWriter,
    body: HtmlWriter,
}

impl HtmlBundle {
    pub fn new() -> Self {
        HtmlBundle {
            toc: HtmlTocWriter::new(),
            body: HtmlWriter::new(),
        }
    }

    /// Run one dump pass over both streams. The dump must start its headings
    /// at depth 1; the writers' recorded depths intentionally persist across
    /// trees so scope markers stay balanced over the whole bundle.
    pub fn dispatch(&mut self, dump: impl Fn(&mut dyn Writer)) {
        dump(&mut self.toc);
        dump(&mut self.body);
    }

    /// Finalize: close both streams and stitch the page together.
    pub fn finish(self) -> String {
        let toc_html = self.toc.finish();
        let body_html = self.body.finish();
        let template = html_template(&toc_html);
        format!("{}{}{}", template.start, body_html, template.end)
    }
}

impl Default for HtmlBundle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moddoc_model::{DefKind, Definition, Identifier, ModuleDoc, Span};

    fn ident(name: &str, line: u32) -> Identifier {
        Identifier {
            name: name.to_string(),
            source: Span {
                file: "libraries/common/list.effekt".to_string(),
                line_start: line,
                column_start: 4,
                line_end: line,
                column_end: 4 + name.len() as u32,
            },
            origin: Some(Span {
                file: "libraries/common/list.effekt".to_string(),
                line_start: line,
                column_start: 4,
                line_end: line,
                column_end: 4 + name.len() as u32,
            }),
        }
    }

    fn fun(name: &str, line: u32) -> Definition {
        Definition {
            kind: DefKind::FunDef,
            id: ident(name, line),
            doc: String::new(),
            tparams: vec![],
            vparams: vec![],
            bparams: vec![],
            ret: None,
            definitions: vec![],
            ops: vec![],
            ctors: vec![],
        }
    }

    fn list_module() -> ModuleFile {
        ModuleFile {
            module: ModuleDoc {
                path: "list".to_string(),
                doc: String::new(),
                defs: vec![fun("map", 10)],
            },
            source: "libraries/common/list.effekt".to_string(),
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_htmlify_backticks() {
        assert_eq!(
            htmlify("`(x: Int)` and `[A]`"),
            "<code class=\"inline\">(x: Int)</code> and <code class=\"inline\">[A]</code>"
        );
        assert_eq!(htmlify(""), "");
    }

    #[test]
    fn test_toc_pass_scenario_module_with_one_function() {
        // module "list" at depth 1, function "map" at depth 2: one open
        // before each heading, two closers at end of stream.
        let mut toc = HtmlTocWriter::new();
        dump::dump_module(&mut toc, 1, &list_module(), &dump::Links::default());
        let out = toc.finish();

        assert_eq!(count(&out, "<ul class=subtree>"), 2);
        assert_eq!(count(&out, "</ul>"), 2);

        let module_pos = out.find("list").unwrap();
        let map_pos = out.find("map").unwrap();
        let first_open = out.find("<ul class=subtree>").unwrap();
        assert!(first_open < module_pos && module_pos < map_pos);
    }

    #[test]
    fn test_body_pass_balances_independently() {
        let mut body = HtmlWriter::new();
        dump::dump_module(&mut body, 1, &list_module(), &dump::Links::default());
        let out = body.finish();

        assert_eq!(
            count(&out, "<ul class=subtree>"),
            count(&out, "</ul>"),
            "open and close markers must balance: {}",
            out
        );
    }

    #[test]
    fn test_sibling_headings_share_scope() {
        let mut w = HtmlTocWriter::new();
        w.heading(1, "Module", "m", "", false);
        w.heading(2, "FunDef", "a", "", false);
        w.heading(2, "FunDef", "b", "", false);
        w.heading(1, "Module", "n", "", false);
        let out = w.finish();

        // opens: before m, before a; closes: back up before n, two trailing
        assert_eq!(count(&out, "<ul class=subtree>"), 2);
        assert_eq!(count(&out, "</ul>"), 2);
    }

    #[test]
    fn test_only_toc_heading_keeps_body_balanced() {
        let mut body = HtmlWriter::new();
        body.heading(1, "Module", "list", "", true);
        assert_eq!(body.current_depth(), 1);
        let out = body.finish();

        assert!(!out.contains("heading"), "no heading body expected: {}", out);
        assert_eq!(count(&out, "<ul class=subtree>"), count(&out, "</ul>"));
    }

    #[test]
    fn test_id_span_carries_both_coordinates() {
        let span = id_span(&ident("map", 10));
        assert!(span.contains("data-source=\"10:4-10:7\""));
        assert!(span.contains("data-origin=\"10:4-10:7\""));
        assert!(span.contains(">map</span>"));
    }

    #[test]
    fn test_id_span_with_absent_origin() {
        let mut id = ident("Int", 1);
        id.origin = None;
        let span = id_span(&id);
        assert!(span.contains("data-origin=\"\""));
        assert!(span.contains("data-originSource=\"\""));
    }

    #[test]
    fn test_render_module_html_layout() {
        let page = render_module_html(&list_module(), &dump::Links::default());

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.ends_with("</body></html>"));

        // TOC appears before the body view
        let toc_pos = page.find("class=\"toc tree\"").unwrap();
        let view_pos = page.find("class=\"view tree\"").unwrap();
        assert!(toc_pos < view_pos);

        assert!(page.contains("class=\"heading FunDef\""));
        assert!(page.contains("Jump to source"));
    }

    #[test]
    fn test_bundle_accumulates_and_orders_output() {
        let first = list_module();
        let mut second = list_module();
        second.module.path = "option".to_string();

        let mut bundle = HtmlBundle::new();
        for file in [&first, &second] {
            bundle.dispatch(|w| dump::dump_index_entry(w, 1, file, false));
        }
        let page = bundle.finish();

        let list_toc = page.find("list.html").unwrap();
        let option_toc = page.find("option.html").unwrap();
        assert!(list_toc < option_toc, "first-dispatched module lists first");

        assert_eq!(count(&page, "<ul class=subtree>"), count(&page, "</ul>"));
    }

    #[test]
    fn test_bundle_depth_accounting_continues_across_trees() {
        let mut bundle = HtmlBundle::new();
        let deep = list_module();
        bundle.dispatch(|w| {
            dump::dump_module(w, 1, &deep, &dump::Links::default());
        });
        // second tree starts again at depth 1; the writers close back down
        bundle.dispatch(|w| {
            dump::dump_module(w, 1, &deep, &dump::Links::default());
        });
        let page = bundle.finish();

        assert_eq!(count(&page, "<ul class=subtree>"), count(&page, "</ul>"));
    }

    #[test]
    fn test_empty_bundle_emits_bare_template() {
        let page = HtmlBundle::new().finish();
        assert!(page.contains("searchResults"));
        assert_eq!(count(&page, "<ul class=subtree>"), 0);
    }
}
