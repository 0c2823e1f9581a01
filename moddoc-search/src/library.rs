//! The owned search index and its predicate search.
//!
//! Search visits the heterogeneous tree the way it is stored: sequences by
//! index, structures by field key, depth-first in tree order. A node can
//! match when it carries an identifier, i.e. definitions and fields; modules
//! only ever appear as ancestors. Every match materializes its structural
//! path and its ancestor chain, so results stay valid independently of the
//! traversal that produced them.

use crate::rank;
use moddoc_model::{DefKind, Definition, Field, Identifier, ModuleDoc, ModuleFile};
use std::fmt;

/// One step of a structural path: a sequence index or a field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Index(usize),
    Key(&'static str),
}

/// Borrowed view of any tree node the search engine can touch.
#[derive(Debug, Clone, Copy)]
pub enum Node<'lib> {
    Module(&'lib ModuleDoc),
    Definition(&'lib Definition),
    Field(&'lib Field),
}

impl<'lib> Node<'lib> {
    /// The identifier carried by this node, if any. Modules have a path but
    /// no identifier, so they never match a search predicate.
    pub fn identifier(&self) -> Option<&'lib Identifier> {
        match self {
            Node::Module(_) => None,
            Node::Definition(def) => Some(&def.id),
            Node::Field(field) => Some(&field.id),
        }
    }

    pub fn name(&self) -> Option<&'lib str> {
        self.identifier().map(|id| id.name.as_str())
    }

    pub fn kind(&self) -> Option<DefKind> {
        match self {
            Node::Module(_) => None,
            Node::Definition(def) => Some(def.kind),
            Node::Field(field) => Some(field.kind),
        }
    }

    pub fn doc(&self) -> &'lib str {
        match self {
            Node::Module(module) => &module.doc,
            Node::Definition(def) => &def.doc,
            Node::Field(field) => &field.doc,
        }
    }
}

/// A search result: the matched node, its structural path from the library
/// root (root-first), and its ancestor chain (nearest-first, ending at the
/// owning module).
#[derive(Debug, Clone)]
pub struct Match<'lib> {
    pub node: Node<'lib>,
    pub path: Vec<PathStep>,
    pub ancestors: Vec<Node<'lib>>,
}

impl<'lib> Match<'lib> {
    /// Walk the ancestor chain to the owning module.
    ///
    /// Every node in a well-formed tree is module-rooted, so exhausting the
    /// chain is the one fatal invariant violation, distinct from all
    /// non-fatal lookup failures.
    pub fn find_module(&self) -> Result<&'lib ModuleDoc, SearchError> {
        for ancestor in &self.ancestors {
            if let Node::Module(module) = ancestor {
                return Ok(module);
            }
        }
        Err(SearchError::MissingModuleAncestor(
            self.node.name().unwrap_or("<unnamed>").to_string(),
        ))
    }
}

/// Errors raised by search and resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A matched node has no module ancestor: the tree is structurally
    /// broken and results cannot be attributed.
    MissingModuleAncestor(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::MissingModuleAncestor(name) => {
                write!(f, "FATAL: declaration '{}' is not in a module", name)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// An immutable snapshot of every loaded module tree.
///
/// Reloading replaces the whole value; nothing is mutated in place.
pub struct Library {
    files: Vec<ModuleFile>,
}

impl Library {
    pub fn new(files: Vec<ModuleFile>) -> Self {
        Library { files }
    }

    pub fn files(&self) -> &[ModuleFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Depth-first predicate search in tree order.
    ///
    /// The predicate is only consulted for identifier-carrying nodes
    /// (definitions and fields). Ties between siblings are broken by
    /// structural order, so results come back exactly in render order.
    pub fn search<'lib, P>(&'lib self, predicate: P) -> Vec<Match<'lib>>
    where
        P: Fn(Node<'lib>) -> bool,
    {
        let mut results = Vec::new();
        let mut stack: Vec<Node<'lib>> = Vec::new();

        for (i, file) in self.files.iter().enumerate() {
            let mut path = vec![PathStep::Index(i), PathStep::Key("module")];
            stack.push(Node::Module(&file.module));

            path.push(PathStep::Key("defs"));
            for (j, def) in file.module.defs.iter().enumerate() {
                path.push(PathStep::Index(j));
                visit_definition(def, &predicate, &mut path, &mut stack, &mut results);
                path.pop();
            }

            stack.pop();
        }

        results
    }

    /// User-facing text search: definition kinds only, ranked by the
    /// substring/fuzzy rules in [`rank`].
    pub fn search_text<'lib>(&'lib self, query: &str) -> Vec<Match<'lib>> {
        let query = query.to_lowercase();
        self.search(|node| {
            node.kind().is_some_and(|kind| kind.is_definition())
                && rank::matches_query(node, &query)
        })
    }
}

fn visit_definition<'lib, P>(
    def: &'lib Definition,
    predicate: &P,
    path: &mut Vec<PathStep>,
    stack: &mut Vec<Node<'lib>>,
    results: &mut Vec<Match<'lib>>,
) where
    P: Fn(Node<'lib>) -> bool,
{
    let node = Node::Definition(def);
    if predicate(node) {
        results.push(materialize(node, path, stack));
    }

    stack.push(node);

    path.push(PathStep::Key("definitions"));
    for (i, nested) in def.definitions.iter().enumerate() {
        path.push(PathStep::Index(i));
        visit_definition(nested, predicate, path, stack, results);
        path.pop();
    }
    path.pop();

    visit_fields(&def.ops, "ops", predicate, path, stack, results);
    visit_fields(&def.ctors, "ctors", predicate, path, stack, results);

    stack.pop();
}

fn visit_fields<'lib, P>(
    fields: &'lib [Field],
    key: &'static str,
    predicate: &P,
    path: &mut Vec<PathStep>,
    stack: &mut Vec<Node<'lib>>,
    results: &mut Vec<Match<'lib>>,
) where
    P: Fn(Node<'lib>) -> bool,
{
    path.push(PathStep::Key(key));
    for (i, field) in fields.iter().enumerate() {
        let node = Node::Field(field);
        if predicate(node) {
            path.push(PathStep::Index(i));
            results.push(materialize(node, path, stack));
            path.pop();
        }
    }
    path.pop();
}

fn materialize<'lib>(node: Node<'lib>, path: &[PathStep], stack: &[Node<'lib>]) -> Match<'lib> {
    Match {
        node,
        path: path.to_vec(),
        // the traversal stack is root-first; the parent chain reads
        // nearest-first
        ancestors: stack.iter().rev().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moddoc_model::Span;

    fn ident(name: &str, line: u32) -> Identifier {
        Identifier {
            name: name.to_string(),
            source: Span {
                file: "libraries/test.effekt".to_string(),
                line_start: line,
                column_start: 0,
                line_end: line,
                column_end: name.len() as u32,
            },
            origin: Some(Span {
                file: "libraries/test.effekt".to_string(),
                line_start: line,
                column_start: 0,
                line_end: line,
                column_end: name.len() as u32,
            }),
        }
    }

    fn def(kind: DefKind, name: &str, line: u32) -> Definition {
        Definition {
            kind,
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

    fn field(kind: DefKind, name: &str, line: u32) -> Field {
        Field {
            kind,
            id: ident(name, line),
            doc: String::new(),
            tparams: vec![],
            vparams: vec![],
            bparams: vec![],
            ret: None,
        }
    }

    fn module(path: &str, defs: Vec<Definition>) -> ModuleFile {
        ModuleFile {
            module: ModuleDoc {
                path: path.to_string(),
                doc: String::new(),
                defs,
            },
            source: format!("libraries/{}.effekt", path),
        }
    }

    fn fixture() -> Library {
        let mut exception = def(DefKind::InterfaceDef, "Exception", 1);
        exception.ops = vec![field(DefKind::Operation, "raise", 2)];

        let mut list = def(DefKind::DataDef, "List", 1);
        list.ctors = vec![
            field(DefKind::Constructor, "Nil", 2),
            field(DefKind::Constructor, "Cons", 3),
        ];
        let mut internal = def(DefKind::NamespaceDef, "internal", 10);
        internal.definitions = vec![def(DefKind::FunDef, "go", 11)];

        Library::new(vec![
            module("exception", vec![exception]),
            module("list", vec![list, internal, def(DefKind::FunDef, "map", 20)]),
        ])
    }

    #[test]
    fn test_search_always_true_visits_every_node_once_in_tree_order() {
        let library = fixture();
        let matches = library.search(|_| true);

        let names: Vec<_> = matches.iter().map(|m| m.node.name().unwrap()).collect();
        assert_eq!(
            names,
            vec!["Exception", "raise", "List", "Nil", "Cons", "internal", "go", "map"]
        );
    }

    #[test]
    fn test_match_paths_are_structural() {
        let library = fixture();
        let matches = library.search(|node| node.name() == Some("go"));

        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].path,
            vec![
                PathStep::Index(1),
                PathStep::Key("module"),
                PathStep::Key("defs"),
                PathStep::Index(1),
                PathStep::Key("definitions"),
                PathStep::Index(0),
            ]
        );
    }

    #[test]
    fn test_find_module_returns_owning_module() {
        let library = fixture();

        for m in library.search(|_| true) {
            let module = m.find_module().expect("all fixture nodes are rooted");
            assert!(["exception", "list"].contains(&module.path.as_str()));
        }

        let raise = &library.search(|node| node.name() == Some("raise"))[0];
        assert_eq!(raise.find_module().unwrap().path, "exception");
        // nearest ancestor is the interface, the module comes after
        assert!(matches!(raise.ancestors[0], Node::Definition(_)));
    }

    #[test]
    fn test_find_module_on_broken_chain_is_fatal() {
        let orphan = def(DefKind::FunDef, "orphan", 1);
        let node = Node::Definition(&orphan);
        let broken = Match {
            node,
            path: vec![],
            ancestors: vec![],
        };
        assert_eq!(
            broken.find_module(),
            Err(SearchError::MissingModuleAncestor("orphan".to_string()))
        );
    }

    #[test]
    fn test_search_text_finds_by_substring_and_kind() {
        let library = fixture();

        // "ma" matches map by substring; fields never match text search
        let names: Vec<_> = library
            .search_text("ma")
            .iter()
            .map(|m| m.node.name().unwrap())
            .collect();
        assert_eq!(names, vec!["map"]);

        let none = library.search_text("raise");
        assert!(
            none.is_empty(),
            "operations are not definition kinds and must not match"
        );
    }

    #[test]
    fn test_results_survive_the_query() {
        // matches own their paths and ancestor chains; no hidden coupling to
        // the traversal
        let library = fixture();
        let first = library.search(|_| true);
        let second = library.search(|node| node.name() == Some("map"));
        drop(first);
        assert_eq!(second[0].find_module().unwrap().path, "list");
    }
}
