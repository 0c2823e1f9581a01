//! Presentation grouping of search results by owning module.

use crate::library::{Match, SearchError};
use moddoc_model::ModuleDoc;

/// All matches owned by one module, in traversal order.
#[derive(Debug, Clone)]
pub struct ModuleGroup<'lib> {
    pub module: &'lib ModuleDoc,
    pub matches: Vec<Match<'lib>>,
}

/// Group matches by their owning module, preserving the order in which
/// modules are first discovered.
///
/// Fails only on a structurally broken tree (a match without a module
/// ancestor).
pub fn group_by_module(matches: Vec<Match<'_>>) -> Result<Vec<ModuleGroup<'_>>, SearchError> {
    let mut groups: Vec<ModuleGroup<'_>> = Vec::new();

    for m in matches {
        let module = m.find_module()?;
        match groups.iter_mut().find(|g| g.module.path == module.path) {
            Some(group) => group.matches.push(m),
            None => groups.push(ModuleGroup {
                module,
                matches: vec![m],
            }),
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use moddoc_model::{DefKind, Definition, Identifier, ModuleFile, Span};

    fn def(name: &str, line: u32) -> Definition {
        Definition {
            kind: DefKind::FunDef,
            id: Identifier {
                name: name.to_string(),
                source: Span {
                    file: "f".to_string(),
                    line_start: line,
                    column_start: 0,
                    line_end: line,
                    column_end: name.len() as u32,
                },
                origin: None,
            },
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

    #[test]
    fn test_grouping_preserves_first_discovery_order() {
        let library = Library::new(vec![
            module("list", vec![def("map", 1), def("mapM", 2)]),
            module("option", vec![def("map", 1)]),
        ]);

        let groups = group_by_module(library.search_text("map")).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].module.path, "list");
        assert_eq!(groups[0].matches.len(), 2);
        assert_eq!(groups[1].module.path, "option");
        assert_eq!(groups[1].matches.len(), 1);
    }

    #[test]
    fn test_empty_results_group_to_nothing() {
        let library = Library::new(vec![module("list", vec![def("map", 1)])]);
        let groups = group_by_module(library.search_text("zzz")).unwrap();
        assert!(groups.is_empty());
    }
}
