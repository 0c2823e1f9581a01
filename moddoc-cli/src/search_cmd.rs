//! The `search` subcommand: load an aggregate index artifact and answer one
//! query, grouped by owning module.
//!
//! The index is loaded fully before the query runs, so there is no "still
//! loading" state to report. Each invocation builds a fresh `Library`
//! snapshot (replace-on-reload, nothing global).

use flate2::read::GzDecoder;
use moddoc_model::ModuleFile;
use moddoc_search::{group_by_module, Library};
use std::error::Error;
use std::fs;
use std::io::Read as _;
use std::path::Path;

pub fn run(index: &Path, query: &str) -> Result<(), Box<dyn Error>> {
    let files = load_index(index)?;
    let library = Library::new(files);

    let groups = group_by_module(library.search_text(query))?;
    if groups.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.module.path);
        for m in &group.matches {
            let kind = m.node.kind().map(|k| k.as_str()).unwrap_or("?");
            let position = m
                .node
                .identifier()
                .map(|id| id.source.pos_id())
                .unwrap_or_default();
            println!(
                "  {} ({}) {}",
                m.node.name().unwrap_or("<unnamed>"),
                kind,
                position
            );
        }
    }

    Ok(())
}

fn load_index(index: &Path) -> Result<Vec<ModuleFile>, Box<dyn Error>> {
    let bytes = fs::read(index)?;

    let json = if index.extension().is_some_and(|ext| ext == "gz") {
        let mut decoder = GzDecoder::new(&bytes[..]);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        decompressed
    } else {
        bytes
    };

    Ok(serde_json::from_slice(&json)?)
}
