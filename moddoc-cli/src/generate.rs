//! Batch generation: one render pass per input tree, strictly sequential.
//!
//! Input documents are read in sorted name order. Any I/O or parse failure
//! terminates the whole run; there is no partial-failure tracking across
//! files. HTML mode additionally produces the aggregate index page
//! (`index.html`) and the compressed library artifact (`full.json.gz`)
//! consumed by the search side.

use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use moddoc_model::ModuleFile;
use moddoc_render::dump::{self, Links};
use moddoc_render::{render_module_html, render_module_markdown, HtmlBundle};
use std::error::Error;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Markdown,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "html" => Some(OutputFormat::Html),
            "markdown" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

pub fn run(
    input: &Path,
    out: &Path,
    format: OutputFormat,
    prelude: &[String],
) -> Result<(), Box<dyn Error>> {
    let files = load_all(input)?;
    fs::create_dir_all(out)?;

    let links = Links::default();

    for file in &files {
        let (contents, extension) = match format {
            OutputFormat::Html => (render_module_html(file, &links), "html"),
            OutputFormat::Markdown => (render_module_markdown(file, &links), "md"),
        };
        let target = out.join(format!("{}.{}", file.module.path, extension));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("writing {}", target.display());
        fs::write(&target, contents)?;
    }

    if format == OutputFormat::Html {
        write_index_page(out, &files, prelude)?;
        write_library_artifact(out, &files)?;
    }

    Ok(())
}

/// Read every `*.json` document in the input directory, sorted by name.
fn load_all(input: &Path) -> Result<Vec<ModuleFile>, Box<dyn Error>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(input)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        info!("loading {}", path.display());
        let data = fs::read_to_string(&path)?;
        files.push(ModuleFile::from_json(&data)?);
    }
    Ok(files)
}

/// The aggregate index page: every module as a table-of-contents-only link,
/// prelude modules first and marked.
fn write_index_page(
    out: &Path,
    files: &[ModuleFile],
    prelude: &[String],
) -> Result<(), Box<dyn Error>> {
    let is_prelude = |file: &&ModuleFile| prelude.iter().any(|name| *name == file.module.path);

    let mut bundle = HtmlBundle::new();
    for file in files.iter().filter(|f| is_prelude(f)) {
        bundle.dispatch(|w| dump::dump_index_entry(w, 1, file, true));
    }
    for file in files.iter().filter(|f| !is_prelude(f)) {
        bundle.dispatch(|w| dump::dump_index_entry(w, 1, file, false));
    }

    fs::write(out.join("index.html"), bundle.finish())?;
    Ok(())
}

/// The compressed library snapshot consumed by the search engine.
fn write_library_artifact(out: &Path, files: &[ModuleFile]) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_vec(files)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    fs::write(out.join("full.json.gz"), encoder.finish()?)?;
    Ok(())
}
