//! Load boundary: raw compiler JSON → typed tree.
//!
//! The input is assumed well-formed JSON, but the declaration vocabulary of
//! the compiler moves faster than this tool. Unrecognized definition kinds
//! are reported with `log::warn!` and skipped here, once, so rendering and
//! search never have to degrade mid-traversal. A document that is not a
//! `ModuleDecl` at the top level is a hard error: nothing downstream can do
//! anything useful with it.

use crate::ast::{DefKind, Definition, Effectful, Field, Identifier, ModuleDoc, ModuleFile, Param};
use log::warn;
use serde_json::Value;
use std::fmt;

/// Errors for an unloadable document
#[derive(Debug)]
pub enum LoadError {
    /// The input is not valid JSON
    Json(serde_json::Error),
    /// The top-level object is missing a required field
    MissingField(&'static str),
    /// The top-level declaration is not a module
    NotAModule(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Json(err) => write!(f, "Invalid JSON: {}", err),
            LoadError::MissingField(field) => {
                write!(f, "Document is missing the '{}' field", field)
            }
            LoadError::NotAModule(kind) => {
                write!(f, "Expected a ModuleDecl at the top level, found '{}'", kind)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

impl ModuleFile {
    /// Parse one compiler-emitted module document.
    pub fn from_json(input: &str) -> Result<ModuleFile, LoadError> {
        let value: Value = serde_json::from_str(input)?;
        build_module_file(&value)
    }
}

fn build_module_file(value: &Value) -> Result<ModuleFile, LoadError> {
    let module = value
        .get("module")
        .ok_or(LoadError::MissingField("module"))?;

    let kind = module.get("kind").and_then(Value::as_str).unwrap_or("");
    if kind != "ModuleDecl" {
        return Err(LoadError::NotAModule(kind.to_string()));
    }

    let path = module
        .get("path")
        .and_then(Value::as_str)
        .ok_or(LoadError::MissingField("path"))?
        .to_string();

    Ok(ModuleFile {
        module: ModuleDoc {
            path,
            doc: string_field(module, "doc"),
            defs: build_definitions(module.get("defs")),
        },
        source: value
            .get("source")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    })
}

fn build_definitions(value: Option<&Value>) -> Vec<Definition> {
    value
        .and_then(Value::as_array)
        .map(|defs| defs.iter().filter_map(build_definition).collect())
        .unwrap_or_default()
}

fn build_definition(value: &Value) -> Option<Definition> {
    let kind = build_kind(value)?;
    let id = build_identifier(value.get("id"))?;

    Some(Definition {
        kind,
        id,
        doc: string_field(value, "doc"),
        tparams: build_tparams(value),
        vparams: build_params(value, "vparams"),
        bparams: build_params(value, "bparams"),
        ret: build_ret(value),
        definitions: build_definitions(value.get("definitions")),
        ops: build_fields(value.get("ops")),
        ctors: build_fields(value.get("ctors")),
    })
}

fn build_fields(value: Option<&Value>) -> Vec<Field> {
    value
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(build_field).collect())
        .unwrap_or_default()
}

fn build_field(value: &Value) -> Option<Field> {
    let kind = build_kind(value)?;
    let id = build_identifier(value.get("id"))?;

    Some(Field {
        kind,
        id,
        doc: string_field(value, "doc"),
        tparams: build_tparams(value),
        vparams: build_params(value, "vparams"),
        bparams: build_params(value, "bparams"),
        ret: build_ret(value),
    })
}

fn build_kind(value: &Value) -> Option<DefKind> {
    let name = value.get("kind").and_then(Value::as_str).unwrap_or("");
    match DefKind::from_name(name) {
        Some(kind) => Some(kind),
        None => {
            warn!("skipping declaration with unrecognized kind '{}'", name);
            None
        }
    }
}

fn build_identifier(value: Option<&Value>) -> Option<Identifier> {
    let value = value?;
    match serde_json::from_value::<Identifier>(value.clone()) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!("skipping declaration with unreadable identifier: {}", err);
            None
        }
    }
}

fn build_tparams(value: &Value) -> Vec<Identifier> {
    value
        .get("tparams")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| serde_json::from_value(p.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn build_params(value: &Value, key: &str) -> Vec<Param> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| match serde_json::from_value::<Param>(p.clone()) {
                    Ok(param) => Some(param),
                    Err(err) => {
                        warn!("dropping unreadable parameter: {}", err);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A return annotation is only rendered when it is effectful.
fn build_ret(value: &Value) -> Option<Effectful> {
    let ret = value.get("ret")?;
    if ret.get("kind").and_then(Value::as_str) != Some("Effectful") {
        return None;
    }
    match serde_json::from_value::<Effectful>(ret.clone()) {
        Ok(effectful) => Some(effectful),
        Err(err) => {
            warn!("dropping unreadable return annotation: {}", err);
            None
        }
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
