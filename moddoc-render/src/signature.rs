//! Pretty-printing of signatures and type annotations.
//!
//! Signatures are rendered as inline fragments on the heading line:
//! type parameters in brackets, value parameters in parens, block parameters
//! in braces, and an effectful return annotation as `: T / {E}`. Each group
//! is wrapped in backticks; the HTML writer later rewrites those into inline
//! code elements.
//!
//! Identifiers inside signatures go through [`Writer::id`] so the HTML
//! output carries their coordinates for cross-referencing.

use crate::writer::Writer;
use moddoc_model::{SignatureRef, Type};

pub fn show_signature(w: &dyn Writer, sig: SignatureRef<'_>) -> String {
    let mut res = String::new();

    if !sig.tparams.is_empty() {
        let tparams: Vec<String> = sig.tparams.iter().map(|id| w.id(id)).collect();
        res.push_str(&format!("`[{}]`", tparams.join(", ")));
    }

    if !sig.vparams.is_empty() {
        let vparams: Vec<String> = sig
            .vparams
            .iter()
            .map(|p| format!("{}: {}", w.id(&p.id), show_type(w, &p.tpe)))
            .collect();
        res.push_str(&format!(" `({})`", vparams.join(", ")));
    }

    if !sig.bparams.is_empty() {
        let bparams: Vec<String> = sig
            .bparams
            .iter()
            .map(|p| format!("`{{ {}: {} }}`", w.id(&p.id), show_type(w, &p.tpe)))
            .collect();
        res.push_str(&format!(" {}", bparams.join(", ")));
    }

    if let Some(ret) = sig.ret {
        res.push_str(&format!(
            ": `{} / {{{}}}` ",
            show_type(w, &ret.tpe),
            show_types(w, &ret.eff)
        ));
    }

    res
}

pub fn show_type(w: &dyn Writer, tpe: &Type) -> String {
    match tpe {
        Type::TypeRef { id, args } => {
            format!("{}{}", w.id(id), optional(w, args, |s| format!("[{}]", s)))
        }
        Type::BoxedType { tpe, capt } => {
            let capt: Vec<String> = capt.iter().map(|id| w.id(id)).collect();
            format!("{} at {{{}}}", show_type(w, tpe), capt.join(", "))
        }
        Type::FunctionType {
            tparams,
            vparams,
            bparams,
            result,
            effects,
        } => format!(
            "{}{}{} => {}{}",
            optional(w, vparams, |s| format!("({})", s)),
            optional(w, tparams, |s| format!("[{}]", s)),
            optional(w, bparams, |s| format!("{{{}}}", s)),
            show_type(w, result),
            optional(w, effects, |s| format!(" / {{{}}}", s)),
        ),
        Type::FunctionBlockParam { id, tpe } => match id {
            Some(id) if !id.name.is_empty() => format!("{}: {}", w.id(id), show_type(w, tpe)),
            _ => show_type(w, tpe),
        },
    }
}

fn show_types(w: &dyn Writer, types: &[Type]) -> String {
    let shown: Vec<String> = types.iter().map(|t| show_type(w, t)).collect();
    shown.join(", ")
}

/// Render a possibly empty type list, wrapping it only when non-empty.
fn optional(w: &dyn Writer, types: &[Type], wrap: impl Fn(String) -> String) -> String {
    if types.is_empty() {
        String::new()
    } else {
        wrap(show_types(w, types))
    }
}
