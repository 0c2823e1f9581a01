//! The typed declaration tree.
//!
//! Every node is module-rooted: a `ModuleFile` wraps exactly one `ModuleDoc`,
//! which owns an ordered sequence of `Definition`s. Definitions nest
//! acyclically (namespaces, interfaces with operations, records with
//! constructors); `Field`s are the leaves and never nest further.
//!
//! Kinds are closed enums. The load boundary (`load`) rejects anything it
//! does not recognize, so consumers match exhaustively without fallback arms
//! for unknown kinds.

use crate::span::Span;
use serde::{Deserialize, Deserializer, Serialize};

/// One compiler-emitted document: a module plus the source path it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleFile {
    pub module: ModuleDoc,
    #[serde(default)]
    pub source: String,
}

/// A module declaration with its ordered definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDoc {
    pub path: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub defs: Vec<Definition>,
}

/// A named occurrence: display name, where it is written, and (optionally)
/// where it is declared.
///
/// The origin span differs from the source span for generated or derived
/// bindings and is absent for primitives with no textual declaration site.
/// Absence is a first-class state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub source: Span,
    #[serde(
        default,
        deserialize_with = "deserialize_origin",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<Span>,
}

/// The compiler emits `"origin": {}` for identifiers without a declaration
/// site; treat anything that is not a complete span as absent.
fn deserialize_origin<'de, D>(deserializer: D) -> Result<Option<Span>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<Span>(v).ok()))
}

/// Kind tag of a definition or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefKind {
    FunDef,
    ValDef,
    RegDef,
    VarDef,
    DefDef,
    NamespaceDef,
    InterfaceDef,
    DataDef,
    RecordDef,
    TypeDef,
    EffectDef,
    ExternType,
    ExternDef,
    ExternResource,
    ExternInterface,
    ExternInclude,
    /// Operation of an interface/effect (field, never nests)
    Operation,
    /// Constructor of a record/data declaration (field, never nests)
    Constructor,
}

impl DefKind {
    pub fn from_name(name: &str) -> Option<DefKind> {
        use DefKind::*;
        Some(match name {
            "FunDef" => FunDef,
            "ValDef" => ValDef,
            "RegDef" => RegDef,
            "VarDef" => VarDef,
            "DefDef" => DefDef,
            "NamespaceDef" => NamespaceDef,
            "InterfaceDef" => InterfaceDef,
            "DataDef" => DataDef,
            "RecordDef" => RecordDef,
            "TypeDef" => TypeDef,
            "EffectDef" => EffectDef,
            "ExternType" => ExternType,
            "ExternDef" => ExternDef,
            "ExternResource" => ExternResource,
            "ExternInterface" => ExternInterface,
            "ExternInclude" => ExternInclude,
            "Operation" => Operation,
            "Constructor" => Constructor,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use DefKind::*;
        match self {
            FunDef => "FunDef",
            ValDef => "ValDef",
            RegDef => "RegDef",
            VarDef => "VarDef",
            DefDef => "DefDef",
            NamespaceDef => "NamespaceDef",
            InterfaceDef => "InterfaceDef",
            DataDef => "DataDef",
            RecordDef => "RecordDef",
            TypeDef => "TypeDef",
            EffectDef => "EffectDef",
            ExternType => "ExternType",
            ExternDef => "ExternDef",
            ExternResource => "ExternResource",
            ExternInterface => "ExternInterface",
            ExternInclude => "ExternInclude",
            Operation => "Operation",
            Constructor => "Constructor",
        }
    }

    /// Whether this kind introduces a declaration, as opposed to an
    /// occurrence inside one (operations and constructors). The resolver
    /// only jumps to definition kinds.
    pub fn is_definition(&self) -> bool {
        !matches!(self, DefKind::Operation | DefKind::Constructor)
    }
}

/// A type annotation appearing in a signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Type {
    TypeRef {
        id: Identifier,
        #[serde(default)]
        args: Vec<Type>,
    },
    BoxedType {
        tpe: Box<Type>,
        #[serde(default)]
        capt: Vec<Identifier>,
    },
    FunctionType {
        #[serde(default)]
        tparams: Vec<Type>,
        #[serde(default)]
        vparams: Vec<Type>,
        #[serde(default)]
        bparams: Vec<Type>,
        result: Box<Type>,
        #[serde(default)]
        effects: Vec<Type>,
    },
    FunctionBlockParam {
        #[serde(default, deserialize_with = "deserialize_opt_identifier")]
        id: Option<Identifier>,
        tpe: Box<Type>,
    },
}

fn deserialize_opt_identifier<'de, D>(deserializer: D) -> Result<Option<Identifier>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<Identifier>(v).ok()))
}

/// A value or block parameter: `name: Type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub id: Identifier,
    pub tpe: Type,
}

/// An effectful return annotation: `T / {E1, E2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effectful {
    pub tpe: Type,
    #[serde(default)]
    pub eff: Vec<Type>,
}

/// A named declaration inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub kind: DefKind,
    pub id: Identifier,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub tparams: Vec<Identifier>,
    #[serde(default)]
    pub vparams: Vec<Param>,
    #[serde(default)]
    pub bparams: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<Effectful>,
    /// Nested definitions (namespaces, local defs), rendered one level deeper
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Operations of an interface/effect
    #[serde(default)]
    pub ops: Vec<Field>,
    /// Constructors of a record/data declaration
    #[serde(default)]
    pub ctors: Vec<Field>,
}

/// A leaf declaration owned by a definition: a constructor or an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub kind: DefKind,
    pub id: Identifier,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub tparams: Vec<Identifier>,
    #[serde(default)]
    pub vparams: Vec<Param>,
    #[serde(default)]
    pub bparams: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<Effectful>,
}

/// Borrowed view of the signature-bearing parts of a definition or field,
/// so the signature printer has a single entry point for both.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRef<'a> {
    pub tparams: &'a [Identifier],
    pub vparams: &'a [Param],
    pub bparams: &'a [Param],
    pub ret: Option<&'a Effectful>,
}

impl Definition {
    pub fn signature(&self) -> SignatureRef<'_> {
        SignatureRef {
            tparams: &self.tparams,
            vparams: &self.vparams,
            bparams: &self.bparams,
            ret: self.ret.as_ref(),
        }
    }
}

impl Field {
    pub fn signature(&self) -> SignatureRef<'_> {
        SignatureRef {
            tparams: &self.tparams,
            vparams: &self.vparams,
            bparams: &self.bparams,
            ret: self.ret.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_name_roundtrip() {
        for kind in [
            DefKind::FunDef,
            DefKind::NamespaceDef,
            DefKind::ExternInclude,
            DefKind::Operation,
        ] {
            assert_eq!(DefKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(DefKind::from_name("ClassDef"), None);
    }

    #[test]
    fn test_fields_are_not_definition_kinds() {
        assert!(DefKind::FunDef.is_definition());
        assert!(DefKind::ExternType.is_definition());
        assert!(!DefKind::Operation.is_definition());
        assert!(!DefKind::Constructor.is_definition());
    }

    #[test]
    fn test_empty_origin_deserializes_as_absent() {
        let id: Identifier = serde_json::from_str(
            r#"{
                "name": "Int",
                "source": { "file": "f", "lineStart": 1, "columnStart": 0, "lineEnd": 1, "columnEnd": 3 },
                "origin": {}
            }"#,
        )
        .unwrap();
        assert!(id.origin.is_none());
    }

    #[test]
    fn test_full_origin_deserializes_as_present() {
        let id: Identifier = serde_json::from_str(
            r#"{
                "name": "map",
                "source": { "file": "f", "lineStart": 3, "columnStart": 4, "lineEnd": 3, "columnEnd": 7 },
                "origin": { "file": "g", "lineStart": 9, "columnStart": 2, "lineEnd": 9, "columnEnd": 5 }
            }"#,
        )
        .unwrap();
        let origin = id.origin.unwrap();
        assert_eq!(origin.pos_id(), "9:2-9:5");
    }
}
