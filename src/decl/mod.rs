//! Declaration Shapes
//!
//! Parser-independent description of the Go declarations eligible for a doc comment.
//! Shapes are built by an external parse step (or read from a manifest file), handed
//! to a comment backend one at a time, and discarded once comment text is produced.

mod manifest;
mod type_ref;

pub use type_ref::{ChannelDir, TypeRef};

use serde::{Deserialize, Serialize};

/// Go visibility: an identifier is exported when its first character is uppercase
pub fn is_exported(identifier: &str) -> bool {
    identifier
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false)
}

// =============================================================================
// Functions and Methods
// =============================================================================

/// Function parameter; Go allows unnamed parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
        }
    }

    pub fn unnamed(ty: impl Into<TypeRef>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }
}

/// Function result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl ResultParam {
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }
}

/// Method receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Receiver type name without the pointer marker
    pub type_name: String,
    #[serde(default)]
    pub pointer: bool,
}

impl Receiver {
    pub fn value(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
            pointer: false,
        }
    }

    pub fn pointer(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
            pointer: true,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Function signature shared by plain functions and methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<ResultParam>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    pub fn result(mut self, ty: impl Into<TypeRef>) -> Self {
        self.results.push(ResultParam::new(ty));
        self
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    pub fn has_error_result(&self) -> bool {
        self.results.iter().any(ResultParam::is_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub receiver: Receiver,
    pub func: FuncDecl,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Pointer-typed fields are optional
    pub fn is_optional(&self) -> bool {
        self.ty.is_pointer()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StructDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Fields split into (mandatory, optional), each in declaration order
    pub fn partition_fields(&self) -> (Vec<&Field>, Vec<&Field>) {
        let (optional, mandatory): (Vec<&Field>, Vec<&Field>) =
            self.fields.iter().partition(|f| f.is_optional());
        (mandatory, optional)
    }
}

/// Any non-struct type declaration (`type A B` or `type A = B`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub name: String,
    pub underlying: TypeRef,
}

// =============================================================================
// Constants and Variables
// =============================================================================

/// One `names [type] = values` line of a const or var declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ValueSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            ty: None,
            doc: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            names: vec![name.into()],
            ty: Some(ty.into()),
            doc: None,
        }
    }

    pub fn has_doc(&self) -> bool {
        has_text(&self.doc)
    }
}

/// A const or var declaration, possibly a parenthesized block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBlock {
    #[serde(default)]
    pub parenthesized: bool,
    pub specs: Vec<ValueSpec>,
}

impl ValueBlock {
    pub fn single(spec: ValueSpec) -> Self {
        Self {
            parenthesized: false,
            specs: vec![spec],
        }
    }

    pub fn grouped(specs: Vec<ValueSpec>) -> Self {
        Self {
            parenthesized: true,
            specs,
        }
    }
}

// =============================================================================
// Declaration
// =============================================================================

/// Closed set of declaration shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationShape {
    Function(FuncDecl),
    Method(MethodDecl),
    TypeAlias(TypeAliasDecl),
    Struct(StructDecl),
    Const(ValueBlock),
    Var(ValueBlock),
}

impl DeclarationShape {
    /// Identifier used in logs and diagnostics
    pub fn identifier(&self) -> String {
        match self {
            Self::Function(func) => func.name.clone(),
            Self::Method(method) => {
                format!("{}.{}", method.receiver.type_name, method.func.name)
            }
            Self::TypeAlias(alias) => alias.name.clone(),
            Self::Struct(decl) => decl.name.clone(),
            Self::Const(block) | Self::Var(block) => block
                .specs
                .iter()
                .flat_map(|s| s.names.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// A declaration together with the doc comment it already carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(flatten)]
    pub shape: DeclarationShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Declaration {
    pub fn new(shape: DeclarationShape) -> Self {
        Self { shape, doc: None }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn has_doc(&self) -> bool {
        has_text(&self.doc)
    }
}

impl From<DeclarationShape> for Declaration {
    fn from(shape: DeclarationShape) -> Self {
        Self::new(shape)
    }
}

/// Declarations of one source file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

fn has_text(doc: &Option<String>) -> bool {
    doc.as_deref().is_some_and(|d| !d.trim().is_empty())
}
