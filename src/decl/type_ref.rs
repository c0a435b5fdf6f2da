//! Structural Type References
//!
//! `TypeRef` is the closed description of a declared Go type. It is built once by
//! the external parse step (or read from a manifest as Go type text) and consumed by
//! exhaustive matching in the composer. Both directions are total: every text maps
//! to a `TypeRef` and every `TypeRef` renders to text, with `Unknown` as the fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::composer::MAX_TYPE_DEPTH;
use crate::synth::describe;

/// Direction of a channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Structural type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeRef {
    Named(String),
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    Qualified { package: String, name: String },
    Interface,
    Channel { dir: ChannelDir, elem: Box<TypeRef> },
    Function,
    Unknown,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn pointer(inner: TypeRef) -> Self {
        Self::Pointer(Box::new(inner))
    }

    pub fn slice(inner: TypeRef) -> Self {
        Self::Slice(Box::new(inner))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn channel(dir: ChannelDir, elem: TypeRef) -> Self {
        Self::Channel {
            dir,
            elem: Box::new(elem),
        }
    }

    /// The built-in `error` interface
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Named(name) if name == "error")
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    /// Unqualified type name for named and package-qualified types
    pub fn bare_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Qualified { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Parse Go type text; unrecognized shapes and nesting past
    /// `MAX_TYPE_DEPTH` become `Unknown`
    pub fn parse(text: &str) -> Self {
        parse_type(text.trim(), 0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(self))
    }
}

impl FromStr for TypeRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for TypeRef {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        describe(&ty)
    }
}

// =============================================================================
// Parsing
// =============================================================================

fn parse_type(text: &str, depth: usize) -> TypeRef {
    if text.is_empty() || depth >= MAX_TYPE_DEPTH {
        return TypeRef::Unknown;
    }

    if let Some(rest) = text.strip_prefix('*') {
        return TypeRef::pointer(parse_type(rest.trim_start(), depth + 1));
    }

    // Variadic parameters are slices at the call site
    if let Some(rest) = text.strip_prefix("...") {
        return TypeRef::slice(parse_type(rest.trim_start(), depth + 1));
    }

    if let Some(rest) = text.strip_prefix("map[") {
        return match closing_bracket(rest) {
            Some(end) => TypeRef::map(
                parse_type(rest[..end].trim(), depth + 1),
                parse_type(rest[end + 1..].trim(), depth + 1),
            ),
            None => TypeRef::Unknown,
        };
    }

    if let Some(rest) = text.strip_prefix('[') {
        // `[]T` and `[N]T` are both rendered as slices
        return match closing_bracket(rest) {
            Some(end) => TypeRef::slice(parse_type(rest[end + 1..].trim(), depth + 1)),
            None => TypeRef::Unknown,
        };
    }

    if let Some(rest) = text.strip_prefix("<-") {
        return match rest.trim_start().strip_prefix("chan") {
            Some(elem) if starts_with_separator(elem) => {
                TypeRef::channel(ChannelDir::Recv, parse_type(elem.trim(), depth + 1))
            }
            _ => TypeRef::Unknown,
        };
    }

    if let Some(rest) = text.strip_prefix("chan") {
        let trimmed = rest.trim_start();
        if let Some(elem) = trimmed.strip_prefix("<-") {
            return TypeRef::channel(ChannelDir::Send, parse_type(elem.trim(), depth + 1));
        }
        if starts_with_separator(rest) {
            return TypeRef::channel(ChannelDir::Both, parse_type(trimmed, depth + 1));
        }
    }

    if let Some(rest) = text.strip_prefix("func")
        && (rest.is_empty() || rest.trim_start().starts_with('('))
    {
        return TypeRef::Function;
    }

    if let Some(rest) = text.strip_prefix("interface")
        && rest.trim_start().starts_with('{')
    {
        return TypeRef::Interface;
    }

    if let Some((package, name)) = text.split_once('.')
        && is_identifier(package)
        && is_identifier(name)
    {
        return TypeRef::qualified(package, name);
    }

    if is_identifier(text) && text != "unknown" {
        return TypeRef::named(text);
    }

    TypeRef::Unknown
}

/// Index of the `]` closing an already-opened bracket
fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn starts_with_separator(text: &str) -> bool {
    text.starts_with(|c: char| c.is_whitespace() || c == '*' || c == '[' || c == '(')
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
