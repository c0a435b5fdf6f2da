//! Type rendering for comment text.

use crate::decl::{ChannelDir, TypeRef};

/// Render a type reference as Go type text. Total: unrecognized shapes read `unknown`.
pub fn describe(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(name) => name.clone(),
        TypeRef::Pointer(inner) => format!("*{}", describe(inner)),
        TypeRef::Slice(inner) => format!("[]{}", describe(inner)),
        TypeRef::Map { key, value } => format!("map[{}]{}", describe(key), describe(value)),
        TypeRef::Qualified { package, name } => format!("{}.{}", package, name),
        TypeRef::Interface => "interface{}".to_string(),
        TypeRef::Channel { dir, elem } => {
            let arrow = match dir {
                ChannelDir::Both => "chan ",
                ChannelDir::Send => "chan<- ",
                ChannelDir::Recv => "<-chan ",
            };
            format!("{}{}", arrow, describe(elem))
        }
        TypeRef::Function => "func".to_string(),
        TypeRef::Unknown => "unknown".to_string(),
    }
}
