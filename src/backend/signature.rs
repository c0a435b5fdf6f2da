//! Plain-text Go signature rendering for remote prompts.

use crate::decl::{FuncDecl, Param, Receiver};
use crate::synth::describe;

/// Render `func (r *T) Name(a int, b string) (int, error)`.
///
/// The receiver name falls back to the lowercase first letter of its type. A single
/// unnamed result is written without parentheses.
pub fn render_signature(func: &FuncDecl, receiver: Option<&Receiver>) -> String {
    let mut text = String::from("func ");

    if let Some(receiver) = receiver {
        let name = receiver.name.clone().unwrap_or_else(|| {
            receiver
                .type_name
                .chars()
                .next()
                .map(|c| c.to_lowercase().collect())
                .unwrap_or_default()
        });
        let star = if receiver.pointer { "*" } else { "" };
        text.push_str(&format!("({} {}{}) ", name, star, receiver.type_name));
    }

    let params = func
        .params
        .iter()
        .map(render_param)
        .collect::<Vec<_>>()
        .join(", ");
    text.push_str(&format!("{}({})", func.name, params));

    let results: Vec<String> = func
        .results
        .iter()
        .map(|r| match &r.name {
            Some(name) => format!("{} {}", name, describe(&r.ty)),
            None => describe(&r.ty),
        })
        .collect();
    match results.as_slice() {
        [] => {}
        [single] if func.results[0].name.is_none() => {
            text.push(' ');
            text.push_str(single);
        }
        _ => text.push_str(&format!(" ({})", results.join(", "))),
    }

    text
}

fn render_param(param: &Param) -> String {
    match &param.name {
        Some(name) => format!("{} {}", name, describe(&param.ty)),
        None => describe(&param.ty),
    }
}
