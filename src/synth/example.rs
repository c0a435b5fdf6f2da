//! Usage Example Synthesis
//!
//! Fabricates a call-site example from parameter and result types. Synthesis is
//! all-or-nothing: a single type without a sample category suppresses the block.

use tracing::debug;

use crate::decl::{Param, ResultParam, TypeRef};

const INDENT: &str = "  ";

/// Variable name and literal used for one sample category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    binding: &'static str,
    literal: &'static str,
}

impl Sample {
    const fn new(binding: &'static str, literal: &'static str) -> Self {
        Self { binding, literal }
    }

    fn is_error(&self) -> bool {
        self.binding == "err"
    }

    fn is_context(&self) -> bool {
        self.binding == "ctx"
    }
}

fn sample_for(ty: &TypeRef) -> Option<Sample> {
    let sample = match ty.bare_name()? {
        "bool" => Sample::new("valid", "true"),
        "int" => Sample::new("nb", "50"),
        "string" => Sample::new("str", "\"my-string\""),
        "float32" => Sample::new("nb", "56.32"),
        "float64" => Sample::new("nb", "56.64"),
        "error" => Sample::new("err", "nil"),
        "Context" => Sample::new("ctx", "ctx"),
        _ => return None,
    };
    Some(sample)
}

/// Build the example block, or an empty string when nothing sensible can be shown
pub fn synthesize(func_name: &str, params: &[Param], results: &[ResultParam]) -> String {
    if params.is_empty() && results.is_empty() {
        return String::new();
    }

    let inputs: Option<Vec<Sample>> = params.iter().map(|p| sample_for(&p.ty)).collect();
    let outputs: Option<Vec<Sample>> = results.iter().map(|r| sample_for(&r.ty)).collect();
    let (Some(inputs), Some(outputs)) = (inputs, outputs) else {
        debug!("Example suppressed for {}: unmapped type", func_name);
        return String::new();
    };

    let mut lines = vec!["Example:".to_string()];

    if inputs.first().is_some_and(Sample::is_context) {
        lines.push(format!("{}ctx := context.Background()", INDENT));
    }

    let args = inputs
        .iter()
        .map(|s| s.literal)
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!("{}({})", func_name, args);

    if outputs.is_empty() {
        lines.push(format!("{}{}", INDENT, call));
    } else {
        let bindings = outputs
            .iter()
            .map(|s| s.binding)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{}{} := {}", INDENT, bindings, call));
    }

    if outputs.iter().any(Sample::is_error) {
        lines.push(format!("{}if err != nil {{", INDENT));
        lines.push(format!("{}    log.Fatalf(\"Error: %v\", err)", INDENT));
        lines.push(format!("{}}}", INDENT));
    }

    let printed: Vec<&str> = outputs
        .iter()
        .filter(|s| !s.is_error())
        .map(|s| s.binding)
        .collect();
    if !printed.is_empty() {
        lines.push(format!(
            "{}fmt.Printf(\"{}\", {})",
            INDENT,
            "%v ".repeat(printed.len()),
            printed.join(", ")
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signature_has_no_example() {
        assert_eq!(synthesize("Run", &[], &[]), "");
    }

    #[test]
    fn test_context_and_error() {
        let params = vec![
            Param::new("ctx", "context.Context"),
            Param::new("name", "string"),
        ];
        let results = vec![ResultParam::new("int"), ResultParam::new("error")];
        let example = synthesize("CountUsers", &params, &results);
        assert_eq!(
            example,
            "Example:\n\
             \x20 ctx := context.Background()\n\
             \x20 nb, err := CountUsers(ctx, \"my-string\")\n\
             \x20 if err != nil {\n\
             \x20     log.Fatalf(\"Error: %v\", err)\n\
             \x20 }\n\
             \x20 fmt.Printf(\"%v \", nb)"
        );
    }

    #[test]
    fn test_print_format_repeats_per_result() {
        let results = vec![
            ResultParam::new("bool"),
            ResultParam::new("float64"),
            ResultParam::new("string"),
        ];
        let example = synthesize("Stats", &[], &results);
        assert!(example.contains("valid, nb, str := Stats()"));
        assert!(example.contains("fmt.Printf(\"%v %v %v \", valid, nb, str)"));
        assert!(!example.contains("if err != nil"));
    }

    #[test]
    fn test_no_results_is_bare_call() {
        let params = vec![Param::new("flag", "bool"), Param::new("ratio", "float32")];
        assert_eq!(
            synthesize("Toggle", &params, &[]),
            "Example:\n  Toggle(true, 56.32)"
        );
    }

    #[test]
    fn test_unmapped_type_suppresses() {
        let params = vec![Param::new("cfg", "Config")];
        assert_eq!(synthesize("Apply", &params, &[]), "");

        let results = vec![ResultParam::new("[]string")];
        assert_eq!(synthesize("List", &[], &results), "");
    }
}
