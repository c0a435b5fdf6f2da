//! Line comment rendering.

/// Prefix every line with `// `; blank lines become a bare `//`
pub fn to_line_comments(text: &str) -> String {
    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
