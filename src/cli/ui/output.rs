use console::style;

use crate::comment::to_line_comments;

pub struct Output {
    quiet: bool,
    machine_readable: bool,
}

impl Output {
    pub fn new() -> Self {
        Self {
            quiet: false,
            machine_readable: false,
        }
    }

    /// Suppress informational lines; comments and errors are still printed
    pub fn quiet(quiet: bool) -> Self {
        Self {
            quiet,
            machine_readable: false,
        }
    }

    /// Stdout carries a document (e.g. JSON); status lines move to stderr
    pub fn machine_readable(mut self, machine_readable: bool) -> Self {
        self.machine_readable = machine_readable;
        self
    }

    fn status_on_stderr(&self) -> bool {
        self.machine_readable
    }

    fn status(&self, line: String) {
        if self.quiet {
            return;
        }
        if self.status_on_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn success(&self, message: &str) {
        self.status(format!("{} {}", style("✓").green(), message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        self.status(format!("{} {}", style("⚠").yellow(), message));
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    /// Declaration identifier followed by its rendered `//` comment
    pub fn comment(&self, identifier: &str, text: &str) {
        println!("{}", style(identifier).cyan().bold());
        println!("{}", style(to_line_comments(text)).dim());
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
