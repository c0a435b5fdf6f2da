//! Comment Synthesis
//!
//! Deterministic, offline composition of Go doc comments from declaration shapes.
//!
//! ## Modules
//!
//! - `names`: identifier segmentation and verb-prefix explanation
//! - `describe`: Go type text rendering
//! - `grammar`: articles and visibility markers
//! - `example`: usage example synthesis
//! - `composer`: per-shape comment templates

mod composer;
mod describe;
mod example;
mod grammar;
mod names;

pub use composer::{Composer, ComposerOptions, Subject};
pub use describe::describe;
pub use example::synthesize;
pub use grammar::{indefinite_article, private_marker, with_article};
pub use names::{NameRole, explain, segment};
