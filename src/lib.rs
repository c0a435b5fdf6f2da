//! autocomment - Doc Comment Synthesis for Go Declarations
//!
//! Inspects the structural shape of a parsed Go declaration (name casing, receiver,
//! parameters, results, fields, visibility) and composes an English doc comment for
//! it, either offline from naming and type heuristics or through a remote
//! text-generation service.
//!
//! ## Quick Start
//!
//! ```ignore
//! use autocomment::{Annotator, Config, Manifest, create_backend};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = Config::default();
//! let annotator = Annotator::new(create_backend(&config)?).with_signature(config.signature());
//! let mut manifest = Manifest::load(Path::new("widget.json"))?;
//! let report = annotator.annotate(&manifest.declarations, &CancellationToken::new()).await?;
//! report.apply_to(&mut manifest);
//! ```
//!
//! ## Modules
//!
//! - [`decl`]: declaration shapes and manifests
//! - [`synth`]: deterministic comment composition
//! - [`backend`]: heuristic and remote comment backends
//! - [`annotate`]: per-file orchestration and write-back
//! - [`config`]: layered configuration

pub mod annotate;
pub mod backend;
pub mod cli;
pub mod comment;
pub mod config;
pub mod constants;
pub mod decl;
pub mod synth;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use annotate::{Annotation, AnnotationReport, Annotator, Failure, Target};
pub use backend::{CommentBackend, CompletionClient, SharedBackend, create_backend};
pub use comment::to_line_comments;
pub use config::{Config, ConfigLoader};
pub use decl::{Declaration, DeclarationShape, Manifest, TypeRef};
pub use synth::{Composer, ComposerOptions, Subject};
pub use types::{AutocommentError, BackendError, BackendErrorKind, Result};
