//! Declaration Annotation
//!
//! Walks the declarations of one file in source order and asks the active backend
//! for a comment wherever none exists yet.
//!
//! ## Rules
//!
//! - Declarations (and block specs) that already carry a doc comment are left alone
//! - Functions named `main` or `init` are never commented
//! - Parenthesized const/var blocks are commented per spec, other blocks once
//! - The author footer goes on outer declarations only
//! - A backend failure skips that declaration; cancellation stops the run

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::SharedBackend;
use crate::constants::composer::SKIPPED_FUNCTIONS;
use crate::decl::{Declaration, DeclarationShape, Manifest, ValueSpec};
use crate::synth::Subject;
use crate::types::{AutocommentError, BackendError, Result};

/// Location of a comment: a declaration, or one spec of a parenthesized block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    pub decl: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<usize>,
}

impl Target {
    pub fn declaration(decl: usize) -> Self {
        Self { decl, spec: None }
    }

    pub fn spec(decl: usize, spec: usize) -> Self {
        Self {
            decl,
            spec: Some(spec),
        }
    }
}

/// Generated comment text, without comment markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub target: Target,
    pub identifier: String,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub target: Target,
    pub identifier: String,
    pub error: BackendError,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationReport {
    pub annotations: Vec<Annotation>,
    pub failures: Vec<Failure>,
    /// Declarations or specs left untouched
    pub skipped: usize,
}

impl AnnotationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Store the generated comments in the `doc` fields they target.
    ///
    /// Returns the number of comments applied; stale targets are ignored.
    pub fn apply_to(&self, manifest: &mut Manifest) -> usize {
        let mut applied = 0;
        for annotation in &self.annotations {
            let Some(decl) = manifest.declarations.get_mut(annotation.target.decl) else {
                continue;
            };
            let slot = match annotation.target.spec {
                None => Some(&mut decl.doc),
                Some(spec) => match &mut decl.shape {
                    DeclarationShape::Const(block) | DeclarationShape::Var(block) => {
                        block.specs.get_mut(spec).map(|s| &mut s.doc)
                    }
                    _ => None,
                },
            };
            if let Some(slot) = slot {
                *slot = Some(annotation.comment.clone());
                applied += 1;
            }
        }
        applied
    }
}

/// Applies a comment backend to the declarations of a file
pub struct Annotator {
    backend: SharedBackend,
    signature: Option<String>,
}

impl Annotator {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            backend,
            signature: None,
        }
    }

    /// Author footer for outer declarations; blank values disable it
    pub fn with_signature(mut self, signature: Option<&str>) -> Self {
        self.signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub async fn annotate(
        &self,
        declarations: &[Declaration],
        cancel: &CancellationToken,
    ) -> Result<AnnotationReport> {
        let mut report = AnnotationReport::default();

        for (index, decl) in declarations.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(AutocommentError::Cancelled);
            }

            match &decl.shape {
                DeclarationShape::Const(block) | DeclarationShape::Var(block)
                    if block.parenthesized =>
                {
                    let is_var = matches!(decl.shape, DeclarationShape::Var(_));
                    for (spec_index, spec) in block.specs.iter().enumerate() {
                        if spec.has_doc() {
                            report.skipped += 1;
                            continue;
                        }
                        let target = Target::spec(index, spec_index);
                        let subjects = Subject::spec_values(spec, is_var);
                        self.record(
                            &mut report,
                            target,
                            spec.names.join(", "),
                            subjects,
                            false,
                            cancel,
                        )
                        .await?;
                    }
                }
                shape => {
                    if has_effective_doc(decl) {
                        report.skipped += 1;
                        continue;
                    }
                    if let DeclarationShape::Function(func) = shape
                        && SKIPPED_FUNCTIONS.contains(&func.name.as_str())
                    {
                        debug!("Skipping reserved function {}", func.name);
                        report.skipped += 1;
                        continue;
                    }
                    let subjects = Subject::of_shape(shape);
                    self.record(
                        &mut report,
                        Target::declaration(index),
                        shape.identifier(),
                        subjects,
                        true,
                        cancel,
                    )
                    .await?;
                }
            }
        }

        info!(
            "{} annotated, {} skipped, {} failed",
            report.annotations.len(),
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }

    async fn record(
        &self,
        report: &mut AnnotationReport,
        target: Target,
        identifier: String,
        subjects: Vec<Subject<'_>>,
        outer: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        match self.comment_all(subjects, cancel).await {
            Ok(mut comment) => {
                if outer && let Some(signature) = &self.signature {
                    comment.push_str(&format!("\nAuthor: {}.", signature));
                }
                report.annotations.push(Annotation {
                    target,
                    identifier,
                    comment,
                });
                Ok(())
            }
            Err(e) if e.is_cancelled() => Err(AutocommentError::Cancelled),
            Err(e) => {
                warn!("Failed to comment {}: {}", identifier, e);
                report.failures.push(Failure {
                    target,
                    identifier,
                    error: e,
                });
                Ok(())
            }
        }
    }

    /// Comment every subject in order, one result per line
    async fn comment_all(
        &self,
        subjects: Vec<Subject<'_>>,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError> {
        let mut lines = Vec::with_capacity(subjects.len());
        for subject in subjects {
            lines.push(self.backend.comment(subject, cancel).await?);
        }
        Ok(lines.join("\n"))
    }
}

/// Doc of the declaration itself, or of its only spec for an unparenthesized block
fn has_effective_doc(decl: &Declaration) -> bool {
    if decl.has_doc() {
        return true;
    }
    match &decl.shape {
        DeclarationShape::Const(block) | DeclarationShape::Var(block) => {
            block.specs.iter().any(ValueSpec::has_doc)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CommentBackend, HeuristicBackend};
    use crate::decl::{FuncDecl, MethodDecl, Receiver, StructDecl, ValueBlock};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn heuristic() -> Annotator {
        Annotator::new(Arc::new(HeuristicBackend::default()))
    }

    fn func(name: &str) -> Declaration {
        Declaration::new(DeclarationShape::Function(FuncDecl::new(name)))
    }

    /// Fails for one identifier, succeeds for everything else
    struct Flaky {
        failing: &'static str,
        cancelled: bool,
    }

    #[async_trait]
    impl CommentBackend for Flaky {
        async fn comment(
            &self,
            subject: Subject<'_>,
            _cancel: &CancellationToken,
        ) -> std::result::Result<String, BackendError> {
            if subject.identifier() == self.failing {
                if self.cancelled {
                    return Err(BackendError::cancelled());
                }
                return Err(BackendError::status(500, "boom"));
            }
            Ok(format!("{} is fine.", subject.identifier()))
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_existing_docs_are_preserved() {
        let decls = vec![func("Documented").with_doc("Documented does things."), func("Bare")];
        let report = heuristic()
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.annotations.len(), 1);
        assert_eq!(report.annotations[0].identifier, "Bare");
    }

    #[tokio::test]
    async fn test_main_and_init_functions_skipped() {
        let method = Declaration::new(DeclarationShape::Method(MethodDecl {
            receiver: Receiver::pointer("App"),
            func: FuncDecl::new("init"),
        }));
        let decls = vec![func("main"), func("init"), method];
        let report = heuristic()
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.skipped, 2);
        assert_eq!(report.annotations.len(), 1);
        assert_eq!(report.annotations[0].identifier, "App.init");
    }

    #[tokio::test]
    async fn test_parenthesized_block_per_spec() {
        let block = ValueBlock::grouped(vec![
            ValueSpec::new("A"),
            ValueSpec {
                names: vec!["B".to_string(), "C".to_string()],
                ty: None,
                doc: None,
            },
            ValueSpec {
                doc: Some("D is documented.".to_string()),
                ..ValueSpec::new("D")
            },
        ]);
        let decls = vec![Declaration::new(DeclarationShape::Const(block))];
        let report = heuristic()
            .with_signature(Some("Jane"))
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.annotations.len(), 2);
        assert_eq!(report.annotations[0].target, Target::spec(0, 0));
        assert_eq!(report.annotations[0].comment, "A is a constant.");
        assert_eq!(report.annotations[1].target, Target::spec(0, 1));
        assert_eq!(
            report.annotations[1].comment,
            "B is a constant.\nC is a constant."
        );
        assert!(!report.annotations[1].comment.contains("Author"));
    }

    #[tokio::test]
    async fn test_single_value_gets_outer_annotation_with_footer() {
        let block = ValueBlock::single(ValueSpec::typed("Timeout", "int"));
        let decls = vec![Declaration::new(DeclarationShape::Var(block))];
        let report = heuristic()
            .with_signature(Some("Jane"))
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.annotations.len(), 1);
        assert_eq!(report.annotations[0].target, Target::declaration(0));
        assert_eq!(
            report.annotations[0].comment,
            "Timeout is a variable of type int.\nAuthor: Jane."
        );
    }

    #[tokio::test]
    async fn test_blank_signature_omits_footer() {
        let decls = vec![Declaration::new(DeclarationShape::Struct(StructDecl::new(
            "Marker",
        )))];
        let report = heuristic()
            .with_signature(Some("  "))
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.annotations[0].comment, "Marker represents a structure.");
    }

    #[tokio::test]
    async fn test_backend_failure_skips_and_continues() {
        let annotator = Annotator::new(Arc::new(Flaky {
            failing: "Broken",
            cancelled: false,
        }));
        let decls = vec![func("First"), func("Broken"), func("Last")];
        let report = annotator
            .annotate(&decls, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].identifier, "Broken");
        assert_eq!(report.failures[0].error.status_code(), Some(500));
        let names: Vec<_> = report.annotations.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(names, vec!["First", "Last"]);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_run() {
        let annotator = Annotator::new(Arc::new(Flaky {
            failing: "Broken",
            cancelled: true,
        }));
        let decls = vec![func("First"), func("Broken"), func("Last")];
        let result = annotator.annotate(&decls, &CancellationToken::new()).await;
        assert!(matches!(result, Err(AutocommentError::Cancelled)));

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = heuristic().annotate(&decls, &cancel).await;
        assert!(matches!(result, Err(AutocommentError::Cancelled)));
    }

    #[tokio::test]
    async fn test_apply_writes_docs_and_is_idempotent() {
        let mut manifest = Manifest {
            file: Some("widget.go".to_string()),
            declarations: vec![
                func("Run"),
                Declaration::new(DeclarationShape::Const(ValueBlock::grouped(vec![
                    ValueSpec::new("A"),
                ]))),
            ],
        };
        let annotator = heuristic();
        let cancel = CancellationToken::new();

        let report = annotator.annotate(&manifest.declarations, &cancel).await.unwrap();
        assert_eq!(report.apply_to(&mut manifest), 2);
        assert!(manifest.declarations[0].has_doc());
        match &manifest.declarations[1].shape {
            DeclarationShape::Const(block) => {
                assert_eq!(block.specs[0].doc.as_deref(), Some("A is a constant."))
            }
            other => panic!("unexpected shape: {:?}", other),
        }

        let second = annotator.annotate(&manifest.declarations, &cancel).await.unwrap();
        assert!(second.annotations.is_empty());
        assert_eq!(second.skipped, 2);
    }
}
