//! Annotate Command
//!
//! Generate doc comments for the declarations described by manifest files.
//!
//! Usage:
//!   autocomment annotate <manifest>... [-f json] [--write] [--signature S] [--examples]

use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::annotate::{AnnotationReport, Annotator};
use crate::backend::create_backend;
use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::decl::Manifest;
use crate::types::Result;

/// Manifests processed at the same time
const MAX_CONCURRENT_MANIFESTS: usize = 4;

pub struct AnnotateOptions {
    pub manifests: Vec<PathBuf>,
    pub format: String,
    pub write: bool,
    pub signature: Option<String>,
    pub examples: bool,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub async fn run(options: AnnotateOptions, cancel: CancellationToken) -> Result<()> {
    let mut config = ConfigLoader::load(options.config.as_deref())?;
    if options.examples {
        config.examples = true;
    }
    if options.signature.is_some() {
        config.signature = options.signature.clone();
    }

    let backend = create_backend(&config)?;
    let annotator = Annotator::new(backend).with_signature(config.signature());
    let as_json = options.format == "json";
    let output = Output::quiet(options.quiet).machine_readable(as_json);

    // Output stays in argument order
    let mut results = stream::iter(options.manifests.iter())
        .map(|path| {
            let annotator = &annotator;
            let cancel = &cancel;
            async move {
                let manifest = Manifest::load(path)?;
                let report = annotator.annotate(&manifest.declarations, cancel).await?;
                Ok::<_, crate::types::AutocommentError>((path, manifest, report))
            }
        })
        .buffered(MAX_CONCURRENT_MANIFESTS);

    while let Some(result) = results.next().await {
        let (path, mut manifest, report) = result?;

        if !as_json {
            print_report(&output, &path.display().to_string(), &report);
        }

        report.apply_to(&mut manifest);

        if as_json {
            println!("{}", manifest.to_json()?);
        }

        if options.write {
            manifest.save(path)?;
            output.success(&format!(
                "Wrote {} comment(s) to {}",
                report.annotations.len(),
                path.display()
            ));
        }

        if !report.is_clean() {
            output.warning(&format!(
                "{}: {} declaration(s) left uncommented after backend errors",
                path.display(),
                report.failures.len()
            ));
        }
    }

    Ok(())
}

fn print_report(output: &Output, path: &str, report: &AnnotationReport) {
    output.header(path);
    for annotation in &report.annotations {
        output.comment(&annotation.identifier, &annotation.comment);
    }
    for failure in &report.failures {
        output.error(&format!("{}: {}", failure.identifier, failure.error));
    }
}
