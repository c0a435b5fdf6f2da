//! Offline heuristic backend.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::CommentBackend;
use crate::synth::{Composer, Subject};
use crate::types::BackendError;

/// Composes comments from declaration shapes without any network access
#[derive(Debug, Clone, Default)]
pub struct HeuristicBackend {
    composer: Composer,
}

impl HeuristicBackend {
    pub fn new(composer: Composer) -> Self {
        Self { composer }
    }
}

#[async_trait]
impl CommentBackend for HeuristicBackend {
    async fn comment(
        &self,
        subject: Subject<'_>,
        _cancel: &CancellationToken,
    ) -> Result<String, BackendError> {
        Ok(self.composer.compose_subject(subject))
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
