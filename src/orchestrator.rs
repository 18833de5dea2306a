//! Batch orchestration: select partners once, then generate their documents
//! one at a time.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::FailurePolicy;
use crate::db::{PartnerStore, QueryError};
use crate::generators::{AuthorizationGenerator, DocumentError, GeneratedDocument};
use crate::partner::select_eligible_partners;

pub const COMPLETION_MESSAGE: &str = "Finish generating all documents.";
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during document generation.";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("{source}")]
    Record {
        partner: String,
        #[source]
        source: DocumentError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub partner: String,
    pub message: String,
}

/// Outcome of one batch that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub generated: Vec<String>,
    pub failed: Vec<RecordFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human-readable status line.
    pub fn summary(&self) -> String {
        if self.is_complete() {
            return COMPLETION_MESSAGE.to_string();
        }

        let names: Vec<&str> = self.failed.iter().map(|f| f.partner.as_str()).collect();
        format!(
            "Finished generating documents with {} failure(s): {}",
            self.failed.len(),
            names.join(", ")
        )
    }
}

pub struct BatchRunner {
    store: Arc<dyn PartnerStore>,
    generator: AuthorizationGenerator,
    policy: FailurePolicy,
}

impl BatchRunner {
    pub fn new(
        store: Arc<dyn PartnerStore>,
        generator: AuthorizationGenerator,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    /// Run the batch and return its structured outcome.
    ///
    /// A selection failure always aborts. A document failure aborts only
    /// under [`FailurePolicy::FailFast`]; otherwise it is recorded and the
    /// next partner is processed.
    pub async fn run_report(&self) -> Result<BatchReport, BatchError> {
        let partners = select_eligible_partners(self.store.as_ref()).await?;
        log::info!(
            "Generating {} authorization documents ({:?})",
            partners.len(),
            self.policy
        );

        let mut report = BatchReport::default();
        for partner in &partners {
            match self.generator.assemble(partner).await {
                Ok(GeneratedDocument { filename, .. }) => report.generated.push(filename),
                Err(source) => {
                    if self.policy == FailurePolicy::FailFast {
                        return Err(BatchError::Record {
                            partner: partner.name.clone(),
                            source,
                        });
                    }
                    report.failed.push(RecordFailure {
                        partner: partner.name.clone(),
                        message: source.to_string(),
                    });
                }
            }
        }

        if report.is_complete() {
            log::info!("Batch finished: {} documents generated", report.generated.len());
        } else {
            log::warn!(
                "Batch finished: {} generated, {} failed",
                report.generated.len(),
                report.failed.len()
            );
        }
        Ok(report)
    }

    /// Run the batch and return a single status string.
    pub async fn run(&self) -> String {
        match self.run_report().await {
            Ok(report) => report.summary(),
            Err(e) => {
                log::error!("Document generation aborted: {}", e);
                let message = e.to_string();
                if message.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }
}
