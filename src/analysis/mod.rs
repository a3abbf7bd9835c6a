//! Profile analysis collaborator.
//!
//! The pipeline depends only on the [`Analyzer`] contract; any implementation
//! with this async signature is interchangeable. [`MockAnalyzer`] simulates a
//! remote AI service with artificial latency and randomized, platform-flavored
//! scores. Its numbers carry no stable meaning.

mod mock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::validation::Platform;

pub use mock::MockAnalyzer;

/// Scores and advice for one profile. Every score is in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisScores {
    pub platform: Platform,
    pub overall: u8,
    pub technical: u8,
    pub visibility: u8,
    pub consistency: u8,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Failure reported by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    /// Worth retrying (service busy, upstream hiccup).
    #[error("analysis temporarily unavailable: {0}")]
    Transient(String),

    /// Retrying will not help (profile private, unsupported content).
    #[error("analysis failed: {0}")]
    Permanent(String),
}

impl AnalysisFailure {
    pub fn is_transient(&self) -> bool {
        matches!(self, AnalysisFailure::Transient(_))
    }
}

/// Produces scores for a validated profile URL.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyzes `url`, optionally steered by a free-form `context` such as a target role.
    ///
    /// # Errors
    ///
    /// Implementations should return [`AnalysisFailure`] (possibly wrapped)
    /// so the retry loop can tell transient failures from permanent ones.
    async fn analyze(&self, url: &str, context: Option<&str>) -> anyhow::Result<AnalysisScores>;
}
