//! Simulated analysis service.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::{AnalysisFailure, AnalysisScores, Analyzer};
use crate::validation::Platform;

/// Inclusive score ranges (technical, visibility, consistency) per platform.
fn score_ranges(platform: Platform) -> [(u8, u8); 3] {
    match platform {
        Platform::GitHub => [(70, 95), (55, 85), (60, 90)],
        Platform::LinkedIn => [(50, 80), (65, 95), (60, 90)],
        Platform::DevTo | Platform::Medium => [(60, 85), (60, 90), (50, 85)],
        Platform::Portfolio | Platform::Other => [(60, 90), (50, 80), (55, 85)],
    }
}

fn strengths(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::GitHub => &[
            "Active commit history across several repositories",
            "Well-documented README files",
            "Diverse language footprint",
            "Regular contributions to open source projects",
        ],
        Platform::LinkedIn => &[
            "Complete work history with measurable outcomes",
            "Strong network in the target industry",
            "Endorsed core skills",
            "Clear, keyword-rich headline",
        ],
        Platform::DevTo | Platform::Medium => &[
            "Consistent publishing cadence",
            "Technical depth in long-form posts",
            "Healthy reader engagement",
        ],
        Platform::Portfolio | Platform::Other => &[
            "Clean visual presentation",
            "Project case studies with context",
            "Straightforward navigation",
        ],
    }
}

fn recommendations(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::GitHub => &[
            "Pin your strongest repositories to the profile",
            "Add a profile README summarizing your focus areas",
            "Write tests and CI badges for flagship projects",
            "Archive stale forks to highlight original work",
        ],
        Platform::LinkedIn => &[
            "Quantify achievements in each role",
            "Request recommendations from recent colleagues",
            "Add featured links to projects and articles",
            "Refresh the About section with current goals",
        ],
        Platform::DevTo | Platform::Medium => &[
            "Link posts back to related code repositories",
            "Group articles into series around one theme",
            "Add a short author bio with contact links",
        ],
        Platform::Portfolio | Platform::Other => &[
            "Lead with two or three flagship projects",
            "Add outcomes and metrics to each case study",
            "Make contact information visible above the fold",
            "Improve page load time on mobile",
        ],
    }
}

/// Analyzer that sleeps for a fixed latency and returns random scores.
///
/// With a seed the score sequence is reproducible. A non-zero failure rate
/// makes individual calls fail with [`AnalysisFailure::Transient`].
#[derive(Debug)]
pub struct MockAnalyzer {
    latency: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::ANALYSIS_LATENCY_MS))
    }
}

impl MockAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure_rate: 0.0,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Probability of a transient failure per call, clamped to `0.0..=1.0`.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }

    /// Reseeds the score generator; `None` keeps the current (entropy-seeded) one.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        }
        self
    }

    fn draw(
        &self,
        platform: Platform,
        context: Option<&str>,
    ) -> Result<AnalysisScores, AnalysisFailure> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.failure_rate > 0.0 && rng.random_bool(self.failure_rate) {
            return Err(AnalysisFailure::Transient(
                "analysis service did not respond".to_string(),
            ));
        }

        let [technical, visibility, consistency] =
            score_ranges(platform).map(|(lo, hi)| rng.random_range(lo..=hi));
        let sum = u16::from(technical) + u16::from(visibility) + u16::from(consistency);
        let overall = ((sum + 1) / 3) as u8;

        let strengths: Vec<String> = strengths(platform)
            .choose_multiple(&mut *rng, 2)
            .map(|s| s.to_string())
            .collect();
        let mut recommendations: Vec<String> = recommendations(platform)
            .choose_multiple(&mut *rng, 3)
            .map(|s| s.to_string())
            .collect();
        if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
            recommendations.push(format!("Tailor your headline and projects toward {context}"));
        }

        Ok(AnalysisScores {
            platform,
            overall,
            technical,
            visibility,
            consistency,
            strengths,
            recommendations,
        })
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, url: &str, context: Option<&str>) -> anyhow::Result<AnalysisScores> {
        debug!("Analyzing {url} (simulated {}ms)", self.latency.as_millis());
        tokio::time::sleep(self.latency).await;

        let platform = Platform::from_url(url);
        Ok(self.draw(platform, context)?)
    }
}
