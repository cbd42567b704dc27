use std::path::PathBuf;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::critic::analysis::AnimationAnalysis;
use crate::visual::model::SceneVisual;

const XXH3_SEED: u64 = 0x5ce7_e0a1_d2b3_c4f5;

/// Stable 64-bit fingerprint of an emitted script.
pub fn fingerprint_script(script: &str) -> u64 {
    xxh3_64_with_seed(script.as_bytes(), XXH3_SEED)
}

/// State of one loop iteration. Never mutated once critiqued; revisions start from a clone.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// 1-based iteration number.
    pub iteration: usize,
    pub scenes: Vec<SceneVisual>,
    pub script: String,
    pub fingerprint: u64,
    /// One analysis per scene, in scene order.
    pub analyses: Vec<AnimationAnalysis>,
    /// Where the script was written, if persistence is on and the write succeeded.
    pub script_path: Option<PathBuf>,
}

impl Snapshot {
    pub fn new(
        iteration: usize,
        scenes: Vec<SceneVisual>,
        script: String,
        analyses: Vec<AnimationAnalysis>,
        script_path: Option<PathBuf>,
    ) -> Self {
        Self {
            iteration,
            fingerprint: fingerprint_script(&script),
            scenes,
            script,
            analyses,
            script_path,
        }
    }

    /// Every scene approved. Vacuously true for an empty plan.
    pub fn all_approved(&self) -> bool {
        self.analyses.iter().all(AnimationAnalysis::is_approved)
    }

    pub fn approved_count(&self) -> usize {
        self.analyses.iter().filter(|a| a.is_approved()).count()
    }

    /// Mean of per-scene scores; 0 for an empty plan.
    pub fn average_score(&self) -> f64 {
        if self.analyses.is_empty() {
            return 0.0;
        }
        self.analyses.iter().map(|a| a.overall_score).sum::<f64>() / self.analyses.len() as f64
    }

    /// Scenes paired with their analyses.
    pub fn scored_scenes(&self) -> impl Iterator<Item = (&SceneVisual, &AnimationAnalysis)> {
        self.scenes.iter().zip(&self.analyses)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/snapshot.rs"]
mod tests;
