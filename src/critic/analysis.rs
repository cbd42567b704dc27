//! Structured verdict produced by the critic for one scene.

/// Quality dimension a feedback item scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticAspect {
    Timing,
    VisualClarity,
    EducationalValue,
    AnimationFlow,
    TechnicalAccuracy,
}

impl CriticAspect {
    /// Every aspect, in report order.
    pub const ALL: [CriticAspect; 5] = [
        CriticAspect::Timing,
        CriticAspect::VisualClarity,
        CriticAspect::EducationalValue,
        CriticAspect::AnimationFlow,
        CriticAspect::TechnicalAccuracy,
    ];

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            CriticAspect::Timing => "Timing",
            CriticAspect::VisualClarity => "Visual Clarity",
            CriticAspect::EducationalValue => "Educational Value",
            CriticAspect::AnimationFlow => "Animation Flow",
            CriticAspect::TechnicalAccuracy => "Technical Accuracy",
        }
    }

    /// Weight in the aggregate score.
    pub fn weight(self) -> f64 {
        match self {
            CriticAspect::EducationalValue => 0.30,
            CriticAspect::VisualClarity => 0.25,
            CriticAspect::Timing => 0.20,
            CriticAspect::AnimationFlow => 0.15,
            CriticAspect::TechnicalAccuracy => 0.10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Mutation the controller applies to an unapproved scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionAction {
    /// Scale duration by 1.3, clamped.
    IncreaseDuration,
    /// Scale duration by 0.8, clamped.
    DecreaseDuration,
    /// Truncate the element list.
    TrimElements,
    /// Append a title label once.
    AddLabels,
    /// Append boilerplate to short narration.
    ExtendNarration,
}

/// One scored observation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CriticFeedback {
    pub aspect: CriticAspect,
    /// 0..=10.
    pub score: f64,
    pub text: String,
    pub suggestions: Vec<String>,
    pub severity: Severity,
    pub actions: Vec<RevisionAction>,
}

impl CriticFeedback {
    pub fn new(aspect: CriticAspect, score: f64, severity: Severity, text: &str) -> Self {
        Self {
            aspect,
            score,
            text: text.to_string(),
            suggestions: Vec::new(),
            severity,
            actions: Vec::new(),
        }
    }

    pub fn suggest(mut self, suggestions: &[&str]) -> Self {
        self.suggestions
            .extend(suggestions.iter().map(|s| s.to_string()));
        self
    }

    pub fn act(mut self, action: RevisionAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Approval {
    Approved,
    NeedsRevision,
    Rejected,
}

impl Approval {
    /// Score at or above which a scene without high-severity items is approved.
    pub const EXCELLENT: f64 = 8.5;
    /// Score at or above which a scene with at most one high-severity item needs revision.
    pub const ACCEPTABLE: f64 = 5.5;

    /// Gate an aggregate score against its high-severity item count.
    pub fn decide(score: f64, high_severity: usize) -> Self {
        if score >= Self::EXCELLENT && high_severity == 0 {
            Approval::Approved
        } else if score >= Self::ACCEPTABLE && high_severity <= 1 {
            Approval::NeedsRevision
        } else {
            Approval::Rejected
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Approval::Approved => "approved",
            Approval::NeedsRevision => "needs_revision",
            Approval::Rejected => "rejected",
        }
    }
}

/// Medium and high severity suggestions grouped by aspect.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Recommendations {
    pub timing_adjustments: Vec<String>,
    pub visual_improvements: Vec<String>,
    pub educational_enhancements: Vec<String>,
    pub technical_fixes: Vec<String>,
}

impl Recommendations {
    pub fn from_feedback(items: &[CriticFeedback]) -> Self {
        let mut rec = Self::default();
        for item in items.iter().filter(|f| f.severity >= Severity::Medium) {
            let bucket = match item.aspect {
                CriticAspect::Timing => &mut rec.timing_adjustments,
                CriticAspect::VisualClarity => &mut rec.visual_improvements,
                CriticAspect::EducationalValue => &mut rec.educational_enhancements,
                CriticAspect::TechnicalAccuracy => &mut rec.technical_fixes,
                CriticAspect::AnimationFlow => continue,
            };
            bucket.extend(item.suggestions.iter().cloned());
        }
        rec
    }

    /// Non-empty buckets as `(heading, suggestions)`.
    pub fn buckets(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("Timing Adjustments", self.timing_adjustments.as_slice()),
            ("Visual Improvements", self.visual_improvements.as_slice()),
            ("Educational Enhancements", self.educational_enhancements.as_slice()),
            ("Technical Fixes", self.technical_fixes.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets().next().is_none()
    }
}

/// Verdict for one scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationAnalysis {
    pub scene: String,
    pub overall_score: f64,
    pub feedback: Vec<CriticFeedback>,
    pub recommendations: Recommendations,
    pub approval: Approval,
}

impl AnimationAnalysis {
    /// Aggregate feedback into a verdict.
    pub fn from_feedback(scene: &str, feedback: Vec<CriticFeedback>) -> Self {
        let overall_score = weighted_score(&feedback);
        let high = feedback
            .iter()
            .filter(|f| f.severity == Severity::High)
            .count();
        Self {
            scene: scene.to_string(),
            overall_score,
            recommendations: Recommendations::from_feedback(&feedback),
            approval: Approval::decide(overall_score, high),
            feedback,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.approval == Approval::Approved
    }

    /// De-duplicated revision actions across all items, in first-seen order.
    pub fn actions(&self) -> Vec<RevisionAction> {
        let mut out: Vec<RevisionAction> = Vec::new();
        for action in self.feedback.iter().flat_map(|f| f.actions.iter().copied()) {
            if !out.contains(&action) {
                out.push(action);
            }
        }
        out
    }
}

/// Weighted mean of item scores; 5.0 when there are no items.
pub fn weighted_score(items: &[CriticFeedback]) -> f64 {
    let (sum, total) = items.iter().fold((0.0, 0.0), |(sum, total), f| {
        let w = f.aspect.weight();
        (sum + f.score * w, total + w)
    });
    if total > 0.0 { sum / total } else { 5.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/critic/analysis.rs"]
mod tests;
