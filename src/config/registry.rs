use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Props;
use crate::foundation::error::{EduvizError, EduvizResult};

/// Lexicon category of a recognised domain term.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    /// Mathematical entity (variance, eigenvalue, ...).
    Entity,
    /// Something drawable (data points, arrows, axes, ...).
    Visual,
    /// A step of the technique (rotation, projection, ...).
    Process,
    /// A data structure (matrix, vector, ...).
    Structure,
}

impl ConceptCategory {
    /// Stable snake_case label used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Visual => "visual",
            Self::Process => "process",
            Self::Structure => "structure",
        }
    }
}

/// One recognisable term with its static annotations.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LexiconEntry {
    /// Canonical underscored name, e.g. `principal_component`.
    pub name: String,
    /// Category of the term.
    pub category: ConceptCategory,
    /// Static description; `Concept: <name>` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of related terms.
    #[serde(default)]
    pub relationships: Vec<String>,
    /// Visual-property hints copied onto the extracted concept.
    #[serde(default)]
    pub hints: Props,
    /// Privileged terms have their occurrence count doubled.
    #[serde(default)]
    pub privileged: bool,
}

impl LexiconEntry {
    /// Description attached to extracted concepts.
    pub fn description_or_default(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Concept: {}", self.name))
    }
}

/// Category of a planned scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCategory {
    /// Opening scene.
    Introduction,
    /// Explains a single concept.
    ConceptExplanation,
    /// Shows the technique being applied.
    Transformation,
    /// Contrasts before/after.
    Comparison,
    /// Wrap-up.
    Conclusion,
}

/// A fixed scene template inside a topic catalog.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneTemplate {
    /// Scene id, snake_case.
    pub name: String,
    /// Scene category.
    pub category: SceneCategory,
    /// Human-readable description.
    pub description: String,
    /// Element kinds, in declaration order.
    pub kinds: Vec<String>,
    /// The scene is planned iff at least one of these concept names was extracted.
    #[serde(default)]
    pub required: Vec<String>,
    /// Plan the scene regardless of `required`.
    #[serde(default)]
    pub always_include: bool,
    /// Scene duration budget in seconds.
    pub duration: f64,
    /// Fixed narration.
    pub narration: String,
}

/// Ordered template list for one topic.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TemplateCatalog {
    /// Primary topic key.
    pub key: String,
    /// Alternative topic keys.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Templates, evaluated in order.
    pub templates: Vec<SceneTemplate>,
}

impl TemplateCatalog {
    /// Case-insensitive match against the key and aliases.
    pub fn matches(&self, topic: &str) -> bool {
        let topic = topic.trim();
        self.key.eq_ignore_ascii_case(topic)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(topic))
    }
}

/// What an animation kind does on screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum AnimationEffect {
    /// Opacity ramp in.
    FadeIn,
    /// Opacity ramp out.
    FadeOut,
    /// Arrow grows from its tail.
    Grow,
    /// Scale to `to` and back.
    Scale {
        /// Peak scale factor.
        to: f64,
    },
    /// Morph into its target shape.
    Morph,
    /// Drop onto the projection plane.
    Projection,
    /// Rotate about the vertical axis.
    Rotation {
        /// Rotation angle in degrees.
        degrees: f64,
    },
}

/// Library entry for one animation kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    /// Effect shape.
    #[serde(flatten)]
    pub effect: AnimationEffect,
    /// Default duration in seconds.
    pub duration: f64,
}

/// Named color roles used by the visual generators, as `#rrggbb`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Main accent (first principal direction, x axis).
    pub primary: String,
    /// Secondary accent.
    pub secondary: String,
    /// Variance highlight.
    pub accent: String,
    /// Positive/third-axis color.
    pub success: String,
    /// Projection plane.
    pub warning: String,
    /// Data points and projection lines.
    pub neutral: String,
    /// Scene background.
    pub background: String,
    /// Labels.
    pub text: String,
}

/// Parameters of the deterministic illustrative sample.
///
/// The mapper draws `count` correlated 3-D points from a generator seeded with `seed`; the
/// emitted script regenerates its own data from `mean`/`covariance` with the same seed.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SampleSpec {
    /// Generator seed.
    pub seed: u64,
    /// Number of points; every data-point element fans out to exactly this many visuals.
    pub count: usize,
    /// Standard deviation of x.
    pub x_sigma: f64,
    /// y = y_from_x * x + noise.
    pub y_from_x: f64,
    /// Standard deviation of the y noise.
    pub y_sigma: f64,
    /// Contribution of x to z.
    pub z_from_x: f64,
    /// Contribution of y to z.
    pub z_from_y: f64,
    /// Standard deviation of the z noise.
    pub z_sigma: f64,
    /// Mean used by the emitted script's sampler.
    pub mean: [f64; 3],
    /// Covariance used by the emitted script's sampler.
    pub covariance: [[f64; 3]; 3],
}

/// Every swappable literal of the pipeline, loaded once and shared by reference.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Registry {
    /// Recognisable terms, scanned in order.
    pub lexicon: Vec<LexiconEntry>,
    /// Topic catalogs; unknown topics fall back to the generic plan.
    pub catalogs: Vec<TemplateCatalog>,
    /// Animation kinds known to the emitter.
    pub animations: BTreeMap<String, AnimationSpec>,
    /// Generator colors.
    pub palette: Palette,
    /// `#rrggbb` to named color constant of the script dialect.
    pub colors: BTreeMap<String, String>,
    /// Illustrative sample parameters.
    pub sample: SampleSpec,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Parse and validate a registry from JSON text.
    pub fn from_json_str(json: &str) -> EduvizResult<Self> {
        let registry: Self =
            serde_json::from_str(json).map_err(|e| EduvizError::serde(format!("registry: {e}")))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Read, parse and validate a registry file.
    pub fn load(path: &Path) -> EduvizResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read registry '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Pretty JSON, suitable for editing and feeding back into [`Registry::load`].
    pub fn to_json_pretty(&self) -> EduvizResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EduvizError::serde(e.to_string()))
    }

    /// First catalog matching `topic`.
    pub fn catalog_for(&self, topic: &str) -> Option<&TemplateCatalog> {
        self.catalogs.iter().find(|c| c.matches(topic))
    }

    /// Named constant for a hex color, if the table has one.
    pub fn color_name(&self, hex: &str) -> Option<&str> {
        self.colors.get(&hex.to_ascii_lowercase()).map(String::as_str)
    }

    /// Structural checks applied to every loaded registry.
    pub fn validate(&self) -> EduvizResult<()> {
        let mut names = BTreeSet::new();
        for entry in &self.lexicon {
            if entry.name.trim().is_empty() {
                return Err(EduvizError::validation("lexicon entry name must be non-empty"));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(EduvizError::validation(format!(
                    "duplicate lexicon entry '{}'",
                    entry.name
                )));
            }
        }

        let mut keys = BTreeSet::new();
        for catalog in &self.catalogs {
            for key in std::iter::once(&catalog.key).chain(catalog.aliases.iter()) {
                if !keys.insert(key.to_ascii_lowercase()) {
                    return Err(EduvizError::validation(format!(
                        "topic key '{key}' is claimed by more than one catalog"
                    )));
                }
            }
            for template in &catalog.templates {
                if template.name.trim().is_empty() {
                    return Err(EduvizError::validation(format!(
                        "catalog '{}' has a template with an empty name",
                        catalog.key
                    )));
                }
                if !(template.duration.is_finite() && template.duration > 0.0) {
                    return Err(EduvizError::validation(format!(
                        "template '{}' duration must be > 0",
                        template.name
                    )));
                }
                if template.kinds.is_empty() && !template.always_include {
                    return Err(EduvizError::validation(format!(
                        "template '{}' declares no element kinds",
                        template.name
                    )));
                }
            }
        }

        for (kind, spec) in &self.animations {
            if !(spec.duration.is_finite() && spec.duration > 0.0) {
                return Err(EduvizError::validation(format!(
                    "animation '{kind}' duration must be > 0"
                )));
            }
        }

        // Lookups lowercase the hex first, so an uppercase key could never match.
        if let Some(hex) = self.colors.keys().find(|k| k.chars().any(|c| c.is_ascii_uppercase())) {
            return Err(EduvizError::validation(format!(
                "color key '{hex}' must be lowercase hex"
            )));
        }

        if self.sample.count == 0 {
            return Err(EduvizError::validation("sample count must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/registry.rs"]
mod tests;
