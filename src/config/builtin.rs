//! The built-in registry: one populated topic catalog (principal component analysis) and the
//! lexicon, palette and animation library it needs.

use std::collections::BTreeMap;

use crate::config::registry::{
    AnimationEffect, AnimationSpec, ConceptCategory, LexiconEntry, Palette, Registry, SampleSpec,
    SceneCategory, SceneTemplate, TemplateCatalog,
};
use crate::foundation::core::Props;

impl Registry {
    /// The registry every pipeline uses unless another one is loaded.
    pub fn builtin() -> Self {
        Self {
            lexicon: builtin_lexicon(),
            catalogs: vec![pca_catalog()],
            animations: builtin_animations(),
            palette: Palette {
                primary: "#3498db".to_string(),
                secondary: "#e74c3c".to_string(),
                accent: "#f39c12".to_string(),
                success: "#2ecc71".to_string(),
                warning: "#f1c40f".to_string(),
                neutral: "#95a5a6".to_string(),
                background: "#2c3e50".to_string(),
                text: "#ecf0f1".to_string(),
            },
            colors: [
                ("#3498db", "BLUE"),
                ("#e74c3c", "RED"),
                ("#f39c12", "ORANGE"),
                ("#2ecc71", "GREEN"),
                ("#f1c40f", "YELLOW"),
                ("#95a5a6", "GRAY"),
                ("#2c3e50", "DARK_BLUE"),
                ("#ecf0f1", "LIGHT_GRAY"),
            ]
            .into_iter()
            .map(|(hex, name)| (hex.to_string(), name.to_string()))
            .collect(),
            sample: SampleSpec {
                seed: 42,
                count: 50,
                x_sigma: 1.4,
                y_from_x: 0.7,
                y_sigma: 0.8,
                z_from_x: 0.3,
                z_from_y: 0.2,
                z_sigma: 0.6,
                mean: [0.0, 0.0, 0.0],
                covariance: [[2.0, 1.5, 0.5], [1.5, 1.0, 0.3], [0.5, 0.3, 0.5]],
            },
        }
    }
}

fn entry(name: &str, category: ConceptCategory) -> LexiconEntry {
    LexiconEntry {
        name: name.to_string(),
        category,
        description: None,
        relationships: Vec::new(),
        hints: Props::new(),
        privileged: false,
    }
}

fn hints(color: &str, animation: &str, shape: &str) -> Props {
    let mut p = Props::new();
    p.insert("color".to_string(), color.into());
    p.insert("animation".to_string(), animation.into());
    p.insert("shape".to_string(), shape.into());
    p
}

fn related(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn builtin_lexicon() -> Vec<LexiconEntry> {
    use ConceptCategory::{Entity, Process, Structure, Visual};

    vec![
        LexiconEntry {
            description: Some("Measure of data spread".to_string()),
            relationships: related(&["data_points", "principal_component"]),
            hints: hints("BLUE", "pulse", "ellipse"),
            privileged: true,
            ..entry("variance", Entity)
        },
        LexiconEntry {
            description: Some("Importance of principal component".to_string()),
            ..entry("eigenvalue", Entity)
        },
        LexiconEntry {
            description: Some("Direction of principal component".to_string()),
            ..entry("eigenvector", Entity)
        },
        LexiconEntry {
            description: Some("Direction of maximum variance".to_string()),
            relationships: related(&["variance", "eigenvalue", "eigenvector"]),
            hints: hints("RED", "grow_arrow", "arrow"),
            privileged: true,
            ..entry("principal_component", Entity)
        },
        entry("covariance_matrix", Entity),
        LexiconEntry {
            description: Some("Mapping to lower dimensional space".to_string()),
            relationships: related(&["shadow", "dimensionality", "transformation"]),
            hints: hints("YELLOW", "transform", "line"),
            privileged: true,
            ..entry("projection", Entity)
        },
        entry("dimensionality", Entity),
        LexiconEntry {
            description: Some("Individual observations in dataset".to_string()),
            relationships: related(&["variance", "scatter_plot", "cloud"]),
            hints: hints("WHITE", "fade_in", "dot"),
            privileged: true,
            ..entry("data_points", Visual)
        },
        entry("scatter_plot", Visual),
        entry("arrow", Visual),
        entry("axis", Visual),
        entry("cloud", Visual),
        entry("surface", Visual),
        LexiconEntry {
            description: Some("2D representation of 3D data".to_string()),
            hints: hints("GRAY", "cast_shadow", "silhouette"),
            ..entry("shadow", Visual)
        },
        entry("transformation", Process),
        entry("rotation", Process),
        entry("reduction", Process),
        entry("decomposition", Process),
        entry("dataset", Structure),
        entry("matrix", Structure),
        entry("vector", Structure),
    ]
}

fn template(
    name: &str,
    category: SceneCategory,
    description: &str,
    kinds: &[&str],
    required: &[&str],
    duration: f64,
    narration: &str,
) -> SceneTemplate {
    SceneTemplate {
        name: name.to_string(),
        category,
        description: description.to_string(),
        kinds: related(kinds),
        required: related(required),
        always_include: false,
        duration,
        narration: narration.to_string(),
    }
}

fn pca_catalog() -> TemplateCatalog {
    TemplateCatalog {
        key: "pca".to_string(),
        aliases: vec![
            "statistical-decomposition".to_string(),
            "principal-component-analysis".to_string(),
        ],
        templates: vec![
            template(
                "data_introduction",
                SceneCategory::Introduction,
                "Introduction to the dataset and its structure",
                &["data_points", "scatter_plot", "axis"],
                &["data_points", "dataset", "scatter_plot"],
                8.0,
                "Let's start with a dataset containing multiple features. \
                 Each point represents one observation.",
            ),
            template(
                "variance_explanation",
                SceneCategory::ConceptExplanation,
                "Understanding variance and data spread",
                &["data_points", "variance", "spread_indicator"],
                &["variance"],
                10.0,
                "The data spreads differently in each direction. \
                 Some directions show more variance than others.",
            ),
            template(
                "pca_transformation",
                SceneCategory::Transformation,
                "Finding principal components",
                &["principal_component", "rotation", "projection"],
                &["principal_component"],
                12.0,
                "PCA identifies the principal components - \
                 the directions where data varies the most.",
            ),
            template(
                "dimensionality_reduction",
                SceneCategory::Transformation,
                "Projecting data to lower dimensions",
                &["projection", "shadow", "reduced_data"],
                &["projection", "shadow", "reduction"],
                10.0,
                "We can project our high-dimensional data onto these principal components.",
            ),
            SceneTemplate {
                always_include: true,
                ..template(
                    "comparison",
                    SceneCategory::Comparison,
                    "Comparing original and reduced representations",
                    &["original_data", "reduced_data", "information_loss"],
                    &[],
                    8.0,
                    "Notice how the reduced representation preserves the main patterns \
                     while using fewer dimensions.",
                )
            },
        ],
    }
}

fn builtin_animations() -> BTreeMap<String, AnimationSpec> {
    [
        ("fade_in", AnimationEffect::FadeIn, 1.0),
        ("fade_out", AnimationEffect::FadeOut, 1.0),
        ("grow_arrow", AnimationEffect::Grow, 1.5),
        ("pulse", AnimationEffect::Scale { to: 1.2 }, 2.0),
        ("transform", AnimationEffect::Morph, 2.0),
        ("cast_shadow", AnimationEffect::Projection, 1.5),
        ("rotate", AnimationEffect::Rotation { degrees: 360.0 }, 3.0),
    ]
    .into_iter()
    .map(|(kind, effect, duration)| (kind.to_string(), AnimationSpec { effect, duration }))
    .collect()
}
