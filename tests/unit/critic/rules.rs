use super::*;
use crate::critic::analysis::weighted_score;
use crate::foundation::core::{PropValue, Props, Vec3};
use crate::visual::model::{AnimationEvent, VisualElement};
use proptest::prelude::*;

const GOOD_SCRIPT: &str =
    "class A(ThreeDScene):\n    def construct(self):\n        self.play(FadeIn(a))\n";

fn element(id: &str, visual_type: VisualType, kind: &str, color: &str) -> VisualElement {
    let mut props = Props::new();
    props.insert("color".to_string(), PropValue::from(color));
    VisualElement {
        id: id.to_string(),
        visual_type,
        position: Vec3::ZERO,
        props,
        events: vec![AnimationEvent::new(kind, 0.0, 1.0)],
        depends_on: Vec::new(),
    }
}

fn scene(name: &str, duration: f64, elements: Vec<VisualElement>) -> SceneVisual {
    SceneVisual {
        name: name.to_string(),
        duration,
        elements,
        camera_movements: Vec::new(),
        narration: "A sufficiently long narration line.".to_string(),
        background_color: "#2c3e50".to_string(),
        labelled: false,
    }
}

fn n_points(n: usize) -> Vec<VisualElement> {
    (0..n)
        .map(|i| element(&format!("p{i}"), VisualType::Point, "fade_in", "#95a5a6"))
        .collect()
}

fn by_aspect(items: &[CriticFeedback], aspect: CriticAspect) -> Vec<&CriticFeedback> {
    items.iter().filter(|f| f.aspect == aspect).collect()
}

#[test]
fn timing_bands() {
    let short = timing(&scene("s", 4.0, n_points(3)));
    assert_eq!(short[0].score, 4.0);
    assert_eq!(short[0].severity, Severity::Medium);
    assert_eq!(short[0].actions, [RevisionAction::IncreaseDuration]);

    let long = timing(&scene("s", 31.0, n_points(3)));
    assert_eq!(long[0].score, 5.0);
    assert_eq!(long[0].actions, [RevisionAction::DecreaseDuration]);

    let fine = timing(&scene("s", 5.0, n_points(3)));
    assert_eq!(fine.len(), 1);
    assert_eq!(fine[0].score, 8.0);
}

#[test]
fn crowded_timeline_is_flagged() {
    let items = timing(&scene("s", 10.0, n_points(11)));
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].score, 5.0);
    assert!(items[1].actions.is_empty());
}

#[test]
fn visual_bands_and_actions() {
    let over = visual_clarity(&scene("s", 10.0, n_points(16)));
    assert_eq!((over[0].score, over[0].severity), (4.0, Severity::High));
    assert_eq!(over[0].actions, [RevisionAction::TrimElements]);

    let sparse = visual_clarity(&scene("s", 10.0, n_points(2)));
    assert_eq!((sparse[0].score, sparse[0].severity), (6.0, Severity::Low));
    assert_eq!(sparse[0].actions, [RevisionAction::AddLabels]);

    assert_eq!(visual_clarity(&scene("s", 10.0, n_points(15)))[0].score, 8.5);
}

#[test]
fn too_many_colors_are_flagged() {
    let elements = (0..7)
        .map(|i| element(&format!("e{i}"), VisualType::Point, "fade_in", &format!("#00000{i}")))
        .collect();
    let items = visual_clarity(&scene("s", 10.0, elements));
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].severity, Severity::Medium);
}

#[test]
fn data_introduction_needs_points_and_axes() {
    let mut elements = n_points(3);
    let missing = catalog_educational_value(&scene("data_introduction", 8.0, elements.clone()));
    assert_eq!((missing[0].score, missing[0].severity), (5.0, Severity::High));

    elements.push(element("x_axis", VisualType::AxisSet, "fade_in", "#3498db"));
    let ok = catalog_educational_value(&scene("data_introduction", 8.0, elements));
    assert_eq!((ok[0].score, ok[0].severity), (9.0, Severity::Low));
}

#[test]
fn variance_and_transformation_checks() {
    let bare = n_points(3);
    let variance = catalog_educational_value(&scene("variance_explanation", 10.0, bare.clone()));
    assert_eq!(variance[0].score, 4.0);
    let transform = catalog_educational_value(&scene("pca_transformation", 12.0, bare.clone()));
    assert_eq!(transform[0].score, 3.0);
    assert!(catalog_educational_value(&scene("comparison", 8.0, bare)).is_empty());

    let arrows = vec![element("pc1_arrow", VisualType::Arrow, "grow_arrow", "#3498db")];
    assert!(catalog_educational_value(&scene("pca_transformation", 12.0, arrows)).is_empty());
}

#[test]
fn short_generic_narration_asks_for_extension() {
    let mut s = scene("mathematical_concepts", 10.0, n_points(3));
    s.narration = "Too short.".to_string();
    let items = generic_educational_value(&s);
    assert_eq!(items[0].actions, [RevisionAction::ExtendNarration]);
    s.narration = "Long enough narration here.".to_string();
    assert!(generic_educational_value(&s).is_empty());
}

#[test]
fn flow_rewards_variety() {
    assert_eq!(animation_flow(&scene("s", 8.0, n_points(3)))[0].score, 5.0);
    let mut elements = n_points(2);
    elements.push(element("e", VisualType::Ellipse, "pulse", "#f39c12"));
    assert_eq!(animation_flow(&scene("s", 8.0, elements))[0].score, 8.0);
}

#[test]
fn technical_checks_on_script_text() {
    let ok = technical_accuracy(GOOD_SCRIPT);
    assert_eq!(ok.len(), 1);
    assert_eq!(ok[0].score, 9.0);

    let broken = technical_accuracy("print('hi')\n");
    let highs = broken.iter().filter(|f| f.severity == Severity::High).count();
    assert_eq!(highs, 2);
    assert_eq!(broken.len(), 3);

    let long = "x = 1\n# c\n\n".repeat(201) + GOOD_SCRIPT;
    let items = technical_accuracy(&long);
    assert_eq!(items[0].score, 5.0);
    assert_eq!(items[0].severity, Severity::Low);
}

#[test]
fn balanced_catalog_scene_is_approved() {
    let reg = Registry::builtin();
    let mut elements = n_points(3);
    elements.push(element("x_axis", VisualType::AxisSet, "fade_in", "#3498db"));
    elements.push(element("ellipse", VisualType::Ellipse, "pulse", "#f39c12"));
    let intro = scene("data_introduction", 10.0, elements);
    let analysis = Critic::new(&reg).analyze(&intro, GOOD_SCRIPT, "pca");
    assert!((analysis.overall_score - 8.525).abs() < 1e-9);
    assert!(analysis.is_approved());
    assert_eq!(by_aspect(&analysis.feedback, CriticAspect::EducationalValue).len(), 1);
}

#[test]
fn unknown_topic_uses_generic_educational_rule() {
    let reg = Registry::builtin();
    let mut s = scene("data_introduction", 10.0, n_points(3));
    s.narration = "short".to_string();
    let analysis = Critic::new(&reg).analyze(&s, GOOD_SCRIPT, "calculus");
    let edu = by_aspect(&analysis.feedback, CriticAspect::EducationalValue);
    assert_eq!(edu.len(), 1);
    assert_eq!(edu[0].actions, [RevisionAction::ExtendNarration]);
}

proptest! {
    #[test]
    fn more_elements_never_raise_visual_clarity(extra in 0usize..=10) {
        let base = weighted_score(&visual_clarity(&scene("s", 10.0, n_points(20))));
        let more = weighted_score(&visual_clarity(&scene("s", 10.0, n_points(20 + extra))));
        prop_assert!(more <= base);
    }
}
