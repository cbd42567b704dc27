use super::*;
use crate::config::registry::SceneCategory;
use crate::plan::scenes::Transitions;
use proptest::prelude::*;

fn element(kind: &str) -> SceneElement {
    SceneElement {
        kind: kind.to_string(),
        props: Props::new(),
        animation: "fade_in".to_string(),
        duration: 2.0,
        depends_on: Vec::new(),
    }
}

fn scene(kinds: &[&str]) -> Scene {
    Scene {
        name: "variance_explanation".to_string(),
        category: SceneCategory::ConceptExplanation,
        description: String::new(),
        elements: kinds.iter().map(|k| element(k)).collect(),
        duration: 10.0,
        narration: "n".to_string(),
        transitions: Transitions::default(),
    }
}

#[test]
fn data_points_fan_out_to_fifty_staggered_points() {
    let reg = Registry::builtin();
    let visuals = VisualMapper::new(&reg).map_element(&element("data_points"));
    assert_eq!(visuals.len(), 50);
    for (i, v) in visuals.iter().enumerate() {
        assert_eq!(v.id, format!("data_point_{i}"));
        assert_eq!(v.visual_type, VisualType::Point);
        assert_eq!(v.events.len(), 1);
        assert!((v.events[0].delay - i as f64 * POINT_STAGGER).abs() < 1e-12);
        assert_eq!(v.color(), Some("#95a5a6"));
    }
}

#[test]
fn mapping_is_deterministic_across_mappers() {
    let reg = Registry::builtin();
    let s = scene(&["data_points", "variance", "projection"]);
    let a = VisualMapper::new(&reg).map(std::slice::from_ref(&s));
    let b = VisualMapper::new(&reg).map(std::slice::from_ref(&s));
    assert_eq!(a, b);
}

#[test]
fn output_preserves_declaration_then_fan_out_order() {
    let reg = Registry::builtin();
    let kinds = ["variance", "principal_component", "projection"];
    let v = VisualMapper::new(&reg).map_scene(&scene(&kinds));
    let ids: Vec<_> = v.elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(&ids[..4], ["variance_ellipse", "pc1_arrow", "pc2_arrow", "projection_plane"]);
    assert_eq!(ids[4], "projection_line_0");
    assert_eq!(ids.last().copied(), Some("projection_line_19"));
    assert_eq!(v.elements.len(), 1 + 2 + 1 + PROJECTION_LINES);
}

#[test]
fn axes_route_for_both_spellings() {
    let reg = Registry::builtin();
    let mapper = VisualMapper::new(&reg);
    for kind in ["axis", "axes"] {
        let axes = mapper.map_element(&element(kind));
        let ids: Vec<_> = axes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["x_axis", "y_axis", "z_axis"]);
        assert!(axes.iter().all(|a| a.visual_type == VisualType::AxisSet));
        assert_eq!(axes[2].events[0].delay, 2.0 * AXIS_STAGGER);
    }
}

#[test]
fn unknown_kind_falls_back_to_text() {
    let reg = Registry::builtin();
    let v = VisualMapper::new(&reg).map_element(&element("information_loss"));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].id, "generic_information_loss");
    assert_eq!(v[0].visual_type, VisualType::Text);
    assert_eq!(v[0].props["text"].as_str(), Some("Information Loss"));
}

#[test]
fn hints_fill_only_unset_keys() {
    let reg = Registry::builtin();
    let mut el = element("variance");
    el.props.insert("color".to_string(), "BLUE".into());
    el.props.insert("shape".to_string(), "ellipse".into());
    let v = VisualMapper::new(&reg).map_element(&el);
    assert_eq!(v[0].color(), Some("#f39c12"));
    assert_eq!(v[0].props["shape"].as_str(), Some("ellipse"));
}

#[test]
fn camera_moves_are_scene_agnostic() {
    let reg = Registry::builtin();
    let mapper = VisualMapper::new(&reg);
    let a = mapper.map_scene(&scene(&[]));
    let b = mapper.map_scene(&scene(&["data_points"]));
    assert_eq!(a.camera_movements, b.camera_movements);
    assert_eq!(a.camera_movements.len(), 2);
    assert!((a.camera_movements[0].duration - 14f64.sqrt()).abs() < 1e-12);
    assert!((a.camera_movements[1].duration - 77f64.sqrt()).abs() < 1e-12);
    assert_eq!(a.background_color, "#2c3e50");
    assert!(!a.labelled);
}

#[test]
fn label_uses_scene_title() {
    let reg = Registry::builtin();
    let mapper = VisualMapper::new(&reg);
    let v = mapper.map_scene(&scene(&[]));
    let label = mapper.label_for(&v);
    assert_eq!(label.id, "scene_label");
    assert_eq!(label.props["text"].as_str(), Some("Variance Explanation"));
}

proptest! {
    #[test]
    fn data_points_yield_one_point_per_sample(count in 1usize..120) {
        let mut reg = Registry::builtin();
        reg.sample.count = count;
        let points = VisualMapper::new(&reg).map_element(&element("data_points"));
        prop_assert_eq!(points.len(), count);
        let last = points.last().map(|p| p.id.clone());
        prop_assert_eq!(last, Some(format!("data_point_{}", count - 1)));
    }
}
