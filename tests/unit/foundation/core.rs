use super::*;

#[test]
fn norm_matches_pythagoras() {
    assert_eq!(Vec3::new(3.0, 4.0, 0.0).norm(), 5.0);
    assert_eq!(Vec3::ZERO.norm(), 0.0);
    assert!((Vec3::new(1.0, 2.0, 3.0).norm() - 14f64.sqrt()).abs() < 1e-12);
}

#[test]
fn scale_multiplies_each_component() {
    let v = Vec3::from([2.0, 1.5, 0.5]).scale(2.0);
    assert_eq!(v, Vec3::new(4.0, 3.0, 1.0));
}

#[test]
fn prop_values_deserialize_untagged() {
    let props: Props = serde_json::from_str(
        r##"{"color": "#3498db", "size": 0.1,
            "direction": {"x": 1.0, "y": 0.0, "z": 0.0}, "on": true}"##,
    )
    .unwrap();
    assert_eq!(props["color"].as_str(), Some("#3498db"));
    assert_eq!(props["size"].as_f64(), Some(0.1));
    assert_eq!(props["direction"].as_vec3(), Some(Vec3::new(1.0, 0.0, 0.0)));
    assert_eq!(props["on"], PropValue::Flag(true));
    assert_eq!(props["size"].as_str(), None);
}
