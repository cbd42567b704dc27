use super::*;

#[test]
fn builtin_registry_is_valid() {
    let reg = Registry::builtin();
    reg.validate().unwrap();
    assert_eq!(reg.lexicon.len(), 21);
    assert_eq!(reg.sample.count, 50);
    assert_eq!(reg.color_name("#3498DB"), Some("BLUE"));
    assert_eq!(reg.color_name("#123456"), None);
}

#[test]
fn catalog_lookup_is_case_insensitive_and_honours_aliases() {
    let reg = Registry::builtin();
    assert_eq!(reg.catalog_for("PCA").map(|c| c.key.as_str()), Some("pca"));
    assert_eq!(
        reg.catalog_for("statistical-decomposition")
            .map(|c| c.key.as_str()),
        Some("pca")
    );
    assert!(reg.catalog_for("linear-regression").is_none());
}

#[test]
fn builtin_catalog_closes_with_unconditional_comparison() {
    let reg = Registry::builtin();
    let catalog = reg.catalog_for("pca").unwrap();
    let names: Vec<_> = catalog.templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "data_introduction",
            "variance_explanation",
            "pca_transformation",
            "dimensionality_reduction",
            "comparison"
        ]
    );
    let last = catalog.templates.last().unwrap();
    assert!(last.always_include);
    assert!(last.required.is_empty());
}

#[test]
fn json_roundtrip_preserves_registry() {
    let reg = Registry::builtin();
    let json = reg.to_json_pretty().unwrap();
    let back = Registry::from_json_str(&json).unwrap();
    assert_eq!(back.lexicon.len(), reg.lexicon.len());
    assert_eq!(back.animations, reg.animations);
    let hints = |r: &Registry| {
        r.lexicon
            .iter()
            .find(|e| e.name == "variance")
            .map(|e| e.hints.clone())
    };
    assert_eq!(hints(&back), hints(&reg));
}

#[test]
fn validation_rejects_duplicates_and_bad_durations() {
    let mut reg = Registry::builtin();
    reg.lexicon.push(reg.lexicon[0].clone());
    assert!(matches!(reg.validate(), Err(EduvizError::Validation(_))));

    let mut reg = Registry::builtin();
    reg.catalogs[0].templates[0].duration = 0.0;
    assert!(reg.validate().is_err());

    let mut reg = Registry::builtin();
    let mut dup = reg.catalogs[0].clone();
    dup.key = "other".to_string();
    reg.catalogs.push(dup);
    assert!(reg.validate().is_err(), "aliases collide across catalogs");

    let mut reg = Registry::builtin();
    reg.sample.count = 0;
    assert!(reg.validate().is_err());
}

#[test]
fn uppercase_color_keys_are_rejected_on_load() {
    let reg = Registry::builtin();
    assert_eq!(reg.color_name("#3498DB"), reg.color_name("#3498db"));
    assert!(reg.color_name("#3498db").is_some());

    let mut shouted = Registry::builtin();
    shouted.colors.insert("#ABCDEF".to_string(), "SHOUTED".to_string());
    let json = shouted.to_json_pretty().unwrap();
    let err = Registry::from_json_str(&json).unwrap_err();
    assert!(matches!(err, EduvizError::Validation(ref m) if m.contains("#ABCDEF")), "{err}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        Registry::from_json_str("{ not json"),
        Err(EduvizError::Serde(_))
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = Registry::load(std::path::Path::new("target/does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}
