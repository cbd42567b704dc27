use super::*;
use proptest::prelude::*;

fn names(concepts: &[Concept]) -> Vec<&str> {
    concepts.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn finds_spaced_and_underscored_forms() {
    let reg = Registry::builtin();
    let ex = ConceptExtractor::new(&reg);

    let spaced = ex.parse("The first Principal Component points along the spread.");
    assert!(names(&spaced).contains(&"principal_component"));

    let underscored = ex.parse("see principal_component in the code");
    assert!(names(&underscored).contains(&"principal_component"));
}

#[test]
fn single_word_terms_count_once_per_occurrence() {
    let reg = Registry::builtin();
    let variance = reg.lexicon.iter().find(|e| e.name == "variance").unwrap();
    assert_eq!(occurrences(variance, "variance and more variance"), 2);

    let pc = reg
        .lexicon
        .iter()
        .find(|e| e.name == "principal_component")
        .unwrap();
    assert_eq!(occurrences(pc, "principal component vs principal_component"), 2);
}

#[test]
fn attaches_static_annotations() {
    let reg = Registry::builtin();
    let concepts = ConceptExtractor::new(&reg).parse("variance and a cloud");

    let variance = concepts.iter().find(|c| c.name == "variance").unwrap();
    assert_eq!(variance.category, ConceptCategory::Entity);
    assert_eq!(variance.description, "Measure of data spread");
    assert_eq!(variance.hints["animation"].as_str(), Some("pulse"));
    assert_eq!(variance.related, ["data_points", "principal_component"]);

    let cloud = concepts.iter().find(|c| c.name == "cloud").unwrap();
    assert_eq!(cloud.description, "Concept: cloud");
    assert!(cloud.hints.is_empty());
}

#[test]
fn no_hits_yields_empty_list() {
    let reg = Registry::builtin();
    assert!(ConceptExtractor::new(&reg).parse("nothing relevant here").is_empty());
    assert!(ConceptExtractor::new(&reg).parse("").is_empty());
}

#[test]
fn privileged_terms_outrank_equal_frequency_terms() {
    let reg = Registry::builtin();
    // 400 words so neither score saturates at 1.0.
    let mut text = "filler ".repeat(398);
    text.push_str("variance eigenvalue");
    let concepts = ConceptExtractor::new(&reg).parse(&text);

    assert_eq!(names(&concepts), ["variance", "eigenvalue"]);
    assert!((concepts[0].importance - 2.0 / 400.0 * 100.0).abs() < 1e-12);
    assert!((concepts[1].importance - 1.0 / 400.0 * 100.0).abs() < 1e-12);
}

#[test]
fn ties_keep_lexicon_order() {
    let reg = Registry::builtin();
    // Short text: everything saturates at 1.0.
    let concepts = ConceptExtractor::new(&reg).parse("vector rotation eigenvalue arrow");
    assert_eq!(
        names(&concepts),
        ["eigenvalue", "arrow", "rotation", "vector"]
    );
    assert!(concepts.iter().all(|c| c.importance == 1.0));
}

proptest! {
    #[test]
    fn importance_is_bounded_and_non_increasing(
        words in proptest::collection::vec(
            prop_oneof![
                Just("variance"), Just("data points"), Just("projection"), Just("matrix"),
                Just("eigenvector"), Just("shadow"), Just("lorem"), Just("ipsum"), Just("the"),
            ],
            0..300,
        )
    ) {
        let reg = Registry::builtin();
        let text = words.join(" ");
        let concepts = ConceptExtractor::new(&reg).parse(&text);
        for c in &concepts {
            prop_assert!((0.0..=1.0).contains(&c.importance));
        }
        for pair in concepts.windows(2) {
            prop_assert!(pair[0].importance >= pair[1].importance);
        }
    }
}
