use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EduvizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(EduvizError::io("x").to_string().contains("io error:"));
    assert!(
        EduvizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn tool_errors_name_the_tool() {
    assert!(EduvizError::tool_missing("manim").to_string().contains("'manim'"));

    let timeout = EduvizError::tool_timeout("ffmpeg", 30).to_string();
    assert!(timeout.contains("'ffmpeg'"));
    assert!(timeout.contains("30s"));

    let failed = EduvizError::tool_failed("manim", "exit status 1").to_string();
    assert!(failed.contains("exit status 1"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EduvizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
