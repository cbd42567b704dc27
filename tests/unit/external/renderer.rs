use super::*;

#[test]
fn expected_video_follows_manim_media_layout() {
    let path = ManimRenderer::expected_video(
        Path::new("/out/pca_visualization.py"),
        "DataIntroduction",
        Path::new("/out/media"),
    );
    assert_eq!(
        path,
        Path::new("/out/media/videos/pca_visualization/480p15/DataIntroduction.mp4")
    );
}

#[test]
fn missing_renderer_is_unavailable_and_reports_missing() {
    let r = ManimRenderer::with_program("eduviz-no-such-manim", Duration::from_secs(1));
    assert!(!r.is_available());
    let err = r
        .render(Path::new("s.py"), "Scene", &std::env::temp_dir())
        .unwrap_err();
    assert!(matches!(err, EduvizError::ToolMissing { .. }));
    assert_eq!(r.name(), "eduviz-no-such-manim");
}
