use super::*;

#[test]
fn list_quotes_each_clip_in_order() {
    let list = concat_list(&[PathBuf::from("/a/one.mp4"), PathBuf::from("/b/it's.mp4")]);
    assert_eq!(list, "file '/a/one.mp4'\nfile '/b/it'\\''s.mp4'\n");
}

#[test]
fn relative_clips_are_written_absolute() {
    let rel = Path::new("out").join("media").join("DataIntroduction.mp4");
    let list = concat_list(std::slice::from_ref(&rel));
    let body = list
        .strip_prefix("file '")
        .and_then(|rest| rest.strip_suffix("'\n"))
        .expect("one quoted entry");
    let written = Path::new(body);
    assert!(written.is_absolute(), "{body}");
    assert!(written.ends_with(&rel), "{body}");
    assert_eq!(written, std::env::current_dir().unwrap().join(&rel));
}

#[test]
fn empty_input_is_rejected() {
    let c = FfmpegConcatenator::new(Duration::from_secs(1));
    let out = std::env::temp_dir().join("eduviz_concat_empty.mp4");
    assert!(matches!(c.concat(&[], &out), Err(EduvizError::Validation(_))));
}

#[test]
fn missing_ffmpeg_cleans_up_list_file() {
    let c = FfmpegConcatenator::with_program("eduviz-no-such-ffmpeg", Duration::from_secs(1));
    let out = std::env::temp_dir().join(format!("eduviz_concat_{}.mp4", std::process::id()));
    let err = c.concat(&[PathBuf::from("a.mp4")], &out).unwrap_err();
    assert!(matches!(err, EduvizError::ToolMissing { .. }));
    assert!(!out.with_extension("txt").exists());
}
