//! Integration tests for the animation pipeline

use std::path::Path;

use article_charts::renderer::png_dimensions;
use article_charts::{animate, AnimationConfig, Error, Figure, FrameSpan, Preset, SaveOptions};

/// Draw a small chart for frame `index` at `dpi`
fn render_frame(path: &Path, index: usize, dpi: u32) -> article_charts::Result<()> {
    let (mut figure, id) = Figure::single(Preset::Small);
    figure.axes_mut(id)?.plot_values(&[0.0, index as f64]);
    figure.save(path, SaveOptions::new().with_dpi(dpi))?;
    Ok(())
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("Should list dir").count()
}

#[test]
fn test_animation_reports_missing_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clip.mp4");
    let config = AnimationConfig::new().with_encoder("/nonexistent/encoder-binary");

    let result = animate(
        &output,
        |path, index, _seconds| render_frame(path, index, 20),
        2,
        FrameSpan::Frames(2),
        &config,
    );

    assert!(matches!(result, Err(Error::Encoder { .. })));
    assert!(dir.path().join("clip.mp4.png").exists());
}

#[test]
fn test_failed_frame_removes_frame_directory() {
    let frames_parent = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let config = AnimationConfig::new()
        .with_encoder("/nonexistent/encoder-binary")
        .with_frames_parent(frames_parent.path());

    let result = animate(
        out_dir.path().join("clip.mp4"),
        |path, index, _seconds| {
            if index == 1 {
                return Err(Error::Draw("frame callback failed".into()));
            }
            render_frame(path, index, 20)
        },
        2,
        FrameSpan::Frames(3),
        &config,
    );

    assert!(matches!(result, Err(Error::Draw(_))));
    assert_eq!(entries(frames_parent.path()), 0);
    assert!(!out_dir.path().join("clip.mp4.png").exists());
}

#[test]
fn test_existing_preview_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clip.mp4");
    let preview = dir.path().join("clip.mp4.png");
    std::fs::write(&preview, b"stale bytes").unwrap();
    let config = AnimationConfig::new().with_encoder("/nonexistent/encoder-binary");

    let result = animate(
        &output,
        |path, index, _seconds| render_frame(path, index, 20),
        2,
        FrameSpan::Frames(2),
        &config,
    );

    assert!(matches!(result, Err(Error::Encoder { .. })));
    assert_eq!(png_dimensions(&preview).expect("Should be a PNG"), (90, 60));
}

#[cfg(unix)]
#[test]
fn test_successful_encoder_reports_even_size() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let encoder = dir.path().join("fake-encoder.sh");
    std::fs::write(&encoder, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&encoder, std::fs::Permissions::from_mode(0o755)).unwrap();

    let frames_parent = tempfile::tempdir().unwrap();
    let output = dir.path().join("videos/clip.mp4");
    let config = AnimationConfig::new()
        .with_encoder(encoder.to_string_lossy())
        .with_frames_parent(frames_parent.path());

    let animation = animate(
        &output,
        |path, index, _seconds| render_frame(path, index, 21),
        4,
        FrameSpan::Duration(0.5),
        &config,
    )
    .expect("Should animate");

    assert_eq!((animation.width, animation.height), (96, 64));
    assert_eq!(animation.video, output);
    assert_eq!(animation.preview, dir.path().join("videos/clip.mp4.png"));
    assert_eq!(png_dimensions(&animation.preview).unwrap(), (95, 63));
    assert!(animation.html_snippet().contains(r#"width="48" height="32""#));
    assert_eq!(entries(frames_parent.path()), 0);
}
