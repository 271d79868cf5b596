//! Frame-by-frame animation to video
//!
//! Frames are drawn by a caller-supplied callback into a temporary directory,
//! then composited over a white background by an external encoder (`ffmpeg`
//! by default). One frame is kept next to the video as a poster image.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::renderer::png_dimensions;

/// Environment variable overriding the encoder binary
pub const ENCODER_ENV: &str = "ARTICLE_FFMPEG";

/// How long an animation runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameSpan {
    /// Seconds; the frame count is `seconds × fps`
    Duration(f64),
    /// An exact number of frames
    Frames(usize),
}

impl FrameSpan {
    pub fn frame_count(&self, fps: u32) -> usize {
        match *self {
            FrameSpan::Duration(seconds) => (seconds * fps as f64).round().max(0.0) as usize,
            FrameSpan::Frames(count) => count,
        }
    }
}

/// Encoder settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Encoder program
    pub encoder: String,
    /// Constant rate factor passed to the encoder
    pub crf: u32,
    /// Position of the poster frame as a fraction of the animation
    pub preview_ratio: f64,
    /// Directory that holds the temporary frame directory; `None` is the
    /// system temp dir
    pub frames_parent: Option<PathBuf>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            encoder: env::var(ENCODER_ENV).unwrap_or_else(|_| "ffmpeg".into()),
            crf: 20,
            preview_ratio: 0.0,
            frames_parent: None,
        }
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoder(mut self, encoder: impl Into<String>) -> Self {
        self.encoder = encoder.into();
        self
    }

    pub fn with_crf(mut self, crf: u32) -> Self {
        self.crf = crf;
        self
    }

    pub fn with_preview_ratio(mut self, ratio: f64) -> Self {
        self.preview_ratio = ratio;
        self
    }

    pub fn with_frames_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frames_parent = Some(dir.into());
        self
    }
}

/// A finished animation
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub video: PathBuf,
    pub preview: PathBuf,
    /// Even-rounded frame size in pixels
    pub width: u32,
    pub height: u32,
}

impl Animation {
    /// `<video>` tag showing the animation at half resolution
    pub fn html_snippet(&self) -> String {
        format!(
            r#"<video src="{}" poster="{}" class="click-to-play" loop width="{}" height="{}"></video>"#,
            self.video.display(),
            self.preview.display(),
            self.width / 2,
            self.height / 2
        )
    }
}

/// Round a pixel count up to the next even number
pub fn even_ceil(pixels: u32) -> u32 {
    pixels + pixels % 2
}

/// File name of frame `index` in an animation of `count` frames
pub fn frame_name(count: usize, index: usize) -> String {
    format!("frame-{:04}-{:04}.png", count, index)
}

/// Render frames with `frame_fn(path, index, seconds)` and encode them to `output`
///
/// The callback must write a PNG to the path it is given. The temporary
/// frame directory is removed whether or not encoding succeeds.
pub fn animate<F>(
    output: impl AsRef<Path>,
    mut frame_fn: F,
    fps: u32,
    span: FrameSpan,
    config: &AnimationConfig,
) -> Result<Animation>
where
    F: FnMut(&Path, usize, f64) -> Result<()>,
{
    let output = output.as_ref();
    let frame_count = span.frame_count(fps);
    if frame_count == 0 || fps == 0 {
        return Err(Error::EmptyAnimation);
    }

    let frames_root = config.frames_parent.clone().unwrap_or_else(env::temp_dir);
    let frames = tempfile::Builder::new()
        .prefix("frames-")
        .tempdir_in(&frames_root)
        .map_err(|e| Error::io(&frames_root, e))?;
    tracing::info!(frames = frame_count, fps, dir = %frames.path().display(), "rendering animation");

    for index in 0..frame_count {
        let path = frames.path().join(frame_name(frame_count, index));
        frame_fn(&path, index, index as f64 / fps as f64)?;
        tracing::debug!(index, "frame rendered");
    }

    let preview_index = ((frame_count as f64 * config.preview_ratio) as usize).min(frame_count - 1);
    let preview_frame = frames.path().join(frame_name(frame_count, preview_index));
    let (frame_width, frame_height) = png_dimensions(&preview_frame)?;
    let width = even_ceil(frame_width);
    let height = even_ceil(frame_height);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    let preview = PathBuf::from(format!("{}.png", output.display()));
    if preview.exists() {
        fs::remove_file(&preview).map_err(|e| Error::io(&preview, e))?;
    }
    fs::copy(&preview_frame, &preview).map_err(|e| Error::io(&preview, e))?;

    let pattern = frames.path().join(format!("frame-{:04}-%04d.png", frame_count));
    let args = encoder_args(&pattern, output, width, height, fps, frame_count, config.crf);
    println!("{} {}", config.encoder, args.join(" "));

    let status = Command::new(&config.encoder)
        .args(&args)
        .status()
        .map_err(|e| Error::encoder(&config.encoder, e.to_string()))?;
    if !status.success() {
        return Err(Error::encoder(&config.encoder, format!("exited with {}", status)));
    }

    let animation = Animation {
        video: output.to_path_buf(),
        preview,
        width,
        height,
    };
    println!(
        "output video: {}x{} (half: {}x{})",
        width,
        height,
        width / 2,
        height / 2
    );
    println!("{}", animation.html_snippet());

    frames.close().map_err(|e| Error::io(&frames_root, e))?;
    Ok(animation)
}

/// Encoder argument list: frames over a white canvas, trimmed to `frame_count`
pub fn encoder_args(
    pattern: &Path,
    output: &Path,
    width: u32,
    height: u32,
    fps: u32,
    frame_count: usize,
    crf: u32,
) -> Vec<String> {
    let rate = fps.to_string();
    let seconds = frame_count as f64 / fps.max(1) as f64;
    vec![
        "-f".into(),
        "lavfi".into(),
        "-i".into(),
        format!("color=white:s={}x{}", width, height),
        "-r".into(),
        rate.clone(),
        "-i".into(),
        pattern.display().to_string(),
        "-shortest".into(),
        "-filter_complex".into(),
        "overlay".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-frames:v".into(),
        frame_count.to_string(),
        "-r".into(),
        rate,
        "-t".into(),
        seconds.to_string(),
        "-crf".into(),
        crf.to_string(),
        "-y".into(),
        output.display().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count() {
        assert_eq!(FrameSpan::Duration(6.0).frame_count(30), 180);
        assert_eq!(FrameSpan::Frames(30).frame_count(24), 30);
    }

    #[test]
    fn test_even_ceil() {
        assert_eq!(even_ceil(405), 406);
        assert_eq!(even_ceil(270), 270);
    }

    #[test]
    fn test_frame_name() {
        assert_eq!(frame_name(30, 7), "frame-0030-0007.png");
    }

    #[test]
    fn test_encoder_args() {
        let args = encoder_args(
            Path::new("/tmp/f/frame-0060-%04d.png"),
            Path::new("out/a.mp4"),
            406,
            270,
            30,
            60,
            20,
        );
        let joined = args.join(" ");
        assert_eq!(
            joined,
            "-f lavfi -i color=white:s=406x270 -r 30 -i /tmp/f/frame-0060-%04d.png -shortest \
             -filter_complex overlay -pix_fmt yuv420p -frames:v 60 -r 30 -t 2 -crf 20 -y out/a.mp4"
        );
    }

    #[test]
    fn test_html_snippet() {
        let animation = Animation {
            video: PathBuf::from("out/a.mp4"),
            preview: PathBuf::from("out/a.mp4.png"),
            width: 810,
            height: 540,
        };
        assert_eq!(
            animation.html_snippet(),
            r#"<video src="out/a.mp4" poster="out/a.mp4.png" class="click-to-play" loop width="405" height="270"></video>"#
        );
    }

    #[test]
    fn test_zero_frames_rejected() {
        let result = animate(
            "out.mp4",
            |_: &Path, _, _| Ok(()),
            30,
            FrameSpan::Frames(0),
            &AnimationConfig::new(),
        );
        assert!(matches!(result, Err(Error::EmptyAnimation)));
    }
}
