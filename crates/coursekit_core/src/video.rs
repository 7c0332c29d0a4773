//! Operator-supplied video input.
//!
//! # Responsibility
//! - Turn a pasted remote URL or a picked local file into a `VideoRef`.
//! - Reject malformed input before it reaches the mutation path.
//!
//! # Invariants
//! - Remote URLs are normalized to the embeddable player form.
//! - Local files must carry one of the accepted container extensions.

use crate::model::course::{VideoKind, VideoRef};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";
const LOCAL_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mpeg", "webm"];

// Captures the 11-char video id from watch, short, embed and /v/ links.
static YOUTUBE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("valid youtube regex")
});

/// Video input as it arrives from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoInput {
    /// URL pasted by the operator.
    RemoteUrl(String),
    /// Path or object reference of a file the operator picked.
    LocalFile(String),
}

/// Rejected video input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// Input is blank after trim.
    Blank,
    /// URL is not a recognizable remote video link.
    UnrecognizedUrl(String),
    /// Local file extension is not an accepted video container.
    UnsupportedFileType(String),
}

impl Display for VideoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "video input must not be blank"),
            Self::UnrecognizedUrl(url) => write!(f, "invalid video url: `{url}`"),
            Self::UnsupportedFileType(name) => write!(
                f,
                "unsupported video file `{name}`; expected {}",
                LOCAL_VIDEO_EXTENSIONS.join("|")
            ),
        }
    }
}

impl Error for VideoError {}

impl VideoInput {
    /// Validates and normalizes the input.
    pub fn parse(&self) -> Result<VideoRef, VideoError> {
        match self {
            Self::RemoteUrl(url) => parse_remote_url(url),
            Self::LocalFile(path) => parse_local_file(path),
        }
    }
}

/// Returns the embeddable URL for a pasted remote video link.
pub fn parse_remote_url(url: &str) -> Result<VideoRef, VideoError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(VideoError::Blank);
    }
    let video_id = YOUTUBE_ID_RE
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| VideoError::UnrecognizedUrl(trimmed.to_string()))?;
    Ok(VideoRef {
        url: format!("{EMBED_BASE_URL}{}", video_id.as_str()),
        kind: VideoKind::RemoteEmbed,
    })
}

fn parse_local_file(path: &str) -> Result<VideoRef, VideoError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(VideoError::Blank);
    }
    let extension = trimmed
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !LOCAL_VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(VideoError::UnsupportedFileType(trimmed.to_string()));
    }
    Ok(VideoRef {
        url: trimmed.to_string(),
        kind: VideoKind::LocalFile,
    })
}
