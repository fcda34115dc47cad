// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Card previews for published output.
//!
//! Video and frame sequences are transcoded to a size-capped webm by an
//! external ffmpeg; 2D output is attached as-is. The encoder writes to
//! stdout, so no intermediate file is left behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use pb_core::{AttachmentPayload, PublishRecord, TaskType};

use crate::config::EncoderConfig;
use crate::error::{Error, Result};

/// Extension of every transcoded preview.
pub const WEBM: &str = "webm";

const FRAME_RATE: &str = "24";
const BITRATE: &str = "512k";

/// Where a preview comes from, before anything is read or encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// A clip to transcode.
    Video(PathBuf),
    /// A printf-style frame pattern, optionally with its first frame.
    Sequence {
        pattern: PathBuf,
        start: Option<i64>,
    },
    /// A file attached verbatim.
    Raw(PathBuf),
    None,
}

/// The `.mp4` a host writes next to its output, if any.
///
/// `shot..jpg` and `shot.jpg` both map to `shot.mp4`.
pub fn mp4_sibling(publish_file: &Path) -> PathBuf {
    let stem = publish_file.with_extension("");
    PathBuf::from(format!("{}.mp4", stem.to_string_lossy().trim_end_matches('.')))
}

/// Frame pattern for a playblast, whose output name leaves the frame
/// number out (`shot..jpg` becomes `shot.%04d.jpg`).
pub fn playblast_pattern(publish_file: &Path) -> PathBuf {
    PathBuf::from(publish_file.to_string_lossy().replace("..", ".%04d."))
}

/// Frame pattern for a render, found by looking for the first frame in the
/// output directory to learn the extension actually written.
pub fn render_pattern(publish_file: &Path, start_frame: i64) -> Result<Option<PathBuf>> {
    let Some(dir) = publish_file.parent() else {
        return Ok(None);
    };
    let marker = format!(".{:04}.", start_frame);

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let Some(ext) = names
        .iter()
        .find(|n| n.contains(&marker))
        .and_then(|n| Path::new(n).extension())
        .map(|e| e.to_string_lossy().into_owned())
    else {
        return Ok(None);
    };

    let pattern = publish_file
        .to_string_lossy()
        .replace(".exr", &format!(".%04d.{}", ext));
    Ok(Some(PathBuf::from(pattern)))
}

/// Decide what to attach for a publish.
///
/// An mp4 next to the output always wins. After that the task type picks:
/// frame sequences for playblasts and renders, the file itself for 2D,
/// and the explicitly supplied file for anything else.
pub fn preview_source(record: &PublishRecord, attach: Option<&Path>) -> Result<PreviewSource> {
    let mp4 = mp4_sibling(&record.publish_file);
    if mp4.is_file() {
        return Ok(PreviewSource::Video(mp4));
    }

    match record.task_type {
        TaskType::Playblast => Ok(PreviewSource::Sequence {
            pattern: playblast_pattern(&record.publish_file),
            start: None,
        }),
        TaskType::Render => match render_pattern(&record.publish_file, record.start_frame)? {
            Some(pattern) => Ok(PreviewSource::Sequence {
                pattern,
                start: Some(record.start_frame),
            }),
            None => {
                warn!(
                    file = %record.publish_file.display(),
                    frame = record.start_frame,
                    "no rendered frame found for preview"
                );
                Ok(PreviewSource::None)
            }
        },
        TaskType::TwoD => Ok(PreviewSource::Raw(record.publish_file.clone())),
        TaskType::Export | TaskType::External => Ok(match attach {
            Some(path) => PreviewSource::Raw(path.to_path_buf()),
            None => PreviewSource::None,
        }),
    }
}

/// Transcodes clips and frame sequences with ffmpeg.
#[derive(Debug, Clone)]
pub struct Encoder {
    binary: String,
    max_size: u64,
}

impl Encoder {
    pub fn new(config: &EncoderConfig) -> Self {
        Encoder {
            binary: config.ffmpeg.clone(),
            max_size: config.max_size,
        }
    }

    /// ffmpeg arguments writing a webm of at most `max_size` bytes to stdout.
    ///
    /// Frame rate and start number are only passed for sequences; they
    /// break clip input.
    pub fn args(input: &str, start: Option<i64>, max_size: u64) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(start) = start {
            args.extend([
                "-framerate".to_string(),
                FRAME_RATE.to_string(),
                "-start_number".to_string(),
                start.to_string(),
            ]);
        }
        args.extend(
            [
                "-apply_trc",
                "iec61966_2_1",
                "-i",
                input,
                "-b:v",
                BITRATE,
                "-f",
                WEBM,
                "-pix_fmt",
                "yuva420p",
                "-fs",
            ]
            .map(str::to_string),
        );
        args.push(max_size.to_string());
        args.push("-".to_string());
        args
    }

    pub fn encode(&self, input: &Path, start: Option<i64>) -> Result<Vec<u8>> {
        let args = Self::args(&input.to_string_lossy(), start, self.max_size);
        debug!(encoder = %self.binary, ?args, "encoding preview");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| Error::Encoder(format!("failed to run '{}': {}", self.binary, e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last = stderr.lines().last().unwrap_or_default();
            return Err(Error::Encoder(format!(
                "'{}' exited with {}: {}",
                self.binary, output.status, last
            )));
        }
        if output.stdout.is_empty() {
            return Err(Error::Encoder(format!(
                "'{}' produced no output for {}",
                self.binary,
                input.display()
            )));
        }
        Ok(output.stdout)
    }
}

/// Read or encode a preview source into an attachment.
pub fn load_preview(source: &PreviewSource, encoder: &Encoder) -> Result<Option<AttachmentPayload>> {
    let payload = match source {
        PreviewSource::None => return Ok(None),
        PreviewSource::Video(path) => AttachmentPayload {
            bytes: encoder.encode(path, None)?,
            ext: WEBM.to_string(),
        },
        PreviewSource::Sequence { pattern, start } => AttachmentPayload {
            bytes: encoder.encode(pattern, *start)?,
            ext: WEBM.to_string(),
        },
        PreviewSource::Raw(path) => {
            let Some(ext) = path.extension().filter(|e| !e.is_empty()) else {
                warn!(path = %path.display(), "attachment has no extension, skipping preview");
                return Ok(None);
            };
            AttachmentPayload {
                ext: ext.to_string_lossy().into_owned(),
                bytes: fs::read(path)?,
            }
        }
    };
    Ok(Some(payload))
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;
