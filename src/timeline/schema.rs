use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Fps;
use crate::foundation::error::{FieldError, FieldResult};
use crate::timeline::keyframe::Keyframe;
use crate::timeline::model::{DEFAULT_DURATION_SECONDS, Timeline};

/// Current timeline document version.
pub const TIMELINE_FILE_VERSION: u64 = 1;

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: Option<serde_json::Value>,
    #[serde(default)]
    timeline: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineIn {
    #[serde(default)]
    fps: Option<u32>,
    #[serde(default)]
    duration_seconds: Option<f64>,
    #[serde(default, rename = "loop")]
    looping: Option<bool>,
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u64,
    timeline: TimelineOut<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineOut<'a> {
    fps: Fps,
    duration_seconds: f64,
    #[serde(rename = "loop")]
    looping: bool,
    keyframes: &'a [Keyframe],
}

impl Timeline {
    /// Parse a version 1 timeline document from JSON text.
    pub fn from_json_str(s: &str) -> FieldResult<Self> {
        let raw: RawDocument = serde_json::from_str(s)
            .map_err(|e| FieldError::parse(format!("parse timeline JSON: {e}")))?;
        Self::from_raw(raw)
    }

    /// Parse a version 1 timeline document from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> FieldResult<Self> {
        let raw: RawDocument = serde_json::from_reader(r)
            .map_err(|e| FieldError::parse(format!("parse timeline JSON: {e}")))?;
        Self::from_raw(raw)
    }

    /// Parse a version 1 timeline document from a file on disk.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open timeline JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    fn from_raw(raw: RawDocument) -> FieldResult<Self> {
        let version = raw.version.as_ref().and_then(serde_json::Value::as_u64);
        if version != Some(TIMELINE_FILE_VERSION) {
            return Err(FieldError::parse(format!(
                "unsupported timeline version {} (expected {TIMELINE_FILE_VERSION})",
                raw.version
                    .map_or_else(|| "<missing>".to_owned(), |v| v.to_string())
            )));
        }
        let body = raw
            .timeline
            .ok_or_else(|| FieldError::parse("timeline document has no 'timeline' object"))?;
        let body: TimelineIn = serde_json::from_value(body)
            .map_err(|e| FieldError::parse(format!("parse timeline body: {e}")))?;

        let fps = match body.fps {
            Some(fps) => Fps::new(fps),
            None => Ok(Fps::default()),
        }
        .map_err(|e| FieldError::parse(format!("timeline: {e}")))?;
        let sorted = body
            .keyframes
            .is_sorted_by(|a, b| a.time_seconds <= b.time_seconds);
        let count = body.keyframes.len();
        let timeline = Self::from_parts(
            fps,
            body.duration_seconds.unwrap_or(DEFAULT_DURATION_SECONDS),
            body.looping.unwrap_or(false),
            body.keyframes,
        )
        .map_err(|e| FieldError::parse(format!("timeline: {e}")))?;
        if !sorted {
            tracing::warn!(keyframes = count, "timeline keyframes were not time-ordered; re-sorted");
        }
        tracing::debug!(
            keyframes = count,
            fps = timeline.fps().get(),
            duration = timeline.duration_seconds(),
            "loaded timeline"
        );
        Ok(timeline)
    }

    fn document(&self) -> DocumentOut<'_> {
        DocumentOut {
            version: TIMELINE_FILE_VERSION,
            timeline: TimelineOut {
                fps: self.fps(),
                duration_seconds: self.duration_seconds(),
                looping: self.looping(),
                keyframes: self.keyframes(),
            },
        }
    }

    /// Serialize as a pretty version 1 document.
    pub fn to_json_string_pretty(&self) -> FieldResult<String> {
        serde_json::to_string_pretty(&self.document())
            .map_err(|e| FieldError::Other(anyhow::Error::new(e).context("serialize timeline")))
    }

    /// Write a pretty version 1 document to `w`.
    pub fn to_writer<W: Write>(&self, w: W) -> FieldResult<()> {
        serde_json::to_writer_pretty(w, &self.document())
            .map_err(|e| FieldError::Other(anyhow::Error::new(e).context("write timeline")))
    }

    /// Write a pretty version 1 document to a file, replacing it.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> FieldResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create timeline JSON '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.flush()
            .with_context(|| format!("flush timeline JSON '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schema.rs"]
mod tests;
