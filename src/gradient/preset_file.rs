use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FieldError, FieldResult};
use crate::gradient::library::{GradientLibrary, MAX_CUSTOM_STOPS};
use crate::gradient::profile::GradientProfile;

/// Current gradient preset document version.
pub const PRESET_FILE_VERSION: u32 = 1;

/// JSON document holding saved gradient presets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientPresetFile {
    /// Document version, must equal [`PRESET_FILE_VERSION`].
    pub version: u32,
    /// Saved presets in list order.
    pub presets: Vec<GradientProfile>,
}

impl GradientPresetFile {
    /// Capture the saved presets of `library`.
    pub fn from_library(library: &GradientLibrary) -> Self {
        Self {
            version: PRESET_FILE_VERSION,
            presets: library.saved_profiles().to_vec(),
        }
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json_str(s: &str) -> FieldResult<Self> {
        let doc: Self = serde_json::from_str(s)
            .map_err(|e| FieldError::parse(format!("parse gradient preset JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open gradient presets '{}'", path.display()))?;
        let doc: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FieldError::parse(format!("parse gradient preset JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string_pretty(&self) -> FieldResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FieldError::Other(anyhow::Error::new(e).context("serialize presets")))
    }

    /// Append every preset to `library` as saved profiles.
    pub fn install(self, library: &mut GradientLibrary) {
        for preset in self.presets {
            library.push_saved(preset);
        }
    }

    fn validate(&self) -> FieldResult<()> {
        if self.version != PRESET_FILE_VERSION {
            return Err(FieldError::parse(format!(
                "unsupported gradient preset version {} (expected {PRESET_FILE_VERSION})",
                self.version
            )));
        }
        for p in &self.presets {
            if p.name().trim().is_empty() {
                return Err(FieldError::parse("gradient preset name must be non-empty"));
            }
            if p.stops().len() > MAX_CUSTOM_STOPS {
                return Err(FieldError::parse(format!(
                    "gradient preset '{}' has {} stops (max {MAX_CUSTOM_STOPS})",
                    p.name(),
                    p.stops().len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/preset_file.rs"]
mod tests;
