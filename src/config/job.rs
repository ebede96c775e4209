use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::compose::ComposeOpts;
use crate::compose::request::{DEFAULT_OUTPUT_SCALE, Poem};
use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::template::kind::TemplateKind;
use crate::text::fonts::FontFiles;

/// Output container for an export.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
}

/// The poem, inline or as a path to a `{"title", "poem"}` JSON file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PoemSource {
    Inline(Poem),
    File(PathBuf),
}

/// A JSON-described export, as run by `photoverse job`.
///
/// Relative paths are resolved against the directory of the job file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportJob {
    pub image: PathBuf,
    pub poem: PoemSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub template: TemplateKind,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub fonts: FontFiles,
    #[serde(default)]
    pub compose: ComposeOpts,
}

fn default_scale() -> f64 {
    DEFAULT_OUTPUT_SCALE
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

impl ExportJob {
    /// Parse and validate a job from JSON. Relative paths are left as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> PhotoverseResult<Self> {
        let job: Self = serde_json::from_reader(r)
            .map_err(|e| PhotoverseError::serde(format!("parse export job JSON: {e}")))?;
        job.validate()?;
        Ok(job)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PhotoverseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotoverseError::validation(format!("open export job '{}': {e}", path.display()))
        })?;
        let mut job = Self::from_reader(BufReader::new(f))?;
        if let Some(base) = path.parent() {
            job.resolve_relative_to(base);
        }
        Ok(job)
    }

    pub fn validate(&self) -> PhotoverseResult<()> {
        if self.image.as_os_str().is_empty() {
            return Err(PhotoverseError::validation("job image path is empty"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PhotoverseError::validation(format!(
                "job scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        self.compose.validate()
    }

    /// Rebase every relative path in the job onto `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.image);
        rebase(&mut self.out_dir);
        if let PoemSource::File(p) = &mut self.poem {
            rebase(p);
        }
        for p in [
            &mut self.fonts.serif,
            &mut self.fonts.serif_bold,
            &mut self.fonts.serif_italic,
            &mut self.fonts.mono,
        ]
        .into_iter()
        .flatten()
        {
            rebase(p);
        }
    }

    pub fn load_poem(&self) -> PhotoverseResult<Poem> {
        match &self.poem {
            PoemSource::Inline(p) => Ok(p.clone()),
            PoemSource::File(path) => {
                let f = File::open(path).map_err(|e| {
                    PhotoverseError::validation(format!("open poem '{}': {e}", path.display()))
                })?;
                serde_json::from_reader(BufReader::new(f)).map_err(|e| {
                    PhotoverseError::serde(format!("parse poem '{}': {e}", path.display()))
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/job.rs"]
mod tests;
