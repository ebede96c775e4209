use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use usvg::fontdb::{Database, FaceInfo, Family, ID, Query, Stretch, Style, Weight};

use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::text::measure::FontRole;

/// Raw font program bytes plus the face index inside a collection.
#[derive(Clone)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Font faces keyed by [`FontRole`]. Roles without a face fall back to approximate metrics
/// and are not drawn.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: BTreeMap<FontRole, FontFace>,
}

/// Optional font file per role, as supplied by CLI flags or a job file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontFiles {
    #[serde(default)]
    pub serif: Option<std::path::PathBuf>,
    #[serde(default)]
    pub serif_bold: Option<std::path::PathBuf>,
    #[serde(default)]
    pub serif_italic: Option<std::path::PathBuf>,
    #[serde(default)]
    pub mono: Option<std::path::PathBuf>,
}

impl FontFiles {
    pub fn is_empty(&self) -> bool {
        self.serif.is_none()
            && self.serif_bold.is_none()
            && self.serif_italic.is_none()
            && self.mono.is_none()
    }
}

impl FontBook {
    /// A book with no faces; every role measures with the fixed-advance fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: FontRole, face: FontFace) {
        self.faces.insert(role, face);
    }

    pub fn with_face(mut self, role: FontRole, bytes: Vec<u8>) -> Self {
        self.insert(
            role,
            FontFace {
                bytes: Arc::new(bytes),
                index: 0,
            },
        );
        self
    }

    pub fn get(&self, role: FontRole) -> Option<&FontFace> {
        self.faces.get(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = FontRole> + '_ {
        self.faces.keys().copied()
    }

    /// Load faces from explicit files. A missing serif bold/italic file reuses the regular
    /// serif face so titles and credits still render.
    pub fn from_files(files: &FontFiles) -> PhotoverseResult<Self> {
        let mut book = Self::empty();
        let read = |p: &Path| -> PhotoverseResult<FontFace> {
            let bytes = std::fs::read(p).map_err(|e| {
                PhotoverseError::validation(format!("failed to read font '{}': {e}", p.display()))
            })?;
            Ok(FontFace {
                bytes: Arc::new(bytes),
                index: 0,
            })
        };

        let serif = files.serif.as_deref().map(read).transpose()?;
        if let Some(face) = &serif {
            book.insert(FontRole::Body, face.clone());
        }
        match (files.serif_bold.as_deref(), &serif) {
            (Some(p), _) => book.insert(FontRole::Title, read(p)?),
            (None, Some(face)) => book.insert(FontRole::Title, face.clone()),
            (None, None) => {}
        }
        match (files.serif_italic.as_deref(), &serif) {
            (Some(p), _) => book.insert(FontRole::Credit, read(p)?),
            (None, Some(face)) => book.insert(FontRole::Credit, face.clone()),
            (None, None) => {}
        }
        if let Some(p) = files.mono.as_deref() {
            book.insert(FontRole::Mono, read(p)?);
        }
        Ok(book)
    }

    /// Discover faces among installed system fonts.
    ///
    /// See [`FontBook::from_database`] for how faces are chosen.
    pub fn from_system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(&db)
    }

    /// Choose one face per role from `db`.
    ///
    /// Prefers "Times New Roman" and "Courier New", then the generic serif and monospace
    /// families. When neither resolves, the closest installed face is used, ranked by
    /// monospacing, then style, then weight. Only an empty database leaves roles unset.
    pub fn from_database(db: &Database) -> Self {
        let mut book = Self::empty();
        for role in FontRole::ALL {
            let families: &[Family<'_>] = match role {
                FontRole::Mono => &[Family::Name("Courier New"), Family::Monospace],
                _ => &[Family::Name("Times New Roman"), Family::Serif],
            };
            let query = Query {
                families,
                weight: if role.is_bold() {
                    Weight::BOLD
                } else {
                    Weight::NORMAL
                },
                stretch: Stretch::Normal,
                style: if role.is_italic() {
                    Style::Italic
                } else {
                    Style::Normal
                },
            };
            let Some(id) = db.query(&query).or_else(|| closest_face(db, role)) else {
                tracing::warn!(?role, "no system font found for role");
                continue;
            };
            if let Some(face) = db.with_face_data(id, |data, index| FontFace {
                bytes: Arc::new(data.to_vec()),
                index,
            }) {
                book.insert(role, face);
            }
        }
        book
    }
}

fn closest_face(db: &Database, role: FontRole) -> Option<ID> {
    let score = |face: &FaceInfo| -> u8 {
        let mut score = 0;
        if face.monospaced == (role == FontRole::Mono) {
            score += 4;
        }
        if (face.style == Style::Italic) == role.is_italic() {
            score += 2;
        }
        if (face.weight >= Weight::BOLD) == role.is_bold() {
            score += 1;
        }
        score
    };

    let mut best: Option<(u8, &FaceInfo)> = None;
    for face in db.faces() {
        let s = score(face);
        if best.is_none_or(|(b, _)| s > b) {
            best = Some((s, face));
        }
    }
    best.map(|(_, face)| {
        tracing::info!(
            ?role,
            family = face.families.first().map(|(name, _)| name.as_str()).unwrap_or(""),
            "preferred font family missing; using closest installed face"
        );
        face.id
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
