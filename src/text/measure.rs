/// Typographic role of a run of text. Each role maps to one font face.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Serif regular, used for poem bodies.
    Body,
    /// Serif bold, used for titles.
    Title,
    /// Serif italic, used for the author credit.
    Credit,
    /// Monospaced regular, used for the polaroid body.
    Mono,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [Self::Body, Self::Title, Self::Credit, Self::Mono];

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Title)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Credit)
    }
}

/// Face role plus pixel size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub role: FontRole,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(role: FontRole, size_px: f32) -> Self {
        Self { role, size_px }
    }

    pub fn with_size(self, size_px: f32) -> Self {
        Self { size_px, ..self }
    }
}

/// Measures the advance width of a single line of text.
///
/// Implementations must be monotonic in `size_px`: for fixed text, a smaller size never
/// measures wider. The shrink-to-fit loop relies on this.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &mut T {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure(text, font)
    }
}

/// Deterministic measurer with a fixed advance per character, in ems.
///
/// Used when no real face is available for a role, and in tests where results must not
/// depend on installed fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub body_em: f32,
    pub title_em: f32,
    pub credit_em: f32,
    pub mono_em: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            body_em: 0.5,
            title_em: 0.56,
            credit_em: 0.47,
            mono_em: 0.6,
        }
    }
}

impl FixedAdvance {
    pub fn em_for(&self, role: FontRole) -> f32 {
        match role {
            FontRole::Body => self.body_em,
            FontRole::Title => self.title_em,
            FontRole::Credit => self.credit_em,
            FontRole::Mono => self.mono_em,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32 {
        let chars = text.chars().filter(|c| !c.is_control()).count();
        chars as f32 * self.em_for(font.role) * font.size_px.max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
