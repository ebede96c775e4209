use std::fmt;

/// Interface language for prompts and labels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// The language's own name, as used inside prompts.
    pub fn name(self) -> &'static str {
        match self {
            Self::Es => "Spanish",
            Self::En => "English",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoemStyle {
    Sonnet,
    Haiku,
    FreeVerse,
    Romantic,
    Minimalist,
    Classic,
}

impl PoemStyle {
    pub const ALL: [PoemStyle; 6] = [
        Self::Sonnet,
        Self::Haiku,
        Self::FreeVerse,
        Self::Romantic,
        Self::Minimalist,
        Self::Classic,
    ];

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Sonnet, Language::Es) => "Soneto",
            (Self::Sonnet, Language::En) => "Sonnet",
            (Self::Haiku, _) => "Haiku",
            (Self::FreeVerse, Language::Es) => "Verso Libre",
            (Self::FreeVerse, Language::En) => "Free Verse",
            (Self::Romantic, Language::Es) => "Romántico",
            (Self::Romantic, Language::En) => "Romantic",
            (Self::Minimalist, Language::Es) => "Minimalista",
            (Self::Minimalist, Language::En) => "Minimalist",
            (Self::Classic, Language::Es) => "Clásico",
            (Self::Classic, Language::En) => "Classic",
        }
    }
}

impl fmt::Display for PoemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::En))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoemMood {
    Nostalgia,
    Celebration,
    Reflection,
    Love,
    Adventure,
    Serenity,
}

impl PoemMood {
    pub const ALL: [PoemMood; 6] = [
        Self::Nostalgia,
        Self::Celebration,
        Self::Reflection,
        Self::Love,
        Self::Adventure,
        Self::Serenity,
    ];

    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Nostalgia, _) => "Nostalgia",
            (Self::Celebration, Language::Es) => "Celebración",
            (Self::Celebration, Language::En) => "Celebration",
            (Self::Reflection, Language::Es) => "Reflexión",
            (Self::Reflection, Language::En) => "Reflection",
            (Self::Love, Language::Es) => "Amor",
            (Self::Love, Language::En) => "Love",
            (Self::Adventure, Language::Es) => "Aventura",
            (Self::Adventure, Language::En) => "Adventure",
            (Self::Serenity, Language::Es) => "Serenidad",
            (Self::Serenity, Language::En) => "Serenity",
        }
    }
}

impl fmt::Display for PoemMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::En))
    }
}
