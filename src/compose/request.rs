use crate::assets::ImageSource;
use crate::template::kind::TemplateKind;

pub const DEFAULT_OUTPUT_SCALE: f64 = 2.0;

/// A generated poem. `body` uses `\n` for line breaks and `\n\n` between stanzas.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Poem {
    pub title: String,
    #[serde(alias = "poem")]
    pub body: String,
}

impl Poem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Immutable input to a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub source_image: ImageSource,
    pub title: String,
    pub body: String,
    pub author_name: Option<String>,
    pub template: TemplateKind,
    pub output_scale: f64,
}

impl RenderRequest {
    pub fn new(source_image: ImageSource, poem: &Poem, template: TemplateKind) -> Self {
        Self {
            source_image,
            title: poem.title.clone(),
            body: poem.body.clone(),
            author_name: None,
            template,
            output_scale: DEFAULT_OUTPUT_SCALE,
        }
    }

    pub fn with_author(mut self, author: Option<impl Into<String>>) -> Self {
        self.author_name = author.map(Into::into);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.output_scale = scale;
        self
    }

    /// The credit line, if an author was given and is not blank.
    pub fn credit_line(&self) -> Option<String> {
        credit_line(self.author_name.as_deref())
    }
}

pub(crate) fn credit_line(author: Option<&str>) -> Option<String> {
    author
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| format!("- {a}"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/request.rs"]
mod tests;
