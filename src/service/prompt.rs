use crate::service::options::{Language, PoemMood, PoemStyle};

/// Instruction text sent alongside the photo.
///
/// Asks for a titled poem of 2 to 4 stanzas, at most 6 lines each, answered as JSON with
/// `title` and `poem` keys, `\n` between lines and `\n\n` between stanzas.
pub fn build_prompt(style: PoemStyle, mood: PoemMood, language: Language) -> String {
    format!(
        "Analyze this image and write an original poem in {lang} with a title.\n\
         - Poetic style: {style}.\n\
         - Emotional tone: {mood}.\n\
         - Structure: the poem must have between 2 and 4 stanzas. Each stanza has at most 6 lines.\n\
         - Answer only with JSON holding a \"title\" key for the title and a \"poem\" key for the \
         poem (use '\\n' for line breaks and '\\n\\n' between stanzas).",
        lang = language.name(),
        style = style.label(language),
        mood = mood.label(language),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/service/prompt.rs"]
mod tests;
