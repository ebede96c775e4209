use crate::text::measure::{FontSpec, TextMeasure};

/// Greedy word wrap.
///
/// Paragraphs are the `\n`-separated pieces of `text`; each is wrapped on its own, so
/// forced breaks and blank stanza lines survive. A paragraph with no words yields one empty
/// line. Words are separated by ASCII spaces only, so no-break spaces and tabs stay inside a
/// word. Words are never split: a word wider than `max_width` sits alone on its line.
pub fn wrap<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    font: &FontSpec,
    measure: &mut M,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_width, font, measure, &mut lines);
    }
    lines
}

fn wrap_paragraph<M: TextMeasure + ?Sized>(
    paragraph: &str,
    max_width: f32,
    font: &FontSpec,
    measure: &mut M,
    out: &mut Vec<String>,
) {
    let mut words = paragraph.split(' ').filter(|w| !w.is_empty());
    let Some(first) = words.next() else {
        out.push(String::new());
        return;
    };

    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, font) < max_width {
            current = candidate;
        } else {
            out.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    out.push(current);
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
