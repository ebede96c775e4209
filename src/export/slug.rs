/// Prefix shared by every raster export.
pub const FILE_PREFIX: &str = "photoverse";

/// Lower-case `title`, collapse whitespace runs to `-`, drop path separators and control
/// characters. Falls back to `poem` when nothing usable is left.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        if c.is_control() || matches!(c, '/' | '\\' | ':') {
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.extend(c.to_lowercase());
    }
    let out = out.trim_matches('.').to_string();
    if out.is_empty() {
        "poem".to_string()
    } else {
        out
    }
}

pub fn png_file_name(title: &str) -> String {
    format!("{FILE_PREFIX}-{}.png", slugify(title))
}

/// Document name: whitespace becomes `_`, case is kept.
pub fn pdf_file_name(title: &str) -> String {
    let mut stem: String = title
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if stem.trim_matches('.').is_empty() {
        stem = "poem".to_string();
    }
    format!("{stem}-photo-verse.pdf")
}

#[cfg(test)]
#[path = "../../tests/unit/export/slug.rs"]
mod tests;
