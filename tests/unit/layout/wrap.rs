use super::*;
use crate::text::measure::{FixedAdvance, FontRole};

fn body(size: f32) -> FontSpec {
    FontSpec::new(FontRole::Body, size)
}

#[test]
fn packs_words_greedily() {
    // 10px font, 5px per char.
    let mut m = FixedAdvance::default();
    let lines = wrap("aa bb cc dd", 30.0, &body(10.0), &mut m);
    // "aa bb" = 25px fits, "aa bb cc" = 40px does not.
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn every_line_fits_unless_single_word() {
    let mut m = FixedAdvance::default();
    let font = body(12.0);
    let text = "the light falls slow across extraordinarily wide rooftops at dusk";
    for width in [20.0_f32, 60.0, 120.0, 240.0] {
        for line in wrap(text, width, &font, &mut m) {
            let w = m.measure(&line, &font);
            assert!(
                w <= width || !line.contains(' '),
                "line '{line}' measures {w} > {width}"
            );
        }
    }
}

#[test]
fn overlong_word_is_alone_and_unsplit() {
    let mut m = FixedAdvance::default();
    let lines = wrap("a incomprehensibilities b", 30.0, &body(10.0), &mut m);
    assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
}

#[test]
fn stanza_break_keeps_blank_line() {
    let mut m = FixedAdvance::default();
    let lines = wrap("one two\nthree\n\nfour five", 1000.0, &body(10.0), &mut m);
    assert_eq!(lines, vec!["one two", "three", "", "four five"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    let mut m = FixedAdvance::default();
    assert_eq!(wrap("", 100.0, &body(10.0), &mut m), vec![String::new()]);
    assert_eq!(
        wrap("   ", 100.0, &body(10.0), &mut m),
        vec![String::new()]
    );
}

#[test]
fn crlf_paragraphs_are_trimmed() {
    let mut m = FixedAdvance::default();
    let lines = wrap("a\r\n\r\nb", 1000.0, &body(10.0), &mut m);
    assert_eq!(lines, vec!["a", "", "b"]);
}

#[test]
fn only_ascii_spaces_separate_words() {
    let mut m = FixedAdvance::default();
    let lines = wrap("a\u{a0}b\tc d", 1.0, &body(10.0), &mut m);
    assert_eq!(lines, vec!["a\u{a0}b\tc", "d"]);
    assert_eq!(wrap("a  b", 100.0, &body(10.0), &mut m), vec!["a b"]);
}
