use super::*;

#[test]
fn parses_plain_json() {
    let p = parse_poem_response(r#"{"title":"Tide","poem":"low\nhigh\n\nagain"}"#).unwrap();
    assert_eq!(p.title, "Tide");
    assert_eq!(p.body, "low\nhigh\n\nagain");
}

#[test]
fn strips_markdown_fences() {
    let text = "```json\n{\"title\":\"A\",\"poem\":\"b\"}\n```\n";
    assert_eq!(parse_poem_response(text).unwrap(), Poem::new("A", "b"));
    let text = "```\n{\"title\":\"A\",\"poem\":\"b\"}```";
    assert_eq!(parse_poem_response(text).unwrap(), Poem::new("A", "b"));
}

#[test]
fn garbage_is_malformed_not_unavailable() {
    for text in [
        "",
        "   ",
        "sorry, I cannot",
        "{\"title\":\"x\"}",
        "{\"title\":\" \",\"poem\":\"b\"}",
    ] {
        let err = parse_poem_response(text).unwrap_err();
        assert!(
            matches!(err, ServiceError::MalformedResponse(_)),
            "{text:?} -> {err:?}"
        );
    }
}
