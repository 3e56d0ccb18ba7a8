use parascript_core::lexer::{Lexer, TokKind};

fn kinds(src: &str) -> Vec<TokKind> {
    Lexer::new(src).run().into_iter().map(|t| t.tok).collect()
}

#[test]
fn basics() {
    let toks = kinds("@Pink guy\nHello {happy}there\n");
    assert_eq!(
        toks,
        vec![
            TokKind::Speaker("Pink guy".into()),
            TokKind::Text("Hello ".into()),
            TokKind::Tag("happy".into()),
            TokKind::Text("there".into()),
            TokKind::Newline,
            TokKind::Eof,
        ]
    );
}

#[test]
fn blank_lines_collapse() {
    let toks = kinds("one\n\n\n   \ntwo");
    assert_eq!(
        toks,
        vec![
            TokKind::Text("one".into()),
            TokKind::Newline,
            TokKind::Blank,
            TokKind::Text("two".into()),
            TokKind::Newline,
            TokKind::Eof,
        ]
    );
}

#[test]
fn leading_blank_lines_are_dropped() {
    let toks = kinds("\n\nhi");
    assert_eq!(toks[0], TokKind::Text("hi".into()));
}

#[test]
fn escapes() {
    let toks = kinds("a {{b}} c");
    assert_eq!(toks[0], TokKind::Text("a {b} c".into()));
}

#[test]
fn comments_and_crlf() {
    let toks = kinds("# a note\r\nline\r\n");
    assert_eq!(toks[0], TokKind::Comment("a note".into()));
    assert_eq!(toks[1], TokKind::Text("line".into()));
}

#[test]
fn unterminated_tag_is_an_error_token() {
    let toks = kinds("oops {face happy\nnext");
    assert!(toks.contains(&TokKind::Error("unterminated tag".into())));
    assert!(toks.contains(&TokKind::Text("next".into())));
}

#[test]
fn spans_track_lines() {
    let toks = Lexer::new("first\n\n@Alex\nsecond").run();
    let speaker = toks.iter().find(|t| matches!(t.tok, TokKind::Speaker(_))).unwrap();
    assert_eq!(speaker.span.line, 3);
    let second = toks.iter().find(|t| t.tok == TokKind::Text("second".into())).unwrap();
    assert_eq!(second.span.line, 4);
}
