use parascript_core::ast::{Command, Script, TextStyle};
use parascript_core::{parse, ParseError, ScriptCursor};

fn parse_code(input: &str) -> Script {
    parse(input).unwrap_or_else(|errs: Vec<ParseError>| panic!("Parse failed: {:#?}", errs))
}

#[test]
fn test_paragraphs_and_speakers() {
    let input = r#"
# Pink guy's greeting
Hi! I'm the pink guy.

@Player
{neutral}Hello.

@Pink guy
{happy}Nice to meet you!
{sad}Well, bye.
"#;
    let script = parse_code(input);
    assert_eq!(script.len(), 3);
    assert_eq!(script.paragraphs[0].speaker, None);
    assert_eq!(script.paragraphs[1].speaker.as_deref(), Some("Player"));
    assert_eq!(script.paragraphs[2].speaker.as_deref(), Some("Pink guy"));
    assert_eq!(script.paragraphs[2].plain_text(), "Nice to meet you!\nWell, bye.");
}

#[test]
fn test_duration_counts_characters_and_pauses() {
    let script = parse_code("abc{pause 10}de");
    let p = &script.paragraphs[0];
    assert_eq!(p.duration, 15.0);
    assert!(matches!(p.commands[1], Command::Pause { start, units } if start == 3.0 && units == 10.0));
    assert!(matches!(&p.commands[2], Command::Text { start, .. } if *start == 13.0));
}

#[test]
fn test_expression_timeline() {
    let script = parse_code("{happy}Hello {face sad}world");
    let p = &script.paragraphs[0];
    assert_eq!(p.expression_at(0.0), Some("happy"));
    assert_eq!(p.expression_at(5.9), Some("happy"));
    assert_eq!(p.expression_at(6.0), Some("sad"));
    assert_eq!(p.expression_at(100.0), Some("sad"));

    let plain = parse_code("no faces here");
    assert_eq!(plain.paragraphs[0].expression_at(3.0), None);
}

#[test]
fn test_visible_runs_reveal_progressively() {
    let script = parse_code("ab{b}cd{/b}");
    let p = &script.paragraphs[0];

    assert!(p.visible_runs(0.0).is_empty());

    let runs = p.visible_runs(3.0);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "ab");
    assert!(runs[0].complete);
    assert_eq!(runs[1].text, "c");
    assert_eq!(runs[1].style, TextStyle { bold: true, italic: false });
    assert!(!runs[1].complete);

    assert!(p.is_revealed(4.0));
    assert!(!p.is_revealed(3.5));
}

#[test]
fn test_visible_runs_respect_char_boundaries() {
    let script = parse_code("héllo");
    let runs = script.paragraphs[0].visible_runs(2.0);
    assert_eq!(runs[0].text, "hé");
}

#[test]
fn test_error_recovery() {
    let input = r#"
Line 1

{unknown tag here}
Line 2

{pause -3}
"#;
    let errs = parse(input).unwrap_err();
    assert_eq!(errs.len(), 2);
    assert_eq!(errs[0].line, 4);
    assert!(errs[0].msg.contains("unknown tag"));
    assert_eq!(errs[1].line, 7);
}

#[test]
fn test_speaker_without_text_is_rejected() {
    let errs = parse("@Alex\n\nHello").unwrap_err();
    assert_eq!(errs.len(), 1);
    assert!(errs[0].msg.contains("Alex"));
}

#[test]
fn test_cursor_advances_with_reveal() {
    let script = parse_code("{happy}ab{pause 2}{sad}cd");
    let p = &script.paragraphs[0];
    let mut cursor = ScriptCursor::default();

    let started = cursor.advance(p, 0.0);
    assert_eq!(started.len(), 2);
    assert_eq!(cursor.command_index(), 2);

    assert!(cursor.advance(p, 1.0).is_empty());

    let started = cursor.advance(p, 4.0);
    assert_eq!(started.len(), 3);
    assert_eq!(cursor.command_index(), p.commands.len());

    cursor.reset();
    assert_eq!(cursor.command_index(), 0);
}
