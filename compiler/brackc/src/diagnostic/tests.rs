use pretty_assertions::assert_eq;

use brack_parse::{parse, ParseError};

use super::*;

fn emit(path: &str, source: &str, err: &ParseError, colors: bool) -> String {
    let mut out = Vec::new();
    let mode = if colors { ColorMode::Always } else { ColorMode::Never };
    let mut emitter = TerminalEmitter::with_color_mode(&mut out, mode, false);
    emitter.emit_parse_error(path, source, err);
    emitter.flush();
    String::from_utf8(out).unwrap()
}

#[test]
fn snippet_with_caret() {
    let source = "[root !]";
    let err = parse(source).unwrap_err();
    assert_eq!(
        emit("doc.brack", source, &err, false),
        "error[B0007]: unexpected character `!`\n\
         \x20 --> doc.brack:1:7\n\
         \x20  |\n\
         \x201 | [root !]\n\
         \x20  |       ^\n\
         \x20 = note: syntax error\n"
    );
}

#[test]
fn later_lines_and_wide_gutter() {
    let source = format!("{}[root\n  attr=1\n  ]]", "\n".repeat(9));
    let err = parse(&source).unwrap_err();
    assert_eq!(err, ParseError::UnexpectedClose { pos: source.len() - 1 });
    let text = emit("doc.brack", &source, &err, false);
    assert!(text.contains("  --> doc.brack:12:4\n"), "{text}");
    assert!(text.contains("\n 12 |   ]]\n"), "{text}");
    assert!(text.contains("\n    |    ^\n"), "{text}");
}

#[test]
fn tabs_are_preserved_under_caret() {
    let source = "[a\t!]";
    let err = parse(source).unwrap_err();
    let text = emit("t.brack", source, &err, false);
    assert!(text.contains("\n   |   \t^\n"), "{text:?}");
}

#[test]
fn unclosed_points_at_end() {
    let source = "[root\n  [child";
    let err = parse(source).unwrap_err();
    let text = emit("u.brack", source, &err, false);
    assert!(text.starts_with("error[B0010]: 2 node(s) still open at end of input\n"));
    assert!(text.contains("  --> u.brack:2:9\n"), "{text}");
    assert!(text.ends_with("  = note: unclosed node\n"));
}

#[test]
fn errors_without_position() {
    let text = emit("e.brack", "", &ParseError::EmptyInput, false);
    assert_eq!(
        text,
        "error[B0001]: input is empty\n  --> e.brack\n  = note: syntax error\n"
    );
}

#[test]
fn colors_wrap_severity() {
    let source = "]";
    let err = parse(source).unwrap_err();
    let text = emit("c.brack", source, &err, true);
    assert!(text.starts_with("\x1b[1;31merror\x1b[0m\x1b[1m[B0004]\x1b[0m"));
    assert!(text.contains("\x1b[1;34m|\x1b[0m"));
}

#[test]
fn plain_message() {
    let mut out = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Auto, false);
    emitter.emit_message("cannot find file 'x'");
    assert_eq!(String::from_utf8(out).unwrap(), "error: cannot find file 'x'\n");
}

#[test]
fn color_mode_flags() {
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::from_flag("yes"), None);
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
