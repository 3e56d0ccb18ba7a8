pub mod ast;
pub mod cursor;
pub mod lexer;
pub mod parser;

pub use ast::{Command, Paragraph, Script, TextRun, TextStyle};
pub use cursor::ScriptCursor;
pub use parser::ParseError;

/// Lexes and parses a whole script source.
pub fn parse(src: &str) -> Result<Script, Vec<ParseError>> {
    let tokens = lexer::Lexer::new(src).run();
    parser::Parser::new(&tokens).parse()
}
