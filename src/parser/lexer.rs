//! Lexer (tokenizer) for C source code.
//!
//! Streams [`Token`]s off a [`CharReader`] with a single token of
//! lookahead: [`Lexer::peek`] returns the current token, [`Lexer::advance`]
//! replaces it with the next one. Preprocessor directives are not expanded;
//! the `#` itself is handed to the parser as a token and skipped there.

use std::fmt;
use std::io::Read;
use std::rc::Rc;

use crate::diag;
use crate::parser::reader::CharReader;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Identifier,
    Integer,
    Character,
    String,

    // Keywords
    Int,
    Char,
    Void,
    If,
    Else,
    While,
    For,
    Return,

    // Operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Eq,      // ==
    Neq,     // !=
    Lt,      // <
    Gt,      // >
    Lte,     // <=
    Gte,     // >=
    Assign,  // =
    Inc,     // ++
    Dec,     // --
    And,     // &&
    Or,      // ||
    Not,     // !
    BitAnd,  // &
    BitOr,   // |
    BitXor,  // ^
    BitNot,  // ~
    Shl,     // <<
    Shr,     // >>

    // Punctuation
    Semicolon, // ;
    Colon,     // :
    Comma,     // ,
    Dot,       // .
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // Preprocessor
    Pound, // #

    // Sentinels
    Eof,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Character => "character literal",
            TokenKind::String => "string literal",
            TokenKind::Int => "'int'",
            TokenKind::Char => "'char'",
            TokenKind::Void => "'void'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Return => "'return'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Eq => "'=='",
            TokenKind::Neq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Lte => "'<='",
            TokenKind::Gte => "'>='",
            TokenKind::Assign => "'='",
            TokenKind::Inc => "'++'",
            TokenKind::Dec => "'--'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Not => "'!'",
            TokenKind::BitAnd => "'&'",
            TokenKind::BitOr => "'|'",
            TokenKind::BitXor => "'^'",
            TokenKind::BitNot => "'~'",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Pound => "'#'",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "error",
        };
        f.write_str(text)
    }
}

/// A single token: kind, matched text, and where it starts.
///
/// The filename is shared across every token of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub filename: Rc<str>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}:{}: end of file", self.line, self.column),
            _ => write!(
                f,
                "{}:{}: {} '{}'",
                self.line, self.column, self.kind, self.lexeme
            ),
        }
    }
}

/// Streaming lexer with one token of lookahead.
pub struct Lexer<R: Read> {
    reader: CharReader<R>,
    filename: Rc<str>,
    current: Token,
}

impl<R: Read> Lexer<R> {
    /// Create a lexer over `input` with the first token pre-loaded.
    pub fn new(input: R, filename: &str) -> Self {
        let filename: Rc<str> = Rc::from(filename);
        let mut lexer = Self {
            reader: CharReader::new(input),
            filename: Rc::clone(&filename),
            current: Token {
                kind: TokenKind::Eof,
                lexeme: String::from("EOF"),
                line: 1,
                column: 1,
                filename,
            },
        };
        lexer.current = lexer.scan_token();
        lexer
    }

    /// The source filename this lexer was created with.
    pub fn filename(&self) -> &Rc<str> {
        &self.filename
    }

    /// Current token, without consuming it.
    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Discard the current token and load the next one. Once the current
    /// token is EOF this is a no-op: no token is ever produced after EOF.
    pub fn advance(&mut self) {
        if self.current.kind != TokenKind::Eof {
            self.current = self.scan_token();
        }
    }

    fn token(&self, kind: TokenKind, lexeme: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme,
            line,
            column,
            filename: Rc::clone(&self.filename),
        }
    }

    fn error_token(&self, message: String, line: usize, column: usize) -> Token {
        diag::report_at(&self.filename, line, column, &message);
        self.token(TokenKind::Error, message, line, column)
    }

    /// Scan the next token, skipping whitespace and comments first.
    fn scan_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let line = self.reader.line();
        let column = self.reader.column();
        let ch = self.reader.peek();

        match ch {
            0 => self.token(TokenKind::Eof, String::from("EOF"), line, column),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier_or_keyword(line, column),
            b'0'..=b'9' => self.integer_literal(line, column),
            b'\'' => self.char_literal(line, column),
            b'"' => self.string_literal(line, column),
            b'+' => self.one_or_two(line, column, b'+', TokenKind::Plus, TokenKind::Inc),
            b'-' => self.one_or_two(line, column, b'-', TokenKind::Minus, TokenKind::Dec),
            b'*' => self.single(line, column, TokenKind::Star),
            b'/' => self.single(line, column, TokenKind::Slash),
            b'%' => self.single(line, column, TokenKind::Percent),
            b'=' => self.one_or_two(line, column, b'=', TokenKind::Assign, TokenKind::Eq),
            b'!' => self.one_or_two(line, column, b'=', TokenKind::Not, TokenKind::Neq),
            b'<' => {
                self.reader.advance();
                match self.reader.peek() {
                    b'=' => {
                        self.reader.advance();
                        self.token(TokenKind::Lte, String::from("<="), line, column)
                    }
                    b'<' => {
                        self.reader.advance();
                        self.token(TokenKind::Shl, String::from("<<"), line, column)
                    }
                    _ => self.token(TokenKind::Lt, String::from("<"), line, column),
                }
            }
            b'>' => {
                self.reader.advance();
                match self.reader.peek() {
                    b'=' => {
                        self.reader.advance();
                        self.token(TokenKind::Gte, String::from(">="), line, column)
                    }
                    b'>' => {
                        self.reader.advance();
                        self.token(TokenKind::Shr, String::from(">>"), line, column)
                    }
                    _ => self.token(TokenKind::Gt, String::from(">"), line, column),
                }
            }
            b'&' => self.one_or_two(line, column, b'&', TokenKind::BitAnd, TokenKind::And),
            b'|' => self.one_or_two(line, column, b'|', TokenKind::BitOr, TokenKind::Or),
            b'^' => self.single(line, column, TokenKind::BitXor),
            b'~' => self.single(line, column, TokenKind::BitNot),
            b';' => self.single(line, column, TokenKind::Semicolon),
            b':' => self.single(line, column, TokenKind::Colon),
            b',' => self.single(line, column, TokenKind::Comma),
            b'.' => self.single(line, column, TokenKind::Dot),
            b'(' => self.single(line, column, TokenKind::LParen),
            b')' => self.single(line, column, TokenKind::RParen),
            b'{' => self.single(line, column, TokenKind::LBrace),
            b'}' => self.single(line, column, TokenKind::RBrace),
            b'[' => self.single(line, column, TokenKind::LBracket),
            b']' => self.single(line, column, TokenKind::RBracket),
            b'#' => self.single(line, column, TokenKind::Pound),
            other => {
                self.reader.advance();
                self.error_token(
                    format!("Unrecognized character '{}'", other as char),
                    line,
                    column,
                )
            }
        }
    }

    /// Skip whitespace, line comments, and block comments, in a loop until
    /// none applies. An unterminated block comment reports an error at the
    /// comment's start and leaves the reader at end of input.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.reader.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.reader.advance();
                }
                b'/' if self.reader.peek2() == b'/' => {
                    while self.reader.peek() != b'\n' && self.reader.peek() != 0 {
                        self.reader.advance();
                    }
                }
                b'/' if self.reader.peek2() == b'*' => {
                    let line = self.reader.line();
                    let column = self.reader.column();
                    self.reader.advance();
                    self.reader.advance();
                    loop {
                        if self.reader.peek() == 0 {
                            diag::report_at(
                                &self.filename,
                                line,
                                column,
                                "Unterminated block comment",
                            );
                            return;
                        }
                        if self.reader.peek() == b'*' && self.reader.peek2() == b'/' {
                            self.reader.advance();
                            self.reader.advance();
                            break;
                        }
                        self.reader.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn single(&mut self, line: usize, column: usize, kind: TokenKind) -> Token {
        let ch = self.reader.advance();
        self.token(kind, String::from(ch as char), line, column)
    }

    /// Consume one character; if the next one is `second`, consume it too
    /// and emit `two`, otherwise emit `one`. Longest match wins.
    fn one_or_two(
        &mut self,
        line: usize,
        column: usize,
        second: u8,
        one: TokenKind,
        two: TokenKind,
    ) -> Token {
        let first = self.reader.advance();
        if self.reader.peek() == second {
            self.reader.advance();
            let lexeme: String = [first as char, second as char].iter().collect();
            self.token(two, lexeme, line, column)
        } else {
            self.token(one, String::from(first as char), line, column)
        }
    }

    fn identifier_or_keyword(&mut self, line: usize, column: usize) -> Token {
        let mut lexeme = String::new();
        while matches!(self.reader.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            lexeme.push(self.reader.advance() as char);
        }

        let kind = match lexeme.as_str() {
            "int" => TokenKind::Int,
            "char" => TokenKind::Char,
            "void" => TokenKind::Void,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "return" => TokenKind::Return,
            _ => TokenKind::Identifier,
        };

        self.token(kind, lexeme, line, column)
    }

    fn integer_literal(&mut self, line: usize, column: usize) -> Token {
        let mut lexeme = String::new();
        while self.reader.peek().is_ascii_digit() {
            lexeme.push(self.reader.advance() as char);
        }
        self.token(TokenKind::Integer, lexeme, line, column)
    }

    /// Character literal: a single character or escape between quotes.
    /// The lexeme holds the one decoded byte.
    fn char_literal(&mut self, line: usize, column: usize) -> Token {
        self.reader.advance(); // opening quote

        let ch = self.reader.peek();
        if ch == 0 {
            return self.error_token(
                String::from("Unterminated character literal"),
                line,
                column,
            );
        }

        let value = if ch == b'\\' {
            self.reader.advance();
            let escape = self.reader.peek();
            if escape == 0 {
                return self.error_token(
                    String::from("Unterminated character literal"),
                    line,
                    column,
                );
            }
            self.reader.advance();
            match escape {
                b'n' => b'\n',
                b't' => b'\t',
                b'r' => b'\r',
                b'0' => 0,
                b'\\' => b'\\',
                b'\'' => b'\'',
                b'"' => b'"',
                other => {
                    return self.error_token(
                        format!("Invalid escape sequence '\\{}'", other as char),
                        line,
                        column,
                    );
                }
            }
        } else {
            self.reader.advance();
            ch
        };

        if self.reader.peek() != b'\'' {
            return self.error_token(
                String::from("Unterminated character literal"),
                line,
                column,
            );
        }
        self.reader.advance(); // closing quote

        let mut lexeme = String::new();
        lexeme.push(value as char);
        self.token(TokenKind::Character, lexeme, line, column)
    }

    /// String literal: raw bytes up to the next unescaped quote. A
    /// backslash keeps the following byte in the lexeme verbatim; no
    /// decoding happens here.
    fn string_literal(&mut self, line: usize, column: usize) -> Token {
        self.reader.advance(); // opening quote

        let mut lexeme = String::new();
        loop {
            let ch = self.reader.peek();
            match ch {
                0 => {
                    return self.error_token(
                        String::from("Unterminated string literal"),
                        line,
                        column,
                    );
                }
                b'"' => {
                    self.reader.advance();
                    return self.token(TokenKind::String, lexeme, line, column);
                }
                b'\\' => {
                    lexeme.push(self.reader.advance() as char);
                    let next = self.reader.peek();
                    if next == 0 {
                        return self.error_token(
                            String::from("Unterminated string literal"),
                            line,
                            column,
                        );
                    }
                    lexeme.push(self.reader.advance() as char);
                }
                _ => {
                    lexeme.push(self.reader.advance() as char);
                }
            }
        }
    }
}
