//! Double-buffered, sentinel-terminated lexer.
//!
//! Input is scanned through two rotating 4096-byte buffers, each
//! terminated by a NUL sentinel. The inner loop is a single byte
//! compare: hitting the sentinel either means the buffer boundary
//! (load the next chunk into the other buffer) or true end of input.
//! A lexeme that spans a refill is preserved in a side buffer so
//! [`Lexer::lexeme`] concatenates it transparently.
//!
//! Positions are character-accurate: the column advances once per
//! UTF-8 code point, and token lengths are counted in characters.

use pl0_core::diag::Diagnostics;
use pl0_core::text;
use pl0_core::token::{Token, TokenKind};

/// Size of each rotating input buffer.
const BUFFER_SIZE: usize = 4096;

/// Terminator byte placed after the last loaded byte of each buffer.
const SENTINEL: u8 = 0;

pub struct Lexer<'a> {
    source: &'a [u8],
    /// Read position in `source` for the next refill.
    source_pos: usize,

    buffers: Box<[[u8; BUFFER_SIZE + 1]; 2]>,
    /// Which buffer is active.
    current: usize,
    /// Scan position within the active buffer.
    forward: usize,
    /// Start of the in-flight lexeme within the active buffer.
    lexeme_begin: usize,
    /// Lexeme prefix saved across a refill.
    partial: Vec<u8>,

    line: u32,
    column: u32,
    token_line: u32,
    token_column: u32,

    /// Single-token lookahead for `peek_token`.
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source: source.as_bytes(),
            source_pos: 0,
            buffers: Box::new([[SENTINEL; BUFFER_SIZE + 1]; 2]),
            current: 1,
            forward: BUFFER_SIZE,
            lexeme_begin: BUFFER_SIZE,
            partial: Vec::new(),
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
            peeked: None,
        };
        lexer.refill();
        lexer
    }

    /// Rewind to the beginning of the source.
    pub fn reset(&mut self) {
        self.source_pos = 0;
        self.current = 1;
        self.forward = BUFFER_SIZE;
        self.lexeme_begin = BUFFER_SIZE;
        self.partial.clear();
        self.line = 1;
        self.column = 1;
        self.peeked = None;
        self.refill();
    }

    /// Scan the next token, reporting lexical errors through `diag`.
    pub fn next_token(&mut self, diag: &mut Diagnostics) -> Token {
        if let Some(token) = self.peeked.take() {
            return token;
        }

        self.skip_whitespace_and_comments(diag);

        if self.at_end() {
            self.mark_lexeme_start();
            return self.make_token(TokenKind::Eof);
        }

        self.mark_lexeme_start();
        let b = self.peek();

        if b.is_ascii_alphabetic() {
            self.scan_ident_or_keyword()
        } else if b.is_ascii_digit() {
            self.scan_number(diag)
        } else if is_punct_start(b) {
            self.scan_operator_or_delimiter()
        } else {
            self.scan_unknown(diag)
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&mut self, diag: &mut Diagnostics) -> Token {
        if self.peeked.is_none() {
            let token = self.next_token(diag);
            self.peeked = Some(token);
        }
        self.peeked.clone().expect("token was just buffered")
    }

    /// Rewind and drain the whole source into a token vector,
    /// including the trailing EOF token.
    pub fn tokenize(&mut self, diag: &mut Diagnostics) -> Vec<Token> {
        self.reset();
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token(diag);
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    // ------------------------------------------------------------------
    // Buffered input
    // ------------------------------------------------------------------

    /// Switch buffers and load the next chunk from the source.
    fn refill(&mut self) {
        // Preserve the in-flight lexeme before its bytes are reused.
        if self.lexeme_begin < self.forward {
            self.partial
                .extend_from_slice(&self.buffers[self.current][self.lexeme_begin..self.forward]);
        }

        self.current = 1 - self.current;
        let remaining = self.source.len() - self.source_pos;
        let to_read = remaining.min(BUFFER_SIZE);

        let buffer = &mut self.buffers[self.current];
        buffer[..to_read].copy_from_slice(&self.source[self.source_pos..self.source_pos + to_read]);
        buffer[to_read] = SENTINEL;
        self.source_pos += to_read;

        self.forward = 0;
        self.lexeme_begin = 0;
    }

    /// Current byte; 0 at end of input. May trigger a refill.
    fn peek(&mut self) -> u8 {
        loop {
            let b = self.buffers[self.current][self.forward];
            if b != SENTINEL {
                return b;
            }
            if self.forward == BUFFER_SIZE {
                self.refill();
            } else {
                return 0;
            }
        }
    }

    /// Byte after the current one, looking across the buffer boundary
    /// without consuming anything.
    fn peek_next(&mut self) -> u8 {
        if self.peek() == 0 {
            return 0;
        }
        // After peek() the current byte is real, so forward < BUFFER_SIZE.
        let next = self.forward + 1;
        let b = self.buffers[self.current][next];
        if b == SENTINEL && next == BUFFER_SIZE {
            return self.source.get(self.source_pos).copied().unwrap_or(0);
        }
        b
    }

    /// Consume and return the current byte, updating line/column.
    fn advance(&mut self) -> u8 {
        let b = self.peek();
        if b == 0 {
            return 0;
        }
        self.forward += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if !text::is_continuation(b) {
            // One column per code point, not per byte.
            self.column += 1;
        }
        b
    }

    fn at_end(&mut self) -> bool {
        self.peek() == 0
    }

    fn mark_lexeme_start(&mut self) {
        self.lexeme_begin = self.forward;
        self.partial.clear();
        self.token_line = self.line;
        self.token_column = self.column;
    }

    /// The lexeme from its start mark to the current position,
    /// including any prefix saved across refills.
    fn lexeme(&self) -> String {
        let mut bytes = self.partial.clone();
        if self.forward > self.lexeme_begin {
            bytes.extend_from_slice(&self.buffers[self.current][self.lexeme_begin..self.forward]);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    // ------------------------------------------------------------------
    // Whitespace and comments
    // ------------------------------------------------------------------

    fn skip_whitespace_and_comments(&mut self, diag: &mut Diagnostics) {
        loop {
            while matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\n') {
                self.advance();
            }

            if self.peek() == b'/' && self.peek_next() == b'/' {
                self.skip_line_comment();
            } else if self.peek() == b'/' && self.peek_next() == b'*' {
                self.skip_block_comment(diag);
            } else if self.peek() == b'{' {
                self.skip_brace_comment(diag);
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        // Consume "//" and everything up to the newline.
        self.advance();
        self.advance();
        while !self.at_end() && self.peek() != b'\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, diag: &mut Diagnostics) {
        let start_line = self.line;
        let start_column = self.column;
        self.advance(); // '/'
        self.advance(); // '*'

        while !self.at_end() {
            if self.peek() == b'*' && self.peek_next() == b'/' {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }

        diag.error("unclosed block comment", start_line, start_column, 2);
    }

    fn skip_brace_comment(&mut self, diag: &mut Diagnostics) {
        let start_line = self.line;
        let start_column = self.column;
        self.advance(); // '{'

        while !self.at_end() && self.peek() != b'}' {
            self.advance();
        }

        if self.at_end() {
            diag.error("unclosed comment", start_line, start_column, 1);
            return;
        }
        self.advance(); // '}'
    }

    // ------------------------------------------------------------------
    // Scanners
    // ------------------------------------------------------------------

    fn scan_ident_or_keyword(&mut self) -> Token {
        self.advance();
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Ident);
        self.make_token_with(kind, lexeme)
    }

    fn scan_number(&mut self, diag: &mut Diagnostics) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let lexeme = self.lexeme();
        let value = match lexeme.parse::<i64>() {
            Ok(v) if v > i32::MAX as i64 => {
                diag.error(
                    "integer literal overflow",
                    self.token_line,
                    self.token_column,
                    text::char_count(&lexeme) as u32,
                );
                0
            }
            Ok(v) => v as i32,
            Err(_) => {
                diag.error(
                    "invalid integer literal",
                    self.token_line,
                    self.token_column,
                    text::char_count(&lexeme) as u32,
                );
                0
            }
        };

        let mut token = self.make_token_with(TokenKind::Number, lexeme);
        token.value = value;
        token
    }

    fn scan_operator_or_delimiter(&mut self) -> Token {
        let b = self.advance();
        let kind = match b {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'=' => TokenKind::Eq,
            b'<' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::Le
                } else if self.peek() == b'>' {
                    self.advance();
                    TokenKind::Ne
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b':' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            b'&' => TokenKind::Ampersand,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Period,
            _ => TokenKind::Unknown,
        };
        self.make_token(kind)
    }

    /// Greedily consume a run of illegal characters and report one
    /// diagnostic covering the whole run, so a stretch of mojibake
    /// produces a single error instead of one per byte.
    fn scan_unknown(&mut self, diag: &mut Diagnostics) -> Token {
        loop {
            let b = self.peek();
            if b == 0
                || b.is_ascii_alphanumeric()
                || b.is_ascii_whitespace()
                || is_punct_start(b)
                || b == b'{'
            {
                break;
            }
            // Consume one whole UTF-8 character.
            for _ in 0..text::char_len(b) {
                if self.advance() == 0 {
                    break;
                }
            }
        }

        let lexeme = self.lexeme();
        let length = text::char_count(&lexeme) as u32;
        diag.error(
            format!("illegal character sequence: '{}'", lexeme),
            self.token_line,
            self.token_column,
            length,
        );

        self.make_token_with(TokenKind::Unknown, lexeme)
    }

    // ------------------------------------------------------------------
    // Token creation
    // ------------------------------------------------------------------

    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.lexeme();
        self.make_token_with(kind, lexeme)
    }

    fn make_token_with(&self, kind: TokenKind, lexeme: String) -> Token {
        let length = text::char_count(&lexeme) as u32;
        Token::new(kind, lexeme, self.token_line, self.token_column, length)
    }
}

/// Bytes that can begin a valid operator or delimiter.
fn is_punct_start(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-'
            | b'*'
            | b'/'
            | b'='
            | b'<'
            | b'>'
            | b':'
            | b'('
            | b')'
            | b'['
            | b']'
            | b','
            | b';'
            | b'.'
            | b'&'
    )
}
