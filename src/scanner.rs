use peekmore::{PeekMore, PeekMoreIterator};
use std::vec::IntoIter;

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

/// Single forward pass over the source using maximal-munch; never looks
/// ahead more than one character (two for fractional digits in numbers).
pub struct Scanner {
    chars: Vec<char>,
    source: PeekMoreIterator<IntoIter<char>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
    had_error: bool,
}

impl Scanner {
    pub fn new(source: &str) -> Scanner {
        let chars: Vec<char> = source.chars().collect();
        Scanner {
            source: chars.clone().into_iter().peekmore(),
            chars,
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
            had_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Scans the whole source and returns its tokens, always ending in EOF.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(
            Type::EOF,
            String::new(),
            None,
            Location::new(self.line, self.current - self.column_offset),
        ));

        std::mem::take(&mut self.tokens)
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance past end of source");
        self.current += 1;
        c
    }

    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(
            r#type,
            lexeme,
            literal,
            Location::new(self.line, self.start - self.column_offset),
        ));
    }

    fn error(&mut self, message: String) {
        ScanError { line: self.line, message }.report();
        self.had_error = true;
    }

    fn string(&mut self) {
        let start_line = self.line;

        let mut value = String::new();
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
                self.column_offset = self.current + 1;
            }
            value.push(self.advance());
        }

        if self.is_at_end() {
            self.line = start_line;
            self.error("Unterminated string.".to_string());
            return;
        }

        self.advance(); // closing quote

        let lexeme = self.source_slice();
        self.add_token(Type::String, lexeme, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // the dot

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = self.source_slice();
        let value: f64 = lexeme.parse().expect("scanned digits to parse as a number");
        self.add_token(Type::Number, lexeme, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.source_slice();
        let r#type = match lexeme.as_str() {
            "and" => Type::And,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(r#type, lexeme, None);
    }

    fn source_slice(&mut self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(Type::LeftParen, c.to_string(), None),
            ')' => self.add_token(Type::RightParen, c.to_string(), None),
            '{' => self.add_token(Type::LeftBrace, c.to_string(), None),
            '}' => self.add_token(Type::RightBrace, c.to_string(), None),
            ',' => self.add_token(Type::Comma, c.to_string(), None),
            '.' => self.add_token(Type::Dot, c.to_string(), None),
            '-' => self.add_token(Type::Minus, c.to_string(), None),
            '+' => self.add_token(Type::Plus, c.to_string(), None),
            ';' => self.add_token(Type::Semicolon, c.to_string(), None),
            '*' => self.add_token(Type::Star, c.to_string(), None),

            '!' => {
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), None);
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), None);
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(Type::Less, "<".to_string(), None);
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), None);
                }
            }
            '/' => {
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\r' | '\t' => {}

            '\n' => {
                self.line += 1;
                self.column_offset = self.current;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            c => self.error(format!("Unexpected character '{c}'.")),
        }
    }
}
