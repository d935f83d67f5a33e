use crate::token::{Token, Type};

/// Implemented by every diagnostic this crate can emit. `report` prints the
/// message to stderr in the fixed diagnostic format. It does not touch any
/// process-wide state. The caller (scanner/parser/resolver/interpreter) is
/// responsible for tracking whether it has seen an error, and the driver
/// aggregates that into the exit-code decision.
pub trait Error {
    fn report(&self);
}

/// An error raised while scanning raw source into tokens.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn report(&self) {
        eprintln!("[line {}] Error: {}", self.line, self.message);
    }
}

/// An error raised while building the statement tree out of tokens.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn report(&self) {
        let location = if self.token.r#type == Type::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.token.lexeme)
        };

        eprintln!("[line {}] Error{}: {}", self.token.location.line, location, self.message);
    }
}

/// An error raised during the static resolution pass.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn report(&self) {
        let location = if self.token.r#type == Type::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.token.lexeme)
        };

        eprintln!("[line {}] Error{}: {}", self.token.location.line, location, self.message);
    }
}

/// An error raised while evaluating the tree. Carries the offending token so
/// the line can be reported, and a fixed message. The exact strings are
/// part of the observable contract.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn report(&self) {
        eprintln!("{}\n[line {}]", self.message, self.token.location.line);
    }
}
