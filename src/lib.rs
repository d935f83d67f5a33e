#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping, first-class functions, closures, classes and methods. Rocks is a tree-walk
//! interpreter with a hand-written recursive descent parser. Rocks is a hobby project and is not
//! intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a single forward pass over the
//! characters in the source code using maximal-munch.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scan errors are reported as soon as they are encountered. This means that the scanner will
//! continue scanning the source code even if it has already encountered a syntax error. This is
//! useful because it allows the user to fix multiple syntax errors at once.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically
//! an [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of
//! code that do not produce a value but instead perform some action. These actions modify the state
//! of the program and thus, are called side-effects. For example, a variable declaration or an if
//! clause would be classified as statements.
//!
//! For example, the string `print 1 + 2;` would be converted into the following AST:
//! ```text
//! PrintStatement {
//!     BinaryExpression {
//!         left: Number(1),
//!         operator: Plus,
//!         right: Number(2),
//!     }
//! }
//! ```
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. For example, the
//! following expression is invalid because it is missing the right-hand operand:
//! ```text
//! 1 !=
//! ```
//! However, much like the scanner, the parser will continue parsing the source code even if it
//! has already encountered a syntax error using a technique called synchronization. This is useful
//! because it allows the user to fix multiple syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexical scoping. The resolver is implemented in the
//! [`resolver`](resolver) module. The resolver is run after the parser because it requires the AST
//! to be fully constructed. The resolver reports errors as a [`ResolveError`](error::ResolveError).
//! These errors are syntactically valid but semantically invalid, and therefore cannot be caught by
//! the scanner or the parser. For example, the following expression is valid Rocks syntax but it is
//! semantically invalid because the variable `a` is defined twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the AST and
//! produce a result. The interpreter reports errors as a [`RuntimeError`](error::RuntimeError). While
//! the scanner, the parser and the resolver try to catch as many errors as possible before running
//! the code, most errors can only be caught at runtime. For example, the following expression is
//! valid Rocks syntax but it is semantically invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a parent
//! chain of scopes mapping names to values, implemented in the [`environment`](environment) module.
//! This allows the interpreter to implement lexical scoping and closures.

use std::cell::Cell;
use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use substring::Substring;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

const HISTORY_FILE: &str = ".rocks_history";

/// Owns the interpreter and the two process-wide flags that decide the
/// file-mode exit code: one error occurrence per run is enough to skip
/// remaining stages and, in file mode, pick 65 (syntax/resolution) or 70
/// (runtime) over 0. A single `Driver` reused across `run` calls is what
/// lets a REPL session's global bindings persist across lines.
pub struct Driver<'out> {
    interpreter: Interpreter<'out>,
    had_error: Cell<bool>,
    had_runtime_error: Cell<bool>,
}

impl<'out> Driver<'out> {
    pub fn new(out: &'out mut dyn Write) -> Self {
        Driver {
            interpreter: Interpreter::new(out),
            had_error: Cell::new(false),
            had_runtime_error: Cell::new(false),
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error.get()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error.get()
    }

    /// Reads and runs a whole file, then exits the process: 65 if scanning,
    /// parsing or resolution ever failed, 70 if evaluation raised a runtime
    /// error, 0 otherwise.
    pub fn run_file(&mut self, path: &str) {
        let contents = fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Could not read file '{path}': {err}");
            process::exit(64);
        });

        self.run(&contents);

        if self.had_error.get() {
            process::exit(65);
        }
        if self.had_runtime_error.get() {
            process::exit(70);
        }
    }

    /// Runs an interactive prompt with line editing and persistent history
    /// (`rustyline`), loading and saving the history file under the user's
    /// home directory (`home`). A syntax error on one line does not poison
    /// the session, `had_error` is reset after every line, but a runtime
    /// error's flag is intentionally left set, even though the prompt never
    /// exits with a status code so it has no visible effect beyond what the
    /// REPL already printed.
    pub fn run_prompt(&mut self) {
        let history_path = home::home_dir().map(|dir| dir.join(HISTORY_FILE));

        let mut editor = DefaultEditor::new().expect("readline editor to initialize");
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    // rustyline already strips the trailing newline; trim a
                    // stray '\r' some backends still leave on the line.
                    let trimmed_len = line.trim_end_matches('\r').len();
                    self.run(line.substring(0, trimmed_len));

                    self.had_error.set(false);
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Readline error: {err}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        if scanner.had_error() {
            self.had_error.set(true);
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        if parser.had_error() {
            self.had_error.set(true);
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);
        if resolver.had_error() {
            self.had_error.set(true);
            return;
        }

        if self.interpreter.interpret(&statements) {
            self.had_runtime_error.set(true);
        }
    }
}
