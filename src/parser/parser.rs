//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the public parse entry
//! points. Expression parsing uses a Pratt approach with NUD/LED handlers
//! and binding powers; statements and top-level elements are parsed by
//! specialized functions selected through lookup tables and one-token
//! lookahead.
//!
//! The parser maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! A parse session owns its token stream, cursor, and diagnostics; nothing
//! mutable is shared between sessions, so independent sources can be
//! parsed on independent threads.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::program::Program,
    errors::errors::{Diagnostic, Error, ErrorImpl},
    lexer::{
        lexer::tokenize_with_limits,
        tokens::{Token, TokenKind},
    },
    limits::ParserLimits,
    Position, Span,
};

use super::{
    cursor::{Checkpoint, TokenCursor},
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    program::parse_program,
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token cursor and the lookup tables for parsing
/// statements and expressions, plus the nesting-depth guard state.
pub struct Parser {
    /// Cursor over the token stream
    cursor: TokenCursor,
    /// The name of the source unit being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Resource limits for this parse session
    limits: ParserLimits,
    /// Current recursion depth, checked against the nesting limit
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance over a token stream.
    pub fn new(tokens: Vec<Token>, file: Rc<String>, limits: ParserLimits) -> Self {
        Parser {
            cursor: TokenCursor::new(tokens),
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            limits,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.cursor.current()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    /// Returns the token `offset` positions ahead without advancing.
    pub fn peek(&self, offset: usize) -> &Token {
        self.cursor.peek(offset)
    }

    /// Advances to the next token and returns the consumed token.
    pub fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    /// Records a restart point for limited backtracking.
    pub fn mark(&self) -> Checkpoint {
        self.cursor.mark()
    }

    /// Rewinds the cursor to a previously recorded restart point.
    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.cursor.reset(checkpoint)
    }

    /// Builds an UnexpectedToken error describing the current token
    /// against the kinds a production would have accepted.
    pub fn unexpected(&self, expected: Vec<TokenKind>) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected,
                found: token.value.clone(),
            },
            token.span.clone(),
        )
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// UnexpectedToken error naming the expected kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            Err(self.unexpected(vec![expected_kind]))
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.cursor.has_tokens()
    }

    /// End position of the most recently consumed token; used as the end
    /// of the node that just finished parsing.
    pub fn previous_token_end(&self) -> Position {
        self.cursor.previous().span.end.clone()
    }

    /// Builds the span of a node that started at `start` and ends at the
    /// most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_token_end(),
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Enters one level of recursion, failing with the fatal NestingTooDeep
    /// condition when the configured maximum is exceeded.
    pub fn enter_nested(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.limits.max_nesting_depth,
                },
                self.current_token().span.clone(),
            ));
        }
        Ok(())
    }

    /// Leaves one level of recursion.
    pub fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The name of the source unit being parsed.
    pub fn file(&self) -> &Rc<String> {
        &self.file
    }
}

/// Parses a source text into a syntax tree, using default limits.
///
/// This is the main entry point. The returned tree is best-effort: lex and
/// syntax errors are contained at statement and top-level-element
/// boundaries and reported through the diagnostics vector, with `Error`
/// placeholder elements marking the skipped regions. The only `Err` this
/// function produces is the fatal nesting-depth guard.
pub fn parse(source: &str, file: Option<String>) -> Result<(Program, Vec<Diagnostic>), Error> {
    parse_with_limits(source, file, ParserLimits::default())
}

/// Parses a source text with explicit resource limits.
pub fn parse_with_limits(
    source: &str,
    file: Option<String>,
    limits: ParserLimits,
) -> Result<(Program, Vec<Diagnostic>), Error> {
    let file_rc = Rc::new(file.unwrap_or_else(|| String::from("shell")));

    let (tokens, lex_errors) =
        tokenize_with_limits(source.to_string(), Some((*file_rc).clone()), &limits);

    let mut parser = Parser::new(tokens, Rc::clone(&file_rc), limits);
    create_token_lookups(&mut parser);

    let (program, parse_errors) = parse_program(&mut parser)?;

    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(Error::into_diagnostic)
        .collect();
    diagnostics.extend(parse_errors.into_iter().map(Error::into_diagnostic));

    Ok((program, diagnostics))
}
