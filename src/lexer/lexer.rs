use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    limits::ParserLimits,
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Shared, immutable pattern table. Order is significant: longer
    // operators sit above their single-character prefixes (maximal munch),
    // and the version pattern sits above the plain natural so `1.2.3`
    // lexes as one token.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"//.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"(?s)/\*.*?\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"/\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new(r"[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"[0-9]+(\.[0-9]+){0,2}").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r#""[^"]*""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r#"""#).unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new(r"\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..") },
        RegexPattern { regex: Regex::new(r"\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new(r"\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new("-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new(r"\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: String,
    pos: i32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            errors: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: i32) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn error(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    fn span_from(&self, start: i32, end: i32) -> Span {
        Span {
            start: Position(start as u32, Rc::clone(&self.file)),
            end: Position(end as u32, Rc::clone(&self.file)),
        }
    }

    // Skips to the next whitespace boundary so lexing can continue after a
    // bad character.
    fn synchronize(&mut self) {
        while !self.at_eof() && !self.at().is_whitespace() {
            self.advance_n(self.at().len_utf8() as i32);
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as i32);
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.pos;
    let end = lexer.pos + matched.len() as i32;

    if matched.contains('.') {
        let span = lexer.span_from(start, end);
        lexer.push(MK_TOKEN!(TokenKind::Version, matched.clone(), span));
    } else {
        // A bare digit run is a natural, and naturals reject leading zeros.
        if matched.len() > 1 && matched.starts_with('0') {
            let span = lexer.span_from(start, end);
            lexer.error(Error::new(
                ErrorImpl::LeadingZero {
                    token: matched.clone(),
                },
                span,
            ));
        }
        let span = lexer.span_from(start, end);
        lexer.push(MK_TOKEN!(TokenKind::Natural, matched.clone(), span));
    }

    lexer.advance_n(matched.len() as i32);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let full_len = matched.len() as i32;

    // Content between the quotes is taken verbatim, no escape processing.
    let literal = matched[1..matched.len() - 1].to_string();
    let span = lexer.span_from(lexer.pos, lexer.pos + full_len);

    lexer.push(MK_TOKEN!(TokenKind::String, literal, span));
    lexer.advance_n(full_len);
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.pos;
    let rest = lexer.remainder();
    let line_end = rest.find('\n').unwrap_or(rest.len()) as i32;

    let span = lexer.span_from(start, start + line_end);
    lexer.error(Error::new(ErrorImpl::UnterminatedString, span));
    lexer.advance_n(line_end);
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.pos;
    let len = lexer.remainder().len() as i32;

    let span = lexer.span_from(start, start + len);
    lexer.error(Error::new(ErrorImpl::UnterminatedComment, span));
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.pos;
    let end = lexer.pos + value.len() as i32;
    let span = lexer.span_from(start, end);

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value.clone(), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value.clone(), span));
    }

    lexer.advance_n(value.len() as i32);
}

pub fn tokenize(source: String, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    tokenize_with_limits(source, file, &ParserLimits::default())
}

pub fn tokenize_with_limits(
    source: String,
    file: Option<String>,
    limits: &ParserLimits,
) -> (Vec<Token>, Vec<Error>) {
    let mut lex = Lexer::new(source, file);

    if lex.source.len() > limits.max_input_size {
        let span = lex.span_from(0, 0);
        lex.error(Error::new(
            ErrorImpl::InputTooLarge {
                size: lex.source.len(),
                limit: limits.max_input_size,
            },
            span,
        ));
        let eof_span = lex.span_from(0, 0);
        lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof_span));
        return (lex.tokens, lex.errors);
    }

    while !lex.at_eof() {
        if lex.tokens.len() >= limits.max_token_count {
            let span = lex.span_from(lex.pos, lex.pos);
            lex.error(Error::new(
                ErrorImpl::TokenLimitExceeded {
                    limit: limits.max_token_count,
                },
                span,
            ));
            break;
        }

        let mut matched = false;

        for pattern in PATTERNS.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let character = lex.at();
            let start = lex.pos;
            let span = lex.span_from(start, start + character.len_utf8() as i32);
            lex.error(Error::new(
                ErrorImpl::UnrecognisedCharacter { character },
                span,
            ));
            lex.synchronize();
        }
    }

    let eof_span = Span {
        start: lex.position(),
        end: lex.position(),
    };
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof_span));
    (lex.tokens, lex.errors)
}
