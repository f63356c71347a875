use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::error::LexError;
use super::token::{Position, Token, TokenKind};

// -- Lexemes ----------------------------------------------------------------

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn whitespace<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_whitespace()).parse_next(input)
}

fn punctuation(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
        '['.value(TokenKind::LBracket),
        ']'.value(TokenKind::RBracket),
        ','.value(TokenKind::Comma),
    ))
    .parse_next(input)
}

/// Content between double quotes, verbatim. No escape sequences.
fn string_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| is_word_char(c)).parse_next(input)
}

// -- Driver -----------------------------------------------------------------

struct Scanner<'i> {
    input: &'i str,
    pos: Position,
    tokens: Vec<Token>,
}

impl<'i> Scanner<'i> {
    fn new(input: &'i str) -> Self {
        Self {
            input,
            pos: Position::start(),
            tokens: Vec::new(),
        }
    }

    /// Run one lexeme parser and advance the line/column cursor over
    /// whatever it consumed.
    fn step<O>(
        &mut self,
        mut lexeme: impl Parser<&'i str, O, ErrMode<ContextError>>,
    ) -> ModalResult<O> {
        let before = self.input;
        let out = lexeme.parse_next(&mut self.input)?;
        self.pos.advance(&before[..before.len() - self.input.len()]);
        Ok(out)
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.input.chars().next() {
            let start = self.pos;
            let unexpected = LexError::UnexpectedChar {
                ch,
                line: start.line,
                column: start.column,
            };

            match ch {
                c if c.is_whitespace() => {
                    self.step(whitespace).map_err(|_| unexpected)?;
                }
                '"' => {
                    let content = self.step(string_literal).map_err(|_| {
                        LexError::UnterminatedString {
                            line: start.line,
                            column: start.column,
                        }
                    })?;
                    self.tokens
                        .push(Token::new(TokenKind::String, content, start));
                }
                '(' | ')' | '[' | ']' | ',' => {
                    let kind = self.step(punctuation).map_err(|_| unexpected)?;
                    self.tokens.push(Token::new(kind, ch.to_string(), start));
                }
                c if is_word_char(c) => {
                    let text = self.step(word).map_err(|_| unexpected)?;
                    let kind = TokenKind::keyword(&text.to_ascii_lowercase())
                        .unwrap_or(TokenKind::Ident);
                    self.tokens.push(Token::new(kind, text, start));
                }
                _ => return Err(unexpected),
            }
        }

        self.tokens.push(Token::eof(self.pos));
        Ok(self.tokens)
    }
}

pub(crate) fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(input).run()
}
