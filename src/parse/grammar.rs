use crate::lex::{Token, TokenKind};
use crate::{Action, Condition, Folder, Pattern, Program, Rule};

use super::error::ParseError;
use super::parser::Parser;

type PResult<T> = Result<T, ParseError>;

// -- Literals ---------------------------------------------------------------

/// A folder or move/remove target: bare identifier or quoted string.
fn target(p: &mut Parser<'_>, expected: &str) -> PResult<String> {
    match p.kind() {
        TokenKind::Ident | TokenKind::String => match p.advance() {
            Some(token) => Ok(token.text().to_owned()),
            None => Err(p.error(expected)),
        },
        _ => Err(p.error(expected)),
    }
}

fn string(p: &mut Parser<'_>, expected: &str) -> PResult<String> {
    Ok(p.expect(TokenKind::String, expected)?.text().to_owned())
}

/// `"[" String ("," String)* "]"`
fn string_list(p: &mut Parser<'_>) -> PResult<Vec<String>> {
    p.expect(TokenKind::LBracket, "'['")?;
    let mut values = vec![string(p, "string in list")?];
    while p.eat(TokenKind::Comma) {
        values.push(string(p, "string in list")?);
    }
    p.expect(TokenKind::RBracket, "']'")?;
    Ok(values)
}

// -- Conditions (precedence: OR < AND < NOT < primary) ----------------------

/// Any word names a field. Keywords (`sender`, `priority`, `from`, ...) are
/// canonicalized to lowercase; identifiers keep their spelling.
fn field_name(p: &mut Parser<'_>) -> PResult<String> {
    let kind = p.kind();
    if !kind.is_word() {
        return Err(p.error("field name (sender, subject, body or a custom field)"));
    }
    let Some(token) = p.advance() else {
        return Err(p.error("field name"));
    };
    if kind.is_keyword() {
        Ok(token.text().to_ascii_lowercase())
    } else {
        Ok(token.text().to_owned())
    }
}

fn predicate(p: &mut Parser<'_>) -> PResult<Condition> {
    let field = field_name(p)?;

    if p.eat(TokenKind::Contains) {
        let pattern = if p.check(TokenKind::LBracket) {
            Pattern::Any(string_list(p)?)
        } else {
            Pattern::One(string(p, "string literal or list after 'contains'")?)
        };
        return Ok(Condition::Contains { field, pattern });
    }

    if p.eat(TokenKind::In) {
        let values = if p.check(TokenKind::LBracket) {
            string_list(p)?
        } else {
            vec![string(p, "string literal or list after 'in'")?]
        };
        return Ok(Condition::In { field, values });
    }

    Err(p.error(format!("'contains' or 'in' after field '{field}'")))
}

/// Deepest condition the parser accepts: open groups and `NOT`s on the way
/// down, operator levels in the finished tree.
pub(crate) const MAX_NESTING: usize = 128;

/// A parsed condition and the number of operator levels above its leaves.
type Nested = (Condition, usize);

fn too_deep(p: &Parser<'_>, at: Option<&Token>) -> ParseError {
    let expected = format!("condition nested at most {MAX_NESTING} deep");
    match at {
        Some(token) => ParseError::at(token, expected),
        None => p.error(expected),
    }
}

fn primary(p: &mut Parser<'_>, depth: usize) -> PResult<Nested> {
    if p.check(TokenKind::LParen) {
        if depth >= MAX_NESTING {
            return Err(too_deep(p, p.current()));
        }
        p.advance();
        let inner = or_expr(p, depth + 1)?;
        p.expect(TokenKind::RParen, "')'")?;
        return Ok(inner);
    }
    Ok((predicate(p)?, 0))
}

fn unary(p: &mut Parser<'_>, depth: usize) -> PResult<Nested> {
    if p.check(TokenKind::Not) {
        if depth >= MAX_NESTING {
            return Err(too_deep(p, p.current()));
        }
        p.advance();
        let (inner, height) = unary(p, depth + 1)?;
        return Ok((Condition::Not(Box::new(inner)), height + 1));
    }
    primary(p, depth)
}

/// Left-associative chain of `next` joined by `op`.
fn chain(
    p: &mut Parser<'_>,
    depth: usize,
    op: TokenKind,
    next: fn(&mut Parser<'_>, usize) -> PResult<Nested>,
    join: fn(Box<Condition>, Box<Condition>) -> Condition,
) -> PResult<Nested> {
    let (mut left, mut height) = next(p, depth)?;
    while p.check(op) {
        let at = p.advance();
        let (right, right_height) = next(p, depth)?;
        height = height.max(right_height) + 1;
        if height > MAX_NESTING {
            return Err(too_deep(p, at));
        }
        left = join(Box::new(left), Box::new(right));
    }
    Ok((left, height))
}

fn and_expr(p: &mut Parser<'_>, depth: usize) -> PResult<Nested> {
    chain(p, depth, TokenKind::And, unary, Condition::And)
}

fn or_expr(p: &mut Parser<'_>, depth: usize) -> PResult<Nested> {
    chain(p, depth, TokenKind::Or, and_expr, Condition::Or)
}

fn condition(p: &mut Parser<'_>) -> PResult<Condition> {
    Ok(or_expr(p, 0)?.0)
}

// -- Actions ----------------------------------------------------------------

const FOLDER_NAME: &str = "folder name (identifier or string)";

fn action(p: &mut Parser<'_>) -> PResult<Action> {
    let kind = p.kind();
    let simple = match kind {
        TokenKind::Notify => Some(Action::Notify),
        TokenKind::Call => Some(Action::Call),
        TokenKind::Remind => Some(Action::Remind),
        TokenKind::Auto => Some(Action::Auto),
        _ => None,
    };
    if let Some(action) = simple {
        p.advance();
        return Ok(action);
    }

    match kind {
        TokenKind::Move => {
            p.advance();
            p.expect(TokenKind::To, "'to' after 'move'")?;
            Ok(Action::Move {
                target: target(p, FOLDER_NAME)?,
            })
        }
        TokenKind::Remove => {
            p.advance();
            p.expect(TokenKind::From, "'from' after 'remove'")?;
            Ok(Action::Remove {
                target: target(p, FOLDER_NAME)?,
            })
        }
        TokenKind::Mark => {
            p.advance();
            p.expect(TokenKind::As, "'as' after 'mark'")?;
            if p.eat(TokenKind::Read) {
                Ok(Action::MarkRead)
            } else if p.eat(TokenKind::Unread) {
                Ok(Action::MarkUnread)
            } else {
                Err(p.error("'read' or 'unread' after 'mark as'"))
            }
        }
        _ => Err(p.error("action (move, remove, notify, call, remind, mark or auto)")),
    }
}

fn actions(p: &mut Parser<'_>) -> PResult<Vec<Action>> {
    let mut list = vec![action(p)?];
    while p.eat(TokenKind::And) {
        list.push(action(p)?);
    }
    Ok(list)
}

// -- Declarations -----------------------------------------------------------

fn when_clause(p: &mut Parser<'_>) -> PResult<Rule> {
    p.expect(TokenKind::When, "'when'")?;
    let condition = condition(p)?;
    p.expect(TokenKind::Then, "'then'")?;
    let actions = actions(p)?;
    Ok(Rule { condition, actions })
}

fn priority_value(p: &mut Parser<'_>) -> PResult<i64> {
    let token = p.expect(TokenKind::Ident, "priority value")?;
    token
        .text()
        .parse::<i64>()
        .map_err(|_| ParseError::at(token, "integer priority value"))
}

fn folder_decl(p: &mut Parser<'_>) -> PResult<Folder> {
    p.expect(TokenKind::Folder, "'folder'")?;
    let name = target(p, FOLDER_NAME)?;

    let priority = if p.eat(TokenKind::Priority) {
        priority_value(p)?
    } else {
        0
    };

    if !p.check(TokenKind::When) {
        return Err(p.error(format!("at least one 'when' rule in folder '{name}'")));
    }
    let mut rules = Vec::new();
    while p.check(TokenKind::When) {
        rules.push(when_clause(p)?);
    }

    Ok(Folder {
        name,
        priority,
        rules,
    })
}

// -- Top-level parser -------------------------------------------------------

pub(crate) fn program(p: &mut Parser<'_>) -> PResult<Program> {
    let mut folders = Vec::new();
    while !p.check(TokenKind::Eof) {
        if !p.check(TokenKind::Folder) {
            return Err(p.error("'folder' declaration"));
        }
        folders.push(folder_decl(p)?);
    }
    Ok(Program { folders })
}
