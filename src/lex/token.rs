use std::fmt;

/// Every token the rule language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    Folder,
    Priority,
    When,
    Then,

    // Logic
    And,
    Or,
    Not,
    In,
    Contains,

    // Field shorthands
    Sender,
    Subject,
    Body,

    // Action starters
    Move,
    Remove,
    Notify,
    Call,
    Remind,
    Mark,
    Auto,

    // Connectives
    To,
    From,
    As,
    Read,
    Unread,

    // Literals
    String,
    Ident,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    Eof,
}

impl TokenKind {
    /// Look up a lower-cased word in the keyword table.
    #[must_use]
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "folder" => TokenKind::Folder,
            "priority" => TokenKind::Priority,
            "when" => TokenKind::When,
            "then" => TokenKind::Then,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "in" => TokenKind::In,
            "contains" => TokenKind::Contains,
            "sender" => TokenKind::Sender,
            "subject" => TokenKind::Subject,
            "body" => TokenKind::Body,
            "move" => TokenKind::Move,
            "remove" => TokenKind::Remove,
            "notify" => TokenKind::Notify,
            "call" => TokenKind::Call,
            "remind" => TokenKind::Remind,
            "mark" => TokenKind::Mark,
            "auto" => TokenKind::Auto,
            "to" => TokenKind::To,
            "from" => TokenKind::From,
            "as" => TokenKind::As,
            "read" => TokenKind::Read,
            "unread" => TokenKind::Unread,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether tokens of this kind are spelled as a bare word
    /// (an identifier or any keyword).
    #[must_use]
    pub fn is_word(self) -> bool {
        !matches!(
            self,
            TokenKind::String
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::Eof
        )
    }

    /// Whether this kind is a keyword from the fixed table.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        self.is_word() && self != TokenKind::Ident
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Folder => "'folder'",
            TokenKind::Priority => "'priority'",
            TokenKind::When => "'when'",
            TokenKind::Then => "'then'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::In => "'in'",
            TokenKind::Contains => "'contains'",
            TokenKind::Sender => "'sender'",
            TokenKind::Subject => "'subject'",
            TokenKind::Body => "'body'",
            TokenKind::Move => "'move'",
            TokenKind::Remove => "'remove'",
            TokenKind::Notify => "'notify'",
            TokenKind::Call => "'call'",
            TokenKind::Remind => "'remind'",
            TokenKind::Mark => "'mark'",
            TokenKind::Auto => "'auto'",
            TokenKind::To => "'to'",
            TokenKind::From => "'from'",
            TokenKind::As => "'as'",
            TokenKind::Read => "'read'",
            TokenKind::Unread => "'unread'",
            TokenKind::String => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// A 1-based line/column location in rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Move past `consumed`, counting newlines.
    pub(crate) fn advance(&mut self, consumed: &str) {
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A typed token with the position of its first character.
///
/// `text` holds the source spelling: original case for words, the content
/// between the quotes for string literals, the symbol for punctuation and
/// `None` for the trailing [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>, at: Position) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            line: at.line,
            column: at.column,
        }
    }

    pub(crate) fn eof(at: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: None,
            line: at.line,
            column: at.column,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// The token text, or `""` for end of input.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.text) {
            (TokenKind::Eof, _) | (_, None) => write!(f, "{}", self.kind),
            (TokenKind::String, Some(text)) => write!(f, "\"{text}\""),
            (_, Some(text)) => write!(f, "'{text}'"),
        }
    }
}
