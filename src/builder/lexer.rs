/*!
The lexer for fact, formula, and model files.

The input languages are line-oriented: a newline ends a declaration, a fact, or a
formula, and so newlines are tokens rather than whitespace.
`//` begins a comment running to the end of the line.

Identifiers begin with a letter or underscore; `?` begins a variable.
The keywords `type`, `true`, `false`, `inf` (or `infinity`), and the disjunction symbol
`v` are carved out of the identifier space.
*/

use crate::types::err::{ParseError, ParseErrorKind};

/// The atoms of the input languages.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Variable(String),
    Number(u32),
    Float(f64),

    /// The infinite weight, `inf` or `infinity`.
    Infinity,

    True,
    False,

    /// The `type` keyword of preamble declarations.
    Type,

    /// The disjunction symbol, `v`.
    Or,

    At,
    Colon,
    Semicolon,
    Comma,
    Equals,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    Not,
    And,
    Implies,
    Diamond,
    Star,
    GreaterThan,
    LessThan,

    EndLine,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier {name:?}"),
            TokenKind::Variable(name) => write!(f, "variable ?{name}"),
            TokenKind::Number(n) => write!(f, "number {n}"),
            TokenKind::Float(x) => write!(f, "number {x}"),
            TokenKind::Infinity => write!(f, "inf"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Type => write!(f, "type"),
            TokenKind::Or => write!(f, "v"),
            TokenKind::At => write!(f, "@"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Equals => write!(f, "="),
            TokenKind::OpenParen => write!(f, "("),
            TokenKind::CloseParen => write!(f, ")"),
            TokenKind::OpenBracket => write!(f, "["),
            TokenKind::CloseBracket => write!(f, "]"),
            TokenKind::OpenBrace => write!(f, "{{"),
            TokenKind::CloseBrace => write!(f, "}}"),
            TokenKind::Not => write!(f, "!"),
            TokenKind::And => write!(f, "^"),
            TokenKind::Implies => write!(f, "->"),
            TokenKind::Diamond => write!(f, "<>"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::GreaterThan => write!(f, ">"),
            TokenKind::LessThan => write!(f, "<"),
            TokenKind::EndLine => write!(f, "end of line"),
        }
    }
}

/// A token and where it begins.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Splits the input into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();

    let mut index = 0_usize;
    let mut line = 1_usize;
    let mut column = 1_usize;

    while index < chars.len() {
        let c = chars[index];
        let token_line = line;
        let token_column = column;

        let mut push = |kind: TokenKind| {
            tokens.push(Token {
                kind,
                line: token_line,
                column: token_column,
            })
        };

        match c {
            '\n' => {
                push(TokenKind::EndLine);
                index += 1;
                line += 1;
                column = 1;
                continue;
            }

            ' ' | '\t' | '\r' => {
                index += 1;
                column += 1;
            }

            '/' => {
                if chars.get(index + 1) != Some(&'/') {
                    return Err(ParseError::new(
                        token_line,
                        token_column,
                        ParseErrorKind::UnexpectedCharacter('/'),
                    ));
                }
                // A comment runs to the end of the line; the newline itself is left
                // for the loop to tokenize.
                while index < chars.len() && chars[index] != '\n' {
                    index += 1;
                    column += 1;
                }
            }

            '-' => {
                if chars.get(index + 1) != Some(&'>') {
                    return Err(ParseError::new(
                        token_line,
                        token_column,
                        ParseErrorKind::UnexpectedCharacter('-'),
                    ));
                }
                push(TokenKind::Implies);
                index += 2;
                column += 2;
            }

            '<' => match chars.get(index + 1) {
                Some('>') => {
                    push(TokenKind::Diamond);
                    index += 2;
                    column += 2;
                }
                _ => {
                    push(TokenKind::LessThan);
                    index += 1;
                    column += 1;
                }
            },

            '?' => {
                let mut name = String::new();
                index += 1;
                column += 1;
                while index < chars.len() && (chars[index].is_alphanumeric() || chars[index] == '_')
                {
                    name.push(chars[index]);
                    index += 1;
                    column += 1;
                }
                push(TokenKind::Variable(name));
            }

            _ if c.is_ascii_digit() => {
                let mut text = String::new();
                while index < chars.len() && chars[index].is_ascii_digit() {
                    text.push(chars[index]);
                    index += 1;
                    column += 1;
                }

                let mut is_float = false;
                if chars.get(index) == Some(&'.') {
                    is_float = true;
                    text.push('.');
                    index += 1;
                    column += 1;
                    while index < chars.len() && chars[index].is_ascii_digit() {
                        text.push(chars[index]);
                        index += 1;
                        column += 1;
                    }
                }

                let kind = match is_float {
                    true => text
                        .parse::<f64>()
                        .map(TokenKind::Float)
                        .map_err(|_| ParseErrorKind::Number(text.clone())),
                    false => text
                        .parse::<u32>()
                        .map(TokenKind::Number)
                        .map_err(|_| ParseErrorKind::Number(text.clone())),
                };
                match kind {
                    Ok(kind) => push(kind),
                    Err(kind) => return Err(ParseError::new(token_line, token_column, kind)),
                }
            }

            _ if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while index < chars.len()
                    && (chars[index].is_alphanumeric()
                        || chars[index] == '_'
                        || chars[index] == '\'')
                {
                    name.push(chars[index]);
                    index += 1;
                    column += 1;
                }

                let kind = match name.as_str() {
                    "type" => TokenKind::Type,
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "inf" | "infinity" => TokenKind::Infinity,
                    "v" => TokenKind::Or,
                    _ => TokenKind::Ident(name),
                };
                push(kind);
            }

            _ => {
                let kind = match c {
                    '@' => TokenKind::At,
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semicolon,
                    ',' => TokenKind::Comma,
                    '=' => TokenKind::Equals,
                    '(' => TokenKind::OpenParen,
                    ')' => TokenKind::CloseParen,
                    '[' => TokenKind::OpenBracket,
                    ']' => TokenKind::CloseBracket,
                    '{' => TokenKind::OpenBrace,
                    '}' => TokenKind::CloseBrace,
                    '!' => TokenKind::Not,
                    '^' => TokenKind::And,
                    '*' => TokenKind::Star,
                    '>' => TokenKind::GreaterThan,
                    _ => {
                        return Err(ParseError::new(
                            token_line,
                            token_column,
                            ParseErrorKind::UnexpectedCharacter(c),
                        ));
                    }
                };
                push(kind);
                index += 1;
                column += 1;
            }
        }
    }

    Ok(tokens)
}

/// A cursor over a token sequence, with the expect/peek helpers the parsers share.
pub struct Cursor {
    tokens: Vec<Token>,
    index: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Cursor { tokens, index: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.index).map(|token| &token.kind)
    }

    /// The position of the current token, or of the end of input.
    pub fn position(&self) -> (usize, usize) {
        match self.tokens.get(self.index) {
            Some(token) => (token.line, token.column),
            None => self
                .tokens
                .last()
                .map_or((1, 1), |token| (token.line, token.column + 1)),
        }
    }

    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        let (line, column) = self.position();
        ParseError::new(line, column, kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Whether the current token matches `kind` exactly.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Consumes the current token when it matches `kind` exactly.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.check(kind) {
            true => {
                self.index += 1;
                true
            }
            false => false,
        }
    }

    /// Consumes the current token, which must match `kind` exactly.
    pub fn expect(&mut self, kind: &TokenKind, wanted: &'static str) -> Result<(), ParseError> {
        match self.check(kind) {
            true => {
                self.index += 1;
                Ok(())
            }
            false => Err(self.unexpected(wanted)),
        }
    }

    /// Consumes an identifier.
    ///
    /// A variable here is its own error: the grammar is restricted to ground formulas.
    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(TokenKind::Ident(_)) => match self.advance() {
                Some(Token {
                    kind: TokenKind::Ident(name),
                    ..
                }) => Ok(name),
                _ => unreachable!(),
            },
            Some(TokenKind::Variable(name)) => {
                let name = name.clone();
                Err(self.error(ParseErrorKind::Variable(name)))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Consumes a number.
    pub fn expect_number(&mut self) -> Result<u32, ParseError> {
        match self.peek() {
            Some(TokenKind::Number(n)) => {
                let n = *n;
                self.index += 1;
                Ok(n)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    /// An error noting what was wanted and what is here instead.
    pub fn unexpected(&self, wanted: &'static str) -> ParseError {
        let found = match self.peek() {
            Some(kind) => kind.to_string(),
            None => return self.error(ParseErrorKind::UnexpectedEnd),
        };
        self.error(ParseErrorKind::Expected(wanted, found))
    }
}
