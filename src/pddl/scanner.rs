use std::{collections::HashMap, fmt, iter::Iterator, str::CharIndices};

/// `scan` builds a `Scanner`, scans `src` for every possible token and
/// terminates the stream with a `TokenType::Eof` token.  Comments are
/// dropped from the returned tokens.
pub fn scan(src: &str) -> Vec<Token> {
    let mut sc = Scanner::new(src);
    let mut tokens: Vec<Token> = sc.by_ref().filter(|t| t.what != TokenType::Comment).collect();

    tokens.push(Token {
        what: TokenType::Eof,
        pos: src.len(),
        end: src.len(),
        col: sc.col,
        line: sc.line,
    });
    log::trace!("scanned {} tokens from {} bytes", tokens.len(), src.len());
    tokens
}

/// `Scanner` that recognizes PDDL tokens.
///
/// `Scanner` works off some source contents and the returned tokens refer
/// to positions within that source.  This means that no strings are created
/// or copied -- everything is based off the positions of the `Scanner`'s
/// source.
///
/// The scanner never fails.  Characters that cannot begin a token (digits,
/// punctuation, stray symbols) are skipped silently and it is left to the
/// parser to reject whatever malformed token sequence results.
pub struct Scanner<'a> {
    next: Option<(usize, char)>, // Next character extracted from source but not yet consumed.
    chars: CharIndices<'a>,      // Iterator over source.
    col: usize,                  // Current column tokenized within source.
    line: usize,                 // Current line tokenized within source.
    keywords: HashMap<&'static str, Keyword>, // Mapping of PDDL keywords to their Keyword equivilant.
    src: &'a str,                             // The source contents to be scanned.
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        let keywords = Keyword::ALL.iter().map(|&k| (k.as_str(), k)).collect();

        Scanner {
            next: None,
            chars: src.char_indices(),
            col: 1,
            line: 1,
            keywords,
            src,
        }
    }

    /// `bump` pulls the next character, either the one put back by a
    /// previous lookahead or a fresh one from the source.
    fn bump(&mut self) -> Option<(usize, char)> {
        self.next.take().or_else(|| self.chars.next())
    }

    /// `peek` returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        if self.next.is_none() {
            self.next = self.chars.next();
        }
        self.next.map(|(_, ch)| ch)
    }

    /// `single` simply returns a Token whose TokenType is `what` while also
    /// incrementing the column number of the Scanner.
    fn single(&mut self, what: TokenType, pos: usize) -> Token {
        let col = self.col;
        self.col += 1;
        Token {
            what,
            pos,
            end: pos + 1,
            col,
            line: self.line,
        }
    }

    /// `comment` continues scanning until a newline (i.e. "\n") is encountered,
    /// which is not consumed by the scanner.
    fn comment(&mut self, start: usize) -> Token {
        let col = self.col;
        let mut end = start + 1;

        self.col += 1;
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
            self.col += 1;
            end += ch.len_utf8();
        }
        Token {
            what: TokenType::Comment,
            pos: start,
            end,
            col,
            line: self.line,
        }
    }

    /// `run` consumes characters after the already scanned first character
    /// for as long as `accept` holds and returns the position one past the
    /// last consumed character.
    fn run<F>(&mut self, start: usize, first: char, accept: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let mut end = start + first.len_utf8();

        self.col += 1;
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            self.bump();
            self.col += 1;
            end += ch.len_utf8();
        }
        end
    }

    /// `variable` returns a Token for a `?` prefixed run of letters, digits,
    /// '?', '_' or '-' characters.  The `?` is part of the token.
    fn variable(&mut self, start: usize, first: char) -> Token {
        let col = self.col;
        let end = self.run(start, first, |ch| {
            ch.is_alphanumeric() || ch == '?' || ch == '_' || ch == '-'
        });
        Token {
            what: TokenType::Variable,
            pos: start,
            end,
            col,
            line: self.line,
        }
    }

    /// `ident` returns a Token that represents either a keyword or a legal
    /// PDDL name, which is text that begins with a letter, ':' or '-' and is
    /// followed by zero or more letters, digits, ':', '_' or '-' characters.
    /// Keywords are matched without regard to case.
    fn ident(&mut self, start: usize, first: char) -> Token {
        let col = self.col;
        let end = self.run(start, first, |ch| {
            ch.is_alphanumeric() || ch == ':' || ch == '_' || ch == '-'
        });
        let text = self.src[start..end].to_lowercase();
        let what = match self.keywords.get(text.as_str()) {
            Some(&kw) => TokenType::Keyword(kw),
            None => TokenType::Name,
        };
        Token {
            what,
            pos: start,
            end,
            col,
            line: self.line,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (pos, ch) = self.bump()?;

            if ch == '\n' {
                self.col = 1;
                self.line += 1;
            } else if ch.is_whitespace() {
                self.col += 1;
            } else if ch == '(' {
                return Some(self.single(TokenType::LParen, pos));
            } else if ch == ')' {
                return Some(self.single(TokenType::RParen, pos));
            } else if ch == ';' {
                return Some(self.comment(pos));
            } else if ch == '-' && self.peek().map_or(true, char::is_whitespace) {
                // A standalone dash ascribes a type; otherwise it starts a name.
                return Some(self.single(TokenType::Dash, pos));
            } else if ch == '?' {
                return Some(self.variable(pos, ch));
            } else if ch.is_alphabetic() || ch == ':' || ch == '-' {
                return Some(self.ident(pos, ch));
            } else {
                self.col += 1;
            }
        }
    }
}

/// Token is primary object that is returned from calling `scan`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token {
    /// What type of token this one is.
    pub what: TokenType,
    /// Position of where the token was found from scanner's source contents.
    pub pos: usize,
    /// Position that is one past the last character of the scanned token.  If
    /// the token is one character in length then `end = pos + 1`.
    pub end: usize,
    /// Column number of where the token was found.
    pub col: usize,
    /// Line number of where the token was found.
    pub line: usize,
}

impl<'a> Token {
    /// `to_str` returns the text of the scanned token.  `src` should be the
    /// exact source contents that was passed to `scan`.  Keywords are
    /// returned in their lowercase form and names keep their original case.
    pub fn to_str(self, src: &'a str) -> &'a str {
        match self.what {
            TokenType::Keyword(kw) => kw.as_str(),
            TokenType::Eof => "",
            _ => &src[self.pos..self.end],
        }
    }

    /// `describe` is like `to_str` but names the end of input so that it
    /// reads well within an error message.
    pub fn describe(self, src: &'a str) -> &'a str {
        if self.what == TokenType::Eof {
            "end of input"
        } else {
            self.to_str(src)
        }
    }
}

/// TokenType specifies what kind of token was scanned.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    LParen,
    RParen,
    Keyword(Keyword),
    Name,
    Variable,
    Dash,
    Comment,
    Eof,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::Keyword(kw) => kw.as_str(),
            TokenType::Name => "name",
            TokenType::Variable => "variable",
            TokenType::Dash => "-",
            TokenType::Comment => "comment",
            TokenType::Eof => "end of input",
        }
    }

    /// `kind` names the category of the token irrespective of which keyword
    /// it may be.
    pub fn kind(self) -> &'static str {
        match self {
            TokenType::LParen => "lparen",
            TokenType::RParen => "rparen",
            TokenType::Keyword(_) => "keyword",
            TokenType::Name => "name",
            TokenType::Variable => "variable",
            TokenType::Dash => "dash",
            TokenType::Comment => "comment",
            TokenType::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Keyword` is every reserved word the scanner recognizes.  Anything else
/// that looks like an identifier is scanned as a `TokenType::Name`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Keyword {
    Define,
    Domain,
    Problem,
    Requirements,
    Types,
    Predicates,
    Action,
    Parameters,
    Precondition,
    Effect,
    Objects,
    Init,
    Goal,
    DomainRef,
    Strips,
    Typing,
    Equality,
    NegativePreconditions,
    DisjunctivePreconditions,
    ExistentialPreconditions,
    UniversalPreconditions,
    QuantifiedPreconditions,
    ConditionalEffects,
    Fluents,
    Adl,
    And,
    Or,
    Not,
    Forall,
    Exists,
    When,
}

impl Keyword {
    pub const ALL: [Keyword; 31] = [
        Keyword::Define,
        Keyword::Domain,
        Keyword::Problem,
        Keyword::Requirements,
        Keyword::Types,
        Keyword::Predicates,
        Keyword::Action,
        Keyword::Parameters,
        Keyword::Precondition,
        Keyword::Effect,
        Keyword::Objects,
        Keyword::Init,
        Keyword::Goal,
        Keyword::DomainRef,
        Keyword::Strips,
        Keyword::Typing,
        Keyword::Equality,
        Keyword::NegativePreconditions,
        Keyword::DisjunctivePreconditions,
        Keyword::ExistentialPreconditions,
        Keyword::UniversalPreconditions,
        Keyword::QuantifiedPreconditions,
        Keyword::ConditionalEffects,
        Keyword::Fluents,
        Keyword::Adl,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::Forall,
        Keyword::Exists,
        Keyword::When,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::Domain => "domain",
            Keyword::Problem => "problem",
            Keyword::Requirements => ":requirements",
            Keyword::Types => ":types",
            Keyword::Predicates => ":predicates",
            Keyword::Action => ":action",
            Keyword::Parameters => ":parameters",
            Keyword::Precondition => ":precondition",
            Keyword::Effect => ":effect",
            Keyword::Objects => ":objects",
            Keyword::Init => ":init",
            Keyword::Goal => ":goal",
            Keyword::DomainRef => ":domain",
            Keyword::Strips => ":strips",
            Keyword::Typing => ":typing",
            Keyword::Equality => ":equality",
            Keyword::NegativePreconditions => ":negative-preconditions",
            Keyword::DisjunctivePreconditions => ":disjunctive-preconditions",
            Keyword::ExistentialPreconditions => ":existential-preconditions",
            Keyword::UniversalPreconditions => ":universal-preconditions",
            Keyword::QuantifiedPreconditions => ":quantified-preconditions",
            Keyword::ConditionalEffects => ":conditional-effects",
            Keyword::Fluents => ":fluents",
            Keyword::Adl => ":adl",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
            Keyword::Forall => "forall",
            Keyword::Exists => "exists",
            Keyword::When => "when",
        }
    }
}
