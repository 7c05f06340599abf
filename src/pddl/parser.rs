use thiserror::Error;

use super::{
    reqs::Requirement,
    scanner::{Keyword, Token, TokenType},
    Action, Domain, Object, Param, Predicate, Problem, TypeDecl,
};

/// `Parser` is a recursive descent parser over the tokens of a single PDDL
/// document.  It is the cursor of one parse: create a new one per parse
/// call rather than sharing one between threads or documents.
pub struct Parser<'a> {
    pub src: &'a str,        // Original source that was scanned.
    pub tokens: &'a [Token], // Scanned tokens to be parsed.
    pub tokpos: usize,       // Current index into `tokens`.
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, tokens: &'a [Token]) -> Self {
        Parser {
            src,
            tokens,
            tokpos: 0,
        }
    }

    /// `domain` parses a complete `(define (domain NAME) ...)` form.
    /// Sections other than `:requirements`, `:types`, `:predicates` and
    /// `:action` are skipped.
    pub fn domain(&mut self) -> Result<Domain, ParseError> {
        self.consume(TokenType::LParen)?;
        self.keyword(Keyword::Define)?;
        self.consume(TokenType::LParen)?;
        self.keyword(Keyword::Domain)?;

        let mut dom = Domain {
            name: self.name()?,
            ..Domain::default()
        };
        self.consume(TokenType::RParen)?;

        while self.peek().what != TokenType::RParen {
            self.consume(TokenType::LParen)?;

            if self.next_is(TokenType::Keyword(Keyword::Requirements)) {
                dom.requirements = self.requirements();
            } else if self.next_is(TokenType::Keyword(Keyword::Types)) {
                dom.types = self.typed_list(TokenType::Name, |name, parent| TypeDecl {
                    name: name.to_string(),
                    parent: parent.map(str::to_string),
                })?;
            } else if self.next_is(TokenType::Keyword(Keyword::Predicates)) {
                dom.predicates = self.predicates()?;
            } else if self.next_is(TokenType::Keyword(Keyword::Action)) {
                dom.actions.push(self.action()?);
            } else {
                self.skip_section();
            }

            self.consume(TokenType::RParen)?;
        }

        self.consume(TokenType::RParen)?;
        Ok(dom)
    }

    /// `problem` parses a complete `(define (problem NAME) ...)` form.
    /// Sections other than `:domain`, `:objects`, `:init` and `:goal` are
    /// skipped.
    pub fn problem(&mut self) -> Result<Problem, ParseError> {
        self.consume(TokenType::LParen)?;
        self.keyword(Keyword::Define)?;
        self.consume(TokenType::LParen)?;
        self.keyword(Keyword::Problem)?;

        let mut prob = Problem {
            name: self.name()?,
            ..Problem::default()
        };
        self.consume(TokenType::RParen)?;

        while self.peek().what != TokenType::RParen {
            self.consume(TokenType::LParen)?;

            if self.next_is(TokenType::Keyword(Keyword::DomainRef)) {
                prob.domain_name = self.name()?;
            } else if self.next_is(TokenType::Keyword(Keyword::Objects)) {
                prob.objects = self.typed_list(TokenType::Name, |name, ty| Object {
                    name: name.to_string(),
                    ty: ty.map(str::to_string),
                })?;
            } else if self.next_is(TokenType::Keyword(Keyword::Init)) {
                prob.init.clear();
                while self.peek().what == TokenType::LParen {
                    prob.init.push(self.expression());
                }
            } else if self.next_is(TokenType::Keyword(Keyword::Goal)) {
                prob.goal = self.optional_expression();
            } else {
                self.skip_section();
            }

            self.consume(TokenType::RParen)?;
        }

        self.consume(TokenType::RParen)?;
        Ok(prob)
    }

    /// `peek` returns the next token without consuming it.  Past the end of
    /// the stream an end of input token is returned, so callers never have
    /// to deal with a missing token.
    fn peek(&self) -> Token {
        match self.tokens.get(self.tokpos) {
            Some(&t) => t,
            None => {
                let (line, col) = self.tokens.last().map_or((1, 1), |t| (t.line, t.col));
                Token {
                    what: TokenType::Eof,
                    pos: self.src.len(),
                    end: self.src.len(),
                    col,
                    line,
                }
            }
        }
    }

    /// `next_is` consumes the next token if it has a `TokenType` of `what`
    /// and reports whether it did.
    fn next_is(&mut self, what: TokenType) -> bool {
        if self.peek().what == what {
            self.tokpos += 1;
            true
        } else {
            false
        }
    }

    /// `expect` returns a `ParseError` for the next token where `expect`
    /// are the expected values at the time of parse.
    fn expect(&self, expect: &[&str]) -> ParseError {
        let t = self.peek();
        ParseError::expect(t.line, t.col, t.describe(self.src), expect)
    }

    /// `consume` consumes and returns the next token whose `TokenType` is
    /// is equal to `what`. If that is not the case then a `ParseError` is
    /// returned that expects `what`.
    fn consume(&mut self, what: TokenType) -> Result<Token, ParseError> {
        let tok = self.peek();
        if tok.what != what {
            return Err(self.expect(&[what.as_str()]));
        }
        self.tokpos += 1;
        Ok(tok)
    }

    /// `keyword` consumes the next token if it is the keyword `kw`.
    fn keyword(&mut self, kw: Keyword) -> Result<Token, ParseError> {
        self.consume(TokenType::Keyword(kw))
    }

    /// `name` consumes a name token and returns its text.
    fn name(&mut self) -> Result<String, ParseError> {
        let src = self.src;
        Ok(self.consume(TokenType::Name)?.to_str(src).to_string())
    }

    /// `skip_section` consumes tokens until the parenthesis that closes the
    /// current section, which is left unconsumed.  Initially the count is
    /// one since the section's left paren has already been consumed.
    fn skip_section(&mut self) {
        let mut depth = 1;

        loop {
            match self.peek().what {
                TokenType::Eof => return,
                TokenType::LParen => depth += 1,
                TokenType::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => (),
            }
            self.tokpos += 1;
        }
    }

    /// `requirements` collects the keyword tokens of the `:requirements`
    /// section.  Anything else ends the list.
    fn requirements(&mut self) -> Vec<String> {
        let mut reqs = vec![];

        while let TokenType::Keyword(kw) = self.peek().what {
            let s = kw.as_str();
            if !s.starts_with(':') {
                break;
            }
            if Requirement::from_keyword(kw).is_none() {
                log::debug!("{} listed within :requirements", s);
            }
            reqs.push(s.to_string());
            self.tokpos += 1;
        }
        reqs
    }

    /// `typed_list` parses a list of `item` tokens where a `- TYPE` suffix
    /// applies to every item accumulated since the previous one (e.g.
    /// `?x ?y - block ?z`).  Items left without a type get `None`.  `make`
    /// builds an entry from an item's text and its type.  The list ends at
    /// the first token that is neither an item nor a dash.
    fn typed_list<T, F>(&mut self, item: TokenType, make: F) -> Result<Vec<T>, ParseError>
    where
        F: Fn(&str, Option<&str>) -> T,
    {
        let src = self.src;
        let mut list: Vec<T> = vec![];
        let mut pending: Vec<&str> = vec![];

        loop {
            let tok = self.peek();

            if tok.what == item {
                pending.push(tok.to_str(src));
                self.tokpos += 1;
            } else if tok.what == TokenType::Dash {
                self.tokpos += 1;
                let ty = self.consume(TokenType::Name)?.to_str(src);
                list.extend(pending.drain(..).map(|s| make(s, Some(ty))));
            } else {
                break;
            }
        }

        list.extend(pending.into_iter().map(|s| make(s, None)));
        Ok(list)
    }

    /// `parameters` parses the variables of a predicate declaration or an
    /// action's `:parameters`.
    fn parameters(&mut self) -> Result<Vec<Param>, ParseError> {
        self.typed_list(TokenType::Variable, Param::new)
    }

    /// `predicates` parses the `(NAME params...)` entries of the
    /// `:predicates` section.
    fn predicates(&mut self) -> Result<Vec<Predicate>, ParseError> {
        let mut preds = vec![];

        while self.next_is(TokenType::LParen) {
            let name = self.name()?;
            let parameters = self.parameters()?;
            self.consume(TokenType::RParen)?;
            preds.push(Predicate { name, parameters });
        }
        Ok(preds)
    }

    /// `action` parses an `:action` definition up to, but not including,
    /// its closing paren.  The fields may come in any order and the first
    /// unrecognized one ends the definition.
    fn action(&mut self) -> Result<Action, ParseError> {
        let mut action = Action {
            name: self.name()?,
            ..Action::default()
        };

        loop {
            if self.next_is(TokenType::Keyword(Keyword::Parameters)) {
                self.consume(TokenType::LParen)?;
                action.parameters = self.parameters()?;
                self.consume(TokenType::RParen)?;
            } else if self.next_is(TokenType::Keyword(Keyword::Precondition)) {
                action.precondition = self.optional_expression();
            } else if self.next_is(TokenType::Keyword(Keyword::Effect)) {
                action.effect = self.optional_expression();
            } else {
                return Ok(action);
            }
        }
    }

    /// `expression` captures the parenthesized expression that begins at
    /// the next token as space-joined token text, consuming exactly that
    /// expression.  Returns an empty string, consuming nothing, if the
    /// next token is not a left paren.
    fn expression(&mut self) -> String {
        let src = self.src;
        let mut parts: Vec<&str> = vec![];
        let mut depth = 0;

        if self.peek().what != TokenType::LParen {
            return String::new();
        }

        loop {
            let tok = self.peek();
            match tok.what {
                TokenType::Eof => break,
                TokenType::LParen => depth += 1,
                TokenType::RParen => depth -= 1,
                _ => (),
            }
            parts.push(tok.to_str(src));
            self.tokpos += 1;
            if depth == 0 {
                break;
            }
        }
        parts.join(" ")
    }

    /// `optional_expression` is `expression` where nothing captured means
    /// the value is absent.
    fn optional_expression(&mut self) -> Option<String> {
        Some(self.expression()).filter(|s| !s.is_empty())
    }
}

/// `ParseError` is the error returned from parsing a PDDL domain or
/// problem.  It is fatal to the parse that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expecting {}, found {have} at line {line}, column {col}", one_of(.expect))]
pub struct ParseError {
    /// Text of the token that was found, or `end of input`.
    pub have: String,
    /// What the parser would have accepted instead.
    pub expect: Vec<String>,
    /// The line number the error occurred on.
    pub line: usize,
    /// The column number the error occurred on.
    pub col: usize,
}

impl ParseError {
    /// `expect` returns a `ParseError` for an error that occurred
    /// on line, `line`, column, `col`, and has a value of `have` where
    /// `expect` are the expected values at the time of parse.
    pub fn expect(line: usize, col: usize, have: &str, expect: &[&str]) -> Self {
        ParseError {
            have: have.to_string(),
            expect: expect.iter().map(|s| s.to_string()).collect(),
            line,
            col,
        }
    }
}

/// `one_of` renders `expect` as `a` or as `either a, b, or c`.
fn one_of(expect: &[String]) -> String {
    match expect {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("either {}, or {}", init.join(", "), last),
    }
}
