pub mod scanner;
pub mod types;
pub mod validator;

mod parser;
mod reqs;

#[cfg(test)]
mod problem_test;

#[cfg(test)]
mod test;


use self::scanner::{Keyword, Scanner, TokenType};

pub use self::{
    parser::{ParseError, Parser},
    reqs::Requirement,
    validator::{
        validate_domain, validate_domain_string, validate_problem, validate_problem_string, Issue,
        Severity, ValidationResult,
    },
};

use serde::{Deserialize, Serialize};

/// `parse_domain` scans and parses `src` into a `Domain`.
pub fn parse_domain(src: &str) -> Result<Domain, ParseError> {
    Domain::parse(src)
}

/// `parse_problem` scans and parses `src` into a `Problem`.
pub fn parse_problem(src: &str) -> Result<Problem, ParseError> {
    Problem::parse(src)
}

/// `Domain` represents the final output from parsing the contents
/// representing some PDDL domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// The parsed domain name.
    pub name: String,
    /// Requirement flags in lowercase form (e.g. `:typing`).
    pub requirements: Vec<String>,
    /// Declared `:types` in declaration order.
    pub types: Vec<TypeDecl>,
    /// Declared `:predicates` in declaration order.  Duplicates are kept.
    pub predicates: Vec<Predicate>,
    /// Parsed `(:action ...)` definitions.  Duplicates are kept.
    pub actions: Vec<Action>,
    /// The source text the domain was parsed from.
    #[serde(default)]
    pub raw_source: String,
}

impl Domain {
    /// `is_domain` return true if `src` represents a PDDL domain.
    /// Only the first few tokens of `src` is parsed to make this
    /// determination.
    pub fn is_domain(src: &str) -> bool {
        header_is(src, Keyword::Domain)
    }

    /// `parse` returns the domain represented by the PDDL within `src`.
    /// Returns a `ParseError` at the first syntax error encountered; there
    /// is no partial result.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let tokens = scanner::scan(src);
        let mut dom = Parser::new(src, &tokens).domain()?;

        dom.raw_source = src.to_string();
        log::debug!(
            "parsed domain {}: {} types, {} predicates, {} actions",
            dom.name,
            dom.types.len(),
            dom.predicates.len(),
            dom.actions.len()
        );
        Ok(dom)
    }

    /// `has_requirement` returns true if this `Domain` lists the requirement
    /// `r`.  Implied requirements (e.g. `:adl` implying `:typing`) are not
    /// expanded.
    pub fn has_requirement(&self, r: Requirement) -> bool {
        self.requirements.iter().any(|s| s == r.as_str())
    }
}

/// `TypeDecl` is a single entry of the `:types` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Type this one derives from.  `None` means it derives from `object`.
    pub parent: Option<String>,
}

/// `Param` is a parsed parameter that can be found within a predicate
/// declaration or an action's `:parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// The ascribed type, if any.  An untyped parameter is compatible with
    /// every type.
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

impl Param {
    pub fn new(name: &str, ty: Option<&str>) -> Self {
        Param {
            name: name.to_string(),
            ty: ty.map(str::to_string),
        }
    }
}

/// `Predicate` represents a predicate definition that is found
/// within the `:predicates` section of a PDDL domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Predicate's name as written.
    pub name: String,
    /// Predicate's parameters.
    pub parameters: Vec<Param>,
}

/// `Action` is a basic PDDL action that is declared within a domain
/// description.  The precondition and effect are kept as flattened,
/// space-joined text rather than as formula trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action's name as written.
    pub name: String,
    /// Parameters of the action.
    pub parameters: Vec<Param>,
    /// Possible precondition of the action (e.g. `( clear ?x )`).
    pub precondition: Option<String>,
    /// Possible effect of the action.
    pub effect: Option<String>,
}

/// `Object` is an entry of a problem's `:objects` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

/// `Problem` represents the final output from parsing a PDDL problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// The parsed problem name.
    pub name: String,
    /// Name of the domain given by `(:domain ...)`.  Empty if missing.
    pub domain_name: String,
    pub objects: Vec<Object>,
    /// Initial facts, one flattened expression per fact.
    pub init: Vec<String>,
    pub goal: Option<String>,
    /// The source text the problem was parsed from.
    #[serde(default)]
    pub raw_source: String,
}

impl Problem {
    /// `is_problem` return true if `src` represents a PDDL problem.
    /// Only the first few tokens of `src` is parsed to make this
    /// determination.
    pub fn is_problem(src: &str) -> bool {
        header_is(src, Keyword::Problem)
    }

    /// `parse` returns the problem represented by the PDDL within `src`.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let tokens = scanner::scan(src);
        let mut prob = Parser::new(src, &tokens).problem()?;

        prob.raw_source = src.to_string();
        log::debug!(
            "parsed problem {} for domain {}: {} objects, {} init facts",
            prob.name,
            prob.domain_name,
            prob.objects.len(),
            prob.init.len()
        );
        Ok(prob)
    }
}

/// `header_is` returns true if `src` begins with `(define (<what>`.
fn header_is(src: &str, what: Keyword) -> bool {
    let mut lex = Scanner::new(src).filter(|t| t.what != TokenType::Comment);

    lex.next()
        .filter(|t| t.what == TokenType::LParen)
        .and_then(|_| lex.next())
        .filter(|t| t.what == TokenType::Keyword(Keyword::Define))
        .and_then(|_| lex.next())
        .filter(|t| t.what == TokenType::LParen)
        .and_then(|_| lex.next())
        .filter(|t| t.what == TokenType::Keyword(what))
        .is_some()
}
