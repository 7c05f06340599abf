use std::fmt;

use super::scanner::Keyword;

/// `Requirement` represents one of the requirement flags the scanner
/// recognizes within a `:requirements` section of a PDDL domain.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Requirement {
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
}

impl Requirement {
    /// `from_keyword` returns the `Requirement` equivalent of the scanned
    /// keyword `kw`, if there is one.
    pub fn from_keyword(kw: Keyword) -> Option<Requirement> {
        match kw {
            Keyword::Strips => Some(Requirement::Strips),
            Keyword::Typing => Some(Requirement::Typing),
            Keyword::Equality => Some(Requirement::Equality),
            Keyword::NegativePreconditions => Some(Requirement::NegativePreconditions),
            Keyword::DisjunctivePreconditions => Some(Requirement::DisjunctivePreconditions),
            Keyword::ExistentialPreconditions => Some(Requirement::ExistentialPreconditions),
            Keyword::UniversalPreconditions => Some(Requirement::UniversalPreconditions),
            Keyword::QuantifiedPreconditions => Some(Requirement::QuantifiedPreconditions),
            Keyword::ConditionalEffects => Some(Requirement::ConditionalEffects),
            Keyword::Fluents => Some(Requirement::Fluents),
            Keyword::Adl => Some(Requirement::Adl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Requirement::Strips => ":strips",
            Requirement::Typing => ":typing",
            Requirement::Equality => ":equality",
            Requirement::NegativePreconditions => ":negative-preconditions",
            Requirement::DisjunctivePreconditions => ":disjunctive-preconditions",
            Requirement::ExistentialPreconditions => ":existential-preconditions",
            Requirement::UniversalPreconditions => ":universal-preconditions",
            Requirement::QuantifiedPreconditions => ":quantified-preconditions",
            Requirement::ConditionalEffects => ":conditional-effects",
            Requirement::Fluents => ":fluents",
            Requirement::Adl => ":adl",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
