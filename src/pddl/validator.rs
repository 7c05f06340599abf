//! Structural and semantic checks over parsed domains and problems.
//!
//! Validation never fails: every problem found becomes an `Issue`.  A
//! `ValidationResult` is valid exactly when none of its issues is an error.

use std::{collections::HashSet, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use super::{parse_domain, parse_problem, reqs::Requirement, types::Types, Domain, Problem};

/// Heads of parenthesized expressions that are logical connectives rather
/// than predicate applications.
const CONNECTIVES: [&str; 7] = ["and", "or", "not", "forall", "exists", "when", "imply"];

static PREDICATE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*([a-zA-Z][a-zA-Z0-9_-]*)").expect("predicate reference pattern compiles")
});

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Issue` is a single finding of a validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    /// Where the issue is, e.g. `action:pick-up` or `predicate:on`.
    pub location: Option<String>,
}

/// `ValidationResult` collects the issues of validating one document.
/// Validity is derived from the issues and cannot be set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<Issue>,
}

impl ValidationResult {
    /// `is_valid` returns true if no issue is an error.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// `with_severity` returns the issues of severity `s`.
    pub fn with_severity(&self, s: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == s)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.with_severity(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add(&mut self, severity: Severity, message: impl Into<String>, location: Option<String>) {
        self.issues.push(Issue {
            severity,
            message: message.into(),
            location,
        });
    }

    pub fn add_error(&mut self, message: impl Into<String>, location: Option<String>) {
        self.add(Severity::Error, message, location)
    }

    pub fn add_warning(&mut self, message: impl Into<String>, location: Option<String>) {
        self.add(Severity::Warning, message, location)
    }

    pub fn add_info(&mut self, message: impl Into<String>, location: Option<String>) {
        self.add(Severity::Info, message, location)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationResult", 2)?;
        s.serialize_field("valid", &self.is_valid())?;
        s.serialize_field("issues", &self.issues)?;
        s.end()
    }
}

/// `predicate_references` returns every name that directly follows a left
/// paren in `expr`, other than the logical connectives.
///
/// This is a textual heuristic, not a formula parser: the heads of
/// `forall`/`exists` variable lists and of equality or numeric terms are
/// reported as well, and names that do not start with an ASCII letter are
/// missed.
pub fn predicate_references(expr: &str) -> impl Iterator<Item = &str> {
    PREDICATE_REF
        .captures_iter(expr)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|name| !CONNECTIVES.iter().any(|k| name.eq_ignore_ascii_case(k)))
}

/// `check_predicate_references` warns about every reference in `expr`
/// that is not one of `known`.
fn check_predicate_references(
    expr: &str,
    known: &HashSet<&str>,
    location: &str,
    result: &mut ValidationResult,
) {
    for name in predicate_references(expr) {
        if !known.contains(name) {
            result.add_warning(
                format!("Possibly undefined predicate '{}' used in {}", name, location),
                Some(location.to_string()),
            );
        }
    }
}

/// `validate_domain` runs every domain check against `domain`.
pub fn validate_domain(domain: &Domain) -> ValidationResult {
    let mut result = ValidationResult::default();

    if domain.name.is_empty() {
        result.add_error("Domain must have a name", None);
    }

    let types = Types::from_decls(&domain.types);

    check_predicates(domain, &types, &mut result);
    check_actions(domain, &types, &mut result);
    check_common_issues(domain, &mut result);

    for name in types.circular() {
        result.add_warning(
            format!("Type '{}' has circular inheritance", name),
            Some(format!("type:{}", name)),
        );
    }

    log::debug!(
        "validated domain {}: {} errors, {} warnings",
        domain.name,
        result.error_count(),
        result.warning_count()
    );
    result
}

fn check_predicates(domain: &Domain, types: &Types, result: &mut ValidationResult) {
    let mut seen: HashSet<&str> = HashSet::new();

    for pred in &domain.predicates {
        let location = format!("predicate:{}", pred.name);

        if !seen.insert(&pred.name) {
            result.add_error(
                format!("Duplicate predicate definition: {}", pred.name),
                Some(location.clone()),
            );
        }

        for p in &pred.parameters {
            if let Some(ty) = &p.ty {
                if !types.is_declared(ty) {
                    result.add_error(
                        format!("Predicate '{}' uses undefined type: {}", pred.name, ty),
                        Some(location.clone()),
                    );
                }
            }
            if !p.name.starts_with('?') {
                result.add_warning(
                    format!(
                        "Predicate '{}' parameter '{}' should start with '?'",
                        pred.name, p.name
                    ),
                    Some(location.clone()),
                );
            }
        }
    }
}

fn check_actions(domain: &Domain, types: &Types, result: &mut ValidationResult) {
    let predicates: HashSet<&str> = domain.predicates.iter().map(|p| p.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for action in &domain.actions {
        let location = format!("action:{}", action.name);

        if !seen.insert(&action.name) {
            result.add_error(
                format!("Duplicate action definition: {}", action.name),
                Some(location.clone()),
            );
        }

        let mut params: HashSet<&str> = HashSet::new();
        for p in &action.parameters {
            if let Some(ty) = &p.ty {
                if !types.is_declared(ty) {
                    result.add_error(
                        format!("Action '{}' uses undefined type: {}", action.name, ty),
                        Some(location.clone()),
                    );
                }
            }
            if !params.insert(&p.name) {
                result.add_error(
                    format!("Action '{}' has duplicate parameter: {}", action.name, p.name),
                    Some(location.clone()),
                );
            }
        }

        if action.precondition.is_none() {
            result.add_warning(
                format!("Action '{}' has no precondition", action.name),
                Some(location.clone()),
            );
        }
        if action.effect.is_none() {
            result.add_warning(
                format!("Action '{}' has no effect", action.name),
                Some(location.clone()),
            );
        }

        if let Some(pre) = &action.precondition {
            let loc = format!("{}:precondition", location);
            check_predicate_references(pre, &predicates, &loc, result);
        }
        if let Some(eff) = &action.effect {
            let loc = format!("{}:effect", location);
            check_predicate_references(eff, &predicates, &loc, result);
        }
    }
}

fn check_common_issues(domain: &Domain, result: &mut ValidationResult) {
    let has_typing = domain.has_requirement(Requirement::Typing);
    let uses_types = !domain.types.is_empty()
        || domain
            .predicates
            .iter()
            .any(|p| p.parameters.iter().any(|param| param.ty.is_some()));

    if uses_types && !has_typing {
        result.add_warning("Domain uses types but :typing requirement is not declared", None);
    }
    if has_typing && !uses_types {
        result.add_info(":typing requirement declared but no types are used", None);
    }

    if domain.predicates.is_empty() {
        result.add_warning("Domain has no predicates defined", None);
    }
    if domain.actions.is_empty() {
        result.add_warning("Domain has no actions defined", None);
    }
}

/// `validate_problem` runs every problem check against `problem`, and
/// cross-validates it against `domain` when one is given.
pub fn validate_problem(problem: &Problem, domain: Option<&Domain>) -> ValidationResult {
    let mut result = ValidationResult::default();

    if problem.name.is_empty() {
        result.add_error("Problem must have a name", None);
    }
    if problem.domain_name.is_empty() {
        result.add_error("Problem must reference a domain", None);
    }

    match domain {
        Some(dom) => check_against_domain(problem, dom, &mut result),
        None => result.add_info("Domain not provided, skipping cross-validation", None),
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for obj in &problem.objects {
        if !seen.insert(&obj.name) {
            result.add_error(
                format!("Duplicate object definition: {}", obj.name),
                Some(format!("object:{}", obj.name)),
            );
        }
    }

    if problem.goal.is_none() {
        result.add_warning("Problem has no goal defined", None);
    }

    log::debug!(
        "validated problem {}: {} errors, {} warnings",
        problem.name,
        result.error_count(),
        result.warning_count()
    );
    result
}

fn check_against_domain(problem: &Problem, domain: &Domain, result: &mut ValidationResult) {
    if problem.domain_name != domain.name {
        result.add_error(
            format!(
                "Domain name mismatch: problem references domain '{}' but validating against '{}'",
                problem.domain_name, domain.name
            ),
            None,
        );
    }

    let types = Types::from_decls(&domain.types);
    for obj in &problem.objects {
        if let Some(ty) = &obj.ty {
            if !types.is_declared(ty) {
                result.add_error(
                    format!("Object '{}' has undefined type: {}", obj.name, ty),
                    Some(format!("object:{}", obj.name)),
                );
            }
        }
    }

    let predicates: HashSet<&str> = domain.predicates.iter().map(|p| p.name.as_str()).collect();
    for fact in &problem.init {
        check_predicate_references(fact, &predicates, "init", result);
    }
    if let Some(goal) = &problem.goal {
        check_predicate_references(goal, &predicates, "goal", result);
    }
}

/// `validate_domain_string` parses and validates the domain in `text`.  A
/// parse failure becomes a single error issue.
pub fn validate_domain_string(text: &str) -> ValidationResult {
    match parse_domain(text) {
        Ok(domain) => validate_domain(&domain),
        Err(e) => {
            let mut result = ValidationResult::default();
            result.add_error(format!("Parse error: {}", e), None);
            result
        }
    }
}

/// `validate_problem_string` parses and validates the problem in `text`,
/// cross-validating it against `domain_text` when given.  A domain that
/// fails to parse only produces a warning and the problem is validated
/// without it.
pub fn validate_problem_string(text: &str, domain_text: Option<&str>) -> ValidationResult {
    let problem = match parse_problem(text) {
        Ok(p) => p,
        Err(e) => {
            let mut result = ValidationResult::default();
            result.add_error(format!("Parse error: {}", e), None);
            return result;
        }
    };

    let mut domain_warning = None;
    let domain = match domain_text.filter(|t| !t.is_empty()).map(parse_domain) {
        Some(Ok(d)) => Some(d),
        Some(Err(e)) => {
            domain_warning = Some(format!("Could not parse domain: {}", e));
            None
        }
        None => None,
    };

    let mut result = validate_problem(&problem, domain.as_ref());
    if let Some(w) = domain_warning {
        result.add_warning(w, None);
    }
    result
}
