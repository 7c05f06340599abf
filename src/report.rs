//! Validation results packaged for exchange as data.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pddl::{validate_domain_string, validate_problem_string, Issue, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Domain PDDL cannot be empty")]
    EmptyDomain,
    #[error("Problem PDDL cannot be empty")]
    EmptyProblem,
}

/// `Report` is the outcome of validating a single domain or problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl From<ValidationResult> for Report {
    fn from(r: ValidationResult) -> Self {
        Report {
            valid: r.is_valid(),
            error_count: r.error_count(),
            warning_count: r.warning_count(),
            issues: r.issues().to_vec(),
        }
    }
}

/// `FullReport` is the outcome of validating a domain together with a
/// problem that is cross-validated against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReport {
    pub domain_valid: bool,
    pub problem_valid: bool,
    pub overall_valid: bool,
    pub domain_issues: Vec<Issue>,
    pub problem_issues: Vec<Issue>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl FullReport {
    pub fn new(domain: &ValidationResult, problem: &ValidationResult) -> Self {
        FullReport {
            domain_valid: domain.is_valid(),
            problem_valid: problem.is_valid(),
            overall_valid: domain.is_valid() && problem.is_valid(),
            domain_issues: domain.issues().to_vec(),
            problem_issues: problem.issues().to_vec(),
            total_errors: domain.error_count() + problem.error_count(),
            total_warnings: domain.warning_count() + problem.warning_count(),
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn validate_domain_report(domain: &str) -> Result<Report, ReportError> {
    if is_blank(domain) {
        return Err(ReportError::EmptyDomain);
    }
    Ok(validate_domain_string(domain).into())
}

/// `validate_problem_report` validates `problem`, cross-validating it
/// against `domain` when one is given.  A blank domain counts as none.
pub fn validate_problem_report(problem: &str, domain: Option<&str>) -> Result<Report, ReportError> {
    if is_blank(problem) {
        return Err(ReportError::EmptyProblem);
    }
    Ok(validate_problem_string(problem, domain.filter(|d| !is_blank(d))).into())
}

/// `validate_full` validates `domain` and validates `problem` against it.
/// The two validations run concurrently.
pub fn validate_full(domain: &str, problem: &str) -> Result<FullReport, ReportError> {
    if is_blank(domain) {
        return Err(ReportError::EmptyDomain);
    }
    if is_blank(problem) {
        return Err(ReportError::EmptyProblem);
    }

    let (dom, prob) = rayon::join(
        || validate_domain_string(domain),
        || validate_problem_string(problem, Some(domain)),
    );
    Ok(FullReport::new(&dom, &prob))
}

/// `validate_domains` validates every document in `domains` in parallel.
/// Results are in the same order as `domains`.
pub fn validate_domains<S>(domains: &[S]) -> Vec<ValidationResult>
where
    S: AsRef<str> + Sync,
{
    domains
        .par_iter()
        .map(|d| validate_domain_string(d.as_ref()))
        .collect()
}
