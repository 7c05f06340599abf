//! Lexing, parsing and validation of PDDL domain and problem documents.
//!
//! The core lives in [`pddl`]: a scanner, a recursive descent parser that
//! produces [`pddl::Domain`] and [`pddl::Problem`] values, and validators
//! that report every structural or semantic problem found as a list of
//! issues.  [`report`] packages validation results for callers that
//! exchange them as data.

pub mod cli;
pub mod config;
pub mod output;
pub mod pddl;
pub mod report;
