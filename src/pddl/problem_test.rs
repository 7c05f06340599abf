use super::*;

pub const SAMPLE_PROBLEM: &str = "
(define (problem blocks-4-0)
  (:domain blocksworld)
  (:objects b1 b2 b3 b4 - block)
  (:init
    (clear b1)
    (clear b4)
    (ontable b2)
    (ontable b3)
    (on b1 b2)
    (on b4 b3)
    (arm-empty)
  )
  (:goal (and (on b1 b2) (on b2 b3) (on b3 b4)))
)
";

#[test]
fn check_if_problem() {
    assert!(Problem::is_problem("(define (problem p1"));
}

#[test]
fn check_if_not_problem() {
    assert!(!Problem::is_problem("(define (domain d"));
    assert!(!Problem::is_problem("problem"));
}

#[test]
fn parse_problem_name() -> Result<(), ParseError> {
    let prob = Problem::parse(
        "(define (problem foo)
           (:domain bar)
           (:init)
           (:goal (and)))",
    )?;

    assert_eq!(prob.name, "foo");
    assert_eq!(prob.domain_name, "bar");
    assert!(prob.init.is_empty());
    assert_eq!(prob.goal.as_deref(), Some("( and )"));
    Ok(())
}

#[test]
fn parse_sample_problem() -> Result<(), ParseError> {
    let prob = parse_problem(SAMPLE_PROBLEM)?;

    assert_eq!(prob.name, "blocks-4-0");
    assert_eq!(prob.domain_name, "blocksworld");
    assert_eq!(prob.objects.len(), 4);
    assert!(prob.objects.iter().all(|o| o.ty.as_deref() == Some("block")));
    assert_eq!(
        prob.objects.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
        vec!["b1", "b2", "b3", "b4"]
    );
    assert_eq!(prob.init.len(), 7);
    assert_eq!(prob.init[0], "( clear b1 )");
    assert_eq!(prob.init[6], "( arm-empty )");
    assert_eq!(
        prob.goal.as_deref(),
        Some("( and ( on b1 b2 ) ( on b2 b3 ) ( on b3 b4 ) )")
    );
    assert_eq!(prob.raw_source, SAMPLE_PROBLEM);
    Ok(())
}

#[test]
fn mixed_object_types() -> Result<(), ParseError> {
    let prob = Problem::parse(
        "(define (problem p)
           (:domain d)
           (:objects t1 t2 - truck home - place loose))",
    )?;

    let objects: Vec<(&str, Option<&str>)> = prob
        .objects
        .iter()
        .map(|o| (o.name.as_str(), o.ty.as_deref()))
        .collect();
    assert_eq!(
        objects,
        vec![
            ("t1", Some("truck")),
            ("t2", Some("truck")),
            ("home", Some("place")),
            ("loose", None),
        ]
    );
    Ok(())
}

#[test]
fn missing_sections_are_empty() -> Result<(), ParseError> {
    let prob = Problem::parse("(define (problem p))")?;

    assert_eq!(prob.domain_name, "");
    assert!(prob.objects.is_empty());
    assert!(prob.init.is_empty());
    assert_eq!(prob.goal, None);
    Ok(())
}

#[test]
fn skips_unknown_sections() -> Result<(), ParseError> {
    let prob = Problem::parse(
        "(define (problem p)
           (:domain d)
           (:metric minimize (total-cost))
           (:goal (done)))",
    )?;

    assert_eq!(prob.goal.as_deref(), Some("( done )"));
    Ok(())
}

#[test]
fn init_facts_keep_negations_whole() -> Result<(), ParseError> {
    let prob = Problem::parse("(define (problem p) (:init (not (at a)) (at b)))")?;

    assert_eq!(prob.init, vec!["( not ( at a ) )", "( at b )"]);
    Ok(())
}

#[test]
fn goal_must_be_parenthesized() {
    let e = Problem::parse("(define (problem p) (:goal done))").unwrap_err();

    assert_eq!(e.have, "done");
    assert_eq!(e.expect, vec![")".to_string()]);
}

#[test]
fn domain_reference_needs_a_name() {
    let e = Problem::parse("(define (problem p) (:domain))").unwrap_err();

    assert_eq!(e.have, ")");
    assert_eq!(e.expect, vec!["name".to_string()]);
}

#[test]
fn domain_is_not_a_problem() {
    let e = Problem::parse("(define (domain d))").unwrap_err();

    assert_eq!(e.have, "domain");
    assert_eq!(e.expect, vec!["problem".to_string()]);
}
