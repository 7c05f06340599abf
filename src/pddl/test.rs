use super::*;

pub const SAMPLE_DOMAIN: &str = "
(define (domain blocksworld)
  (:requirements :strips :typing)
  (:types block)
  (:predicates
    (on ?x - block ?y - block)
    (ontable ?x - block)
    (clear ?x - block)
    (holding ?x - block)
    (arm-empty)
  )
  (:action pick-up
    :parameters (?x - block)
    :precondition (and (clear ?x) (ontable ?x) (arm-empty))
    :effect (and (holding ?x) (not (ontable ?x)) (not (clear ?x)) (not (arm-empty)))
  )
  (:action put-down
    :parameters (?x - block)
    :precondition (holding ?x)
    :effect (and (ontable ?x) (clear ?x) (arm-empty) (not (holding ?x)))
  )
)
";

#[test]
fn check_if_domain() {
    assert!(Domain::is_domain("(define (domain foo))"));
    assert!(Domain::is_domain("; leading comment\n(DEFINE (Domain foo))"));
}

#[test]
fn check_if_not_domain() {
    assert!(!Domain::is_domain("(define (problem foo-p1))"));
    assert!(!Domain::is_domain("(define"));
    assert!(!Domain::is_domain(""));
}

#[test]
fn parse_domain_name() -> Result<(), ParseError> {
    let dom = Domain::parse("(define (domain foo))")?;
    assert_eq!(dom.name, "foo");
    assert!(dom.requirements.is_empty());
    assert!(dom.actions.is_empty());
    Ok(())
}

#[test]
fn keeps_name_case() -> Result<(), ParseError> {
    let dom = Domain::parse("(Define (DOMAIN BlocksWorld))")?;
    assert_eq!(dom.name, "BlocksWorld");
    Ok(())
}

#[test]
fn unexpected_end_of_input() {
    match Domain::parse("(define (domain foo)") {
        Err(e) => {
            assert_eq!(e.have, "end of input");
            assert_eq!(e.expect, vec!["(".to_string()]);
        }
        Ok(d) => panic!("Expected error but received successful domain parse: {:?}", d),
    }
}

#[test]
fn truncated_header_is_an_error() {
    let e = Domain::parse("(define (domain test").unwrap_err();
    assert_eq!(e.have, "end of input");
    assert_eq!(e.expect, vec![")".to_string()]);
}

#[test]
fn missing_define_keyword() {
    let e = Domain::parse("(notdefine (domain test))").unwrap_err();
    assert_eq!(e.have, "notdefine");
    assert_eq!(e.expect, vec!["define".to_string()]);
    assert_eq!((e.line, e.col), (1, 2));
}

#[test]
fn problem_is_not_a_domain() {
    let e = Domain::parse("(define (problem p1))").unwrap_err();
    assert_eq!(e.have, "problem");
    assert_eq!(e.expect, vec!["domain".to_string()]);
}

#[test]
fn extra_input_is_ignored() -> Result<(), ParseError> {
    let dom = Domain::parse("(define (domain foo))) (junk")?;
    assert_eq!(dom.name, "foo");
    Ok(())
}

#[test]
fn error_reports_line_and_column() {
    let e = Domain::parse("(define (domain foo)\n  (:predicates (on ?x - ))\n)").unwrap_err();
    assert_eq!(e.have, ")");
    assert_eq!(e.expect, vec!["name".to_string()]);
    assert_eq!(e.line, 2);
    assert_eq!(e.col, 25);
    assert_eq!(
        e.to_string(),
        "Expecting name, found ) at line 2, column 25"
    );
}

#[test]
fn can_parse_requirements() -> Result<(), ParseError> {
    let d = Domain::parse(
        "(define (domain foo)
           (:requirements :strips
                          :TYPING
                          :equality
                          :negative-preconditions
                          :disjunctive-preconditions
                          :existential-preconditions
                          :universal-preconditions
                          :quantified-preconditions
                          :conditional-effects
                          :fluents
                          :adl
           ))",
    )?;
    assert_eq!(d.requirements.len(), 11);
    assert_eq!(d.requirements[1], ":typing");
    assert!(d.has_requirement(Requirement::Strips));
    assert!(d.has_requirement(Requirement::Typing));
    assert!(d.has_requirement(Requirement::Equality));
    assert!(d.has_requirement(Requirement::NegativePreconditions));
    assert!(d.has_requirement(Requirement::DisjunctivePreconditions));
    assert!(d.has_requirement(Requirement::ExistentialPreconditions));
    assert!(d.has_requirement(Requirement::UniversalPreconditions));
    assert!(d.has_requirement(Requirement::QuantifiedPreconditions));
    assert!(d.has_requirement(Requirement::ConditionalEffects));
    assert!(d.has_requirement(Requirement::Fluents));
    assert!(d.has_requirement(Requirement::Adl));
    Ok(())
}

#[test]
fn adl_does_not_imply_typing() -> Result<(), ParseError> {
    let d = Domain::parse("(define (domain foo) (:requirements :adl))")?;
    assert!(d.has_requirement(Requirement::Adl));
    assert!(!d.has_requirement(Requirement::Typing));
    Ok(())
}

#[test]
fn unknown_requirement_is_an_error() {
    let e = Domain::parse("(define (domain foo) (:requirements :strips :action-costs))").unwrap_err();
    assert_eq!(e.have, ":action-costs");
    assert_eq!(e.expect, vec![")".to_string()]);
}

#[test]
fn can_parse_types() -> Result<(), ParseError> {
    let d = Domain::parse(
        "(define (domain foo)
           (:types car truck - vehicle
                   vehicle - object
                   place))",
    )?;
    let expect = |name: &str, parent: Option<&str>| TypeDecl {
        name: name.to_string(),
        parent: parent.map(str::to_string),
    };

    assert_eq!(
        d.types,
        vec![
            expect("car", Some("vehicle")),
            expect("truck", Some("vehicle")),
            expect("vehicle", Some("object")),
            expect("place", None),
        ]
    );
    Ok(())
}

#[test]
fn can_parse_predicates() -> Result<(), ParseError> {
    let d = Domain::parse(SAMPLE_DOMAIN)?;

    let names: Vec<&str> = d.predicates.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["on", "ontable", "clear", "holding", "arm-empty"]);

    assert_eq!(
        d.predicates[0].parameters,
        vec![Param::new("?x", Some("block")), Param::new("?y", Some("block"))]
    );
    assert!(d.predicates[4].parameters.is_empty());
    Ok(())
}

#[test]
fn keeps_duplicate_predicates() -> Result<(), ParseError> {
    let d = Domain::parse("(define (domain foo) (:predicates (p) (p ?x)))")?;
    assert_eq!(d.predicates.len(), 2);
    assert_eq!(d.predicates[1].parameters, vec![Param::new("?x", None)]);
    Ok(())
}

#[test]
fn can_parse_actions() -> Result<(), ParseError> {
    let d = Domain::parse(SAMPLE_DOMAIN)?;

    assert_eq!(d.actions.len(), 2);
    assert_eq!(
        d.actions[0],
        Action {
            name: "pick-up".to_string(),
            parameters: vec![Param::new("?x", Some("block"))],
            precondition: Some("( and ( clear ?x ) ( ontable ?x ) ( arm-empty ) )".to_string()),
            effect: Some(
                "( and ( holding ?x ) ( not ( ontable ?x ) ) ( not ( clear ?x ) ) ( not ( arm-empty ) ) )"
                    .to_string()
            ),
        }
    );
    assert_eq!(d.actions[1].name, "put-down");
    assert_eq!(d.actions[1].precondition.as_deref(), Some("( holding ?x )"));
    Ok(())
}

#[test]
fn action_fields_in_any_order() -> Result<(), ParseError> {
    let d = Domain::parse(
        "(define (domain foo)
           (:action a :effect (p) :parameters (?x) :precondition (q ?x)))",
    )?;
    let a = &d.actions[0];

    assert_eq!(a.parameters, vec![Param::new("?x", None)]);
    assert_eq!(a.precondition.as_deref(), Some("( q ?x )"));
    assert_eq!(a.effect.as_deref(), Some("( p )"));
    Ok(())
}

#[test]
fn action_without_precondition_or_effect() -> Result<(), ParseError> {
    let d = Domain::parse("(define (domain foo) (:action noop :parameters ()))")?;

    assert_eq!(d.actions[0].precondition, None);
    assert_eq!(d.actions[0].effect, None);
    Ok(())
}

#[test]
fn skips_unknown_sections() -> Result<(), ParseError> {
    let d = Domain::parse(
        "(define (domain foo)
           (:constants a b - block)
           (:functions (total-cost) - number)
           (:predicates (p))
           (:derived (q) (p)))",
    )?;

    assert_eq!(d.predicates.len(), 1);
    assert!(d.actions.is_empty());
    Ok(())
}

#[test]
fn comments_are_ignored() -> Result<(), ParseError> {
    let d = Domain::parse(
        "; a comment before anything
         (define (domain foo) ; trailing comment
           ;; (:predicates (bogus))
           (:predicates (p)))",
    )?;

    assert_eq!(d.predicates.len(), 1);
    assert_eq!(d.predicates[0].name, "p");
    Ok(())
}

#[test]
fn keeps_raw_source() -> Result<(), ParseError> {
    let d = Domain::parse(SAMPLE_DOMAIN)?;
    assert_eq!(d.raw_source, SAMPLE_DOMAIN);
    Ok(())
}

#[test]
fn parsing_is_repeatable() -> Result<(), ParseError> {
    let first = parse_domain(SAMPLE_DOMAIN)?;
    let second = parse_domain(&first.raw_source)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn serializes_type_key() -> Result<(), ParseError> {
    let d = Domain::parse(SAMPLE_DOMAIN)?;
    let json = serde_json::to_value(&d.predicates[0]).unwrap();

    assert_eq!(json["name"], "on");
    assert_eq!(json["parameters"][0]["name"], "?x");
    assert_eq!(json["parameters"][0]["type"], "block");
    Ok(())
}
