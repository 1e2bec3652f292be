use arbor_core::{
    evaluator::{evaluate_exists, evaluate_filter, evaluate_reduce_flatten},
    node::{CHILDREN, Node, load_roots},
    path::LevelPath,
    predicate::{Predicate, eval, eval_anchored},
    query::{Executor, Query},
};
use pretty_assertions::assert_eq;

const FAMILY: &str = include_str!("fixtures/family.json");
const COMPANIES: &str = include_str!("fixtures/companies.json");

fn load(document: &str) -> Vec<Node> {
    load_roots(document).expect("fixture should load")
}

fn names(nodes: &[&Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|node| node.attribute("name"))
        .map(ToString::to_string)
        .collect()
}

fn projects_path() -> LevelPath {
    "company.departments.teams.projects"
        .parse()
        .expect("valid path")
}

fn python_in_progress() -> Predicate {
    Predicate::eq("status", "in_progress") & Predicate::contains("technologies", "Python")
}

#[test]
fn grandfathers_sharing_a_name_with_a_grandchild() {
    let roots = load(FAMILY);
    let grandchildren = LevelPath::from_fields([CHILDREN, CHILDREN]);
    let same_name = Predicate::eq_anchor("name", "name");

    let males = evaluate_filter(&roots, |person| eval(person, &Predicate::eq("sex", "Male")));
    let found = evaluate_exists(males, &grandchildren, |grandchild, grandfather| {
        eval_anchored(grandchild, Some(grandfather), &same_name)
    });

    // Mary also matches by name but is excluded by the prefilter.
    assert_eq!(names(&found), ["John"]);
}

#[test]
fn grandfather_query_through_the_executor() {
    let roots = load(FAMILY);
    let query = Query::exists(
        LevelPath::from_fields([CHILDREN, CHILDREN]),
        Predicate::eq_anchor("name", "name"),
    )
    .with_prefilter(Predicate::eq("sex", "Male"));

    let response = Executor::new().execute(&query, &roots);

    assert_eq!(names(&response), ["John"]);
    // Peter has no `children` field.
    assert_eq!(response.stats().pruned, 1);
}

#[test]
fn python_projects_in_progress() {
    let roots = load(COMPANIES);

    let predicate = python_in_progress();

    let leaves = evaluate_reduce_flatten(&roots, &projects_path(), |leaf| eval(leaf, &predicate));

    assert_eq!(names(&leaves), ["Ingest"]);
}

#[test]
fn flatten_concatenates_across_roots_in_source_order() {
    let roots = load(COMPANIES);

    let leaves = evaluate_reduce_flatten(&roots, &projects_path(), |_| true);

    assert_eq!(
        names(&leaves),
        ["Gateway", "Ingest", "Reports", "Forecast", "Vision", "Archive"]
    );
}

#[test]
fn project_without_technologies_is_not_an_error() {
    let roots = load(COMPANIES);
    let missing = Predicate::is_missing("technologies");

    let leaves = evaluate_reduce_flatten(&roots, &projects_path(), |leaf| eval(leaf, &missing));

    assert_eq!(names(&leaves), ["Archive"]);
}

#[test]
fn empty_document_yields_empty_results() {
    let roots = load("[]");
    let path = projects_path();

    assert!(evaluate_filter(&roots, |_| true).is_empty());
    assert!(evaluate_exists(&roots, &path, |_, _| true).is_empty());
    assert!(evaluate_reduce_flatten(&roots, &path, |_| true).is_empty());
    assert!(
        Executor::new()
            .execute(&Query::flatten(path, Predicate::True), &roots)
            .is_empty()
    );
}

#[test]
fn single_pass_and_level_by_level_agree_on_fixtures() {
    let roots = load(COMPANIES);
    let path = projects_path();

    let by_level = evaluate_reduce_flatten(&roots, &path, |_| true);
    let depth_first: Vec<&Node> = roots
        .iter()
        .flat_map(|root| path.descend_depth_first(root))
        .collect();

    assert_eq!(by_level, depth_first);
}
