//! Shared tree builders for unit tests.

use crate::node::{CHILDREN, Node};

/// Person record with a `children` collection.
pub(crate) fn person(name: &str, sex: &str, children: Vec<Node>) -> Node {
    Node::new()
        .with_attr("name", name)
        .with_attr("surname", "Doe")
        .with_attr("sex", sex)
        .with_children(CHILDREN, children)
}

pub(crate) fn project(name: &str, status: &str, technologies: &[&str]) -> Node {
    Node::new()
        .with_attr("name", name)
        .with_attr("status", status)
        .with_attr("technologies", technologies.to_vec())
}

fn team(name: &str, projects: Vec<Node>) -> Node {
    Node::new()
        .with_attr("name", name)
        .with_children("projects", projects)
}

/// One root holding `company.departments.teams.projects`.
///
/// Exactly one project ("Pipeline") is `in_progress` and uses Python. The
/// "Legal" department has no `teams` field.
pub(crate) fn company_tree() -> Node {
    let engineering = Node::new().with_attr("name", "Engineering").with_children(
        "teams",
        vec![
            team(
                "Web",
                vec![
                    project("Portal", "in_progress", &["JavaScript"]),
                    project("Pipeline", "in_progress", &["Python", "Rust"]),
                ],
            ),
            team(
                "Data",
                vec![project("Dashboard", "completed", &["Python"])],
            ),
        ],
    );
    let finance = Node::new().with_attr("name", "Finance").with_children(
        "teams",
        vec![team(
            "Ops",
            vec![
                project("Ledger", "planned", &["Python"]),
                project("Forecast", "in_progress", &["R"]),
            ],
        )],
    );
    let legal = Node::new().with_attr("name", "Legal");

    let company = Node::new()
        .with_attr("name", "Acme")
        .with_children("departments", vec![engineering, finance, legal]);

    Node::new().with_attr("id", 1_i64).with_record("company", company)
}
