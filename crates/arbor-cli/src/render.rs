use crate::cli::Format;
use arbor_core::{node::Node, obs::Measured, query::Response, value::Value};
use std::io::{self, Write};

///
/// Timing
///
/// Figures printed by `--timing`: how long the evaluation took, how many
/// records came back and the size of their JSON rendering. The report also
/// states that no intermediate documents were built.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Timing {
    pub elapsed_ms: u128,
    pub results: usize,
    pub payload_bytes: usize,
}

impl Timing {
    pub(crate) fn from_measured(measured: &Measured<Response<'_>>) -> Self {
        Self {
            elapsed_ms: measured.elapsed_millis(),
            results: measured.value.len(),
            payload_bytes: measured.value.to_json().to_string().len(),
        }
    }
}

/// Write the matched nodes in the requested format.
pub(crate) fn render(
    out: &mut impl Write,
    response: &Response<'_>,
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Count => writeln!(out, "{}", response.len()),
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&response.to_json()).map_err(io::Error::other)?;
            writeln!(out, "{json}")
        }
        Format::Lines => {
            writeln!(out, "{} result(s)", response.len())?;
            for node in response.iter() {
                writeln!(out, "- {}", label(node))?;
            }
            Ok(())
        }
    }
}

pub(crate) fn render_timing(out: &mut impl Write, timing: Timing) -> io::Result<()> {
    writeln!(out, "Execution time: {} ms", timing.elapsed_ms)?;
    writeln!(out, "Results returned: {}", timing.results)?;
    writeln!(out, "Response payload: {} bytes", timing.payload_bytes)?;
    // Results borrow the loaded roots; evaluation never copies a record.
    writeln!(out, "Intermediate documents: 0 (zero-copy evaluation)")?;
    writeln!(out, "Document overhead: 0")
}

/// Short human label for a node: `name surname` when present, the bare
/// `name` otherwise, and the compact JSON object as a last resort.
pub(crate) fn label(node: &Node) -> String {
    let text = |field: &str| node.attribute(field).and_then(Value::as_text);

    match (text("name"), text("surname")) {
        (Some(name), Some(surname)) => format!("{name} {surname}"),
        (Some(name), None) => name.to_string(),
        _ => node.to_json().to_string(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::{
        obs::measure,
        predicate::Predicate,
        query::{Executor, Query},
    };
    use pretty_assertions::assert_eq;

    fn roots() -> Vec<Node> {
        vec![
            Node::new()
                .with_attr("name", "John")
                .with_attr("surname", "Doe"),
            Node::new().with_attr("name", "Mary"),
            Node::new().with_attr("id", 7_i64),
        ]
    }

    fn rendered(format: Format) -> String {
        let roots = roots();
        let response = Executor::new().execute(&Query::filter(Predicate::True), &roots);

        let mut out = Vec::new();
        render(&mut out, &response, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lines_format_lists_labels() {
        assert_eq!(
            rendered(Format::Lines),
            "3 result(s)\n- John Doe\n- Mary\n- {\"id\":7}\n"
        );
    }

    #[test]
    fn count_format_prints_length() {
        assert_eq!(rendered(Format::Count), "3\n");
    }

    #[test]
    fn json_format_is_an_array() {
        let json: serde_json::Value = serde_json::from_str(&rendered(Format::Json)).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(3));
        assert_eq!(json[0]["surname"], "Doe");
    }

    #[test]
    fn timing_counts_payload_bytes() {
        let roots = roots();
        let query = Query::filter(Predicate::True);
        let measured = measure(|| Executor::new().execute(&query, &roots));
        let timing = Timing::from_measured(&measured);

        assert_eq!(timing.results, 3);
        assert_eq!(
            timing.payload_bytes,
            measured.value.to_json().to_string().len()
        );

        let mut out = Vec::new();
        render_timing(&mut out, timing).unwrap();
        let text = String::from_utf8(out).unwrap();
        let payload = format!("Response payload: {} bytes\n", timing.payload_bytes);
        assert!(text.contains("Results returned: 3\n"));
        assert!(text.contains(&payload));
        assert!(text.ends_with(
            "Intermediate documents: 0 (zero-copy evaluation)\nDocument overhead: 0\n"
        ));
    }
}
