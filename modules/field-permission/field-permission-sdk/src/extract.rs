//! Collect every [`ReferenceId`] carried by a resolver's arguments.
//!
//! Walks the argument tree depth-first and returns the references in encounter
//! order. Each call builds its own result; nothing is shared between calls.

use crate::arguments::{ArgumentValue, Arguments, ReferenceId};

/// Extract reference ids from `arguments`.
///
/// For each value:
/// - a reference is collected;
/// - a list made only of references is collected whole;
/// - a nested object is walked recursively;
/// - a list made only of objects has each object walked.
///
/// Scalars, nulls, mixed lists and lists of lists are ignored.
#[must_use]
pub fn extract_reference_ids(arguments: &Arguments) -> Vec<&ReferenceId> {
    arguments.values().flat_map(references_in).collect()
}

fn references_in(value: &ArgumentValue) -> Vec<&ReferenceId> {
    match value {
        ArgumentValue::Reference(id) => vec![id],
        ArgumentValue::Object(nested) => extract_reference_ids(nested),
        ArgumentValue::List(items) => references_in_list(items),
        ArgumentValue::Null
        | ArgumentValue::Boolean(_)
        | ArgumentValue::Int(_)
        | ArgumentValue::Float(_)
        | ArgumentValue::String(_) => Vec::new(),
    }
}

fn references_in_list(items: &[ArgumentValue]) -> Vec<&ReferenceId> {
    if let Some(ids) = items
        .iter()
        .map(ArgumentValue::as_reference)
        .collect::<Option<Vec<_>>>()
    {
        return ids;
    }

    items
        .iter()
        .map(ArgumentValue::as_object)
        .collect::<Option<Vec<_>>>()
        .map(|objects| objects.into_iter().flat_map(extract_reference_ids).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn widget(id: &str) -> ArgumentValue {
        ArgumentValue::reference("WidgetType", id)
    }

    fn node_ids(ids: &[&ReferenceId]) -> Vec<String> {
        ids.iter().map(|id| id.node_id().to_owned()).collect()
    }

    #[test]
    fn collects_top_level_reference() {
        let args = Arguments::new().with("id", widget("1")).with("name", "box");

        assert_eq!(node_ids(&extract_reference_ids(&args)), vec!["1"]);
    }

    #[test]
    fn collects_list_of_references() {
        let args = Arguments::new().with("ids", vec![widget("1"), widget("2")]);

        assert_eq!(node_ids(&extract_reference_ids(&args)), vec!["1", "2"]);
    }

    #[test]
    fn recurses_into_nested_objects() {
        let args = Arguments::new().with(
            "input",
            Arguments::new()
                .with("title", "hello")
                .with("parent", Arguments::new().with("id", widget("7"))),
        );

        assert_eq!(node_ids(&extract_reference_ids(&args)), vec!["7"]);
    }

    #[test]
    fn recurses_into_list_of_objects() {
        let args = Arguments::new().with(
            "items",
            vec![
                ArgumentValue::from(Arguments::new().with("id", widget("1"))),
                ArgumentValue::from(Arguments::new().with("ids", vec![widget("2"), widget("3")])),
            ],
        );

        assert_eq!(
            node_ids(&extract_reference_ids(&args)),
            vec!["1", "2", "3"]
        );
    }

    #[test]
    fn keeps_encounter_order_across_shapes() {
        let args = Arguments::new()
            .with("a", widget("1"))
            .with("b", Arguments::new().with("c", widget("2")))
            .with("d", vec![widget("3")])
            .with("e", widget("4"));

        assert_eq!(
            node_ids(&extract_reference_ids(&args)),
            vec!["1", "2", "3", "4"]
        );
    }

    #[test]
    fn ignores_scalars_mixed_lists_and_nested_lists() {
        let args = Arguments::new()
            .with("null", ArgumentValue::Null)
            .with("flag", true)
            .with("count", 3_i64)
            .with("ratio", ArgumentValue::Float(0.5))
            .with("name", "Widget:1")
            .with("mixed", vec![widget("1"), ArgumentValue::from("x")])
            .with(
                "mixed_objects",
                vec![
                    ArgumentValue::from(Arguments::new().with("id", widget("2"))),
                    ArgumentValue::Int(1),
                ],
            )
            .with("nested", vec![ArgumentValue::List(vec![widget("3")])]);

        assert!(extract_reference_ids(&args).is_empty());
    }

    #[test]
    fn empty_arguments_yield_nothing() {
        assert!(extract_reference_ids(&Arguments::new()).is_empty());
        let empty_list = Arguments::new().with("ids", Vec::<ArgumentValue>::new());
        assert!(extract_reference_ids(&empty_list).is_empty());
    }

    #[test]
    fn independent_calls_do_not_share_results() {
        let first = Arguments::new().with("id", widget("1"));
        let second = Arguments::new().with("id", widget("2"));

        let a = extract_reference_ids(&first);
        let b = extract_reference_ids(&second);

        assert_eq!(node_ids(&a), vec!["1"]);
        assert_eq!(node_ids(&b), vec!["2"]);
    }
}
