//! Mock argument assembly
//!
//! Each mock tuple assigns one candidate to every parameter that has
//! candidates. Parameters whose type is unknown (or yields nothing) are left
//! out of the call entirely, so Kotlin falls back to their default value.

use crate::catalog::{NamedValue, ValueCatalog};
use crate::combine::expand;
use crate::types::Parameter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One fully-specified set of call arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MockTuple {
    pub arguments: Vec<NamedValue>,
}

impl MockTuple {
    /// `name = literal` pairs, one per line, in parameter order
    pub fn render(&self) -> String {
        self.arguments
            .iter()
            .map(NamedValue::render)
            .collect::<Vec<_>>()
            .join(",\n")
    }
}

/// Mock tuples for one function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockSet {
    pub tuples: Vec<MockTuple>,
    /// Structured types visited, in visit order, not deduplicated
    pub imports: Vec<String>,
    /// Parameters left out for lack of candidates
    pub skipped: Vec<String>,
}

/// Cartesian product of every parameter's candidates.
///
/// A function without usable parameters gets exactly one empty tuple.
pub fn assemble_mocks(parameters: &[Parameter], catalog: &mut ValueCatalog) -> MockSet {
    let mut names = Vec::with_capacity(parameters.len());
    let mut slots = Vec::with_capacity(parameters.len());
    let mut imports = Vec::new();
    let mut skipped = Vec::new();

    for param in parameters {
        let output = catalog.values_for(&param.typ);
        imports.extend(output.imports);
        if output.values.is_empty() {
            debug!(parameter = %param.name, "skipping parameter without candidates");
            skipped.push(param.name.clone());
            continue;
        }
        names.push(param.name.as_str());
        slots.push(output.values);
    }

    let tuples = expand(&slots)
        .into_iter()
        .map(|tuple| MockTuple {
            arguments: names
                .iter()
                .zip(tuple)
                .map(|(name, value)| NamedValue {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        })
        .collect();

    MockSet {
        tuples,
        imports,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payloads;
    use crate::settings::Rules;
    use crate::types::{PrimitiveKind, TypeDescriptor};
    use pretty_assertions::assert_eq;

    fn param(name: &str, typ: TypeDescriptor) -> Parameter {
        Parameter {
            name: name.into(),
            typ,
        }
    }

    fn catalog(rules: Rules) -> ValueCatalog {
        ValueCatalog::new(rules, Payloads::seeded(11))
    }

    #[test]
    fn test_no_parameters_single_empty_tuple() {
        let mocks = assemble_mocks(&[], &mut catalog(Rules::default()));
        assert_eq!(mocks.tuples, vec![MockTuple::default()]);
        assert_eq!(mocks.tuples[0].render(), "");
    }

    #[test]
    fn test_product_in_parameter_order() {
        let params = vec![
            param("enabled", TypeDescriptor::primitive(PrimitiveKind::Boolean)),
            param("onClick", TypeDescriptor::Function { arity: 0 }),
            param(
                "mode",
                TypeDescriptor::Enum {
                    name: "Mode".into(),
                    qualified_name: "com.example.ui.Mode".into(),
                    variants: vec!["Light".into(), "Dark".into()],
                },
            ),
        ];
        let mocks = assemble_mocks(&params, &mut catalog(Rules::default()));
        assert_eq!(mocks.tuples.len(), 4);
        assert_eq!(
            mocks.tuples[0].render(),
            "enabled = true,\nonClick = {},\nmode = Mode.Light"
        );
        assert_eq!(
            mocks.tuples[3].render(),
            "enabled = false,\nonClick = {},\nmode = Mode.Dark"
        );
    }

    #[test]
    fn test_unknown_parameter_is_skipped() {
        let params = vec![
            param("viewModel", TypeDescriptor::Unknown),
            param("enabled", TypeDescriptor::primitive(PrimitiveKind::Boolean)),
        ];
        let mocks = assemble_mocks(&params, &mut catalog(Rules::default()));
        assert_eq!(mocks.skipped, vec!["viewModel".to_string()]);
        assert_eq!(mocks.tuples.len(), 2);
        assert!(mocks
            .tuples
            .iter()
            .all(|t| t.arguments.len() == 1 && t.arguments[0].name == "enabled"));
    }

    #[test]
    fn test_imports_collected_per_visit() {
        let user = TypeDescriptor::Structured {
            name: "User".into(),
            qualified_name: "com.example.model.User".into(),
            fields: vec![param("admin", TypeDescriptor::primitive(PrimitiveKind::Boolean))],
        };
        let params = vec![param("author", user.clone()), param("reviewer", user)];
        let mocks = assemble_mocks(&params, &mut catalog(Rules::default()));
        assert_eq!(
            mocks.imports,
            vec![
                "com.example.model.User".to_string(),
                "com.example.model.User".to_string()
            ]
        );
        assert_eq!(mocks.tuples.len(), 4);
        assert_eq!(
            mocks.tuples[0].render(),
            "author = User(admin = true),\nreviewer = User(admin = true)"
        );
    }
}
