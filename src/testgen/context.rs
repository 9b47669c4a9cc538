//! Template context structures
//!
//! Flattens analyzed functions into what the test template iterates over.

use super::FIXED_IMPORTS;
use crate::analyze::FunctionTest;
use crate::interaction::{ClickAction, InteractionType, TestNode};
use crate::util::to_pascal_case;
use serde::Serialize;

/// Context for the test class template
#[derive(Debug, Clone, Serialize)]
pub struct TestFileContext {
    pub package: String,
    /// `<FirstFunction>Test`
    pub class_name: String,
    /// Fixed imports, then tracked imports not already present
    pub imports: Vec<String>,
    pub functions: Vec<FunctionView>,
}

/// One function under test
#[derive(Debug, Clone, Serialize)]
pub struct FunctionView {
    pub name: String,
    pub cases: Vec<CaseView>,
}

/// One `@Test` method
#[derive(Debug, Clone, Serialize)]
pub struct CaseView {
    pub name: String,
    /// Rendered `name = literal` lines, empty for a no-argument call
    pub arguments: String,
    /// Steps that do something; passive steps are left out
    pub steps: Vec<StepView>,
}

/// One action on a tagged node
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub tag: String,
    /// `click`, `input` or `visible`
    pub action: &'static str,
    pub text: Option<String>,
}

impl TestFileContext {
    pub fn from_tests(tests: &[FunctionTest], package: &str) -> Self {
        let class_name = match tests.first() {
            Some(first) => format!("{}Test", to_pascal_case(&first.name)),
            None => "ComposeTest".to_string(),
        };

        let mut imports: Vec<String> = FIXED_IMPORTS.iter().map(|s| s.to_string()).collect();
        for import in tests.iter().flat_map(|t| t.imports.iter()) {
            if !imports.contains(import) {
                imports.push(import.clone());
            }
        }

        // Case indices keep running across functions so method names stay
        // unique within the class.
        let mut next_index = 0;
        let functions = tests
            .iter()
            .map(|test| {
                let view = FunctionView::from_test(test, next_index);
                next_index += view.cases.len();
                view
            })
            .collect();

        Self {
            package: package.to_string(),
            class_name,
            imports,
            functions,
        }
    }

    pub fn case_count(&self) -> usize {
        self.functions.iter().map(|f| f.cases.len()).sum()
    }
}

impl FunctionView {
    fn from_test(test: &FunctionTest, first_index: usize) -> Self {
        let cases = test
            .test_cases()
            .into_iter()
            .map(|case| CaseView {
                name: format!("{} {}", case.scenario.name(), first_index + case.index),
                arguments: case.mock.render(),
                steps: case.scenario.steps.iter().filter_map(StepView::from_node).collect(),
            })
            .collect();
        Self {
            name: test.name.clone(),
            cases,
        }
    }
}

impl StepView {
    fn from_node(node: &TestNode) -> Option<Self> {
        let action = match &node.interaction {
            InteractionType::Visibility => "visible",
            InteractionType::Clickable(ClickAction::PerformClick) => "click",
            InteractionType::Input(_) if node.interaction.typed_text().is_some() => "input",
            _ => return None,
        };
        Some(Self {
            tag: node.tag.clone(),
            action,
            text: node.interaction.typed_text(),
        })
    }
}
