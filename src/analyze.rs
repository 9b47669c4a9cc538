//! Analysis session: one pass over a source file
//!
//! For every composable declared in the file:
//! - resolve its parameters and assemble mock argument tuples
//! - classify its interactive elements and synthesize scenarios
//!
//! Functions are analyzed independently. Nothing here fails on a single bad
//! element or parameter; what was skipped ends up in the function's
//! [`AnalysisDiagnostics`].

use crate::catalog::ValueCatalog;
use crate::classify::{Classifier, UiVocabulary};
use crate::error::{Error, Result};
use crate::interaction::Scenario;
use crate::mock::{assemble_mocks, MockTuple};
use crate::payload::Payloads;
use crate::resolve::InteractionResolver;
use crate::scenario::synthesize;
use crate::settings::Settings;
use crate::source::{Declaration, SourceTree};
use crate::types::{Parameter, TypeResolver};
use serde::Serialize;
use tracing::{debug, info};

/// Analyze every composable in `path`
pub fn analyze(
    tree: &dyn SourceTree,
    path: &str,
    settings: &Settings,
) -> Result<Vec<FunctionTest>> {
    Analyzer::new(tree, settings).analyze_file(path)
}

/// What the analysis skipped or cut short
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisDiagnostics {
    /// Calls that resolve to no declaration
    pub unresolved_calls: Vec<String>,
    /// Interactive calls without a literal test tag (`Callee:line`)
    pub untagged_elements: Vec<String>,
    /// Tags dropped by `excludeTags`
    pub excluded_tags: Vec<String>,
    /// Declarations not descended into again
    pub cycles: Vec<String>,
    /// Parameters left out of the mocks
    pub skipped_parameters: Vec<String>,
}

/// Everything test emission needs for one function
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTest {
    pub name: String,
    pub qualified_name: String,
    pub parameters: Vec<Parameter>,
    pub mocks: Vec<MockTuple>,
    /// Qualified names to import, deduplicated, first-seen order
    pub imports: Vec<String>,
    pub scenarios: Vec<Scenario>,
    pub diagnostics: AnalysisDiagnostics,
}

/// One (mock, scenario) pair
#[derive(Debug, Clone, Copy)]
pub struct TestCase<'a> {
    /// Running index within the function
    pub index: usize,
    pub mock: &'a MockTuple,
    pub scenario: &'a Scenario,
}

impl TestCase<'_> {
    /// `"<scenario name> <index>"`
    pub fn name(&self) -> String {
        format!("{} {}", self.scenario.name(), self.index)
    }
}

impl FunctionTest {
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Every mock crossed with every non-empty scenario, mock outermost
    pub fn test_cases(&self) -> Vec<TestCase<'_>> {
        let mut cases = Vec::with_capacity(self.mocks.len() * self.scenarios.len());
        for mock in &self.mocks {
            for scenario in self.scenarios.iter().filter(|s| !s.is_empty()) {
                cases.push(TestCase {
                    index: cases.len(),
                    mock,
                    scenario,
                });
            }
        }
        cases
    }

    /// Human-readable summary
    pub fn to_report(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Function: {}\n", self.qualified_name));
        out.push_str(&format!(
            "  Parameters: {}\n",
            if self.parameters.is_empty() {
                "(none)".to_string()
            } else {
                self.parameter_names().join(", ")
            }
        ));
        out.push_str(&format!("  Mocks: {}\n", self.mocks.len()));
        out.push_str(&format!("  Scenarios: {}\n", self.scenarios.len()));
        out.push_str(&format!("  Test cases: {}\n", self.test_cases().len()));

        if !self.imports.is_empty() {
            out.push_str("  Imports:\n");
            for import in &self.imports {
                out.push_str(&format!("    {}\n", import));
            }
        }

        let d = &self.diagnostics;
        let sections: [(&str, &Vec<String>); 5] = [
            ("Unresolved calls", &d.unresolved_calls),
            ("Untagged elements", &d.untagged_elements),
            ("Excluded tags", &d.excluded_tags),
            ("Recursion cut at", &d.cycles),
            ("Skipped parameters", &d.skipped_parameters),
        ];
        for (label, items) in sections {
            if !items.is_empty() {
                out.push_str(&format!("  {}: {}\n", label, items.join(", ")));
            }
        }

        out
    }
}

/// Drives classification, resolution and mock assembly for one source tree
pub struct Analyzer<'a> {
    tree: &'a dyn SourceTree,
    settings: &'a Settings,
    vocabulary: UiVocabulary,
    seed: Option<u64>,
}

impl<'a> Analyzer<'a> {
    pub fn new(tree: &'a dyn SourceTree, settings: &'a Settings) -> Self {
        Self {
            tree,
            settings,
            vocabulary: UiVocabulary::default(),
            seed: None,
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: UiVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Fixed seed for every payload; by default each function seeds from
    /// its own identity
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Analyze every composable declared in `path`
    pub fn analyze_file(&self, path: &str) -> Result<Vec<FunctionTest>> {
        let file = self
            .tree
            .file(path)
            .ok_or_else(|| Error::SourceParse(format!("unknown source file: {}", path)))?;

        let classifier = Classifier::new(self.tree, self.settings, &self.vocabulary);
        let tests = file
            .functions
            .iter()
            .filter(|f| classifier.is_composable(f))
            .map(|f| self.analyze_function(f))
            .collect::<Vec<_>>();

        info!(path = %path, functions = tests.len(), "analyzed source file");
        Ok(tests)
    }

    /// Analyze one declaration, composable or not
    pub fn analyze_function(&self, function: &Declaration) -> FunctionTest {
        let id = function.id();

        let parameters =
            TypeResolver::new(self.tree).parameters(&function.parameters, &function.package);
        let mut catalog = ValueCatalog::new(
            self.settings.global_rules,
            self.payloads(&format!("{}/mocks", id)),
        );
        let mock_set = assemble_mocks(&parameters, &mut catalog);

        let classifier = Classifier::new(self.tree, self.settings, &self.vocabulary);
        let classification = classifier.classify(function);
        let mut resolver =
            InteractionResolver::new(self.settings, self.payloads(&format!("{}/inputs", id)));
        let scenarios = synthesize(&classification.elements, &mut resolver);

        let mut diagnostics = classification.diagnostics;
        diagnostics.skipped_parameters = mock_set.skipped;

        if scenarios.is_empty() {
            debug!(function = %id, "no interactive elements");
        }
        info!(
            function = %id,
            elements = classification.elements.len(),
            mocks = mock_set.tuples.len(),
            scenarios = scenarios.len(),
            "analyzed composable"
        );

        FunctionTest {
            name: function.name.clone(),
            qualified_name: function.qualified_name(),
            parameters,
            mocks: mock_set.tuples,
            imports: dedup(mock_set.imports),
            scenarios,
            diagnostics,
        }
    }

    fn payloads(&self, key: &str) -> Payloads {
        match self.seed {
            Some(seed) => Payloads::seeded(seed),
            None => Payloads::for_key(key),
        }
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceModel;
    use pretty_assertions::assert_eq;

    const PROFILE: &str = r#"
files:
  - path: ui/Profile.kt
    package: com.example.profile
    types:
      - name: User
        kind: data_class
        fields:
          - { name: name, type: String }
          - { name: admin, type: Boolean }
    functions:
      - name: ProfileCard
        annotations: [Composable]
        line: 12
        parameters:
          - { name: user, type: User }
          - { name: onEdit, type: "() -> Unit" }
          - { name: viewModel, type: ProfileViewModel }
        body:
          - call:
              name: IconButton
              args:
                - name: onClick
                  value: { literal: onEdit }
                - name: modifier
                  value: { chain: { receiver: Modifier, calls: [ { name: testTag, args: [ { value: { string: edit } } ] } ] } }
      - name: formatName
        parameters:
          - { name: user, type: User }
"#;

    fn model() -> SourceModel {
        SourceModel::from_yaml(PROFILE)
            .unwrap()
            .with_compose_library()
            .unwrap()
    }

    #[test]
    fn test_analyze_file() {
        let model = model();
        let settings = Settings::default();
        let tests = analyze(&model, "ui/Profile.kt", &settings).unwrap();

        assert_eq!(tests.len(), 1);
        let test = &tests[0];
        assert_eq!(test.qualified_name, "com.example.profile.ProfileCard");
        assert_eq!(test.parameter_names(), vec!["user", "onEdit", "viewModel"]);
        // name: random + "", admin: true/false
        assert_eq!(test.mocks.len(), 4);
        assert_eq!(test.imports, vec!["com.example.profile.User".to_string()]);
        assert_eq!(test.diagnostics.skipped_parameters, vec!["viewModel".to_string()]);
        assert_eq!(test.scenarios.len(), 2);
        assert_eq!(test.test_cases().len(), 8);
    }

    #[test]
    fn test_unknown_file_is_an_error() {
        let model = model();
        let settings = Settings::default();
        let err = analyze(&model, "ui/Missing.kt", &settings).unwrap_err();
        assert!(err.to_string().contains("ui/Missing.kt"));
    }

    #[test]
    fn test_deterministic_per_function() {
        let model = model();
        let settings = Settings::default();
        let a = analyze(&model, "ui/Profile.kt", &settings).unwrap();
        let b = analyze(&model, "ui/Profile.kt", &settings).unwrap();
        let render = |t: &FunctionTest| t.mocks.iter().map(|m| m.render()).collect::<Vec<_>>();
        assert_eq!(render(&a[0]), render(&b[0]));
    }

    #[test]
    fn test_case_names_and_indices() {
        let model = model();
        let settings = Settings::default();
        let tests = Analyzer::new(&model, &settings)
            .with_seed(5)
            .analyze_file("ui/Profile.kt")
            .unwrap();
        let cases = tests[0].test_cases();
        assert_eq!(cases[0].name(), "edit no click 0");
        assert_eq!(cases[1].name(), "edit click is performed 1");
        assert_eq!(cases[7].index, 7);
    }

    #[test]
    fn test_report() {
        let model = model();
        let settings = Settings::default();
        let tests = analyze(&model, "ui/Profile.kt", &settings).unwrap();
        let report = tests[0].to_report();
        assert!(report.contains("Function: com.example.profile.ProfileCard"));
        assert!(report.contains("Test cases: 8"));
        assert!(report.contains("Skipped parameters: viewModel"));
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let items = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup(items), vec!["b".to_string(), "a".to_string()]);
    }
}
