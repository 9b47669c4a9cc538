//! Interactive-element classification
//!
//! Walks a composable's body in document order and turns every tagged,
//! composable call into an [`InteractiveElement`]:
//!
//! 1. Resolve the call; unresolvable or unmarked callees are skipped.
//! 2. Read the test tag from a `Modifier...testTag("...")` argument.
//! 3. Known text fields, clickables and visibility leaves become elements
//!    (a tag is required).
//! 4. Any other composable is opaque: its own body is classified and its
//!    elements are spliced in place, whether or not the call carries a tag.
//!
//! Excluded tags drop the element and skip descent into it. A declaration
//! already on the current descent path is terminal, so recursive composables
//! yield a finite element list.

use crate::analyze::AnalysisDiagnostics;
use crate::interaction::{ElementKind, InteractiveElement, KeyboardShape};
use crate::settings::Settings;
use crate::source::{CallExpr, Declaration, Expr, SourceTree};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// Names the classifier recognizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiVocabulary {
    /// Simple name of the marker annotation
    pub marker: String,
    pub text_inputs: Vec<String>,
    pub clickables: Vec<String>,
    pub visibles: Vec<String>,
    /// Receivers a modifier chain may start from
    pub modifier_receivers: Vec<String>,
    /// Modifier call attaching the test tag
    pub tag_call: String,
}

impl Default for UiVocabulary {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            marker: "Composable".into(),
            text_inputs: names(&["TextField", "OutlinedTextField", "BasicTextField"]),
            clickables: names(&[
                "Button",
                "TextButton",
                "OutlinedButton",
                "ElevatedButton",
                "FilledTonalButton",
                "IconButton",
                "FloatingActionButton",
                "ExtendedFloatingActionButton",
                "Checkbox",
                "Switch",
                "RadioButton",
            ]),
            visibles: names(&["Text", "Image", "Icon"]),
            modifier_receivers: names(&["Modifier", "modifier"]),
            tag_call: "testTag".into(),
        }
    }
}

/// Elements found in one function, plus what was skipped
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub elements: Vec<InteractiveElement>,
    pub diagnostics: AnalysisDiagnostics,
}

/// Classifies the calls inside composable bodies
pub struct Classifier<'a> {
    tree: &'a dyn SourceTree,
    settings: &'a Settings,
    vocabulary: &'a UiVocabulary,
}

impl<'a> Classifier<'a> {
    pub fn new(
        tree: &'a dyn SourceTree,
        settings: &'a Settings,
        vocabulary: &'a UiVocabulary,
    ) -> Self {
        Self {
            tree,
            settings,
            vocabulary,
        }
    }

    /// Classify every interactive element reachable from `function`'s body
    pub fn classify(&self, function: &Declaration) -> Classification {
        let mut out = Classification::default();
        let mut path = vec![function.id()];
        self.classify_body(function, &mut path, &mut out);
        out
    }

    /// Whether `decl` carries the marker annotation
    pub fn is_composable(&self, decl: &Declaration) -> bool {
        decl.has_annotation(&self.vocabulary.marker)
    }

    fn kind_of(&self, call: &CallExpr, target: &Declaration) -> ElementKind {
        let name = call.name.as_str();
        let vocab = self.vocabulary;
        if vocab.text_inputs.iter().any(|n| n == name) {
            ElementKind::TextInput {
                keyboard: keyboard_shape(call, target),
            }
        } else if vocab.clickables.iter().any(|n| n == name) {
            ElementKind::Clickable
        } else if vocab.visibles.iter().any(|n| n == name) {
            ElementKind::VisibilityOnly
        } else {
            ElementKind::Opaque {
                declaration: target.id(),
            }
        }
    }

    fn classify_body(
        &self,
        decl: &Declaration,
        path: &mut Vec<String>,
        out: &mut Classification,
    ) {
        for call in decl.nested_calls() {
            let Some(target) = self.tree.resolve_call(call, &decl.package) else {
                debug!(call = %call.name, line = call.line, "unresolved call");
                out.diagnostics.unresolved_calls.push(call.name.clone());
                continue;
            };
            if !self.is_composable(target) {
                continue;
            }

            let tag = self.test_tag(call);
            if let Some(tag) = &tag {
                if self.settings.is_excluded(tag) {
                    debug!(tag = %tag, "excluded tag");
                    out.diagnostics.excluded_tags.push(tag.clone());
                    continue;
                }
            }

            match self.kind_of(call, target) {
                ElementKind::Opaque { declaration } => {
                    if path.contains(&declaration) {
                        warn!(
                            declaration = %declaration,
                            "recursive composable, not descending again"
                        );
                        out.diagnostics.cycles.push(declaration);
                        continue;
                    }
                    trace!(declaration = %declaration, "descending into composable");
                    path.push(declaration);
                    self.classify_body(target, path, out);
                    path.pop();
                }
                kind => match tag {
                    Some(tag) => {
                        trace!(tag = %tag, kind = ?kind, "interactive element");
                        out.elements.push(InteractiveElement {
                            tag,
                            kind,
                            callee: call.name.clone(),
                            line: call.line,
                        });
                    }
                    None => {
                        debug!(
                            call = %call.name,
                            line = call.line,
                            "interactive element without test tag"
                        );
                        out.diagnostics
                            .untagged_elements
                            .push(format!("{}:{}", call.name, call.line));
                    }
                },
            }
        }
    }

    /// Literal test tag attached through a modifier chain argument
    pub fn test_tag(&self, call: &CallExpr) -> Option<String> {
        call.args.iter().find_map(|arg| {
            let Expr::Chain(chain) = &arg.value else {
                return None;
            };
            if !self
                .vocabulary
                .modifier_receivers
                .iter()
                .any(|r| *r == chain.receiver)
            {
                return None;
            }
            let tag_call = chain
                .calls
                .iter()
                .find(|c| c.name == self.vocabulary.tag_call)?;
            match &tag_call.args.first()?.value {
                Expr::String(tag) => Some(tag.clone()),
                _ => None,
            }
        })
    }
}

fn keyboard_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:keyboardType\s*=\s*)?KeyboardType\.(\w+)")
            .expect("keyboard type pattern is valid")
    })
}

fn parse_keyboard_type(text: &str) -> Option<KeyboardShape> {
    let captures = keyboard_type_pattern().captures(text)?;
    KeyboardShape::from_name(captures.get(1)?.as_str())
}

/// Keyboard shape of a text field call.
///
/// The call-site `keyboardOptions` argument wins over the declaration's
/// default; neither parsing means plain text. A password visual
/// transformation turns a text shape into a password shape.
pub fn keyboard_shape(call: &CallExpr, target: &Declaration) -> KeyboardShape {
    let call_site = call
        .argument("keyboardOptions")
        .and_then(|a| parse_keyboard_type(&a.value.text()));
    let declared = || {
        target
            .parameter("keyboardOptions")
            .and_then(|p| p.default.as_deref())
            .and_then(parse_keyboard_type)
    };
    let shape = call_site.or_else(declared).unwrap_or_default();

    let transformation = call
        .argument("visualTransformation")
        .map(|a| a.value.text())
        .or_else(|| {
            target
                .parameter("visualTransformation")
                .and_then(|p| p.default.clone())
        });
    let is_password = transformation
        .map(|t| t.contains("PasswordVisualTransformation"))
        .unwrap_or(false);

    if is_password && shape == KeyboardShape::Text {
        KeyboardShape::Password
    } else {
        shape
    }
}
