//! Source model: the declarative UI syntax tree consumed by the analyzer
//!
//! Parsing Kotlin is not this crate's job. Whatever front end produced the
//! tree hands it over as a [`SourceModel`] (YAML or JSON), or implements
//! [`SourceTree`] directly on top of its own representation.
//!
//! ## Example Model
//!
//! ```yaml
//! files:
//!   - path: app/src/main/java/com/example/Login.kt
//!     package: com.example
//!     functions:
//!       - name: LoginScreen
//!         annotations: [Composable]
//!         parameters:
//!           - name: onSubmit
//!             type: "() -> Unit"
//!         body:
//!           - call:
//!               name: Button
//!               args:
//!                 - name: modifier
//!                   value: { chain: { receiver: Modifier, calls: [ { name: testTag, args: [ { value: { string: submit } } ] } ] } }
//!               content:
//!                 - call: { name: Text, args: [ { value: { string: Go } } ] }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const COMPOSE_LIBRARY: &str = include_str!("../library/compose.yaml");

/// Capability the analyzer needs from a syntax tree.
///
/// Implementations resolve calls and type names the way the host's own
/// resolver would. Returning `None` is always allowed and means "no
/// information"; the analyzer degrades instead of failing.
pub trait SourceTree {
    /// Look up a source file by path
    fn file(&self, path: &str) -> Option<&SourceFile>;

    /// Resolve a call expression to the declaration it invokes
    fn resolve_call(&self, call: &CallExpr, from_package: &str) -> Option<&Declaration>;

    /// Resolve a (simple or qualified) type name to its declaration
    fn resolve_type(&self, name: &str, from_package: &str) -> Option<&TypeDecl>;
}

/// In-memory source model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceModel {
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

/// One source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    /// Project-relative path
    pub path: String,

    #[serde(default)]
    pub package: String,

    /// Function declarations in declaration order
    #[serde(default)]
    pub functions: Vec<Declaration>,

    /// Class, data class and enum declarations
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A function declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,

    /// Filled from the enclosing file when the model is indexed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,

    /// Attached annotations, as written (`Composable`, `@Preview`, ...)
    #[serde(default)]
    pub annotations: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParamDecl>,

    /// Body statements. Empty for library declarations.
    #[serde(default)]
    pub body: Vec<Expr>,

    #[serde(default)]
    pub line: usize,
}

/// A declared parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,

    /// Declared type as written (`String`, `List<User>?`, `(String) -> Unit`)
    #[serde(rename = "type")]
    pub type_name: String,

    /// Default value source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A type declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,

    #[serde(default)]
    pub kind: TypeDeclKind,

    /// Primary constructor parameters
    #[serde(default)]
    pub fields: Vec<ParamDecl>,

    /// Enum entries in declaration order
    #[serde(default)]
    pub entries: Vec<String>,

    #[serde(default)]
    pub line: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDeclKind {
    #[default]
    Class,
    DataClass,
    EnumClass,
    Interface,
    Object,
}

/// A call expression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    /// Callee name as written
    pub name: String,

    /// Qualified name of the resolved callee, when the front end knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default)]
    pub args: Vec<Argument>,

    /// Trailing lambda body
    #[serde(default)]
    pub content: Vec<Expr>,

    #[serde(default)]
    pub line: usize,
}

/// A call argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: Expr,
}

/// A modifier chain such as `Modifier.padding(8.dp).testTag("submit")`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierChain {
    pub receiver: String,
    #[serde(default)]
    pub calls: Vec<CallExpr>,
}

/// An expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExprRepr", into = "ExprRepr")]
pub enum Expr {
    /// String literal (unquoted contents)
    String(String),
    /// Any other expression, kept as source text
    Literal(String),
    Call(CallExpr),
    Chain(ModifierChain),
    Lambda(Vec<Expr>),
}

// Single-key maps (`{ call: ... }`) read the same through YAML and JSON.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ExprRepr {
    Call { call: CallExpr },
    Chain { chain: ModifierChain },
    Lambda { lambda: Vec<Expr> },
    String { string: String },
    Literal { literal: String },
}

impl From<ExprRepr> for Expr {
    fn from(repr: ExprRepr) -> Self {
        match repr {
            ExprRepr::Call { call } => Expr::Call(call),
            ExprRepr::Chain { chain } => Expr::Chain(chain),
            ExprRepr::Lambda { lambda } => Expr::Lambda(lambda),
            ExprRepr::String { string } => Expr::String(string),
            ExprRepr::Literal { literal } => Expr::Literal(literal),
        }
    }
}

impl From<Expr> for ExprRepr {
    fn from(expr: Expr) -> Self {
        match expr {
            Expr::Call(call) => ExprRepr::Call { call },
            Expr::Chain(chain) => ExprRepr::Chain { chain },
            Expr::Lambda(lambda) => ExprRepr::Lambda { lambda },
            Expr::String(string) => ExprRepr::String { string },
            Expr::Literal(literal) => ExprRepr::Literal { literal },
        }
    }
}

impl Expr {
    /// Approximate source text of the expression
    pub fn text(&self) -> String {
        match self {
            Expr::String(s) => format!("\"{}\"", s),
            Expr::Literal(text) => text.clone(),
            Expr::Call(call) => call.text(),
            Expr::Chain(chain) => {
                let mut out = chain.receiver.clone();
                for call in &chain.calls {
                    out.push('.');
                    out.push_str(&call.text());
                }
                out
            }
            Expr::Lambda(body) => {
                let inner: Vec<String> = body.iter().map(Expr::text).collect();
                if inner.is_empty() {
                    "{}".into()
                } else {
                    format!("{{ {} }}", inner.join("; "))
                }
            }
        }
    }
}

impl CallExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Approximate source text of the call
    pub fn text(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| match &arg.name {
                Some(name) => format!("{} = {}", name, arg.value.text()),
                None => arg.value.text(),
            })
            .collect();
        format!("{}({})", self.name, args.join(", "))
    }

    /// Find an argument by name
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.args.iter().find(|a| a.name.as_deref() == Some(name))
    }
}

impl Declaration {
    /// Package-qualified name
    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.name)
    }

    /// Structural identity: qualified name plus declaration line
    pub fn id(&self) -> String {
        format!("{}:{}", self.qualified_name(), self.line)
    }

    /// Find a declared parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParamDecl> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Whether any annotation's simple name equals `marker`
    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| annotation_simple_name(a) == marker)
    }

    /// Every call expression in the body, in document order (pre-order).
    ///
    /// Calls inside trailing lambdas and argument expressions are included.
    /// Modifier chain segments are not UI calls and are skipped, though calls
    /// nested in their arguments are still reached.
    pub fn nested_calls(&self) -> Vec<&CallExpr> {
        let mut out = Vec::new();
        for stmt in &self.body {
            collect_calls(stmt, &mut out);
        }
        out
    }
}

fn collect_calls<'a>(expr: &'a Expr, out: &mut Vec<&'a CallExpr>) {
    match expr {
        Expr::Call(call) => {
            out.push(call);
            collect_call_children(call, out);
        }
        Expr::Chain(chain) => {
            for segment in &chain.calls {
                collect_call_children(segment, out);
            }
        }
        Expr::Lambda(body) => {
            for e in body {
                collect_calls(e, out);
            }
        }
        Expr::String(_) | Expr::Literal(_) => {}
    }
}

fn collect_call_children<'a>(call: &'a CallExpr, out: &mut Vec<&'a CallExpr>) {
    for arg in &call.args {
        collect_calls(&arg.value, out);
    }
    for e in &call.content {
        collect_calls(e, out);
    }
}

impl TypeDecl {
    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.name)
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// `@androidx.compose.runtime.Composable` -> `Composable`
pub fn annotation_simple_name(annotation: &str) -> &str {
    let trimmed = annotation.trim().trim_start_matches('@');
    let without_args = trimmed.split('(').next().unwrap_or(trimmed);
    without_args.rsplit('.').next().unwrap_or(without_args)
}

impl SourceModel {
    pub fn new(files: Vec<SourceFile>) -> Self {
        let mut model = Self { files };
        model.index();
        model
    }

    /// Parse a model from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let model: SourceModel =
            serde_norway::from_str(yaml).map_err(|e| Error::SourceParse(e.to_string()))?;
        Ok(Self::new(model.files))
    }

    /// Parse a model from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let model: SourceModel =
            serde_json::from_str(json).map_err(|e| Error::SourceParse(e.to_string()))?;
        Ok(Self::new(model.files))
    }

    /// Serialize the model to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SourceParse(e.to_string()))
    }

    /// The standard Compose and Material composables
    pub fn compose_library() -> Result<Self> {
        Self::from_yaml(COMPOSE_LIBRARY)
    }

    /// Merge the standard composables into this model
    pub fn with_compose_library(mut self) -> Result<Self> {
        let library = Self::compose_library()?;
        self.files.extend(library.files);
        Ok(self)
    }

    /// Compute hash of the model for change detection
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }

    /// Every declaration in the model
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.files.iter().flat_map(|f| f.functions.iter())
    }

    fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.files.iter().flat_map(|f| f.types.iter())
    }

    // Push each file's package down into its declarations
    fn index(&mut self) {
        for file in &mut self.files {
            for func in &mut file.functions {
                if func.package.is_empty() {
                    func.package = file.package.clone();
                }
            }
            for typ in &mut file.types {
                if typ.package.is_empty() {
                    typ.package = file.package.clone();
                }
            }
        }
    }
}

impl SourceTree for SourceModel {
    fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    fn resolve_call(&self, call: &CallExpr, from_package: &str) -> Option<&Declaration> {
        if let Some(target) = &call.target {
            return self.declarations().find(|d| d.qualified_name() == *target);
        }
        self.declarations()
            .find(|d| d.name == call.name && d.package == from_package)
            .or_else(|| self.declarations().find(|d| d.name == call.name))
    }

    fn resolve_type(&self, name: &str, from_package: &str) -> Option<&TypeDecl> {
        if name.contains('.') {
            if let Some(found) = self.types().find(|t| t.qualified_name() == name) {
                return Some(found);
            }
        }
        let simple = name.rsplit('.').next().unwrap_or(name);
        self.types()
            .find(|t| t.name == simple && t.package == from_package)
            .or_else(|| self.types().find(|t| t.name == simple))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> SourceModel {
        SourceModel::from_yaml(
            r#"
files:
  - path: ui/Profile.kt
    package: com.example.ui
    functions:
      - name: ProfileScreen
        annotations: ["@Composable"]
        line: 12
        parameters:
          - name: user
            type: User
        body:
          - call:
              name: Column
              content:
                - call:
                    name: Text
                    args:
                      - value: { string: Hello }
                      - name: modifier
                        value:
                          chain:
                            receiver: Modifier
                            calls:
                              - name: testTag
                                args: [ { value: { string: greeting } } ]
                - call: { name: Button, content: [ { call: { name: Text } } ] }
    types:
      - name: User
        kind: data_class
        fields:
          - { name: name, type: String }
  - path: other/User.kt
    package: com.example.other
    types:
      - name: User
        kind: class
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_nested_calls_in_document_order() {
        let model = sample_model();
        let screen = &model.files[0].functions[0];
        let names: Vec<&str> = screen
            .nested_calls()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        // testTag is a chain segment, not a UI call
        assert_eq!(names, vec!["Column", "Text", "Button", "Text"]);
    }

    #[test]
    fn test_package_is_indexed() {
        let model = sample_model();
        let screen = &model.files[0].functions[0];
        assert_eq!(screen.qualified_name(), "com.example.ui.ProfileScreen");
        assert_eq!(screen.id(), "com.example.ui.ProfileScreen:12");
        assert!(screen.has_annotation("Composable"));
    }

    #[test]
    fn test_resolve_type_prefers_same_package() {
        let model = sample_model();
        let found = model.resolve_type("User", "com.example.ui").unwrap();
        assert_eq!(found.kind, TypeDeclKind::DataClass);

        let found = model.resolve_type("com.example.other.User", "").unwrap();
        assert_eq!(found.kind, TypeDeclKind::Class);
    }

    #[test]
    fn test_resolve_call_by_target() {
        let model = sample_model().with_compose_library().unwrap();
        let mut call = CallExpr::new("ProfileScreen");
        assert!(model.resolve_call(&call, "com.example.ui").is_some());

        call.target = Some("com.missing.ProfileScreen".into());
        assert!(model.resolve_call(&call, "com.example.ui").is_none());
    }

    #[test]
    fn test_expr_text() {
        let call = CallExpr {
            name: "KeyboardOptions".into(),
            args: vec![Argument {
                name: Some("keyboardType".into()),
                value: Expr::Literal("KeyboardType.Email".into()),
            }],
            ..Default::default()
        };
        assert_eq!(
            call.text(),
            "KeyboardOptions(keyboardType = KeyboardType.Email)"
        );
    }

    #[test]
    fn test_annotation_simple_name() {
        assert_eq!(
            annotation_simple_name("@androidx.compose.runtime.Composable"),
            "Composable"
        );
        assert_eq!(annotation_simple_name("Preview(showBackground = true)"), "Preview");
    }

    #[test]
    fn test_compose_library_loads() {
        let library = SourceModel::compose_library().unwrap();
        let text_field = library
            .declarations()
            .find(|d| d.name == "TextField")
            .unwrap();
        assert!(text_field.has_annotation("Composable"));
        assert!(text_field.parameter("keyboardOptions").is_some());
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(sample_model().hash(), sample_model().hash());
        assert!(sample_model().hash().starts_with("sha256:"));
    }

    #[test]
    fn test_json_roundtrip() {
        let model = sample_model();
        let json = model.to_json().unwrap();
        let back = SourceModel::from_json(&json).unwrap();
        assert_eq!(back.files.len(), 2);
        assert_eq!(back.files[0].functions[0].body, model.files[0].functions[0].body);
    }
}
