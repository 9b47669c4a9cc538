//! Semantic type descriptors for function-under-test parameters
//!
//! Declared type text (`String`, `List<User>?`, `(Int) -> Unit`) is resolved
//! against the source tree into a closed [`TypeDescriptor`]. Resolution never
//! fails: anything it cannot make sense of becomes [`TypeDescriptor::Unknown`].

use crate::source::{ParamDecl, SourceTree, TypeDeclKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A parameter with its resolved type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub typ: TypeDescriptor,
}

/// Semantic shape of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive {
        primitive: PrimitiveKind,
    },
    Enum {
        name: String,
        /// Package-qualified name, tracked as an import
        qualified_name: String,
        variants: Vec<String>,
    },
    Structured {
        /// Simple name, used as the constructor
        name: String,
        /// Package-qualified name, tracked as an import
        qualified_name: String,
        fields: Vec<Parameter>,
    },
    Function {
        arity: usize,
    },
    Collection {
        collection: CollectionKind,
        element: Box<TypeDescriptor>,
    },
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    String,
    Int,
    Long,
    Float,
    Double,
    Short,
    Boolean,
}

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" | "kotlin.String" => Some(PrimitiveKind::String),
            "Int" | "kotlin.Int" => Some(PrimitiveKind::Int),
            "Long" | "kotlin.Long" => Some(PrimitiveKind::Long),
            "Float" | "kotlin.Float" => Some(PrimitiveKind::Float),
            "Double" | "kotlin.Double" => Some(PrimitiveKind::Double),
            "Short" | "kotlin.Short" => Some(PrimitiveKind::Short),
            "Boolean" | "kotlin.Boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    List,
    Set,
    Array,
}

impl CollectionKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "List" | "MutableList" | "ArrayList" | "Collection" | "Iterable" => {
                Some(CollectionKind::List)
            }
            "Set" | "MutableSet" | "HashSet" => Some(CollectionKind::Set),
            "Array" => Some(CollectionKind::Array),
            _ => None,
        }
    }
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive { primitive: kind }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeDescriptor::Unknown)
    }
}

/// Resolves declared type text into [`TypeDescriptor`]s
pub struct TypeResolver<'a> {
    tree: &'a dyn SourceTree,
}

impl<'a> TypeResolver<'a> {
    pub fn new(tree: &'a dyn SourceTree) -> Self {
        Self { tree }
    }

    /// Resolve every declared parameter, in declaration order
    pub fn parameters(&self, params: &[ParamDecl], package: &str) -> Vec<Parameter> {
        params
            .iter()
            .map(|p| Parameter {
                name: p.name.clone(),
                typ: self.resolve(&p.type_name, package),
            })
            .collect()
    }

    /// Resolve one declared type
    pub fn resolve(&self, type_name: &str, package: &str) -> TypeDescriptor {
        let mut path = Vec::new();
        self.resolve_in(type_name, package, &mut path)
    }

    // `path` holds the qualified names of structured types currently being
    // expanded; a type that reaches back into it resolves to Unknown.
    fn resolve_in(&self, type_name: &str, package: &str, path: &mut Vec<String>) -> TypeDescriptor {
        let text = strip_annotations(type_name.trim());
        let text = text.strip_suffix('?').unwrap_or(text).trim();
        let text = strip_parens(text);

        if let Some(arity) = function_arity(text) {
            return TypeDescriptor::Function { arity };
        }

        let (base, generics) = split_generics(text);

        if let Some(primitive) = PrimitiveKind::from_name(base) {
            return TypeDescriptor::primitive(primitive);
        }

        if let Some(collection) = CollectionKind::from_name(base) {
            let element = match generics.first() {
                Some(arg) => self.resolve_in(arg, package, path),
                None => TypeDescriptor::Unknown,
            };
            return TypeDescriptor::Collection {
                collection,
                element: Box::new(element),
            };
        }

        let Some(decl) = self.tree.resolve_type(base, package) else {
            debug!(type_name = base, "unresolved parameter type");
            return TypeDescriptor::Unknown;
        };

        match decl.kind {
            TypeDeclKind::EnumClass => TypeDescriptor::Enum {
                name: decl.name.clone(),
                qualified_name: decl.qualified_name(),
                variants: decl.entries.clone(),
            },
            TypeDeclKind::DataClass => {
                let qualified_name = decl.qualified_name();
                if path.contains(&qualified_name) {
                    debug!(type_name = %qualified_name, "self-referential field type");
                    return TypeDescriptor::Unknown;
                }
                path.push(qualified_name.clone());
                let fields = decl
                    .fields
                    .iter()
                    .map(|f| Parameter {
                        name: f.name.clone(),
                        typ: self.resolve_in(&f.type_name, &decl.package, path),
                    })
                    .collect();
                path.pop();
                TypeDescriptor::Structured {
                    name: decl.name.clone(),
                    qualified_name,
                    fields,
                }
            }
            TypeDeclKind::Class | TypeDeclKind::Interface | TypeDeclKind::Object => {
                debug!(type_name = %decl.qualified_name(), "unsupported type shape");
                TypeDescriptor::Unknown
            }
        }
    }
}

fn strip_annotations(text: &str) -> &str {
    let mut rest = text;
    while let Some(after) = rest.strip_prefix('@') {
        rest = match after.find(char::is_whitespace) {
            Some(end) => after[end..].trim_start(),
            None => "",
        };
    }
    rest
}

// `(() -> Unit)` -> `() -> Unit`, only when the outer parens wrap everything
fn strip_parens(text: &str) -> &str {
    let mut current = text;
    while current.starts_with('(') && current.ends_with(')') {
        let inner = &current[1..current.len() - 1];
        if matching_close(current, 0) != Some(current.len() - 1) {
            break;
        }
        current = inner.trim();
    }
    current
}

fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut prev = ' ';
    for (i, c) in text.char_indices().skip(open) {
        match c {
            '(' | '<' => depth += 1,
            // the `>` of an arrow is not a bracket
            '>' if prev == '-' => {}
            ')' | '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = c;
    }
    None
}

fn function_arity(text: &str) -> Option<usize> {
    if let Some(rest) = text.strip_prefix("Function") {
        if let Some(digits) = rest.split('<').next() {
            if let Ok(n) = digits.parse::<usize>() {
                return Some(n);
            }
        }
    }

    // Receiver types (`RowScope.() -> Unit`) take their receiver implicitly
    let start = text.find('(')?;
    let close = matching_close(text, start)?;
    if !text[close + 1..].trim_start().starts_with("->") {
        return None;
    }
    let params = text[start + 1..close].trim();
    if params.is_empty() {
        Some(0)
    } else {
        Some(split_top_level(params).len())
    }
}

fn split_generics(text: &str) -> (&str, Vec<&str>) {
    match text.find('<') {
        Some(open) if text.ends_with('>') => {
            let base = text[..open].trim();
            let inner = &text[open + 1..text.len() - 1];
            (base, split_top_level(inner))
        }
        _ => (text, Vec::new()),
    }
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = ' ';
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' => depth += 1,
            '>' if prev == '-' => {}
            ')' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(text[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceModel;
    use rstest::rstest;

    fn model() -> SourceModel {
        SourceModel::from_yaml(
            r#"
files:
  - path: model/User.kt
    package: com.example.model
    types:
      - name: User
        kind: data_class
        fields:
          - { name: name, type: String }
          - { name: age, type: Int }
          - { name: role, type: Role }
      - name: Role
        kind: enum_class
        entries: [Admin, Guest]
      - name: Node
        kind: data_class
        fields:
          - { name: label, type: String }
          - { name: next, type: Node? }
      - name: Repository
        kind: interface
"#,
        )
        .unwrap()
    }

    #[rstest]
    #[case("String", PrimitiveKind::String)]
    #[case("Int?", PrimitiveKind::Int)]
    #[case("kotlin.Long", PrimitiveKind::Long)]
    #[case("Boolean", PrimitiveKind::Boolean)]
    #[case("Short", PrimitiveKind::Short)]
    fn test_primitives(#[case] text: &str, #[case] expected: PrimitiveKind) {
        let model = model();
        let resolver = TypeResolver::new(&model);
        assert_eq!(resolver.resolve(text, ""), TypeDescriptor::primitive(expected));
    }

    #[rstest]
    #[case("() -> Unit", 0)]
    #[case("(String) -> Unit", 1)]
    #[case("((Boolean) -> Unit)?", 1)]
    #[case("(Int, Map<String, Int>) -> Boolean", 2)]
    #[case("@Composable RowScope.() -> Unit", 0)]
    #[case("Function2<Int, Int, Unit>", 2)]
    fn test_function_types(#[case] text: &str, #[case] arity: usize) {
        let model = model();
        let resolver = TypeResolver::new(&model);
        assert_eq!(resolver.resolve(text, ""), TypeDescriptor::Function { arity });
    }

    #[test]
    fn test_structured_with_enum_field() {
        let model = model();
        let resolver = TypeResolver::new(&model);
        let TypeDescriptor::Structured {
            name,
            qualified_name,
            fields,
        } = resolver.resolve("User", "com.example.model")
        else {
            panic!("expected structured type");
        };
        assert_eq!(name, "User");
        assert_eq!(qualified_name, "com.example.model.User");
        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields[2].typ,
            TypeDescriptor::Enum {
                name: "Role".into(),
                qualified_name: "com.example.model.Role".into(),
                variants: vec!["Admin".into(), "Guest".into()],
            }
        );
    }

    #[test]
    fn test_self_reference_becomes_unknown() {
        let model = model();
        let resolver = TypeResolver::new(&model);
        let TypeDescriptor::Structured { fields, .. } = resolver.resolve("Node", "") else {
            panic!("expected structured type");
        };
        assert_eq!(fields[1].name, "next");
        assert!(fields[1].typ.is_unknown());
    }

    #[test]
    fn test_collection_of_structured() {
        let model = model();
        let resolver = TypeResolver::new(&model);
        let TypeDescriptor::Collection {
            collection,
            element,
        } = resolver.resolve("List<Role>", "")
        else {
            panic!("expected collection");
        };
        assert_eq!(collection, CollectionKind::List);
        assert!(matches!(*element, TypeDescriptor::Enum { .. }));
    }

    #[test]
    fn test_unsupported_and_unresolved() {
        let model = model();
        let resolver = TypeResolver::new(&model);
        assert!(resolver.resolve("Repository", "").is_unknown());
        assert!(resolver.resolve("NavController", "").is_unknown());
    }
}
