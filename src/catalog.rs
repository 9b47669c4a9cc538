//! Value catalog: representative literal values per type
//!
//! For every [`TypeDescriptor`] the catalog produces a small, ordered set of
//! candidate values:
//!
//! | Type | Candidates |
//! |------|------------|
//! | `String` | one random string, plus `""` with `useEmptyStrings` |
//! | numeric | one random number, plus `-1` with `useNegativeNumbers` |
//! | `Boolean` | `true`, `false` |
//! | enum | every entry |
//! | data class | Cartesian product of its fields' candidates |
//! | function | one no-op lambda |
//! | collection | empty, plus a two-element sample |
//! | unknown | none (the caller skips the slot) |
//!
//! Enums and structured types report their qualified name as an import, once
//! per visit, in visit order. Deduplication is the caller's job.

use crate::combine::expand;
use crate::payload::{Payloads, MOCK_NUMBER_BOUND, MOCK_STRING_LENGTH, NEGATIVE_SENTINEL};
use crate::settings::Rules;
use crate::types::{CollectionKind, Parameter, PrimitiveKind, TypeDescriptor};
use crate::util::kotlin_string;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Elements in the non-empty sample collection
pub const SAMPLE_COLLECTION_SIZE: usize = 2;

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    String {
        value: String,
    },
    Number {
        primitive: PrimitiveKind,
        value: i64,
    },
    Boolean {
        value: bool,
    },
    EnumEntry {
        type_name: String,
        entry: String,
    },
    Constructed {
        type_name: String,
        fields: Vec<NamedValue>,
    },
    NoOp {
        arity: usize,
    },
    Collection {
        collection: CollectionKind,
        items: Vec<Value>,
    },
}

/// A value bound to a parameter or field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: Value,
}

impl NamedValue {
    /// `name = literal`
    pub fn render(&self) -> String {
        format!("{} = {}", self.name, self.value.render())
    }
}

impl Value {
    /// Kotlin source literal
    pub fn render(&self) -> String {
        match self {
            Value::String { value } => kotlin_string(value),
            Value::Number { primitive, value } => render_number(*primitive, *value),
            Value::Boolean { value } => value.to_string(),
            Value::EnumEntry { type_name, entry } => format!("{}.{}", type_name, entry),
            Value::Constructed { type_name, fields } => {
                let args: Vec<String> = fields.iter().map(NamedValue::render).collect();
                format!("{}({})", type_name, args.join(", "))
            }
            Value::NoOp { arity } => match arity {
                0 | 1 => "{}".to_string(),
                n => format!("{{ {} -> }}", vec!["_"; *n].join(", ")),
            },
            Value::Collection { collection, items } => {
                if items.is_empty() {
                    match collection {
                        CollectionKind::List => "emptyList()".to_string(),
                        CollectionKind::Set => "emptySet()".to_string(),
                        CollectionKind::Array => "emptyArray()".to_string(),
                    }
                } else {
                    let builder = match collection {
                        CollectionKind::List => "listOf",
                        CollectionKind::Set => "setOf",
                        CollectionKind::Array => "arrayOf",
                    };
                    let items: Vec<String> = items.iter().map(Value::render).collect();
                    format!("{}({})", builder, items.join(", "))
                }
            }
        }
    }
}

fn render_number(primitive: PrimitiveKind, value: i64) -> String {
    match primitive {
        PrimitiveKind::Long => format!("{}L", value),
        PrimitiveKind::Float => format!("{}.0f", value),
        PrimitiveKind::Double => format!("{}.0", value),
        _ => value.to_string(),
    }
}

/// Candidates for one type, plus the enums and structured types visited on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogOutput {
    pub values: Vec<Value>,
    pub imports: Vec<String>,
}

/// Produces candidate values per type
#[derive(Debug, Clone)]
pub struct ValueCatalog {
    rules: Rules,
    payloads: Payloads,
}

impl ValueCatalog {
    pub fn new(rules: Rules, payloads: Payloads) -> Self {
        Self { rules, payloads }
    }

    /// Candidate values for `typ`, in a fixed order
    pub fn values_for(&mut self, typ: &TypeDescriptor) -> CatalogOutput {
        let mut imports = Vec::new();
        let values = self.collect(typ, &mut imports);
        CatalogOutput { values, imports }
    }

    fn collect(&mut self, typ: &TypeDescriptor, imports: &mut Vec<String>) -> Vec<Value> {
        match typ {
            TypeDescriptor::Primitive { primitive } => self.primitive_values(*primitive),
            TypeDescriptor::Enum {
                name,
                qualified_name,
                variants,
            } => {
                imports.push(qualified_name.clone());
                variants
                    .iter()
                    .map(|entry| Value::EnumEntry {
                        type_name: name.clone(),
                        entry: entry.clone(),
                    })
                    .collect()
            }
            TypeDescriptor::Structured {
                name,
                qualified_name,
                fields,
            } => {
                imports.push(qualified_name.clone());
                self.structured_values(name, fields, imports)
            }
            TypeDescriptor::Function { arity } => vec![Value::NoOp { arity: *arity }],
            TypeDescriptor::Collection {
                collection,
                element,
            } => {
                let elements = self.collect(element, imports);
                let mut values = vec![Value::Collection {
                    collection: *collection,
                    items: Vec::new(),
                }];
                if !elements.is_empty() {
                    let items = (0..SAMPLE_COLLECTION_SIZE)
                        .map(|i| elements[i % elements.len()].clone())
                        .collect();
                    values.push(Value::Collection {
                        collection: *collection,
                        items,
                    });
                }
                values
            }
            TypeDescriptor::Unknown => Vec::new(),
        }
    }

    fn primitive_values(&mut self, primitive: PrimitiveKind) -> Vec<Value> {
        match primitive {
            PrimitiveKind::Boolean => vec![
                Value::Boolean { value: true },
                Value::Boolean { value: false },
            ],
            PrimitiveKind::String => {
                let mut values = vec![Value::String {
                    value: self.payloads.string(MOCK_STRING_LENGTH),
                }];
                if self.rules.use_empty_strings {
                    values.push(Value::String {
                        value: String::new(),
                    });
                }
                values
            }
            numeric => {
                let mut values = vec![Value::Number {
                    primitive: numeric,
                    value: self.payloads.number(MOCK_NUMBER_BOUND),
                }];
                if self.rules.use_negative_numbers {
                    values.push(Value::Number {
                        primitive: numeric,
                        value: NEGATIVE_SENTINEL,
                    });
                }
                values
            }
        }
    }

    // Fields without candidates are left out of the constructor call instead
    // of emptying the whole product.
    fn structured_values(
        &mut self,
        name: &str,
        fields: &[Parameter],
        imports: &mut Vec<String>,
    ) -> Vec<Value> {
        let mut names = Vec::with_capacity(fields.len());
        let mut slots = Vec::with_capacity(fields.len());
        for field in fields {
            let candidates = self.collect(&field.typ, imports);
            if candidates.is_empty() {
                debug!(type_name = name, field = %field.name, "dropping field without candidates");
                continue;
            }
            trace!(
                type_name = name,
                field = %field.name,
                count = candidates.len(),
                "field candidates"
            );
            names.push(field.name.clone());
            slots.push(candidates);
        }

        expand(&slots)
            .into_iter()
            .map(|tuple| Value::Constructed {
                type_name: name.to_string(),
                fields: names
                    .iter()
                    .cloned()
                    .zip(tuple)
                    .map(|(name, value)| NamedValue { name, value })
                    .collect(),
            })
            .collect()
    }
}
