//! Interactive elements, interaction types and scenarios

use serde::{Deserialize, Serialize};

/// Expected content of a text field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardShape {
    #[default]
    Text,
    Ascii,
    Number,
    Phone,
    Uri,
    Email,
    Password,
    NumberPassword,
    Decimal,
}

/// What kind of input a keyboard shape calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCategory {
    Numeric,
    Text,
    Email,
}

impl KeyboardShape {
    /// Parse a `KeyboardType` entry name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Text" => Some(KeyboardShape::Text),
            "Ascii" => Some(KeyboardShape::Ascii),
            "Number" => Some(KeyboardShape::Number),
            "Phone" => Some(KeyboardShape::Phone),
            "Uri" => Some(KeyboardShape::Uri),
            "Email" => Some(KeyboardShape::Email),
            "Password" => Some(KeyboardShape::Password),
            "NumberPassword" => Some(KeyboardShape::NumberPassword),
            "Decimal" => Some(KeyboardShape::Decimal),
            _ => None,
        }
    }

    pub fn category(&self) -> InputCategory {
        match self {
            KeyboardShape::Number
            | KeyboardShape::Phone
            | KeyboardShape::Decimal
            | KeyboardShape::NumberPassword => InputCategory::Numeric,
            KeyboardShape::Email => InputCategory::Email,
            KeyboardShape::Text
            | KeyboardShape::Ascii
            | KeyboardShape::Uri
            | KeyboardShape::Password => InputCategory::Text,
        }
    }
}

/// Classification of an interactive element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    TextInput {
        keyboard: KeyboardShape,
    },
    Clickable,
    VisibilityOnly,
    /// A developer-written composable whose body must be searched instead.
    /// The classifier flattens these; they never reach the resolver.
    Opaque {
        declaration: String,
    },
}

impl ElementKind {
    pub fn is_opaque(&self) -> bool {
        matches!(self, ElementKind::Opaque { .. })
    }
}

/// A tagged UI element found during classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveElement {
    /// Test tag, the lookup key in generated tests
    pub tag: String,
    pub kind: ElementKind,
    /// Callee name at the call site
    pub callee: String,
    #[serde(default)]
    pub line: usize,
}

/// One concrete test action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "action", rename_all = "snake_case")]
pub enum InteractionType {
    Visibility,
    Clickable(ClickAction),
    Input(InputAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    NoClick,
    PerformClick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", content = "value", rename_all = "snake_case")]
pub enum InputAction {
    NoInput,
    NumberInput(i64),
    RandomStringInput(String),
    ValidEmailInput(String),
}

impl InteractionType {
    /// Short phrase used in test names
    pub fn description(&self) -> &'static str {
        match self {
            InteractionType::Visibility => "visibility check",
            InteractionType::Clickable(ClickAction::NoClick) => "no click",
            InteractionType::Clickable(ClickAction::PerformClick) => "click is performed",
            InteractionType::Input(InputAction::NoInput) => "no input",
            InteractionType::Input(InputAction::NumberInput(_)) => "number input",
            InteractionType::Input(InputAction::RandomStringInput(_)) => "random string input",
            InteractionType::Input(InputAction::ValidEmailInput(_)) => "valid email input",
        }
    }

    /// Text typed into the element, if this action types anything
    pub fn typed_text(&self) -> Option<String> {
        match self {
            InteractionType::Input(InputAction::NumberInput(n)) => Some(n.to_string()),
            InteractionType::Input(InputAction::RandomStringInput(s))
            | InteractionType::Input(InputAction::ValidEmailInput(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Whether the action leaves the element untouched
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            InteractionType::Clickable(ClickAction::NoClick)
                | InteractionType::Input(InputAction::NoInput)
        )
    }
}

/// One scenario step: a tag and the action applied to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    pub tag: String,
    pub interaction: InteractionType,
}

impl TestNode {
    pub fn new(tag: impl Into<String>, interaction: InteractionType) -> Self {
        Self {
            tag: tag.into(),
            interaction,
        }
    }
}

/// An ordered sequence of steps, one per element in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<TestNode>,
}

impl Scenario {
    pub fn new(steps: Vec<TestNode>) -> Self {
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `"email random string input and submit click is performed"`
    pub fn name(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{} {}", s.tag, s.interaction.description()))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}
