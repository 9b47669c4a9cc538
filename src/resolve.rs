//! Interaction-type resolution
//!
//! Maps each classified element to its ordered candidate actions. Flags are
//! read per tag, so a `forNode` override replaces only the flag it names.

use crate::interaction::{
    ClickAction, ElementKind, InputAction, InputCategory, InteractionType, InteractiveElement,
    KeyboardShape,
};
use crate::payload::{Payloads, INPUT_NUMBER_BOUND, INPUT_STRING_LENGTH, VALID_EMAIL};
use crate::settings::Settings;
use tracing::trace;

pub struct InteractionResolver<'a> {
    settings: &'a Settings,
    payloads: Payloads,
}

impl<'a> InteractionResolver<'a> {
    pub fn new(settings: &'a Settings, payloads: Payloads) -> Self {
        Self { settings, payloads }
    }

    /// Candidate actions for `element`, optional negative case first
    pub fn resolve(&mut self, element: &InteractiveElement) -> Vec<InteractionType> {
        let rules = self.settings.rules_for(&element.tag);
        let candidates = match &element.kind {
            ElementKind::VisibilityOnly => vec![InteractionType::Visibility],
            ElementKind::Clickable => {
                let mut out = Vec::with_capacity(2);
                if rules.apply_click_ignore {
                    out.push(InteractionType::Clickable(ClickAction::NoClick));
                }
                out.push(InteractionType::Clickable(ClickAction::PerformClick));
                out
            }
            ElementKind::TextInput { keyboard } => {
                let mut out = Vec::with_capacity(3);
                if rules.use_empty_strings {
                    out.push(InteractionType::Input(InputAction::NoInput));
                }
                out.extend(self.inputs_for(*keyboard));
                out
            }
            ElementKind::Opaque { .. } => Vec::new(),
        };
        trace!(tag = %element.tag, count = candidates.len(), "resolved interactions");
        candidates
    }

    fn inputs_for(&mut self, keyboard: KeyboardShape) -> Vec<InteractionType> {
        match keyboard.category() {
            InputCategory::Numeric => vec![InteractionType::Input(InputAction::NumberInput(
                self.payloads.number(INPUT_NUMBER_BOUND),
            ))],
            InputCategory::Text => vec![InteractionType::Input(InputAction::RandomStringInput(
                self.payloads.string_in(INPUT_STRING_LENGTH),
            ))],
            InputCategory::Email => vec![
                InteractionType::Input(InputAction::RandomStringInput(
                    self.payloads.string_in(INPUT_STRING_LENGTH),
                )),
                InteractionType::Input(InputAction::ValidEmailInput(VALID_EMAIL.to_string())),
            ],
        }
    }
}
