//! Scenario synthesis
//!
//! One scenario per combination of element actions. Elements keep their
//! traversal order as step order; the last element varies fastest.

use crate::combine::{count, expand};
use crate::interaction::{InteractiveElement, Scenario, TestNode};
use crate::resolve::InteractionResolver;
use tracing::trace;

/// Every scenario for `elements`.
///
/// No elements means no scenarios: the result is empty rather than one
/// empty scenario.
pub fn synthesize(
    elements: &[InteractiveElement],
    resolver: &mut InteractionResolver<'_>,
) -> Vec<Scenario> {
    let elements: Vec<&InteractiveElement> =
        elements.iter().filter(|e| !e.kind.is_opaque()).collect();
    if elements.is_empty() {
        return Vec::new();
    }

    let slots: Vec<_> = elements.iter().map(|e| resolver.resolve(e)).collect();
    trace!(elements = elements.len(), scenarios = count(&slots), "synthesizing scenarios");
    expand(&slots)
        .into_iter()
        .map(|tuple| {
            Scenario::new(
                elements
                    .iter()
                    .zip(tuple)
                    .map(|(element, interaction)| TestNode::new(element.tag.clone(), interaction))
                    .collect(),
            )
        })
        .collect()
}
