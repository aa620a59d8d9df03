use serde::Serialize;

use crate::diagram::{Element, ElementType, EventDefinitionType};

/// Type combination an element is replaced with.
///
/// `is_interrupting` and `is_expanded` are only compared and applied when a
/// target pins them.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub element_type: ElementType,
    pub event_definition: Option<EventDefinitionType>,
    pub is_interrupting: Option<bool>,
    pub triggered_by_event: bool,
    pub is_expanded: Option<bool>,
}

impl TargetSpec {
    pub const fn of(element_type: ElementType) -> Self {
        Self {
            element_type,
            event_definition: None,
            is_interrupting: None,
            triggered_by_event: false,
            is_expanded: None,
        }
    }

    pub const fn with_event(
        self,
        event_definition: EventDefinitionType,
    ) -> Self {
        Self {
            event_definition: Some(event_definition),
            ..self
        }
    }

    pub const fn interrupting(
        self,
        is_interrupting: bool,
    ) -> Self {
        Self {
            is_interrupting: Some(is_interrupting),
            ..self
        }
    }

    pub const fn expanded(
        self,
        is_expanded: bool,
    ) -> Self {
        Self {
            is_expanded: Some(is_expanded),
            ..self
        }
    }

    pub const fn triggered_by_event(self) -> Self {
        Self {
            triggered_by_event: true,
            ..self
        }
    }

    /// Whether `element` already has exactly this type combination.
    pub fn matches(
        &self,
        element: &Element,
    ) -> bool {
        let attrs = &element.attributes;
        self.element_type == element.element_type
            && self.event_definition == attrs.event_definition
            && self.triggered_by_event == attrs.triggered_by_event
            && self.is_expanded.is_none_or(|expanded| expanded == attrs.is_expanded)
            && self.is_interrupting.is_none_or(|interrupting| interrupting == attrs.is_interrupting)
    }
}

/// Variant a sequence flow can be morphed into.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FlowVariant {
    /// Plain sequence flow, neither default nor conditional.
    Sequence,
    /// Default flow of its source.
    Default,
    /// Flow guarded by a condition expression.
    Conditional,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum ReplaceTarget {
    Element(TargetSpec),
    Flow(FlowVariant),
}

/// One selectable replacement.
///
/// Computed fresh whenever a menu opens; `id` is the stable entry identifier
/// used to trigger it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub target: ReplaceTarget,
}

impl CandidateDescriptor {
    pub const fn element(
        id: &'static str,
        label: &'static str,
        target: TargetSpec,
    ) -> Self {
        Self {
            id,
            label,
            target: ReplaceTarget::Element(target),
        }
    }

    pub const fn flow(
        id: &'static str,
        label: &'static str,
        variant: FlowVariant,
    ) -> Self {
        Self {
            id,
            label,
            target: ReplaceTarget::Flow(variant),
        }
    }

    /// Element target of this descriptor, none for flow variants.
    pub fn spec(&self) -> Option<&TargetSpec> {
        match &self.target {
            ReplaceTarget::Element(spec) => Some(spec),
            ReplaceTarget::Flow(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_unpinned_flags() {
        let mut event = Element::new("StartEvent_1", ElementType::StartEvent);
        event.attributes.event_definition = Some(EventDefinitionType::Message);
        event.attributes.is_interrupting = false;

        let message = TargetSpec::of(ElementType::StartEvent).with_event(EventDefinitionType::Message);
        assert!(message.matches(&event));
        assert!(!message.interrupting(true).matches(&event));
        assert!(message.interrupting(false).matches(&event));
        assert!(!TargetSpec::of(ElementType::StartEvent).matches(&event));
    }

    #[test]
    fn test_matches_expansion_and_trigger() {
        let mut sub_process = Element::new("SubProcess_1", ElementType::SubProcess);
        sub_process.attributes.is_expanded = true;

        let plain = TargetSpec::of(ElementType::SubProcess);
        assert!(plain.matches(&sub_process));
        assert!(plain.expanded(true).matches(&sub_process));
        assert!(!plain.expanded(false).matches(&sub_process));
        assert!(!plain.triggered_by_event().matches(&sub_process));
    }
}
