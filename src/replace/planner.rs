//! Migration planning.
//!
//! A [`MigrationPlan`] is a pure value describing a replacement: the new
//! type, the complete attribute set of the new element expressed as
//! [`AttributeChange`]s, and the structural [`SideEffect`]s that keep the
//! graph consistent. Nothing is mutated while planning.

use serde::Serialize;
use tracing::debug;

use crate::{
    MorphError, Result,
    diagram::{
        Diagram, Element, ElementId, ElementType, EventDefinitionType, FormalExpression, LoopCharacteristics,
        element::{accepts_incoming_flow, accepts_outgoing_flow},
    },
    replace::target::{CandidateDescriptor, FlowVariant, ReplaceTarget, TargetSpec},
};

/// One attribute of the replacement element.
///
/// Attributes not listed in a plan keep their defaults.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "attribute", content = "value", rename_all = "snake_case")]
pub enum AttributeChange {
    Name(Option<String>),
    EventDefinition(Option<EventDefinitionType>),
    Interrupting(bool),
    LoopCharacteristics(Option<LoopCharacteristics>),
    Expanded(bool),
    TriggeredByEvent(bool),
    ForCompensation(bool),
    DefaultFlow(Option<ElementId>),
    ConditionExpression(Option<FormalExpression>),
}

/// Structural change applied after the replacement is in place.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SideEffect {
    /// Point the default flow of `source` at `flow`, or clear it.
    SetDefaultFlow {
        source: ElementId,
        flow: Option<ElementId>,
    },
    /// Remove a sequence flow the new element cannot keep.
    RemoveConnection {
        id: ElementId,
    },
    /// Remove a child or attached element the new element cannot keep.
    RemoveElement {
        id: ElementId,
    },
    /// Drop the condition expression of a surviving flow.
    ClearCondition {
        id: ElementId,
    },
}

/// Everything needed to replace one element.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MigrationPlan {
    /// element being replaced; the replacement keeps this id
    pub element: ElementId,
    /// chosen replacement
    pub descriptor: CandidateDescriptor,
    /// type of the replacement
    pub new_type: ElementType,
    /// attributes of the replacement, applied to a fresh attribute set
    pub attributes: Vec<AttributeChange>,
    /// structural follow-ups, applied in order
    pub side_effects: Vec<SideEffect>,
}

/// Compute how `element` migrates to the target of `descriptor`.
pub fn plan_migration(
    diagram: &Diagram,
    element: &Element,
    descriptor: &CandidateDescriptor,
) -> Result<MigrationPlan> {
    let plan = match &descriptor.target {
        ReplaceTarget::Element(spec) => {
            if element.element_type.is_connection() || element.element_type == ElementType::Process {
                return Err(MorphError::InvalidArgument(format!("{} cannot be replaced with {}", element.id, descriptor.id)));
            }
            plan_element(diagram, element, descriptor, spec)?
        }
        ReplaceTarget::Flow(variant) => {
            if !element.element_type.is_connection() {
                return Err(MorphError::InvalidArgument(format!("{} is not a sequence flow", element.id)));
            }
            plan_flow(diagram, element, descriptor, *variant)?
        }
    };

    debug!("planned {} for {}: {:?} with {} side effects", descriptor.id, element.id, plan.new_type, plan.side_effects.len());
    Ok(plan)
}

fn plan_element(
    diagram: &Diagram,
    element: &Element,
    descriptor: &CandidateDescriptor,
    spec: &TargetSpec,
) -> Result<MigrationPlan> {
    let old_type = element.element_type;
    let new_type = spec.element_type;
    let old = &element.attributes;
    let into_event_sub_process = new_type == ElementType::SubProcess && spec.triggered_by_event;

    let mut attributes = vec![AttributeChange::Name(old.name.clone())];

    if new_type.is_event() {
        attributes.push(AttributeChange::EventDefinition(spec.event_definition));
        if matches!(new_type, ElementType::StartEvent | ElementType::BoundaryEvent) {
            attributes.push(AttributeChange::Interrupting(spec.is_interrupting.unwrap_or(true)));
        }
    }

    if new_type.is_activity() {
        if !into_event_sub_process && old.loop_characteristics.is_some() {
            attributes.push(AttributeChange::LoopCharacteristics(old.loop_characteristics.clone()));
        }
        if old_type.is_activity() && old.is_for_compensation {
            attributes.push(AttributeChange::ForCompensation(true));
        }
    }

    if new_type.is_sub_process() {
        let expanded = match spec.is_expanded {
            Some(expanded) => expanded,
            None if old_type.is_sub_process() => old.is_expanded,
            None => true,
        };
        attributes.push(AttributeChange::Expanded(expanded));
    }
    if new_type == ElementType::SubProcess {
        attributes.push(AttributeChange::TriggeredByEvent(spec.triggered_by_event));
    }

    let keeps_incoming = accepts_incoming_flow(new_type, spec.triggered_by_event);
    let keeps_outgoing = accepts_outgoing_flow(new_type, spec.triggered_by_event);

    if let Some(flow) = old.default_flow.as_ref()
        && keeps_outgoing
        && old_type.can_carry_default_flow()
        && new_type.can_carry_default_flow()
        && element.outgoing.contains(flow)
    {
        attributes.push(AttributeChange::DefaultFlow(Some(flow.clone())));
    }

    let mut side_effects = Vec::new();
    if !keeps_incoming {
        side_effects.extend(element.incoming.iter().map(|id| SideEffect::RemoveConnection {
            id: id.clone(),
        }));
    }
    if !keeps_outgoing {
        side_effects.extend(element.outgoing.iter().map(|id| SideEffect::RemoveConnection {
            id: id.clone(),
        }));
    } else if !new_type.accepts_condition_expression() {
        for id in element.outgoing.iter() {
            let flow = diagram.element(id)?;
            if flow.attributes.condition_expression.is_some() {
                side_effects.push(SideEffect::ClearCondition {
                    id: id.clone(),
                });
            }
        }
    }

    if !new_type.can_hold_children() {
        for id in element.children.iter() {
            let child = diagram.element(id)?;
            side_effects.push(if child.element_type.is_connection() {
                SideEffect::RemoveConnection {
                    id: id.clone(),
                }
            } else {
                SideEffect::RemoveElement {
                    id: id.clone(),
                }
            });
        }
    }
    if !new_type.is_activity() || into_event_sub_process {
        side_effects.extend(element.attachers.iter().map(|id| SideEffect::RemoveElement {
            id: id.clone(),
        }));
    }

    Ok(MigrationPlan {
        element: element.id.clone(),
        descriptor: *descriptor,
        new_type,
        attributes,
        side_effects,
    })
}

fn plan_flow(
    diagram: &Diagram,
    flow: &Element,
    descriptor: &CandidateDescriptor,
    variant: FlowVariant,
) -> Result<MigrationPlan> {
    let source = diagram.source_of(flow).ok_or(MorphError::InvalidArgument(format!("sequence flow {} has no source", flow.id)))?;
    let is_default = flow.is_default_of(source);

    let mut attributes = vec![AttributeChange::Name(flow.attributes.name.clone())];
    let mut side_effects = Vec::new();

    match variant {
        FlowVariant::Sequence => {
            attributes.push(AttributeChange::ConditionExpression(None));
            if is_default {
                side_effects.push(SideEffect::SetDefaultFlow {
                    source: source.id.clone(),
                    flow: None,
                });
            }
        }
        FlowVariant::Default => {
            attributes.push(AttributeChange::ConditionExpression(None));
            side_effects.push(SideEffect::SetDefaultFlow {
                source: source.id.clone(),
                flow: Some(flow.id.clone()),
            });
        }
        FlowVariant::Conditional => {
            attributes.push(AttributeChange::ConditionExpression(Some(FormalExpression::new(""))));
            if is_default {
                side_effects.push(SideEffect::SetDefaultFlow {
                    source: source.id.clone(),
                    flow: None,
                });
            }
        }
    }

    Ok(MigrationPlan {
        element: flow.id.clone(),
        descriptor: *descriptor,
        new_type: ElementType::SequenceFlow,
        attributes,
        side_effects,
    })
}
