//! Modeling operations outside of replacement.
//!
//! Each operation takes a snapshot and returns a new one; the behaviors that
//! keep default flows and condition expressions consistent run inside the
//! same operation, so one history entry covers them.

use serde::{Deserialize, Serialize};

use crate::{
    MorphError, Result,
    diagram::{Diagram, Element, ElementId, ElementType, FormalExpression, LoopCharacteristics},
    utils,
};

/// A single property change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum PropertyUpdate {
    Name(Option<String>),
    /// Set or remove loop characteristics of an activity. Setting one variant
    /// replaces whichever variant was active.
    LoopCharacteristics(Option<LoopCharacteristics>),
    /// Set or remove the guard of a sequence flow. Setting a guard on a
    /// default flow unmarks it as default.
    ConditionExpression(Option<FormalExpression>),
    /// Set or clear the default flow of a gateway or activity. The new
    /// default loses its guard.
    DefaultFlow(Option<ElementId>),
}

impl PropertyUpdate {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyUpdate::Name(_) => "name",
            PropertyUpdate::LoopCharacteristics(_) => "loop_characteristics",
            PropertyUpdate::ConditionExpression(_) => "condition_expression",
            PropertyUpdate::DefaultFlow(_) => "default_flow",
        }
    }
}

pub fn update_properties(
    diagram: &Diagram,
    id: &str,
    update: &PropertyUpdate,
) -> Result<Diagram> {
    let element = diagram.element(id)?;
    let mut next = diagram.clone();

    match update {
        PropertyUpdate::Name(name) => {
            next.update(id, |e| e.attributes.name = name.clone())?;
        }
        PropertyUpdate::LoopCharacteristics(lc) => {
            if !element.element_type.is_activity() || element.is_event_sub_process() {
                return Err(MorphError::InvalidArgument(format!("{} cannot carry loop characteristics", id)));
            }
            next.update(id, |e| e.attributes.loop_characteristics = lc.clone())?;
        }
        PropertyUpdate::ConditionExpression(expr) => {
            let source = flow_source(diagram, element)?;
            if expr.is_some() && element.is_default_of(source) {
                next.set_default_flow(&source.id, None)?;
            }
            next.update(id, |e| e.attributes.condition_expression = expr.clone())?;
        }
        PropertyUpdate::DefaultFlow(flow) => {
            if !element.element_type.can_carry_default_flow() {
                return Err(MorphError::InvalidArgument(format!("{} cannot carry a default flow", id)));
            }
            if let Some(flow) = flow {
                if !element.outgoing.contains(flow) {
                    return Err(MorphError::InvalidArgument(format!("{} is not an outgoing flow of {}", flow, id)));
                }
                next.update(flow, |f| f.attributes.condition_expression = None)?;
            }
            next.set_default_flow(id, flow.clone())?;
        }
    }

    Ok(next)
}

/// Move the source end of `flow` to `new_source`.
pub fn reconnect_start(
    diagram: &Diagram,
    flow: &str,
    new_source: &str,
) -> Result<Diagram> {
    let connection = connection(diagram, flow)?;
    let source = endpoint(diagram, new_source)?;
    if !source.accepts_outgoing_flow() {
        return Err(MorphError::InvalidArgument(format!("{} cannot be the source of {}", new_source, flow)));
    }

    let mut next = diagram.clone();
    let old_source = connection.source.clone();
    if old_source.as_deref() != Some(new_source) {
        if let Some(old) = old_source.as_deref() {
            next.update(old, |s| {
                s.outgoing.retain(|f| f != flow);
                if s.attributes.default_flow.as_deref() == Some(flow) {
                    s.attributes.default_flow = None;
                }
            })?;
        }
        next.update(new_source, |s| s.outgoing.push(flow.to_string()))?;
        next.update(flow, |f| f.source = Some(new_source.to_string()))?;
    }

    revalidate(&mut next, flow)?;
    Ok(next)
}

/// Move the target end of `flow` to `new_target`.
///
/// Targets that cannot receive sequence flows are accepted; the flow then
/// loses its default marking and its condition.
pub fn reconnect_end(
    diagram: &Diagram,
    flow: &str,
    new_target: &str,
) -> Result<Diagram> {
    let connection = connection(diagram, flow)?;
    endpoint(diagram, new_target)?;

    let mut next = diagram.clone();
    let old_target = connection.target.clone();
    if old_target.as_deref() != Some(new_target) {
        if let Some(old) = old_target.as_deref() {
            next.update(old, |t| t.incoming.retain(|f| f != flow))?;
        }
        next.update(new_target, |t| t.incoming.push(flow.to_string()))?;
        next.update(flow, |f| f.target = Some(new_target.to_string()))?;
    }

    revalidate(&mut next, flow)?;
    Ok(next)
}

/// Add a new flow node of `element_type` to `parent`.
pub fn create_shape(
    diagram: &Diagram,
    element_type: ElementType,
    parent: &str,
) -> Result<(Diagram, ElementId)> {
    if !element_type.is_flow_node() || element_type == ElementType::BoundaryEvent {
        return Err(MorphError::InvalidArgument(format!("cannot create a shape of type {}", element_type.as_ref())));
    }
    let container = diagram.element(parent)?;
    if !container.element_type.can_hold_children() {
        return Err(MorphError::InvalidArgument(format!("{} cannot contain elements", parent)));
    }

    let mut element = Element::new(&utils::prefixed_id(element_type.as_ref()), element_type);
    element.parent = Some(parent.to_string());
    element.attributes.is_expanded = element_type.is_sub_process();
    let id = element.id.clone();

    let mut next = diagram.clone();
    next.insert(element);
    next.update(parent, |p| p.children.push(id.clone()))?;

    Ok((next, id))
}

fn connection<'a>(
    diagram: &'a Diagram,
    id: &str,
) -> Result<&'a Element> {
    let element = diagram.element(id)?;
    if !element.element_type.is_connection() {
        return Err(MorphError::InvalidArgument(format!("{} is not a sequence flow", id)));
    }
    Ok(element)
}

fn endpoint<'a>(
    diagram: &'a Diagram,
    id: &str,
) -> Result<&'a Element> {
    let element = diagram.element(id)?;
    if !element.element_type.is_flow_node() {
        return Err(MorphError::InvalidArgument(format!("{} is not a flow node", id)));
    }
    Ok(element)
}

fn flow_source<'a>(
    diagram: &'a Diagram,
    flow: &Element,
) -> Result<&'a Element> {
    if !flow.element_type.is_connection() {
        return Err(MorphError::InvalidArgument(format!("{} is not a sequence flow", flow.id)));
    }
    diagram.source_of(flow).ok_or(MorphError::InvalidArgument(format!("sequence flow {} has no source", flow.id)))
}

/// Drop default marking and condition of `flow` when its endpoints no
/// longer support them.
fn revalidate(
    diagram: &mut Diagram,
    flow: &str,
) -> Result<()> {
    let connection = diagram.element(flow)?;
    let source = flow_source(diagram, connection)?;
    let target_ok = diagram.target_of(connection).is_some_and(|t| t.accepts_incoming_flow());

    let clear_default = connection.is_default_of(source) && (!target_ok || !source.element_type.can_carry_default_flow());
    let clear_condition =
        connection.attributes.condition_expression.is_some() && (!target_ok || !source.element_type.accepts_condition_expression());
    let source_id = source.id.clone();

    if clear_default {
        diagram.set_default_flow(&source_id, None)?;
    }
    if clear_condition {
        diagram.update(flow, |f| f.attributes.condition_expression = None)?;
    }
    Ok(())
}
