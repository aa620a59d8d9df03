//! Diagram elements and their business attributes.

use serde::{Deserialize, Serialize};

use crate::{
    diagram::types::{ElementType, EventDefinitionType},
    utils,
};

/// Unique identifier of an element within a diagram.
pub type ElementId = String;

/// Repeated execution semantics of an activity.
///
/// Holding it as a single optional value keeps the parallel, sequential and
/// loop markers mutually exclusive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopCharacteristics {
    /// Standard loop.
    Standard,
    /// Multi-instance, parallel when `is_sequential` is false.
    MultiInstance {
        is_sequential: bool,
    },
}

impl LoopCharacteristics {
    pub fn marker(&self) -> LoopMarker {
        match self {
            LoopCharacteristics::Standard => LoopMarker::Loop,
            LoopCharacteristics::MultiInstance {
                is_sequential: true,
            } => LoopMarker::SequentialMultiInstance,
            LoopCharacteristics::MultiInstance {
                is_sequential: false,
            } => LoopMarker::ParallelMultiInstance,
        }
    }
}

/// Visible marker of a loop characteristics variant.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoopMarker {
    ParallelMultiInstance,
    SequentialMultiInstance,
    Loop,
}

impl LoopMarker {
    /// Loop characteristics that display this marker.
    pub fn characteristics(&self) -> LoopCharacteristics {
        match self {
            LoopMarker::ParallelMultiInstance => LoopCharacteristics::MultiInstance {
                is_sequential: false,
            },
            LoopMarker::SequentialMultiInstance => LoopCharacteristics::MultiInstance {
                is_sequential: true,
            },
            LoopMarker::Loop => LoopCharacteristics::Standard,
        }
    }
}

/// Guard expression attached to a sequence flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FormalExpression {
    pub id: String,
    #[serde(default)]
    pub body: String,
}

impl FormalExpression {
    pub fn new(body: &str) -> Self {
        Self {
            id: utils::prefixed_id("FormalExpression"),
            body: body.to_string(),
        }
    }
}

/// Typed business attributes of an element.
///
/// Which fields are meaningful depends on the element type; the replace
/// planner decides which ones transfer to a replacement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attributes {
    /// element name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// event definition of an event, none for plain events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_definition: Option<EventDefinitionType>,
    /// interrupting flag of start events inside event sub-processes and of boundary events
    #[serde(default = "default_interrupting")]
    pub is_interrupting: bool,
    /// loop characteristics of an activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_characteristics: Option<LoopCharacteristics>,
    /// expanded/collapsed state of a sub-process
    #[serde(default)]
    pub is_expanded: bool,
    /// marks a sub-process as event sub-process
    #[serde(default)]
    pub triggered_by_event: bool,
    /// marks an activity as compensation handler
    #[serde(default)]
    pub is_for_compensation: bool,
    /// guard of a sequence flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<FormalExpression>,
    /// default outgoing flow of a gateway or activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_flow: Option<ElementId>,
}

fn default_interrupting() -> bool {
    true
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            name: None,
            event_definition: None,
            is_interrupting: true,
            loop_characteristics: None,
            is_expanded: false,
            triggered_by_event: false,
            is_for_compensation: false,
            condition_expression: None,
            default_flow: None,
        }
    }
}

/// A node or connection of the diagram graph.
///
/// Elements are values: every mutation produces a new element in a new
/// [`Diagram`](crate::Diagram) snapshot. Relationships are held by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub element_type: ElementType,
    pub attributes: Attributes,
    /// owning container, none for the root
    pub parent: Option<ElementId>,
    /// contained elements, in insertion order
    pub children: Vec<ElementId>,
    /// incoming sequence flows
    pub incoming: Vec<ElementId>,
    /// outgoing sequence flows
    pub outgoing: Vec<ElementId>,
    /// source of a connection
    pub source: Option<ElementId>,
    /// target of a connection
    pub target: Option<ElementId>,
    /// activity a boundary event is attached to
    pub host: Option<ElementId>,
    /// boundary events attached to an activity
    pub attachers: Vec<ElementId>,
}

impl Element {
    pub fn new(
        id: &str,
        element_type: ElementType,
    ) -> Self {
        Self {
            id: id.to_string(),
            element_type,
            attributes: Attributes::default(),
            parent: None,
            children: Vec::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            source: None,
            target: None,
            host: None,
            attachers: Vec::new(),
        }
    }

    pub fn is_event_sub_process(&self) -> bool {
        self.element_type == ElementType::SubProcess && self.attributes.triggered_by_event
    }

    pub fn accepts_incoming_flow(&self) -> bool {
        accepts_incoming_flow(self.element_type, self.attributes.triggered_by_event)
    }

    pub fn accepts_outgoing_flow(&self) -> bool {
        accepts_outgoing_flow(self.element_type, self.attributes.triggered_by_event)
    }

    /// Whether this flow is the default flow of `source`.
    pub fn is_default_of(
        &self,
        source: &Element,
    ) -> bool {
        source.attributes.default_flow.as_deref() == Some(self.id.as_str())
    }
}

/// Whether an element of the given shape may be the target of a sequence flow.
pub fn accepts_incoming_flow(
    element_type: ElementType,
    triggered_by_event: bool,
) -> bool {
    if !element_type.is_flow_node() || is_event_sub_process(element_type, triggered_by_event) {
        return false;
    }
    !matches!(element_type, ElementType::StartEvent | ElementType::BoundaryEvent)
}

/// Whether an element of the given shape may be the source of a sequence flow.
pub fn accepts_outgoing_flow(
    element_type: ElementType,
    triggered_by_event: bool,
) -> bool {
    if !element_type.is_flow_node() || is_event_sub_process(element_type, triggered_by_event) {
        return false;
    }
    element_type != ElementType::EndEvent
}

fn is_event_sub_process(
    element_type: ElementType,
    triggered_by_event: bool,
) -> bool {
    element_type == ElementType::SubProcess && triggered_by_event
}
