//! Closed type tags for diagram elements.
//!
//! Every element carries exactly one [`ElementType`]; category checks in the
//! replace engine are exhaustive matches over these enums instead of string
//! comparisons.

use serde::{Deserialize, Serialize};

/// Qualified type of a diagram element.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
pub enum ElementType {
    /// Diagram root, owns top-level elements.
    Process,

    StartEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    EndEvent,
    BoundaryEvent,

    Task,
    SendTask,
    ReceiveTask,
    UserTask,
    ManualTask,
    BusinessRuleTask,
    ServiceTask,
    ScriptTask,
    CallActivity,
    SubProcess,
    AdHocSubProcess,
    Transaction,

    ExclusiveGateway,
    ParallelGateway,
    InclusiveGateway,
    ComplexGateway,
    EventBasedGateway,

    SequenceFlow,
}

impl ElementType {
    /// Type name including the `bpmn:` namespace prefix.
    pub fn qualified_name(&self) -> String {
        format!("bpmn:{}", self.as_ref())
    }

    pub fn is_event(&self) -> bool {
        matches!(
            self,
            ElementType::StartEvent | ElementType::IntermediateCatchEvent | ElementType::IntermediateThrowEvent | ElementType::EndEvent | ElementType::BoundaryEvent
        )
    }

    pub fn is_intermediate_event(&self) -> bool {
        matches!(self, ElementType::IntermediateCatchEvent | ElementType::IntermediateThrowEvent)
    }

    pub fn is_task(&self) -> bool {
        matches!(
            self,
            ElementType::Task
                | ElementType::SendTask
                | ElementType::ReceiveTask
                | ElementType::UserTask
                | ElementType::ManualTask
                | ElementType::BusinessRuleTask
                | ElementType::ServiceTask
                | ElementType::ScriptTask
        )
    }

    /// Sub-process family: plain, ad-hoc and transaction.
    pub fn is_sub_process(&self) -> bool {
        matches!(self, ElementType::SubProcess | ElementType::AdHocSubProcess | ElementType::Transaction)
    }

    pub fn is_activity(&self) -> bool {
        self.is_task() || self.is_sub_process() || *self == ElementType::CallActivity
    }

    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            ElementType::ExclusiveGateway | ElementType::ParallelGateway | ElementType::InclusiveGateway | ElementType::ComplexGateway | ElementType::EventBasedGateway
        )
    }

    pub fn is_flow_node(&self) -> bool {
        self.is_event() || self.is_activity() || self.is_gateway()
    }

    pub fn is_connection(&self) -> bool {
        *self == ElementType::SequenceFlow
    }

    /// Elements that may own child elements.
    pub fn can_hold_children(&self) -> bool {
        *self == ElementType::Process || self.is_sub_process()
    }

    /// Gateways and activities that may point at one default outgoing flow.
    pub fn can_carry_default_flow(&self) -> bool {
        matches!(self, ElementType::ExclusiveGateway | ElementType::InclusiveGateway | ElementType::ComplexGateway) || self.is_activity()
    }

    /// Sources whose outgoing flows may keep a condition expression.
    pub fn accepts_condition_expression(&self) -> bool {
        self.can_carry_default_flow()
    }

    /// Sources whose outgoing flows are offered as "conditional flow" variants.
    pub fn supports_conditional_marker(&self) -> bool {
        self.is_activity()
    }
}

/// Event definition sub-tag of an event.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventDefinitionType {
    Message,
    Timer,
    Conditional,
    Signal,
    Error,
    Escalation,
    Compensate,
    Cancel,
    Link,
    Terminate,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_type_round_trips_through_str() {
        for ty in ElementType::iter() {
            assert_eq!(ElementType::from_str(ty.as_ref()).unwrap(), ty);
        }
        assert_eq!(ElementType::SendTask.qualified_name(), "bpmn:SendTask");
    }

    #[test]
    fn test_categories_are_disjoint() {
        for ty in ElementType::iter() {
            let hits = [ty.is_event(), ty.is_activity(), ty.is_gateway(), ty.is_connection(), ty == ElementType::Process];
            assert_eq!(hits.iter().filter(|h| **h).count(), 1, "{:?}", ty);
        }
    }

    #[test]
    fn test_default_capable_types() {
        assert!(ElementType::ExclusiveGateway.can_carry_default_flow());
        assert!(ElementType::ComplexGateway.can_carry_default_flow());
        assert!(ElementType::CallActivity.can_carry_default_flow());
        assert!(!ElementType::ParallelGateway.can_carry_default_flow());
        assert!(!ElementType::EventBasedGateway.can_carry_default_flow());
        assert!(!ElementType::StartEvent.can_carry_default_flow());
    }

    #[test]
    fn test_event_definition_serde() {
        let def: EventDefinitionType = serde_json::from_str("\"compensate\"").unwrap();
        assert_eq!(def, EventDefinitionType::Compensate);
        assert_eq!(EventDefinitionType::Cancel.as_ref(), "cancel");
    }
}
