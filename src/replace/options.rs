//! Replacement options per element category, in menu order.

use crate::{
    diagram::{ElementType as T, EventDefinitionType as E},
    replace::target::{CandidateDescriptor as C, FlowVariant, TargetSpec as S},
};

pub static START_EVENT: &[C] = &[
    C::element("replace-with-none-start", "Start Event", S::of(T::StartEvent)),
    C::element("replace-with-none-intermediate-throwing", "Intermediate Throw Event", S::of(T::IntermediateThrowEvent)),
    C::element("replace-with-none-end", "End Event", S::of(T::EndEvent)),
    C::element("replace-with-message-start", "Message Start Event", S::of(T::StartEvent).with_event(E::Message)),
    C::element("replace-with-timer-start", "Timer Start Event", S::of(T::StartEvent).with_event(E::Timer)),
    C::element("replace-with-conditional-start", "Conditional Start Event", S::of(T::StartEvent).with_event(E::Conditional)),
    C::element("replace-with-signal-start", "Signal Start Event", S::of(T::StartEvent).with_event(E::Signal)),
];

pub static EVENT_SUB_PROCESS_START_EVENT: &[C] = &[
    C::element("replace-with-message-start", "Message Start Event", S::of(T::StartEvent).with_event(E::Message).interrupting(true)),
    C::element("replace-with-timer-start", "Timer Start Event", S::of(T::StartEvent).with_event(E::Timer).interrupting(true)),
    C::element("replace-with-conditional-start", "Conditional Start Event", S::of(T::StartEvent).with_event(E::Conditional).interrupting(true)),
    C::element("replace-with-signal-start", "Signal Start Event", S::of(T::StartEvent).with_event(E::Signal).interrupting(true)),
    C::element("replace-with-error-start", "Error Start Event", S::of(T::StartEvent).with_event(E::Error).interrupting(true)),
    C::element("replace-with-escalation-start", "Escalation Start Event", S::of(T::StartEvent).with_event(E::Escalation).interrupting(true)),
    C::element("replace-with-compensation-start", "Compensation Start Event", S::of(T::StartEvent).with_event(E::Compensate).interrupting(true)),
    C::element(
        "replace-with-non-interrupting-message-start",
        "Message Start Event (non-interrupting)",
        S::of(T::StartEvent).with_event(E::Message).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-timer-start",
        "Timer Start Event (non-interrupting)",
        S::of(T::StartEvent).with_event(E::Timer).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-conditional-start",
        "Conditional Start Event (non-interrupting)",
        S::of(T::StartEvent).with_event(E::Conditional).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-signal-start",
        "Signal Start Event (non-interrupting)",
        S::of(T::StartEvent).with_event(E::Signal).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-escalation-start",
        "Escalation Start Event (non-interrupting)",
        S::of(T::StartEvent).with_event(E::Escalation).interrupting(false),
    ),
];

pub static INTERMEDIATE_EVENT: &[C] = &[
    C::element("replace-with-none-start", "Start Event", S::of(T::StartEvent)),
    C::element("replace-with-none-intermediate-throw", "Intermediate Throw Event", S::of(T::IntermediateThrowEvent)),
    C::element("replace-with-none-end", "End Event", S::of(T::EndEvent)),
    C::element("replace-with-message-intermediate-catch", "Message Intermediate Catch Event", S::of(T::IntermediateCatchEvent).with_event(E::Message)),
    C::element("replace-with-message-intermediate-throw", "Message Intermediate Throw Event", S::of(T::IntermediateThrowEvent).with_event(E::Message)),
    C::element("replace-with-timer-intermediate-catch", "Timer Intermediate Catch Event", S::of(T::IntermediateCatchEvent).with_event(E::Timer)),
    C::element("replace-with-escalation-intermediate-throw", "Escalation Intermediate Throw Event", S::of(T::IntermediateThrowEvent).with_event(E::Escalation)),
    C::element("replace-with-conditional-intermediate-catch", "Conditional Intermediate Catch Event", S::of(T::IntermediateCatchEvent).with_event(E::Conditional)),
    C::element("replace-with-link-intermediate-catch", "Link Intermediate Catch Event", S::of(T::IntermediateCatchEvent).with_event(E::Link)),
    C::element("replace-with-link-intermediate-throw", "Link Intermediate Throw Event", S::of(T::IntermediateThrowEvent).with_event(E::Link)),
    C::element("replace-with-compensation-intermediate-throw", "Compensation Intermediate Throw Event", S::of(T::IntermediateThrowEvent).with_event(E::Compensate)),
    C::element("replace-with-signal-intermediate-catch", "Signal Intermediate Catch Event", S::of(T::IntermediateCatchEvent).with_event(E::Signal)),
    C::element("replace-with-signal-intermediate-throw", "Signal Intermediate Throw Event", S::of(T::IntermediateThrowEvent).with_event(E::Signal)),
];

pub static END_EVENT: &[C] = &[
    C::element("replace-with-none-start", "Start Event", S::of(T::StartEvent)),
    C::element("replace-with-none-intermediate-throw", "Intermediate Throw Event", S::of(T::IntermediateThrowEvent)),
    C::element("replace-with-none-end", "End Event", S::of(T::EndEvent)),
    C::element("replace-with-message-end", "Message End Event", S::of(T::EndEvent).with_event(E::Message)),
    C::element("replace-with-escalation-end", "Escalation End Event", S::of(T::EndEvent).with_event(E::Escalation)),
    C::element("replace-with-error-end", "Error End Event", S::of(T::EndEvent).with_event(E::Error)),
    C::element("replace-with-cancel-end", "Cancel End Event", S::of(T::EndEvent).with_event(E::Cancel)),
    C::element("replace-with-compensation-end", "Compensation End Event", S::of(T::EndEvent).with_event(E::Compensate)),
    C::element("replace-with-signal-end", "Signal End Event", S::of(T::EndEvent).with_event(E::Signal)),
    C::element("replace-with-terminate-end", "Terminate End Event", S::of(T::EndEvent).with_event(E::Terminate)),
];

pub static BOUNDARY_EVENT: &[C] = &[
    C::element("replace-with-message-boundary", "Message Boundary Event", S::of(T::BoundaryEvent).with_event(E::Message).interrupting(true)),
    C::element("replace-with-timer-boundary", "Timer Boundary Event", S::of(T::BoundaryEvent).with_event(E::Timer).interrupting(true)),
    C::element("replace-with-escalation-boundary", "Escalation Boundary Event", S::of(T::BoundaryEvent).with_event(E::Escalation).interrupting(true)),
    C::element("replace-with-conditional-boundary", "Conditional Boundary Event", S::of(T::BoundaryEvent).with_event(E::Conditional).interrupting(true)),
    C::element("replace-with-error-boundary", "Error Boundary Event", S::of(T::BoundaryEvent).with_event(E::Error).interrupting(true)),
    C::element("replace-with-cancel-boundary", "Cancel Boundary Event", S::of(T::BoundaryEvent).with_event(E::Cancel).interrupting(true)),
    C::element("replace-with-signal-boundary", "Signal Boundary Event", S::of(T::BoundaryEvent).with_event(E::Signal).interrupting(true)),
    C::element("replace-with-compensation-boundary", "Compensation Boundary Event", S::of(T::BoundaryEvent).with_event(E::Compensate).interrupting(true)),
    C::element(
        "replace-with-non-interrupting-message-boundary",
        "Message Boundary Event (non-interrupting)",
        S::of(T::BoundaryEvent).with_event(E::Message).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-timer-boundary",
        "Timer Boundary Event (non-interrupting)",
        S::of(T::BoundaryEvent).with_event(E::Timer).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-escalation-boundary",
        "Escalation Boundary Event (non-interrupting)",
        S::of(T::BoundaryEvent).with_event(E::Escalation).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-conditional-boundary",
        "Conditional Boundary Event (non-interrupting)",
        S::of(T::BoundaryEvent).with_event(E::Conditional).interrupting(false),
    ),
    C::element(
        "replace-with-non-interrupting-signal-boundary",
        "Signal Boundary Event (non-interrupting)",
        S::of(T::BoundaryEvent).with_event(E::Signal).interrupting(false),
    ),
];

pub static GATEWAY: &[C] = &[
    C::element("replace-with-exclusive-gateway", "Exclusive Gateway", S::of(T::ExclusiveGateway)),
    C::element("replace-with-parallel-gateway", "Parallel Gateway", S::of(T::ParallelGateway)),
    C::element("replace-with-inclusive-gateway", "Inclusive Gateway", S::of(T::InclusiveGateway)),
    C::element("replace-with-complex-gateway", "Complex Gateway", S::of(T::ComplexGateway)),
    C::element("replace-with-event-based-gateway", "Event based Gateway", S::of(T::EventBasedGateway)),
];

pub static TASK: &[C] = &[
    C::element("replace-with-task", "Task", S::of(T::Task)),
    C::element("replace-with-send-task", "Send Task", S::of(T::SendTask)),
    C::element("replace-with-receive-task", "Receive Task", S::of(T::ReceiveTask)),
    C::element("replace-with-user-task", "User Task", S::of(T::UserTask)),
    C::element("replace-with-manual-task", "Manual Task", S::of(T::ManualTask)),
    C::element("replace-with-rule-task", "Business Rule Task", S::of(T::BusinessRuleTask)),
    C::element("replace-with-service-task", "Service Task", S::of(T::ServiceTask)),
    C::element("replace-with-script-task", "Script Task", S::of(T::ScriptTask)),
    C::element("replace-with-call-activity", "Call Activity", S::of(T::CallActivity)),
    C::element("replace-with-collapsed-subprocess", "Sub Process (collapsed)", S::of(T::SubProcess).expanded(false)),
    C::element("replace-with-expanded-subprocess", "Sub Process (expanded)", S::of(T::SubProcess).expanded(true)),
    C::element("replace-with-transaction", "Transaction", S::of(T::Transaction)),
    C::element("replace-with-event-subprocess", "Event Sub Process", S::of(T::SubProcess).triggered_by_event()),
];

pub static SUBPROCESS_EXPANDED: &[C] = &[
    C::element("replace-with-transaction", "Transaction", S::of(T::Transaction)),
    C::element("replace-with-event-subprocess", "Event Sub Process", S::of(T::SubProcess).triggered_by_event()),
    C::element("replace-with-collapsed-subprocess", "Sub Process (collapsed)", S::of(T::SubProcess).expanded(false)),
];

pub static TRANSACTION: &[C] = &[
    C::element("replace-with-subprocess", "Sub Process", S::of(T::SubProcess)),
    C::element("replace-with-event-subprocess", "Event Sub Process", S::of(T::SubProcess).triggered_by_event()),
];

pub static EVENT_SUB_PROCESS: &[C] = &[
    C::element("replace-with-subprocess", "Sub Process", S::of(T::SubProcess)),
    C::element("replace-with-transaction", "Transaction", S::of(T::Transaction)),
];

pub static SEQUENCE_FLOW: &[C] = &[
    C::flow("replace-with-sequence-flow", "Sequence Flow", FlowVariant::Sequence),
    C::flow("replace-with-default-flow", "Default Flow", FlowVariant::Default),
    C::flow("replace-with-conditional-flow", "Conditional Flow", FlowVariant::Conditional),
];
