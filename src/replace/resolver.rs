//! Candidate resolution.
//!
//! An element is first sorted into a [`Category`] from its type and its
//! structural context (parent, host, flow source). Each category maps to one
//! declared option table which is then filtered; the element's own type
//! combination is never offered.

use tracing::trace;

use crate::{
    diagram::{Diagram, Element, ElementType, EventDefinitionType, LoopMarker},
    menu::{HeaderAction, HeaderEntry},
    replace::{
        options,
        target::{CandidateDescriptor, FlowVariant, ReplaceTarget},
    },
    rules::RuleEvaluator,
};

/// Structural category of an element, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    StartEvent,
    EventSubProcessStartEvent,
    EndEvent {
        in_transaction: bool,
    },
    BoundaryEvent {
        on_transaction: bool,
    },
    IntermediateEvent,
    Gateway,
    Transaction,
    EventSubProcess,
    ExpandedSubProcess,
    CollapsedAdHocSubProcess,
    SequenceFlow,
    FlowNode,
    Unsupported,
}

/// Sort `element` into its replacement category.
pub fn categorize(
    diagram: &Diagram,
    element: &Element,
) -> Category {
    let ty = element.element_type;
    let attrs = &element.attributes;
    let is_transaction = |e: Option<&Element>| e.is_some_and(|e| e.element_type == ElementType::Transaction);

    match ty {
        ElementType::StartEvent => {
            if diagram.parent_of(element).is_some_and(|p| p.is_event_sub_process()) {
                Category::EventSubProcessStartEvent
            } else {
                Category::StartEvent
            }
        }
        ElementType::EndEvent => Category::EndEvent {
            in_transaction: is_transaction(diagram.parent_of(element)),
        },
        ElementType::BoundaryEvent => Category::BoundaryEvent {
            on_transaction: is_transaction(diagram.host_of(element)),
        },
        ElementType::IntermediateCatchEvent | ElementType::IntermediateThrowEvent => Category::IntermediateEvent,
        ElementType::ExclusiveGateway
        | ElementType::ParallelGateway
        | ElementType::InclusiveGateway
        | ElementType::ComplexGateway
        | ElementType::EventBasedGateway => Category::Gateway,
        ElementType::Transaction => Category::Transaction,
        ElementType::SubProcess if attrs.is_expanded && attrs.triggered_by_event => Category::EventSubProcess,
        ElementType::SubProcess | ElementType::AdHocSubProcess if attrs.is_expanded => Category::ExpandedSubProcess,
        ElementType::AdHocSubProcess => Category::CollapsedAdHocSubProcess,
        ElementType::SequenceFlow => Category::SequenceFlow,
        ElementType::Task
        | ElementType::SendTask
        | ElementType::ReceiveTask
        | ElementType::UserTask
        | ElementType::ManualTask
        | ElementType::BusinessRuleTask
        | ElementType::ServiceTask
        | ElementType::ScriptTask
        | ElementType::CallActivity
        | ElementType::SubProcess => Category::FlowNode,
        ElementType::Process => Category::Unsupported,
    }
}

/// Produces the replacement entries a menu offers for an element.
///
/// The rule evaluator is injected at construction; nothing is cached between
/// calls, so every call reflects the diagram it is given.
#[derive(Debug, Clone, Default)]
pub struct CandidateResolver {
    evaluator: RuleEvaluator,
}

impl CandidateResolver {
    pub fn new(evaluator: RuleEvaluator) -> Self {
        Self {
            evaluator,
        }
    }

    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut RuleEvaluator {
        &mut self.evaluator
    }

    /// Whether the replace rule allows `element` to be replaced at all.
    pub fn is_allowed(
        &self,
        diagram: &Diagram,
        element: &Element,
    ) -> bool {
        self.evaluator.is_replace_allowed(diagram, element)
    }

    /// Rule check plus candidates; a veto yields no entries.
    pub fn resolve(
        &self,
        diagram: &Diagram,
        element: &Element,
    ) -> Vec<CandidateDescriptor> {
        if !self.is_allowed(diagram, element) {
            return Vec::new();
        }
        self.candidates(diagram, element)
    }

    /// Candidates of `element` in declaration order, without consulting rules.
    pub fn candidates(
        &self,
        diagram: &Diagram,
        element: &Element,
    ) -> Vec<CandidateDescriptor> {
        let category = categorize(diagram, element);
        let others = |c: &&CandidateDescriptor| c.spec().is_none_or(|spec| !spec.matches(element));

        let candidates: Vec<CandidateDescriptor> = match category {
            Category::StartEvent => options::START_EVENT.iter().filter(others).copied().collect(),
            Category::EventSubProcessStartEvent => options::EVENT_SUB_PROCESS_START_EVENT.iter().filter(others).copied().collect(),
            Category::EndEvent {
                in_transaction,
            } => options::END_EVENT.iter().filter(others).filter(|c| in_transaction || !is_cancel(c)).copied().collect(),
            Category::BoundaryEvent {
                on_transaction,
            } => options::BOUNDARY_EVENT.iter().filter(others).filter(|c| on_transaction || !is_cancel(c)).copied().collect(),
            Category::IntermediateEvent => options::INTERMEDIATE_EVENT.iter().filter(others).copied().collect(),
            Category::Gateway => options::GATEWAY.iter().filter(others).copied().collect(),
            Category::Transaction => options::TRANSACTION.iter().filter(others).copied().collect(),
            Category::EventSubProcess => options::EVENT_SUB_PROCESS.iter().filter(others).copied().collect(),
            Category::ExpandedSubProcess => options::SUBPROCESS_EXPANDED.iter().filter(others).copied().collect(),
            Category::CollapsedAdHocSubProcess => options::TASK
                .iter()
                .filter(others)
                .filter(|c| c.spec().is_some_and(|s| s.element_type != ElementType::SubProcess || s.is_expanded == Some(true)))
                .copied()
                .collect(),
            Category::SequenceFlow => flow_candidates(diagram, element),
            Category::FlowNode => {
                let collapsed = element.element_type == ElementType::SubProcess && !element.attributes.is_expanded;
                options::TASK
                    .iter()
                    .filter(others)
                    .filter(|c| !(collapsed && c.spec().is_some_and(|s| s.element_type == ElementType::SubProcess && s.is_expanded == Some(false))))
                    .copied()
                    .collect()
            }
            Category::Unsupported => Vec::new(),
        };

        trace!("{} candidates for {} ({})", candidates.len(), element.id, category.as_ref());
        candidates
    }

    /// Toggle entries shown above the replacement list.
    pub fn header_entries(
        &self,
        element: &Element,
    ) -> Vec<HeaderEntry> {
        let ty = element.element_type;
        let mut entries = Vec::new();

        if ty.is_activity() && !element.is_event_sub_process() {
            let active = element.attributes.loop_characteristics.as_ref().map(|lc| lc.marker());
            for (id, title, marker) in [
                ("toggle-parallel-mi", "Parallel Multi Instance", LoopMarker::ParallelMultiInstance),
                ("toggle-sequential-mi", "Sequential Multi Instance", LoopMarker::SequentialMultiInstance),
                ("toggle-loop", "Loop", LoopMarker::Loop),
            ] {
                entries.push(HeaderEntry {
                    id,
                    title,
                    active: active == Some(marker),
                    action: HeaderAction::ToggleLoop(marker),
                });
            }
        }

        if matches!(ty, ElementType::SubProcess | ElementType::AdHocSubProcess) && !element.is_event_sub_process() {
            entries.push(HeaderEntry {
                id: "toggle-adhoc",
                title: "Ad-hoc",
                active: ty == ElementType::AdHocSubProcess,
                action: HeaderAction::ToggleAdHoc,
            });
        }

        entries
    }
}

fn is_cancel(candidate: &CandidateDescriptor) -> bool {
    candidate.spec().is_some_and(|s| s.event_definition == Some(EventDefinitionType::Cancel))
}

fn flow_candidates(
    diagram: &Diagram,
    flow: &Element,
) -> Vec<CandidateDescriptor> {
    let Some(source) = diagram.source_of(flow) else {
        return Vec::new();
    };
    let is_default = flow.is_default_of(source);
    let has_condition = flow.attributes.condition_expression.is_some();
    let source_type = source.element_type;

    options::SEQUENCE_FLOW
        .iter()
        .filter(|c| match c.target {
            ReplaceTarget::Flow(FlowVariant::Sequence) => is_default || (has_condition && source_type.supports_conditional_marker()),
            ReplaceTarget::Flow(FlowVariant::Default) => !is_default && source_type.can_carry_default_flow(),
            ReplaceTarget::Flow(FlowVariant::Conditional) => !has_condition && source_type.supports_conditional_marker(),
            ReplaceTarget::Element(_) => false,
        })
        .copied()
        .collect()
}
