use tracing::debug;

use crate::{
    Result,
    diagram::{Attributes, Diagram, Element, ElementId, ElementType},
    replace::planner::{AttributeChange, MigrationPlan, SideEffect},
};

/// Apply `plan` to a copy of `diagram`.
///
/// Returns the new snapshot and the id of the replacement. The replacement
/// supersedes the old element under the same id, so every reference held by
/// connections, children and attachers resolves to it. On error nothing of
/// the plan is visible: the input snapshot is never touched.
pub fn execute(
    diagram: &Diagram,
    plan: &MigrationPlan,
) -> Result<(Diagram, ElementId)> {
    let mut next = diagram.clone();
    let old = next.element(&plan.element)?.clone();

    // attributes
    let mut replacement = Element::new(&old.id, plan.new_type);
    replacement.attributes = build_attributes(&plan.attributes);

    // structure
    replacement.parent = old.parent;
    replacement.children = old.children;
    replacement.incoming = old.incoming;
    replacement.outgoing = old.outgoing;
    replacement.source = old.source;
    replacement.target = old.target;
    replacement.attachers = old.attachers;
    if plan.new_type == ElementType::BoundaryEvent {
        replacement.host = old.host;
    }
    next.insert(replacement);

    for effect in plan.side_effects.iter() {
        apply(&mut next, effect)?;
    }

    debug!("replaced {} ({:?} -> {:?}) via {}", plan.element, old.element_type, plan.new_type, plan.descriptor.id);
    Ok((next, plan.element.clone()))
}

fn build_attributes(changes: &[AttributeChange]) -> Attributes {
    let mut attrs = Attributes::default();
    for change in changes.iter().cloned() {
        match change {
            AttributeChange::Name(name) => attrs.name = name,
            AttributeChange::EventDefinition(def) => attrs.event_definition = def,
            AttributeChange::Interrupting(interrupting) => attrs.is_interrupting = interrupting,
            AttributeChange::LoopCharacteristics(lc) => attrs.loop_characteristics = lc,
            AttributeChange::Expanded(expanded) => attrs.is_expanded = expanded,
            AttributeChange::TriggeredByEvent(triggered) => attrs.triggered_by_event = triggered,
            AttributeChange::ForCompensation(compensation) => attrs.is_for_compensation = compensation,
            AttributeChange::DefaultFlow(flow) => attrs.default_flow = flow,
            AttributeChange::ConditionExpression(expr) => attrs.condition_expression = expr,
        }
    }
    attrs
}

fn apply(
    diagram: &mut Diagram,
    effect: &SideEffect,
) -> Result<()> {
    match effect {
        SideEffect::SetDefaultFlow {
            source,
            flow,
        } => diagram.set_default_flow(source, flow.clone()),
        // earlier removals may already have cascaded over these
        SideEffect::RemoveConnection {
            id,
        } => {
            if diagram.contains(id) {
                diagram.remove_connection(id)?;
            }
            Ok(())
        }
        SideEffect::RemoveElement {
            id,
        } => {
            if diagram.contains(id) {
                diagram.remove_element(id)?;
            }
            Ok(())
        }
        SideEffect::ClearCondition {
            id,
        } => diagram.update(id, |flow| flow.attributes.condition_expression = None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        diagram::LoopMarker,
        model::DiagramModel,
        replace::{CandidateResolver, options, plan_migration},
    };

    fn load(value: serde_json::Value) -> Diagram {
        let model: DiagramModel = serde_json::from_value(value).unwrap();
        Diagram::try_from(&model).unwrap()
    }

    fn replace(
        diagram: &Diagram,
        id: &str,
        option_id: &str,
    ) -> Result<Diagram> {
        let element = diagram.element(id)?;
        let descriptor = CandidateResolver::default().resolve(diagram, element).into_iter().find(|c| c.id == option_id).unwrap();
        let plan = plan_migration(diagram, element, &descriptor)?;
        execute(diagram, &plan).map(|(next, _)| next)
    }

    fn diagram() -> Diagram {
        load(json!({
            "id": "Process_1",
            "elements": [
                { "id": "StartEvent_1", "type": "StartEvent" },
                { "id": "Task_1", "type": "Task", "default_flow": "Flow_2",
                  "loop_characteristics": { "kind": "standard" } },
                { "id": "Task_2", "type": "Task" },
                { "id": "SubProcess_1", "type": "SubProcess", "is_expanded": true },
                { "id": "Task_3", "type": "Task", "parent": "SubProcess_1" },
                { "id": "Task_4", "type": "Task", "parent": "SubProcess_1" },
                { "id": "Flow_5", "type": "SequenceFlow", "parent": "SubProcess_1", "source": "Task_3", "target": "Task_4" },
                { "id": "Boundary_1", "type": "BoundaryEvent", "host": "Task_1", "event_definition": "timer" },
                { "id": "Flow_1", "type": "SequenceFlow", "source": "StartEvent_1", "target": "Task_1" },
                { "id": "Flow_2", "type": "SequenceFlow", "source": "Task_1", "target": "Task_2" },
                { "id": "Flow_3", "type": "SequenceFlow", "source": "Task_1", "target": "SubProcess_1",
                  "condition_expression": { "id": "Expr_1", "body": "${ok}" } },
                { "id": "Flow_4", "type": "SequenceFlow", "source": "SubProcess_1", "target": "Task_2" }
            ]
        }))
    }

    #[test]
    fn test_replacement_keeps_identity_and_structure() {
        let before = diagram();
        let after = replace(&before, "Task_1", "replace-with-service-task").unwrap();

        let task = after.element("Task_1").unwrap();
        assert_eq!(task.element_type, ElementType::ServiceTask);
        assert_eq!(task.incoming, vec!["Flow_1"]);
        assert_eq!(task.outgoing, vec!["Flow_2", "Flow_3"]);
        assert_eq!(task.attachers, vec!["Boundary_1"]);
        assert_eq!(task.attributes.default_flow.as_deref(), Some("Flow_2"));
        assert_eq!(task.attributes.loop_characteristics.as_ref().map(|lc| lc.marker()), Some(LoopMarker::Loop));
        assert_eq!(after.source_of(after.element("Flow_2").unwrap()).map(|e| e.element_type), Some(ElementType::ServiceTask));

        // input snapshot untouched
        assert_eq!(before.element("Task_1").unwrap().element_type, ElementType::Task);
    }

    #[test]
    fn test_replacement_with_event_sub_process() {
        let after = replace(&diagram(), "SubProcess_1", "replace-with-event-subprocess").unwrap();

        let sub_process = after.element("SubProcess_1").unwrap();
        assert!(sub_process.attributes.triggered_by_event);
        assert!(sub_process.attributes.is_expanded);
        assert!(sub_process.incoming.is_empty());
        assert!(sub_process.outgoing.is_empty());
        assert!(!after.contains("Flow_3"));
        assert!(!after.contains("Flow_4"));
        assert_eq!(sub_process.children, vec!["Task_3", "Task_4", "Flow_5"]);
        assert_eq!(after.element("Task_1").unwrap().outgoing, vec!["Flow_2"]);

        let back = replace(&after, "SubProcess_1", "replace-with-subprocess").unwrap();
        assert!(!back.element("SubProcess_1").unwrap().attributes.triggered_by_event);
        assert!(back.element("SubProcess_1").unwrap().attributes.is_expanded);
    }

    #[test]
    fn test_replacement_removes_children_and_attachers() {
        let after = replace(&diagram(), "SubProcess_1", "replace-with-collapsed-subprocess").unwrap();
        assert_eq!(after.element("SubProcess_1").unwrap().children.len(), 3);

        let before = diagram();
        let end = options::END_EVENT.iter().find(|c| c.id == "replace-with-none-end").unwrap();
        let plan = plan_migration(&before, before.element("Task_1").unwrap(), end).unwrap();
        let (after, id) = execute(&before, &plan).unwrap();
        assert_eq!(after.element(&id).unwrap().element_type, ElementType::EndEvent);
        assert!(!after.contains("Boundary_1"));
        assert!(!after.contains("Flow_2"));
        assert!(!after.contains("Flow_3"));
        assert_eq!(after.element("Task_1").unwrap().attributes.default_flow, None);
        assert_eq!(after.element("Task_1").unwrap().incoming, vec!["Flow_1"]);
        assert!(after.element("Task_2").unwrap().incoming.iter().all(|f| f != "Flow_2"));
    }

    #[test]
    fn test_flow_morphs() {
        let before = diagram();

        let after = replace(&before, "Flow_3", "replace-with-default-flow").unwrap();
        assert_eq!(after.element("Task_1").unwrap().attributes.default_flow.as_deref(), Some("Flow_3"));
        assert_eq!(after.element("Flow_3").unwrap().attributes.condition_expression, None);

        let after = replace(&before, "Flow_2", "replace-with-conditional-flow").unwrap();
        assert_eq!(after.element("Task_1").unwrap().attributes.default_flow, None);
        assert!(after.element("Flow_2").unwrap().attributes.condition_expression.is_some());

        let after = replace(&before, "Flow_2", "replace-with-sequence-flow").unwrap();
        assert_eq!(after.element("Task_1").unwrap().attributes.default_flow, None);
    }

    #[test]
    fn test_missing_element() {
        let before = diagram();
        let element = before.element("Task_2").unwrap();
        let descriptor = CandidateResolver::default().resolve(&before, element)[0];
        let mut plan = plan_migration(&before, element, &descriptor).unwrap();
        plan.element = "Task_9".to_string();
        assert!(execute(&before, &plan).is_err());
    }
}
