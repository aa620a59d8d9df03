//! Modeler - the main entry point for Flowmorph.
//!
//! The modeler owns the current diagram snapshot and its history, and ties
//! the replace pipeline together:
//! - Opening replace menus (rule check, candidates, header toggles)
//! - Planning and executing replacements as single history entries
//! - Property updates, reconnects and shape creation
//! - Undo and redo

use tracing::{debug, warn};

use crate::{
    Config, MorphError, Result,
    diagram::{Diagram, Element, ElementId, ElementType},
    history::{Command, CommandStack, CreateShapeCommand, Endpoint, HistoryRecord, ReconnectCommand, ReplaceCommand, UpdatePropertiesCommand},
    menu::{HeaderAction, HeaderEntry, ReplaceMenu},
    model::DiagramModel,
    modeling::PropertyUpdate,
    replace::{self, CandidateDescriptor, CandidateResolver, MigrationPlan, TargetSpec},
    rules::{RuleContext, RuleEngine, RuleEvaluator},
};

/// Replacement used by the ad-hoc toggle of a plain sub-process.
const TO_AD_HOC: CandidateDescriptor = CandidateDescriptor::element("toggle-adhoc", "Ad-hoc", TargetSpec::of(ElementType::AdHocSubProcess));
/// Replacement used by the ad-hoc toggle of an ad-hoc sub-process.
const FROM_AD_HOC: CandidateDescriptor = CandidateDescriptor::element("toggle-adhoc", "Ad-hoc", TargetSpec::of(ElementType::SubProcess));

/// The diagram modeler.
///
/// # Example
///
/// ```rust,ignore
/// let model = DiagramModel::from_json(json_str)?;
/// let mut modeler = ModelerBuilder::new().diagram(model).build()?;
///
/// let menu = modeler.open_menu("Task_1")?;
/// modeler.trigger(&menu, "replace-with-user-task")?;
/// modeler.undo();
/// ```
#[derive(Debug, Clone)]
pub struct Modeler {
    /// candidate resolution with the injected rules
    resolver: CandidateResolver,
    /// current snapshot and its undo/redo history
    stack: CommandStack,
}

impl Modeler {
    pub fn new(
        diagram: Diagram,
        evaluator: RuleEvaluator,
        history_limit: usize,
    ) -> Self {
        Self {
            resolver: CandidateResolver::new(evaluator),
            stack: CommandStack::new(diagram, history_limit),
        }
    }

    /// Creates a modeler over `diagram` with the given configuration and no
    /// registered rules.
    pub fn new_with_config(
        diagram: Diagram,
        config: &Config,
    ) -> Self {
        Self::new(diagram, RuleEvaluator::new(RuleEngine::new(), config.rules.default_policy), config.history_limit)
    }

    /// current diagram snapshot
    pub fn diagram(&self) -> &Diagram {
        self.stack.current()
    }

    pub fn element(
        &self,
        id: &str,
    ) -> Result<&Element> {
        self.diagram().element(id)
    }

    pub fn rules(&self) -> &RuleEngine {
        self.resolver.evaluator().engine()
    }

    pub fn rules_mut(&mut self) -> &mut RuleEngine {
        self.resolver.evaluator_mut().engine_mut()
    }

    /// Register a replace rule predicate with the default priority.
    pub fn add_rule<F>(
        &mut self,
        name: &str,
        predicate: F,
    ) where
        F: Fn(&RuleContext<'_>) -> Option<bool> + Send + Sync + 'static,
    {
        self.rules_mut().add_rule(name, predicate);
    }

    /// Resolve the menu of `id` against the current diagram.
    ///
    /// The replace rule is evaluated exactly once; a veto yields an empty
    /// menu, header included.
    pub fn open_menu(
        &self,
        id: &str,
    ) -> Result<ReplaceMenu> {
        let diagram = self.diagram();
        let element = diagram.element(id)?;
        if !self.resolver.is_allowed(diagram, element) {
            debug!("replace of {} vetoed", id);
            return Ok(ReplaceMenu::empty(id));
        }

        Ok(ReplaceMenu {
            element: id.to_string(),
            header: self.resolver.header_entries(element),
            entries: self.resolver.candidates(diagram, element),
        })
    }

    /// Trigger the entry `entry` of a previously opened menu.
    ///
    /// The menu is re-resolved first; entries that are no longer offered for
    /// the current diagram are rejected.
    pub fn trigger(
        &mut self,
        menu: &ReplaceMenu,
        entry: &str,
    ) -> Result<ElementId> {
        let current = self.open_menu(&menu.element)?;

        if let Some(header) = current.header_entry(entry) {
            return self.apply_header(&menu.element, header);
        }
        if let Some(descriptor) = current.entry(entry) {
            let plan = self.plan_migration(&menu.element, descriptor)?;
            return self.stack.execute(&ReplaceCommand::new(plan));
        }

        if menu.ids().iter().any(|id| *id == entry) {
            warn!("menu entry {} is stale for {}", entry, menu.element);
            return Err(MorphError::InvalidArgument(format!("entry {} is no longer available for {}", entry, menu.element)));
        }
        warn!("unknown menu entry {} for {}", entry, menu.element);
        Err(MorphError::InvalidArgument(format!("unknown entry {} for {}", entry, menu.element)))
    }

    /// Replacement candidates of `id`, empty when the replace rule vetoes.
    pub fn resolve_candidates(
        &self,
        id: &str,
    ) -> Result<Vec<CandidateDescriptor>> {
        let element = self.element(id)?;
        Ok(self.resolver.resolve(self.diagram(), element))
    }

    pub fn plan_migration(
        &self,
        id: &str,
        descriptor: &CandidateDescriptor,
    ) -> Result<MigrationPlan> {
        replace::plan_migration(self.diagram(), self.element(id)?, descriptor)
    }

    /// Execute the replacement chosen by `plan` as one history entry.
    ///
    /// Its descriptor must be among the current candidates of the element.
    /// Attribute changes and side effects are planned again against the
    /// current diagram, so a plan computed before later edits cannot carry
    /// outdated pointers or connections into the result.
    pub fn execute(
        &mut self,
        plan: MigrationPlan,
    ) -> Result<ElementId> {
        let candidates = self.resolve_candidates(&plan.element)?;
        if !candidates.contains(&plan.descriptor) {
            return Err(MorphError::InvalidArgument(format!("{} is not a candidate for {}", plan.descriptor.id, plan.element)));
        }
        let current = self.plan_migration(&plan.element, &plan.descriptor)?;
        if current.attributes != plan.attributes || current.side_effects != plan.side_effects {
            debug!("replanned {} for {} against the current diagram", plan.descriptor.id, plan.element);
        }
        self.stack.execute(&ReplaceCommand::new(current))
    }

    /// Replace `id` with the candidate targeting `target`.
    pub fn replace_element(
        &mut self,
        id: &str,
        target: &TargetSpec,
    ) -> Result<ElementId> {
        let descriptor = self
            .resolve_candidates(id)?
            .into_iter()
            .find(|c| c.spec() == Some(target))
            .ok_or(MorphError::InvalidArgument(format!("{} cannot be replaced with {:?}", id, target)))?;
        let plan = self.plan_migration(id, &descriptor)?;
        self.stack.execute(&ReplaceCommand::new(plan))
    }

    pub fn update_properties(
        &mut self,
        id: &str,
        update: PropertyUpdate,
    ) -> Result<ElementId> {
        self.run(&UpdatePropertiesCommand::new(id, update))
    }

    pub fn reconnect_start(
        &mut self,
        flow: &str,
        new_source: &str,
    ) -> Result<ElementId> {
        self.run(&ReconnectCommand::new(flow, Endpoint::Start, new_source))
    }

    pub fn reconnect_end(
        &mut self,
        flow: &str,
        new_target: &str,
    ) -> Result<ElementId> {
        self.run(&ReconnectCommand::new(flow, Endpoint::End, new_target))
    }

    pub fn create_shape(
        &mut self,
        element_type: ElementType,
        parent: &str,
    ) -> Result<ElementId> {
        self.run(&CreateShapeCommand::new(element_type, parent))
    }

    /// Replace the current diagram with one built from `model`, dropping
    /// all history. An invalid model leaves the modeler untouched.
    pub fn import(
        &mut self,
        model: &DiagramModel,
    ) -> Result<()> {
        let diagram = Diagram::try_from(model)?;
        debug!("imported diagram {} with {} elements", diagram.root_id(), diagram.len());
        self.stack.reset(diagram);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.stack.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.stack.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Undoable history entries, oldest first.
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.stack.history()
    }

    /// Output a human-readable representation of the current diagram
    pub fn schema(&self) -> String {
        self.diagram().schema()
    }

    fn run(
        &mut self,
        command: &dyn Command,
    ) -> Result<ElementId> {
        self.stack.execute(command)
    }

    fn apply_header(
        &mut self,
        id: &str,
        header: &HeaderEntry,
    ) -> Result<ElementId> {
        match header.action {
            HeaderAction::ToggleLoop(marker) => {
                let characteristics = if header.active {
                    None
                } else {
                    Some(marker.characteristics())
                };
                self.update_properties(id, PropertyUpdate::LoopCharacteristics(characteristics))
            }
            HeaderAction::ToggleAdHoc => {
                let descriptor = if header.active { FROM_AD_HOC } else { TO_AD_HOC };
                let plan = self.plan_migration(id, &descriptor)?;
                self.stack.execute(&ReplaceCommand::new(plan))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        diagram::{FormalExpression, LoopMarker},
        rules::REPLACE_RULE,
    };

    fn modeler() -> Modeler {
        let model: DiagramModel = serde_json::from_value(json!({
            "id": "Process_1",
            "elements": [
                { "id": "Task_1", "type": "Task" },
                { "id": "SubProcess_1", "type": "SubProcess", "is_expanded": true,
                  "loop_characteristics": { "kind": "standard" } },
                { "id": "Task_2", "type": "Task", "parent": "SubProcess_1" }
            ]
        }))
        .unwrap();
        Modeler::new_with_config(Diagram::try_from(&model).unwrap(), &Config::default())
    }

    fn marker(
        modeler: &Modeler,
        id: &str,
    ) -> Option<LoopMarker> {
        modeler.element(id).unwrap().attributes.loop_characteristics.as_ref().map(|lc| lc.marker())
    }

    #[test]
    fn test_loop_toggles() {
        let mut modeler = modeler();

        let menu = modeler.open_menu("Task_1").unwrap();
        modeler.trigger(&menu, "toggle-sequential-mi").unwrap();
        assert_eq!(marker(&modeler, "Task_1"), Some(LoopMarker::SequentialMultiInstance));

        let menu = modeler.open_menu("Task_1").unwrap();
        modeler.trigger(&menu, "toggle-parallel-mi").unwrap();
        assert_eq!(marker(&modeler, "Task_1"), Some(LoopMarker::ParallelMultiInstance));
        let menu = modeler.open_menu("Task_1").unwrap();
        assert!(!menu.header_entry("toggle-sequential-mi").unwrap().active);
        assert!(menu.header_entry("toggle-parallel-mi").unwrap().active);

        modeler.trigger(&menu, "toggle-parallel-mi").unwrap();
        assert_eq!(marker(&modeler, "Task_1"), None);
        assert_eq!(modeler.history().len(), 3);
    }

    #[test]
    fn test_ad_hoc_toggle_is_independent() {
        let mut modeler = modeler();

        let menu = modeler.open_menu("SubProcess_1").unwrap();
        modeler.trigger(&menu, "toggle-adhoc").unwrap();
        let sub_process = modeler.element("SubProcess_1").unwrap();
        assert_eq!(sub_process.element_type, ElementType::AdHocSubProcess);
        assert!(sub_process.attributes.is_expanded);
        assert_eq!(sub_process.children, vec!["Task_2"]);
        assert_eq!(marker(&modeler, "SubProcess_1"), Some(LoopMarker::Loop));

        let menu = modeler.open_menu("SubProcess_1").unwrap();
        assert!(menu.header_entry("toggle-adhoc").unwrap().active);
        modeler.trigger(&menu, "toggle-loop").unwrap();
        assert_eq!(marker(&modeler, "SubProcess_1"), None);
        assert_eq!(modeler.element("SubProcess_1").unwrap().element_type, ElementType::AdHocSubProcess);

        let menu = modeler.open_menu("SubProcess_1").unwrap();
        modeler.trigger(&menu, "toggle-adhoc").unwrap();
        assert_eq!(modeler.element("SubProcess_1").unwrap().element_type, ElementType::SubProcess);
    }

    #[test]
    fn test_stale_and_unknown_entries() {
        let mut modeler = modeler();
        let menu = modeler.open_menu("Task_1").unwrap();
        modeler.trigger(&menu, "replace-with-user-task").unwrap();

        let err = modeler.trigger(&menu, "replace-with-user-task").unwrap_err();
        assert!(matches!(err, MorphError::InvalidArgument(_)));
        let err = modeler.trigger(&menu, "replace-with-unicorn").unwrap_err();
        assert!(matches!(err, MorphError::InvalidArgument(_)));
    }

    #[test]
    fn test_execute_rejects_outdated_plan() {
        let mut modeler = modeler();
        let descriptor = modeler.resolve_candidates("Task_1").unwrap()[0];
        let plan = modeler.plan_migration("Task_1", &descriptor).unwrap();
        modeler.execute(plan.clone()).unwrap();
        assert_eq!(modeler.element("Task_1").unwrap().element_type, ElementType::SendTask);

        let err = modeler.execute(plan).unwrap_err();
        assert!(matches!(err, MorphError::InvalidArgument(_)));
    }

    #[test]
    fn test_execute_replans_against_current_diagram() {
        let model: DiagramModel = serde_json::from_value(json!({
            "id": "Process_1",
            "elements": [
                { "id": "Gateway_1", "type": "ExclusiveGateway", "default_flow": "Flow_1" },
                { "id": "Task_1", "type": "Task" },
                { "id": "Flow_1", "type": "SequenceFlow", "source": "Gateway_1", "target": "Task_1" }
            ]
        }))
        .unwrap();
        let mut modeler = Modeler::new_with_config(Diagram::try_from(&model).unwrap(), &Config::default());

        let descriptor = *modeler.resolve_candidates("Gateway_1").unwrap().iter().find(|c| c.id == "replace-with-inclusive-gateway").unwrap();
        let plan = modeler.plan_migration("Gateway_1", &descriptor).unwrap();
        modeler.update_properties("Flow_1", PropertyUpdate::ConditionExpression(Some(FormalExpression::new("${x}")))).unwrap();
        assert_eq!(modeler.element("Gateway_1").unwrap().attributes.default_flow, None);

        modeler.execute(plan).unwrap();
        let gateway = modeler.element("Gateway_1").unwrap();
        assert_eq!(gateway.element_type, ElementType::InclusiveGateway);
        assert_eq!(gateway.attributes.default_flow, None);
        assert!(modeler.element("Flow_1").unwrap().attributes.condition_expression.is_some());
    }

    #[test]
    fn test_import_resets_history() {
        let mut modeler = modeler();
        modeler.replace_element("Task_1", &TargetSpec::of(ElementType::UserTask)).unwrap();
        assert!(modeler.can_undo());

        let invalid: DiagramModel = serde_json::from_value(json!({ "id": "", "elements": [] })).unwrap();
        assert!(matches!(modeler.import(&invalid).unwrap_err(), MorphError::Diagram(_)));
        assert_eq!(modeler.element("Task_1").unwrap().element_type, ElementType::UserTask);
        assert!(modeler.can_undo());

        let model: DiagramModel = serde_json::from_value(json!({
            "id": "Process_2",
            "elements": [{ "id": "Gateway_1", "type": "ParallelGateway" }]
        }))
        .unwrap();
        modeler.import(&model).unwrap();
        assert_eq!(modeler.diagram().root_id(), "Process_2");
        assert!(modeler.element("Task_1").is_err());
        assert!(!modeler.can_undo());
        assert!(!modeler.can_redo());
        assert!(modeler.history().is_empty());
    }

    #[test]
    fn test_veto_suppresses_menu() {
        let mut modeler = modeler();
        modeler.add_rule(REPLACE_RULE, |ctx| (ctx.element.id == "Task_1").then_some(false));

        let menu = modeler.open_menu("Task_1").unwrap();
        assert!(menu.is_empty());
        assert!(modeler.resolve_candidates("Task_1").unwrap().is_empty());
        assert!(!modeler.open_menu("SubProcess_1").unwrap().is_empty());
        assert!(modeler.replace_element("Task_1", &TargetSpec::of(ElementType::UserTask)).is_err());
    }
}
