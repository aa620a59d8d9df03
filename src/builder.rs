use crate::{
    Config, Modeler, Result, RulePolicy,
    diagram::Diagram,
    model::DiagramModel,
    rules::{RuleEngine, RuleEvaluator},
};

/// Root id of the empty diagram built when no model is given.
const DEFAULT_ROOT_ID: &str = "Process_1";

#[derive(Debug, Default)]
pub struct ModelerBuilder {
    config: Config,
    rules: RuleEngine,
    rule_policy: Option<RulePolicy>,
    history_limit: Option<usize>,
    diagram: Option<DiagramModel>,
}

impl ModelerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn rules(
        mut self,
        rules: RuleEngine,
    ) -> Self {
        self.rules = rules;
        self
    }

    pub fn rule_policy(
        mut self,
        policy: RulePolicy,
    ) -> Self {
        self.rule_policy = Some(policy);
        self
    }

    pub fn history_limit(
        mut self,
        limit: usize,
    ) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn diagram(
        mut self,
        model: DiagramModel,
    ) -> Self {
        self.diagram = Some(model);
        self
    }

    pub fn build(&self) -> Result<Modeler> {
        let diagram = match self.diagram.as_ref() {
            Some(model) => Diagram::try_from(model)?,
            None => Diagram::new(DEFAULT_ROOT_ID),
        };
        let policy = self.rule_policy.unwrap_or(self.config.rules.default_policy);
        let history_limit = self.history_limit.unwrap_or(self.config.history_limit);
        let modeler = Modeler::new(diagram, RuleEvaluator::new(self.rules.clone(), policy), history_limit);

        Ok(modeler)
    }
}
