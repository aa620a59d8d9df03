//! Pluggable rule predicates.
//!
//! Rules are registered under an operation name and asked in priority order;
//! the first predicate that returns a definite answer wins. Predicates only
//! see the element by shared reference.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::Deserialize;
use tracing::trace;

use crate::diagram::{Diagram, Element};

/// Operation name consulted before any replacement is offered.
pub const REPLACE_RULE: &str = "element.replace";

/// Priority used by [`RuleEngine::add_rule`].
pub const DEFAULT_PRIORITY: u32 = 1000;

/// Input handed to a rule predicate.
pub struct RuleContext<'a> {
    /// element the operation applies to
    pub element: &'a Element,
    /// diagram the element belongs to
    pub diagram: &'a Diagram,
}

/// Predicate answering `Some(allowed)` or `None` for "no opinion".
pub type RulePredicate = Arc<dyn Fn(&RuleContext<'_>) -> Option<bool> + Send + Sync>;

/// Outcome used when no predicate gives a definite answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RulePolicy {
    #[default]
    Allow,
    Deny,
}

#[derive(Clone)]
struct RegisteredRule {
    priority: u32,
    predicate: RulePredicate,
}

/// Registry of named rule predicates.
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: HashMap<String, Vec<RegisteredRule>>,
}

impl fmt::Debug for RuleEngine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut counts: Vec<(&String, usize)> = self.rules.iter().map(|(k, v)| (k, v.len())).collect();
        counts.sort();
        f.debug_struct("RuleEngine").field("rules", &counts).finish()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate for `name` with the default priority.
    pub fn add_rule<F>(
        &mut self,
        name: &str,
        predicate: F,
    ) where
        F: Fn(&RuleContext<'_>) -> Option<bool> + Send + Sync + 'static,
    {
        self.add_rule_with_priority(name, DEFAULT_PRIORITY, predicate);
    }

    /// Register a predicate for `name`; higher priorities are asked first,
    /// equal priorities in registration order.
    pub fn add_rule_with_priority<F>(
        &mut self,
        name: &str,
        priority: u32,
        predicate: F,
    ) where
        F: Fn(&RuleContext<'_>) -> Option<bool> + Send + Sync + 'static,
    {
        let rules = self.rules.entry(name.to_string()).or_default();
        let at = rules.iter().position(|r| r.priority < priority).unwrap_or(rules.len());
        rules.insert(
            at,
            RegisteredRule {
                priority,
                predicate: Arc::new(predicate),
            },
        );
    }

    /// Whether any predicate is registered for `name`.
    pub fn has_rules(
        &self,
        name: &str,
    ) -> bool {
        self.rules.get(name).is_some_and(|r| !r.is_empty())
    }

    /// Ask the predicates of `name` until one gives a definite answer.
    pub fn allowed(
        &self,
        name: &str,
        ctx: &RuleContext<'_>,
    ) -> Option<bool> {
        self.rules.get(name)?.iter().find_map(|rule| (rule.predicate)(ctx))
    }
}

/// Answers whether an element may be replaced at all.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    engine: RuleEngine,
    policy: RulePolicy,
}

impl RuleEvaluator {
    pub fn new(
        engine: RuleEngine,
        policy: RulePolicy,
    ) -> Self {
        Self {
            engine,
            policy,
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RuleEngine {
        &mut self.engine
    }

    pub fn policy(&self) -> RulePolicy {
        self.policy
    }

    /// Evaluate the replace rule once for `element`.
    pub fn is_replace_allowed(
        &self,
        diagram: &Diagram,
        element: &Element,
    ) -> bool {
        let ctx = RuleContext {
            element,
            diagram,
        };
        let allowed = self.engine.allowed(REPLACE_RULE, &ctx).unwrap_or(self.policy == RulePolicy::Allow);
        trace!("rule {} for {}: {}", REPLACE_RULE, element.id, allowed);
        allowed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::diagram::ElementType;

    fn fixture() -> (Diagram, Element) {
        let diagram = Diagram::new("Process_1");
        let element = Element::new("StartEvent_1", ElementType::StartEvent);
        (diagram, element)
    }

    #[test]
    fn test_permissive_by_default() {
        let (diagram, element) = fixture();
        let evaluator = RuleEvaluator::default();
        assert!(evaluator.is_replace_allowed(&diagram, &element));
    }

    #[test]
    fn test_deny_policy() {
        let (diagram, element) = fixture();
        let evaluator = RuleEvaluator::new(RuleEngine::new(), RulePolicy::Deny);
        assert!(!evaluator.is_replace_allowed(&diagram, &element));
    }

    #[test]
    fn test_veto() {
        let (diagram, element) = fixture();
        let mut engine = RuleEngine::new();
        engine.add_rule(REPLACE_RULE, |_| Some(false));
        assert!(!RuleEvaluator::new(engine, RulePolicy::Allow).is_replace_allowed(&diagram, &element));
    }

    #[test]
    fn test_no_opinion_falls_back_to_policy() {
        let (diagram, element) = fixture();
        let mut engine = RuleEngine::new();
        engine.add_rule(REPLACE_RULE, |_| None);
        assert!(RuleEvaluator::new(engine.clone(), RulePolicy::Allow).is_replace_allowed(&diagram, &element));
        assert!(!RuleEvaluator::new(engine, RulePolicy::Deny).is_replace_allowed(&diagram, &element));
    }

    #[test]
    fn test_priority_order() {
        let (diagram, element) = fixture();
        let mut engine = RuleEngine::new();
        engine.add_rule(REPLACE_RULE, |_| Some(false));
        engine.add_rule_with_priority(REPLACE_RULE, 1500, |_| Some(true));
        assert!(RuleEvaluator::new(engine.clone(), RulePolicy::Allow).is_replace_allowed(&diagram, &element));

        engine.add_rule_with_priority(REPLACE_RULE, 2000, |_| None);
        engine.add_rule_with_priority(REPLACE_RULE, 500, |_| Some(true));
        assert!(RuleEvaluator::new(engine, RulePolicy::Deny).is_replace_allowed(&diagram, &element));
    }

    #[test]
    fn test_predicate_receives_element_once() {
        let (diagram, element) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let mut engine = RuleEngine::new();
        let (c, s) = (calls.clone(), seen.clone());
        engine.add_rule(REPLACE_RULE, move |ctx| {
            c.fetch_add(1, Ordering::SeqCst);
            *s.lock().unwrap() = Some(ctx.element.id.clone());
            None
        });

        RuleEvaluator::new(engine, RulePolicy::Allow).is_replace_allowed(&diagram, &element);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("StartEvent_1"));
    }

    #[test]
    fn test_rules_are_scoped_by_name() {
        let (diagram, element) = fixture();
        let mut engine = RuleEngine::new();
        engine.add_rule("connection.create", |_| Some(false));
        assert!(engine.has_rules("connection.create"));
        assert!(!engine.has_rules(REPLACE_RULE));
        assert!(RuleEvaluator::new(engine, RulePolicy::Allow).is_replace_allowed(&diagram, &element));
    }
}
