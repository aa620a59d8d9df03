use std::fmt;

use crate::{
    Result,
    diagram::{Diagram, ElementId, ElementType},
    modeling::{self, PropertyUpdate},
    replace::{self, MigrationPlan},
};

/// A mutating operation recorded as one history entry.
pub trait Command: fmt::Debug {
    /// Short description shown in the history.
    fn label(&self) -> String;

    /// Apply the command to `diagram`.
    ///
    /// # Returns
    ///
    /// The resulting snapshot and the id of the element the command produced
    /// or changed.
    fn execute(
        &self,
        diagram: &Diagram,
    ) -> Result<(Diagram, ElementId)>;
}

#[derive(Debug, Clone)]
pub struct ReplaceCommand {
    plan: MigrationPlan,
}

impl ReplaceCommand {
    pub fn new(plan: MigrationPlan) -> Self {
        Self {
            plan,
        }
    }
}

impl Command for ReplaceCommand {
    fn label(&self) -> String {
        format!("{} {}", self.plan.descriptor.id, self.plan.element)
    }

    fn execute(
        &self,
        diagram: &Diagram,
    ) -> Result<(Diagram, ElementId)> {
        replace::execute(diagram, &self.plan)
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePropertiesCommand {
    element: ElementId,
    update: PropertyUpdate,
}

impl UpdatePropertiesCommand {
    pub fn new(
        element: &str,
        update: PropertyUpdate,
    ) -> Self {
        Self {
            element: element.to_string(),
            update,
        }
    }
}

impl Command for UpdatePropertiesCommand {
    fn label(&self) -> String {
        format!("update {} of {}", self.update.label(), self.element)
    }

    fn execute(
        &self,
        diagram: &Diagram,
    ) -> Result<(Diagram, ElementId)> {
        let next = modeling::update_properties(diagram, &self.element, &self.update)?;
        Ok((next, self.element.clone()))
    }
}

/// Connection end a [`ReconnectCommand`] moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct ReconnectCommand {
    flow: ElementId,
    endpoint: Endpoint,
    element: ElementId,
}

impl ReconnectCommand {
    pub fn new(
        flow: &str,
        endpoint: Endpoint,
        element: &str,
    ) -> Self {
        Self {
            flow: flow.to_string(),
            endpoint,
            element: element.to_string(),
        }
    }
}

impl Command for ReconnectCommand {
    fn label(&self) -> String {
        format!("reconnect {} of {} to {}", self.endpoint.as_ref(), self.flow, self.element)
    }

    fn execute(
        &self,
        diagram: &Diagram,
    ) -> Result<(Diagram, ElementId)> {
        let next = match self.endpoint {
            Endpoint::Start => modeling::reconnect_start(diagram, &self.flow, &self.element)?,
            Endpoint::End => modeling::reconnect_end(diagram, &self.flow, &self.element)?,
        };
        Ok((next, self.flow.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct CreateShapeCommand {
    element_type: ElementType,
    parent: ElementId,
}

impl CreateShapeCommand {
    pub fn new(
        element_type: ElementType,
        parent: &str,
    ) -> Self {
        Self {
            element_type,
            parent: parent.to_string(),
        }
    }
}

impl Command for CreateShapeCommand {
    fn label(&self) -> String {
        format!("create {} in {}", self.element_type.as_ref(), self.parent)
    }

    fn execute(
        &self,
        diagram: &Diagram,
    ) -> Result<(Diagram, ElementId)> {
        modeling::create_shape(diagram, self.element_type, &self.parent)
    }
}
