//! Immutable diagram snapshot.
//!
//! A [`Diagram`] stores elements in a persistent hash map, so cloning a
//! snapshot is cheap and every mutating operation works on its own copy.
//! The command stack keeps the snapshots before and after each command,
//! which turns undo and redo into a snapshot swap.

use crate::{
    MorphError, Result,
    diagram::{
        element::{Element, ElementId},
        types::ElementType,
    },
    model::DiagramModel,
};

/// A snapshot of the element graph rooted at a process.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// id of the root process
    root: ElementId,
    /// all elements, including the root and connections
    elements: im::HashMap<ElementId, Element>,
}

impl Diagram {
    /// create an empty diagram with a root process
    pub fn new(root_id: &str) -> Self {
        let mut elements = im::HashMap::new();
        elements.insert(root_id.to_string(), Element::new(root_id, ElementType::Process));

        Self {
            root: root_id.to_string(),
            elements,
        }
    }

    /// id of the root process
    pub fn root_id(&self) -> &str {
        &self.root
    }

    /// get element by id
    pub fn get(
        &self,
        id: &str,
    ) -> Option<&Element> {
        self.elements.get(id)
    }

    /// get element by id, failing when it does not exist
    pub fn element(
        &self,
        id: &str,
    ) -> Result<&Element> {
        self.get(id).ok_or_else(|| MorphError::NotFound(id.to_string()))
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.elements.contains_key(id)
    }

    /// number of elements, root included
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// all element ids, sorted
    pub fn ids(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.elements.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// all connections, sorted by id
    pub fn connections(&self) -> Vec<&Element> {
        let mut connections: Vec<&Element> = self.elements.values().filter(|e| e.element_type.is_connection()).collect();
        connections.sort_by(|a, b| a.id.cmp(&b.id));
        connections
    }

    /// get the container of an element
    pub fn parent_of(
        &self,
        element: &Element,
    ) -> Option<&Element> {
        element.parent.as_deref().and_then(|id| self.get(id))
    }

    /// get the source of a connection
    pub fn source_of(
        &self,
        connection: &Element,
    ) -> Option<&Element> {
        connection.source.as_deref().and_then(|id| self.get(id))
    }

    /// get the target of a connection
    pub fn target_of(
        &self,
        connection: &Element,
    ) -> Option<&Element> {
        connection.target.as_deref().and_then(|id| self.get(id))
    }

    /// get the activity a boundary event is attached to
    pub fn host_of(
        &self,
        element: &Element,
    ) -> Option<&Element> {
        element.host.as_deref().and_then(|id| self.get(id))
    }

    /// Output a human-readable representation of the diagram
    pub fn schema(&self) -> String {
        let connections = self.connections();
        let mut lines = Vec::new();

        lines.push("=== Diagram ===".to_string());
        lines.push(format!("Elements: {}, Connections: {}", self.len() - connections.len(), connections.len()));
        lines.push(String::new());

        // Print containment tree
        lines.push("--- Elements ---".to_string());
        let mut stack = vec![(self.root.clone(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(element) = self.get(&id) else {
                continue;
            };
            if !element.element_type.is_connection() {
                lines.push(format!("{}{}", "  ".repeat(depth), describe(element)));
            }
            for child in element.children.iter().rev() {
                stack.push((child.clone(), depth + 1));
            }
        }
        lines.push(String::new());

        // Print connections
        lines.push("--- Connections ---".to_string());
        for connection in connections {
            let source = connection.source.as_deref().unwrap_or("?");
            let target = connection.target.as_deref().unwrap_or("?");
            let mut flags = Vec::new();
            if self.source_of(connection).is_some_and(|s| connection.is_default_of(s)) {
                flags.push("default");
            }
            if connection.attributes.condition_expression.is_some() {
                flags.push("conditional");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            lines.push(format!("{} --> {} (id: {}){}", source, target, connection.id, flags));
        }

        lines.join("\n")
    }

    /// insert or supersede an element, returning the previous value
    pub(crate) fn insert(
        &mut self,
        element: Element,
    ) -> Option<Element> {
        self.elements.insert(element.id.clone(), element)
    }

    /// update an element in place on this working copy
    pub(crate) fn update<F>(
        &mut self,
        id: &str,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Element),
    {
        let element = self.elements.get_mut(id).ok_or_else(|| MorphError::NotFound(id.to_string()))?;
        f(element);
        Ok(())
    }

    /// point the default flow of `source` at `flow`, or clear it
    pub(crate) fn set_default_flow(
        &mut self,
        source: &str,
        flow: Option<ElementId>,
    ) -> Result<()> {
        self.update(source, |s| s.attributes.default_flow = flow)
    }

    /// remove a connection and every reference to it
    pub(crate) fn remove_connection(
        &mut self,
        id: &str,
    ) -> Result<Element> {
        let connection = self.elements.remove(id).ok_or_else(|| MorphError::NotFound(id.to_string()))?;

        if let Some(source) = connection.source.as_deref().and_then(|s| self.elements.get_mut(s)) {
            source.outgoing.retain(|f| f != id);
            if source.attributes.default_flow.as_deref() == Some(id) {
                source.attributes.default_flow = None;
            }
        }
        if let Some(target) = connection.target.as_deref().and_then(|t| self.elements.get_mut(t)) {
            target.incoming.retain(|f| f != id);
        }
        if let Some(parent) = connection.parent.as_deref().and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|c| c != id);
        }

        Ok(connection)
    }

    /// Remove an element with its children, attached boundary events and
    /// connections. Returns the ids of all removed elements.
    pub(crate) fn remove_element(
        &mut self,
        id: &str,
    ) -> Result<Vec<ElementId>> {
        let element = self.element(id)?.clone();
        if element.element_type == ElementType::Process {
            return Err(MorphError::InvalidArgument(format!("cannot remove root {}", id)));
        }
        if element.element_type.is_connection() {
            self.remove_connection(id)?;
            return Ok(vec![element.id]);
        }

        let mut removed = Vec::new();
        for dependent in element.children.iter().chain(element.attachers.iter()) {
            if self.contains(dependent) {
                removed.extend(self.remove_element(dependent)?);
            }
        }
        for flow in element.incoming.iter().chain(element.outgoing.iter()) {
            if self.contains(flow) {
                self.remove_connection(flow)?;
                removed.push(flow.clone());
            }
        }
        if let Some(host) = element.host.as_deref().and_then(|h| self.elements.get_mut(h)) {
            host.attachers.retain(|a| a != id);
        }
        if let Some(parent) = element.parent.as_deref().and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|c| c != id);
        }
        self.elements.remove(id);
        removed.push(element.id);

        Ok(removed)
    }
}

fn describe(element: &Element) -> String {
    let attrs = &element.attributes;
    let mut markers = Vec::new();
    if let Some(def) = attrs.event_definition {
        markers.push(def.as_ref().to_string());
    }
    if (element.element_type == ElementType::BoundaryEvent || element.element_type == ElementType::StartEvent) && !attrs.is_interrupting {
        markers.push("non-interrupting".to_string());
    }
    if let Some(lc) = &attrs.loop_characteristics {
        markers.push(lc.marker().as_ref().to_string());
    }
    if element.element_type.is_sub_process() {
        markers.push(if attrs.is_expanded { "expanded" } else { "collapsed" }.to_string());
    }
    if attrs.triggered_by_event {
        markers.push("triggered_by_event".to_string());
    }
    if let Some(flow) = &attrs.default_flow {
        markers.push(format!("default: {}", flow));
    }

    let name = attrs.name.as_deref().map(|n| format!(" \"{}\"", n)).unwrap_or_default();
    let markers = if markers.is_empty() {
        String::new()
    } else {
        format!(" ({})", markers.join(", "))
    };
    format!("[{}] {}{}{}", element.id, element.element_type.as_ref(), name, markers)
}

impl TryFrom<&DiagramModel> for Diagram {
    type Error = MorphError;

    fn try_from(model: &DiagramModel) -> Result<Self> {
        if model.id.is_empty() {
            return Err(MorphError::Diagram("diagram id must not be empty".to_string()));
        }
        let mut diagram = Diagram::new(&model.id);

        for m in model.elements.iter() {
            if m.element_type == ElementType::Process {
                return Err(MorphError::Diagram(format!("nested process {} is not supported", m.id)));
            }
            if diagram.contains(&m.id) {
                return Err(MorphError::Diagram(format!("duplicate element id {}", m.id)));
            }
            let mut element = Element::new(&m.id, m.element_type);
            element.attributes = m.attributes.clone();
            element.parent = Some(m.parent.clone().unwrap_or_else(|| model.id.clone()));
            element.source = m.source.clone();
            element.target = m.target.clone();
            element.host = m.host.clone();
            diagram.insert(element);
        }

        for m in model.elements.iter() {
            let parent_id = m.parent.as_deref().unwrap_or(&model.id);
            let parent = diagram.get(parent_id).ok_or(MorphError::Diagram(format!("parent {} of {} not found", parent_id, m.id)))?;
            if !parent.element_type.can_hold_children() {
                return Err(MorphError::Diagram(format!("{} cannot contain {}", parent_id, m.id)));
            }
            diagram.update(parent_id, |p| p.children.push(m.id.clone()))?;

            if m.element_type.is_connection() {
                let source = m.source.as_deref().ok_or(MorphError::Diagram(format!("connection {} has no source", m.id)))?;
                let target = m.target.as_deref().ok_or(MorphError::Diagram(format!("connection {} has no target", m.id)))?;
                for endpoint in [source, target] {
                    let node = diagram.get(endpoint).ok_or(MorphError::Diagram(format!("endpoint {} of {} not found", endpoint, m.id)))?;
                    if !node.element_type.is_flow_node() {
                        return Err(MorphError::Diagram(format!("endpoint {} of {} is not a flow node", endpoint, m.id)));
                    }
                }
                diagram.update(source, |s| s.outgoing.push(m.id.clone()))?;
                diagram.update(target, |t| t.incoming.push(m.id.clone()))?;
            } else if m.source.is_some() || m.target.is_some() {
                return Err(MorphError::Diagram(format!("{} is not a connection", m.id)));
            }

            match (m.element_type, m.host.as_deref()) {
                (ElementType::BoundaryEvent, Some(host)) => {
                    let node = diagram.get(host).ok_or(MorphError::Diagram(format!("host {} of {} not found", host, m.id)))?;
                    if !node.element_type.is_activity() {
                        return Err(MorphError::Diagram(format!("host {} of {} is not an activity", host, m.id)));
                    }
                    diagram.update(host, |h| h.attachers.push(m.id.clone()))?;
                }
                (ElementType::BoundaryEvent, None) => {
                    return Err(MorphError::Diagram(format!("boundary event {} has no host", m.id)));
                }
                (_, Some(_)) => {
                    return Err(MorphError::Diagram(format!("{} is not a boundary event", m.id)));
                }
                (_, None) => {}
            }
        }

        for m in model.elements.iter() {
            let mut current = m.id.as_str();
            let mut depth = 0;
            while current != model.id {
                depth += 1;
                if depth > model.elements.len() {
                    return Err(MorphError::Diagram(format!("containment cycle through {}", m.id)));
                }
                current = diagram
                    .get(current)
                    .and_then(|e| e.parent.as_deref())
                    .ok_or(MorphError::Diagram(format!("{} is not reachable from {}", m.id, model.id)))?;
            }
        }

        for m in model.elements.iter() {
            let attrs = &m.attributes;
            if attrs.loop_characteristics.is_some() && !m.element_type.is_activity() {
                return Err(MorphError::Diagram(format!("{} cannot carry loop characteristics", m.id)));
            }
            if attrs.condition_expression.is_some() && !m.element_type.is_connection() {
                return Err(MorphError::Diagram(format!("{} cannot carry a condition expression", m.id)));
            }
            let Some(flow_id) = attrs.default_flow.as_deref() else {
                continue;
            };
            if !m.element_type.can_carry_default_flow() {
                return Err(MorphError::Diagram(format!("{} cannot carry a default flow", m.id)));
            }
            let flow = diagram.get(flow_id).ok_or(MorphError::Diagram(format!("default flow {} of {} not found", flow_id, m.id)))?;
            if !flow.element_type.is_connection() || flow.source.as_deref() != Some(m.id.as_str()) {
                return Err(MorphError::Diagram(format!("default flow {} is not an outgoing flow of {}", flow_id, m.id)));
            }
            if flow.attributes.condition_expression.is_some() {
                return Err(MorphError::Diagram(format!("default flow {} carries a condition expression", flow_id)));
            }
        }

        Ok(diagram)
    }
}
