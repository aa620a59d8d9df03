use serde::{Deserialize, Serialize};

use crate::{MorphError, Result, model::ElementModel};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramModel {
    /// id of the process root
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementModel>,
}

impl DiagramModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let diagram = serde_json::from_str::<DiagramModel>(s);
        match diagram {
            Ok(v) => Ok(v),
            Err(e) => Err(MorphError::Diagram(format!("{}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{ElementType, EventDefinitionType};

    #[test]
    fn test_from_json() {
        let model = DiagramModel::from_json(
            r#"{
                "id": "Process_1",
                "elements": [
                    { "id": "StartEvent_1", "type": "StartEvent", "event_definition": "timer" },
                    { "id": "Task_1", "type": "UserTask", "name": "Review" },
                    { "id": "Flow_1", "type": "SequenceFlow", "source": "StartEvent_1", "target": "Task_1" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(model.elements.len(), 3);
        assert_eq!(model.elements[0].attributes.event_definition, Some(EventDefinitionType::Timer));
        assert_eq!(model.elements[1].element_type, ElementType::UserTask);
        assert_eq!(model.elements[1].attributes.name.as_deref(), Some("Review"));
        assert_eq!(model.elements[2].source.as_deref(), Some("StartEvent_1"));
    }

    #[test]
    fn test_from_json_unknown_type() {
        let err = DiagramModel::from_json(r#"{ "id": "P", "elements": [ { "id": "X", "type": "Lane" } ] }"#).unwrap_err();
        assert!(matches!(err, MorphError::Diagram(_)));
    }
}
