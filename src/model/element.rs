use serde::{Deserialize, Serialize};

use crate::diagram::{Attributes, ElementType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementModel {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// containing element, the process when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// activity a boundary event is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}
