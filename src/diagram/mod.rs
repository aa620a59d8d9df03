mod diagram;
pub mod element;
pub mod types;

pub use diagram::Diagram;
pub use element::{Attributes, Element, ElementId, FormalExpression, LoopCharacteristics, LoopMarker};
pub use types::{ElementType, EventDefinitionType};
