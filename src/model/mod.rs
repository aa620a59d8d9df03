mod diagram;
mod element;

pub use diagram::DiagramModel;
pub use element::ElementModel;
