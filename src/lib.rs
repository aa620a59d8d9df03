//! # Flowmorph
//!
//! Flowmorph is the replacement engine behind a BPMN "replace" menu. Given a
//! diagram element it decides which element types it may be swapped for,
//! plans how attributes and connections migrate, and applies the swap as a
//! single undoable step.
//!
//! ## Core Features
//!
//! - **Candidate Resolution**: fixed, ordered option tables per element category
//! - **Migration Planning**: pure plans of attribute transfers and structural side effects
//! - **Snapshot History**: every operation yields a new immutable diagram; undo swaps snapshots
//! - **Pluggable Rules**: veto or allow replacements with prioritized predicates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowmorph::{DiagramModel, ModelerBuilder};
//!
//! let model = DiagramModel::from_json(json_str)?;
//! let mut modeler = ModelerBuilder::new().diagram(model).build()?;
//!
//! let menu = modeler.open_menu("Task_1")?;
//! modeler.trigger(&menu, "replace-with-service-task")?;
//! modeler.undo();
//! ```

mod builder;
mod config;
pub mod diagram;
mod error;
pub mod history;
mod menu;
mod model;
pub mod modeling;
mod modeler;
pub mod replace;
pub mod rules;
mod utils;

pub use builder::ModelerBuilder;
pub use config::{Config, RulesConfig};
pub use diagram::{Diagram, Element, ElementId, ElementType, EventDefinitionType, LoopMarker};
pub use error::MorphError;
pub use history::HistoryRecord;
pub use menu::{HeaderAction, HeaderEntry, ReplaceMenu};
pub use model::*;
pub use modeler::Modeler;
pub use modeling::PropertyUpdate;
pub use replace::{CandidateDescriptor, FlowVariant, MigrationPlan, TargetSpec};
pub use rules::{REPLACE_RULE, RuleContext, RuleEngine, RulePolicy};

/// Result type alias for Flowmorph operations.
pub type Result<T> = std::result::Result<T, MorphError>;
