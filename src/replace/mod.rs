//! Replacement decision and migration.
//!
//! [`CandidateResolver`] lists what an element may become, [`plan_migration`]
//! turns one choice into a [`MigrationPlan`] and [`execute`] applies that plan
//! to a diagram snapshot.

mod executor;
pub mod options;
mod planner;
mod resolver;
mod target;

pub use executor::execute;
pub use planner::{AttributeChange, MigrationPlan, SideEffect, plan_migration};
pub use resolver::{CandidateResolver, Category, categorize};
pub use target::{CandidateDescriptor, FlowVariant, ReplaceTarget, TargetSpec};
