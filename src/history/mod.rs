//! Undoable command history.

mod command;
mod stack;

pub use command::{Command, CreateShapeCommand, Endpoint, ReconnectCommand, ReplaceCommand, UpdatePropertiesCommand};
pub use stack::{CommandStack, HistoryRecord};
