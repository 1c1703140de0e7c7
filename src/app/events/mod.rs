//! AppCommand-Enum: die Action-Grenze des Editors.

mod command;

pub use command::AppCommand;
