//! Task table data model
//!
//! A task table maps task names to definitions. A definition is an ordered list of actions,
//! where each action is either a shell command or a Rust callable. A shell command whose text
//! matches another task's name is treated as a reference to that task and expanded in place.

pub mod action;
pub mod definition;
pub mod table;
