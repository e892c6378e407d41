//! Task resolution and execution
//!
//! The dispatcher looks up the requested task, checks its reference graph for cycles, then
//! walks its steps in order. Steps naming another task are expanded fully before the next
//! step starts; every other step is run as a shell command or a callable.

use std::collections::HashSet;
use std::io::{self, IsTerminal, Write};
use std::process::Command as ProcessCommand;

use log::debug;
use thiserror::Error;

use crate::env::EnvOverlay;
use crate::invocation::Invocation;
use crate::messages::{format_script_message, format_sub_script_message, format_usage};
use crate::tasks::action::{Action, CallableError};
use crate::tasks::definition::TaskDefinition;
use crate::tasks::table::TaskTable;
use crate::template::{TemplateError, format_positional};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid arguments: {0}")]
    Invocation(#[from] clap::Error),
    #[error("unknown task `{0}`")]
    UnknownTask(String),
    #[error("cannot call self-referencing script `{task}`")]
    SelfReference { task: String },
    #[error("task cycle detected: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
    #[error("cannot substitute arguments into `{command}`: {source}")]
    Template {
        command: String,
        #[source]
        source: TemplateError,
    },
    #[error("command `{command}` failed ({})", describe_exit(*code))]
    CommandFailed { command: String, code: Option<i32> },
    #[error("unable to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{name}` failed: {source}")]
    CallableFailure {
        name: String,
        #[source]
        source: CallableError,
    },
    #[error("unable to write output: {0}")]
    Output(#[from] io::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// How a dispatch ended when no error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No task name was given; the task list was printed
    Usage,
    /// The task and everything it references ran successfully
    Completed,
}

/// Runs tasks from a task table with an environment overlay
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    table: TaskTable,
    env: EnvOverlay,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: TaskTable) -> Self {
        Dispatcher {
            table,
            env: EnvOverlay::default(),
        }
    }

    /// Set the environment overlay for shell commands, replacing any previous overlay.
    #[must_use]
    pub fn with_env(mut self, env: impl Into<EnvOverlay>) -> Self {
        self.env = env.into();
        self
    }

    #[must_use]
    pub fn env(&self) -> &EnvOverlay {
        &self.env
    }

    /// Run the invocation, printing diagnostics to stdout.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::run_to`].
    pub fn run(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let mut stdout = io::stdout();
        let color = stdout.is_terminal();
        self.run_to(invocation, &mut stdout, color)
    }

    /// Run the invocation, printing diagnostics to `out`.
    ///
    /// Prints the task list and returns [`Outcome::Usage`] when no task name was given.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownTask` if the task is not in the table,
    /// `DispatchError::SelfReference` or `DispatchError::Cycle` if its references loop back
    /// (checked before any step runs), and the first error raised by a step otherwise.
    pub fn run_to(
        &self,
        invocation: &Invocation,
        out: &mut dyn Write,
        color: bool,
    ) -> Result<Outcome, DispatchError> {
        let Some(task) = invocation.task.as_deref() else {
            out.write_all(format_usage(&self.table, color).as_bytes())?;
            out.flush()?;
            return Ok(Outcome::Usage);
        };

        let definition = self.validate(task)?;

        debug!("Dispatching task '{task}' with {} extra args", invocation.args.len());
        let mut run = Run {
            dispatcher: self,
            args: &invocation.args,
            out,
            color,
        };
        run.run_script(task, definition)?;
        Ok(Outcome::Completed)
    }

    /// Check that expanding `task` never revisits a task that is already being expanded,
    /// returning its definition.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownTask` if `task` is not in the table,
    /// `DispatchError::SelfReference` if a task lists itself as a step, or
    /// `DispatchError::Cycle` for longer loops.
    pub fn validate(&self, task: &str) -> Result<&TaskDefinition, DispatchError> {
        let definition = self
            .table
            .get(task)
            .ok_or_else(|| DispatchError::UnknownTask(task.to_string()))?;
        let mut chain = Vec::new();
        let mut checked = HashSet::new();
        self.check_references(task, &mut chain, &mut checked)?;
        Ok(definition)
    }

    fn check_references(
        &self,
        name: &str,
        chain: &mut Vec<String>,
        checked: &mut HashSet<String>,
    ) -> Result<(), DispatchError> {
        if checked.contains(name) {
            return Ok(());
        }
        let Some(definition) = self.table.get(name) else {
            return Ok(());
        };
        chain.push(name.to_string());

        for step in &definition.steps {
            let Action::Shell(reference) = step else {
                continue;
            };
            if !self.table.contains(reference) {
                continue;
            }
            if reference == name {
                return Err(DispatchError::SelfReference {
                    task: name.to_string(),
                });
            }
            if let Some(start) = chain.iter().position(|n| n == reference) {
                let mut cycle = chain[start..].to_vec();
                cycle.push(reference.clone());
                return Err(DispatchError::Cycle { chain: cycle });
            }
            self.check_references(reference, chain, checked)?;
        }

        chain.pop();
        checked.insert(name.to_string());
        Ok(())
    }
}

/// State for a single dispatch
struct Run<'a> {
    dispatcher: &'a Dispatcher,
    args: &'a [String],
    out: &'a mut dyn Write,
    color: bool,
}

impl Run<'_> {
    fn run_script(&mut self, name: &str, definition: &TaskDefinition) -> Result<(), DispatchError> {
        let dispatcher = self.dispatcher;
        self.print(&format_script_message(definition, self.color))?;

        for step in &definition.steps {
            match step {
                Action::Shell(text) => match dispatcher.table.get(text) {
                    Some(_) if text == name => {
                        return Err(DispatchError::SelfReference {
                            task: name.to_string(),
                        });
                    }
                    Some(nested) => {
                        self.print(&format_sub_script_message(text, self.color))?;
                        self.run_script(text, nested)?;
                    }
                    None => self.run_shell(text)?,
                },
                Action::Callable(callable) => {
                    debug!("Calling '{}' with {:?}", callable.name, self.args);
                    callable
                        .call(self.args)
                        .map_err(|source| DispatchError::CallableFailure {
                            name: callable.name.clone(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    }

    fn run_shell(&mut self, template: &str) -> Result<(), DispatchError> {
        let command = if self.args.is_empty() {
            template.to_string()
        } else {
            format_positional(template, self.args).map_err(|source| DispatchError::Template {
                command: template.to_string(),
                source,
            })?
        };

        // Diagnostics must reach the terminal before the child writes to it
        self.out.flush()?;
        debug!("Spawning shell command: {command}");
        let status = shell_command(&command)
            .env_clear()
            .envs(self.dispatcher.env.merged())
            .status()
            .map_err(|source| DispatchError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DispatchError::CommandFailed {
                command,
                code: status.code(),
            })
        }
    }

    fn print(&mut self, message: &str) -> Result<(), DispatchError> {
        self.out.write_all(message.as_bytes())?;
        Ok(())
    }
}

fn shell_command(command: &str) -> ProcessCommand {
    #[cfg(windows)]
    {
        let mut process = ProcessCommand::new("cmd");
        process.arg("/C").arg(command);
        process
    }
    #[cfg(not(windows))]
    {
        let mut process = ProcessCommand::new("sh");
        process.arg("-c").arg(command);
        process
    }
}
