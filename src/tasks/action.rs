use std::fmt;
use std::sync::Arc;

/// Error type returned by callable actions
pub type CallableError = Box<dyn std::error::Error + Send + Sync>;

type CallableFn = dyn Fn(&[String]) -> Result<(), CallableError> + Send + Sync;

/// A named Rust function that can be used as a task step.
///
/// The function receives the extra arguments given after the task name, or an empty slice
/// when there are none.
#[derive(Clone)]
pub struct Callable {
    pub name: String,
    func: Arc<CallableFn>,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), CallableError> + Send + Sync + 'static,
    {
        Callable {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Invoke the wrapped function with the forwarded arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function returns.
    pub fn call(&self, args: &[String]) -> Result<(), CallableError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

/// A single step of a task definition
#[derive(Debug, Clone)]
pub enum Action {
    /// Shell command text, or the name of another task in the same table
    Shell(String),
    Callable(Callable),
}

impl Action {
    #[must_use]
    pub fn shell(cmd: impl Into<String>) -> Self {
        Action::Shell(cmd.into())
    }

    pub fn call<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), CallableError> + Send + Sync + 'static,
    {
        Action::Callable(Callable::new(name, func))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shell(cmd) => f.write_str(cmd),
            Action::Callable(callable) => write!(f, "<{}>", callable.name),
        }
    }
}

impl From<&str> for Action {
    fn from(cmd: &str) -> Self {
        Action::Shell(cmd.to_string())
    }
}

impl From<String> for Action {
    fn from(cmd: String) -> Self {
        Action::Shell(cmd)
    }
}

impl From<Callable> for Action {
    fn from(callable: Callable) -> Self {
        Action::Callable(callable)
    }
}
