use std::fmt;

use crate::tasks::action::{Action, Callable};

/// The ordered steps run for a task.
///
/// A single command or callable is stored as a one-step definition, so the dispatcher only
/// ever deals with sequences.
#[derive(Debug, Clone, Default)]
pub struct TaskDefinition {
    pub steps: Vec<Action>,
}

impl TaskDefinition {
    #[must_use]
    pub fn new(steps: Vec<Action>) -> Self {
        TaskDefinition { steps }
    }
}

impl fmt::Display for TaskDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.steps.as_slice() {
            return write!(f, "{only}");
        }
        f.write_str("[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}

impl From<Action> for TaskDefinition {
    fn from(action: Action) -> Self {
        TaskDefinition::new(vec![action])
    }
}

impl From<Callable> for TaskDefinition {
    fn from(callable: Callable) -> Self {
        Action::Callable(callable).into()
    }
}

impl From<&str> for TaskDefinition {
    fn from(cmd: &str) -> Self {
        Action::from(cmd).into()
    }
}

impl From<String> for TaskDefinition {
    fn from(cmd: String) -> Self {
        Action::from(cmd).into()
    }
}

impl<A: Into<Action>> From<Vec<A>> for TaskDefinition {
    fn from(steps: Vec<A>) -> Self {
        TaskDefinition::new(steps.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Action>, const N: usize> From<[A; N]> for TaskDefinition {
    fn from(steps: [A; N]) -> Self {
        TaskDefinition::new(steps.into_iter().map(Into::into).collect())
    }
}
