use std::ffi::OsString;

use clap::error::ErrorKind;

/// Command line of a task run: `<program> <task-name> [extra-args...]`.
///
/// There is no option syntax: the first argument is the task and everything after it is
/// forwarded to the task's steps verbatim, including `--` and values that start with `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub task: Option<String>,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub fn new(task: impl Into<String>, args: Vec<String>) -> Self {
        Invocation {
            task: Some(task.into()),
            args,
        }
    }

    /// Split a full argument list, program name first.
    ///
    /// # Errors
    ///
    /// Returns a `clap::Error` of kind `InvalidUtf8` if an argument is not valid UTF-8.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut words = args
            .into_iter()
            .skip(1)
            .map(|arg| {
                let arg: OsString = arg.into();
                arg.into_string().map_err(|arg| {
                    clap::Error::raw(
                        ErrorKind::InvalidUtf8,
                        format!("argument {} is not valid UTF-8\n", arg.to_string_lossy()),
                    )
                })
            })
            .collect::<Result<Vec<String>, clap::Error>>()?
            .into_iter();
        Ok(Invocation {
            task: words.next(),
            args: words.collect(),
        })
    }

    /// Split the arguments of the current process.
    ///
    /// # Errors
    ///
    /// Returns a `clap::Error` if an argument is not valid UTF-8.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::from_args(std::env::args_os())
    }
}
