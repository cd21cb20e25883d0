// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process invocations with typed, late-bound message arguments.
//!
//! ```text
//! Invocation { program, args: [Text | Message] }
//!   local:  resolve(vars)  --> CommandLine (vars substituted)
//!   remote: to_shell()     --> git commit -m "[remote] SVN r${rev}"
//! ```
//!
//! A `Message` may reference a variable captured by an earlier step in the
//! same batch (for example the external revision). Locally the variable is
//! substituted before spawning; in a remote script it is expanded by the shell.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SubsystemError;
use crate::workflow::runner::CommandLine;

/// One piece of a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    Text(String),
    Var(String),
}

/// A message assembled from literal text and captured variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Vec<MessagePart>);

impl Message {
    /// A message consisting of literal text only.
    pub fn literal(text: impl Into<String>) -> Self {
        Self(vec![MessagePart::Text(text.into())])
    }

    /// Appends literal text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.0.push(MessagePart::Text(text.into()));
        self
    }

    /// Appends a reference to a captured variable.
    #[must_use]
    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.0.push(MessagePart::Var(name.into()));
        self
    }

    /// Returns `prefix` followed by every part of `inner`.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>, inner: Self) -> Self {
        let mut parts = vec![MessagePart::Text(prefix.into())];
        parts.extend(inner.0);
        Self(parts)
    }

    /// Names of the variables this message references.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|part| match part {
            MessagePart::Var(name) => Some(name.as_str()),
            MessagePart::Text(_) => None,
        })
    }

    /// Substitutes captured variables.
    ///
    /// # Errors
    ///
    /// Returns `SubsystemError::UncapturedVariable` if a referenced variable
    /// was never captured.
    pub fn resolve(&self, vars: &BTreeMap<String, String>) -> Result<String, SubsystemError> {
        let mut out = String::new();
        for part in &self.0 {
            match part {
                MessagePart::Text(text) => out.push_str(text),
                MessagePart::Var(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| SubsystemError::UncapturedVariable(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Renders the message as one double-quoted shell word with `${var}` expansions.
    #[must_use]
    pub fn to_shell(&self) -> String {
        let mut out = String::from("\"");
        for part in &self.0 {
            match part {
                MessagePart::Text(text) => {
                    for ch in text.chars() {
                        if matches!(ch, '"' | '\\' | '$' | '`') {
                            out.push('\\');
                        }
                        out.push(ch);
                    }
                }
                MessagePart::Var(name) => {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        out.push('"');
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            match part {
                MessagePart::Text(text) => f.write_str(text)?,
                MessagePart::Var(name) => write!(f, "${{{name}}}")?,
            }
        }
        Ok(())
    }
}

/// A single argument of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    Message(Message),
}

/// An external program call, not yet bound to local or remote execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<Arg>,
}

fn quote(word: &str) -> Cow<'_, str> {
    shell_escape::unix::escape(Cow::Borrowed(word))
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Text(arg.into()));
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|arg| Arg::Text(arg.into())));
        self
    }

    /// Appends a message argument.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.args.push(Arg::Message(message));
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[Arg] {
        &self.args
    }

    /// Binds captured variables, producing a concrete command line.
    ///
    /// # Errors
    ///
    /// Returns `SubsystemError::UncapturedVariable` if a message argument
    /// references a variable that was never captured.
    pub fn resolve(&self, vars: &BTreeMap<String, String>) -> Result<CommandLine, SubsystemError> {
        let args = self
            .args
            .iter()
            .map(|arg| match arg {
                Arg::Text(text) => Ok(text.clone()),
                Arg::Message(message) => message.resolve(vars),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommandLine::new(&self.program).args(args))
    }

    /// Renders the invocation as one line of POSIX shell.
    #[must_use]
    pub fn to_shell(&self) -> String {
        let mut line = quote(&self.program).into_owned();
        for arg in &self.args {
            line.push(' ');
            match arg {
                Arg::Text(text) => line.push_str(&quote(text)),
                Arg::Message(message) => line.push_str(&message.to_shell()),
            }
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}
