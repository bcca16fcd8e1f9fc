// Command model shared by every gateway.
//
// A command is a menu path (`/ppp/secret/set`) plus ordered `key=value`
// arguments. Gateways decide how to put it on the wire.

use std::fmt;

/// A single RouterOS command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    path: String,
    args: Vec<(String, String)>,
}

impl Command {
    /// Create a command with no arguments.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Append a `key=value` argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    /// Menu path, e.g. `/ip/firewall/address-list/remove`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    /// Value of the first argument named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Arguments rendered as `key=value` words.
    pub fn words(&self) -> Vec<String> {
        self.args.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (k, v) in &self.args {
            write!(f, " {k}={v}")?;
        }
        Ok(())
    }
}
