// In-memory gateway for unit tests.
//
// Replies are scripted per command path; every executed command is logged
// so tests can assert on exactly what would have been sent to a router.
#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use rosync_api::{Command, Error, Gateway, Record};

type Reply = Result<Vec<Record>, Error>;

#[derive(Default)]
pub(crate) struct ScriptedGateway {
    /// Replies returned for every call to a path.
    fixed: HashMap<String, Vec<Record>>,
    /// One-shot replies, consumed before `fixed`.
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    /// Rejections keyed by (path, `numbers` argument).
    rejections: HashMap<(String, String), String>,
    sent: Mutex<Vec<Command>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reply with `rows` every time `path` runs.
    pub(crate) fn with_rows(mut self, path: &str, rows: Vec<Record>) -> Self {
        self.fixed.insert(path.to_owned(), rows);
        self
    }

    /// Reply once to `path` with `reply`.
    pub(crate) fn with_reply(self, path: &str, reply: Reply) -> Self {
        self.queued
            .lock()
            .unwrap()
            .entry(path.to_owned())
            .or_default()
            .push_back(reply);
        self
    }

    /// Reject `path` whenever its `numbers` argument equals `target`.
    pub(crate) fn rejecting(mut self, path: &str, target: &str, detail: &str) -> Self {
        self.rejections
            .insert((path.to_owned(), target.to_owned()), detail.to_owned());
        self
    }

    /// Every command executed so far, in order.
    pub(crate) fn sent(&self) -> Vec<Command> {
        self.sent.lock().unwrap().clone()
    }

    /// Executed commands whose path is `path`.
    pub(crate) fn sent_to(&self, path: &str) -> Vec<Command> {
        self.sent()
            .into_iter()
            .filter(|c| c.path() == path)
            .collect()
    }

    fn reply(&self, command: &Command) -> Reply {
        if let Some(target) = command.get("numbers") {
            let key = (command.path().to_owned(), target.to_owned());
            if let Some(detail) = self.rejections.get(&key) {
                return Err(Error::Rejected {
                    command: command.path().to_owned(),
                    status: 400,
                    message: "Bad Request".into(),
                    detail: Some(detail.clone()),
                });
            }
        }

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(command.path())
            .and_then(VecDeque::pop_front);
        if let Some(reply) = queued {
            return reply;
        }

        Ok(self.fixed.get(command.path()).cloned().unwrap_or_default())
    }
}

impl Gateway for ScriptedGateway {
    async fn execute(&self, command: &Command) -> Result<Vec<Record>, Error> {
        self.sent.lock().unwrap().push(command.clone());
        self.reply(command)
    }
}

/// Build a record from `field, value` pairs.
pub(crate) fn record(fields: &[(&str, &str)]) -> Record {
    fields.iter().copied().collect()
}
