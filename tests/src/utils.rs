use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use nfa_core::Transport;
use nfa_core::transport::Fields;
use serde_json::Value;

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Call {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<Value, String>>,
    calls: Vec<Call>,
}

/// Replays canned responses in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn reply(self, value: Value) -> Self {
        self.script.lock().unwrap().replies.push_back(Ok(value));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    fn answer(&self, method: &'static str, path: &str, fields: &Fields) -> anyhow::Result<Value> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call {
            method,
            path: path.to_string(),
            fields: fields.to_vec(),
        });

        match script.replies.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(anyhow!(reason)),
            None => Err(anyhow!("no scripted reply for {method} {path}")),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str, query: &Fields) -> anyhow::Result<Value> {
        self.answer("GET", path, query)
    }

    async fn post(&self, path: &str, form: &Fields) -> anyhow::Result<Value> {
        self.answer("POST", path, form)
    }
}
