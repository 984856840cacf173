use std::sync::Mutex;

use async_trait::async_trait;
use kursor_contact::{FormDraft, Submitter};

/// Replies with a fixed status, or fails like a dropped connection when
/// `status` is `None`. Every posted draft is kept.
pub struct ScriptedSubmitter {
    status: Option<u16>,
    posted: Mutex<Vec<FormDraft>>,
}

impl ScriptedSubmitter {
    pub fn replying(status: u16) -> Self {
        Self {
            status: Some(status),
            posted: Mutex::new(vec![]),
        }
    }

    pub fn offline() -> Self {
        Self {
            status: None,
            posted: Mutex::new(vec![]),
        }
    }

    pub fn posted(&self) -> Vec<FormDraft> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Submitter for ScriptedSubmitter {
    async fn post(&self, draft: &FormDraft) -> anyhow::Result<u16> {
        self.posted.lock().unwrap().push(draft.clone());

        match self.status {
            Some(status) => Ok(status),
            None => anyhow::bail!("network unreachable"),
        }
    }
}
