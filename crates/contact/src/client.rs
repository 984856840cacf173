use async_trait::async_trait;

use crate::{FormDraft, Submitter};

/// Posts drafts as JSON to a running contact endpoint.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn post(&self, draft: &FormDraft) -> anyhow::Result<u16> {
        tracing::debug!(endpoint = %self.endpoint, "posting contact draft");

        let response = self.client.post(&self.endpoint).json(draft).send().await?;

        Ok(response.status().as_u16())
    }
}
