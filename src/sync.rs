use log::info;

use crate::api::cloudflare::API_BASE_URL;
use crate::api::ListsClient;
use crate::config::Config;
use crate::error::Result;
use crate::ip::{self, PUBLIC_IP_URL};

/// Terminal state of one run that reached the list service.
#[derive(Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The list already carries the current address; nothing was written.
    AlreadyCurrent,
    /// The stale entry was removed and a fresh one added.
    Replaced,
    /// No entry carried the configured comment yet; a fresh one was added.
    Added,
}

pub struct SyncAgent {
    comment: String,
    ip_url: String,
    http: reqwest::Client,
    api: ListsClient,
}

impl SyncAgent {
    pub fn new(config: Config) -> Self {
        Self::with_endpoints(config, PUBLIC_IP_URL, API_BASE_URL)
    }

    pub fn with_endpoints(
        config: Config,
        ip_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::new();
        let api = ListsClient::new(http.clone(), &config, api_base);
        Self {
            comment: config.comment,
            ip_url: ip_url.into(),
            http,
            api,
        }
    }

    pub async fn run(&self) -> Result<SyncOutcome> {
        let ip = ip::fetch_public_ip(&self.http, &self.ip_url).await?;
        info!("current public IP: {}", ip);
        self.sync(&ip).await
    }

    pub async fn sync(&self, ip: &str) -> Result<SyncOutcome> {
        let items = self.api.fetch_items().await?;

        if items.iter().any(|item| item.content == ip) {
            info!("list already contains {}, nothing to do", ip);
            return Ok(SyncOutcome::AlreadyCurrent);
        }

        // First match wins; duplicate comments beyond it are left alone.
        let stale = items
            .iter()
            .find(|item| item.comment.as_deref() == Some(self.comment.as_str()));
        if let Some(stale) = stale {
            self.api.delete_item(&stale.id).await?;
            info!("deleted old entry {} with IP {}", stale.id, stale.content);
        }

        self.api.create_item(ip, &self.comment).await?;
        info!("added new entry with IP {}", ip);

        Ok(if stale.is_some() {
            SyncOutcome::Replaced
        } else {
            SyncOutcome::Added
        })
    }
}
