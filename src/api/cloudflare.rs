use log::info;
use reqwest::header::{HeaderMap, CONTENT_TYPE};

use super::models::{ApiResponse, ListItem, NewItem};
use crate::config::Config;
use crate::error::{Error, Result};

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

pub struct ListsClient {
    client: reqwest::Client,
    base_url: String,
    api_email: String,
    api_key: String,
    account_id: String,
    list_id: String,
    debug: bool,
}

impl ListsClient {
    pub fn new(client: reqwest::Client, config: &Config, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_email: config.api_email.clone(),
            api_key: config.api_key.clone(),
            account_id: config.account_id.clone(),
            list_id: config.list_id.clone(),
            debug: config.debug,
        }
    }

    fn items_url(&self) -> String {
        format!(
            "{}/accounts/{}/rules/lists/{}/items",
            self.base_url, self.account_id, self.list_id
        )
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("X-Auth-Email", self.api_email.parse().unwrap());
        headers.insert("X-Auth-Key", self.api_key.parse().unwrap());
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        headers
    }

    pub async fn fetch_items(&self) -> Result<Vec<ListItem>> {
        let response = self
            .client
            .get(self.items_url())
            .headers(self.build_headers())
            .send()
            .await?;
        let body = self.check("list items", response).await?;

        // result comes back as null on an empty list
        let parsed: ApiResponse<Option<Vec<ListItem>>> = serde_json::from_str(&body)
            .map_err(|e| Error::Decode {
                context: "list items",
                source: e,
            })?;
        if !parsed.success {
            return Err(Error::Api {
                context: "list items",
                errors: parsed.errors,
            });
        }
        Ok(parsed.result.unwrap_or_default())
    }

    pub async fn delete_item(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/{}", self.items_url(), id))
            .headers(self.build_headers())
            .send()
            .await?;
        self.check("item delete", response).await?;
        Ok(())
    }

    pub async fn create_item(&self, content: &str, comment: &str) -> Result<()> {
        let response = self
            .client
            .post(self.items_url())
            .headers(self.build_headers())
            .json(&[NewItem { content, comment }])
            .send()
            .await?;
        self.check("item create", response).await?;
        Ok(())
    }

    // Reads the body before the status check so debug dumps cover failing
    // responses as well.
    async fn check(&self, context: &'static str, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if self.debug {
            info!("{} response {}: {}", context, status, body);
        }
        if !status.is_success() {
            return Err(Error::Status { context, status });
        }
        Ok(body)
    }
}
