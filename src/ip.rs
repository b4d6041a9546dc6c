use std::net::IpAddr;

use crate::error::{Error, Result};

// ifconfig.me answers a bare GET with the caller's address as plain text
pub const PUBLIC_IP_URL: &str = "https://ifconfig.me";

pub async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            context: "public IP lookup",
            status,
        });
    }

    let body = response.text().await?;
    let ip = body.trim();
    // Reject error pages and empty bodies before they reach the list service
    if ip.parse::<IpAddr>().is_err() {
        return Err(Error::InvalidIp(ip.to_string()));
    }
    Ok(ip.to_string())
}
