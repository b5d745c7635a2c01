use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::model::MeterSource;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

/// The only login answer that means the session is authenticated.
pub const LOGIN_SUCCESS_BODY: &str = r#"{"ok":true,"success":true}"#;

const LOGIN_PATH: &str = "/ajax/login";
const METERS_PATH: &str = "/meters";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cookie-carrying session against the MidCity prepaid portal.
pub struct Client {
    http_client: HttpClient,
    config: PortalConfig,
}

impl Client {
    pub fn new(config: PortalConfig) -> Result<Self, PortalError> {
        let http_client = HttpClient::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    pub async fn login(&self) -> Result<(), PortalError> {
        tracing::debug!("Logging in to {} as {}", self.config.url, self.config.username);
        let response = self
            .http_client
            .post(self.url(LOGIN_PATH))
            .form(&[
                ("email", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::OK && body == LOGIN_SUCCESS_BODY {
            tracing::info!("Logged in to MidCity portal");
            Ok(())
        } else {
            tracing::debug!("Unexpected login response ({}): {}", status, body);
            Err(PortalError::AuthFailed {
                status: status.as_u16(),
            })
        }
    }

    pub async fn fetch_meters_page(&self) -> Result<String, PortalError> {
        let response = self.http_client.get(self.url(METERS_PATH)).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            tracing::debug!("Fetched meters page ({} bytes)", body.len());
            Ok(body)
        } else {
            Err(PortalError::server_error(status, body))
        }
    }
}

#[async_trait]
impl MeterSource for Client {
    async fn login(&self) -> Result<(), PortalError> {
        Client::login(self).await
    }

    async fn fetch_meters_page(&self) -> Result<String, PortalError> {
        Client::fetch_meters_page(self).await
    }
}
