use std::time::Duration;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{BattleHistorySummary, BattleTranscript};
use crate::provider::{BattleResultProvider, CredentialSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct BattleRequest<'a> {
    pokemon1_name: &'a str,
    pokemon2_name: &'a str,
}

/// Battle service client. Each instance carries its own base URL and
/// credential strategy; nothing is shared process-wide.
pub struct ApiClient {
    base_url: String,
    credentials: Box<dyn CredentialSource>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Box<dyn CredentialSource>) -> ProviderResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http(base_url, credentials, http))
    }

    pub(crate) fn with_http(base_url: impl Into<String>, credentials: Box<dyn CredentialSource>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            http,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        info!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.credentials.resolve() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ProviderResult<T> {
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>()?)
    }
}

impl BattleResultProvider for ApiClient {
    fn submit_battle(&self, combatant1: &str, combatant2: &str) -> ProviderResult<BattleTranscript> {
        let body = BattleRequest {
            pokemon1_name: combatant1,
            pokemon2_name: combatant2,
        };
        self.send(self.request(Method::POST, "battle/").json(&body))
    }

    fn fetch_battle_history_entry(&self, id: u64) -> ProviderResult<BattleTranscript> {
        self.send(self.request(Method::GET, &format!("battle/{}", id)))
    }

    fn list_battle_history(&self) -> ProviderResult<Vec<BattleHistorySummary>> {
        self.send(self.request(Method::GET, "battle/"))
    }
}
