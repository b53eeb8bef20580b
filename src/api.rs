//! Client for the CRM REST API.
//!
//! Every authenticated call replays the session token as a bearer credential.
//! The token itself is never inspected here.

use megagen_quote::Quote;
use megagen_session::{Authenticator, DashboardKind, LoginInput, LoginResponse, Session};
use reqwest::Response;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{
    AppError, Result,
    sync::{Meeting, Visit},
};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn error_message(response: Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("megagen-crm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(&session.token)
            .send()
            .await?;

        let response = check(response, path).await?;

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize>(&self, session: &Session, path: &str, body: &B) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(&session.token)
            .json(body)
            .send()
            .await?;

        check(response, path).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, session))]
    pub async fn clients(&self, session: &Session) -> Result<Vec<Value>> {
        self.get_json(session, "/clients").await
    }

    #[tracing::instrument(skip(self, session))]
    pub async fn quotes(&self, session: &Session) -> Result<Vec<Quote>> {
        self.get_json(session, "/quotes").await
    }

    #[tracing::instrument(skip(self, session))]
    pub async fn visits(&self, session: &Session) -> Result<Vec<Value>> {
        self.get_json(session, "/terrain/visits").await
    }

    #[tracing::instrument(skip(self, session))]
    pub async fn dashboard(&self, session: &Session, kind: DashboardKind) -> Result<Value> {
        self.get_json(session, &kind.path()).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_meeting(&self, session: &Session, meeting: &Meeting) -> Result<()> {
        self.post_json(session, "/meetings", meeting).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn record_visit(&self, session: &Session, visit: &Visit) -> Result<()> {
        self.post_json(session, "/terrain/visits", visit).await
    }
}

/// Turns a non-2xx answer on `path` into a [`AppError::DataFetch`].
async fn check(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response)
        .await
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_owned());

    tracing::warn!(path, status = status.as_u16(), %message, "API request failed");

    Err(AppError::DataFetch {
        resource: path.trim_start_matches('/').to_owned(),
        status: status.as_u16(),
        message,
    })
}

#[async_trait::async_trait]
impl Authenticator for ApiClient {
    async fn authenticate(&self, input: &LoginInput) -> megagen_session::Result<LoginResponse> {
        let url = self
            .endpoint("/auth/login")
            .map_err(|e| megagen_session::Error::Unknown(e.into()))?;

        let response = match self.http.post(url).json(input).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Authentication request failed: {:?}", e);
                return Err(megagen_session::Error::authentication(Some(
                    "Authentication service unavailable".to_owned(),
                )));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "login refused");
            return Err(megagen_session::Error::authentication(
                error_message(response).await,
            ));
        }

        response.json::<LoginResponse>().await.map_err(|e| {
            tracing::error!("Unexpected login response: {:?}", e);
            megagen_session::Error::authentication(None)
        })
    }
}
