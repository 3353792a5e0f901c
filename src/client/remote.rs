use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::CollectionClient;
use crate::auth::token_store::TokenStore;
use crate::errors::ClientError;
use crate::models::Resource;

/// How updates reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMethod {
    #[default]
    Put,
    /// On a 404 from PUT, probe with GET: a 404 there means the record is
    /// gone, anything else means the route only accepts PATCH.
    PutWithPatchFallback,
}

/// Authenticated REST client for one collection.
pub struct RemoteCollection<R> {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    update_method: UpdateMethod,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RemoteCollection<R> {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid API base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("API base URL {base_url} cannot be a base")));
        }
        Ok(Self {
            http,
            base_url,
            tokens,
            update_method: UpdateMethod::default(),
            _resource: PhantomData,
        })
    }

    pub fn with_update_method(mut self, update_method: UpdateMethod) -> Self {
        self.update_method = update_method;
        self
    }

    pub fn update_method(&self) -> UpdateMethod {
        self.update_method
    }

    fn url(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config("API base URL cannot be a base".to_string()))?;
            segments.pop_if_empty().push(R::COLLECTION);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Start a request with the bearer token attached. Fails before touching
    /// the network when no token is stored.
    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ClientError> {
        let token = self
            .tokens
            .get()
            .ok_or_else(|| ClientError::Auth("no token stored".to_string()))?;
        log::debug!("{} {}", method, url);
        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json"))
    }

    /// Send and normalize the outcome. A 401 clears the stored session here,
    /// once, for every collection.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from(e);
            log::warn!("{} request failed: {}", R::COLLECTION, err);
            err
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{}: token rejected by backend, clearing session", R::COLLECTION);
            if let Err(e) = self.tokens.clear() {
                log::warn!("Failed to clear token store: {}", e);
            }
            return Err(ClientError::Auth(if body.is_empty() {
                "token rejected".to_string()
            } else {
                body
            }));
        }

        log::warn!("{}: backend returned {}", R::COLLECTION, status);
        Err(ClientError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_body(response: Response) -> Result<String, ClientError> {
        response.text().await.map_err(ClientError::from)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_update(&self, method: Method, id: &str, patch: &R::Patch) -> Result<R, ClientError> {
        let request = self.request(method, self.url(Some(id))?)?.json(patch);
        let response = self.send(request).await?;
        let body = Self::read_body(response).await?;
        if body.trim().is_empty() {
            // 204-style answers carry no record; read it back.
            return self.get_by_id(id).await;
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Decode a collection body. An empty body or `null` is an empty collection,
/// and `{"data": [..]}` / `{"items": [..]}` envelopes are unwrapped.
fn decode_list<R: Resource>(body: &str) -> Result<Vec<R>, ClientError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    let items = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Object(mut envelope) => envelope
            .remove("data")
            .or_else(|| envelope.remove("items"))
            .ok_or_else(|| ClientError::Decode("expected a JSON array".to_string()))?,
        other => other,
    };
    match items {
        serde_json::Value::Array(items) => Ok(decode_records(items)),
        _ => Err(ClientError::Decode("expected a JSON array".to_string())),
    }
}

/// Decode each element on its own; one malformed record is logged and
/// skipped instead of hiding the rest of the collection.
pub fn decode_records<R: Resource>(items: Vec<serde_json::Value>) -> Vec<R> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<R>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("{}: skipping undecodable record: {}", R::COLLECTION, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl<R: Resource> CollectionClient<R> for RemoteCollection<R> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        let response = self.send(self.request(Method::GET, self.url(None)?)?).await?;
        let body = Self::read_body(response).await?;
        decode_list(&body)
    }

    async fn get_by_id(&self, id: &str) -> Result<R, ClientError> {
        let response = self.send(self.request(Method::GET, self.url(Some(id))?)?).await?;
        Self::read_json(response).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        let payload = R::new_payload(draft);
        let request = self.request(Method::POST, self.url(None)?)?.json(&payload);
        let response = self.send(request).await?;
        let created: R = Self::read_json(response).await?;
        log::info!("Created {} {}", R::COLLECTION, created.id());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &R::Patch) -> Result<R, ClientError> {
        match self.send_update(Method::PUT, id, patch).await {
            Err(e) if e.is_not_found() && self.update_method == UpdateMethod::PutWithPatchFallback => {
                // A missing record fails the probe with its own 404.
                self.get_by_id(id).await?;
                log::info!("{}: PUT {} not routed, retrying as PATCH", R::COLLECTION, id);
                self.send_update(Method::PATCH, id, patch).await
            }
            other => other,
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, self.url(Some(id))?)?).await?;
        log::info!("Deleted {} {}", R::COLLECTION, id);
        Ok(())
    }
}
