//! REST implementation of Backend
//!
//! Endpoints follow the resource name of the record type:
//!
//! | Operation | Request                    |
//! |-----------|----------------------------|
//! | list      | `GET    /{resource}`       |
//! | get       | `GET    /{resource}/{id}`  |
//! | create    | `POST   /{resource}`       |
//! | update    | `PUT    /{resource}/{id}`  |
//! | delete    | `DELETE /{resource}/{id}`  |
//!
//! The wire format belongs to the backend; records are (de)serialized with
//! serde as they are.

use crate::config::ApiConfig;
use crate::core::error::{BackendError, RequestError};
use crate::core::{Backend, ConsoleError, ConsoleResult, Record, Session};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;
use uuid::Uuid;

/// REST backend for one record type
pub struct HttpBackend<T: Record> {
    client: Client,
    base_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for HttpBackend<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> HttpBackend<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Create a backend sharing an existing client
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    /// Create a backend from the API section of the console config
    pub fn from_config(api: &ApiConfig) -> ConsoleResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self::new(client, api.base_url.clone()))
    }

    fn collection_path() -> String {
        format!("/{}", T::resource_name())
    }

    fn item_path(id: &Uuid) -> String {
        format!("/{}/{}", T::resource_name(), id)
    }

    fn request(&self, session: &Session, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if session.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&session.token)
        }
    }

    /// Send a request and turn non-success statuses into typed errors
    async fn send(&self, builder: RequestBuilder, method: &Method, path: &str) -> ConsoleResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(method = %method, path, status = status.as_u16(), "backend request");

        if status.is_success() {
            return Ok(response);
        }
        Err(status_error(method, path, status).into())
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> ConsoleResult<R> {
        response.json::<R>().await.map_err(|e| {
            BackendError::Decode {
                resource: T::resource_name().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Typed error for a non-success status
fn status_error(method: &Method, path: &str, status: StatusCode) -> RequestError {
    match status {
        StatusCode::UNAUTHORIZED => RequestError::Unauthorized {
            message: format!("{} {} rejected the session", method, path),
        },
        StatusCode::FORBIDDEN => RequestError::Forbidden {
            message: format!("{} {}", method, path),
        },
        _ => RequestError::Status {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
        },
    }
}

/// A 404 on a single-record fetch means the record is gone
fn missing_as_none<R>(result: ConsoleResult<R>) -> ConsoleResult<Option<R>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConsoleError::Request(RequestError::Status { status: 404, .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl<T> Backend<T> for HttpBackend<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn list(&self, session: &Session) -> ConsoleResult<Vec<T>> {
        let path = Self::collection_path();
        let builder = self.request(session, Method::GET, &path);
        let response = self.send(builder, &Method::GET, &path).await?;
        Self::decode(response).await
    }

    async fn get(&self, session: &Session, id: &Uuid) -> ConsoleResult<Option<T>> {
        let path = Self::item_path(id);
        let builder = self.request(session, Method::GET, &path);
        match missing_as_none(self.send(builder, &Method::GET, &path).await)? {
            Some(response) => Self::decode(response).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, session: &Session, record: T) -> ConsoleResult<T> {
        let path = Self::collection_path();
        let builder = self.request(session, Method::POST, &path).json(&record);
        let response = self.send(builder, &Method::POST, &path).await?;
        Self::decode(response).await
    }

    async fn update(&self, session: &Session, id: &Uuid, record: T) -> ConsoleResult<T> {
        let path = Self::item_path(id);
        let builder = self.request(session, Method::PUT, &path).json(&record);
        let response = self.send(builder, &Method::PUT, &path).await?;
        Self::decode(response).await
    }

    async fn delete(&self, session: &Session, id: &Uuid) -> ConsoleResult<()> {
        let path = Self::item_path(id);
        let builder = self.request(session, Method::DELETE, &path);
        self.send(builder, &Method::DELETE, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Product, PurchaseOrder};

    #[test]
    fn test_paths_follow_resource_name() {
        let id = Uuid::nil();
        assert_eq!(HttpBackend::<Product>::collection_path(), "/products");
        assert_eq!(
            HttpBackend::<PurchaseOrder>::item_path(&id),
            format!("/purchase-orders/{}", id)
        );
    }

    #[test]
    fn test_auth_statuses_map_to_their_own_errors() {
        let err = status_error(&Method::GET, "/products", StatusCode::UNAUTHORIZED);
        assert!(matches!(err, RequestError::Unauthorized { .. }));
        assert_eq!(
            ConsoleError::from(err).user_message(),
            "Your session has expired. Please sign in again."
        );

        let err = status_error(&Method::DELETE, "/users/1", StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "FORBIDDEN");
        assert!(err.to_string().contains("DELETE /users/1"));
    }

    #[test]
    fn test_other_statuses_keep_code_and_path() {
        match status_error(&Method::PUT, "/vendors/7", StatusCode::UNPROCESSABLE_ENTITY) {
            RequestError::Status {
                method,
                path,
                status,
            } => {
                assert_eq!(method, "PUT");
                assert_eq!(path, "/vendors/7");
                assert_eq!(status, 422);
            }
            other => panic!("expected status error, got {:?}", other),
        }
        let not_found = status_error(&Method::GET, "/vendors/7", StatusCode::NOT_FOUND);
        assert_eq!(not_found.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_only_not_found_reads_as_missing() {
        let gone: ConsoleResult<u8> =
            Err(status_error(&Method::GET, "/products/1", StatusCode::NOT_FOUND).into());
        assert!(matches!(missing_as_none(gone), Ok(None)));

        let broken: ConsoleResult<u8> =
            Err(status_error(&Method::GET, "/products/1", StatusCode::INTERNAL_SERVER_ERROR).into());
        assert_eq!(missing_as_none(broken).unwrap_err().error_code(), "REQUEST_FAILED");

        let denied: ConsoleResult<u8> =
            Err(status_error(&Method::GET, "/products/1", StatusCode::FORBIDDEN).into());
        assert_eq!(missing_as_none(denied).unwrap_err().error_code(), "FORBIDDEN");

        assert!(matches!(missing_as_none(Ok(3_u8)), Ok(Some(3))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::<Product>::new(Client::new(), "http://localhost:8080/api/");
        assert_eq!(backend.base_url, "http://localhost:8080/api");
    }
}
