//! Student sink abstraction and REST client
//!
//! The backend creates the student, or returns the existing one when the
//! name and class already match; identity is always assigned server-side.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::app::models::{ClassSyncReport, CreatedStudent, ImportedStudent};
use crate::config::BackendConfig;
use crate::constants::{CLASS_SYNC_ENDPOINT, STUDENTS_ENDPOINT};
use crate::{Error, Result};

/// Destination for imported students
#[async_trait]
pub trait StudentSink: Send + Sync {
    /// Create (or fetch the existing) student for one imported record
    async fn create_student(&self, student: &ImportedStudent) -> Result<CreatedStudent>;

    /// Create classes from the class labels stored on students and link them
    async fn sync_classes(&self) -> Result<ClassSyncReport>;
}

/// JSON body of the student-creation request
#[derive(Debug, Serialize)]
struct CreateStudentRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    class_name: &'a str,
}

/// REST implementation of [`StudentSink`]
#[derive(Debug, Clone)]
pub struct HttpStudentSink {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpStudentSink {
    /// Build a client from backend configuration; requires an API URL
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let base_url = config
            .base_url()
            .ok_or_else(|| Error::configuration("No API URL configured for submission"))?
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::backend("Failed to build HTTP client", Some(e)))?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a non-success status into an error carrying the response body
    async fn check_status(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::backend(
            format!("{} failed with HTTP {}: {}", what, status, body.trim()),
            None,
        ))
    }
}

#[async_trait]
impl StudentSink for HttpStudentSink {
    async fn create_student(&self, student: &ImportedStudent) -> Result<CreatedStudent> {
        let url = self.endpoint(STUDENTS_ENDPOINT);
        debug!("POST {} for {}", url, student.name);

        let body = CreateStudentRequest {
            name: &student.name,
            class_name: &student.class_name,
        };
        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| Error::backend(format!("Request to {} failed", url), Some(e)))?;

        let response = Self::check_status(response, "Student creation").await?;
        response
            .json::<CreatedStudent>()
            .await
            .map_err(|e| Error::backend("Invalid student creation response", Some(e)))
    }

    async fn sync_classes(&self) -> Result<ClassSyncReport> {
        let url = self.endpoint(CLASS_SYNC_ENDPOINT);
        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .send()
            .await
            .map_err(|e| Error::backend(format!("Request to {} failed", url), Some(e)))?;

        let response = Self::check_status(response, "Class synchronization").await?;
        response
            .json::<ClassSyncReport>()
            .await
            .map_err(|e| Error::backend("Invalid class synchronization response", Some(e)))
    }
}
