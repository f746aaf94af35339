//! REST client for the degree-course catalogue endpoints.
//!
//! Two shapes exist server-side: the degree-course list is a flat array
//! of `{name}` objects, while the per-degree course list nests each name
//! under `degreeCourseName[i].course.name` and requires a bearer token.

use serde::Deserialize;

use ums_core::topics;
use ums_core::types::LocalDate;

/// HTTP client for the catalogue REST surface.
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
    /// Token for the authenticated course endpoint, supplied by the
    /// deployment configuration.
    bearer_token: Option<String>,
}

/// One degree course as returned by the flat listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DegreeCourse {
    pub name: String,
}

/// One examination appeal from the professor's listing.
///
/// The server serialises the full appeal DTO; the select only needs
/// the course name and the date.
#[derive(Debug, Clone, Deserialize)]
pub struct ExaminationAppeal {
    pub course: AppealCourse,
    pub date: LocalDate,
}

/// Course reference nested inside an examination appeal.
#[derive(Debug, Clone, Deserialize)]
pub struct AppealCourse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CourseListResponse {
    /// The server keys the course list by this (oddly named) property;
    /// its absence marks a malformed response.
    #[serde(rename = "degreeCourseName")]
    degree_course_name: Option<Vec<CourseEntry>>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    course: CourseRef,
}

#[derive(Debug, Deserialize)]
struct CourseRef {
    name: String,
}

/// Errors from the catalogue REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Catalogue API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed as JSON but lacked the expected shape.
    #[error("Malformed catalogue response: {0}")]
    MalformedResponse(String),
}

impl CatalogApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8081`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach the bearer token required by the course endpoint.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Fetch the flat list of degree courses.
    pub async fn get_degree_courses(&self) -> Result<Vec<DegreeCourse>, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, topics::API_DEGREE_COURSES))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the examination appeals published by the current professor.
    pub async fn get_examination_appeals(
        &self,
    ) -> Result<Vec<ExaminationAppeal>, CatalogApiError> {
        let response = self
            .client
            .get(format!(
                "{}{}",
                self.base_url,
                topics::API_EXAMINATION_APPEALS
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the course names belonging to one degree course.
    ///
    /// Sends the configured bearer token when present. A response
    /// without the `degreeCourseName` property is rejected as malformed.
    pub async fn get_courses(
        &self,
        degree_course_name: &str,
    ) -> Result<Vec<String>, CatalogApiError> {
        let mut request = self
            .client
            .get(format!(
                "{}{}",
                self.base_url,
                topics::API_DEGREE_COURSE_COURSES
            ))
            .query(&[("name", degree_course_name)]);

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let parsed: CourseListResponse = Self::parse_response(response).await?;

        let entries = parsed.degree_course_name.ok_or_else(|| {
            CatalogApiError::MalformedResponse(
                "response has no degreeCourseName property".to_string(),
            )
        })?;

        Ok(entries.into_iter().map(|e| e.course.name).collect())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`CatalogApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
