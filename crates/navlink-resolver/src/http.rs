//! HTTP implementation of [`MetadataClient`]
//!
//! Talks to the pipeline and template services through the platform gateway:
//! - `GET  {base}/pipeline/api/pipelines/summary/{identifier}`
//! - `POST {base}/template/api/templates/list-metadata`

use crate::client::{
    MetadataClient, PipelineSummaryRequest, PipelineSummaryResponse, TemplateListRequest,
    TemplateListResponse,
};
use crate::config::ApiConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use navlink_model::Scope;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Longest response body excerpt kept in [`LookupError::Http`]
const ERROR_BODY_LIMIT: usize = 256;

/// Lookup client over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpMetadataClient {
    /// Build a client from API settings
    ///
    /// # Errors
    /// - [`LookupError::InvalidUrl`] if the base URL cannot take path segments
    /// - [`LookupError::Transport`] if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, LookupError> {
        let raw = config.base_url.trim_end_matches('/');
        let base_url =
            Url::parse(raw).map_err(|err| LookupError::InvalidUrl(format!("{raw}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(raw.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Gateway base URL
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn scope_query(scope: &Scope) -> Vec<(&'static str, String)> {
        let mut query = vec![("accountIdentifier", scope.account_id().to_string())];
        if let Some(org) = scope.org_id() {
            query.push(("orgIdentifier", org.to_string()));
        }
        if let Some(project) = scope.project_id() {
            query.push(("projectIdentifier", project.to_string()));
        }
        query
    }

    /// Send and decode an envelope
    ///
    /// Any decodable body is returned, whatever the HTTP status; the envelope
    /// status tells the resolver whether the lookup succeeded.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, LookupError> {
        let request = match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<T>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(err) if status.is_success() => Err(LookupError::Decode(err.to_string())),
            Err(_) => Err(LookupError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body)
                    .chars()
                    .take(ERROR_BODY_LIMIT)
                    .collect(),
            }),
        }
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    async fn pipeline_summary(
        &self,
        request: &PipelineSummaryRequest,
    ) -> Result<PipelineSummaryResponse, LookupError> {
        // The url crate drops dot segments instead of encoding them.
        if matches!(request.identifier.as_str(), "." | "..") {
            return Err(LookupError::InvalidIdentifier(request.identifier.clone()));
        }
        let url = self.endpoint([
            "pipeline",
            "api",
            "pipelines",
            "summary",
            request.identifier.as_str(),
        ])?;
        let mut query = Self::scope_query(&request.scope);
        query.push(("getMetadataOnly", request.metadata_only.to_string()));

        tracing::trace!(%url, "pipeline summary lookup");
        self.send(self.client.get(url).query(&query)).await
    }

    async fn template_metadata(
        &self,
        request: &TemplateListRequest,
    ) -> Result<TemplateListResponse, LookupError> {
        let url = self.endpoint(["template", "api", "templates", "list-metadata"])?;
        let mut query = Self::scope_query(&request.scope);
        query.push(("templateListType", request.list_type.as_str().to_string()));

        tracing::trace!(%url, "template metadata lookup");
        self.send(self.client.post(url).query(&query).json(&request.filter))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_query_skips_missing_levels() {
        let org = Scope::org("a", "o").unwrap();
        assert_eq!(
            HttpMetadataClient::scope_query(&org),
            vec![
                ("accountIdentifier", "a".to_string()),
                ("orgIdentifier", "o".to_string())
            ]
        );
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = ApiConfig::default().with_base_url("http://127.0.0.1:1/gateway/");
        let client = HttpMetadataClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1/gateway");
    }

    #[test]
    fn identifier_stays_one_segment() {
        let config = ApiConfig::default().with_base_url("http://127.0.0.1:1/gateway");
        let client = HttpMetadataClient::new(&config).unwrap();
        let url = client
            .endpoint(["pipeline", "api", "pipelines", "summary", "x/../../admin?q=1#f"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:1/gateway/pipeline/api/pipelines/summary/x%2F..%2F..%2Fadmin%3Fq=1%23f"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn unusable_base_url_rejected() {
        for base in ["not a url", "mailto:ops@example.com"] {
            let config = ApiConfig::default().with_base_url(base);
            assert!(matches!(
                HttpMetadataClient::new(&config),
                Err(LookupError::InvalidUrl(_))
            ));
        }
    }
}
