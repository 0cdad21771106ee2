use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::errors::ServiceUnavailable;

pub const DEFAULT_API_ENDPOINT: &str = "https://machinelearningforkids.co.uk/api/scratch";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Advisory label and confidence (0-100) from the remote model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

pub type ServiceResult = Result<Classification, ServiceUnavailable>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> ServiceResult;
}

#[derive(Debug, Deserialize)]
struct Ml4kPrediction {
    class_name: String,
    confidence: f64,
}

/// Client for the Machine Learning for Kids text classification endpoint
#[derive(Debug, Clone)]
pub struct Ml4kClassifier {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl Ml4kClassifier {
    /// `{api_endpoint}/{api_key}/classify`, with the key escaped as one path segment.
    pub fn new(api_endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, ServiceUnavailable> {
        let invalid = |details: String| ServiceUnavailable::InvalidEndpoint {
            endpoint: api_endpoint.to_string(),
            details,
        };
        let mut url = Url::parse(api_endpoint).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?
            .pop_if_empty()
            .push(api_key)
            .push("classify");

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            timeout,
        })
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, user agent)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn request(&self, text: &str) -> ServiceResult {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("data", text)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceUnavailable::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_predictions(&body)
    }
}

#[async_trait]
impl Classifier for Ml4kClassifier {
    async fn classify(&self, text: &str) -> ServiceResult {
        debug!("Classifying '{}'", text);
        let result = self.request(text).await;
        match &result {
            Ok(c) => debug!("Classified as '{}' ({:.1}%)", c.label, c.confidence),
            Err(e) => error!("ML4K API call failed: {}", e),
        }
        result
    }
}

/// Take the first (highest ranked) prediction from the response body.
fn parse_predictions(body: &str) -> ServiceResult {
    let predictions: Vec<Ml4kPrediction> = serde_json::from_str(body)
        .map_err(|e| ServiceUnavailable::MalformedPayload(e.to_string()))?;

    let top = predictions
        .into_iter()
        .next()
        .ok_or_else(|| ServiceUnavailable::MalformedPayload("empty prediction list".to_string()))?;

    if !(0.0..=100.0).contains(&top.confidence) {
        return Err(ServiceUnavailable::MalformedPayload(format!(
            "confidence {} outside 0-100",
            top.confidence
        )));
    }

    Ok(Classification {
        label: top.class_name,
        confidence: top.confidence,
    })
}
