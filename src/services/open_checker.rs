use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::configuration::VerificationSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenStatus {
    Open,
    Closed,
    /// The page could not be fetched or read.
    Unreachable,
}

impl OpenStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OpenStatus::Open)
    }
}

#[async_trait]
pub trait PostingChecker: Send + Sync {
    async fn check(&self, url: &str) -> OpenStatus;
}

pub struct HttpOpenChecker {
    client: Client,
    closed_phrases: Vec<String>,
}

impl HttpOpenChecker {
    pub fn new(settings: &VerificationSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build verification http client")?;

        Ok(HttpOpenChecker {
            client,
            closed_phrases: settings
                .closed_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        })
    }
}

#[async_trait]
impl PostingChecker for HttpOpenChecker {
    async fn check(&self, url: &str) -> OpenStatus {
        let res = match self.client.get(url).send().await {
            Ok(res) => res,
            Err(e) => {
                log::warn!("Could not fetch posting {}: {:?}", url, e);
                return OpenStatus::Unreachable;
            }
        };

        let status = res.status();
        match res.text().await {
            Ok(body) => classify_page(status, &body, &self.closed_phrases),
            Err(e) => {
                log::warn!("Could not read posting body {}: {:?}", url, e);
                OpenStatus::Unreachable
            }
        }
    }
}

/// `closed_phrases` must already be lower-case.
pub fn classify_page(status: StatusCode, body: &str, closed_phrases: &[String]) -> OpenStatus {
    if status.as_u16() >= 400 {
        return OpenStatus::Closed;
    }

    let body = body.to_lowercase();
    match closed_phrases.iter().any(|phrase| body.contains(phrase.as_str())) {
        true => OpenStatus::Closed,
        false => OpenStatus::Open,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{classify_page, HttpOpenChecker, OpenStatus, PostingChecker};
    use crate::configuration::VerificationSettings;

    fn phrases() -> Vec<String> {
        VerificationSettings::default().closed_phrases
    }

    #[test]
    fn classify_page_boundaries() {
        assert_eq!(
            classify_page(StatusCode::NOT_FOUND, "apply now", &phrases()),
            OpenStatus::Closed
        );
        assert_eq!(
            classify_page(StatusCode::OK, "<p>This Position Has Been Filled.</p>", &phrases()),
            OpenStatus::Closed
        );
        assert_eq!(
            classify_page(StatusCode::OK, "Die Stelle ist NICHT MEHR VERFÜGBAR", &phrases()),
            OpenStatus::Closed
        );
        assert_eq!(
            classify_page(StatusCode::OK, "<h1>Postdoc</h1><a>Apply now</a>", &phrases()),
            OpenStatus::Open
        );
    }

    #[test]
    fn any_status_from_400_up_is_closed() {
        for code in [400, 410, 503, 600, 999] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(
                classify_page(status, "apply now", &[]),
                OpenStatus::Closed,
                "status {}",
                code
            );
        }
        assert_eq!(
            classify_page(StatusCode::from_u16(399).unwrap(), "apply now", &[]),
            OpenStatus::Open
        );
    }

    fn checker_with_timeout(secs: u64) -> HttpOpenChecker {
        HttpOpenChecker::new(&VerificationSettings {
            timeout_secs: secs,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn not_found_page_is_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let checker = checker_with_timeout(20);
        let status = checker.check(&format!("{}/job/404", server.uri())).await;

        assert_eq!(status, OpenStatus::Closed);
    }

    #[tokio::test]
    async fn filled_position_page_is_closed_and_clean_page_is_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/filled"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Sorry, this POSITION HAS BEEN FILLED"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/job/open"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Apply by Friday"))
            .mount(&server)
            .await;

        let checker = checker_with_timeout(20);

        assert_eq!(
            checker.check(&format!("{}/job/filled", server.uri())).await,
            OpenStatus::Closed
        );
        assert_eq!(
            checker.check(&format!("{}/job/open", server.uri())).await,
            OpenStatus::Open
        );
    }

    #[tokio::test]
    async fn timeout_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Apply now")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let checker = checker_with_timeout(1);
        let status = checker.check(&format!("{}/job/slow", server.uri())).await;

        assert_eq!(status, OpenStatus::Unreachable);
        assert!(!status.is_open());
    }

    #[tokio::test]
    async fn connection_failure_is_unreachable() {
        let checker = checker_with_timeout(1);

        let status = checker.check("http://127.0.0.1:1/job/1").await;

        assert_eq!(status, OpenStatus::Unreachable);
    }
}
