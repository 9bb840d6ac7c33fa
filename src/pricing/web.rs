use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::extract::{extract_fund_price, extract_stock_price};
use super::slug::{fund_slug, stock_search_code};
use super::{normalize_price, PriceFetchError, PriceSource};
use crate::models::FundKind;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Scrapes fund pages (one page per fund, addressed by slug) and a single
/// share listing page.
#[derive(Debug, Clone)]
pub struct WebPriceSource {
    http: Client,
    fund_base_url: String,
    stock_page_url: String,
}

impl WebPriceSource {
    pub fn new(
        fund_base_url: &str,
        stock_page_url: &str,
        timeout: Duration,
    ) -> Result<Self, PriceFetchError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            fund_base_url: fund_base_url.trim_end_matches('/').to_string(),
            stock_page_url: stock_page_url.to_string(),
        })
    }

    async fn get_page(&self, url: &str) -> Result<String, PriceFetchError> {
        tracing::debug!(url, "Fetching price page");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if body.trim().is_empty() {
            return Err(PriceFetchError::Unexpected(format!("empty body from {url}")));
        }

        Ok(body)
    }

    async fn fund_price(&self, name: &str) -> Result<Option<String>, PriceFetchError> {
        let slug = fund_slug(name);
        if slug.is_empty() {
            return Err(PriceFetchError::Unexpected(format!(
                "fund name '{name}' has no usable characters for a URL"
            )));
        }

        let url = format!("{}/{}", self.fund_base_url, slug);
        let html = self.get_page(&url).await?;
        Ok(extract_fund_price(&html).as_deref().and_then(normalize_price))
    }

    async fn stock_price(&self, name: &str) -> Result<Option<String>, PriceFetchError> {
        let code = stock_search_code(name);
        let html = self.get_page(&self.stock_page_url).await?;
        Ok(extract_stock_price(&html, &code)
            .as_deref()
            .and_then(normalize_price))
    }
}

#[async_trait]
impl PriceSource for WebPriceSource {
    async fn fetch_price(
        &self,
        name: &str,
        kind: FundKind,
    ) -> Result<Option<String>, PriceFetchError> {
        match kind {
            FundKind::Position => self.fund_price(name).await,
            FundKind::Share => self.stock_price(name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> WebPriceSource {
        WebPriceSource::new(
            &format!("{}/fon/", server.uri()),
            &format!("{}/hisse", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fund_price_uses_slugged_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fon/gumus-fon"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div data-testid="initial-data-last">2,345678</div>"#,
            ))
            .mount(&server)
            .await;

        let price = source(&server)
            .fetch_price("Gümüş Fon", FundKind::Position)
            .await
            .unwrap();
        assert_eq!(price, Some("2,345678 TL".into()));
    }

    #[tokio::test]
    async fn test_stock_price_from_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hisse"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<table><tbody>\
                 <tr><td class=\"sorting_1\">ALTINS1</td><td>28,46</td></tr>\
                 </tbody></table>",
            ))
            .mount(&server)
            .await;

        let price = source(&server)
            .fetch_price("ALTIN.S1", FundKind::Share)
            .await
            .unwrap();
        assert_eq!(price, Some("28,46 TL".into()));
    }

    #[tokio::test]
    async fn test_page_without_price_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fon/tca"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>maintenance</p>"))
            .mount(&server)
            .await;

        let price = source(&server)
            .fetch_price("TCA", FundKind::Position)
            .await
            .unwrap();
        assert_eq!(price, None);
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fon/zzz"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = source(&server).fetch_price("ZZZ", FundKind::Position).await;
        assert!(matches!(result, Err(PriceFetchError::Http(_))));
    }
}
