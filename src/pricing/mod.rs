//! Price lookup for funds and shares by scraping public finance pages.

pub mod extract;
pub mod slug;
pub mod web;

pub use web::WebPriceSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::FundKind;

#[derive(Debug, Error)]
pub enum PriceFetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Something that can quote a fund or share by name.
///
/// `Ok(None)` means the page was reachable but carried no usable price.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(
        &self,
        name: &str,
        kind: FundKind,
    ) -> Result<Option<String>, PriceFetchError>;
}

/// Bring a scraped price into the stored `"<number> TL"` form.
/// Empty strings and the `-` placeholder yield `None`.
pub fn normalize_price(raw: &str) -> Option<String> {
    let price = raw.trim();
    if price.is_empty() || price == crate::models::fund::UNKNOWN_PRICE {
        return None;
    }

    if price.contains("TL") {
        Some(price.to_string())
    } else {
        Some(format!("{price} TL"))
    }
}
