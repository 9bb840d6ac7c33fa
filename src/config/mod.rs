use std::env;

use crate::ledger::NegativePayablePolicy;

const DEFAULT_FUND_PRICE_BASE_URL: &str = "https://www.hangikredi.com/yatirim-araclari/fon";
const DEFAULT_STOCK_PRICE_PAGE_URL: &str =
    "https://www.isyatirim.com.tr/tr-tr/analiz/hisse/Sayfalar/default.aspx";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Bearer token for /api routes (auth disabled when unset)
    pub api_token: Option<String>,

    // Ledger
    pub negative_payable_policy: NegativePayablePolicy,
    pub transaction_list_limit: i64,
    pub fund_transaction_list_limit: i64,

    // Price refresh
    pub price_refresh_enabled: bool,
    pub price_refresh_hour: u32,
    pub price_refresh_utc_offset_hours: i32,
    pub fund_price_base_url: String,
    pub stock_price_page_url: String,
    pub price_fetch_timeout_secs: u64,
    pub fund_refresh_delay_secs: u64,
    pub stock_refresh_delay_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let price_refresh_hour: u32 = env::var("PRICE_REFRESH_HOUR")
            .unwrap_or_else(|_| "9".into())
            .parse()?;
        if price_refresh_hour > 23 {
            anyhow::bail!("PRICE_REFRESH_HOUR must be between 0 and 23, got {price_refresh_hour}");
        }

        let price_refresh_utc_offset_hours: i32 = env::var("PRICE_REFRESH_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "3".into())
            .parse()?;
        if !(-12..=14).contains(&price_refresh_utc_offset_hours) {
            anyhow::bail!(
                "PRICE_REFRESH_UTC_OFFSET_HOURS out of range: {price_refresh_utc_offset_hours}"
            );
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()?,
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),

            negative_payable_policy: env::var("NEGATIVE_PAYABLE_POLICY")
                .unwrap_or_else(|_| "reject".into())
                .parse()?,
            transaction_list_limit: list_limit("TRANSACTION_LIST_LIMIT", 100)?,
            fund_transaction_list_limit: list_limit("FUND_TRANSACTION_LIST_LIMIT", 20)?,

            price_refresh_enabled: env::var("PRICE_REFRESH_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            price_refresh_hour,
            price_refresh_utc_offset_hours,
            fund_price_base_url: env::var("FUND_PRICE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FUND_PRICE_BASE_URL.into()),
            stock_price_page_url: env::var("STOCK_PRICE_PAGE_URL")
                .unwrap_or_else(|_| DEFAULT_STOCK_PRICE_PAGE_URL.into()),
            price_fetch_timeout_secs: env::var("PRICE_FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .unwrap_or(15),
            fund_refresh_delay_secs: env::var("FUND_REFRESH_DELAY_SECS")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .unwrap_or(3),
            stock_refresh_delay_secs: env::var("STOCK_REFRESH_DELAY_SECS")
                .unwrap_or_else(|_| "4".into())
                .parse()
                .unwrap_or(4),
        })
    }

    /// Returns true if the API is protected by a bearer token.
    pub fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }
}

const MAX_LIST_LIMIT: i64 = 10_000;

fn list_limit(name: &str, default: i64) -> anyhow::Result<i64> {
    match env::var(name) {
        Ok(raw) => parse_list_limit(name, &raw),
        Err(_) => Ok(default),
    }
}

/// Row caps go straight into SQL `LIMIT`, so they must be positive.
fn parse_list_limit(name: &str, raw: &str) -> anyhow::Result<i64> {
    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{name} must be an integer, got '{raw}': {e}"))?;
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        anyhow::bail!("{name} must be between 1 and {MAX_LIST_LIMIT}, got {limit}");
    }
    Ok(limit)
}
