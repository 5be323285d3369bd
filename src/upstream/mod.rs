//! Third-party quote provider client and CSV normalization
//!
//! The provider answers a single GET with a CSV body of one header row and
//! one data row. A body with fewer than two rows is its way of saying the
//! symbol does not exist.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

const QUOTE_FIELDS: &str = "sd2t2ohlcvn";

/// Normalized quote as scraped from the provider. The four prices stay as
/// the provider's text; numeric coercion is the API service's job.
#[derive(Debug, Clone)]
pub struct Quote {
    pub name: String,
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Source of quotes, one outbound request per lookup
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<Quote>;
}

/// Client for the stooq.com CSV quote endpoint
pub struct StooqClient {
    client: reqwest::Client,
    base_url: String,
}

impl StooqClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl QuoteSource for StooqClient {
    async fn fetch(&self, symbol: &str) -> Result<Quote> {
        // Symbol goes into the query string as given; case and suffix
        // conventions are the provider's business
        let url = format!(
            "{}?s={}&f={}&h&e=csv",
            self.base_url, symbol, QUOTE_FIELDS
        );

        tracing::debug!("Fetching quote: {}", url);
        let body = self.client.get(&url).send().await?.text().await?;

        parse_quote_csv(&body)
    }
}

/// Parse the provider's CSV body into a [`Quote`].
///
/// Data row positions (the header is not interpreted):
/// `0=symbol, 1=date, 2=time, 3=open, 4=high, 5=low, 6=close, 7=volume,
/// 8=name`. Date and time combine as `<date>T<time>Z` and parse as UTC.
pub fn parse_quote_csv(body: &str) -> Result<Quote> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    // Header plus at least one data row, otherwise the symbol is unknown
    if rows.len() < 2 {
        return Err(AppError::NotFound("Stock not found.".to_string()));
    }

    let row = &rows[1];
    let field = |i: usize| row.get(i).unwrap_or("").to_string();

    let date = NaiveDateTime::parse_from_str(
        &format!("{}T{}Z", field(1), field(2)),
        "%Y-%m-%dT%H:%M:%SZ",
    )?
    .and_utc();

    Ok(Quote {
        name: field(8),
        symbol: field(0),
        date,
        open: field(3),
        high: field(4),
        low: field(5),
        close: field(6),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = "Symbol,Date,time,,Open,High,Low,Close,Volume,Name\n\
        AAPL.US,2023-06-24,22:00:16,123.66,123.66,122.49,123.49,53116996,APPLE\n";

    #[test]
    fn test_parse_well_formed_row() {
        let quote = parse_quote_csv(SAMPLE).unwrap();

        assert_eq!(quote.symbol, "AAPL.US");
        assert_eq!(quote.name, "APPLE");
        assert_eq!(
            quote.date,
            Utc.with_ymd_and_hms(2023, 6, 24, 22, 0, 16).unwrap()
        );
        // Prices stay untouched as text
        assert_eq!(quote.open, "123.66");
        assert_eq!(quote.high, "123.66");
        assert_eq!(quote.low, "122.49");
        assert_eq!(quote.close, "123.49");
    }

    #[test]
    fn test_header_only_body_is_not_found() {
        let err = parse_quote_csv("Symbol,Date,time,,Open,High,Low,Close,Volume,Name\n")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_blank_body_is_not_found() {
        assert!(matches!(
            parse_quote_csv("\n").unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            parse_quote_csv("").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_malformed_prices_pass_through() {
        // This layer does not validate numerics
        let body = "Symbol,Date,time,,Open,High,Low,Close,Volume,Name\n\
            X.US,2023-06-24,22:00:16,N/D,N/D,N/D,N/D,0,XCO\n";
        let quote = parse_quote_csv(body).unwrap();
        assert_eq!(quote.open, "N/D");
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let body = "Symbol,Date,time,,Open,High,Low,Close,Volume,Name\n\
            X.US,not-a-date,22:00:16,1,2,3,4,0,XCO\n";
        assert!(matches!(
            parse_quote_csv(body).unwrap_err(),
            AppError::DateParse(_)
        ));
    }
}
