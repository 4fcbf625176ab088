use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::yahoo::YahooApi;
use crate::error::{Error, Result};
use crate::models::cache::TtlCache;
use crate::models::market::{IntradayPoint, MarketDirection, MarketQuote};

lazy_static::lazy_static! {
    /// Quote-provider symbols for the tracked indices. Index symbols start
    /// with `^`, stored pre-encoded so they drop straight into the URL path.
    static ref MARKET_INDICES: HashMap<&'static str, &'static str> = HashMap::from([
        ("sp500", "%5EGSPC"),
        ("nasdaq", "%5EIXIC"),
        ("dow", "%5EDJI"),
    ]);
}

const QUOTES_CACHE_KEY: &str = "quotes";
const LOOKBACK_DAYS: i64 = 5;

/// Quote and chart orchestration over the market-data provider.
///
/// The quotes path is all-or-nothing: every tracked index must parse or the
/// whole fetch fails and nothing is cached. The intraday path is the
/// opposite and degrades to an empty series on any failure.
pub struct MarketService {
    api: YahooApi,
    cache: TtlCache<HashMap<String, MarketQuote>>,
}

impl MarketService {
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            api: YahooApi::new(),
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Current snapshot for every tracked index, keyed by index name.
    pub async fn market_data(&self) -> Result<HashMap<String, MarketQuote>> {
        if let Some(cached) = self.cache.get(QUOTES_CACHE_KEY) {
            return Ok(cached);
        }

        // Fan out one request per index; the first failure wins and the
        // remaining in-flight requests are dropped.
        let quotes = try_join_all(MARKET_INDICES.iter().map(|(&key, &symbol)| async move {
            let json = self.api.chart(symbol).await.map_err(|e| {
                error!(key, error = %e, "quote fetch failed");
                e
            })?;
            parse_quote(key, &json)
        }))
        .await?;

        let data: HashMap<String, MarketQuote> = quotes
            .into_iter()
            .map(|quote| (quote.key.clone(), quote))
            .collect();

        if let Some(sp500) = data.get("sp500") {
            let direction = MarketDirection::from_percent_change(sp500.percent_change);
            info!(percent_change = sp500.percent_change, %direction, "market direction");
        }

        self.cache.set(QUOTES_CACHE_KEY, data.clone());
        Ok(data)
    }

    /// Daily close series for the trailing five trading days. Unknown index
    /// or upstream trouble yields an empty series, never an error.
    pub async fn intraday(&self, index: &str) -> Vec<IntradayPoint> {
        let Some(&symbol) = MARKET_INDICES.get(index) else {
            warn!(index, "unknown index requested");
            return Vec::new();
        };

        let now = Utc::now().timestamp();
        let period1 = now - LOOKBACK_DAYS * 24 * 60 * 60;

        match self.api.chart_range(symbol, period1, now).await {
            Ok(json) => {
                let points = parse_chart_points(&json);
                debug!(index, points = points.len(), "intraday series fetched");
                points
            }
            Err(e) => {
                error!(index, error = %e, "intraday fetch failed");
                Vec::new()
            }
        }
    }
}

fn parse_quote(key: &str, json: &Value) -> Result<MarketQuote> {
    let meta = json
        .get("chart")
        .and_then(|chart| chart.get("result"))
        .and_then(|result| result.get(0))
        .and_then(|result| result.get("meta"))
        .ok_or_else(|| Error::MalformedResponse {
            endpoint: "yahoo",
            detail: format!("missing chart metadata for {key}"),
        })?;

    let current_price = meta_f64(meta, "regularMarketPrice", key)?;
    let previous_close = meta_f64(meta, "previousClose", key)?;
    let high = meta_f64(meta, "regularMarketDayHigh", key)?;
    let low = meta_f64(meta, "regularMarketDayLow", key)?;
    let market_time = meta
        .get("regularMarketTime")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| Error::MalformedResponse {
            endpoint: "yahoo",
            detail: format!("missing regularMarketTime for {key}"),
        })?;

    let change = current_price - previous_close;
    let percent_change = change / previous_close * 100.0;

    Ok(MarketQuote {
        key: key.to_string(),
        current_price,
        change: round2(change),
        percent_change: round2(percent_change),
        high,
        low,
        previous_close,
        timestamp: market_time,
    })
}

fn meta_f64(meta: &Value, field: &str, key: &str) -> Result<f64> {
    meta.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::MalformedResponse {
            endpoint: "yahoo",
            detail: format!("missing {field} for {key}"),
        })
}

/// Pairs the timestamp array with the close array, dropping slots where the
/// provider reported a null close.
fn parse_chart_points(json: &Value) -> Vec<IntradayPoint> {
    let Some(result) = json
        .get("chart")
        .and_then(|chart| chart.get("result"))
        .and_then(|result| result.get(0))
    else {
        warn!("chart response has no result node");
        return Vec::new();
    };

    let timestamps = result.get("timestamp").and_then(Value::as_array);
    let closes = result
        .get("indicators")
        .and_then(|indicators| indicators.get("quote"))
        .and_then(|quote| quote.get(0))
        .and_then(|quote| quote.get("close"))
        .and_then(Value::as_array);

    let (Some(timestamps), Some(closes)) = (timestamps, closes) else {
        warn!("chart response is missing timestamps or closes");
        return Vec::new();
    };

    timestamps
        .iter()
        .zip(closes.iter())
        .filter_map(|(ts, close)| {
            let x = DateTime::from_timestamp(ts.as_i64()?, 0)?;
            let y = close.as_f64()?;
            Some(IntradayPoint { x, y })
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote_json(price: f64, previous_close: f64) -> Value {
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": price,
                        "previousClose": previous_close,
                        "regularMarketDayHigh": price + 1.0,
                        "regularMarketDayLow": price - 1.0,
                        "regularMarketTime": 1736262600
                    }
                }]
            }
        })
    }

    #[test]
    fn parse_quote_computes_rounded_changes() {
        let quote = parse_quote("sp500", &quote_json(100.0, 95.0)).unwrap();
        assert_eq!(quote.key, "sp500");
        assert_eq!(quote.change, 5.00);
        assert_eq!(quote.percent_change, 5.26);
        assert_eq!(quote.previous_close, 95.0);
    }

    #[test]
    fn parse_quote_rejects_missing_meta() {
        let err = parse_quote("sp500", &json!({"chart": {"result": []}})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { endpoint: "yahoo", .. }));
    }

    #[test]
    fn parse_quote_rejects_missing_field() {
        let mut payload = quote_json(100.0, 95.0);
        payload["chart"]["result"][0]["meta"]
            .as_object_mut()
            .unwrap()
            .remove("previousClose");
        assert!(parse_quote("dow", &payload).is_err());
    }

    #[test]
    fn parse_chart_points_drops_null_closes() {
        let payload = json!({
            "chart": {
                "result": [{
                    "timestamp": [1736262600, 1736349000, 1736435400],
                    "indicators": {
                        "quote": [{ "close": [5900.0, null, 5920.5] }]
                    }
                }]
            }
        });

        let points = parse_chart_points(&payload);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].y, 5900.0);
        assert_eq!(points[1].y, 5920.5);
    }

    #[test]
    fn parse_chart_points_is_empty_on_missing_data() {
        assert!(parse_chart_points(&json!({})).is_empty());
        assert!(parse_chart_points(&json!({
            "chart": { "result": [{ "timestamp": [1736262600] }] }
        }))
        .is_empty());
    }

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(5.263_157), 5.26);
        assert_eq!(round2(5.267_9), 5.27);
        assert_eq!(round2(-0.105_3), -0.11);
    }
}
