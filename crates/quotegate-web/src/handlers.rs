use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use quotegate_core::{
    adjusted_daily_series, code_directory, index_history, markets, parse_limit, stock_chart,
    stock_history, trim, BarSeries, CodeDirectory, IntradayCurve, MarketStats, Period,
    QuoteSnapshot, SearchHit, TradeLog, TrimPolicy, UtcTimestamp, ValidationError,
};

use crate::envelope::ApiResponse;
use crate::state::AppState;

/// Upstream batch quote limit, enforced before any fetch is issued.
const BATCH_QUOTE_MAX: usize = 50;
/// Depth of the "today" tick trade fetch.
const RECENT_TRADE_DEPTH: u16 = 1800;
/// Daily bars included in the composite stock-info payload.
const INFO_KLINE_DEPTH: usize = 30;

#[derive(Debug, Deserialize)]
pub struct CodeQuery {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodeDateQuery {
    code: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KlineQuery {
    code: Option<String>,
    #[serde(rename = "type")]
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    code: Option<String>,
    #[serde(rename = "type")]
    period: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeQuery {
    exchange: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchQuoteBody {
    codes: Vec<String>,
}

/// Composite instrument overview; parts missing upstream are omitted.
#[derive(Debug, Serialize)]
pub struct StockInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<QuoteSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kline_day: Option<BarSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minute: Option<IntradayCurve>,
}

#[derive(Debug, Serialize)]
pub struct ServerStatus {
    status: &'static str,
    connected: bool,
    version: &'static str,
    uptime: String,
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeQuery>,
) -> Json<ApiResponse<Vec<QuoteSnapshot>>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };

    match state.feed.quotes(&[code]) {
        Ok(quotes) => Json(ApiResponse::ok(quotes)),
        Err(error) => Json(ApiResponse::fail(format!("quote fetch failed: {error}"))),
    }
}

pub async fn kline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KlineQuery>,
) -> Json<ApiResponse<BarSeries>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };
    let period = Period::from_token(query.period.as_deref().unwrap_or_default());

    match stock_chart(state.feed.as_ref(), &code, period) {
        Ok(series) => Json(ApiResponse::ok(series)),
        Err(error) => Json(ApiResponse::fail(format!("kline fetch failed: {error}"))),
    }
}

pub async fn kline_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<BarSeries>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };
    let period = Period::from_token(query.period.as_deref().unwrap_or_default());
    let limit = parse_limit(query.limit.as_deref());

    match stock_history(state.feed.as_ref(), &code, period, limit) {
        Ok(series) => Json(ApiResponse::ok(series)),
        Err(error) => Json(ApiResponse::fail(format!("kline fetch failed: {error}"))),
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<BarSeries>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };
    let period = Period::from_token(query.period.as_deref().unwrap_or_default());
    let limit = parse_limit(query.limit.as_deref());

    match index_history(state.feed.as_ref(), &code, period, limit) {
        Ok(series) => Json(ApiResponse::ok(series)),
        Err(error) => Json(ApiResponse::fail(format!("index fetch failed: {error}"))),
    }
}

pub async fn minute(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeDateQuery>,
) -> Json<ApiResponse<IntradayCurve>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };
    let date = non_empty(query.date).unwrap_or_else(today);

    match state.feed.intraday(&date, &code) {
        Ok(curve) => Json(ApiResponse::ok(curve)),
        Err(error) => Json(ApiResponse::fail(format!("intraday fetch failed: {error}"))),
    }
}

pub async fn trade(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeDateQuery>,
) -> Json<ApiResponse<TradeLog>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };

    let result = match non_empty(query.date) {
        Some(date) => state.feed.trades_on(&date, &code),
        None => state.feed.recent_trades(&code, 0, RECENT_TRADE_DEPTH),
    };

    match result {
        Ok(log) => Json(ApiResponse::ok(log)),
        Err(error) => Json(ApiResponse::fail(format!("trade fetch failed: {error}"))),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<SearchHit>>> {
    let Some(keyword) = non_empty(query.keyword) else {
        return Json(ApiResponse::fail(ValidationError::EmptyKeyword));
    };

    Json(ApiResponse::ok(markets::search(
        state.feed.as_ref(),
        &keyword,
    )))
}

pub async fn stock_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CodeQuery>,
) -> Json<ApiResponse<StockInfo>> {
    let Some(code) = non_empty(query.code) else {
        return Json(ApiResponse::fail(ValidationError::EmptyCode));
    };
    let feed = state.feed.as_ref();

    let quote = feed
        .quotes(std::slice::from_ref(&code))
        .ok()
        .and_then(|mut quotes| {
            if quotes.is_empty() {
                None
            } else {
                Some(quotes.remove(0))
            }
        });
    let kline_day = adjusted_daily_series(feed, &code)
        .ok()
        .map(|series| trim(series, INFO_KLINE_DEPTH, TrimPolicy::Tail));
    let minute = feed.intraday(&today(), &code).ok();

    Json(ApiResponse::ok(StockInfo {
        quote,
        kline_day,
        minute,
    }))
}

pub async fn codes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExchangeQuery>,
) -> Json<ApiResponse<CodeDirectory>> {
    Json(ApiResponse::ok(code_directory(
        state.feed.as_ref(),
        query.exchange.as_deref(),
    )))
}

pub async fn batch_quote(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BatchQuoteBody>, JsonRejection>,
) -> Json<ApiResponse<Vec<QuoteSnapshot>>> {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Json(ApiResponse::fail(ValidationError::MalformedBody(
                rejection.body_text(),
            )));
        }
    };

    if body.codes.is_empty() {
        return Json(ApiResponse::fail(ValidationError::EmptyBatch));
    }
    if body.codes.len() > BATCH_QUOTE_MAX {
        return Json(ApiResponse::fail(ValidationError::BatchTooLarge {
            len: body.codes.len(),
            max: BATCH_QUOTE_MAX,
        }));
    }

    match state.feed.quotes(&body.codes) {
        Ok(quotes) => Json(ApiResponse::ok(quotes)),
        Err(error) => Json(ApiResponse::fail(format!("quote fetch failed: {error}"))),
    }
}

pub async fn market_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<MarketStats>> {
    Json(ApiResponse::ok(markets::market_stats(state.feed.as_ref())))
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ServerStatus>> {
    Json(ApiResponse::ok(ServerStatus {
        status: "running",
        connected: true,
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.uptime(),
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "time": UtcTimestamp::now().unix(),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn today() -> String {
    UtcTimestamp::now().format_compact_date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_blank_input() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::from("  "))), None);
        assert_eq!(
            non_empty(Some(String::from(" 600519 "))),
            Some(String::from("600519"))
        );
    }

    #[test]
    fn today_is_compact_date() {
        let date = today();
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|ch| ch.is_ascii_digit()));
    }
}
