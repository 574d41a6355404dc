//! 个股接口处理器
//!
//! ## API 列表
//! - GET /stocks/{code}/price - 个股当前价格、涨跌幅
//! - GET /stocks/{code}/fundamentals - 市盈率、市净率、总市值
//! - GET /stocks/{code}/depth - 买卖五档盘口
//! - GET /stocks/{code}/history - 历史K线（最新在前）
//! - GET /stocks/{code}/indicators - RSI / MACD / KDJ / BOLL
//! - GET /stocks/compare - 多股对比
//! - GET /stocks/hot - 热门榜

use actix_web::{web, HttpResponse, Result};

use super::{bad_request, AppState};
use crate::models::{
    ApiResponse, BatchData, CodedSnapshot, CompareQuery, FundamentalsData, HistoryQuery, HotQuery,
    IndicatorKind, IndicatorQuery, InstrumentCode, PriceData, Snapshot,
};
use crate::services::aggregate::{Aggregate, SortKey};
use crate::services::code::normalize;
use crate::services::common::get_beijing_clock;
use crate::services::quote_service::DEFAULT_HISTORY_LIMIT;

/// 默认批量返回条数
const DEFAULT_RANK_LIMIT: usize = 10;

/// 获取个股当前价格
///
/// GET /api/v1/stocks/{code}/price
pub async fn get_price(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let code = normalize(&path.into_inner());

    match state.service.snapshot(&code).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(PriceData {
            symbol: code.to_string(),
            name: snapshot.name,
            price: snapshot.last_price,
            change_percent: snapshot.change_percent,
            change_amount: snapshot.change_amount,
            update_time: get_beijing_clock(),
        }))),
        Err(e) => Ok(state.error_response(&e)),
    }
}

/// 获取个股基本面（估值）
///
/// GET /api/v1/stocks/{code}/fundamentals
pub async fn get_fundamentals(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let code = normalize(&path.into_inner());

    match state.service.snapshot(&code).await {
        Ok(snapshot) => {
            let available = snapshot.fundamentals_available();
            let data = FundamentalsData {
                symbol: code.to_string(),
                name: snapshot.name,
                pe_ratio: snapshot.pe_ratio,
                pb_ratio: snapshot.pb_ratio,
                market_cap_billion: snapshot.market_cap_billion,
                available,
            };
            let mut response = ApiResponse::success(data);
            if !available {
                response.message = "财务数据暂不可用。".to_string();
            }
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => Ok(state.error_response(&e)),
    }
}

/// 获取买卖五档盘口
///
/// GET /api/v1/stocks/{code}/depth
pub async fn get_depth(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let code = normalize(&path.into_inner());

    match state.service.depth(&code).await {
        Ok(depth) => Ok(HttpResponse::Ok().json(ApiResponse::success(depth))),
        Err(e) => Ok(state.error_response(&e)),
    }
}

/// 获取历史K线，按日期倒序返回
///
/// GET /api/v1/stocks/{code}/history?period=day&limit=30
pub async fn get_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let code = normalize(&path.into_inner());
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    match state.service.history(&code, query.period, limit).await {
        Ok(mut bars) => {
            bars.reverse();
            Ok(HttpResponse::Ok().json(ApiResponse::success(bars)))
        }
        Err(e) => Ok(state.error_response(&e)),
    }
}

/// 计算技术指标
///
/// GET /api/v1/stocks/{code}/indicators?kind=RSI&period=14
pub async fn get_indicators(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<IndicatorQuery>,
) -> Result<HttpResponse> {
    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("ALL") => None,
        Some(s) => match s.parse::<IndicatorKind>() {
            Ok(kind) => Some(kind),
            Err(message) => return Ok(bad_request(message)),
        },
    };
    let code = normalize(&path.into_inner());

    match state.service.indicators(&code, kind, query.period).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(results))),
        Err(e) => Ok(state.error_response(&e)),
    }
}

/// 多股对比
///
/// GET /api/v1/stocks/compare?codes=600519,000858&sort=change
pub async fn compare_stocks(
    state: web::Data<AppState>,
    query: web::Query<CompareQuery>,
) -> Result<HttpResponse> {
    let sort_key = match parse_sort(query.sort.as_deref()) {
        Ok(key) => key,
        Err(message) => return Ok(bad_request(message)),
    };
    let codes: Vec<&str> = query
        .codes
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if codes.is_empty() {
        return Ok(bad_request("请输入股票代码".to_string()));
    }

    let limit = query.limit.unwrap_or(codes.len());
    let result = state.service.rank(codes, sort_key, limit).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(batch_data(result))))
}

/// 热门榜
///
/// GET /api/v1/stocks/hot?sort=change&limit=10
pub async fn hot_stocks(
    state: web::Data<AppState>,
    query: web::Query<HotQuery>,
) -> Result<HttpResponse> {
    let sort_key = match parse_sort(query.sort.as_deref()) {
        Ok(key) => key.or(Some(SortKey::ChangePercent)),
        Err(message) => return Ok(bad_request(message)),
    };

    let limit = query.limit.unwrap_or(DEFAULT_RANK_LIMIT);
    let codes = state.hot_list.iter().map(String::as_str);
    let result = state.service.rank(codes, sort_key, limit).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(batch_data(result))))
}

fn parse_sort(sort: Option<&str>) -> std::result::Result<Option<SortKey>, String> {
    sort.filter(|s| !s.trim().is_empty())
        .map(str::parse::<SortKey>)
        .transpose()
}

fn batch_data(result: Aggregate<(InstrumentCode, Snapshot)>) -> BatchData<CodedSnapshot> {
    BatchData {
        items: result
            .items
            .into_iter()
            .map(|(code, snapshot)| CodedSnapshot {
                symbol: code.to_string(),
                snapshot,
            })
            .collect(),
        failed_count: result.failed_count,
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("/compare", web::get().to(compare_stocks))
            .route("/hot", web::get().to(hot_stocks))
            .route("/{code}/price", web::get().to(get_price))
            .route("/{code}/fundamentals", web::get().to(get_fundamentals))
            .route("/{code}/depth", web::get().to(get_depth))
            .route("/{code}/history", web::get().to(get_history))
            .route("/{code}/indicators", web::get().to(get_indicators))
    );
}
