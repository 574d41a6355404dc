pub mod health;
pub mod market;
pub mod stock;

use actix_web::{web, HttpResponse};

use crate::error::QuoteError;
use crate::models::ApiResponse;
use crate::services::QuoteService;

/// 各处理器共享的应用状态
pub struct AppState {
    /// 行情查询服务
    pub service: QuoteService,
    /// 热门榜候选股票
    pub hot_list: Vec<String>,
    /// 错误响应是否返回完整细节
    pub debug_errors: bool,
}

impl AppState {
    /// 把行情错误转换为 HTTP 响应
    pub fn error_response(&self, err: &QuoteError) -> HttpResponse {
        log::warn!("请求失败: {}", err);
        let body = ApiResponse::<()>::error(err.public_message(self.debug_errors));
        match err {
            QuoteError::NotFound(_) => HttpResponse::NotFound().json(body),
            QuoteError::MalformedPayload(_) | QuoteError::InsufficientFields { .. } => {
                HttpResponse::BadGateway().json(body)
            }
            QuoteError::UpstreamUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        }
    }
}

/// 请求参数错误
pub fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(market::config)
            .configure(stock::config)
    );
}
