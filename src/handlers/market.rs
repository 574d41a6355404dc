//! 大盘指数接口处理器
//!
//! - GET /market/overview - 上证、深证、创业板指数实时行情

use actix_web::{web, HttpResponse, Result};

use super::AppState;
use crate::models::ApiResponse;

/// 获取三大指数实时行情
pub async fn get_market_overview(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.service.market_overview().await {
        Ok(quotes) => Ok(HttpResponse::Ok().json(ApiResponse::success(quotes))),
        Err(e) => Ok(state.error_response(&e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/market")
            .route("/overview", web::get().to(get_market_overview))
    );
}
