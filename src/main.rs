//! 行情查询后端服务
//!
//! 提供指数、个股行情、盘口、K线和技术指标的 RESTful API 服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use quote_backend::handlers::{self, AppState};
use quote_backend::services::QuoteService;
use quote_backend::AppConfig;

/// 应用程序入口
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let (config, notes) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件中的级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for (level, note) in notes {
        log::log!(level, "{}", note);
    }
    if config.log.debug_errors {
        log::warn!("已开启错误详情输出");
    }

    let service = QuoteService::new(&config.feed)?;
    let state = web::Data::new(AppState {
        service,
        hot_list: config.feed.hot_list.clone(),
        debug_errors: config.log.debug_errors,
    });

    let bind_addr = config.bind_addr();
    log::info!("启动行情查询服务，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config) // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await?;
    Ok(())
}
