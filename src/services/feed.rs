//! 行情数据源 HTTP 客户端
//!
//! 对接 http://hq.sinajs.cn、http://qt.gtimg.cn 和 https://quotes.sina.cn，
//! 返回已从 GBK 转换的文本。任何传输失败都归为上游不可用。

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::FeedConfig;
use crate::error::{QuoteError, Result};
use crate::models::{InstrumentCode, KlinePeriod};

use super::common::{
    SINA_KLINE_API, SINA_REALTIME_API, SINA_REFERER, TENCENT_REALTIME_API,
};

/// 行情数据源客户端
#[derive(Clone)]
pub struct FeedClient {
    /// HTTP 客户端
    client: Client,
}

impl FeedClient {
    /// 按配置创建客户端
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| QuoteError::UpstreamUnavailable(format!("创建 HTTP 客户端失败: {}", e)))?;
        Ok(Self { client })
    }

    /// 新浪指数简版行情
    pub async fn fetch_index_set(&self, keys: &[&str]) -> Result<String> {
        let url = format!("{}/list={}", SINA_REALTIME_API, keys.join(","));
        self.fetch_gbk(&url, Some(SINA_REFERER)).await
    }

    /// 腾讯个股行情
    pub async fn fetch_snapshot(&self, code: &InstrumentCode) -> Result<String> {
        let url = format!("{}/q={}", TENCENT_REALTIME_API, code);
        self.fetch_gbk(&url, None).await
    }

    /// 新浪个股行情（含五档盘口）
    pub async fn fetch_depth(&self, code: &InstrumentCode) -> Result<String> {
        let url = format!("{}/list={}", SINA_REALTIME_API, code);
        self.fetch_gbk(&url, Some(SINA_REFERER)).await
    }

    /// 新浪K线
    pub async fn fetch_bars(
        &self,
        code: &InstrumentCode,
        period: KlinePeriod,
        limit: usize,
    ) -> Result<String> {
        let url = kline_url(code, period, limit)?;
        self.fetch_gbk(url.as_str(), Some(SINA_REFERER)).await
    }

    async fn fetch_gbk(&self, url: &str, referer: Option<&str>) -> Result<String> {
        log::debug!("📡 请求行情 URL: {}", url);

        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header("Referer", referer);
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("请求 {} 失败: {}", url, e);
            upstream(e)
        })?;

        if !response.status().is_success() {
            log::warn!("请求 {} 返回状态 {}", url, response.status());
            return Err(QuoteError::UpstreamUnavailable(format!(
                "HTTP 状态 {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(upstream)?;
        Ok(encoding_rs::GBK.decode(&bytes).0.into_owned())
    }
}

fn upstream(e: reqwest::Error) -> QuoteError {
    if e.is_timeout() {
        QuoteError::UpstreamUnavailable(format!("请求超时: {}", e))
    } else {
        QuoteError::UpstreamUnavailable(e.to_string())
    }
}

/// 构造K线请求地址
fn kline_url(code: &InstrumentCode, period: KlinePeriod, limit: usize) -> Result<Url> {
    let symbol = code.to_string();
    let scale = period.scale().to_string();
    let datalen = limit.to_string();
    Url::parse_with_params(
        SINA_KLINE_API,
        &[
            ("symbol", symbol.as_str()),
            ("scale", scale.as_str()),
            ("ma", "no"),
            ("datalen", datalen.as_str()),
        ],
    )
    .map_err(|e| QuoteError::MalformedPayload(format!("K线地址无效: {}", e)))
}
