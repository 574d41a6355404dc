//! 行情查询服务
//!
//! 把数据源客户端、解码器、指标计算和批量汇总串起来，
//! 每个操作都是无状态的：一次请求、一次获取、一次解码。

use std::time::Duration;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::models::{
    Bar, Depth, IndexQuote, IndicatorKind, IndicatorParams, IndicatorResult, InstrumentCode,
    KlinePeriod, Snapshot,
};

use super::aggregate::{aggregate, Aggregate, AggregateOptions, SortKey};
use super::code::normalize_all;
use super::common::HEADLINE_INDICES;
use super::decode::{decode_bars, decode_depth, decode_index_set, decode_snapshot, headline_key_table};
use super::feed::FeedClient;
use super::indicator::{compute_all, compute_indicator};

/// 默认K线数量
pub const DEFAULT_HISTORY_LIMIT: usize = 30;
/// 指标计算使用的K线数量，覆盖最长的 MACD 慢线窗口
pub const INDICATOR_HISTORY_LIMIT: usize = 120;

/// 行情查询服务
#[derive(Clone)]
pub struct QuoteService {
    /// 数据源客户端
    feed: FeedClient,
    /// 批量查询并发上限
    max_concurrency: usize,
    /// 单个代码超时
    per_call_timeout: Duration,
}

impl QuoteService {
    /// 按配置创建服务
    pub fn new(config: &FeedConfig) -> Result<Self> {
        Ok(Self {
            feed: FeedClient::new(config)?,
            max_concurrency: config.max_concurrency,
            per_call_timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// 三大指数实时行情
    pub async fn market_overview(&self) -> Result<Vec<IndexQuote>> {
        let keys: Vec<&str> = HEADLINE_INDICES.iter().map(|(key, _)| *key).collect();
        let text = self.feed.fetch_index_set(&keys).await?;
        Ok(decode_index_set(&text, &headline_key_table()))
    }

    /// 个股快照（腾讯）
    pub async fn snapshot(&self, code: &InstrumentCode) -> Result<Snapshot> {
        let text = self.feed.fetch_snapshot(code).await?;
        decode_snapshot(&text)
    }

    /// 五档盘口（新浪）
    pub async fn depth(&self, code: &InstrumentCode) -> Result<Depth> {
        let text = self.feed.fetch_depth(code).await?;
        decode_depth(&text)
    }

    /// 历史K线，按日期升序
    pub async fn history(
        &self,
        code: &InstrumentCode,
        period: KlinePeriod,
        limit: usize,
    ) -> Result<Vec<Bar>> {
        let text = self.feed.fetch_bars(code, period, limit).await?;
        decode_bars(&text)
    }

    /// 技术指标，`kind` 为 None 时计算全部
    pub async fn indicators(
        &self,
        code: &InstrumentCode,
        kind: Option<IndicatorKind>,
        period: Option<usize>,
    ) -> Result<Vec<IndicatorResult>> {
        let bars = self
            .history(code, KlinePeriod::Day, INDICATOR_HISTORY_LIMIT)
            .await?;

        Ok(match kind {
            Some(kind) => {
                let params = IndicatorParams::default().with_period(kind, period);
                vec![compute_indicator(kind, &bars, &params)]
            }
            None => compute_all(&bars, &IndicatorParams::default()),
        })
    }

    /// 多股对比 / 热门榜
    pub async fn rank<'a, I>(
        &self,
        inputs: I,
        sort_key: Option<SortKey>,
        limit: usize,
    ) -> Aggregate<(InstrumentCode, Snapshot)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let options = AggregateOptions {
            sort_key,
            limit,
            max_concurrency: self.max_concurrency,
            per_call_timeout: Some(self.per_call_timeout),
        };

        aggregate(
            normalize_all(inputs),
            |code| async move { self.snapshot(&code).await },
            &options,
        )
        .await
    }
}
