//! 多证券批量汇总
//!
//! 对一组代码并发执行解码（并发数有上限），单个代码失败只计数、不影响其他代码，
//! 最后按指定字段降序稳定排序并截断。

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::models::{InstrumentCode, Snapshot};

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// 涨跌幅
    ChangePercent,
    /// 成交量
    Volume,
    /// 换手率
    Turnover,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "change" | "change_percent" => Ok(SortKey::ChangePercent),
            "volume" => Ok(SortKey::Volume),
            "turnover" => Ok(SortKey::Turnover),
            other => Err(format!(
                "不支持的排序字段: {}，可选: change, volume, turnover",
                other
            )),
        }
    }
}

/// 可参与排序的记录
pub trait Ranked {
    fn sort_value(&self, key: SortKey) -> f64;
}

impl Ranked for Snapshot {
    fn sort_value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::ChangePercent => self.change_percent,
            SortKey::Volume => self.volume,
            // 换手率不可用的排在最后
            SortKey::Turnover => self.turnover_ratio.unwrap_or(f64::NEG_INFINITY),
        }
    }
}

/// 批量汇总选项
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// 排序字段，None 时保持输入顺序
    pub sort_key: Option<SortKey>,
    /// 最多返回条数
    pub limit: usize,
    /// 同时进行的解码数上限
    pub max_concurrency: usize,
    /// 单个代码的超时时间
    pub per_call_timeout: Option<Duration>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            sort_key: None,
            limit: usize::MAX,
            max_concurrency: 8,
            per_call_timeout: Some(Duration::from_secs(8)),
        }
    }
}

/// 批量汇总结果
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<T> {
    pub items: Vec<T>,
    pub failed_count: usize,
}

/// 并发解码一组代码并汇总
///
/// 输入代码先去重（保留首次出现的位置）。结果按输入顺序收集，
/// 因此排序字段相等的记录保持输入顺序。
pub async fn aggregate<T, F, Fut>(
    codes: Vec<InstrumentCode>,
    decode: F,
    options: &AggregateOptions,
) -> Aggregate<(InstrumentCode, T)>
where
    T: Ranked,
    F: Fn(InstrumentCode) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut unique: Vec<InstrumentCode> = Vec::with_capacity(codes.len());
    for code in codes {
        if !unique.contains(&code) {
            unique.push(code);
        }
    }

    let timeout = options.per_call_timeout;
    let tasks = unique.into_iter().map(|code| {
        let fut = decode(code.clone());
        async move {
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(QuoteError::UpstreamUnavailable(format!(
                        "{} 请求超时",
                        code
                    ))),
                },
                None => fut.await,
            };
            if let Err(e) = &outcome {
                log::debug!("跳过 {}: {}", code, e);
            }
            outcome.map(|item| (code, item))
        }
    });

    let outcomes: Vec<Result<(InstrumentCode, T)>> = stream::iter(tasks)
        .buffered(options.max_concurrency.max(1))
        .collect()
        .await;

    let result = fold_outcomes(outcomes, options.sort_key, options.limit);
    log::info!(
        "批量汇总完成: 成功 {} 条, 失败 {} 个",
        result.items.len(),
        result.failed_count
    );
    result
}

/// 把逐个结果折叠为（成功列表，失败数），再排序截断
pub fn fold_outcomes<T, I>(
    outcomes: I,
    sort_key: Option<SortKey>,
    limit: usize,
) -> Aggregate<(InstrumentCode, T)>
where
    T: Ranked,
    I: IntoIterator<Item = Result<(InstrumentCode, T)>>,
{
    let (mut items, failed_count) =
        outcomes
            .into_iter()
            .fold((Vec::new(), 0), |(mut items, failed), outcome| match outcome {
                Ok(item) => {
                    items.push(item);
                    (items, failed)
                }
                Err(_) => (items, failed + 1),
            });

    if let Some(key) = sort_key {
        // sort_by 是稳定排序
        items.sort_by(|(_, a), (_, b)| b.sort_value(key).total_cmp(&a.sort_value(key)));
    }
    items.truncate(limit);

    Aggregate {
        items,
        failed_count,
    }
}
