//! 技术指标计算
//!
//! 每次调用都只根据传入的窗口完整重算，不在调用之间保留任何状态。
//! 因此 MACD 的 DEA 取 `DIF × 0.9` 的近似值，KDJ 的前一日 K、D 固定为 50，
//! 与教科书上的递推定义不同。真正的递推版本需要按证券保存滚动状态，不在此处实现。
//!
//! 历史数据不足时返回中性值（RSI 50、KDJ 50/50/50、MACD 与 BOLL 全 0），从不报错。

use crate::models::{
    Bar, Boll, IndicatorKind, IndicatorParams, IndicatorResult, Kdj, Macd,
};

/// RSI 历史不足时的中性值
pub const RSI_NEUTRAL: f64 = 50.0;
/// DEA 近似系数
const DEA_FACTOR: f64 = 0.9;
/// 高低点相同（窗口走平）时 RSV 的取值
const FLAT_RSV: f64 = 50.0;
/// KDJ 假定的前一日 K、D
const PRIOR_KD: f64 = 50.0;

/// 相对强弱指数
///
/// 只使用最后 `period` 次价格变动。
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() <= period {
        return RSI_NEUTRAL;
    }

    let window = &closes[closes.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), delta| {
            if delta > 0.0 {
                (gains + delta, losses)
            } else {
                (gains, losses - delta)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// 以首元素为种子的递推 EMA，乘数 `2 / (period + 1)`
fn ema(values: &[f64], period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    let mut iter = values.iter();
    let Some(&seed) = iter.next() else {
        return 0.0;
    };
    iter.fold(seed, |prev, &x| x * k + prev * (1.0 - k))
}

/// MACD
///
/// 工作窗口为最后 `slow` 个收盘价，快慢 EMA 都在这个窗口上计算。
/// `_signal` 不参与计算：DEA 按 `DIF × 0.9` 近似。
pub fn macd(closes: &[f64], fast: usize, slow: usize, _signal: usize) -> Macd {
    if slow == 0 || closes.len() < slow {
        return Macd::default();
    }

    let window = &closes[closes.len() - slow..];
    let dif = ema(window, fast) - ema(window, slow);
    let dea = dif * DEA_FACTOR;
    Macd {
        dif,
        dea,
        macd: 2.0 * (dif - dea),
    }
}

/// KDJ 随机指标
pub fn kdj(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Kdj {
    let n = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || n < period {
        return Kdj::NEUTRAL;
    }

    let highest_high = highs[n - period..n]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest_low = lows[n - period..n]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let last_close = closes[n - 1];

    let range = highest_high - lowest_low;
    let rsv = if range == 0.0 {
        FLAT_RSV
    } else {
        (last_close - lowest_low) / range * 100.0
    };

    let k = 2.0 / 3.0 * PRIOR_KD + rsv / 3.0;
    let d = 2.0 / 3.0 * PRIOR_KD + k / 3.0;
    Kdj { k, d, j: 3.0 * k - 2.0 * d }
}

/// 布林带，标准差为总体标准差
pub fn boll(closes: &[f64], period: usize, multiplier: f64) -> Boll {
    if period == 0 || closes.len() < period {
        return Boll::default();
    }

    let window = &closes[closes.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let band = multiplier * variance.sqrt();

    Boll {
        upper: middle + band,
        middle,
        lower: middle - band,
    }
}

/// 按指标类型计算
pub fn compute_indicator(
    kind: IndicatorKind,
    bars: &[Bar],
    params: &IndicatorParams,
) -> IndicatorResult {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    match kind {
        IndicatorKind::Rsi => IndicatorResult::Rsi {
            value: rsi(&closes, params.rsi_period),
        },
        IndicatorKind::Macd => IndicatorResult::Macd(macd(
            &closes,
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
        )),
        IndicatorKind::Kdj => {
            let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
            let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
            IndicatorResult::Kdj(kdj(&highs, &lows, &closes, params.kdj_period))
        }
        IndicatorKind::Boll => {
            IndicatorResult::Boll(boll(&closes, params.boll_period, params.boll_multiplier))
        }
    }
}

/// 一次计算全部四个指标
pub fn compute_all(bars: &[Bar], params: &IndicatorParams) -> Vec<IndicatorResult> {
    IndicatorKind::ALL
        .iter()
        .map(|kind| compute_indicator(*kind, bars, params))
        .collect()
}
