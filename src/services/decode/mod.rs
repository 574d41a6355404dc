//! 定长位置报文解码
//!
//! 三种数据源文本形状，各自独立解码：
//! - 指数简版行情（`,` 分隔，多行）
//! - 个股快照与五档盘口（腾讯 `~` 分隔 / 新浪 `,` 分隔）
//! - K线 JSON 数组
//!
//! 输入均为已完成字符集转换的文本。

mod fields;
mod index;
mod kline;
mod snapshot;

pub use index::{decode_index_set, headline_key_table};
pub use kline::decode_bars;
pub use snapshot::{decode_depth, decode_snapshot};
