use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，处理外部数据源的网络、解析及数据缺失等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 核心逻辑从不重试，这些错误原样交还给调用方。
#[derive(Error, Debug)]
pub enum MarketError {
    // 网络层错误，包含底层客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式不匹配或 K 线字段非法
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的数据未找到 (未知交易对或缺少手续费信息)
    #[error("Data not found: {0}")]
    NotFound(String),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// # Summary
/// 行情数据校验错误，描述输入序列不满足计算前提的情况。
///
/// # Invariants
/// - 校验失败时绝不静默地产出交易决策。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    // 序列长度不足
    #[error("Insufficient data: required {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    // 单根 K 线字段违反 OHLC 约束
    #[error("Invalid candle: {reason}")]
    InvalidCandle { reason: String },
    // 时间戳未严格递增
    #[error("Candle timestamps must be strictly ascending (index {index})")]
    NonMonotonic { index: usize },
    // 支撑/阻力窗口为 0
    #[error("Support/resistance window must be at least 1")]
    InvalidWindow,
}

impl From<DataError> for MarketError {
    fn from(err: DataError) -> Self {
        MarketError::Parse(err.to_string())
    }
}
