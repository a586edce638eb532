use scout_core::market::entity::Candle;

/// # Summary
/// 形态判定使用的影线比例。
///
/// # Invariants
/// - 锤子线与射击之星共用同一组比例，二者互为镜像。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WickRatios {
    // 长影线至少为实体的倍数
    pub long: f64,
    // 反向影线至多为实体的倍数
    pub short: f64,
}

impl Default for WickRatios {
    fn default() -> Self {
        Self {
            long: 2.0,
            short: 0.5,
        }
    }
}

pub fn is_bullish(candle: &Candle) -> bool {
    candle.open() < candle.close()
}

pub fn is_bearish(candle: &Candle) -> bool {
    candle.open() > candle.close()
}

pub fn body_size(candle: &Candle) -> f64 {
    (candle.close() - candle.open()).abs()
}

/// # Summary
/// 看涨吞没：前一根为阴线，当前为阳线，且当前实体完全包住前一根实体。
pub fn is_bullish_engulfing(previous: &Candle, current: &Candle) -> bool {
    if !is_bearish(previous) || !is_bullish(current) {
        return false;
    }
    current.close() > previous.open() && current.open() < previous.close()
}

/// # Summary
/// 看跌吞没：前一根为阳线，当前为阴线，且当前实体向下完全包住前一根实体。
pub fn is_bearish_engulfing(previous: &Candle, current: &Candle) -> bool {
    if !is_bullish(previous) || !is_bearish(current) {
        return false;
    }
    current.open() > previous.close() && current.close() < previous.open()
}

/// # Summary
/// 锤子线判定。
///
/// # Logic
/// 1. 下影线取 `open - low`，上影线取 `high - close`。
/// 2. 下影线长于实体的 `ratios.long` 倍，且上影线短于实体的 `ratios.short` 倍。
pub fn is_hammer(candle: &Candle, ratios: WickRatios) -> bool {
    let body = body_size(candle);
    let lower_wick = candle.open() - candle.low();
    let upper_wick = candle.high() - candle.close();
    lower_wick > body * ratios.long && upper_wick < body * ratios.short
}

/// # Summary
/// 射击之星判定，锤子线的镜像。
///
/// # Logic
/// 1. 上影线取 `high - open`，下影线取 `close - low`。
/// 2. 上影线长于实体的 `ratios.long` 倍，且下影线短于实体的 `ratios.short` 倍。
pub fn is_shooting_star(candle: &Candle, ratios: WickRatios) -> bool {
    let body = body_size(candle);
    let upper_wick = candle.high() - candle.open();
    let lower_wick = candle.close() - candle.low();
    upper_wick > body * ratios.long && lower_wick < body * ratios.short
}
