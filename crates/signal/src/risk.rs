use rust_decimal::Decimal;
use scout_core::config::RiskConfig;
use tracing::warn;

/// 每日选出的两个交易对所处的仓位槽。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Primary,
    Secondary,
}

/// # Summary
/// 判断持仓是否触发止损。
///
/// # Logic
/// 1. 买入价非正时不触发。
/// 2. 收益率 `(current - purchase) / purchase * 100` 不高于 `-|stop_loss_percent|` 时触发。
///
/// # Arguments
/// * `current_price`: 当前价。
/// * `purchase_price`: 买入价。
/// * `stop_loss_percent`: 止损百分比 (符号忽略)。
///
/// # Returns
/// 需要止损返回 `true`。
pub fn check_stop_loss(
    current_price: Decimal,
    purchase_price: Decimal,
    stop_loss_percent: Decimal,
) -> bool {
    if purchase_price <= Decimal::ZERO {
        return false;
    }
    let change_percent = (current_price - purchase_price) / purchase_price * Decimal::ONE_HUNDRED;
    let triggered = change_percent <= -stop_loss_percent.abs();
    if triggered {
        warn!(
            %current_price,
            %purchase_price,
            %change_percent,
            "Stop loss triggered"
        );
    }
    triggered
}

/// # Summary
/// 按仓位槽计算本次买入可用的资金。
///
/// # Logic
/// 1. 主交易对使用 `primary_allocation` 比例，次交易对使用 `secondary_allocation`。
/// 2. 结果低于交易所最小下单金额时不下单。
///
/// # Returns
/// 可下单金额；不足最小下单金额时返回 `None`。
pub fn allocate(available: Decimal, slot: Slot, config: &RiskConfig) -> Option<Decimal> {
    let ratio = match slot {
        Slot::Primary => config.primary_allocation,
        Slot::Secondary => config.secondary_allocation,
    };
    let amount = available * ratio;
    (amount > config.min_order).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stop_loss_triggers_at_threshold() {
        assert!(check_stop_loss(dec!(88000000), dec!(90000000), dec!(2.0)));
        assert!(check_stop_loss(dec!(98.5), dec!(100), dec!(1.5)));
        assert!(!check_stop_loss(dec!(98.6), dec!(100), dec!(1.5)));
    }

    #[test]
    fn test_stop_loss_ignores_sign_and_bad_purchase() {
        assert!(check_stop_loss(dec!(98), dec!(100), dec!(-1.5)));
        assert!(!check_stop_loss(dec!(50), dec!(0), dec!(1.5)));
        assert!(!check_stop_loss(dec!(120), dec!(100), dec!(1.5)));
    }

    #[test]
    fn test_allocation_split() {
        let config = RiskConfig::default();
        assert_eq!(allocate(dec!(100000), Slot::Primary, &config), Some(dec!(70000)));
        assert_eq!(allocate(dec!(100000), Slot::Secondary, &config), Some(dec!(30000)));
    }

    #[test]
    fn test_allocation_below_min_order() {
        let config = RiskConfig::default();
        // 10000 * 0.3 = 3000 < 5000
        assert_eq!(allocate(dec!(10000), Slot::Secondary, &config), None);
        // 恰好等于最小下单金额也不下单
        let half = RiskConfig {
            primary_allocation: dec!(0.5),
            ..RiskConfig::default()
        };
        assert_eq!(allocate(dec!(10000), Slot::Primary, &half), None);
        assert_eq!(allocate(dec!(10002), Slot::Primary, &half), Some(dec!(5001)));
    }
}
