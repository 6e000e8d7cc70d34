//! 风险模型推仓：按单笔最大亏损约束给出建议仓位上限。

use journal_core::{ensure_that, JournalError, Price, RiskGate, RiskModel};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// 按风险模型推算建议仓位。
///
/// 最大亏损额 = 总资金 × maxLossPercent / 100；
/// 最大股数 = ⌊最大亏损额 / (买入价 − 止损价)⌋。
/// 止损价必须低于买入价，否则单股亏损距离无意义。
/// 风控关只给建议不拦路，gate.pass 恒为 true。
pub fn position_size(
    balance: Decimal,
    model: &RiskModel,
    price: Price,
    stop_loss: Price,
) -> Result<RiskGate, JournalError> {
    ensure_that!(
        stop_loss < price,
        "止损价 {} 必须低于买入价 {}",
        stop_loss,
        price
    );

    let percent = Decimal::from_f64(model.max_loss_percent).unwrap_or_default();
    let max_loss = balance * percent / Decimal::from(100);
    let per_share_risk = Decimal::from(price) - Decimal::from(stop_loss);
    let max_quantity = (max_loss / per_share_risk).floor().to_u64().unwrap_or(0);

    Ok(RiskGate {
        pass: true,
        max_loss,
        max_quantity,
        risk_model_id: model.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn model(percent: f64) -> RiskModel {
        RiskModel {
            id: "r1".to_string(),
            name: "测试模型".to_string(),
            description: String::new(),
            max_loss_percent: percent,
            position_size: 0.2,
        }
    }

    #[test]
    fn sizing_follows_stop_distance() {
        let gate = position_size(
            dec!(100000),
            &model(2.0),
            Price(dec!(100)),
            Price(dec!(95)),
        )
        .unwrap();
        assert_eq!(gate.max_loss, dec!(2000));
        assert_eq!(gate.max_quantity, 400);
        assert!(gate.pass);
    }

    #[test]
    fn fractional_quantity_floors() {
        // 1000 / 3 = 333.33... -> 333 股
        let gate = position_size(
            dec!(100000),
            &model(1.0),
            Price(dec!(10)),
            Price(dec!(7)),
        )
        .unwrap();
        assert_eq!(gate.max_quantity, 333);
    }

    #[test]
    fn stop_loss_must_be_below_price() {
        let err = position_size(
            dec!(100000),
            &model(1.0),
            Price(dec!(100)),
            Price(dec!(100)),
        )
        .unwrap_err();
        assert!(matches!(err, JournalError::InvalidData(_)));
    }
}
