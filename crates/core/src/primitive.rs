use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =========================================================================
// Price (价格)
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn from_f64(val: f64) -> Self {
        Price(Decimal::from_f64(val).unwrap_or_default())
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

// --- 运算符 ---
impl Add for Price {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0 + rhs.0)
    }
}
impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
impl Sub for Price {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Price(self.0 - rhs.0)
    }
}
impl SubAssign for Price {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// 成交金额 = 价格 × 股数
impl Mul<u32> for Price {
    type Output = Decimal;
    fn mul(self, rhs: u32) -> Self::Output {
        self.0 * Decimal::from(rhs)
    }
}

// --- 序列化 ---
// 快照里价格按数字存储，与其余货币字段保持同一布局
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let d = <Decimal as Deserialize>::deserialize(deserializer)?;
        Ok(Price(d))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(p: Price) -> Self {
        p.0
    }
}

// =========================================================================
// 评分工具
// =========================================================================

/// 四舍五入到两位小数 (评分统一的展示与入库精度)
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_times_quantity_is_gross_amount() {
        let price = Price(dec!(100.50));
        assert_eq!(price * 10u32, dec!(1005.00));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(88.126), 88.13);
        assert_eq!(round2(69.994), 69.99);
        assert_eq!(round2(100.0), 100.0);
    }
}
