//! 预约单评估流程：心理 → 策略 → 风控(仅买入) → 填单，四步线性闸门。

pub mod flow;

pub use flow::{FlowStep, OrderDetails, ReservationFlow};
