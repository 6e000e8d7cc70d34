use crate::enums::OrderStatus;
use crate::primitive::Price;
use chrono::NaiveDate;
use thiserror::Error;

/// 交易日志系统的统一错误定义
/// 使用 `thiserror` 宏自动生成 Display 和 Error trait
#[derive(Error, Debug)]
pub enum JournalError {
    // =================================================================
    // 1. 系统与配置类 (System & Config)
    // =================================================================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown internal error: {0}")]
    InternalError(String),

    // =================================================================
    // 2. 数据与解析类 (Data & Serialization)
    // =================================================================
    #[error("Failed to serialize/deserialize data: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    // =================================================================
    // 3. 交易业务类 (Journal & Orders) - 最重要
    // 查不到目标一律显式报错，绝不静默吞掉
    // =================================================================
    #[error("Invalid order price: {0}")]
    InvalidPrice(Price),

    #[error("Invalid order quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {id} is {status}, operation requires a pending order")]
    InvalidOrderStatus { id: String, status: OrderStatus },

    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    #[error("Risk model not found: {0}")]
    RiskModelNotFound(String),

    #[error("Psychological indicator not found: {0}")]
    IndicatorNotFound(String),

    #[error("Daily work record not found: {0}")]
    DailyWorkNotFound(String),

    #[error("Trade record not found: {0}")]
    TradeNotFound(String),

    #[error("Duplicate daily work date: {0}")]
    DuplicateDate(NaiveDate),

    // =================================================================
    // 4. 评估流程类 (Evaluation Flow)
    // =================================================================
    #[error("No psychological test on file")]
    NoPsychologicalTest,

    #[error("Evaluation gate rejected: {gate}: {detail}")]
    GateRejected { gate: &'static str, detail: String },

    #[error("Evaluation flow step mismatch: {0}")]
    FlowStepMismatch(String),

    // =================================================================
    // 5. 基础设施类 (Infrastructure)
    // =================================================================
    #[error("Storage I/O error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),
}
