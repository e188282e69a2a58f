//! # Fulfill Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod order;
pub mod order_book;
pub mod state;
pub mod stats;
pub mod stock;

// Re-export 主要類型
pub use catalog::{Catalog, ModelId, ModelSpec};
pub use config::{
    DemandCounting, ReplenishmentLatch, SimulationConfig, StockDepletion, StockFulfillment,
};
pub use order::{Fulfillment, Order, ProcessingState, RawOrder};
pub use order_book::OrderBook;
pub use state::{SimulationState, SystemInfo, SystemState};
pub use stats::DemandStats;
pub use stock::{Stock, StockSlot};

/// 模擬錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum FulfillError {
    #[error("未知的產品型號: {0}")]
    UnknownModel(String),

    #[error("產品型號重複: {0}")]
    DuplicateModel(ModelId),

    #[error("產品目錄為空")]
    EmptyCatalog,

    #[error("無效的型號參數 {model}: {reason}")]
    InvalidModelSpec { model: ModelId, reason: String },

    #[error("無效的訂單: {0}")]
    InvalidOrder(String),

    /// 非致命：補貨或生產時倉儲空間不足，呼叫端應提前停止
    #[error("倉儲空間不足：需要 {required}, 剩餘 {remaining}")]
    CapacityExhausted { required: u32, remaining: u32 },

    #[error("排程死鎖：第 {hour} 小時仍有 {pending} 筆訂單無法完成")]
    SchedulingDeadlock { hour: u32, pending: usize },

    #[error("訂單數量超過上限：上限 {limit}, 收到 {received}")]
    InputTruncated { limit: usize, received: usize },

    #[error("客戶數量超過上限: {0}")]
    CustomerLimitExceeded(usize),

    #[error("第 {line} 行解析錯誤: {message}")]
    Parse { line: usize, message: String },

    #[error("配置錯誤: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FulfillError>;
