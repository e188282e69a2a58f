//! 模擬配置

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{FulfillError, Result};

/// 預設最大模擬小時數（死鎖保護）
pub const DEFAULT_MAX_HOURS: u32 = 100_000;

/// 近十二個月統計視窗
pub const DEFAULT_TWELVE_MONTH_WINDOW: i64 = 365;

/// 模擬參數配置
///
/// 預設值重現舊系統的行為（包含已知的怪異之處），
/// 使用 [`SimulationConfig::corrected`] 取得修正後的行為。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 最大模擬小時數，超過視為排程死鎖
    pub max_hours: u32,

    /// 庫存出貨時扣減哪個庫位
    pub stock_depletion: StockDepletion,

    /// 庫存出貨後訂單如何處理
    pub stock_fulfillment: StockFulfillment,

    /// 空檔補貨的觸發閂鎖
    pub replenishment_latch: ReplenishmentLatch,

    /// 需求統計的累計方式
    pub demand_counting: DemandCounting,

    /// 訂單數量上限（None 表示不限）
    pub max_orders: Option<usize>,

    /// 庫位數量上限
    pub max_stock_slots: Option<usize>,

    /// 客戶數量上限
    pub max_customers: Option<usize>,

    /// 近十二個月統計的時間視窗
    pub twelve_month_window: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_hours: DEFAULT_MAX_HOURS,
            stock_depletion: StockDepletion::SharedPool,
            stock_fulfillment: StockFulfillment::SkipOrder,
            replenishment_latch: ReplenishmentLatch::FirstPass,
            demand_counting: DemandCounting::EveryPass,
            max_orders: None,
            max_stock_slots: None,
            max_customers: None,
            twelve_month_window: DEFAULT_TWELVE_MONTH_WINDOW,
        }
    }
}

impl SimulationConfig {
    /// 舊系統行為，包含固定上限（訂單 100、庫位 100、客戶 20）
    pub fn legacy() -> Self {
        Self::default()
            .with_max_orders(100)
            .with_max_stock_slots(100)
            .with_max_customers(20)
    }

    /// 修正版：扣減命中的庫位、庫存出貨即完成訂單、每個空檔都補貨、需求只統計一次
    pub fn corrected() -> Self {
        Self {
            stock_depletion: StockDepletion::MatchedSlot,
            stock_fulfillment: StockFulfillment::CompleteOrder,
            replenishment_latch: ReplenishmentLatch::EveryPass,
            demand_counting: DemandCounting::OnLoad,
            ..Self::default()
        }
    }

    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FulfillError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案載入
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FulfillError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// 檢查配置合理性
    pub fn validate(&self) -> Result<()> {
        if self.max_hours == 0 {
            return Err(FulfillError::Config("max_hours 必須為正".to_string()));
        }
        if self.twelve_month_window < 0 {
            return Err(FulfillError::Config(
                "twelve_month_window 不可為負".to_string(),
            ));
        }
        Ok(())
    }

    /// 建構器模式：設置最大模擬小時數
    pub fn with_max_hours(mut self, hours: u32) -> Self {
        self.max_hours = hours;
        self
    }

    /// 建構器模式：設置庫存扣減方式
    pub fn with_stock_depletion(mut self, depletion: StockDepletion) -> Self {
        self.stock_depletion = depletion;
        self
    }

    /// 建構器模式：設置庫存出貨處理方式
    pub fn with_stock_fulfillment(mut self, fulfillment: StockFulfillment) -> Self {
        self.stock_fulfillment = fulfillment;
        self
    }

    /// 建構器模式：設置補貨閂鎖
    pub fn with_replenishment_latch(mut self, latch: ReplenishmentLatch) -> Self {
        self.replenishment_latch = latch;
        self
    }

    /// 建構器模式：設置需求統計方式
    pub fn with_demand_counting(mut self, counting: DemandCounting) -> Self {
        self.demand_counting = counting;
        self
    }

    /// 建構器模式：設置訂單數量上限
    pub fn with_max_orders(mut self, limit: usize) -> Self {
        self.max_orders = Some(limit);
        self
    }

    /// 建構器模式：設置庫位數量上限
    pub fn with_max_stock_slots(mut self, limit: usize) -> Self {
        self.max_stock_slots = Some(limit);
        self
    }

    /// 建構器模式：設置客戶數量上限
    pub fn with_max_customers(mut self, limit: usize) -> Self {
        self.max_customers = Some(limit);
        self
    }

    /// 建構器模式：設置十二個月統計視窗
    pub fn with_twelve_month_window(mut self, window: i64) -> Self {
        self.twelve_month_window = window;
        self
    }
}

/// 庫存扣減方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockDepletion {
    /// 舊行為：找到相符型號後，從庫存頂端扣一個單位（不論頂端是哪個型號）
    SharedPool,
    /// 扣減實際命中的庫位
    MatchedSlot,
}

/// 庫存出貨後的訂單處理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockFulfillment {
    /// 舊行為：訂單狀態不變，本小時略過；每次掃描都可能再次出貨
    SkipOrder,
    /// 等待中的訂單直接由庫存完成
    CompleteOrder,
}

/// 空檔補貨閂鎖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplenishmentLatch {
    /// 第一輪掃描中遇到的所有空檔都補貨，之後關閉
    FirstPass,
    /// 只處理遇到的第一個空檔
    FirstGap,
    /// 不關閉，每輪掃描都補貨
    EveryPass,
}

/// 需求統計方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandCounting {
    /// 舊行為：載入時統計，之後每輪掃描再累加一次
    EveryPass,
    /// 只在載入時統計一次
    OnLoad,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_legacy_behaviour() {
        let config = SimulationConfig::default();

        assert_eq!(config.max_hours, DEFAULT_MAX_HOURS);
        assert_eq!(config.stock_depletion, StockDepletion::SharedPool);
        assert_eq!(config.stock_fulfillment, StockFulfillment::SkipOrder);
        assert_eq!(config.replenishment_latch, ReplenishmentLatch::FirstPass);
        assert_eq!(config.demand_counting, DemandCounting::EveryPass);
        assert_eq!(config.max_orders, None);
    }

    #[test]
    fn test_legacy_limits() {
        let config = SimulationConfig::legacy();

        assert_eq!(config.max_orders, Some(100));
        assert_eq!(config.max_stock_slots, Some(100));
        assert_eq!(config.max_customers, Some(20));
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::corrected()
            .with_max_hours(50)
            .with_twelve_month_window(30);

        assert_eq!(config.max_hours, 50);
        assert_eq!(config.twelve_month_window, 30);
        assert_eq!(config.stock_depletion, StockDepletion::MatchedSlot);
        assert_eq!(config.demand_counting, DemandCounting::OnLoad);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{ "max_hours": 10, "stock_depletion": "MatchedSlot" }"#,
        )
        .unwrap();

        assert_eq!(config.max_hours, 10);
        assert_eq!(config.stock_depletion, StockDepletion::MatchedSlot);
        assert_eq!(config.stock_fulfillment, StockFulfillment::SkipOrder);
    }

    #[test]
    fn test_invalid_json_config() {
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{ "max_hours": 0 }"#),
            Err(FulfillError::Config(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str("not json"),
            Err(FulfillError::Config(_))
        ));
    }
}
