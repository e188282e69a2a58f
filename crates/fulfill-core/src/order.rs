//! 客戶訂單模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ModelId;
use crate::{FulfillError, Result};

/// 訂單處理狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingState {
    /// 等待中
    Pending,
    /// 生產中
    InProgress,
    /// 已完成（終態）
    Completed,
}

/// 訂單完成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fulfillment {
    /// 排程生產
    Manufactured,
    /// 直接由庫存出貨
    FromStock,
}

/// 原始訂單（輸入資料）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    /// 下單時間
    pub timestamp: i64,

    /// 型號
    pub model: ModelId,

    /// 數量
    pub quantity: u32,

    /// 客戶名稱
    pub customer: String,
}

impl RawOrder {
    pub fn new(timestamp: i64, model: ModelId, quantity: u32, customer: impl Into<String>) -> Self {
        Self {
            timestamp,
            model,
            quantity,
            customer: customer.into(),
        }
    }
}

/// 訂單（含模擬狀態）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: Uuid,

    /// 下單時間
    pub timestamp: i64,

    /// 型號
    pub model: ModelId,

    /// 數量
    pub quantity: u32,

    /// 客戶名稱
    pub customer: String,

    /// 處理狀態
    pub state: ProcessingState,

    /// 開始生產的小時
    pub start_hour: Option<u32>,

    /// 預計完工的小時
    pub end_hour: Option<u32>,

    /// 完成方式
    pub fulfillment: Option<Fulfillment>,
}

impl Order {
    /// 由原始訂單建立，數量必須為正
    pub fn from_raw(raw: RawOrder) -> Result<Self> {
        if raw.quantity == 0 {
            return Err(FulfillError::InvalidOrder(format!(
                "客戶 {} 型號 {} 數量為 0",
                raw.customer, raw.model
            )));
        }
        if raw.customer.trim().is_empty() {
            return Err(FulfillError::InvalidOrder("客戶名稱為空".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp: raw.timestamp,
            model: raw.model,
            quantity: raw.quantity,
            customer: raw.customer,
            state: ProcessingState::Pending,
            start_hour: None,
            end_hour: None,
            fulfillment: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.state == ProcessingState::Pending
    }

    pub fn is_in_progress(&self) -> bool {
        self.state == ProcessingState::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessingState::Completed
    }

    /// 開始生產：Pending → InProgress
    pub fn start(&mut self, hour: u32, man_hours: u32) {
        debug_assert!(self.is_pending());
        self.state = ProcessingState::InProgress;
        self.start_hour = Some(hour);
        self.end_hour = Some(hour.saturating_add(man_hours));
    }

    /// 是否在此小時完工
    pub fn is_due(&self, hour: u32) -> bool {
        self.is_in_progress() && self.end_hour == Some(hour)
    }

    /// 生產完工：InProgress → Completed
    pub fn complete(&mut self) {
        debug_assert!(self.is_in_progress());
        self.state = ProcessingState::Completed;
        self.fulfillment = Some(Fulfillment::Manufactured);
    }

    /// 由庫存出貨：Pending → Completed
    pub fn complete_from_stock(&mut self) {
        debug_assert!(self.is_pending());
        self.state = ProcessingState::Completed;
        self.fulfillment = Some(Fulfillment::FromStock);
    }

    /// 實際生產工時（僅限已開工訂單）
    pub fn production_hours(&self) -> Option<u32> {
        match (self.start_hour, self.end_hour) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
