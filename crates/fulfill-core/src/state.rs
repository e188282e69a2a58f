//! 系統狀態

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::stats::DemandStats;
use crate::stock::Stock;

/// 系統參數（輸入資料）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// 倉儲容量（空間單位）
    pub storage_capacity: u32,

    /// 工人數（即每小時可用工時池）
    pub number_of_workers: u32,
}

impl SystemInfo {
    pub fn new(storage_capacity: u32, number_of_workers: u32) -> Self {
        Self {
            storage_capacity,
            number_of_workers,
        }
    }
}

/// 系統狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    /// 倉儲容量（固定）
    pub storage_capacity: u32,

    /// 初始工時池
    pub total_worker_hours: u32,

    /// 目前可用工時
    pub available_worker_hours: u32,

    /// 平均產品尺寸（啟動時由目錄計算一次）
    pub average_product_size: u32,
}

impl SystemState {
    /// 由系統參數與目錄建立
    pub fn new(info: SystemInfo, catalog: &Catalog) -> Self {
        Self {
            storage_capacity: info.storage_capacity,
            total_worker_hours: info.number_of_workers,
            available_worker_hours: info.number_of_workers,
            average_product_size: catalog.average_space_unit(),
        }
    }

    /// 嘗試佔用工時，不足時回傳 false
    pub fn try_acquire_workers(&mut self, hours: u32) -> bool {
        if hours <= self.available_worker_hours {
            self.available_worker_hours -= hours;
            true
        } else {
            false
        }
    }

    /// 歸還工時
    pub fn release_workers(&mut self, hours: u32) {
        self.available_worker_hours += hours;
    }
}

/// 模擬可變狀態，僅由排程器以獨佔引用修改
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub system: SystemState,
    pub stock: Stock,
    pub demand_stats: DemandStats,
}

impl SimulationState {
    pub fn new(system: SystemState, stock: Stock, demand_stats: DemandStats) -> Self {
        Self {
            system,
            stock,
            demand_stats,
        }
    }
}
