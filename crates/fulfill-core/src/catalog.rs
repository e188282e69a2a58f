//! 產品目錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{FulfillError, Result};

/// 產品型號（固定目錄 A/B/C/D）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelId {
    A,
    B,
    C,
    D,
}

impl ModelId {
    /// 目錄固定順序
    pub const ALL: [ModelId; 4] = [ModelId::A, ModelId::B, ModelId::C, ModelId::D];

    /// 單字元代號
    pub fn as_char(self) -> char {
        match self {
            ModelId::A => 'A',
            ModelId::B => 'B',
            ModelId::C => 'C',
            ModelId::D => 'D',
        }
    }

    /// 在固定目錄中的索引
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<char> for ModelId {
    type Error = FulfillError;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'A' => Ok(ModelId::A),
            'B' => Ok(ModelId::B),
            'C' => Ok(ModelId::C),
            'D' => Ok(ModelId::D),
            other => Err(FulfillError::UnknownModel(other.to_string())),
        }
    }
}

impl FromStr for ModelId {
    type Err = FulfillError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => ModelId::try_from(c),
            _ => Err(FulfillError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_char(), f)
    }
}

/// 型號規格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// 型號
    pub id: ModelId,

    /// 單位製造成本
    pub unit_cost: Decimal,

    /// 單位售價
    pub unit_price: Decimal,

    /// 單位所需工時
    pub man_hours: u32,

    /// 單位所需倉儲空間
    pub space_required: u32,
}

impl ModelSpec {
    /// 創建新的型號規格
    pub fn new(
        id: ModelId,
        unit_cost: Decimal,
        unit_price: Decimal,
        man_hours: u32,
        space_required: u32,
    ) -> Self {
        Self {
            id,
            unit_cost,
            unit_price,
            man_hours,
            space_required,
        }
    }

    /// 單位毛利（售價 - 成本）
    pub fn unit_margin(&self) -> Decimal {
        self.unit_price - self.unit_cost
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| FulfillError::InvalidModelSpec {
            model: self.id,
            reason: reason.to_string(),
        };

        if self.unit_cost < Decimal::ZERO {
            return Err(invalid("成本不可為負"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(invalid("售價不可為負"));
        }
        if self.man_hours == 0 {
            return Err(invalid("工時必須為正"));
        }
        if self.space_required == 0 {
            return Err(invalid("倉儲空間必須為正"));
        }
        Ok(())
    }
}

/// 產品目錄（載入後不可變）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// 依 A/B/C/D 順序排列
    models: Vec<ModelSpec>,
}

impl Catalog {
    /// 建立目錄，檢查重複與參數有效性
    pub fn new(mut models: Vec<ModelSpec>) -> Result<Self> {
        if models.is_empty() {
            return Err(FulfillError::EmptyCatalog);
        }

        models.sort_by_key(|m| m.id);
        for pair in models.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(FulfillError::DuplicateModel(pair[0].id));
            }
        }
        for model in &models {
            model.validate()?;
        }

        Ok(Self { models })
    }

    /// 查詢型號規格；找不到代表輸入資料損毀
    pub fn lookup(&self, id: ModelId) -> Result<&ModelSpec> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| FulfillError::UnknownModel(id.to_string()))
    }

    /// 平均單位空間（整數截斷）
    pub fn average_space_unit(&self) -> u32 {
        let total: u32 = self.models.iter().map(|m| m.space_required).sum();
        total / self.models.len() as u32
    }

    /// 依固定目錄順序迭代
    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
