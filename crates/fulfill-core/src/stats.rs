//! 需求組合統計

use serde::{Deserialize, Serialize};

use crate::catalog::ModelId;

/// 各型號累計訂單數與載入時的訂單總數，僅用於補貨比例
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandStats {
    counts: [u64; 4],
    total: u64,
}

impl DemandStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄一次訂單觀察
    pub fn record(&mut self, model: ModelId) {
        self.counts[model.index()] += 1;
        self.total += 1;
    }

    /// 排程掃描時重複計入：只累加型號計數，總數維持載入時的值
    ///
    /// 因此各型號佔比總和可能超過 100%。
    pub fn record_repeat(&mut self, model: ModelId) {
        self.counts[model.index()] += 1;
    }

    pub fn count(&self, model: ModelId) -> u64 {
        self.counts[model.index()]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// 型號佔比的整數百分比（向下取整），總數為 0 時回傳 None
    pub fn share_percent(&self, model: ModelId) -> Option<u64> {
        if self.total == 0 {
            return None;
        }
        Some(self.count(model) * 100 / self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_share() {
        let mut stats = DemandStats::new();
        stats.record(ModelId::A);
        stats.record(ModelId::A);
        stats.record(ModelId::C);

        assert_eq!(stats.count(ModelId::A), 2);
        assert_eq!(stats.count(ModelId::B), 0);
        assert_eq!(stats.total(), 3);
        // 2/3 = 66.6% → 66
        assert_eq!(stats.share_percent(ModelId::A), Some(66));
        assert_eq!(stats.share_percent(ModelId::C), Some(33));
    }

    #[test]
    fn test_repeat_keeps_total() {
        let mut stats = DemandStats::new();
        stats.record(ModelId::A);
        stats.record(ModelId::B);
        stats.record_repeat(ModelId::A);
        stats.record_repeat(ModelId::A);

        assert_eq!(stats.count(ModelId::A), 3);
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.share_percent(ModelId::A), Some(150));
        assert_eq!(stats.share_percent(ModelId::B), Some(50));
    }

    #[test]
    fn test_share_with_no_orders() {
        let stats = DemandStats::new();
        assert_eq!(stats.share_percent(ModelId::A), None);
    }
}
