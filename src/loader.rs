//! 輸入檔讀取
//!
//! `info.dat`：第一行 `倉儲容量 工人數`，之後每行 `型號 成本 售價 空間 工時`。
//! `orders.dat`：每行 `下單時間 型號 數量 客戶`。

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use fulfill_core::{Catalog, FulfillError, ModelId, ModelSpec, RawOrder, SystemInfo};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// 模擬所需的全部輸入
#[derive(Debug, Clone)]
pub struct InputTables {
    pub system: SystemInfo,
    pub catalog: Catalog,
    pub orders: Vec<RawOrder>,
}

/// 讀取兩個輸入檔
pub fn load_files(
    info_path: impl AsRef<Path>,
    orders_path: impl AsRef<Path>,
) -> anyhow::Result<InputTables> {
    let info_path = info_path.as_ref();
    let orders_path = orders_path.as_ref();

    let info_text = std::fs::read_to_string(info_path)
        .with_context(|| format!("無法開啟檔案 {}", info_path.display()))?;
    tracing::info!("已開啟檔案 {}", info_path.display());

    let orders_text = std::fs::read_to_string(orders_path)
        .with_context(|| format!("無法開啟檔案 {}", orders_path.display()))?;
    tracing::info!("已開啟檔案 {}", orders_path.display());

    let (system, catalog) = parse_system_info(&info_text)
        .with_context(|| format!("解析 {} 失敗", info_path.display()))?;
    let orders = parse_orders(&orders_text)
        .with_context(|| format!("解析 {} 失敗", orders_path.display()))?;

    Ok(InputTables {
        system,
        catalog,
        orders,
    })
}

/// 型號列：`型號 成本 售價 空間 工時`
#[derive(Debug, Deserialize)]
struct ModelRow {
    id: ModelId,
    #[serde(with = "rust_decimal::serde::str")]
    unit_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    unit_price: Decimal,
    space_required: u32,
    man_hours: u32,
}

impl From<ModelRow> for ModelSpec {
    fn from(row: ModelRow) -> Self {
        ModelSpec::new(
            row.id,
            row.unit_cost,
            row.unit_price,
            row.man_hours,
            row.space_required,
        )
    }
}

/// 訂單列：`下單時間 型號 數量 客戶`
#[derive(Debug, Deserialize)]
struct OrderRow {
    timestamp: i64,
    model: ModelId,
    quantity: u32,
    customer: String,
}

impl From<OrderRow> for RawOrder {
    fn from(row: OrderRow) -> Self {
        RawOrder::new(row.timestamp, row.model, row.quantity, row.customer)
    }
}

/// 解析系統參數與型號目錄
pub fn parse_system_info(text: &str) -> fulfill_core::Result<(SystemInfo, Catalog)> {
    let mut rows = read_rows(text)?.into_iter();

    let (line, header) = rows.next().ok_or(FulfillError::Parse {
        line: 1,
        message: "缺少系統參數".to_string(),
    })?;
    let system: SystemInfo = deserialize_row(line, &header, 2)?;

    let models = rows
        .map(|(line, row)| deserialize_row::<ModelRow>(line, &row, 5).map(ModelSpec::from))
        .collect::<fulfill_core::Result<Vec<_>>>()?;

    Ok((system, Catalog::new(models)?))
}

/// 解析訂單清單
pub fn parse_orders(text: &str) -> fulfill_core::Result<Vec<RawOrder>> {
    read_rows(text)?
        .into_iter()
        .map(|(line, row)| deserialize_row::<OrderRow>(line, &row, 4).map(RawOrder::from))
        .collect()
}

/// 以空白分隔讀取所有非空白列，附上行號（從 1 起算）
///
/// 連續空白會產生空欄位，讀取後先濾掉。
fn read_rows(text: &str) -> fulfill_core::Result<Vec<(usize, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| FulfillError::Parse {
            line: e.position().map_or(0, |p| p.line() as usize),
            message: e.to_string(),
        })?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let fields: StringRecord = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if !fields.is_empty() {
            rows.push((line, fields));
        }
    }

    Ok(rows)
}

fn deserialize_row<T: DeserializeOwned>(
    line: usize,
    row: &StringRecord,
    expected: usize,
) -> fulfill_core::Result<T> {
    if row.len() != expected {
        return Err(FulfillError::Parse {
            line,
            message: format!("預期 {} 個欄位，實際 {} 個", expected, row.len()),
        });
    }
    row.deserialize(None).map_err(|e| FulfillError::Parse {
        line,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const INFO: &str = "100 10\nA 1 3 1 2\nB 2.5 10 2 3\n\nC 4 5 1 1\nD 2 9 3 4\n";

    #[test]
    fn test_parse_system_info() {
        let (system, catalog) = parse_system_info(INFO).unwrap();

        assert_eq!(system, SystemInfo::new(100, 10));
        assert_eq!(catalog.len(), 4);

        let b = catalog.lookup(ModelId::B).unwrap();
        assert_eq!(b.unit_cost, Decimal::new(25, 1));
        assert_eq!(b.unit_price, Decimal::from(10));
        // 檔案欄位順序：空間在工時之前
        assert_eq!(b.space_required, 2);
        assert_eq!(b.man_hours, 3);
    }

    #[test]
    fn test_parse_orders() {
        let orders = parse_orders("1 A 5 X\n2 B 3 Acme\n").unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0], RawOrder::new(1, ModelId::A, 5, "X"));
        assert_eq!(orders[1].customer, "Acme");
    }

    #[rstest]
    #[case("1 A 5\n", 1)]
    #[case("1 A 5 X\nx A 5 X\n", 2)]
    #[case("1 A 5 X\n\n1 Q 5 X\n", 3)]
    #[case("1 A -5 X\n", 1)]
    fn test_parse_orders_errors(#[case] input: &str, #[case] expected_line: usize) {
        match parse_orders(input) {
            Err(FulfillError::Parse { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("預期解析錯誤，實際 {:?}", other),
        }
    }

    #[test]
    fn test_repeated_spaces_and_crlf() {
        let orders = parse_orders("1  A   5 X\r\n   \r\n2 B 3 Acme  \r\n").unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0], RawOrder::new(1, ModelId::A, 5, "X"));
        assert_eq!(orders[1], RawOrder::new(2, ModelId::B, 3, "Acme"));
    }

    #[rstest]
    #[case("10 10\nA 1 3 1\n", 2)]
    #[case("10 10\nA 1 x 1 2\n", 2)]
    #[case("10 10 5\nA 1 3 1 2\n", 1)]
    #[case("10 10\nA 1 3 1 2\n\nE 1 3 1 2\n", 4)]
    fn test_parse_system_info_errors(#[case] input: &str, #[case] expected_line: usize) {
        match parse_system_info(input) {
            Err(FulfillError::Parse { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("預期解析錯誤，實際 {:?}", other),
        }
    }

    #[test]
    fn test_extra_order_field_is_rejected() {
        assert!(matches!(
            parse_orders("1 A 5 X Y\n"),
            Err(FulfillError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_system_line() {
        assert!(matches!(
            parse_system_info("\n\n"),
            Err(FulfillError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_model_in_info() {
        assert!(matches!(
            parse_system_info("10 10\nA 1 3 1 2\nA 1 3 1 2\n"),
            Err(FulfillError::DuplicateModel(ModelId::A))
        ));
    }
}
