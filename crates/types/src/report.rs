//! Price report payloads returned by `/result/reports`.

use chrono::{DateTime, Utc};

/// One hospital's price entry for the searched treatment.
///
/// Prices are in won. When `max_price` is present it is expected to be at
/// least `min_price`; single-price entries omit `max_price` entirely.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub id: i64,
    pub hospital_name: String,
    pub location: String,
    pub treatment_name: String,
    pub min_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
}

impl ResultItem {
    /// Upper bound of the price range, falling back to the single price.
    pub fn price_ceiling(&self) -> u64 {
        self.max_price.unwrap_or(self.min_price)
    }

    /// Human-readable price, either "150,000원" or "150,000원 ~ 180,000원".
    pub fn price_label(&self) -> String {
        match self.max_price {
            Some(max) if max != self.min_price => {
                format!("{} ~ {}", format_won(self.min_price), format_won(max))
            }
            _ => format_won(self.min_price),
        }
    }
}

/// The report body: result list plus the backend's AI summary comment.
///
/// Both the comment and the ranking are opaque external outputs consumed
/// as-is; the client only sorts and paginates the list for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub result_count: u32,
    #[serde(default)]
    pub ai_comment: String,
    #[serde(default)]
    pub list: Vec<ResultItem>,
}

/// A report plus the client-side timestamp at which it was fetched.
///
/// Snapshots are created fresh on every results-view entry and never cached
/// across navigations.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub report: PriceReport,
    pub fetched_at: DateTime<Utc>,
}

/// Format a won amount with thousands separators: `150000` → "150,000원".
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push('원');
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(min: u64, max: Option<u64>) -> ResultItem {
        ResultItem {
            id: 1,
            hospital_name: "서울대학교병원".into(),
            location: "서울특별시 종로구".into(),
            treatment_name: "도수치료".into(),
            min_price: min,
            max_price: max,
        }
    }

    #[test]
    fn test_price_ceiling_falls_back_to_min() {
        assert_eq!(item(150_000, None).price_ceiling(), 150_000);
        assert_eq!(item(150_000, Some(180_000)).price_ceiling(), 180_000);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(item(150_000, None).price_label(), "150,000원");
        assert_eq!(
            item(150_000, Some(180_000)).price_label(),
            "150,000원 ~ 180,000원"
        );
        // A degenerate range collapses to a single price.
        assert_eq!(item(150_000, Some(150_000)).price_label(), "150,000원");
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(999), "999원");
        assert_eq!(format_won(1_000), "1,000원");
        assert_eq!(format_won(1_234_567), "1,234,567원");
    }

    #[test]
    fn test_report_decodes_with_absent_fields() {
        let report: PriceReport = serde_json::from_str(r#"{"resultCount":0}"#).unwrap();
        assert_eq!(report.result_count, 0);
        assert!(report.list.is_empty());
        assert!(report.ai_comment.is_empty());
    }

    #[test]
    fn test_result_item_wire_names() {
        let json = r#"{
            "id": 7,
            "hospitalName": "삼성서울병원",
            "location": "서울특별시 강남구",
            "treatmentName": "도수치료",
            "minPrice": 180000
        }"#;
        let item: ResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.hospital_name, "삼성서울병원");
        assert_eq!(item.max_price, None);
    }
}
