//! Order entity and its report projection

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// Cashback payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    CashbackPaid,
    CashbackNotPaid,
    Cancelled,
    PaymentConfirmed,
    CashbackRejected,
}

impl OrderStatus {
    /// Wire value used in multipart status fields
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::CashbackPaid => "cashback_paid",
            OrderStatus::CashbackNotPaid => "cashback_not_paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::PaymentConfirmed => "payment_confirmed",
            OrderStatus::CashbackRejected => "cashback_rejected",
        }
    }

    /// Whether the seller's obligation is already settled from the buyer side
    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::CashbackPaid | OrderStatus::PaymentConfirmed)
    }
}

/// Buyer data embedded into order responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(default)]
    pub nickname: Option<String>,
}

/// One buyback purchase progressing through the 8-step workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[serde(default)]
    pub seller_id: Option<Uuid>,
    /// Highest completed step, 1..=8; only ever increases
    pub step: u8,

    // Step 1: search and cart screenshots
    #[serde(default)]
    pub search_screenshot_path: Option<String>,
    #[serde(default)]
    pub cart_screenshot_path: Option<String>,

    // Step 4: payout details
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,

    // Step 5: final cart screenshot and placement date
    #[serde(default)]
    pub final_cart_screenshot_path: Option<String>,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,

    // Step 6: delivery status and cut barcode photos
    #[serde(default)]
    pub delivery_screenshot_path: Option<String>,
    #[serde(default)]
    pub barcodes_screenshot_path: Option<String>,

    // Step 7: review, receipt and receipt number
    #[serde(default)]
    pub review_screenshot_path: Option<String>,
    #[serde(default)]
    pub receipt_screenshot_path: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,

    pub status: OrderStatus,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub user: Option<OrderUser>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Flattened projection of an order's collected evidence.
///
/// Served by a separate endpoint from the order itself; both contracts are
/// preserved as-is even though the data overlaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderReport {
    pub step: u8,
    #[serde(default)]
    pub search_screenshot_path: Option<String>,
    #[serde(default)]
    pub cart_screenshot_path: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub final_cart_screenshot_path: Option<String>,
    #[serde(default)]
    pub delivery_screenshot_path: Option<String>,
    #[serde(default)]
    pub barcodes_screenshot_path: Option<String>,
    #[serde(default)]
    pub review_screenshot_path: Option<String>,
    #[serde(default)]
    pub receipt_screenshot_path: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips() {
        let parsed: OrderStatus = serde_json::from_str("\"payment_confirmed\"").unwrap();
        assert_eq!(parsed, OrderStatus::PaymentConfirmed);
        assert!(parsed.is_paid());
        assert!(!OrderStatus::CashbackNotPaid.is_paid());
    }

    #[test]
    fn order_parses_with_sparse_fields() {
        let json = r#"{
            "id": "6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e6f",
            "user_id": "6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e60",
            "product_id": "6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e61",
            "step": 4,
            "card_number": "4276000000000000",
            "status": "cashback_not_paid",
            "created_at": "2024-01-01T10:00:00",
            "updated_at": "2024-01-02T10:00:00"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.step, 4);
        assert_eq!(order.card_number.as_deref(), Some("4276000000000000"));
        assert!(order.review_screenshot_path.is_none());
        assert!(order.product.is_none());
    }
}
