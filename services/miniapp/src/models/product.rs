//! Product entity and its enums

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payout policy: how many days after the trigger event cashback becomes due.
///
/// The wire values are the backend's human-readable Russian labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutTime {
    #[serde(rename = "После отзыва")]
    AfterReview,
    #[serde(rename = "После получения товара")]
    AfterDelivery,
    #[serde(rename = "На 15й день")]
    On15thDay,
}

/// Product moderation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Created,
    Active,
    NotPaid,
    Disabled,
    Rejected,
    Archived,
}

impl ProductStatus {
    /// Wire value used in multipart status fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Created => "created",
            ProductStatus::Active => "active",
            ProductStatus::NotPaid => "not_paid",
            ProductStatus::Disabled => "disabled",
            ProductStatus::Rejected => "rejected",
            ProductStatus::Archived => "archived",
        }
    }
}

/// Catalog category (backend wire values are Russian labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Женщинам")]
    Women,
    #[serde(rename = "Мужчинам")]
    Men,
    #[serde(rename = "Обувь")]
    Shoes,
    #[serde(rename = "Детям")]
    Kids,
    #[serde(rename = "Дом")]
    Home,
    #[serde(rename = "Новый год")]
    NewYear,
    #[serde(rename = "Красота")]
    Beauty,
    #[serde(rename = "Аксессуары")]
    Accessories,
    #[serde(rename = "Электроника")]
    Electronics,
    #[serde(rename = "Игрушки")]
    Toys,
    #[serde(rename = "Мебель")]
    Furniture,
    #[serde(rename = "Товары для взрослых")]
    Adult,
    #[serde(rename = "Бытовая техника")]
    Appliances,
    #[serde(rename = "Зоотовары")]
    Pets,
    #[serde(rename = "Спорт")]
    Sports,
    #[serde(rename = "Автотовары")]
    Auto,
    #[serde(rename = "Ювелирные изделия")]
    Jewelry,
    #[serde(rename = "Для ремонта")]
    Repair,
    #[serde(rename = "Сад и дача")]
    Garden,
    #[serde(rename = "Здоровье")]
    Health,
    #[serde(rename = "Канцтовары")]
    Stationery,
}

/// A seller's listing as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub article: String,
    pub category: Category,
    pub key_word: String,
    pub general_repurchases: i64,
    #[serde(default)]
    pub daily_repurchases: i64,
    /// Price the buyer actually pays
    pub price: f64,
    /// Marketplace (listed) price; cashback is the difference
    pub wb_price: f64,
    /// Seller's Telegram contact
    pub tg: String,
    /// Missing or unrecognized policy means no due date can be derived
    #[serde(default)]
    pub payment_time: Option<PayoutTime>,
    #[serde(default)]
    pub review_requirements: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    pub seller_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
