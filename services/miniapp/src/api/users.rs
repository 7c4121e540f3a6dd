//! User, balance, report and blacklist endpoints

use common::error::ApiResult;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::{BlacklistEntry, Order, OrderReport, SellerBalance, User, UserRole};
use crate::telegram::TelegramBridge;

use super::{ApiClient, ApiRequest, Transport};

/// Filters for the moderator user list
#[derive(Debug, Clone, Default)]
pub struct UserFilters {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub banned: Option<bool>,
}

/// Referral invite link issued per user
#[derive(Debug, Clone, Deserialize)]
pub struct InviteLink {
    pub link: String,
}

impl<T: Transport, B: TelegramBridge> ApiClient<T, B> {
    pub async fn get_me(&self) -> ApiResult<User> {
        self.fetch(ApiRequest::get("/users/me")).await
    }

    pub async fn get_balance(&self, seller_id: Uuid) -> ApiResult<SellerBalance> {
        self.fetch(ApiRequest::get(format!("/users/balance/{seller_id}")))
            .await
    }

    /// Top up or spend the seller listing-quota balance
    pub async fn update_balance(&self, seller_id: Uuid, balance: i64) -> ApiResult<SellerBalance> {
        self.fetch(ApiRequest::patch_json(
            format!("/users/balance/{seller_id}"),
            json!({ "balance": balance }),
        ))
        .await
    }

    pub async fn get_invite_link(&self) -> ApiResult<InviteLink> {
        self.fetch(ApiRequest::get("/users/invite")).await
    }

    /// The buyer's own orders; cancelled orders are excluded server-side
    pub async fn get_my_orders(&self) -> ApiResult<Vec<Order>> {
        self.fetch(ApiRequest::get("/users/orders")).await
    }

    /// Flattened evidence projection for one order
    pub async fn get_order_report(&self, order_id: Uuid) -> ApiResult<OrderReport> {
        self.fetch(ApiRequest::get(format!("/users/orders/report/{order_id}")))
            .await
    }

    /// All buyback reports for a seller's listings
    pub async fn get_seller_reports(&self, seller_id: Uuid) -> ApiResult<Vec<Order>> {
        self.fetch(ApiRequest::get(format!("/users/orders/reports/{seller_id}")))
            .await
    }

    /// Look a seller nickname up in the blacklist; absence is not an error
    pub async fn get_blacklist_entry(
        &self,
        nickname: &str,
    ) -> ApiResult<Option<BlacklistEntry>> {
        self.fetch_optional(ApiRequest::get(format!("/blacklist/{nickname}")))
            .await
    }
}
