//! Order endpoints

use common::error::ApiResult;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

use super::{ApiClient, ApiRequest, FormData, Transport};
use crate::telegram::TelegramBridge;

impl<T: Transport, B: TelegramBridge> ApiClient<T, B> {
    /// Create an order together with the first two screenshots (step 1)
    pub async fn create_order(&self, form: FormData) -> ApiResult<Order> {
        self.fetch(ApiRequest::post_multipart("/orders", form)).await
    }

    /// Partial update: new step number plus the fields collected on it
    pub async fn update_order(&self, order_id: Uuid, form: FormData) -> ApiResult<Order> {
        self.fetch(ApiRequest::patch_multipart(format!("/orders/{order_id}"), form))
            .await
    }

    /// Status mutation (cancellation, payment confirmation)
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> ApiResult<Order> {
        let form = FormData::new().text("status", status.as_str());
        self.fetch(ApiRequest::patch_multipart(
            format!("/orders/status/{order_id}"),
            form,
        ))
        .await
    }

    pub async fn get_order(&self, order_id: Uuid) -> ApiResult<Order> {
        self.fetch(ApiRequest::get(format!("/orders/{order_id}"))).await
    }
}
