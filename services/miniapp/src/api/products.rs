//! Product endpoints

use common::error::ApiResult;
use uuid::Uuid;

use crate::models::{Product, ProductStatus};
use crate::telegram::TelegramBridge;

use super::{ApiClient, ApiRequest, FormData, Transport};

impl<T: Transport, B: TelegramBridge> ApiClient<T, B> {
    /// Active catalog listings
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.fetch(ApiRequest::get("/products")).await
    }

    pub async fn get_product(&self, product_id: Uuid) -> ApiResult<Product> {
        self.fetch(ApiRequest::get(format!("/products/{product_id}")))
            .await
    }

    /// Listings belonging to the authenticated seller
    pub async fn list_seller_products(&self) -> ApiResult<Vec<Product>> {
        self.fetch(ApiRequest::get("/products/seller")).await
    }

    /// Create a listing; the form carries the product fields and the image
    pub async fn create_product(&self, form: FormData) -> ApiResult<Product> {
        self.fetch(ApiRequest::post_multipart("/products", form)).await
    }

    pub async fn update_product(&self, product_id: Uuid, form: FormData) -> ApiResult<Product> {
        self.fetch(ApiRequest::patch_multipart(
            format!("/products/{product_id}"),
            form,
        ))
        .await
    }

    /// Status mutation (archive, republish, disable)
    pub async fn update_product_status(
        &self,
        product_id: Uuid,
        status: ProductStatus,
    ) -> ApiResult<Product> {
        let form = FormData::new().text("status", status.as_str());
        self.fetch(ApiRequest::patch_multipart(
            format!("/products/status/{product_id}"),
            form,
        ))
        .await
    }
}
