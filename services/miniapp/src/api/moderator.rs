//! Moderator namespace: user administration, product review, push CRUD

use common::error::ApiResult;
use serde_json::json;
use uuid::Uuid;

use crate::models::{Product, ProductStatus, Push, PushActivation, User};
use crate::telegram::TelegramBridge;

use super::{ApiClient, ApiRequest, FormData, Transport, UserFilters};

impl<T: Transport, B: TelegramBridge> ApiClient<T, B> {
    pub async fn moderator_list_users(&self, filters: &UserFilters) -> ApiResult<Vec<User>> {
        let mut request = ApiRequest::get("/moderator/users");
        if let Some(search) = &filters.search {
            request = request.with_query("search", search);
        }
        if let Some(role) = filters.role {
            request = request.with_query("role", role.as_str());
        }
        if let Some(banned) = filters.banned {
            request = request.with_query("banned", banned.to_string());
        }
        self.fetch(request).await
    }

    pub async fn moderator_ban_user(&self, user_id: Uuid) -> ApiResult<User> {
        self.user_action(user_id, "ban").await
    }

    pub async fn moderator_unban_user(&self, user_id: Uuid) -> ApiResult<User> {
        self.user_action(user_id, "unban").await
    }

    pub async fn moderator_promote_user(&self, user_id: Uuid) -> ApiResult<User> {
        self.user_action(user_id, "promote").await
    }

    pub async fn moderator_demote_user(&self, user_id: Uuid) -> ApiResult<User> {
        self.user_action(user_id, "demote").await
    }

    pub async fn moderator_use_discount(&self, user_id: Uuid) -> ApiResult<User> {
        self.user_action(user_id, "use-discount").await
    }

    async fn user_action(&self, user_id: Uuid, action: &str) -> ApiResult<User> {
        self.fetch(ApiRequest::new(
            super::Method::Post,
            format!("/moderator/users/{user_id}/{action}"),
        ))
        .await
    }

    /// Listings awaiting moderation, optionally filtered by status
    pub async fn moderator_list_products(
        &self,
        status: Option<ProductStatus>,
    ) -> ApiResult<Vec<Product>> {
        let mut request = ApiRequest::get("/moderator/products");
        if let Some(status) = status {
            request = request.with_query("status", status.as_str());
        }
        self.fetch(request).await
    }

    /// Moderation verdict on a listing
    pub async fn moderator_review_product(
        &self,
        product_id: Uuid,
        status: ProductStatus,
        comment: &str,
    ) -> ApiResult<Product> {
        self.fetch(ApiRequest::patch_json(
            format!("/moderator/products/{product_id}"),
            json!({ "status": status, "comment": comment }),
        ))
        .await
    }

    pub async fn moderator_list_pushes(&self) -> ApiResult<Vec<Push>> {
        self.fetch(ApiRequest::get("/moderator/pushes")).await
    }

    pub async fn moderator_get_push(&self, push_id: Uuid) -> ApiResult<Push> {
        self.fetch(ApiRequest::get(format!("/moderator/pushes/{push_id}")))
            .await
    }

    /// Create a push; the form carries title/text and the optional image
    pub async fn moderator_create_push(&self, form: FormData) -> ApiResult<Push> {
        self.fetch(ApiRequest::post_multipart("/moderator/pushes", form))
            .await
    }

    pub async fn moderator_update_push(&self, push_id: Uuid, form: FormData) -> ApiResult<Push> {
        self.fetch(ApiRequest::patch_multipart(
            format!("/moderator/pushes/{push_id}"),
            form,
        ))
        .await
    }

    pub async fn moderator_delete_push(&self, push_id: Uuid) -> ApiResult<()> {
        self.execute(ApiRequest::delete(format!("/moderator/pushes/{push_id}")))
            .await?;
        Ok(())
    }

    /// One-shot activation to the selected users
    pub async fn moderator_activate_push(
        &self,
        push_id: Uuid,
        activation: &PushActivation,
    ) -> ApiResult<()> {
        self.execute(ApiRequest::post_json(
            format!("/moderator/pushes/{push_id}/activate"),
            serde_json::to_value(activation)
                .map_err(|e| common::error::ApiError::Decode(e.to_string()))?,
        ))
        .await?;
        Ok(())
    }
}
