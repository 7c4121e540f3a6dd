//! Push notification entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-authored in-app notification with optional image and button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Push {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for the one-shot "activate to selected users" operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushActivation {
    pub user_ids: Vec<Uuid>,
}
