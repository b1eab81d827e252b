use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub url: String,
}

/// A browser/session that has signed in with the current account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub ip: String,
    pub last_active: String,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    pub id: String,
    pub name: String,
    pub token_preview: String,
    pub created_at: String,
    #[serde(default)]
    pub last_used: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiTokenRequest {
    pub name: String,
}

/// Returned once on creation; `token` is never shown again afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedApiToken {
    pub token: String,
    #[serde(flatten)]
    pub meta: ApiToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    #[default]
    All,
    Important,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub security_alerts: bool,
    pub product_updates: bool,
    #[serde(default)]
    pub mode: NotificationMode,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            security_alerts: true,
            product_updates: false,
            mode: NotificationMode::All,
        }
    }
}
