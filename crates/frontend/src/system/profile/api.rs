use contracts::system::auth::UserInfo;
use contracts::system::profile::{
    ApiToken, AvatarResponse, CreateApiTokenRequest, CreatedApiToken, Device, NotificationSettings,
    UpdateProfileRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::shared::error::ApiResult;
use crate::shared::http::{send_json, GlooTransport, Method, Transport};
use crate::system::auth::api::AuthService;

const PROFILE: &str = "/api/user/profile";
const AVATAR: &str = "/api/user/avatar";
const DEVICES: &str = "/api/user/devices";
const TOKENS: &str = "/api/user/tokens";
const NOTIFICATIONS: &str = "/api/user/notifications";

/// Account self-service calls made on behalf of the signed-in user.
#[derive(Clone)]
pub struct ProfileService<T> {
    auth: AuthService<T>,
}

impl<T: Transport> ProfileService<T> {
    pub fn new(auth: AuthService<T>) -> Self {
        Self { auth }
    }

    async fn call<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        send_json(self.auth.transport(), method, path, body, self.auth.get_token()).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<UserInfo> {
        self.call(Method::Put, PROFILE, Some(request)).await
    }

    pub async fn list_devices(&self) -> ApiResult<Vec<Device>> {
        let devices: Option<Vec<Device>> = self.call::<Value, _>(Method::Get, DEVICES, None).await?;
        Ok(devices.unwrap_or_default())
    }

    pub async fn revoke_device(&self, id: &str) -> ApiResult<()> {
        let path = format!("{}/{}", DEVICES, urlencoding::encode(id));
        let _: Value = self.call::<Value, _>(Method::Delete, &path, None).await?;
        Ok(())
    }

    pub async fn list_api_tokens(&self) -> ApiResult<Vec<ApiToken>> {
        let tokens: Option<Vec<ApiToken>> = self.call::<Value, _>(Method::Get, TOKENS, None).await?;
        Ok(tokens.unwrap_or_default())
    }

    pub async fn create_api_token(&self, name: &str) -> ApiResult<CreatedApiToken> {
        let request = CreateApiTokenRequest {
            name: name.trim().to_string(),
        };
        self.call(Method::Post, TOKENS, Some(&request)).await
    }

    pub async fn revoke_api_token(&self, id: &str) -> ApiResult<()> {
        let path = format!("{}/{}", TOKENS, urlencoding::encode(id));
        let _: Value = self.call::<Value, _>(Method::Delete, &path, None).await?;
        Ok(())
    }

    pub async fn get_notification_settings(&self) -> ApiResult<NotificationSettings> {
        let settings: Option<NotificationSettings> =
            self.call::<Value, _>(Method::Get, NOTIFICATIONS, None).await?;
        Ok(settings.unwrap_or_default())
    }

    pub async fn update_notification_settings(&self, settings: &NotificationSettings) -> ApiResult<()> {
        let _: Value = self.call(Method::Put, NOTIFICATIONS, Some(settings)).await?;
        Ok(())
    }
}

impl ProfileService<GlooTransport> {
    pub async fn upload_avatar(&self, file: &web_sys::File) -> ApiResult<AvatarResponse> {
        let value = self
            .auth
            .transport()
            .upload(AVATAR, "avatar", file, self.auth.get_token())
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
