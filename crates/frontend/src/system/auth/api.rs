//! Authentication calls and token custody.
//!
//! The token lives in local storage when the user asked to be remembered and
//! in session storage otherwise. Reads look at local storage first.

use std::sync::Arc;

use contracts::system::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, QrCodeResponse, QrCodeStatus,
    RegisterRequest, ResetPasswordRequest, SendCodeRequest, UserInfo, VerificationCodeData,
    VerificationPurpose,
};
use serde_json::Value;

use crate::shared::api_utils::qr_check_path;
use crate::shared::error::ApiResult;
use crate::shared::http::{send_json, GlooTransport, Method, Transport};
use crate::shared::storage::{BrowserStorage, KeyValueStore};

pub const TOKEN_KEY: &str = "token";

const LOGIN: &str = "/api/auth/login";
const LOGOUT: &str = "/api/auth/logout";
const CURRENT_USER: &str = "/api/auth/me";
const SEND_CODE: &str = "/api/auth/send-code";
const QR_CODE: &str = "/api/auth/qrcode";
const CHANGE_PASSWORD: &str = "/api/auth/change-password";
const REGISTER: &str = "/api/auth/register";
const RESET_PASSWORD: &str = "/api/auth/reset-password";

#[derive(Clone)]
pub struct AuthService<T> {
    transport: T,
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

pub type BrowserAuthService = AuthService<GlooTransport>;

impl BrowserAuthService {
    pub fn browser() -> Self {
        AuthService::new(
            GlooTransport,
            Arc::new(BrowserStorage::local()),
            Arc::new(BrowserStorage::session()),
        )
    }
}

impl<T: Transport> AuthService<T> {
    pub fn new(transport: T, local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            transport,
            local,
            session,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get_token(&self) -> Option<String> {
        self.local
            .get(TOKEN_KEY)
            .or_else(|| self.session.get(TOKEN_KEY))
            .filter(|t| !t.is_empty())
    }

    /// Token presence only; validity is the server's call.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    fn store_token(&self, token: &str, remember: bool) {
        // a stale token in the other store would shadow or outlive this one
        self.clear_token();
        if remember {
            self.local.set(TOKEN_KEY, token);
        } else {
            self.session.set(TOKEN_KEY, token);
        }
    }

    pub fn clear_token(&self) {
        self.local.remove(TOKEN_KEY);
        self.session.remove(TOKEN_KEY);
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let response: LoginResponse =
            send_json(&self.transport, Method::Post, LOGIN, Some(request), None).await?;
        self.store_token(&response.token, request.remember);
        log::info!("login succeeded for {}", response.user.username);
        Ok(response)
    }

    /// Tell the server, then forget the token whatever it answered.
    pub async fn logout(&self) {
        let bearer = self.get_token();
        if bearer.is_some() {
            let result: ApiResult<Value> =
                send_json::<_, Value, _>(&self.transport, Method::Post, LOGOUT, None, bearer).await;
            if let Err(e) = result {
                log::warn!("logout request failed: {}", e);
            }
        }
        self.clear_token();
    }

    pub async fn get_current_user(&self) -> ApiResult<UserInfo> {
        send_json::<_, Value, _>(
            &self.transport,
            Method::Get,
            CURRENT_USER,
            None,
            self.get_token(),
        )
        .await
    }

    pub async fn send_verification_code(
        &self,
        mobile: &str,
        purpose: VerificationPurpose,
    ) -> ApiResult<VerificationCodeData> {
        let request = SendCodeRequest {
            mobile: mobile.to_string(),
            purpose,
        };
        let data: Option<VerificationCodeData> =
            send_json(&self.transport, Method::Post, SEND_CODE, Some(&request), None).await?;
        Ok(data.unwrap_or_default())
    }

    pub async fn get_qr_code(&self) -> ApiResult<QrCodeResponse> {
        send_json::<_, Value, _>(&self.transport, Method::Get, QR_CODE, None, None).await
    }

    /// Poll a QR token. A confirmed login stores the token like [`Self::login`].
    pub async fn check_qr_code_status(&self, qr_token: &str, remember: bool) -> ApiResult<QrCodeStatus> {
        let status: QrCodeStatus = send_json::<_, Value, _>(
            &self.transport,
            Method::Get,
            &qr_check_path(qr_token),
            None,
            None,
        )
        .await?;
        if let QrCodeStatus::Confirmed(response) = &status {
            self.store_token(&response.token, remember);
            log::info!("qr login confirmed for {}", response.user.username);
        }
        Ok(status)
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let _: Value = send_json(
            &self.transport,
            Method::Post,
            CHANGE_PASSWORD,
            Some(&request),
            self.get_token(),
        )
        .await?;
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let _: Value = send_json(&self.transport, Method::Post, REGISTER, Some(request), None).await?;
        log::info!("registered {}", request.username);
        Ok(())
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()> {
        let _: Value =
            send_json(&self.transport, Method::Post, RESET_PASSWORD, Some(request), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ApiError;
    use crate::shared::http::testing::MockTransport;
    use crate::shared::storage::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;

    struct Fixture {
        local: Arc<MemoryStorage>,
        session: Arc<MemoryStorage>,
        service: AuthService<MockTransport>,
    }

    fn fixture() -> Fixture {
        let local = Arc::new(MemoryStorage::new());
        let session = Arc::new(MemoryStorage::new());
        let service = AuthService::new(MockTransport::new(), local.clone(), session.clone());
        Fixture {
            local,
            session,
            service,
        }
    }

    fn login_body(token: &str) -> Value {
        json!({"token": token, "user": {"id": "1", "username": "admin", "roles": ["admin"]}})
    }

    #[test]
    fn remembered_login_goes_to_local_storage() {
        let f = fixture();
        f.service.transport().respond(LOGIN, Ok(login_body("abc")));

        let resp = block_on(f.service.login(&LoginRequest::account("admin", "pw", true))).unwrap();

        assert_eq!(resp.token, "abc");
        assert_eq!(f.local.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(f.session.get(TOKEN_KEY), None);
        assert!(f.service.is_authenticated());

        let call = &f.service.transport().calls()[0];
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.body.as_ref().unwrap()["loginType"], "account");
    }

    #[test]
    fn session_login_goes_to_session_storage() {
        let f = fixture();
        f.service.transport().respond(LOGIN, Ok(login_body("xyz")));

        block_on(f.service.login(&LoginRequest::account("admin", "pw", false))).unwrap();

        assert_eq!(f.local.get(TOKEN_KEY), None);
        assert_eq!(f.session.get(TOKEN_KEY).as_deref(), Some("xyz"));
        assert_eq!(f.service.get_token().as_deref(), Some("xyz"));
    }

    #[test]
    fn failed_login_stores_nothing() {
        let f = fixture();
        f.service.transport().respond(
            LOGIN,
            Err(ApiError::Rejected {
                code: 401,
                message: "bad credentials".into(),
            }),
        );

        let err = block_on(f.service.login(&LoginRequest::account("admin", "nope", true))).unwrap_err();

        assert!(matches!(err, ApiError::Rejected { code: 401, .. }));
        assert!(!f.service.is_authenticated());
    }

    #[test]
    fn logout_clears_both_stores_even_when_server_fails() {
        let f = fixture();
        f.local.set(TOKEN_KEY, "a");
        f.session.set(TOKEN_KEY, "b");
        f.service
            .transport()
            .respond(LOGOUT, Err(ApiError::Network("offline".into())));

        block_on(f.service.logout());

        assert!(f.local.is_empty());
        assert!(f.session.is_empty());
        let calls = f.service.transport().calls();
        assert_eq!(calls[0].bearer.as_deref(), Some("a"));
    }

    #[test]
    fn logout_without_token_skips_the_server() {
        let f = fixture();
        block_on(f.service.logout());
        assert!(f.service.transport().calls().is_empty());
    }

    #[test]
    fn local_token_wins_over_session_token() {
        let f = fixture();
        f.session.set(TOKEN_KEY, "session");
        assert_eq!(f.service.get_token().as_deref(), Some("session"));
        f.local.set(TOKEN_KEY, "local");
        assert_eq!(f.service.get_token().as_deref(), Some("local"));
    }

    #[test]
    fn current_user_carries_bearer() {
        let f = fixture();
        f.local.set(TOKEN_KEY, "tok");
        f.service
            .transport()
            .respond(CURRENT_USER, Ok(json!({"id": "7", "username": "ops"})));

        let user = block_on(f.service.get_current_user()).unwrap();

        assert_eq!(user.username, "ops");
        assert_eq!(f.service.transport().calls()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn qr_confirmation_stores_token_per_remember_flag() {
        let f = fixture();
        let path = qr_check_path("q-1");
        f.service
            .transport()
            .respond(&path, Ok(json!({"status": "pending"})))
            .respond(&path, Ok(login_body("qr-token")));

        let first = block_on(f.service.check_qr_code_status("q-1", false)).unwrap();
        assert!(matches!(first, QrCodeStatus::Waiting { .. }));
        assert!(!f.service.is_authenticated());

        let second = block_on(f.service.check_qr_code_status("q-1", false)).unwrap();
        assert!(matches!(second, QrCodeStatus::Confirmed(_)));
        assert_eq!(f.session.get(TOKEN_KEY).as_deref(), Some("qr-token"));
        assert_eq!(f.local.get(TOKEN_KEY), None);
    }

    #[test]
    fn send_code_tolerates_empty_payload() {
        let f = fixture();
        f.service.transport().respond(SEND_CODE, Ok(Value::Null));

        let data = block_on(
            f.service
                .send_verification_code("13800000000", VerificationPurpose::Register),
        )
        .unwrap();

        assert!(data.verify_code.is_empty());
        let body = f.service.transport().calls()[0].body.clone().unwrap();
        assert_eq!(body, json!({"mobile": "13800000000", "type": "register"}));
    }

    #[test]
    fn change_password_posts_both_passwords() {
        let f = fixture();
        f.local.set(TOKEN_KEY, "tok");
        f.service.transport().respond(CHANGE_PASSWORD, Ok(Value::Null));

        block_on(f.service.change_password("old", "new-secret")).unwrap();

        let call = &f.service.transport().calls()[0];
        assert_eq!(
            call.body,
            Some(json!({"oldPassword": "old", "newPassword": "new-secret"}))
        );
    }
}
