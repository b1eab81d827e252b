use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    #[default]
    Account,
    Mobile,
    Qrcode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_token: Option<String>,
    pub login_type: LoginType,
    #[serde(default)]
    pub remember: bool,
}

impl LoginRequest {
    pub fn account(username: impl Into<String>, password: impl Into<String>, remember: bool) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            login_type: LoginType::Account,
            remember,
            ..Default::default()
        }
    }

    pub fn mobile(mobile: impl Into<String>, code: impl Into<String>, remember: bool) -> Self {
        Self {
            mobile: Some(mobile.into()),
            verification_code: Some(code.into()),
            login_type: LoginType::Mobile,
            remember,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub dynamic_routes_list: Vec<String>,
    pub avatar: String,
    pub status: String,
    pub last_login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub qr_url: String,
    pub qr_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrWaitState {
    Pending,
    Expired,
}

/// Result of polling a QR login token.
///
/// The server answers either with a full login payload once the code is
/// scanned and confirmed, or with `{ "status": "pending" | "expired" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QrCodeStatus {
    Confirmed(LoginResponse),
    Waiting { status: QrWaitState },
}

impl QrCodeStatus {
    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            QrCodeStatus::Waiting {
                status: QrWaitState::Expired
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPurpose {
    Login,
    Register,
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub mobile: String,
    #[serde(rename = "type")]
    pub purpose: VerificationPurpose,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationCodeData {
    pub verify_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub mobile: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub mobile: String,
    pub verification_code: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_uses_camel_case_and_skips_empty_fields() {
        let req = LoginRequest::mobile("13800000000", "123456", false);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["loginType"], "mobile");
        assert_eq!(value["verificationCode"], "123456");
        assert!(value.get("username").is_none());
        assert_eq!(value["remember"], false);
    }

    #[test]
    fn qr_status_decodes_pending_and_expired() {
        let pending: QrCodeStatus = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(
            pending,
            QrCodeStatus::Waiting {
                status: QrWaitState::Pending
            }
        );
        let expired: QrCodeStatus = serde_json::from_str(r#"{"status":"expired"}"#).unwrap();
        assert!(expired.is_expired());
    }

    #[test]
    fn qr_status_decodes_confirmed_login() {
        let raw = r#"{"token":"t-1","user":{"id":"1","username":"admin","roles":["admin"]}}"#;
        let status: QrCodeStatus = serde_json::from_str(raw).unwrap();
        match status {
            QrCodeStatus::Confirmed(resp) => {
                assert_eq!(resp.token, "t-1");
                assert_eq!(resp.user.roles, vec!["admin".to_string()]);
                assert!(resp.user.email.is_empty());
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn send_code_request_renames_purpose_to_type() {
        let req = SendCodeRequest {
            mobile: "13800000000".into(),
            purpose: VerificationPurpose::Reset,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "reset");
    }
}
