//! HTTP transport used by the service layer.
//!
//! Services talk JSON to a [`Transport`]; the browser implementation is
//! [`GlooTransport`]. The server wraps payloads in a `{code, data, message}`
//! envelope which is removed here, so services only see `data`.

use async_trait::async_trait;
use contracts::system::ApiResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::shared::api_utils::api_url;
use crate::shared::error::{ApiError, ApiResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[async_trait(?Send)]
pub trait Transport {
    /// Perform one request and return the unwrapped response payload.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> ApiResult<Value>;
}

/// Typed wrapper over [`Transport::request`].
pub async fn send_json<T, B, R>(
    transport: &T,
    method: Method,
    path: &str,
    body: Option<&B>,
    bearer: Option<String>,
) -> ApiResult<R>
where
    T: Transport + ?Sized,
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let body = match body {
        Some(b) => Some(serde_json::to_value(b).map_err(|e| ApiError::Encode(e.to_string()))?),
        None => None,
    };
    let value = transport.request(method, path, body, bearer).await?;
    Ok(serde_json::from_value(value)?)
}

/// Strip the `{code, data, message}` envelope if the body has one.
///
/// Bodies without a numeric `code` are passed through untouched.
pub fn unwrap_envelope(body: Value) -> ApiResult<Value> {
    let is_envelope = body.get("code").is_some_and(Value::is_i64)
        && (body.get("data").is_some() || body.get("message").is_some());
    if !is_envelope {
        return Ok(body);
    }
    let envelope: ApiResponse<Value> = serde_json::from_value(body)?;
    if envelope.is_success() {
        Ok(envelope.data)
    } else {
        Err(ApiError::Rejected {
            code: envelope.code,
            message: envelope.message,
        })
    }
}

/// Browser transport backed by `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl GlooTransport {
    fn builder(method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let url = api_url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        match bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read(response: Response) -> ApiResult<Value> {
        let status = response.status();
        let text = response.text().await?;
        if !response.ok() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(ApiError::Status { status, message });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        unwrap_envelope(serde_json::from_str(&text)?)
    }

    /// Multipart upload of a single file field.
    pub async fn upload(
        &self,
        path: &str,
        field: &str,
        file: &web_sys::File,
        bearer: Option<String>,
    ) -> ApiResult<Value> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Encode(format!("{:?}", e)))?;
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(|e| ApiError::Encode(format!("{:?}", e)))?;
        let response = Self::builder(Method::Post, path, bearer.as_deref())
            .body(form)?
            .send()
            .await?;
        Self::read(response).await
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> ApiResult<Value> {
        let builder = Self::builder(method, path, bearer.as_deref());
        let response = match body {
            Some(body) => builder.json(&body)?.send().await?,
            None => builder.send().await?,
        };
        Self::read(response).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_success_yields_data() {
        let body = json!({"code": 0, "data": {"token": "x"}, "message": "ok"});
        assert_eq!(unwrap_envelope(body).unwrap(), json!({"token": "x"}));

        let body = json!({"code": 200, "message": "done"});
        assert_eq!(unwrap_envelope(body).unwrap(), Value::Null);
    }

    #[test]
    fn envelope_failure_is_rejected() {
        let body = json!({"code": 40101, "data": null, "message": "bad credentials"});
        assert_eq!(
            unwrap_envelope(body),
            Err(ApiError::Rejected {
                code: 40101,
                message: "bad credentials".into()
            })
        );
    }

    #[test]
    fn bare_payload_passes_through() {
        let body = json!({"qrUrl": "https://x", "qrToken": "q1"});
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);

        // `code` alone is a domain field, not an envelope
        let body = json!({"code": 7});
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }
}
