use crate::api::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Uniform result of every API call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T = Value> {
    /// `true` iff `status` is in `200..=299`
    pub success: bool,
    pub status: u16,
    /// Parsed body when the response was JSON, `None` otherwise
    pub data: Option<T>,
    /// Server-supplied reason for an unsuccessful response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<Value> {
    /// Build the envelope from a raw status, content type and body
    pub fn from_parts(status: u16, content_type: Option<&str>, body: &[u8]) -> Result<Self, ApiError> {
        let success = is_success(status);

        let data = if content_type.map(is_json_content_type).unwrap_or(false) {
            if body.iter().all(u8::is_ascii_whitespace) {
                None
            } else {
                let value = serde_json::from_slice::<Value>(body)
                    .map_err(|source| ApiError::Decode { status, source })?;
                Some(value)
            }
        } else {
            None
        };

        let message = if success {
            None
        } else {
            data.as_ref().and_then(extract_message)
        };

        Ok(Self {
            success,
            status,
            data,
            message,
        })
    }

    /// Deserialize `data` into `T`
    ///
    /// Unsuccessful responses keep their `message` but carry no data, since
    /// error bodies do not share the resource's shape.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        let data = match (self.success, self.data) {
            (true, Some(value)) => Some(
                serde_json::from_value(value).map_err(|source| ApiError::Decode {
                    status: self.status,
                    source,
                })?,
            ),
            _ => None,
        };

        Ok(ApiResponse {
            success: self.success,
            status: self.status,
            data,
            message: self.message,
        })
    }
}

impl<T> ApiResponse<T> {
    /// Transform the payload, keeping status metadata
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            status: self.status,
            data: self.data.map(f),
            message: self.message,
        }
    }

    /// Successful payload, if any
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Message suitable for showing to a user
    pub fn error_text(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("request failed with status {}", self.status))
    }
}

pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// `application/json` and structured `+json` media types
pub fn is_json_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type == "application/json" || media_type.ends_with("+json")
}

fn extract_message(body: &Value) -> Option<String> {
    match body.get("message") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Array(messages)) => {
            let joined = messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => body.get("error").and_then(Value::as_str).map(str::to_string),
    }
}
