use serde::Serialize;

/// JSON envelope wrapping every bookmark API response.
#[derive(Debug, Serialize)]
pub struct APIResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T> APIResponse<T> {
    pub fn ok(data: T) -> Self {
        APIResponse {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            details: None,
        }
    }
}

impl APIResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        APIResponse {
            success: true,
            data: None,
            error: None,
            message: Some(msg.to_owned()),
            details: None,
        }
    }

    pub fn new_from_error(err: &str) -> Self {
        APIResponse {
            success: false,
            data: None,
            error: Some(err.to_owned()),
            message: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_owned());
        self
    }

    pub fn with_message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_owned());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
