//! Inbound back-channel logout notifications.
//!
//! Identity providers post the logout token either form-encoded
//! (`logout_token=<JWT>`) or as JSON (`{"logout_token": "<JWT>"}`).

use serde::Deserialize;

use super::DecodeError;

/// Wire encoding of a logout notification body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Form,
    Json,
}

impl BodyEncoding {
    /// Picks the encoding from a `Content-Type` header value.
    ///
    /// Anything that is not `application/json` (or a `+json` suffix type)
    /// is treated as form data.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some("application/json") => BodyEncoding::Json,
            Some(ct) if ct.starts_with("application/") && ct.ends_with("+json") => {
                BodyEncoding::Json
            }
            _ => BodyEncoding::Form,
        }
    }
}

/// Deployment-level choice of accepted body encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Negotiate from the request's `Content-Type`.
    #[default]
    Auto,
    Form,
    Json,
}

impl BodyFormat {
    pub fn resolve(&self, content_type: Option<&str>) -> BodyEncoding {
        match self {
            BodyFormat::Auto => BodyEncoding::from_content_type(content_type),
            BodyFormat::Form => BodyEncoding::Form,
            BodyFormat::Json => BodyEncoding::Json,
        }
    }
}

#[derive(Deserialize)]
struct JsonNotification {
    logout_token: String,
}

/// A parsed logout notification carrying exactly one logout token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutNotification {
    logout_token: String,
}

impl LogoutNotification {
    /// Extracts the logout token from a raw request body.
    ///
    /// # Errors
    ///
    /// `MalformedBody` if the body is not valid for `encoding` or carries no
    /// `logout_token` value.
    pub fn parse(body: &[u8], encoding: BodyEncoding) -> Result<Self, DecodeError> {
        let logout_token = match encoding {
            BodyEncoding::Form => parse_form(body)?,
            BodyEncoding::Json => parse_json(body)?,
        };
        Ok(Self { logout_token })
    }

    pub fn logout_token(&self) -> &str {
        &self.logout_token
    }
}

fn parse_form(body: &[u8]) -> Result<String, DecodeError> {
    let body = std::str::from_utf8(body)
        .map_err(|_| DecodeError::malformed_body("form body is not valid UTF-8"))?;

    // Value of the second `=`-separated field, cut at the next pair separator.
    let value = body
        .split('=')
        .nth(1)
        .ok_or_else(|| DecodeError::malformed_body("expected logout_token=<JWT>"))?;
    let value = value.split('&').next().unwrap_or(value);

    Ok(value.trim().to_string())
}

fn parse_json(body: &[u8]) -> Result<String, DecodeError> {
    serde_json::from_slice::<JsonNotification>(body)
        .map(|n| n.logout_token)
        .map_err(|e| DecodeError::malformed_body(format!("invalid JSON body: {e}")))
}
