use serde::{Deserialize, Serialize};
use validator::Validate;

use sg_core::services::{DeliveryMethod, IssueCodeResult};

pub const CODE_VERIFIED_MESSAGE: &str = "Code verified successfully";

/// Body of `POST /api/send-verification-code`
///
/// Fields are optional so a missing phone number is answered with a
/// domain message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    /// Raw phone number, any formatting
    pub phone_number: Option<String>,

    /// Optional email, only used for log correlation
    #[validate(email)]
    pub user_email: Option<String>,
}

impl SendCodeRequest {
    /// Drop blank optional fields so validation only sees supplied values
    pub fn normalized(mut self) -> Self {
        if non_blank(&self.user_email).is_none() {
            self.user_email = None;
        }
        self
    }

    /// Phone number with blank values treated as missing
    pub fn phone(&self) -> Option<&str> {
        non_blank(&self.phone_number)
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.user_email)
    }
}

/// Body of `POST /api/verify-code`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub phone_number: Option<String>,
    pub code: Option<String>,
}

impl VerifyCodeRequest {
    /// Both fields, or `None` when either is missing or blank
    pub fn fields(&self) -> Option<(&str, &str)> {
        Some((non_blank(&self.phone_number)?, non_blank(&self.code)?))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub success: bool,
    pub method: DeliveryMethod,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_message: Option<String>,
}

impl From<IssueCodeResult> for SendCodeResponse {
    fn from(result: IssueCodeResult) -> Self {
        Self {
            success: true,
            method: result.method,
            phone_number: result.destination,
            verification_code: result.code,
            message_sid: result.provider_reference,
            status: result.provider_status,
            message: result.message,
            demo_message: result.demo_message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub verified: bool,
    pub message: String,
}

impl VerifyCodeResponse {
    pub fn verified() -> Self {
        Self {
            success: true,
            verified: true,
            message: CODE_VERIFIED_MESSAGE.to_string(),
        }
    }
}
