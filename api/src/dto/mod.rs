//! Request and response bodies for the HTTP layer

pub mod verification;

pub use verification::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
