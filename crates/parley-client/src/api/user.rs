use parley_types::{
    LoginResponse, PasswordLoginRequest, RegisterRequest, ResetPasswordRequest, UpdateUserInfo,
    UserInfo,
};
use serde_json::Value;

use super::ApiCall;
use crate::request::{add_cancel_token, HttpClient, RequestConfig};

pub const REGISTER_CODE_PATH: &str = "/user/register_code";
pub const RESET_CODE_PATH: &str = "/user/reset_code";
pub const REGISTER_PATH: &str = "/user/register";
pub const PASSWORD_LOGIN_PATH: &str = "/user/password_login";
pub const RESET_PASSWORD_PATH: &str = "/user/reset_password";
pub const USER_INFO_PATH: &str = "/user/info";

/// Sends a registration verification code to `phone`.
pub fn get_register_code(client: &HttpClient, phone: &str) -> ApiCall<Value> {
    let mut config = RequestConfig::new().param("phone", phone);
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.get(REGISTER_CODE_PATH, config),
        source,
    }
}

/// Sends a password-reset verification code to `phone`.
pub fn get_reset_code(client: &HttpClient, phone: &str) -> ApiCall<Value> {
    let mut config = RequestConfig::new().param("phone", phone);
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.get(RESET_CODE_PATH, config),
        source,
    }
}

pub fn register(client: &HttpClient, payload: &RegisterRequest) -> ApiCall<Value> {
    let mut config = RequestConfig::new();
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.post(REGISTER_PATH, payload, config),
        source,
    }
}

pub fn password_login(client: &HttpClient, payload: &PasswordLoginRequest) -> ApiCall<LoginResponse> {
    let mut config = RequestConfig::new();
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.post(PASSWORD_LOGIN_PATH, payload, config),
        source,
    }
}

pub fn reset_password(client: &HttpClient, payload: &ResetPasswordRequest) -> ApiCall<Value> {
    let mut config = RequestConfig::new();
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.post(RESET_PASSWORD_PATH, payload, config),
        source,
    }
}

pub fn get_user_info(client: &HttpClient) -> ApiCall<UserInfo> {
    let mut config = RequestConfig::new();
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.get(USER_INFO_PATH, config),
        source,
    }
}

pub fn update_user_info(client: &HttpClient, payload: &UpdateUserInfo) -> ApiCall<Value> {
    let mut config = RequestConfig::new();
    let source = add_cancel_token(&mut config);

    ApiCall {
        request: client.put(USER_INFO_PATH, payload, config),
        source,
    }
}
