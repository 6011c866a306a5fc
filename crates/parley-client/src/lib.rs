#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod request;

pub use api::ApiCall;
pub use config::ClientConfig;
pub use request::{
    add_cancel_token, CancelSource, HttpClient, HttpClientBuilder, RequestConfig, RequestError,
};
