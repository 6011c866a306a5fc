#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod pages;
pub mod router;
pub mod storage;

pub use app::App;
