pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod http;
pub mod icons;
pub mod notify;
pub mod storage;
pub mod validation;
