pub mod http;

pub use http::{HTTP_REQUEST, HttpConfig, HttpRequestTool};
