pub mod http;
pub mod ping;
