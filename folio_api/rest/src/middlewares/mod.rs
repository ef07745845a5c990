pub mod cors;
pub mod panic_handler;
pub mod request_id;
pub mod timeout;
pub mod trace;
