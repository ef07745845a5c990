pub mod email;
pub mod keep_alive;
pub mod serve;
