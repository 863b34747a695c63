pub mod client_message;
pub mod constants;
pub mod server_message;
