
pub use message_builder::{game, hand, robots, MessageBuilder};
pub use test_client::{connected_client, deliver, pump};
pub use test_server::TestServer;

/// Route `log` output through the test harness; safe to call from every test
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
