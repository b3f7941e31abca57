pub mod harness;
pub mod local_channel;

pub use harness::{init_logger, TestHarness};
pub use local_channel::{local_channel, LinkControl, LocalChannel, LocalInbox};
pub use test_renderer::{TestObject, TestRenderer};
