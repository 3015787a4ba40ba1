mod dispatch;
pub mod payload;

pub use dispatch::process_event;
