mod channel;
mod event_types;
mod hooks;

pub use channel::{EventChannel, EventProducer, Handler};
pub use event_types::*;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
