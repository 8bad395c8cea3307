use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventChannel, EventProducer, Handler, OrderConfirmedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_confirmed_producer: Vec<EventProducer<OrderConfirmedEvent>>,
}

pub struct EventHandlers {
    pub on_order_confirmed: Option<EventChannel<OrderConfirmedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_order_confirmed = hooks.on_order_confirmed.map(|f| EventChannel::new(buffer_size, f));
        Self { on_order_confirmed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(channel) = &self.on_order_confirmed {
            result.order_confirmed_producer.push(channel.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(channel) = self.on_order_confirmed {
            tokio::spawn(async move {
                channel.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_confirmed: Option<Handler<OrderConfirmedEvent>>,
}

impl EventHooks {
    pub fn on_order_confirmed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderConfirmedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_confirmed = Some(Arc::new(f));
        self
    }
}
