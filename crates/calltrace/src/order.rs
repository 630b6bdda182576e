//! Demo order flow: a service calling a repository, both traced.
//!
//! The repository rejects the magic item id "ex" and otherwise sleeps to
//! simulate storage latency, so the emitted completion lines carry a
//! realistic elapsed time.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use calltrace_core::{TraceContext, Tracer};

/// Errors from the demo order flow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The repository rejected the item.
    #[error("invalid item id: {0}")]
    InvalidItem(String),
}

/// Orders items by saving them through the repository.
pub struct OrderService {
    tracer: Tracer,
    repository: OrderRepository,
}

impl OrderService {
    pub fn new(tracer: Tracer, save_delay_ms: u64) -> Self {
        Self {
            tracer: tracer.clone(),
            repository: OrderRepository {
                tracer,
                save_delay_ms,
            },
        }
    }

    /// Place an order for `item_id`, tracing the whole call chain.
    ///
    /// A failure in the repository is reported on the trace and then
    /// propagated to the caller unchanged.
    pub fn order(&self, item_id: &str) -> Result<(), OrderError> {
        self.tracer.scoped("OrderService.order_item", |ctx| {
            self.repository.save(ctx, item_id)
        })
    }
}

/// Saves ordered items, simulating storage latency.
struct OrderRepository {
    tracer: Tracer,
    save_delay_ms: u64,
}

impl OrderRepository {
    fn save(&self, parent: &TraceContext, item_id: &str) -> Result<(), OrderError> {
        self.tracer
            .scoped_child(parent, "OrderRepository.save", |_ctx| {
                if item_id == "ex" {
                    return Err(OrderError::InvalidItem(item_id.to_string()));
                }
                thread::sleep(Duration::from_millis(self.save_delay_ms));
                Ok(())
            })
    }
}
