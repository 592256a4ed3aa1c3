use crate::orders::{Direction, OrderType, Price, Quantity, Ref};
use crate::trade::ExecutionReport;

/// A pure sink for the three event kinds a book can emit.
///
/// All calls happen synchronously, inside the `submit` call that caused
/// them, in the order described by the matching algorithm. An observer
/// must not call back into the engine; reentrancy is undefined behavior.
pub trait Observer {
    fn on_submit(
        &mut self,
        order_ref: Ref,
        order_type: OrderType,
        direction: Direction,
        price: Price,
        quantity: Quantity,
    );
    fn on_trade(&mut self, report: &ExecutionReport);
    fn on_cancel(&mut self, order_ref: Ref, quantity: Quantity);
}

/// An observer that discards every event. Useful for tests that only care
/// about book state, not the event stream.
#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_submit(
        &mut self,
        _order_ref: Ref,
        _order_type: OrderType,
        _direction: Direction,
        _price: Price,
        _quantity: Quantity,
    ) {
    }
    fn on_trade(&mut self, _report: &ExecutionReport) {}
    fn on_cancel(&mut self, _order_ref: Ref, _quantity: Quantity) {}
}

/// Tallies submits, trades, and cancels without printing anything; the
/// benchmark harness uses this to build its run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingObserver {
    pub submits: u64,
    pub trades: u64,
    pub cancels: u64,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for CountingObserver {
    fn on_submit(
        &mut self,
        _order_ref: Ref,
        _order_type: OrderType,
        _direction: Direction,
        _price: Price,
        _quantity: Quantity,
    ) {
        self.submits += 1;
    }

    fn on_trade(&mut self, _report: &ExecutionReport) {
        self.trades += 1;
    }

    fn on_cancel(&mut self, _order_ref: Ref, _quantity: Quantity) {
        self.cancels += 1;
    }
}

/// Wraps a [`CountingObserver`] and additionally emits a `tracing` event per
/// callback, the idiomatic-Rust counterpart of the original program's
/// verbose stdout monitor layered on top of its counting monitor.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pub counts: CountingObserver,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for TracingObserver {
    fn on_submit(
        &mut self,
        order_ref: Ref,
        order_type: OrderType,
        direction: Direction,
        price: Price,
        quantity: Quantity,
    ) {
        self.counts
            .on_submit(order_ref, order_type, direction, price, quantity);
        tracing::info!(
            order_ref,
            ?order_type,
            ?direction,
            price,
            quantity,
            "submit"
        );
    }

    fn on_trade(&mut self, report: &ExecutionReport) {
        self.counts.on_trade(report);
        tracing::info!(
            buyer_ref = report.buyer_ref,
            seller_ref = report.seller_ref,
            symbol = %report.symbol,
            price = report.price,
            quantity = report.quantity,
            "trade"
        );
    }

    fn on_cancel(&mut self, order_ref: Ref, quantity: Quantity) {
        self.counts.on_cancel(order_ref, quantity);
        tracing::info!(order_ref, quantity, "cancel");
    }
}
