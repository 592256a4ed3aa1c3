use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, trace};

use crate::instrument::Symbol;
use crate::observer::Observer;
use crate::orders::{Direction, Order, OrderType, Price};
use crate::trade::ExecutionReport;

/// All resting levels on one side of one instrument, ordered so the most
/// aggressive price comes first: descending for bids (`Call`), ascending
/// for asks (`Put`).
///
/// Backed by a [`BTreeMap`] keyed by price, the way the teacher crate's
/// `OrderBook` does — `BTreeMap`'s natural ascending order plus reverse
/// iteration covers both sides without a custom `Ord` on price.
#[derive(Debug, Default)]
pub struct HalfBook {
    direction: Direction,
    levels: BTreeMap<Price, VecDeque<Order>>,
}

impl HalfBook {
    fn new(direction: Direction) -> Self {
        HalfBook {
            direction,
            levels: BTreeMap::new(),
        }
    }

    /// The most aggressive resting price on this side, if any.
    pub fn best_price(&self) -> Option<Price> {
        match self.direction {
            Direction::Call => self.levels.keys().next_back().copied(),
            Direction::Put => self.levels.keys().next().copied(),
        }
    }

    fn best_level_mut(&mut self) -> Option<(Price, &mut VecDeque<Order>)> {
        match self.direction {
            Direction::Call => self.levels.iter_mut().next_back().map(|(&p, l)| (p, l)),
            Direction::Put => self.levels.iter_mut().next().map(|(&p, l)| (p, l)),
        }
    }

    fn rest(&mut self, order: Order) {
        self.levels.entry(order.price).or_default().push_back(order);
    }

    /// Number of distinct price levels currently resting. Exposed for tests
    /// and invariant checks, not used by the matching algorithm itself.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> impl Iterator<Item = (Price, &VecDeque<Order>)> {
        self.levels.iter().map(|(&p, l)| (p, l))
    }
}

/// The pair of half-books for one instrument, plus the matching algorithm.
pub struct InstrumentBook {
    symbol: Symbol,
    bids: HalfBook,
    asks: HalfBook,
}

impl InstrumentBook {
    pub fn new(symbol: Symbol) -> Self {
        InstrumentBook {
            symbol,
            bids: HalfBook::new(Direction::Call),
            asks: HalfBook::new(Direction::Put),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bids(&self) -> &HalfBook {
        &self.bids
    }

    pub fn asks(&self) -> &HalfBook {
        &self.asks
    }

    /// Best bid price, if the bid side is non-empty.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price, if the ask side is non-empty.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Matches `order` against resting liquidity and rests or cancels the
    /// residual, emitting events on `observer` in the order described by the
    /// matching algorithm. `order.id` must already be assigned by the
    /// dispatcher's [`crate::ids::RefAuthority`].
    pub fn submit(&mut self, mut order: Order, observer: &mut dyn Observer) {
        observer.on_submit(
            order.id,
            order.order_type,
            order.direction,
            order.price,
            order.remaining_quantity,
        );

        let (opposite, own_side) = match order.direction {
            Direction::Call => (&mut self.asks, &mut self.bids),
            Direction::Put => (&mut self.bids, &mut self.asks),
        };

        while order.remaining_quantity > 0 {
            let Some(best_price) = opposite.best_price() else {
                break;
            };
            if !order.marketable_against(best_price) {
                break;
            }

            let (level_price, level) = opposite.best_level_mut().expect("best_price just returned Some");
            let resting = level.front_mut().expect("non-empty level invariant");

            let fill = order.remaining_quantity.min(resting.remaining_quantity);
            order.remaining_quantity -= fill;
            resting.remaining_quantity -= fill;

            let (buyer_ref, seller_ref) = match order.direction {
                Direction::Call => (order.id, resting.id),
                Direction::Put => (resting.id, order.id),
            };
            trace!(buyer_ref, seller_ref, price = level_price, fill, "match");
            observer.on_trade(&ExecutionReport {
                buyer_ref,
                seller_ref,
                symbol: self.symbol.clone(),
                price: level_price,
                quantity: fill,
            });

            if resting.remaining_quantity == 0 {
                level.pop_front();
            }
            if level.is_empty() {
                opposite.levels.remove(&level_price);
            }
        }

        if order.remaining_quantity == 0 {
            return;
        }

        if order.order_type == OrderType::Market {
            debug!(order_ref = order.id, quantity = order.remaining_quantity, "cancel residual");
            observer.on_cancel(order.id, order.remaining_quantity);
            return;
        }

        own_side.rest(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CountingObserver;
    use crate::orders::{OrderSpec, Quantity};

    fn limit(id: crate::orders::Ref, direction: Direction, price: Price, quantity: Quantity) -> Order {
        Order::new(
            id,
            OrderSpec {
                direction,
                order_type: OrderType::Limit,
                price,
                quantity,
            },
        )
    }

    fn market(id: crate::orders::Ref, direction: Direction, quantity: Quantity) -> Order {
        Order::new(
            id,
            OrderSpec {
                direction,
                order_type: OrderType::Market,
                price: 0,
                quantity,
            },
        )
    }

    #[test]
    fn s1_simple_cross() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();

        book.submit(limit(0, Direction::Call, 1000, 10), &mut obs);
        assert_eq!(obs.submits, 1);
        assert_eq!(obs.trades, 0);
        assert_eq!(book.best_bid(), Some(1000));

        book.submit(limit(1, Direction::Put, 1000, 4), &mut obs);
        assert_eq!(obs.submits, 2);
        assert_eq!(obs.trades, 1);
        assert_eq!(book.best_ask(), None);

        let (_, level) = book.bids.levels.iter().next().unwrap();
        assert_eq!(level.front().unwrap().remaining_quantity, 6);
    }

    #[test]
    fn s2_price_priority() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Call, 1005, 5), &mut obs);
        book.submit(limit(1, Direction::Call, 1010, 5), &mut obs);

        book.submit(limit(2, Direction::Put, 1000, 7), &mut obs);
        assert_eq!(obs.trades, 2);
        assert!(book.bids().level_count() == 0);
    }

    #[test]
    fn s3_fifo_within_level() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Call, 1000, 3), &mut obs);
        book.submit(limit(1, Direction::Call, 1000, 3), &mut obs);

        book.submit(limit(2, Direction::Put, 1000, 4), &mut obs);
        assert_eq!(obs.trades, 2);

        let (_, level) = book.bids.levels.iter().next().unwrap();
        assert_eq!(level.len(), 1);
        assert_eq!(level.front().unwrap().id, 1);
        assert_eq!(level.front().unwrap().remaining_quantity, 2);
    }

    #[test]
    fn s4_market_sweep_with_cancellation() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Put, 1050, 2), &mut obs);
        book.submit(limit(1, Direction::Put, 1060, 2), &mut obs);

        book.submit(market(2, Direction::Call, 10), &mut obs);
        assert_eq!(obs.trades, 2);
        assert_eq!(obs.cancels, 1);
        assert_eq!(book.best_ask(), None);
    }

    #[test]
    fn s5_non_crossing_limit_rests_silently() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Call, 900, 1), &mut obs);
        assert_eq!(obs.submits, 1);
        assert_eq!(obs.trades, 0);
        assert_eq!(book.best_bid(), Some(900));
    }

    #[test]
    fn market_order_against_empty_book_cancels_full_quantity() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(market(0, Direction::Call, 10), &mut obs);
        assert_eq!(obs.trades, 0);
        assert_eq!(obs.cancels, 1);
    }

    #[test]
    fn book_never_rests_crossed() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Call, 1010, 5), &mut obs);
        book.submit(limit(1, Direction::Put, 1000, 3), &mut obs);

        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask);
        }
    }

    #[test]
    fn empty_levels_are_pruned() {
        let mut book = InstrumentBook::new(Symbol::new("aaaa"));
        let mut obs = CountingObserver::new();
        book.submit(limit(0, Direction::Call, 1000, 5), &mut obs);
        book.submit(limit(1, Direction::Put, 1000, 5), &mut obs);
        assert_eq!(book.bids().level_count(), 0);
        assert_eq!(book.asks().level_count(), 0);
    }
}
