use std::collections::HashMap;

use crate::book::InstrumentBook;
use crate::errors::EngineError;
use crate::ids::RefAuthority;
use crate::instrument::{Symbol, index_to_symbol};
use crate::observer::Observer;
use crate::orders::{Direction, Order, OrderSpec, OrderType, Ref};

/// Dispatches orders to the per-symbol book that owns them.
///
/// Owns every [`InstrumentBook`] and the single [`RefAuthority`] shared
/// across all of them, so refs stay unique engine-wide rather than just
/// per-instrument.
pub struct Engine<O: Observer> {
    books: HashMap<Symbol, InstrumentBook>,
    refs: RefAuthority,
    observer: O,
}

impl<O: Observer> Engine<O> {
    /// An engine with no instruments registered. Use [`Engine::add_instrument`]
    /// to register symbols one at a time, or [`Engine::with_instruments`] to
    /// generate and pre-populate a batch up front.
    pub fn new(observer: O) -> Self {
        Engine {
            books: HashMap::new(),
            refs: RefAuthority::new(),
            observer,
        }
    }

    /// Registers an empty book for `symbol`. A no-op if the symbol is
    /// already registered.
    pub fn add_instrument(&mut self, symbol: Symbol) {
        self.books
            .entry(symbol.clone())
            .or_insert_with(|| InstrumentBook::new(symbol));
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn book(&self, symbol: &Symbol) -> Option<&InstrumentBook> {
        self.books.get(symbol)
    }

    pub fn instrument_count(&self) -> usize {
        self.books.len()
    }

    /// Validates `spec`, stamps it with a fresh [`Ref`], and hands it to the
    /// book for `symbol`. Rejected orders never reach a book and never
    /// produce an event — validation happens before `on_submit`.
    pub fn submit(&mut self, symbol: &Symbol, spec: OrderSpec) -> Result<Ref, EngineError> {
        spec.validate()?;
        let book = self
            .books
            .get_mut(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.clone()))?;

        let order_ref = self.refs.next();
        let order = Order::new(order_ref, spec);
        book.submit(order, &mut self.observer);
        Ok(order_ref)
    }
}

impl<O: Observer> Engine<O> {
    /// Builds an engine with `instrument_count` symbols named `aaaa`, `aaab`, ...,
    /// then rests `prepopulate_per_instrument` limit orders on each book: half
    /// `Call` at a price drawn from `[1000, 1030]`, half `Put` at a price drawn
    /// from `[1040, 1060]`, quantities drawn from `[100, 1000]`.
    ///
    /// This mirrors the benchmark harness's instrument setup so a fresh engine
    /// starts with realistic two-sided liquidity instead of empty books.
    pub fn with_instruments(
        observer: O,
        instrument_count: u32,
        prepopulate_per_instrument: u32,
        rng: &mut impl rand::Rng,
    ) -> Self {
        let mut engine = Engine::new(observer);
        for index in 0..instrument_count {
            let symbol = index_to_symbol(index);
            engine.add_instrument(symbol.clone());
            engine.prepopulate(&symbol, prepopulate_per_instrument, rng);
        }
        engine
    }

    fn prepopulate(&mut self, symbol: &Symbol, count: u32, rng: &mut impl rand::Rng) {
        let half = count / 2;
        for _ in 0..half {
            let spec = OrderSpec {
                direction: Direction::Call,
                order_type: OrderType::Limit,
                price: rng.random_range(1000..=1030),
                quantity: rng.random_range(100..=1000),
            };
            self.submit(symbol, spec)
                .expect("prepopulation orders are always valid and symbol is registered");
        }
        for _ in 0..half {
            let spec = OrderSpec {
                direction: Direction::Put,
                order_type: OrderType::Limit,
                price: rng.random_range(1040..=1060),
                quantity: rng.random_range(100..=1000),
            };
            self.submit(symbol, spec)
                .expect("prepopulation orders are always valid and symbol is registered");
        }
    }
}
