use crate::errors::OrderValidationError;

/// Engine-wide unique, monotonically increasing order identifier.
pub type Ref = u64;

/// Price in minor units (e.g. hundredths). Market orders always carry `0`.
pub type Price = u64;

/// A strictly positive order size.
pub type Quantity = u64;

/// Which side of the book an order belongs to.
///
/// The names are historical; semantics are a plain symmetric bid/ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Buy side (bid).
    Call,
    /// Sell side (ask).
    Put,
}

impl Direction {
    /// The side an incoming order of this direction matches against.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Call => Direction::Put,
            Direction::Put => Direction::Call,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

/// A caller-supplied order, before a [`Ref`] has been assigned.
///
/// This is the shape accepted by `Engine::submit`; the dispatcher stamps it
/// with a `Ref` and turns it into a resting-capable [`Order`].
#[derive(Debug, Clone, Copy)]
pub struct OrderSpec {
    pub direction: Direction,
    pub order_type: OrderType,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderSpec {
    /// Rejects quantity-zero orders and limit orders with a non-positive price.
    ///
    /// Market orders ignore whatever `price` is set to (the spec requires
    /// `0`, but validation does not depend on it).
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.quantity == 0 {
            return Err(OrderValidationError::ZeroQuantity);
        }
        if self.order_type == OrderType::Limit && self.price == 0 {
            return Err(OrderValidationError::NonPositiveLimitPrice);
        }
        Ok(())
    }
}

/// An order known to the book: a [`Ref`] has been assigned and `remaining_quantity`
/// is tracked separately from the quantity the caller originally submitted, since
/// the book only ever needs to know what is left to fill.
#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub id: Ref,
    pub direction: Direction,
    pub order_type: OrderType,
    pub price: Price,
    pub remaining_quantity: Quantity,
}

impl Order {
    pub fn new(id: Ref, spec: OrderSpec) -> Self {
        let price = match spec.order_type {
            OrderType::Market => 0,
            OrderType::Limit => spec.price,
        };
        Order {
            id,
            direction: spec.direction,
            order_type: spec.order_type,
            price,
            remaining_quantity: spec.quantity,
        }
    }

    /// Whether this order can trade immediately against a resting order at `resting_price`
    /// on the opposite side.
    pub fn marketable_against(&self, resting_price: Price) -> bool {
        match self.order_type {
            OrderType::Market => true,
            OrderType::Limit => match self.direction {
                Direction::Call => resting_price <= self.price,
                Direction::Put => resting_price >= self.price,
            },
        }
    }
}
