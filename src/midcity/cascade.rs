//! Ordered first-success evaluation of extraction strategies.

/// A named extraction attempt over some context (a whole page, a container).
pub struct Strategy<C: ?Sized, T> {
    pub name: &'static str,
    pub run: fn(&C) -> Option<T>,
}

impl<C: ?Sized, T> Strategy<C, T> {
    pub fn new(name: &'static str, run: fn(&C) -> Option<T>) -> Self {
        Self { name, run }
    }
}

/// Runs `strategies` in order and returns the first value produced.
///
/// Later strategies are never evaluated once one succeeds.
pub fn first_match<C: ?Sized, T: std::fmt::Debug>(
    field: &str,
    context: &C,
    strategies: &[Strategy<C, T>],
) -> Option<T> {
    for strategy in strategies {
        if let Some(value) = (strategy.run)(context) {
            tracing::debug!("Found {} via {}: {:?}", field, strategy.name, value);
            return Some(value);
        }
    }
    tracing::debug!("No strategy found {}", field);
    None
}
