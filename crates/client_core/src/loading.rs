//! Loading indicator messages shown while a submission is in flight.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::ClientError;

pub const DEFAULT_LOADING_MESSAGES: &[&str] = &[
    "Loading...",
    "Differentiating...",
    "Looking for tangent lines...",
    "Crunching the numbers...",
];

/// Picks an index into a non-empty message pool.
pub trait MessageSelector: Send {
    fn select(&mut self, pool_len: usize) -> usize;
}

pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MessageSelector for RandomSelector {
    fn select(&mut self, pool_len: usize) -> usize {
        self.rng.gen_range(0..pool_len)
    }
}

/// Always picks the same slot, clamped to the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl MessageSelector for FixedSelector {
    fn select(&mut self, pool_len: usize) -> usize {
        self.0.min(pool_len - 1)
    }
}

pub struct LoadingMessages {
    pool: Vec<String>,
    selector: Box<dyn MessageSelector>,
}

impl LoadingMessages {
    pub fn new(
        pool: Vec<String>,
        selector: impl MessageSelector + 'static,
    ) -> Result<Self, ClientError> {
        if pool.is_empty() {
            return Err(ClientError::EmptyLoadingPool);
        }
        Ok(Self {
            pool,
            selector: Box::new(selector),
        })
    }

    pub fn next_message(&mut self) -> &str {
        let index = self.selector.select(self.pool.len());
        &self.pool[index.min(self.pool.len() - 1)]
    }
}

pub fn default_pool() -> Vec<String> {
    DEFAULT_LOADING_MESSAGES
        .iter()
        .map(|message| message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pool() {
        let err = LoadingMessages::new(Vec::new(), FixedSelector(0))
            .err()
            .expect("empty pool must fail");
        assert!(matches!(err, ClientError::EmptyLoadingPool));
    }

    #[test]
    fn fixed_selector_clamps_to_pool() {
        let mut messages =
            LoadingMessages::new(vec!["a".into(), "b".into()], FixedSelector(7)).expect("pool");
        assert_eq!(messages.next_message(), "b");
    }

    #[test]
    fn seeded_selector_is_deterministic_and_stays_in_pool() {
        let mut first = LoadingMessages::new(default_pool(), RandomSelector::seeded(42))
            .expect("pool");
        let mut second = LoadingMessages::new(default_pool(), RandomSelector::seeded(42))
            .expect("pool");

        for _ in 0..32 {
            let a = first.next_message().to_string();
            let b = second.next_message().to_string();
            assert_eq!(a, b);
            assert!(DEFAULT_LOADING_MESSAGES.contains(&a.as_str()));
        }
    }
}
