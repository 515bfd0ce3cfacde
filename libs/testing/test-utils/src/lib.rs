//! Shared test infrastructure for the catalog crates.
//!
//! - `TestDatabase`: throwaway PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic, per-test unique names
//! - `assertions`: assertion helpers with readable failure messages
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("create_product");
//! let name = builder.name("product", "desk");
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data keyed by a seed.
///
/// Containers may be shared between tests, so every unique column gets a
/// name derived from the test that created it.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "desk"), "test-product-7-desk");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A price in `[1.00, 100.99]` that varies with the seed and `salt`.
    pub fn price(&self, salt: u64) -> f64 {
        let cents = self.seed.wrapping_add(salt.wrapping_mul(7919)) % 10_000;
        1.0 + cents as f64 / 100.0
    }
}

pub mod assertions {
    /// Unwrap an `Option` with context in the panic message
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Compare floats with an absolute tolerance of 1e-9
    pub fn assert_price_eq(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{}: expected price {}, got {}",
            context,
            expected,
            actual
        );
    }

    /// Assert that ids are strictly increasing
    pub fn assert_strictly_increasing(ids: &[i64], context: &str) {
        for pair in ids.windows(2) {
            assert!(
                pair[0] < pair[1],
                "{}: ids not strictly increasing: {:?}",
                context,
                ids
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::from_test_name("my_test");
        let b = TestDataBuilder::from_test_name("my_test");

        assert_eq!(a.name("product", "x"), b.name("product", "x"));
        assert_eq!(a.price(1), b.price(1));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.name("product", "x"), b.name("product", "x"));
    }

    #[test]
    fn test_price_range() {
        let builder = TestDataBuilder::from_test_name("prices");
        for salt in 0..50 {
            let price = builder.price(salt);
            assert!((1.0..=100.99).contains(&price), "{price}");
        }
    }

    #[test]
    fn test_assertions() {
        assert_eq!(assert_some(Some(3), "value"), 3);
        assert_price_eq(0.1 + 0.2, 0.3, "sum");
        assert_strictly_increasing(&[1, 2, 5], "ids");
    }

    #[test]
    #[should_panic(expected = "not strictly increasing")]
    fn test_strictly_increasing_panics() {
        assert_strictly_increasing(&[1, 1], "ids");
    }
}
