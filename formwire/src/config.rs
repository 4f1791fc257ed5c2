//! Decoder configuration.
//!
//! Every decode entry point takes a [`Config`]; [`decode`](crate::decode) and
//! [`decode_into`](crate::decode_into) use [`Config::default`].
//!
//! ```
//! # use formwire::{config::Config, Values};
//! let config = Config::default().with_max_pairs(2);
//! let mut values = Values::new();
//! assert!(formwire::decode_with(b"a=1&b=2&c=3", &mut values, &config).is_err());
//! ```

/// Default upper bound on the number of `key=value` pairs accepted by the parser:
/// none. Services taking untrusted input opt in with [`Config::with_max_pairs`].
pub const DEFAULT_MAX_PAIRS: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_pairs: usize,
    deny_unknown_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pairs: DEFAULT_MAX_PAIRS,
            deny_unknown_keys: false,
        }
    }
}

impl Config {
    /// Limit the number of pairs the parser accepts before failing with
    /// [`Error::PairLimit`](crate::Error::PairLimit).
    #[must_use]
    pub const fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    /// Reject keys that resolve to no record field instead of ignoring them.
    ///
    /// Only record destinations are affected; maps accept every key.
    #[must_use]
    pub const fn deny_unknown_keys(mut self, deny: bool) -> Self {
        self.deny_unknown_keys = deny;
        self
    }

    #[inline]
    pub const fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    #[inline]
    pub const fn denies_unknown_keys(&self) -> bool {
        self.deny_unknown_keys
    }
}
