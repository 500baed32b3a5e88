//! # Tokens: parity-tagged integers in their stored text form.
//!
//! A [`Token`] is written as its decimal representation followed by one
//! space. Reading splits on any whitespace, so the store never needs escaping.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::StoreError;

/// Largest slot count whose odd values still fit in a `u32` (`2n + 1 <= u32::MAX`).
pub const MAX_VALUE_SLOTS: u32 = u32::MAX / 2 + 1;

/// Category of values a producer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Parity of an arbitrary value.
    #[inline]
    pub fn of(value: u32) -> Self {
        if value % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// Samples a token of this parity.
    ///
    /// Picks `n` uniformly from `0..slots` and maps it to `2n` (even) or
    /// `2n + 1` (odd). With the default 50 slots that is `0..=98` and `1..=99`.
    /// `slots` is clamped to `1..=MAX_VALUE_SLOTS`.
    ///
    /// # Example
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use parityvisor::Parity;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let t = Parity::Odd.sample(&mut rng, 50);
    /// assert_eq!(t.value() % 2, 1);
    /// assert!(t.value() <= 99);
    /// ```
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R, slots: u32) -> Token {
        let n = rng.random_range(0..slots.clamp(1, MAX_VALUE_SLOTS));
        match self {
            Parity::Even => Token(n * 2),
            Parity::Odd => Token(n * 2 + 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u32);

impl Token {
    #[inline]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn parity(self) -> Parity {
        Parity::of(self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Token {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(Token)
            .map_err(|_| StoreError::Malformed {
                fragment: s.to_string(),
            })
    }
}

/// Splits stored text into tokens, in order.
pub fn parse_tokens(text: &str) -> Result<Vec<Token>, StoreError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Renders tokens space-joined, the way observers report them.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len() * 3);
    for (i, t) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&t.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn even_samples_stay_even_and_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..2_000 {
            let t = Parity::Even.sample(&mut rng, 50);
            assert_eq!(t.value() % 2, 0);
            assert!(t.value() <= 98, "{t} out of range");
            assert_eq!(t.parity(), Parity::Even);
        }
    }

    #[test]
    fn odd_samples_stay_odd_and_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..2_000 {
            let t = Parity::Odd.sample(&mut rng, 50);
            assert_eq!(t.value() % 2, 1);
            assert!((1..=99).contains(&t.value()), "{t} out of range");
        }
    }

    #[test]
    fn sampling_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(3);
        let values: Vec<u32> = (0..5_000)
            .map(|_| Parity::Even.sample(&mut rng, 50).value())
            .collect();
        assert!(values.contains(&0));
        assert!(values.contains(&98));
    }

    #[test]
    fn oversized_slot_count_stays_in_u32() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert_eq!(Parity::Odd.sample(&mut rng, u32::MAX).parity(), Parity::Odd);
            assert_eq!(Parity::Even.sample(&mut rng, u32::MAX).parity(), Parity::Even);
        }
        let top = Parity::Odd.sample(&mut StdRng::seed_from_u64(4), MAX_VALUE_SLOTS);
        assert_eq!(top.parity(), Parity::Odd);
    }

    #[test]
    fn parse_accepts_any_whitespace() {
        let tokens = parse_tokens("4 17\n 98\t3 ").unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(4), Token::new(17), Token::new(98), Token::new(3)]
        );
        assert!(parse_tokens("   ").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_partial_fragment() {
        let err = parse_tokens("4 1x").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { fragment } if fragment == "1x"));
    }

    #[test]
    fn join_is_space_separated_without_trailer() {
        let tokens = [Token::new(1), Token::new(22), Token::new(5)];
        assert_eq!(join_tokens(&tokens), "1 22 5");
        assert_eq!(join_tokens(&[]), "");
    }
}
