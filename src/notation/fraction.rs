//! Exact rational durations.
//!
//! Note lengths are kept as reduced `numerator / denominator` pairs in
//! whole-note units so that summing long runs of measures never drifts.
//! Conversion to seconds happens only at the timeline boundary.
//!
//! Arithmetic is checked: a sum or difference that no longer fits in `i64`
//! is `None`, never a wrapped value.

use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedSub};

use crate::error::NotationError;

/// Most terms [`Fraction::to_duration_expr`] will emit.
pub const MAX_EXPR_TERMS: usize = 16;

/// Largest note value used when splitting into unit fractions (`2+6`).
const MAX_UNIT_TERM: i64 = 1024;

/// A reduced rational number with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(Ratio<i64>);

impl Fraction {
    pub const ZERO: Fraction = Fraction(Ratio::new_raw(0, 1));
    pub const ONE: Fraction = Fraction(Ratio::new_raw(1, 1));

    /// Build and reduce `num / den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero. Use [`Fraction::checked_new`] for untrusted input.
    pub fn new(num: i64, den: i64) -> Self {
        Self(Ratio::new(num, den))
    }

    /// Build `num / den`, or `None` when `den` is zero.
    pub fn checked_new(num: i64, den: i64) -> Option<Self> {
        (den != 0).then(|| Self::new(num, den))
    }

    pub fn from_integer(n: i64) -> Self {
        Self(Ratio::from_integer(n))
    }

    /// Note value of a duration term: `4` is a quarter (1/4), `2.5` is 2/5.
    pub fn note_value(term: &str) -> Result<Self, NotationError> {
        if term.contains('/') {
            return Err(NotationError::InvalidDuration(term.to_string()));
        }
        let denom: Fraction = term.parse()?;
        denom
            .recip()
            .filter(|value| value.is_positive())
            .ok_or_else(|| NotationError::InvalidDuration(term.to_string()))
    }

    /// Sum of the note values of a `+`-joined duration expression (`4+8` = 3/8).
    ///
    /// An expression whose exact sum does not fit is rejected.
    pub fn from_duration_expr(expr: &str) -> Result<Self, NotationError> {
        if expr.is_empty() {
            return Err(NotationError::InvalidDuration(expr.to_string()));
        }
        expr.split('+').try_fold(Fraction::ZERO, |total, term| {
            total
                .checked_add(Self::note_value(term)?)
                .ok_or_else(|| NotationError::InvalidDuration(expr.to_string()))
        })
    }

    pub fn numer(self) -> i64 {
        *self.0.numer()
    }

    pub fn denom(self) -> i64 {
        *self.0.denom()
    }

    pub fn is_positive(self) -> bool {
        self.numer() > 0
    }

    /// `1 / self`, or `None` for zero.
    pub fn recip(self) -> Option<Self> {
        Self::checked_new(self.denom(), self.numer())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(&rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(&rhs.0).map(Self)
    }

    /// Exact sum, or `None` if any partial sum overflows.
    pub fn checked_sum<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Fraction>,
    {
        values
            .into_iter()
            .try_fold(Fraction::ZERO, Fraction::checked_add)
    }

    pub fn to_f64(self) -> f64 {
        self.numer() as f64 / self.denom() as f64
    }

    /// Render as a `+`-joined expression of note values that parses back to
    /// the same fraction (`3/8` → `"4+8"`, `2/3` → `"2+6"`, `5/121` → `"24.2"`).
    ///
    /// Returns `None` for zero or negative values, and for values that need
    /// more than [`MAX_EXPR_TERMS`] terms.
    pub fn to_duration_expr(self) -> Option<String> {
        if !self.is_positive() {
            return None;
        }
        let whole = self.0.to_integer();
        if whole > MAX_EXPR_TERMS as i64 {
            return None;
        }
        let mut terms: Vec<String> = vec!["1".to_string(); whole as usize];
        let rest = Self(self.0.fract());

        if rest.is_positive() {
            let tail = binary_terms(rest)
                .or_else(|| unit_terms(rest))
                .or_else(|| decimal_term(rest).map(|t| vec![t]))?;
            terms.extend(tail);
        }

        (terms.len() <= MAX_EXPR_TERMS).then(|| terms.join("+"))
    }
}

/// Power-of-two denominator: one term per set bit (`7/8` → `2+4+8`).
fn binary_terms(rest: Fraction) -> Option<Vec<String>> {
    let (num, den) = (rest.numer(), rest.denom());
    if den.count_ones() != 1 {
        return None;
    }
    let mut terms = Vec::new();
    let mut bit = den / 2;
    let mut value: i64 = 2;
    while bit > 0 {
        if num & bit != 0 {
            terms.push(value.to_string());
        }
        bit /= 2;
        value = value.checked_mul(2)?;
    }
    Some(terms)
}

/// Greedy unit fractions (`2/3` → `2+6`), given up once a term grows past
/// [`MAX_UNIT_TERM`] or the term count past [`MAX_EXPR_TERMS`].
fn unit_terms(mut rest: Fraction) -> Option<Vec<String>> {
    let mut terms = Vec::new();
    while rest.is_positive() {
        if terms.len() == MAX_EXPR_TERMS {
            return None;
        }
        let (num, den) = (rest.numer(), rest.denom());
        let term = den / num + i64::from(den % num != 0);
        if term > MAX_UNIT_TERM {
            return None;
        }
        terms.push(term.to_string());
        rest = rest.checked_sub(Fraction::new(1, term))?;
    }
    Some(terms)
}

/// A single decimal term `den / num`, when that is an exact decimal
/// (`5/121` → `"24.2"`).
fn decimal_term(rest: Fraction) -> Option<String> {
    let (num, den) = (rest.numer(), rest.denom());
    let (mut twos, mut fives, mut m) = (0u32, 0u32, num);
    while m % 2 == 0 {
        m /= 2;
        twos += 1;
    }
    while m % 5 == 0 {
        m /= 5;
        fives += 1;
    }
    if m != 1 {
        return None;
    }
    let digits = twos.max(fives);
    let scale = 10i64.checked_pow(digits)?;
    let scaled = den.checked_mul(scale / num)?;
    if digits == 0 {
        return Some(scaled.to_string());
    }
    Some(format!(
        "{}.{:0width$}",
        scaled / scale,
        scaled % scale,
        width = digits as usize
    ))
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom() == 1 {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

/// Parses `"3"`, `"3/4"` and exact decimals such as `"2.5"`.
impl FromStr for Fraction {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidDuration(s.to_string());
        let s = s.trim();

        if let Some((num, den)) = s.split_once('/') {
            let num: i64 = num.trim().parse().map_err(|_| invalid())?;
            let den: i64 = den.trim().parse().map_err(|_| invalid())?;
            if num == i64::MIN || den == i64::MIN {
                return Err(invalid());
            }
            return Self::checked_new(num, den).ok_or_else(invalid);
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let digits_ok = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_ok(whole) || !digits_ok(frac) {
            return Err(invalid());
        }

        let scale = 10i64.checked_pow(frac.len() as u32).ok_or_else(invalid)?;
        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_value: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid())?
        };
        let num = whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac_value))
            .ok_or_else(invalid)?;
        Ok(Self::new(num, scale))
    }
}
