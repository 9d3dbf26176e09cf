//! Closed real intervals `[inf, sup]` over `f64`.
//!
//! Bounds are computed with ordinary floating point operations. There is no
//! outward rounding, so a result may miss the true range by an ulp near
//! representable boundaries.

use itertools::{Itertools, MinMaxResult};
use thiserror::Error;

mod elementary;
mod trig;

pub use elementary::{asin, exp, log, log10};
pub use trig::{cos, cot, sin, tan};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IntervalError {
    #[error("the interval {divisor} contains zero")]
    ContainsZero { divisor: Interval },
    #[error("{interval} is outside the domain of {function}")]
    Domain {
        function: &'static str,
        interval: Interval,
    },
    #[error("cannot raise {base} to the non-integral power {power}")]
    NonRealPower { base: Interval, power: f64 },
}

pub type IntervalResult<T> = Result<T, IntervalError>;

/// A closed interval. `inf <= sup` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    inf: f64,
    sup: f64,
}

impl Interval {
    pub const ENTIRE: Self = Self {
        inf: f64::NEG_INFINITY,
        sup: f64::INFINITY,
    };
    pub const SIGN_RANGE: Self = Self { inf: -1.0, sup: 1.0 };
    pub const ONE: Self = Self { inf: 1.0, sup: 1.0 };

    /// Bounds given in reverse order are swapped.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { inf: a, sup: b }
        } else {
            Self { inf: b, sup: a }
        }
    }

    pub fn degenerate(point: f64) -> Self {
        Self {
            inf: point,
            sup: point,
        }
    }

    pub fn inf(&self) -> f64 {
        self.inf
    }

    pub fn sup(&self) -> f64 {
        self.sup
    }

    pub fn set_inf(&mut self, val: f64) {
        if val <= self.sup {
            self.inf = val;
        } else {
            self.inf = self.sup;
            self.sup = val;
        }
    }

    pub fn set_sup(&mut self, val: f64) {
        if val >= self.inf {
            self.sup = val;
        } else {
            self.sup = self.inf;
            self.inf = val;
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.inf == self.sup
    }

    pub fn contains(&self, x: f64) -> bool {
        self.inf <= x && x <= self.sup
    }

    pub fn width(&self) -> f64 {
        self.sup - self.inf
    }

    pub fn midpoint(&self) -> f64 {
        (self.inf + self.sup) / 2.0
    }

    /// Largest absolute value in the interval.
    pub fn magnitude(&self) -> f64 {
        self.inf.abs().max(self.sup.abs())
    }

    /// Smallest absolute value among the bounds.
    pub fn mignitude(&self) -> f64 {
        self.inf.abs().min(self.sup.abs())
    }

    pub fn hull(&self, other: &Self) -> Self {
        Self::new(self.inf.min(other.inf), self.sup.max(other.sup))
    }

    pub fn hull_with(&self, bound: f64) -> Self {
        Self::new(self.inf.min(bound), self.sup.max(bound))
    }

    pub fn shift(&self, by: f64) -> Self {
        Self::new(self.inf + by, self.sup + by)
    }

    /// Fails unless the interval is strictly positive or strictly negative.
    pub fn recip(&self) -> IntervalResult<Self> {
        if self.inf > 0.0 || self.sup < 0.0 {
            Ok(Self::new(1.0 / self.sup, 1.0 / self.inf))
        } else {
            Err(IntervalError::ContainsZero { divisor: *self })
        }
    }

    pub fn checked_div(&self, divisor: &Self) -> IntervalResult<Self> {
        Ok(*self * divisor.recip()?)
    }

    pub fn pow(&self, power: f64) -> IntervalResult<Self> {
        if power == 0.0 {
            return Ok(Self::ONE);
        }
        if power < 0.0 {
            return self.pow(-power)?.recip();
        }

        let is_integer = power.fract() == 0.0;
        let is_even = is_integer && (power / 2.0).fract() == 0.0;

        if self.inf > 0.0 {
            Ok(Self::new(self.inf.powf(power), self.sup.powf(power)))
        } else if self.sup < 0.0 {
            if !is_integer {
                return Err(IntervalError::NonRealPower {
                    base: *self,
                    power,
                });
            }
            Ok(Self::new(self.sup.powf(power), self.inf.powf(power)))
        } else if is_even {
            Ok(Self::new(0.0, self.magnitude().powf(power)))
        } else if is_integer {
            Ok(Self::new(self.inf.powf(power), self.sup.powf(power)))
        } else if self.inf == 0.0 {
            Ok(Self::new(0.0, self.sup.powf(power)))
        } else {
            Err(IntervalError::NonRealPower {
                base: *self,
                power,
            })
        }
    }
}

impl std::ops::Neg for Interval {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.sup, -self.inf)
    }
}

impl std::ops::Add for Interval {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.inf + rhs.inf, self.sup + rhs.sup)
    }
}

impl std::ops::Sub for Interval {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.inf - rhs.sup, self.sup - rhs.inf)
    }
}

impl std::ops::Mul for Interval {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let products = [
            self.inf * rhs.inf,
            self.inf * rhs.sup,
            self.sup * rhs.inf,
            self.sup * rhs.sup,
        ];
        match products.into_iter().minmax() {
            MinMaxResult::MinMax(lo, hi) => Self::new(lo, hi),
            MinMaxResult::OneElement(x) => Self::degenerate(x),
            MinMaxResult::NoElements => unreachable!(),
        }
    }
}

impl From<f64> for Interval {
    fn from(point: f64) -> Self {
        Self::degenerate(point)
    }
}
