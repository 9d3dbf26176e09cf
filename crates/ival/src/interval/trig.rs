use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::Interval;

/// Quadrant of an angle already reduced to `[0, 2π)`.
fn quadrant(x: f64) -> u8 {
    if x <= FRAC_PI_2 {
        0
    } else if x <= PI {
        1
    } else if x <= PI + FRAC_PI_2 {
        2
    } else {
        3
    }
}

fn reduce(x: f64) -> f64 {
    x.rem_euclid(TAU)
}

/// Reduced bounds and their quadrants, or `None` when the interval covers a
/// full period.
fn classify(x: &Interval) -> Option<(f64, f64, u8, u8)> {
    if x.width() >= TAU {
        return None;
    }
    let (lo, hi) = (reduce(x.inf()), reduce(x.sup()));
    let (q_lo, q_hi) = (quadrant(lo), quadrant(hi));
    // same quadrant but wrapped all the way round
    if q_lo == q_hi && hi < lo {
        return None;
    }
    Some((lo, hi, q_lo, q_hi))
}

pub fn sin(x: &Interval) -> Interval {
    let Some((lo, hi, q_lo, q_hi)) = classify(x) else {
        return Interval::SIGN_RANGE;
    };
    let (s_lo, s_hi) = (lo.sin(), hi.sin());

    match (q_lo, q_hi) {
        // increasing
        (0, 0) | (3, 0) | (3, 3) => Interval::new(s_lo, s_hi),
        // decreasing
        (1, 1) | (2, 2) | (1, 2) => Interval::new(s_hi, s_lo),
        // passes 3π/2
        (1, 0) | (2, 3) => Interval::new(-1.0, s_lo.max(s_hi)),
        (2, 0) => Interval::new(-1.0, s_hi),
        (1, 3) => Interval::new(-1.0, s_lo),
        // passes π/2
        (0, 1) | (3, 2) => Interval::new(s_lo.min(s_hi), 1.0),
        (3, 1) => Interval::new(s_lo, 1.0),
        (0, 2) => Interval::new(s_hi, 1.0),
        // passes both extrema
        _ => Interval::SIGN_RANGE,
    }
}

pub fn cos(x: &Interval) -> Interval {
    sin(&(*x + Interval::degenerate(FRAC_PI_2)))
}

pub fn tan(x: &Interval) -> Interval {
    let Some((lo, hi, q_lo, q_hi)) = classify(x) else {
        return Interval::ENTIRE;
    };
    match (q_lo, q_hi) {
        (0, 0) | (1, 1) | (2, 2) | (3, 3) | (1, 2) | (3, 0) => Interval::new(lo.tan(), hi.tan()),
        _ => Interval::ENTIRE,
    }
}

pub fn cot(x: &Interval) -> Interval {
    -tan(&(*x + Interval::degenerate(FRAC_PI_2)))
}
