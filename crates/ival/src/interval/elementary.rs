use super::{Interval, IntervalError, IntervalResult};

pub fn log(x: &Interval) -> IntervalResult<Interval> {
    if x.inf() <= 0.0 {
        return Err(IntervalError::Domain {
            function: "log",
            interval: *x,
        });
    }
    Ok(Interval::new(x.inf().ln(), x.sup().ln()))
}

pub fn log10(x: &Interval) -> IntervalResult<Interval> {
    if x.inf() <= 0.0 {
        return Err(IntervalError::Domain {
            function: "log10",
            interval: *x,
        });
    }
    Ok(Interval::new(x.inf().log10(), x.sup().log10()))
}

pub fn exp(x: &Interval) -> Interval {
    Interval::new(x.inf().exp(), x.sup().exp())
}

pub fn asin(x: &Interval) -> IntervalResult<Interval> {
    if x.inf() < -1.0 || x.sup() > 1.0 {
        return Err(IntervalError::Domain {
            function: "asin",
            interval: *x,
        });
    }
    Ok(Interval::new(x.inf().asin(), x.sup().asin()))
}
