//! Implementations of the built-in functions.
//!
//! The evaluator has already checked the argument count against the declared
//! arity by the time any of these run, so unary functions index `args[0]`
//! directly and the aggregates see at least one argument.

use std::cell::Cell;
use std::f64::consts::{E, PI, TAU};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::evaluator::EvalContext;
use crate::function::FunctionError;

type Cx<'a, 'ev> = &'a mut EvalContext<'ev>;
type R = Result<f64, FunctionError>;

pub(crate) fn abs(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].abs())
}

/// Truncate toward zero.
pub(crate) fn int(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].trunc())
}

/// Same operation as [`int`], registered under its own name.
pub(crate) fn trunc(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].trunc())
}

/// Round half away from zero.
pub(crate) fn round(_cx: Cx, args: &mut [f64]) -> R {
    let x = args[0];
    Ok(if x < 0.0 {
        (x - 0.5).ceil()
    } else {
        (x + 0.5).floor()
    })
}

pub(crate) fn floor(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].floor())
}

pub(crate) fn ceil(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].ceil())
}

/// `-1` for negative values, `1` otherwise. Zero counts as positive.
pub(crate) fn sign(_cx: Cx, args: &mut [f64]) -> R {
    Ok(if args[0] < 0.0 { -1.0 } else { 1.0 })
}

pub(crate) fn sin(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].sin())
}

pub(crate) fn cos(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].cos())
}

pub(crate) fn tan(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].tan())
}

pub(crate) fn asin(_cx: Cx, args: &mut [f64]) -> R {
    if args[0].abs() > 1.0 {
        return Err(FunctionError);
    }
    Ok(args[0].asin())
}

pub(crate) fn acos(_cx: Cx, args: &mut [f64]) -> R {
    if args[0].abs() > 1.0 {
        return Err(FunctionError);
    }
    Ok(args[0].acos())
}

pub(crate) fn atan(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].atan())
}

pub(crate) fn sinh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].sinh())
}

pub(crate) fn cosh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].cosh())
}

pub(crate) fn tanh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].tanh())
}

pub(crate) fn asinh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].asinh())
}

pub(crate) fn acosh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].acosh())
}

pub(crate) fn atanh(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].atanh())
}

pub(crate) fn ln(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].ln())
}

/// Base-10 logarithm.
pub(crate) fn log(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].log10())
}

pub(crate) fn exp(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].exp())
}

pub(crate) fn sqrt(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0].sqrt())
}

/// Radians to degrees.
pub(crate) fn deg(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0] * 180.0 / PI)
}

/// Degrees to radians.
pub(crate) fn rad(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args[0] * PI / 180.0)
}

/// Factorial, extended to non-integral arguments by Stirling's
/// approximation. Negative arguments are out of domain.
pub(crate) fn fact(_cx: Cx, args: &mut [f64]) -> R {
    let x = args[0];
    if x < 0.0 {
        return Err(FunctionError);
    }
    if x.fract() == 0.0 {
        let mut product = 1.0;
        let mut k = 2.0;
        // The product saturates to infinity after ~171 steps.
        while k <= x {
            product *= k;
            if product.is_infinite() {
                break;
            }
            k += 1.0;
        }
        Ok(product)
    } else {
        Ok((TAU * x).sqrt() * (x / E).powf(x))
    }
}

thread_local! {
    static RAND_STATE: Cell<u64> = Cell::new(seed());
}

fn seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64 ^ d.as_secs())
        .unwrap_or(0x9e37_79b9_7f4a_7c15);
    // xorshift must not start from zero.
    nanos | 1
}

/// Uniform pseudo-random value in `[0, 1)`.
///
/// A per-thread xorshift generator seeded from the clock. Not suitable for
/// anything security-sensitive.
pub(crate) fn rand(_cx: Cx, _args: &mut [f64]) -> R {
    RAND_STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        Ok((x >> 11) as f64 / (1u64 << 53) as f64)
    })
}

/// Order by magnitude so small terms accumulate before large ones.
fn sort_by_magnitude(args: &mut [f64]) {
    args.sort_unstable_by(|a, b| a.abs().total_cmp(&b.abs()));
}

pub(crate) fn sum(_cx: Cx, args: &mut [f64]) -> R {
    sort_by_magnitude(args);
    Ok(args.iter().sum())
}

pub(crate) fn min(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

pub(crate) fn max(_cx: Cx, args: &mut [f64]) -> R {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub(crate) fn avg(_cx: Cx, args: &mut [f64]) -> R {
    sort_by_magnitude(args);
    Ok(args.iter().sum::<f64>() / args.len() as f64)
}

/// Median: the middle value, or the mean of the two middle values for an
/// even count.
pub(crate) fn med(_cx: Cx, args: &mut [f64]) -> R {
    args.sort_unstable_by(f64::total_cmp);
    let mid = args.len() / 2;
    Ok(if args.len() % 2 == 1 {
        args[mid]
    } else {
        (args[mid - 1] + args[mid]) / 2.0
    })
}

/// Sample variance. Zero for a single argument.
pub(crate) fn var(_cx: Cx, args: &mut [f64]) -> R {
    if args.len() < 2 {
        return Ok(0.0);
    }
    sort_by_magnitude(args);
    let mean = args.iter().sum::<f64>() / args.len() as f64;
    let squares = args.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
    Ok(squares / (args.len() - 1) as f64)
}

pub(crate) fn std(cx: Cx, args: &mut [f64]) -> R {
    Ok(var(cx, args)?.sqrt())
}
