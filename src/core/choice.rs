/// Weighted random selection over slices of weighted items.

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("cannot choose from an empty list")]
    Empty,
    #[error("total weight must be positive and finite, got {0}")]
    NonPositiveTotal(f64),
}

/// Anything that carries a sampling weight.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl<T: Weighted> Weighted for &T {
    fn weight(&self) -> f64 {
        (*self).weight()
    }
}

/// Select one item such that item `i` is chosen with probability
/// `weight_i / total`.
///
/// Draws `r` uniformly in `[0, total)` and walks the slice accumulating
/// a running sum; the first item whose weight window reaches `r` wins.
/// The last item doubles as the fallback, so accumulated floating-point
/// drift can never leave the walk without a selection.
///
/// The input is never mutated; the caller clones the returned reference
/// if it needs an owned copy.
pub fn weighted_choice<'a, T: Weighted>(
    items: &'a [T],
    rng: &mut StdRng,
) -> Result<&'a T, ChoiceError> {
    let (last, head) = items.split_last().ok_or(ChoiceError::Empty)?;

    let total: f64 = items.iter().map(Weighted::weight).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ChoiceError::NonPositiveTotal(total));
    }

    let r = rng.gen_range(0.0..total);
    let mut upto = 0.0;
    for item in head {
        if upto + item.weight() >= r {
            return Ok(item);
        }
        upto += item.weight();
    }
    Ok(last)
}
