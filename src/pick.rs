//! Uniform random selection over extracted items.

use anyhow::{Result, anyhow};

pub trait RandomSource {
    fn next_u64(&mut self) -> Result<u64>;
}

/// Operating system entropy.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u64(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
        Ok(u64::from_le_bytes(bytes))
    }
}

/// Draw an index uniformly from `0..len`, or `None` when `len` is zero.
///
/// Draws landing in the partial bucket at the top of the `u64` range are
/// rejected so every index keeps exactly the same probability.
pub fn uniform_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> Result<Option<usize>> {
    if len == 0 {
        return Ok(None);
    }
    let n = len as u64;
    let zone = u64::MAX - (u64::MAX % n);
    loop {
        let v = rng.next_u64()?;
        if v < zone {
            return Ok(Some((v % n) as usize));
        }
    }
}

pub fn pick<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    items: &'a [String],
) -> Result<Option<&'a str>> {
    Ok(uniform_index(rng, items.len())?.map(|i| items[i].as_str()))
}

#[cfg(test)]
#[path = "tests/pick_tests.rs"]
mod tests;
