//! Splitting one working day across contracts.
//!
//! A day is split by drawing random proportions, scaling them to the day
//! budget, rounding to half-hour units and clipping each contract to its cap.
//! A rounding deviation is pushed onto the contract with the largest cap when
//! it fits; otherwise a fresh draw is made, up to a fixed number of attempts.
//! When the caps add up to exactly the budget there is only one valid split
//! and no draw is made.

use rand::Rng;

use super::SymmetricDirichlet;

/// Default upper bound on random draws per working day.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Outcome of splitting one working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySplit {
    /// Allocation per contract, in half-hour units.
    pub units: Vec<i64>,
    /// Number of random draws made.
    pub attempts: u32,
    /// True when no draw succeeded within the bound and the allocation was
    /// repaired from the closest draw.
    pub exhausted: bool,
    /// Units still missing (positive) or in excess (negative) after repair.
    pub residual_units: i64,
}

/// Splits `day_units` across contracts limited by `caps`.
///
/// Every returned allocation is within `0..=cap`. Unless the caps together
/// cannot cover the day, the allocations add up to `day_units` exactly.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::split_day;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let split = split_day(16, &[16, 16, 16], 1000, &mut rng);
///
/// assert_eq!(split.units.iter().sum::<i64>(), 16);
/// assert!(!split.exhausted);
/// ```
pub fn split_day<R: Rng + ?Sized>(
    day_units: i64,
    caps: &[i64],
    max_attempts: u32,
    rng: &mut R,
) -> DaySplit {
    if caps.iter().all(|cap| *cap >= 0) && caps.iter().sum::<i64>() == day_units {
        return accepted(caps.to_vec(), 0);
    }

    let dist = SymmetricDirichlet::new(caps.len());
    let anchor = largest_cap_index(caps);
    let mut closest: Option<(Vec<i64>, i64)> = None;

    for attempt in 1..=max_attempts {
        let mut units: Vec<i64> = dist
            .sample(rng)
            .iter()
            .zip(caps)
            .map(|(p, cap)| ((p * day_units as f64).round() as i64).clamp(0, *cap))
            .collect();

        let deviation = day_units - units.iter().sum::<i64>();
        if deviation == 0 {
            return accepted(units, attempt);
        }

        if let Some(i) = anchor {
            let adjusted = units[i] + deviation;
            if (0..=caps[i]).contains(&adjusted) {
                units[i] = adjusted;
                return accepted(units, attempt);
            }
        }

        if closest
            .as_ref()
            .is_none_or(|(_, best)| deviation.abs() < best.abs())
        {
            closest = Some((units, deviation));
        }
    }

    let mut units = closest
        .map(|(units, _)| units)
        .unwrap_or_else(|| vec![0; caps.len()]);
    let residual_units = repair(&mut units, caps, day_units);

    DaySplit {
        units,
        attempts: max_attempts,
        exhausted: true,
        residual_units,
    }
}

fn accepted(units: Vec<i64>, attempts: u32) -> DaySplit {
    DaySplit {
        units,
        attempts,
        exhausted: false,
        residual_units: 0,
    }
}

/// Index of the largest cap, first one on ties.
fn largest_cap_index(caps: &[i64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, cap) in caps.iter().enumerate() {
        if best.is_none_or(|b| *cap > caps[b]) {
            best = Some(i);
        }
    }
    best
}

/// Moves one unit at a time until the allocation meets the day budget or no
/// contract can absorb the difference. Returns the remaining deviation.
fn repair(units: &mut [i64], caps: &[i64], day_units: i64) -> i64 {
    let mut deviation = day_units - units.iter().sum::<i64>();

    while deviation > 0 {
        let roomiest = units
            .iter()
            .zip(caps)
            .enumerate()
            .filter(|(_, (u, cap))| *u < *cap)
            .max_by_key(|(i, (u, cap))| (*cap - *u, std::cmp::Reverse(*i)))
            .map(|(i, _)| i);
        match roomiest {
            Some(i) => {
                units[i] += 1;
                deviation -= 1;
            }
            None => break,
        }
    }

    while deviation < 0 {
        let fullest = units
            .iter()
            .enumerate()
            .filter(|(_, u)| **u > 0)
            .max_by_key(|(i, u)| (**u, std::cmp::Reverse(*i)))
            .map(|(i, _)| i);
        match fullest {
            Some(i) => {
                units[i] -= 1;
                deviation += 1;
            }
            None => break,
        }
    }

    deviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_split_meets_day_budget() {
        let mut rng = rng(11);
        for _ in 0..100 {
            let split = split_day(16, &[16, 16, 16, 16], DEFAULT_MAX_ATTEMPTS, &mut rng);
            assert_eq!(split.units.iter().sum::<i64>(), 16);
            assert!(split.units.iter().all(|u| (0..=16).contains(u)));
            assert_eq!(split.residual_units, 0);
        }
    }

    #[test]
    fn test_single_contract_takes_whole_day_without_drawing() {
        let split = split_day(16, &[16], DEFAULT_MAX_ATTEMPTS, &mut rng(5));
        assert_eq!(split.units, vec![16]);
        assert_eq!(split.attempts, 0);
        assert!(!split.exhausted);
    }

    #[test]
    fn test_exact_caps_are_taken_as_is() {
        let split = split_day(16, &[2, 5, 0, 9], 1, &mut rng(3));
        assert_eq!(split.units, vec![2, 5, 0, 9]);
        assert!(!split.exhausted);
        assert_eq!(split.residual_units, 0);
    }

    #[test]
    fn test_split_respects_tight_caps() {
        let mut rng = rng(77);
        for _ in 0..100 {
            let split = split_day(16, &[1, 3, 12], DEFAULT_MAX_ATTEMPTS, &mut rng);
            assert_eq!(split.units.iter().sum::<i64>(), 16);
            assert_eq!(split.units, vec![1, 3, 12]);
        }
    }

    #[test]
    fn test_exhausted_split_is_repaired() {
        // Tight caps that random draws rarely fit
        let caps = [2, 2, 2, 2, 2, 2, 2, 3];
        let split = split_day(16, &caps, 1, &mut rng(1));
        if split.exhausted {
            assert_eq!(split.attempts, 1);
        }
        assert_eq!(split.units.iter().sum::<i64>(), 16);
        assert!(split.units.iter().zip(&caps).all(|(u, c)| *u <= *c));
        assert_eq!(split.residual_units, 0);
    }

    #[test]
    fn test_zero_attempts_falls_back_to_repair() {
        let split = split_day(6, &[4, 4], 0, &mut rng(0));
        assert!(split.exhausted);
        assert_eq!(split.attempts, 0);
        assert_eq!(split.units.iter().sum::<i64>(), 6);
        assert!(split.units.iter().all(|u| *u <= 4));
    }

    #[test]
    fn test_insufficient_caps_report_residual() {
        let split = split_day(16, &[3, 4], 10, &mut rng(8));
        assert!(split.exhausted);
        assert_eq!(split.units, vec![3, 4]);
        assert_eq!(split.residual_units, 9);
    }

    #[test]
    fn test_largest_cap_index_prefers_first() {
        assert_eq!(largest_cap_index(&[4, 9, 9, 2]), Some(1));
        assert_eq!(largest_cap_index(&[]), None);
    }

    #[test]
    fn test_repair_removes_excess_from_fullest() {
        let mut units = vec![10, 4, 4];
        let residual = repair(&mut units, &[16, 16, 16], 16);
        assert_eq!(residual, 0);
        assert_eq!(units, vec![8, 4, 4]);
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_day(15, &[15, 15, 15], DEFAULT_MAX_ATTEMPTS, &mut rng(99));
        let b = split_day(15, &[15, 15, 15], DEFAULT_MAX_ATTEMPTS, &mut rng(99));
        assert_eq!(a, b);
    }
}
