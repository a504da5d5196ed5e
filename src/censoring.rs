use ndarray::Array1;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::error::{DatasetError, Result};

/// lower bound of the resampled censoring time
pub const MIN_CENSORED_TIME: f64 = 1.0;

/// turn a random share of observed events into censored ones
///
/// every index with `events[i] == 1` is picked independently with
/// probability `p`. a picked index gets `events[i] = 0` and a new time drawn
/// uniformly from the open interval `(1, times[i])`. both arrays are
/// changed in place; the switched indices are returned in ascending order.
///
/// a picked index whose time is `<= 1`, not finite, or so close to 1 that
/// no f64 lies strictly between them has no valid interval to draw from: it
/// is left untouched and not reported.
pub fn increase_censoring<R: Rng + ?Sized>(
    events: &mut Array1<u8>,
    times: &mut Array1<f64>,
    p: f64,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if events.len() != times.len() {
        return Err(DatasetError::invalid_dimensions(format!(
            "events len ({}) != times len ({})",
            events.len(),
            times.len()
        )));
    }

    let coin = Bernoulli::new(p).map_err(|_| DatasetError::invalid_parameter("p", p.to_string()))?;

    let observed: Vec<usize> = events
        .iter()
        .enumerate()
        .filter_map(|(i, &e)| (e == 1).then_some(i))
        .collect();

    let mut switched = Vec::new();
    for i in observed {
        if !coin.sample(rng) {
            continue;
        }

        let original = times[i];
        // (1, t) must hold at least one f64 or the draw never lands inside it
        if !original.is_finite() || original <= MIN_CENSORED_TIME.next_up() {
            log::debug!("index {i}: time {original} leaves nothing to resample, kept as observed");
            continue;
        }

        events[i] = 0;
        times[i] = sample_open(rng, MIN_CENSORED_TIME, original);
        switched.push(i);
    }

    log::debug!("censored {} extra event(s) at p = {}", switched.len(), p);
    Ok(switched)
}

/// uniform draw from (low, high), rejecting the closed end
fn sample_open<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    loop {
        let value = rng.gen_range(low..high);
        if value > low {
            return value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_certain_censoring() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut events = array![1, 1, 0];
        let mut times = array![10.0, 5.0, 3.0];

        let switched = increase_censoring(&mut events, &mut times, 1.0, &mut rng).unwrap();

        assert_eq!(switched, vec![0, 1]);
        assert_eq!(events, array![0, 0, 0]);
        assert!(times[0] > 1.0 && times[0] < 10.0);
        assert!(times[1] > 1.0 && times[1] < 5.0);
        assert_eq!(times[2], 3.0);
    }

    #[test]
    fn test_zero_probability_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut events = array![1, 0, 1, 1];
        let mut times = array![4.0, 2.0, 8.0, 3.5];

        let switched = increase_censoring(&mut events, &mut times, 0.0, &mut rng).unwrap();

        assert!(switched.is_empty());
        assert_eq!(events, array![1, 0, 1, 1]);
        assert_eq!(times, array![4.0, 2.0, 8.0, 3.5]);
    }

    #[test]
    fn test_short_times_are_skipped() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = array![1, 1, 1];
        let mut times = array![0.5, 1.0, 2.0];

        let switched = increase_censoring(&mut events, &mut times, 1.0, &mut rng).unwrap();

        assert_eq!(switched, vec![2]);
        assert_eq!(events, array![1, 1, 0]);
        assert_eq!(times[0], 0.5);
        assert_eq!(times[1], 1.0);
        assert!(times[2] > 1.0 && times[2] < 2.0);
    }

    #[test]
    fn test_time_just_above_one_is_skipped() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut events = array![1, 1];
        let mut times = array![1.0f64.next_up(), 2.0];

        let switched = increase_censoring(&mut events, &mut times, 1.0, &mut rng).unwrap();

        // no f64 lies strictly between 1 and next_up(1)
        assert_eq!(switched, vec![1]);
        assert_eq!(events, array![1, 0]);
        assert_eq!(times[0], 1.0f64.next_up());
        assert!(times[1] > 1.0 && times[1] < 2.0);
    }

    #[test]
    fn test_non_finite_times_are_skipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut events = array![1, 1, 1, 1];
        let mut times = array![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 6.0];

        let switched = increase_censoring(&mut events, &mut times, 1.0, &mut rng).unwrap();

        assert_eq!(switched, vec![3]);
        assert_eq!(events, array![1, 1, 1, 0]);
        assert!(times[0].is_nan());
        assert_eq!(times[1], f64::INFINITY);
        assert_eq!(times[2], f64::NEG_INFINITY);
        assert!(times[3] > 1.0 && times[3] < 6.0);
    }

    #[test]
    fn test_unselected_indices_untouched() {
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 500;
        let mut events = Array1::from_shape_fn(n, |i| (i % 3 != 0) as u8);
        let mut times = Array1::from_shape_fn(n, |i| 2.0 + i as f64 / 10.0);
        let (events0, times0) = (events.clone(), times.clone());

        let switched = increase_censoring(&mut events, &mut times, 0.3, &mut rng).unwrap();

        // roughly 30% of the ~333 events
        assert!(switched.len() > 50 && switched.len() < 150);
        for i in 0..n {
            if switched.contains(&i) {
                assert_eq!(events0[i], 1);
                assert_eq!(events[i], 0);
                assert!(times[i] > 1.0 && times[i] < times0[i]);
            } else {
                assert_eq!(events[i], events0[i]);
                assert_eq!(times[i], times0[i]);
            }
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut events = array![1, 1, 1, 0, 1, 1];
            let mut times = array![3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
            increase_censoring(&mut events, &mut times, 0.5, &mut rng).unwrap();
            (events, times)
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_bad_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in [-0.1, 1.5, f64::NAN] {
            let mut events = array![1];
            let mut times = array![2.0];
            let err = increase_censoring(&mut events, &mut times, p, &mut rng).unwrap_err();
            assert!(matches!(err, DatasetError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = array![1, 0];
        let mut times = array![2.0];
        assert!(increase_censoring(&mut events, &mut times, 0.5, &mut rng).is_err());
    }
}
