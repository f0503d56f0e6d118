use super::{MaxRng, ZeroRng};
use crate::sim::Backoff;
use crate::sim::backoff::{CAPPED_WINDOW_MAX, MAX_RETRIES, draw, window_max};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn window_doubles_until_ten_retries_then_caps() {
    assert_eq!(window_max(1), Some(1));
    assert_eq!(window_max(2), Some(3));
    assert_eq!(window_max(3), Some(7));
    assert_eq!(window_max(10), Some(1023));
    for r in 11..=MAX_RETRIES {
        assert_eq!(window_max(r), Some(CAPPED_WINDOW_MAX), "retries={r}");
    }
}

#[test]
fn seventeenth_collision_drops() {
    assert_eq!(window_max(17), None);
    assert_eq!(draw(17, &mut MaxRng), Backoff::Drop);
    assert_eq!(draw(17, &mut ZeroRng), Backoff::Drop);
}

#[test]
fn draw_covers_both_ends_of_the_window() {
    assert_eq!(draw(1, &mut ZeroRng), Backoff::Retry { slots: 0 });
    assert_eq!(draw(1, &mut MaxRng), Backoff::Retry { slots: 1 });
    assert_eq!(draw(4, &mut MaxRng), Backoff::Retry { slots: 15 });
    assert_eq!(draw(10, &mut MaxRng), Backoff::Retry { slots: 1023 });
    assert_eq!(draw(12, &mut MaxRng), Backoff::Retry { slots: 10 });
    assert_eq!(draw(16, &mut ZeroRng), Backoff::Retry { slots: 0 });
}

#[test]
fn seeded_draws_stay_inside_the_window() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for retries in 1..=MAX_RETRIES {
        let max = window_max(retries).expect("not dropped");
        for _ in 0..200 {
            match draw(retries, &mut rng) {
                Backoff::Retry { slots } => {
                    assert!(slots <= max, "retries={retries} slots={slots}")
                }
                Backoff::Drop => panic!("unexpected drop at retries={retries}"),
            }
        }
    }
}
