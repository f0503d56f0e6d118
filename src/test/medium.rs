use crate::net::{
    Attempt, AttemptId, EndpointId, Frame, Medium, SPEED_OF_LIGHT_IN_COPPER_MPS, separation_m,
};
use crate::sim::SimTime;
use crate::topo::bus::build_bus;
use proptest::prelude::*;

fn on_wire(id: u64, src: usize, dst: usize, at: u64) -> Attempt {
    Attempt::new(
        AttemptId(id),
        EndpointId(src),
        EndpointId(dst),
        Frame::new(576),
        SimTime(at),
    )
}

#[test]
fn separation_uses_difference_on_same_side_and_sum_across_center() {
    assert_eq!(separation_m(30, 100), 70);
    assert_eq!(separation_m(-30, -100), 70);
    assert_eq!(separation_m(-30, 100), 130);
    assert_eq!(separation_m(0, 100), 100);
    assert_eq!(separation_m(0, -100), 100);
    assert_eq!(separation_m(0, 0), 0);
}

#[test]
fn propagation_delay_over_100m_rounds_up() {
    let medium = Medium::default();
    let eps = build_bus(&[(0, 1), (100, 0)]);

    let bit_time = 1.0 / medium.bit_rate_bps as f64;
    let expected = (100.0 / SPEED_OF_LIGHT_IN_COPPER_MPS as f64 / bit_time).ceil() as u64;

    assert_eq!(expected, 5);
    assert_eq!(medium.propagation_delay(&eps[0], &eps[1]), SimTime(expected));
}

#[test]
fn propagation_delay_is_exact_when_distance_divides_evenly() {
    let medium = Medium::default();
    // 21 m * 10 Mbps / 2.1e8 m/s = 1 bit-time
    let eps = build_bus(&[(0, 1), (21, 0), (-21, 0)]);
    assert_eq!(medium.propagation_delay(&eps[0], &eps[1]), SimTime(1));
    assert_eq!(medium.propagation_delay(&eps[1], &eps[2]), SimTime(2));
    assert_eq!(medium.propagation_delay(&eps[0], &eps[0]), SimTime::ZERO);
}

#[test]
fn medium_is_clear_when_nothing_is_on_the_wire() {
    let medium = Medium::default();
    let eps = build_bus(&[(-200, 1), (200, 0)]);
    assert!(medium.medium_clear(&eps, EndpointId(1), &[], SimTime(1_000)));
}

#[test]
fn carrier_is_sensed_only_once_the_signal_has_arrived() {
    let medium = Medium::default();
    let eps = build_bus(&[(-200, 1), (200, 0)]);
    let reach = medium.propagation_delay(&eps[0], &eps[1]).0;
    assert_eq!(reach, 20);

    let wire = [on_wire(0, 0, 1, 100)];
    // 信号还在路上
    assert!(medium.medium_clear(&eps, EndpointId(1), &wire, SimTime(100)));
    assert!(medium.medium_clear(&eps, EndpointId(1), &wire, SimTime(100 + reach - 1)));
    // 信号已到达
    assert!(!medium.medium_clear(&eps, EndpointId(1), &wire, SimTime(100 + reach)));
    assert!(!medium.medium_clear(&eps, EndpointId(1), &wire, SimTime(4_000)));
}

#[test]
fn own_transmission_keeps_the_medium_busy_for_the_sender() {
    let medium = Medium::default();
    let eps = build_bus(&[(-200, 1), (200, 0)]);
    let wire = [on_wire(0, 0, 1, 100)];
    assert!(!medium.medium_clear(&eps, EndpointId(0), &wire, SimTime(100)));
}

#[test]
fn carrier_sense_checks_every_frame_on_the_wire() {
    let medium = Medium::default();
    let eps = build_bus(&[(0, 1), (-200, 0), (21, 0)]);

    // 第一个帧的信号还没到达侦听点，第二个已经到达
    let wire = [on_wire(0, 1, 0, 95), on_wire(1, 2, 0, 95)];
    assert!(!medium.medium_clear(&eps, EndpointId(0), &wire, SimTime(100)));

    let reversed = [on_wire(1, 2, 0, 95), on_wire(0, 1, 0, 95)];
    assert!(!medium.medium_clear(&eps, EndpointId(0), &reversed, SimTime(100)));
}

proptest! {
    #[test]
    fn propagation_delay_is_symmetric(
        a in -5_000i64..5_000,
        b in -5_000i64..5_000,
        rate in 1u64..1_000_000_000,
    ) {
        let medium = Medium::new(rate, 512);
        let eps = build_bus(&[(a, 1), (b, 0)]);
        let ab = medium.propagation_delay(&eps[0], &eps[1]);
        let ba = medium.propagation_delay(&eps[1], &eps[0]);
        prop_assert_eq!(ab, ba);
        if a == b {
            prop_assert_eq!(ab, SimTime::ZERO);
        }
    }

    #[test]
    fn propagation_delay_never_rounds_down(a in -5_000i64..5_000, b in -5_000i64..5_000) {
        let medium = Medium::default();
        let eps = build_bus(&[(a, 1), (b, 0)]);
        let ticks = medium.propagation_delay(&eps[0], &eps[1]).0 as f64;
        let exact = separation_m(a, b) as f64 * medium.bit_rate_bps as f64
            / SPEED_OF_LIGHT_IN_COPPER_MPS as f64;
        prop_assert!(ticks >= exact);
        prop_assert!(ticks < exact + 1.0);
    }
}
