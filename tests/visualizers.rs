use collapse_viz::integral::{self, PartitionCycle, PARTITIONS};
use collapse_viz::operator::{BlobFrame, Color, Glow, MIN_SPEED_MULTIPLIER};
use collapse_viz::threshold::{self, CollapseState, ThresholdState};
use collapse_viz::{Operator, OperatorState};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

// ----------------------------------------------------------------------------
// integral
// ----------------------------------------------------------------------------

#[test]
fn bar_heights_stay_in_band() {
    for &n in &PARTITIONS {
        for i in 0..n {
            let h = integral::bar_height(i, n);
            assert!((0.2..=0.8).contains(&h), "n={n} i={i} h={h}");
            assert_eq!(h, integral::bar_height(i, n));
        }
    }
}

#[test]
fn first_bar_is_baseline() {
    for &n in &PARTITIONS {
        assert!(approx_eq(integral::bar_height(0, n), 0.2, 1e-12));
    }
}

#[test]
fn bars_match_pointwise_heights() {
    let bars = integral::bars(16);
    assert_eq!(bars.len(), 16);
    assert_eq!(bars[5], integral::bar_height(5, 16));
}

#[test]
fn partitions_cycle_by_doubling() {
    let mut cycle = PartitionCycle::new();
    assert_eq!(cycle.n(), 4);
    let seen: Vec<u32> = (0..10).map(|_| cycle.tick()).collect();
    assert_eq!(seen, vec![8, 16, 32, 64, 4, 8, 16, 32, 64, 4]);
    assert_eq!(cycle.bars().len(), 4);
}

#[test]
fn riemann_sum_is_mean_height() {
    for &n in &PARTITIONS {
        let sum = integral::riemann_sum(n);
        assert!((0.2..=0.8).contains(&sum), "n={n} sum={sum}");
    }
    assert_eq!(integral::riemann_sum(0), 0.0);
}

// ----------------------------------------------------------------------------
// threshold
// ----------------------------------------------------------------------------

#[test]
fn threshold_is_inclusive_at_forty() {
    for e in 10..40 {
        let s = ThresholdState::new(f64::from(e));
        assert!(!s.threshold_met(), "energy {e}");
        assert_eq!(s.state(), CollapseState::Stable);
    }
    for e in 40..=100 {
        let s = ThresholdState::new(f64::from(e));
        assert!(s.threshold_met(), "energy {e}");
        assert_eq!(s.state(), CollapseState::Imminent);
    }
    assert_eq!(ThresholdState::new(40.0).state().label(), "COLLAPSE_IMMINENT");
    assert_eq!(ThresholdState::new(39.9).state().label(), "STATE_STABLE");
}

#[test]
fn tau_decreases_with_energy() {
    assert!(approx_eq(threshold::tau_or(30.0), 100.0, 1e-12));
    let mut prev = f64::INFINITY;
    for e in 1..=100 {
        let tau = threshold::tau_or(f64::from(e));
        assert!(tau < prev, "tau({e})={tau} not below {prev}");
        prev = tau;
    }
}

#[test]
fn energy_is_clamped_and_labelled() {
    let mut s = ThresholdState::new(5.0);
    assert_eq!(s.energy(), 10.0);
    assert_eq!(s.tau_label(), "300.0");
    assert_eq!(s.fill_fraction(), 0.0);

    s.set_energy(250.0);
    assert_eq!(s.energy(), 100.0);
    assert_eq!(s.tau_label(), "30.0");
    assert_eq!(s.fill_fraction(), 1.0);

    s.set_energy(f64::NAN);
    assert_eq!(s.energy(), 100.0);

    s.set_energy(70.0);
    assert_eq!(s.tau_label(), "42.9");
}

// ----------------------------------------------------------------------------
// operator
// ----------------------------------------------------------------------------

#[test]
fn base_descriptor() {
    let d = OperatorState::new(0.0, 50.0).describe();
    assert_eq!(d.scale, 1.0);
    assert_eq!(d.rotation_deg, 0.0);
    assert_eq!(d.color, Color::Cyan);
    assert_eq!(d.glow, Glow::Low);
    assert_eq!(d.distortion, 0.0);
    assert_eq!(d.speed_multiplier, 1.0);
}

#[test]
fn gravity_alone_is_purple_and_smaller() {
    let mut s = OperatorState::new(0.0, 50.0);
    s.toggle(Operator::G);
    let d = s.describe();
    assert_eq!(d.color, Color::Purple);
    assert!(approx_eq(d.scale, 0.8, 1e-12));
    assert_eq!(d.rotation_deg, 0.0);
    assert_eq!(d.distortion, 25.0);
}

#[test]
fn exchange_overrides_coherence_color_but_keeps_scale() {
    let mut s = OperatorState::new(0.0, 50.0);
    s.toggle(Operator::C);
    s.toggle(Operator::X);
    let d = s.describe();
    assert_eq!(d.rotation_deg, 45.0);
    assert_eq!(d.color, Color::Red);
    assert!(approx_eq(d.scale, 1.3, 1e-12));
    assert_eq!(d.glow, Glow::High);
}

#[test]
fn order_is_fixed_regardless_of_toggle_sequence() {
    let mut a = OperatorState::new(0.0, 50.0);
    a.set(Operator::G, true);
    a.set(Operator::E, true);
    let mut b = OperatorState::new(0.0, 50.0);
    b.set(Operator::E, true);
    b.set(Operator::G, true);
    assert_eq!(a.describe(), b.describe());
    assert_eq!(a.describe().color, Color::Purple);

    let mut all = OperatorState::new(0.0, 50.0);
    for op in Operator::ORDER {
        all.set(op, true);
    }
    let d = all.describe();
    assert_eq!(d.color, Color::Purple);
    assert!(approx_eq(d.scale, 1.3 * 0.8, 1e-12));
    assert_eq!(d.rotation_deg, 45.0);
}

#[test]
fn toggle_flips_back() {
    let mut s = OperatorState::new(0.0, 50.0);
    assert!(s.toggle(Operator::E));
    assert!(!s.toggle(Operator::E));
    assert_eq!(s.describe().color, Color::Cyan);
}

#[test]
fn distortion_drives_morph() {
    let mut s = OperatorState::new(10.0, 50.0);
    let d = s.describe();
    assert!(approx_eq(d.distortion, 4.0, 1e-12));
    assert!(!d.morphing());
    assert!(d.keyframes().is_none());
    assert_eq!(d.shape_at(1.7), BlobFrame::CIRCLE);

    s.set_distortion(100.0);
    s.set(Operator::G, true);
    let d = s.describe();
    assert_eq!(d.distortion, 65.0);
    let frames = d.keyframes().expect("morph active");
    assert_eq!(d.shape_at(0.0), frames[0]);
    assert_eq!(d.shape_at(d.morph_period()), frames[0]);
    for frame in frames {
        assert!(frame.0.iter().all(|r| (0.0..=100.0).contains(r)));
    }
}

#[test]
fn speed_scales_periods() {
    let mut s = OperatorState::new(30.0, 100.0);
    let fast = s.describe();
    assert_eq!(fast.speed_multiplier, 2.0);
    s.set_speed(25.0);
    let slow = s.describe();
    assert_eq!(slow.speed_multiplier, 0.5);
    assert!(approx_eq(slow.morph_period(), fast.morph_period() * 4.0, 1e-9));

    s.set_speed(0.0);
    assert_eq!(s.speed(), 10.0);
    assert!(s.describe().speed_multiplier >= MIN_SPEED_MULTIPLIER);
}

#[test]
fn transform_shows_exchange_rotation_as_is() {
    let mut s = OperatorState::new(0.0, 50.0);
    s.set(Operator::X, true);
    assert_eq!(s.describe().transform_css(), "scale(1.000) rotate(45.00deg)");
    s.set(Operator::C, true);
    assert_eq!(s.describe().transform_css(), "scale(1.300) rotate(45.00deg)");
}
