//! Behavioural scenarios for the actuator controller, driven through the
//! public `Controller` API with explicit timestamps.

use vitalink::config::{SystemConfig, DEFAULT_TOPIC};
use vitalink::controller::alert::evaluate;
use vitalink::controller::{Controller, DisplayMode, InputOutcome, InputSample, ThresholdConfig};
use vitalink::display::{render, Frame};
use vitalink::message::{decode, decode_payload, StatusMessage};

const CENTER: u16 = 2047;

fn idle() -> InputSample {
    InputSample::centered(CENTER)
}

fn press() -> InputSample {
    InputSample {
        button: true,
        ..idle()
    }
}

fn push_y(y: u16) -> InputSample {
    InputSample { y, ..idle() }
}

fn controller() -> Controller {
    Controller::new(&SystemConfig::default(), 0)
}

/// Press once at `t`, returning the controller in AdjustUpper.
fn enter_adjust_upper(c: &mut Controller, t: u64) {
    assert!(matches!(c.poll_input(press(), t), InputOutcome::ModeAdvanced { .. }));
    assert_eq!(c.mode(), DisplayMode::AdjustUpper);
}

// ── Alert evaluation ──────────────────────────────────────────

#[test]
fn alert_against_default_band() {
    let t = ThresholdConfig::default();
    assert!(evaluate(&StatusMessage::new(39.0, 24.0, false), &t));
    assert!(!evaluate(&StatusMessage::new(37.0, 24.0, false), &t));
    assert!(evaluate(&StatusMessage::new(37.0, 24.0, true), &t));
}

#[test]
fn band_edges_are_inclusive() {
    let t = ThresholdConfig::default();
    assert!(!evaluate(&StatusMessage::new(38.0, 24.0, false), &t));
    assert!(!evaluate(&StatusMessage::new(36.0, 24.0, false), &t));
}

#[test]
fn disconnected_probe_alerts_low() {
    let mut c = controller();
    c.on_message(DEFAULT_TOPIC, br#"{"body_temp":-127.0,"ntc_temp":24.0,"fall_detected":false}"#);
    assert!(c.alert());
}

// ── Threshold clamping through the joystick ───────────────────

#[test]
fn lower_bound_walks_down_and_pins_at_limit() {
    let mut c = controller();
    c.poll_input(press(), 300);
    c.poll_input(press(), 600);
    assert_eq!(c.mode(), DisplayMode::AdjustLower);

    // 40 cooldown windows take 36.0 down by 4.0 °C.
    let mut t = 600;
    for _ in 0..40 {
        t += 201;
        c.poll_input(push_y(0), t);
    }
    assert_eq!(c.state().thresholds().lower_deci(), 320);

    // 60 windows in total reach the 30.0 floor; further pushes stay there.
    for i in 0..40 {
        t += 201;
        let out = c.poll_input(push_y(0), t);
        if i >= 20 {
            assert_eq!(
                out,
                InputOutcome::ThresholdAdjusted {
                    bound: vitalink::controller::Bound::Lower,
                    value_c: 30.0,
                    clamped: true,
                }
            );
        }
    }
    assert_eq!(c.state().thresholds().lower_deci(), 300);
    assert_eq!(c.state().thresholds().upper_deci(), 380);
    assert_eq!(c.mode(), DisplayMode::AdjustLower);
}

#[test]
fn upper_bound_cannot_cross_lower_plus_gap() {
    let mut c = controller();
    enter_adjust_upper(&mut c, 300);
    let mut t = 300;
    for _ in 0..50 {
        t += 201;
        c.poll_input(push_y(0), t);
    }
    // 36.0 + 0.5
    assert_eq!(c.state().thresholds().upper_deci(), 365);
}

#[test]
fn deadzone_push_does_nothing() {
    let mut c = controller();
    enter_adjust_upper(&mut c, 300);
    assert_eq!(c.poll_input(push_y(CENTER + 500), 600), InputOutcome::Idle);
    assert_eq!(c.state().thresholds().upper_deci(), 380);
    assert!(matches!(
        c.poll_input(push_y(CENTER + 501), 700),
        InputOutcome::ThresholdAdjusted { clamped: false, .. }
    ));
    assert_eq!(c.state().thresholds().upper_deci(), 381);
}

// ── Idle timeout ──────────────────────────────────────────────

#[test]
fn idle_timeout_returns_to_current_data() {
    let mut c = controller();
    enter_adjust_upper(&mut c, 300);

    assert_eq!(c.poll_input(idle(), 300 + 5000), InputOutcome::Idle);
    assert_eq!(
        c.poll_input(idle(), 300 + 5001),
        InputOutcome::TimedOut { from: DisplayMode::AdjustUpper }
    );
    assert_eq!(c.mode(), DisplayMode::CurrentData);
    // The timeout is not input; the activity clock is untouched.
    assert_eq!(c.state().last_input_activity(), 300);
}

#[test]
fn input_at_4999_restarts_the_window() {
    let mut c = controller();
    enter_adjust_upper(&mut c, 300);

    let t_input = 300 + 4999;
    assert!(matches!(
        c.poll_input(push_y(4095), t_input),
        InputOutcome::ThresholdAdjusted { .. }
    ));
    assert_eq!(c.poll_input(idle(), 300 + 5001), InputOutcome::Idle);
    assert_eq!(c.mode(), DisplayMode::AdjustUpper);

    assert_eq!(c.poll_input(idle(), t_input + 5000), InputOutcome::Idle);
    assert!(matches!(c.poll_input(idle(), t_input + 5001), InputOutcome::TimedOut { .. }));
}

#[test]
fn current_data_never_times_out() {
    let mut c = controller();
    assert_eq!(c.poll_input(idle(), 60_000), InputOutcome::Idle);
    assert_eq!(c.mode(), DisplayMode::CurrentData);
}

#[test]
fn four_presses_return_to_start() {
    let mut c = controller();
    for k in 1..=4 {
        c.poll_input(press(), k * 300);
    }
    assert_eq!(c.mode(), DisplayMode::CurrentData);
}

// ── Rendering ─────────────────────────────────────────────────

#[test]
fn report_status_prefers_alert_over_fall() {
    let t = ThresholdConfig::default();
    assert_eq!(render(DisplayMode::ReportStatus, true, true, 39.0, &t), Frame::word("ALER"));
    assert_eq!(render(DisplayMode::ReportStatus, false, true, 37.0, &t), Frame::word("FALL"));
    assert_eq!(render(DisplayMode::ReportStatus, false, false, 37.0, &t), Frame::word("GOOD"));
}

#[test]
fn controller_frame_before_and_after_first_message() {
    let mut c = controller();
    assert_eq!(c.frame(), Frame::dashes());
    c.on_message(DEFAULT_TOPIC, br#"{"body_temp":36.5,"ntc_temp":24.0,"fall_detected":false}"#);
    assert_eq!(
        c.frame(),
        Frame::numeric(365, vitalink::display::DOT_UNITS, true)
    );
}

// ── Decoding ──────────────────────────────────────────────────

#[test]
fn missing_fall_key_defaults_to_false() {
    let msg = decode(r#"{"body_temp":36.6,"ntc_temp":24.0}"#).unwrap();
    assert!(!msg.fall_detected);
    assert_eq!(msg.body_temp, 36.6);
}

#[test]
fn null_ntc_decodes_to_nan() {
    let msg = decode(r#"{"body_temp":36.6,"ntc_temp":null,"fall_detected":false}"#).unwrap();
    assert!(msg.ntc_temp.is_nan());
}

#[test]
fn bare_nan_from_older_nodes_uses_fallback() {
    let payload = br#"{"body_temp":36.5,"ntc_temp":nan,"fall_detected":true}"#;
    let msg = decode_payload(payload, true).unwrap();
    assert_eq!(msg.body_temp, 36.5);
    assert!(msg.ntc_temp.is_nan());
    assert!(msg.fall_detected);

    assert!(decode_payload(payload, false).is_err());
}
