//! Integration tests for the ActuatorService → Controller → board pipeline.
//!
//! The service runs against the loopback broker, a fake clock and the
//! recording board, exactly as the actuator binary wires it on hardware.

use vitalink::adapters::link::Link;
use vitalink::adapters::loopback::{LoopbackBroker, LoopbackClient};
use vitalink::app::events::AppEvent;
use vitalink::app::ActuatorService;
use vitalink::config::{SystemConfig, DEFAULT_TOPIC};
use vitalink::controller::{AlertKind, Bound, DisplayMode};
use vitalink::display::{Frame, DOT_UNITS};
use vitalink::error::DecodeError;

use crate::mock_hw::{FakeClock, MockActuatorHw, RecordingDelay, RecordingSink};

struct Rig {
    broker: LoopbackBroker,
    link: Link<LoopbackClient, RecordingDelay>,
    hw: MockActuatorHw,
    clock: FakeClock,
    sink: RecordingSink,
    service: ActuatorService,
}

impl Rig {
    fn new() -> Self {
        let config = SystemConfig::default();
        let broker = LoopbackBroker::new();
        let client = broker.client(&config.actuator_client_id);
        let link = Link::subscriber_from_config(client, RecordingDelay::default(), &config);
        let clock = FakeClock::at(0);
        let mut sink = RecordingSink::new();
        let mut service = ActuatorService::new(&config, 0);
        service.start(&mut sink);
        Self {
            broker,
            link,
            hw: MockActuatorHw::new(),
            clock,
            sink,
            service,
        }
    }

    fn cycle(&mut self) {
        self.service
            .run_cycle(&mut self.link, &mut self.hw, &self.clock, &mut self.sink);
    }

    /// Advance the clock by `ms` and run one cycle.
    fn tick(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.cycle();
    }

    fn link_delays(&self) -> Vec<u32> {
        self.link.delay().delays_ms.clone()
    }

    fn deliver(&self, payload: &str) {
        self.broker.inject(DEFAULT_TOPIC, payload.as_bytes());
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn first_cycle_connects_and_shows_placeholder() {
    let mut rig = Rig::new();
    rig.cycle();

    assert_eq!(rig.sink.events[0], AppEvent::Started(vitalink::app::events::NodeRole::Actuator));
    assert!(rig.sink.events.contains(&AppEvent::LinkUp { attempts: 1 }));
    assert_eq!(rig.hw.last_frame(), Some(Frame::dashes()));
    assert_eq!(rig.hw.indicator, vec![false]);
}

// ── Message → alert → outputs ─────────────────────────────────

#[test]
fn fever_raises_alert_and_lights_red() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.deliver(r#"{"body_temp":39.0,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);

    assert!(rig.hw.alert_lit());
    assert_eq!(rig.hw.last_frame(), Some(Frame::numeric(390, DOT_UNITS, true)));
    assert!(rig.sink.events.contains(&AppEvent::AlertRaised(AlertKind::HighBodyTemp)));
}

#[test]
fn alert_clears_when_reading_returns_to_band() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.deliver(r#"{"body_temp":35.0,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    assert!(rig.hw.alert_lit());

    rig.deliver(r#"{"body_temp":37.0,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    assert!(!rig.hw.alert_lit());

    let alerts: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::AlertRaised(_) | AppEvent::AlertCleared))
        .cloned()
        .collect();
    assert_eq!(
        alerts,
        vec![AppEvent::AlertRaised(AlertKind::LowBodyTemp), AppEvent::AlertCleared]
    );
}

#[test]
fn fall_alone_raises_alert() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.deliver(r#"{"body_temp":37.0,"ntc_temp":24.0,"fall_detected":true}"#);
    rig.tick(100);
    assert!(rig.hw.alert_lit());
    assert!(rig.sink.events.contains(&AppEvent::AlertRaised(AlertKind::FallDetected)));
}

#[test]
fn garbage_payload_is_reported_and_state_kept() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.deliver(r#"{"body_temp":39.0,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    rig.broker.inject(DEFAULT_TOPIC, &[0xFF, 0xFE, 0x00]);
    rig.tick(100);

    assert!(rig.sink.events.contains(&AppEvent::DecodeFailed(DecodeError::NotUtf8)));
    assert_eq!(rig.service.controller().state().latest().body_temp, 39.0);
    assert!(rig.hw.alert_lit());
}

// ── Output discipline ─────────────────────────────────────────

#[test]
fn indicator_every_cycle_display_only_on_change() {
    let mut rig = Rig::new();
    for _ in 0..5 {
        rig.tick(100);
    }
    assert_eq!(rig.hw.indicator.len(), 5);
    assert_eq!(rig.hw.frames.len(), 1);

    rig.deliver(r#"{"body_temp":36.5,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    rig.tick(100);
    assert_eq!(rig.hw.frames.len(), 2);
}

#[test]
fn status_report_is_periodic() {
    let mut rig = Rig::new();
    for _ in 0..25 {
        rig.tick(100);
    }
    // 2500 ms at a 1000 ms interval.
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::Status(_))), 2);
}

// ── Joystick ──────────────────────────────────────────────────

#[test]
fn button_cycles_modes_and_display_follows() {
    let mut rig = Rig::new();
    rig.cycle();

    rig.hw.press(true);
    rig.tick(300);
    rig.hw.press(false);
    assert_eq!(rig.service.controller().mode(), DisplayMode::AdjustUpper);
    // U380: tag on digit 0, value right-aligned.
    assert_eq!(rig.hw.last_frame().map(|f| f.segments()[0]), Some(0x3E));

    rig.hw.press(true);
    rig.tick(300);
    rig.hw.press(false);
    assert_eq!(rig.service.controller().mode(), DisplayMode::AdjustLower);

    rig.hw.press(true);
    rig.tick(300);
    rig.hw.press(false);
    assert_eq!(rig.service.controller().mode(), DisplayMode::ReportStatus);
    assert_eq!(rig.hw.last_frame(), Some(Frame::word("GOOD")));

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })), 3);
}

#[test]
fn edit_mode_times_out_back_to_current_data() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.hw.press(true);
    rig.tick(300);
    rig.hw.press(false);

    rig.tick(5000);
    assert_eq!(rig.service.controller().mode(), DisplayMode::AdjustUpper);
    rig.tick(100);
    assert_eq!(rig.service.controller().mode(), DisplayMode::CurrentData);
    assert!(rig.sink.events.contains(&AppEvent::ModeTimedOut { from: DisplayMode::AdjustUpper }));
}

#[test]
fn lowering_upper_bound_raises_alert() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.deliver(r#"{"body_temp":37.9,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    assert!(!rig.hw.alert_lit());

    rig.hw.press(true);
    rig.tick(300);
    rig.hw.press(false);

    // 38.0 → 37.8 in two cooldown windows.
    rig.hw.push_y(0);
    rig.tick(300);
    rig.tick(300);
    rig.hw.push_y(2047);
    rig.tick(100);

    assert_eq!(rig.service.controller().state().thresholds().upper_deci(), 378);
    assert!(rig.hw.alert_lit());
    assert!(rig.sink.events.contains(&AppEvent::ThresholdChanged {
        bound: Bound::Upper,
        value_c: 37.8,
        clamped: false,
    }));
    assert!(rig.sink.events.contains(&AppEvent::AlertRaised(AlertKind::HighBodyTemp)));
}

// ── Link loss ─────────────────────────────────────────────────

#[test]
fn dropped_session_reconnects_before_any_update() {
    let mut rig = Rig::new();
    rig.cycle();
    rig.broker.drop_all();
    rig.broker.fail_next_connects(2);
    rig.tick(100);

    assert!(rig.sink.events.contains(&AppEvent::LinkDown));
    assert!(rig.link.is_up());
    assert_eq!(rig.link_delays(), vec![5000, 5000]);
    assert_eq!(rig.broker.connect_attempts(), 4);

    // Resubscribed: new deliveries arrive.
    rig.deliver(r#"{"body_temp":39.5,"ntc_temp":24.0,"fall_detected":false}"#);
    rig.tick(100);
    assert!(rig.hw.alert_lit());
}
