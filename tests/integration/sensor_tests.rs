//! Integration tests for the SensorService → Link → broker pipeline.

use vitalink::adapters::link::Link;
use vitalink::adapters::loopback::{LoopbackBroker, LoopbackClient};
use vitalink::app::events::AppEvent;
use vitalink::app::ports::{EventSink, LinkPort};
use vitalink::app::SensorService;
use vitalink::config::{SystemConfig, DEFAULT_TOPIC};
use vitalink::error::TransportError;
use vitalink::message;

use crate::mock_hw::{FakeClock, MockSensorHw, RecordingDelay, RecordingSink};

fn rig() -> (
    LoopbackBroker,
    Link<LoopbackClient, RecordingDelay>,
    SensorService,
    RecordingSink,
) {
    let config = SystemConfig::default();
    let broker = LoopbackBroker::new();
    let client = broker.client(&config.sensor_client_id);
    let link = Link::publisher_from_config(client, RecordingDelay::default(), &config);
    let mut sink = RecordingSink::new();
    let mut service = SensorService::new(&config);
    service.start(&mut sink);
    (broker, link, service, sink)
}

#[test]
fn first_cycle_publishes_immediately() {
    let (broker, mut link, mut service, mut sink) = rig();
    let mut hw = MockSensorHw::new(36.5, 2047, 1.0);
    let clock = FakeClock::at(0);

    let msg = service.run_cycle(&mut link, &mut hw, &clock, &mut sink).unwrap();
    assert_eq!(msg.body_temp, 36.5);
    assert!(!msg.fall_detected);
    assert!((msg.ntc_temp - 25.0).abs() < 0.1);

    let published = broker.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, DEFAULT_TOPIC);
    let decoded = message::decode(std::str::from_utf8(&published[0].1).unwrap()).unwrap();
    assert_eq!(decoded.body_temp, 36.5);
    assert!(sink.events.contains(&AppEvent::Published(msg)));
}

#[test]
fn publishes_once_per_interval() {
    let (broker, mut link, mut service, mut sink) = rig();
    let mut hw = MockSensorHw::new(36.5, 2047, 1.0);
    let clock = FakeClock::at(0);

    for _ in 0..=50 {
        service.run_cycle(&mut link, &mut hw, &clock, &mut sink);
        clock.advance(100);
    }
    // t = 0, 2000, 4000 within 0..=5000 ms.
    assert_eq!(broker.published().len(), 3);
    assert_eq!(hw.lcd.len(), 3);
}

#[test]
fn lcd_shows_the_published_reading() {
    let (_broker, mut link, mut service, mut sink) = rig();
    let mut hw = MockSensorHw::new(38.26, 2047, 0.05);
    service.run_cycle(&mut link, &mut hw, &FakeClock::at(0), &mut sink);
    assert_eq!(hw.lcd, vec![("Body:38.3C".to_string(), "Fall:YES".to_string())]);
}

#[test]
fn free_fall_and_rail_values() {
    let (broker, mut link, mut service, mut sink) = rig();
    let mut hw = MockSensorHw::new(-127.0, 4095, -0.1);
    let msg = service.run_cycle(&mut link, &mut hw, &FakeClock::at(0), &mut sink).unwrap();

    assert!(msg.fall_detected);
    assert!(msg.ntc_temp.is_nan());
    assert_eq!(msg.body_temp, -127.0);

    // NaN travels as null and decodes back to NaN.
    let payload = String::from_utf8(broker.published()[0].1.clone()).unwrap();
    assert!(payload.contains(r#""ntc_temp":null"#));
    let back = message::decode(&payload).unwrap();
    assert!(back.ntc_temp.is_nan());
}

#[test]
fn reconnect_blocks_then_publishes() {
    let (broker, mut link, mut service, mut sink) = rig();
    broker.fail_next_connects(3);
    let mut hw = MockSensorHw::new(36.5, 2047, 1.0);
    service.run_cycle(&mut link, &mut hw, &FakeClock::at(0), &mut sink);

    assert_eq!(link.delay().delays_ms, vec![5000, 5000, 5000]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ConnectFailed { .. })), 3);
    assert_eq!(broker.published().len(), 1);
}

/// Session that stays up but refuses every publish.
struct RefusingLink;

impl LinkPort for RefusingLink {
    fn ensure_connected(&mut self, _sink: &mut impl EventSink) {}

    fn poll(&mut self, _on_message: &mut dyn FnMut(&str, &[u8])) -> usize {
        0
    }

    fn publish(&mut self, _payload: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::PublishFailed)
    }
}

#[test]
fn publish_failure_is_reported_not_fatal() {
    let config = SystemConfig::default();
    let mut service = SensorService::new(&config);
    let mut sink = RecordingSink::new();
    let mut hw = MockSensorHw::new(36.5, 2047, 1.0);
    let clock = FakeClock::at(0);

    let msg = service.run_cycle(&mut RefusingLink, &mut hw, &clock, &mut sink);
    assert!(msg.is_some());
    assert_eq!(
        sink.events,
        vec![AppEvent::PublishFailed(TransportError::PublishFailed)]
    );
    // The LCD still shows the reading.
    assert_eq!(hw.lcd.len(), 1);

    // The failed sample still counts against the interval.
    clock.advance(1000);
    assert!(service.run_cycle(&mut RefusingLink, &mut hw, &clock, &mut sink).is_none());
}
