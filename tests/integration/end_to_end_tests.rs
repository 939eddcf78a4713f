//! Both nodes on one loopback broker: sensor readings drive the actuator.

use vitalink::adapters::link::Link;
use vitalink::adapters::loopback::LoopbackBroker;
use vitalink::app::events::AppEvent;
use vitalink::app::{ActuatorService, SensorService};
use vitalink::config::SystemConfig;
use vitalink::controller::AlertKind;
use vitalink::display::{Frame, DOT_UNITS};

use crate::mock_hw::{FakeClock, MockActuatorHw, MockSensorHw, RecordingDelay, RecordingSink};

#[test]
fn sensor_reading_reaches_the_actuator_display() {
    let config = SystemConfig::default();
    let broker = LoopbackBroker::new();
    let clock = FakeClock::at(0);

    let mut sensor_link =
        Link::publisher_from_config(broker.client(&config.sensor_client_id), RecordingDelay::default(), &config);
    let mut actuator_link = Link::subscriber_from_config(
        broker.client(&config.actuator_client_id),
        RecordingDelay::default(),
        &config,
    );

    let mut sensor = SensorService::new(&config);
    let mut actuator = ActuatorService::new(&config, 0);
    let mut sensor_hw = MockSensorHw::new(36.6, 2047, 1.0);
    let mut actuator_hw = MockActuatorHw::new();
    let mut sensor_events = RecordingSink::new();
    let mut actuator_events = RecordingSink::new();

    // Actuator subscribes first; a publish before that would be lost.
    actuator.run_cycle(&mut actuator_link, &mut actuator_hw, &clock, &mut actuator_events);
    sensor.run_cycle(&mut sensor_link, &mut sensor_hw, &clock, &mut sensor_events);
    clock.advance(100);
    actuator.run_cycle(&mut actuator_link, &mut actuator_hw, &clock, &mut actuator_events);

    assert_eq!(actuator_hw.last_frame(), Some(Frame::numeric(366, DOT_UNITS, true)));
    assert!(!actuator_hw.alert_lit());
    assert_eq!(broker.client_ids(), vec!["ESP32Client", "ESP32_SubscriberClient"]);

    // Patient falls two seconds later.
    sensor_hw.acc_z = 0.05;
    for _ in 0..20 {
        clock.advance(100);
        sensor.run_cycle(&mut sensor_link, &mut sensor_hw, &clock, &mut sensor_events);
        actuator.run_cycle(&mut actuator_link, &mut actuator_hw, &clock, &mut actuator_events);
    }
    assert!(actuator_hw.alert_lit());
    assert!(actuator_events
        .events
        .contains(&AppEvent::AlertRaised(AlertKind::FallDetected)));
    assert_eq!(sensor_hw.lcd.last().map(|l| l.1.as_str()), Some("Fall:YES"));
}

#[test]
fn saturated_ntc_crosses_the_wire_as_nan() {
    let config = SystemConfig::default();
    let broker = LoopbackBroker::new();
    let clock = FakeClock::at(0);
    let mut sensor_link = Link::publisher_from_config(broker.client("s"), RecordingDelay::default(), &config);
    let mut actuator_link = Link::subscriber_from_config(broker.client("a"), RecordingDelay::default(), &config);
    let mut sensor = SensorService::new(&config);
    let mut actuator = ActuatorService::new(&config, 0);
    let mut sensor_hw = MockSensorHw::new(37.0, 0, 1.0);
    let mut actuator_hw = MockActuatorHw::new();
    let mut sink = RecordingSink::new();

    actuator.run_cycle(&mut actuator_link, &mut actuator_hw, &clock, &mut sink);
    sensor.run_cycle(&mut sensor_link, &mut sensor_hw, &clock, &mut sink);
    actuator.run_cycle(&mut actuator_link, &mut actuator_hw, &clock, &mut sink);

    let latest = actuator.controller().state().latest();
    assert_eq!(latest.body_temp, 37.0);
    assert!(latest.ntc_temp.is_nan());
    assert!(!actuator_hw.alert_lit());
}
