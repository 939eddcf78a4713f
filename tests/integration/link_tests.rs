//! Link + loopback transport: reconnect policy and delivery.

use vitalink::adapters::link::Link;
use vitalink::adapters::loopback::LoopbackBroker;
use vitalink::app::events::AppEvent;
use vitalink::app::ports::{LinkPort, TransportPort};

use crate::mock_hw::{RecordingDelay, RecordingSink};

#[test]
fn n_failures_cost_n_backoffs_and_one_subscription() {
    let broker = LoopbackBroker::new();
    let client = broker.client("sub");
    let mut link = Link::subscriber(client, RecordingDelay::default(), "esp32/health", 5000);
    let mut sink = RecordingSink::new();

    broker.fail_next_connects(4);
    link.ensure_connected(&mut sink);

    assert_eq!(link.delay().delays_ms, vec![5000; 4]);
    assert_eq!(broker.connect_attempts(), 5);
    assert_eq!(sink.events.last(), Some(&AppEvent::LinkUp { attempts: 5 }));

    // Exactly one subscription: one publish, one delivery.
    broker.inject("esp32/health", b"{}");
    let mut got = 0;
    link.poll(&mut |_: &str, _: &[u8]| got += 1);
    assert_eq!(got, 1);
}

#[test]
fn publisher_to_subscriber_round_trip() {
    let broker = LoopbackBroker::new();
    let mut pubr = Link::publisher(broker.client("pub"), RecordingDelay::default(), "t", 10);
    let mut subr = Link::subscriber(broker.client("sub"), RecordingDelay::default(), "t", 10);
    let mut sink = RecordingSink::new();
    pubr.ensure_connected(&mut sink);
    subr.ensure_connected(&mut sink);

    pubr.publish(b"one").unwrap();
    pubr.publish(b"two").unwrap();

    let mut got = Vec::new();
    let n = subr.poll(&mut |topic: &str, payload: &[u8]| got.push((topic.to_string(), payload.to_vec())));
    assert_eq!(n, 2);
    assert_eq!(got[0], ("t".to_string(), b"one".to_vec()));
    assert_eq!(got[1], ("t".to_string(), b"two".to_vec()));
}

#[test]
fn messages_published_while_down_are_lost() {
    let broker = LoopbackBroker::new();
    let mut pubr = Link::publisher(broker.client("pub"), RecordingDelay::default(), "t", 10);
    let mut subr = Link::subscriber(broker.client("sub"), RecordingDelay::default(), "t", 10);
    let mut sink = RecordingSink::new();
    pubr.ensure_connected(&mut sink);
    subr.ensure_connected(&mut sink);

    broker.drop_all();
    assert!(!subr.transport().is_connected());
    pubr.ensure_connected(&mut sink);
    pubr.publish(b"missed").unwrap();

    subr.ensure_connected(&mut sink);
    let mut got = 0;
    subr.poll(&mut |_: &str, _: &[u8]| got += 1);
    assert_eq!(got, 0);
    assert_eq!(sink.count(|e| *e == AppEvent::LinkDown), 2);
}

#[test]
fn full_inbox_drops_and_counts() {
    let broker = LoopbackBroker::new();
    let mut subr = Link::subscriber(broker.client("sub"), RecordingDelay::default(), "t", 10);
    subr.ensure_connected(&mut RecordingSink::new());

    for _ in 0..20 {
        broker.inject("t", b"x");
    }
    let mut got = 0;
    subr.poll(&mut |_: &str, _: &[u8]| got += 1);
    assert_eq!(got, vitalink::adapters::loopback::LOOPBACK_DEPTH);
    assert_eq!(subr.transport().dropped(), 4);
}
