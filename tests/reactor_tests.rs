use std::time::Duration;

use mimic::config::EngineConfig;
use mimic::kernel::emotion::{GroupedState, RawEmotionLabel};
use mimic::kernel::event::{Event, FrameSignal, InputContent, InputEvent};
use mimic::kernel::mode::Mode;
use mimic::kernel::reactor::{Cause, Reactor, SideEffect};
use mimic::kernel::intent::Intent;
use mimic::kernel::telemetry::event::TelemetryEvent;
use mimic::kernel::time::Timestamp;
use mimic::outputs::{ActuatorCommand, ActuatorDriver, RecordingActuator};
use mimic::vision::FaceBox;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn reactor() -> (mpsc::Sender<Event>, Reactor) {
    let (tx, rx) = mpsc::channel(100);
    let reactor = Reactor::from_config(rx, &EngineConfig::default()).unwrap();
    (tx, reactor)
}

fn say(text: &str) -> Event {
    InputEvent::utterance("test", text).into()
}

fn frame(label: RawEmotionLabel, secs: f64) -> Event {
    InputEvent::frame("test", label, Timestamp::from_secs(secs)).into()
}

fn happy_burst(start: f64, count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| frame(RawEmotionLabel::Happy, start + i as f64 * 0.1))
        .collect()
}

#[tokio::test]
async fn test_halt_scenario_stops_and_emits_neutral() {
    let (_tx, mut reactor) = reactor();

    reactor.tick_step(vec![say("imitate")]);
    assert_eq!(reactor.gate.mode(), Mode::Imitate);

    let effects = reactor.tick_step(vec![say("please halt now")]);
    assert_eq!(
        effects,
        vec![SideEffect {
            command: ActuatorCommand::Neutral,
            cause: Cause::Voice(Intent::Stop),
        }]
    );
    assert_eq!(reactor.gate.mode(), Mode::Idle);
}

#[tokio::test]
async fn test_imitation_sends_happy_exactly_once() {
    let (_tx, mut reactor) = reactor();

    let effects = reactor.tick_step(vec![say("mirror me")]);
    assert!(effects.is_empty(), "IMITATE emits nothing");

    // 8 happy frames 0.1s apart, one at a time
    let mut sent = Vec::new();
    for (i, event) in happy_burst(0.0, 8).into_iter().enumerate() {
        for effect in reactor.tick_step(vec![event]) {
            sent.push((i, effect.command));
        }
    }

    assert_eq!(sent, vec![(5, ActuatorCommand::Happy)], "happy on the 6th frame only");
    assert_eq!(reactor.stabilizer.stable_state(), Some(GroupedState::Happy));
}

#[tokio::test]
async fn test_idle_mode_swallows_transitions() {
    let (_tx, mut reactor) = reactor();

    let effects = reactor.tick_step(happy_burst(0.0, 8));
    assert!(effects.is_empty());
    // state still tracked for display
    assert_eq!(reactor.status().stable_state, Some(GroupedState::Happy));

    let snap = reactor.telemetry.snapshot();
    assert_eq!(snap.stability_stats.transitions, 1);
    assert_eq!(snap.stability_stats.suppressed, 1);
}

#[tokio::test]
async fn test_forced_emotion_cancels_imitation() {
    let (_tx, mut reactor) = reactor();

    reactor.tick_step(vec![say("copy my face")]);
    let effects = reactor.tick_step(vec![say("be furious")]);
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].command, ActuatorCommand::Angry);
    assert_eq!(reactor.gate.mode(), Mode::Idle);

    // now idle: emotion stream no longer drives the head
    assert!(reactor.tick_step(happy_burst(0.0, 8)).is_empty());
}

#[tokio::test]
async fn test_no_match_is_a_quiet_no_op() {
    let (_tx, mut reactor) = reactor();

    let effects = reactor.tick_step(vec![say("xyzzy qwv"), say("")]);
    assert!(effects.is_empty());
    assert_eq!(reactor.gate.mode(), Mode::Idle);

    let rejected: Vec<_> = reactor
        .telemetry
        .events()
        .filter(|e| matches!(e, TelemetryEvent::IntentRejected { .. }))
        .cloned()
        .collect();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[1], TelemetryEvent::IntentRejected { best_score: None });
}

#[tokio::test]
async fn test_status_is_published_to_subscribers() {
    let (_tx, mut reactor) = reactor();
    let mut status = reactor.subscribe();

    reactor.tick_step(vec![say("imitate")]);
    assert!(status.has_changed().unwrap());
    assert_eq!(status.borrow_and_update().mode, Mode::Imitate);

    let face = FaceBox::new(10.0, 10.0, 80.0, 80.0);
    reactor.tick_step(vec![Event::Input(InputEvent {
        source: "test".into(),
        content: InputContent::Frame(FrameSignal {
            label: RawEmotionLabel::Sad,
            at: Timestamp::from_secs(0.0),
            face: Some(face),
        }),
    })]);
    assert_eq!(status.borrow_and_update().face, Some(face));

    // nothing changed, nothing published
    reactor.tick_step(vec![]);
    assert!(!status.has_changed().unwrap());
}

#[tokio::test]
async fn test_face_only_update_moves_display_box() {
    let (_tx, mut reactor) = reactor();
    let mut status = reactor.subscribe();

    let face = FaceBox::new(40.0, 20.0, 90.0, 90.0);
    let effects = reactor.tick_step(vec![Event::Input(InputEvent {
        source: "test".into(),
        content: InputContent::Face(face),
    })]);

    assert!(effects.is_empty());
    assert_eq!(status.borrow_and_update().face, Some(face));
    assert_eq!(reactor.stabilizer.window_len(), 0, "no vote without a label");
}

#[tokio::test]
async fn test_run_drives_actuator_until_producers_hang_up() {
    let (tx, mut reactor) = reactor();
    let recorder = RecordingActuator::new();
    let mut actuator = ActuatorDriver::new(Box::new(recorder.clone()));

    let producer = tokio::spawn(async move {
        tx.send(say("imitate")).await.unwrap();
        for event in happy_burst(0.0, 8) {
            tx.send(event).await.unwrap();
        }
        tx.send(say("look left")).await.unwrap();
        // tx dropped here
    });

    let cancel = CancellationToken::new();
    tokio::time::timeout(Duration::from_secs(5), reactor.run(&mut actuator, cancel.clone()))
        .await
        .expect("reactor should stop once producers are gone");
    producer.await.unwrap();

    assert_eq!(recorder.sent(), vec![ActuatorCommand::Happy, ActuatorCommand::LookLeft]);
    assert!(recorder.is_closed(), "actuator released on exit");
    assert!(cancel.is_cancelled(), "producers are told to stop");
}

#[tokio::test]
async fn test_run_stops_on_cancellation() {
    let (_tx, mut reactor) = reactor();
    let recorder = RecordingActuator::new();
    let mut actuator = ActuatorDriver::new(Box::new(recorder.clone()));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    tokio::time::timeout(Duration::from_secs(5), reactor.run(&mut actuator, cancel))
        .await
        .expect("reactor should honor cancellation");
    assert!(recorder.is_closed());
}

#[tokio::test]
async fn test_unavailable_actuator_is_not_fatal() {
    let (_tx, mut reactor) = reactor();
    let mut actuator = ActuatorDriver::unavailable();

    let effects = reactor.tick_step(vec![say("stop"), say("smile")]);
    assert_eq!(effects.len(), 2);
    reactor.execute(effects, &mut actuator);

    let snap = reactor.telemetry.snapshot();
    assert_eq!(snap.actuator_stats.sent, 0);
    assert_eq!(snap.actuator_stats.dropped, 2);
    assert_eq!(snap.resolver_stats.resolved, 2);

    // engine keeps working
    reactor.tick_step(vec![say("imitate")]);
    assert_eq!(reactor.gate.mode(), Mode::Imitate);
}
