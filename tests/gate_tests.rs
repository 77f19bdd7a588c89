use mimic::kernel::emotion::{GroupedState, StateTransition};
use mimic::kernel::gate::ActuatorGate;
use mimic::kernel::intent::Intent;
use mimic::kernel::mode::{Mode, ModeGraph};
use mimic::kernel::time::Timestamp;
use mimic::outputs::ActuatorCommand;

fn to(state: GroupedState) -> StateTransition {
    StateTransition {
        from: None,
        to: state,
        at: Timestamp::from_secs(1.0),
    }
}

#[test]
fn test_imitate_then_transition_forwards() {
    let mut gate = ActuatorGate::new();
    assert_eq!(gate.mode(), Mode::Idle);

    let d = gate.on_intent(Intent::Imitate);
    assert_eq!(d.command, None, "IMITATE is a mode switch only");
    assert!(d.mode_changed());
    assert_eq!(gate.mode(), Mode::Imitate);

    assert_eq!(gate.on_transition(&to(GroupedState::Happy)), Some(ActuatorCommand::Happy));
}

#[test]
fn test_stop_then_transition_forwards_nothing() {
    let mut gate = ActuatorGate::new();
    gate.on_intent(Intent::Imitate);

    let d = gate.on_intent(Intent::Stop);
    assert_eq!(d.command, Some(ActuatorCommand::Neutral));
    assert_eq!(d.to, Mode::Idle);

    assert_eq!(gate.on_transition(&to(GroupedState::Happy)), None);
}

#[test]
fn test_one_shot_overrides_cancel_imitation() {
    let overrides = [
        (Intent::Happy, ActuatorCommand::Happy),
        (Intent::Sad, ActuatorCommand::Sad),
        (Intent::Angry, ActuatorCommand::Angry),
        (Intent::LookRight, ActuatorCommand::LookRight),
        (Intent::LookLeft, ActuatorCommand::LookLeft),
        (Intent::LookMiddle, ActuatorCommand::LookMiddle),
    ];

    for (intent, expected) in overrides {
        let mut gate = ActuatorGate::new();
        gate.on_intent(Intent::Imitate);

        let d = gate.on_intent(intent);
        assert_eq!(d.command, Some(expected), "{}", intent);
        assert_eq!(d.from, Mode::Imitate);
        assert_eq!(d.to, Mode::Idle);
        assert_eq!(gate.on_transition(&to(GroupedState::Sad)), None);
    }
}

#[test]
fn test_mode_graph_is_total() {
    for current in [Mode::Idle, Mode::Imitate] {
        for intent in Intent::ALL {
            let next = ModeGraph::next(current, intent);
            let expected = if intent == Intent::Imitate { Mode::Imitate } else { Mode::Idle };
            assert_eq!(next, expected, "{:?} + {}", current, intent);
        }
    }
}

#[test]
fn test_transition_codes() {
    let mut gate = ActuatorGate::new();
    gate.on_intent(Intent::Imitate);

    assert_eq!(gate.on_transition(&to(GroupedState::Sad)).map(|c| c.code()), Some(b'S'));
    assert_eq!(gate.on_transition(&to(GroupedState::Angry)).map(|c| c.code()), Some(b'A'));
    assert_eq!(gate.on_transition(&to(GroupedState::Happy)).map(|c| c.code()), Some(b'H'));
}
