use mimic::config::EngineConfig;
use mimic::error::ConfigError;
use mimic::kernel::emotion::StabilizerParams;
use mimic::kernel::intent::Intent;

#[test]
fn test_defaults_match_documented_constants() {
    let config = EngineConfig::default();
    config.validate().unwrap();

    assert_eq!(config.resolver.safety_threshold, 0.70);
    let s = &config.stabilizer;
    assert_eq!(s.history_window_secs, 2.0);
    assert_eq!(s.min_frames, 6);
    assert_eq!(s.min_dominance, 0.70);
    assert_eq!(s.min_margin, 2);
    assert_eq!(s.angry_min_dominance, 0.65);
    assert_eq!(s.min_state_duration_secs, 2.0);
    assert_eq!(s.sad_angry_penalty, 0.15);
    assert_eq!(config.vision.inference_interval_ms, 120);
    assert_eq!(config.actuator.baud_rate, 9600);
    assert_eq!(config.reactor.tick_ms, 20);

    let table = config.command_table().unwrap();
    for intent in Intent::ALL {
        assert!(!table.aliases(intent).is_empty(), "{} has no aliases", intent);
    }
}

#[test]
fn test_toml_is_a_partial_overlay() {
    let config = EngineConfig::from_toml_str(
        r#"
        [resolver]
        safety_threshold = 0.8

        [resolver.commands]
        stop = ["Whoa"]
        look_right = ["starboard"]

        [stabilizer]
        min_frames = 8
        "#,
    )
    .unwrap();

    assert_eq!(config.stabilizer.min_frames, 8);
    assert_eq!(config.stabilizer.min_dominance, StabilizerParams::default().min_dominance);

    let resolver = config.build_resolver().unwrap();
    assert_eq!(resolver.safety_threshold(), 0.8);
    assert_eq!(resolver.resolve("whoa there"), Some(Intent::Stop));
    assert_eq!(resolver.resolve("halt"), None, "replaced alias list");
    assert_eq!(resolver.resolve("hard to starboard"), Some(Intent::LookRight));
    assert_eq!(resolver.resolve("smile"), Some(Intent::Happy), "untouched intents keep defaults");
}

#[test]
fn test_unknown_intent_is_rejected() {
    let err = EngineConfig::from_toml_str(
        r#"
        [resolver.commands]
        dance = ["boogie"]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_intent_needs_an_alias() {
    let err = EngineConfig::from_toml_str(
        r#"
        [resolver.commands]
        sad = []
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    for text in [
        "[resolver]\nsafety_threshold = 1.5",
        "[stabilizer]\nmin_frames = 0",
        "[stabilizer]\nhistory_window_secs = 0.0",
        "[vision]\ninference_interval_ms = 0",
    ] {
        let err = EngineConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "accepted: {}", text);
    }
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = EngineConfig::from_toml_str("[resolver\nsafety_threshold = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = EngineConfig::load(Some(std::path::Path::new("/nonexistent/mimic.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
