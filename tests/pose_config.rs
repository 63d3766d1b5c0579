use std::sync::Mutex;

use tempfile::NamedTempFile;

use posetrack::config::PoseConfig;
use posetrack::ModelLayout;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "POSETRACK_CONFIG",
        "POSETRACK_MIN_CONFIDENCE",
        "POSETRACK_MAX_DETECTED",
        "POSETRACK_SKIP_FRAMES",
        "POSETRACK_TRACKING",
        "POSETRACK_MODEL",
        "POSETRACK_MODEL_LAYOUT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let toml = r#"
        min_confidence = 0.25
        max_detected = 6
        skip_frames = 12

        [model]
        path = "movenet_multipose.onnx"
        layout = "multi-pose"
        input_size = 256
    "#;
    std::io::Write::write_all(&mut file, toml.as_bytes()).expect("write config");

    std::env::set_var("POSETRACK_CONFIG", file.path());
    std::env::set_var("POSETRACK_MAX_DETECTED", "3");
    std::env::set_var("POSETRACK_TRACKING", "false");

    let cfg = PoseConfig::load().expect("load config");
    assert_eq!(cfg.min_confidence, 0.25);
    assert_eq!(cfg.max_detected, 3);
    assert_eq!(cfg.skip_frames, 12);
    assert!(!cfg.skip_allowed);
    assert_eq!(cfg.model.layout, ModelLayout::MultiPose);
    assert_eq!(cfg.model.input_size, 256);
    assert_eq!(
        cfg.model.path.as_deref(),
        Some(std::path::Path::new("movenet_multipose.onnx"))
    );

    clear_env();
}

#[test]
fn defaults_apply_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = PoseConfig::load().expect("load config");
    assert_eq!(cfg.max_detected, 1);
    assert!(cfg.skip_allowed);
    assert_eq!(cfg.model.layout, ModelLayout::SinglePose);
    assert_eq!(cfg.model.input_size, 192);
}

#[test]
fn invalid_env_override_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("POSETRACK_TRACKING", "maybe");
    assert!(PoseConfig::load().is_err());
    clear_env();
}
