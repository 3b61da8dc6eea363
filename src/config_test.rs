use std::sync::Mutex;

use super::*;

/// Env vars are process-wide; serialise tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_env() {
    unsafe {
        std::env::remove_var(MAX_DEPTH_VAR);
        std::env::remove_var(EAGER_MISC_VAR);
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_env() };

    let cfg = IngestConfig::from_env().unwrap();
    assert_eq!(cfg, IngestConfig::default());
    assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!cfg.eager_misc);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var(MAX_DEPTH_VAR, "12");
        std::env::set_var(EAGER_MISC_VAR, "TRUE");
    }

    let cfg = IngestConfig::from_env().unwrap();
    assert_eq!(cfg, IngestConfig { max_depth: 12, eager_misc: true });

    unsafe { clear_env() };
}

#[test]
fn from_env_bad_depth_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    for raw in ["lots", "0", "-3"] {
        unsafe {
            clear_env();
            std::env::set_var(MAX_DEPTH_VAR, raw);
        }
        let cfg = IngestConfig::from_env().unwrap();
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH, "raw {raw:?}");
    }
    unsafe { clear_env() };
}

#[test]
fn from_env_rejects_unknown_flag() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var(EAGER_MISC_VAR, "sometimes");
    }

    let err = IngestConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("LAYERDOC_EAGER_MISC"));
    assert!(err.contains("sometimes"));

    unsafe { clear_env() };
}

#[test]
fn parse_flag_accepts_common_spellings() {
    for raw in ["1", "yes", " true "] {
        assert!(parse_flag(EAGER_MISC_VAR, raw).unwrap(), "raw {raw:?}");
    }
    for raw in ["0", "No", "false", ""] {
        assert!(!parse_flag(EAGER_MISC_VAR, raw).unwrap(), "raw {raw:?}");
    }
}
