//! Parsing rules for the session environment toggles.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

/// Key file on disk, removed again when the fixture drops.
#[derive(Debug)]
struct KeyFixture {
    path: PathBuf,
}

impl KeyFixture {
    fn of_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("takwin-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key fixture");
        Self { path }
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for KeyFixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_defaults(key_path: &str) -> HashMap<String, String> {
    HashMap::from([
        (KEY_FILE_ENV.to_string(), key_path.to_string()),
        (COOKIE_SECURE_ENV.to_string(), "1".to_string()),
        (SAMESITE_ENV.to_string(), "Strict".to_string()),
        (ALLOW_EPHEMERAL_ENV.to_string(), "0".to_string()),
    ])
}

// SessionSettings holds a cookie Key without Debug, so Result::expect_err is
// unavailable here.
fn settings_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session settings to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV)]
#[case::same_site(SAMESITE_ENV)]
#[case::allow_ephemeral(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_a_missing_toggle(#[case] dropped: &'static str) {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.remove(dropped);

    let err = settings_error(session_settings_from_env(
        &mock_env(vars),
        BuildMode::Release,
    ));
    match err {
        SessionConfigError::MissingEnv { name } => assert_eq!(name, dropped),
        other => panic!("expected MissingEnv, got {other:?}"),
    }
}

#[rstest]
#[case::word("maybe")]
#[case::empty("")]
fn release_rejects_garbled_cookie_secure(#[case] value: &str) {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.insert(COOKIE_SECURE_ENV.to_string(), value.to_string());

    let err = settings_error(session_settings_from_env(
        &mock_env(vars),
        BuildMode::Release,
    ));
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_refuses_ephemeral_keys() {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.insert(ALLOW_EPHEMERAL_ENV.to_string(), "1".to_string());

    let err = settings_error(session_settings_from_env(
        &mock_env(vars),
        BuildMode::Release,
    ));
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_surfaces_key_read_failures() {
    let missing = std::env::temp_dir().join(format!("takwin-missing-{}", Uuid::new_v4()));
    let vars = release_defaults(missing.to_str().expect("temporary path should be valid UTF-8"));

    let err = settings_error(session_settings_from_env(
        &mock_env(vars),
        BuildMode::Release,
    ));
    match err {
        SessionConfigError::KeyRead { path, .. } => assert_eq!(path, missing),
        other => panic!("expected KeyRead, got {other:?}"),
    }
}

#[rstest]
fn release_enforces_the_minimum_key_length() {
    let key_file = KeyFixture::of_len(32);
    let env = mock_env(release_defaults(key_file.path_str()));

    let err = settings_error(session_settings_from_env(&env, BuildMode::Release));
    match err {
        SessionConfigError::KeyTooShort {
            length, min_len, ..
        } => {
            assert_eq!(length, 32);
            assert_eq!(min_len, SESSION_KEY_MIN_LEN);
        }
        other => panic!("expected KeyTooShort, got {other:?}"),
    }
}

#[rstest]
fn release_refuses_samesite_none_without_secure() {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.insert(COOKIE_SECURE_ENV.to_string(), "0".to_string());
    vars.insert(SAMESITE_ENV.to_string(), "None".to_string());

    let err = settings_error(session_settings_from_env(
        &mock_env(vars),
        BuildMode::Release,
    ));
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_allows_samesite_none_with_secure() {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.insert(SAMESITE_ENV.to_string(), "None".to_string());

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect("secure SameSite=None should be accepted");
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn release_accepts_a_complete_environment() {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let env = mock_env(release_defaults(key_file.path_str()));

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn debug_runs_on_defaults_alone() {
    let env = mock_env(HashMap::new());
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_garbled_cookie_secure_keeps_the_secure_default() {
    let vars = HashMap::from([(COOKIE_SECURE_ENV.to_string(), "maybe".to_string())]);

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert!(settings.cookie_secure);
}

#[rstest]
fn debug_garbled_same_site_keeps_lax() {
    let key_file = KeyFixture::of_len(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(key_file.path_str());
    vars.insert(SAMESITE_ENV.to_string(), "unexpected".to_string());

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(settings.same_site, SameSite::Lax);
}
