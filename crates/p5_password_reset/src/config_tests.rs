use super::*;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| values.get(name).cloned()
}

#[test]
fn test_from_lookup_with_both_values() {
    let config = ResetConfig::from_lookup(lookup_from(&[
        (URL_ENV_VAR, "https://project.example.co"),
        (SERVICE_ROLE_KEY_ENV_VAR, "secret-key"),
    ]))
    .expect("Expected configuration to load");

    assert_eq!(config.url, "https://project.example.co");
    assert_eq!(config.service_role_key.expose_secret(), "secret-key");
}

#[test]
fn test_from_lookup_missing_url() {
    let result = ResetConfig::from_lookup(lookup_from(&[(SERVICE_ROLE_KEY_ENV_VAR, "secret-key")]));

    assert!(matches!(
        result,
        Err(Error::MissingConfiguration(URL_ENV_VAR))
    ));
}

#[test]
fn test_from_lookup_missing_key() {
    let result = ResetConfig::from_lookup(lookup_from(&[(URL_ENV_VAR, "https://project.example.co")]));

    assert!(matches!(
        result,
        Err(Error::MissingConfiguration(SERVICE_ROLE_KEY_ENV_VAR))
    ));
}

#[test]
fn test_from_lookup_nothing_set() {
    let result = ResetConfig::from_lookup(|_| None);

    assert!(matches!(result, Err(Error::MissingConfiguration(_))));
}

#[test]
fn test_from_lookup_empty_values_count_as_missing() {
    let result = ResetConfig::from_lookup(lookup_from(&[
        (URL_ENV_VAR, "https://project.example.co"),
        (SERVICE_ROLE_KEY_ENV_VAR, "   "),
    ]));

    assert!(matches!(
        result,
        Err(Error::MissingConfiguration(SERVICE_ROLE_KEY_ENV_VAR))
    ));
}

#[test]
fn test_debug_output_hides_key() {
    let config = ResetConfig::from_lookup(lookup_from(&[
        (URL_ENV_VAR, "https://project.example.co"),
        (SERVICE_ROLE_KEY_ENV_VAR, "secret-key"),
    ]))
    .unwrap();

    let debug_output = format!("{:?}", config);

    assert!(debug_output.contains("https://project.example.co"));
    assert!(!debug_output.contains("secret-key"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    env::set_var(URL_ENV_VAR, "https://env.example.co");
    env::set_var(SERVICE_ROLE_KEY_ENV_VAR, "env-key");

    let result = ResetConfig::from_env();

    env::remove_var(URL_ENV_VAR);
    env::remove_var(SERVICE_ROLE_KEY_ENV_VAR);

    let config = result.expect("Expected configuration to load");
    assert_eq!(config.url, "https://env.example.co");
    assert_eq!(config.service_role_key.expose_secret(), "env-key");
}

#[test]
#[serial]
fn test_from_env_without_variables() {
    env::remove_var(URL_ENV_VAR);
    env::remove_var(SERVICE_ROLE_KEY_ENV_VAR);

    let result = ResetConfig::from_env();

    assert!(matches!(
        result,
        Err(Error::MissingConfiguration(URL_ENV_VAR))
    ));
}

#[test]
#[serial]
fn test_load_env_file_explicit_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let env_path = temp_dir.path().join("reset.env");
    fs::write(
        &env_path,
        "SUPABASE_URL=https://file.example.co\nSUPABASE_SERVICE_ROLE_KEY=file-key\n",
    )
    .expect("Failed to write env file");
    env::remove_var(URL_ENV_VAR);
    env::remove_var(SERVICE_ROLE_KEY_ENV_VAR);

    let loaded = load_env_file(Some(&env_path)).expect("Expected env file to load");
    let result = ResetConfig::from_env();

    env::remove_var(URL_ENV_VAR);
    env::remove_var(SERVICE_ROLE_KEY_ENV_VAR);

    assert_eq!(loaded, Some(env_path));
    let config = result.expect("Expected configuration to load");
    assert_eq!(config.url, "https://file.example.co");
    assert_eq!(config.service_role_key.expose_secret(), "file-key");
}

#[test]
#[serial]
fn test_load_env_file_does_not_override_environment() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let env_path = temp_dir.path().join("reset.env");
    fs::write(&env_path, "SUPABASE_URL=https://file.example.co\n")
        .expect("Failed to write env file");
    env::set_var(URL_ENV_VAR, "https://shell.example.co");

    load_env_file(Some(&env_path)).expect("Expected env file to load");
    let url = env::var(URL_ENV_VAR);

    env::remove_var(URL_ENV_VAR);

    assert_eq!(url.as_deref(), Ok("https://shell.example.co"));
}

#[test]
#[serial]
fn test_load_env_file_missing_explicit_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let env_path = temp_dir.path().join("does-not-exist.env");

    let result = load_env_file(Some(&env_path));

    match result {
        Err(Error::EnvFile { path, .. }) => assert_eq!(path, env_path),
        other => panic!("Expected EnvFile error, got {other:?}"),
    }
}
