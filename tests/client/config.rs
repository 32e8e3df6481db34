//! Configuration Tests
//!
//! Tests credential resolution from key/value maps and dotenv files.
//! Nothing here touches the process environment.

use std::io::Write;

use odoo_api::{
    ClientOptions, Config, DatabaseSelector, Error, OutputMode, ALT_DB_VAR, DB_VAR, TOKEN_VAR,
    URL_VAR, USERNAME_VAR,
};

fn full() -> Vec<(&'static str, &'static str)> {
    vec![
        (URL_VAR, "https://acme.odoo.com"),
        (USERNAME_VAR, "api@acme.com"),
        (TOKEN_VAR, "0123456789abcdef"),
        (DB_VAR, "acme"),
        (ALT_DB_VAR, "acme-staging"),
        ("ODOO_API_ALT_DB_TEST", "acme-test"),
    ]
}

#[test]
fn resolves_each_database_selector() {
    let config = Config::from_kv(full());

    let primary = config.credentials(&DatabaseSelector::Primary).unwrap();
    assert_eq!(primary.database, "acme");
    assert_eq!(primary.url, "https://acme.odoo.com");
    assert_eq!(primary.username, "api@acme.com");

    let alternate = config.credentials(&true.into()).unwrap();
    assert_eq!(alternate.database, "acme-staging");

    let named = config.credentials(&"TEST".into()).unwrap();
    assert_eq!(named.database, "acme-test");
}

#[test]
fn missing_token_is_config_error() {
    let config = Config::from_kv(full().into_iter().filter(|(k, _)| *k != TOKEN_VAR));

    let err = config.credentials(&DatabaseSelector::Primary).unwrap_err();
    assert!(err.is_config());
    assert!(matches!(err, Error::MissingCredential { ref variable } if variable == TOKEN_VAR));
}

#[test]
fn empty_value_counts_as_missing() {
    let config = Config::from_kv(
        full()
            .into_iter()
            .map(|(k, v)| if k == URL_VAR { (k, "  ") } else { (k, v) }),
    );

    let err = config.credentials(&DatabaseSelector::Primary).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { ref variable } if variable == URL_VAR));
}

#[test]
fn undefined_named_database() {
    let config = Config::from_kv(full());

    let err = config.credentials(&"PROD".into()).unwrap_err();
    assert!(err.is_config());
    assert!(matches!(
        err,
        Error::DatabaseNotDefined { ref variable } if variable == "ODOO_API_ALT_DB_PROD"
    ));
}

#[test]
fn reads_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odoo.env");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# odoo credentials").unwrap();
    writeln!(file, "ODOO_API_URL=https://acme.odoo.com").unwrap();
    writeln!(file, "ODOO_API_USERNAME=api@acme.com").unwrap();
    writeln!(file, "ODOO_API_TOKEN=0123456789abcdef").unwrap();
    writeln!(file, "ODOO_API_DB=acme").unwrap();
    drop(file);

    let config = Config::from_env_file(&path).unwrap();
    let credentials = config.credentials(&DatabaseSelector::Primary).unwrap();
    assert_eq!(credentials.database, "acme");
    assert_eq!(credentials.masked_token(), "****************");
}

#[test]
fn missing_dotenv_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_env_file(dir.path().join("absent.env")).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn client_options_from_json() {
    let options: ClientOptions = serde_json::from_value(serde_json::json!({
        "database": "Alternate",
        "default_output": "dict",
        "timeout": null,
    }))
    .unwrap();

    assert_eq!(options.database, DatabaseSelector::Alternate);
    assert_eq!(options.default_output, OutputMode::Dict);
    assert_eq!(options.timeout, None);
}
