//! End-to-end tests for prompt synchronization against local fixtures.

use super::*;
use crate::config::{SyncSettings, Upstream};
use crate::error::MaintError;
use crate::test_support::{RUN_YAML, UPSTREAM_SOURCE};
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    settings: SyncSettings,
}

fn fixture(upstream: &str, run_yaml: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let upstream_path = dir.path().join("rhdh-profile.py");
    let run_config = dir.path().join("run.yaml");
    fs::write(&upstream_path, upstream).unwrap();
    fs::write(&run_config, run_yaml).unwrap();

    Fixture {
        _dir: dir,
        settings: SyncSettings {
            upstream: Upstream::File(upstream_path),
            run_config,
            ..SyncSettings::default()
        },
    }
}

#[test]
fn test_validate_matching_prompts() {
    let fx = fixture(UPSTREAM_SOURCE, RUN_YAML);
    assert_eq!(validate(&fx.settings).unwrap(), SyncOutcome::Valid);
}

#[test]
fn test_validate_reports_mismatched_field_only() {
    let upstream = UPSTREAM_SOURCE.replace("about Backstage.", "about Developer Hub.");
    let fx = fixture(&upstream, RUN_YAML);

    let outcome = validate(&fx.settings).unwrap();

    let SyncOutcome::Invalid { diff } = outcome else {
        panic!("expected mismatch, got {:?}", outcome);
    };
    assert!(diff.starts_with("Invalid Response Prompt\n-----\n"));
    assert!(!diff.contains("Validation Prompt"));
    assert!(diff.contains("-I can only answer questions about Backstage.\n"));
    assert!(diff.contains("+I can only answer questions about Developer Hub.\n"));
}

#[test]
fn test_validate_compares_after_placeholder_translation() {
    // An untranslated local placeholder is a real difference.
    let run_yaml = RUN_YAML.replace("${message}", "{{query}}");
    let fx = fixture(UPSTREAM_SOURCE, &run_yaml);

    let outcome = validate(&fx.settings).unwrap();

    let SyncOutcome::Invalid { diff } = outcome else {
        panic!("expected mismatch, got {:?}", outcome);
    };
    assert!(diff.contains("-Question: {{query}}\n+Question: ${message}\n"));
}

#[test]
fn test_update_then_validate() {
    let upstream = UPSTREAM_SOURCE
        .replace("Allow {SUBJECT_ALLOWED}.", "Allow {SUBJECT_ALLOWED} and nothing else.");
    let fx = fixture(&upstream, RUN_YAML);

    assert!(matches!(validate(&fx.settings).unwrap(), SyncOutcome::Invalid { .. }));
    assert_eq!(update(&fx.settings).unwrap(), SyncOutcome::Updated);
    assert_eq!(validate(&fx.settings).unwrap(), SyncOutcome::Valid);

    let text = fs::read_to_string(&fx.settings.run_config).unwrap();
    assert_eq!(
        text,
        RUN_YAML.replace("Allow ${allowed}.", "Allow ${allowed} and nothing else.")
    );
}

#[test]
fn test_update_in_sync_file_is_unchanged() {
    let fx = fixture(UPSTREAM_SOURCE, RUN_YAML);

    run(SyncMode::Update, &fx.settings).unwrap();

    assert_eq!(fs::read_to_string(&fx.settings.run_config).unwrap(), RUN_YAML);
}

#[test]
fn test_missing_upstream_constant_touches_nothing() {
    let upstream = UPSTREAM_SOURCE.replace("INVALID_QUERY_RESP", "INVALID_QUERY_RESPONSE_V2");
    let fx = fixture(&upstream, RUN_YAML);

    let err = run(SyncMode::Update, &fx.settings).unwrap_err();

    assert!(matches!(err, MaintError::TemplateNotFound(ref name) if name == INVALID_RESPONSE_CONSTANT));
    assert_eq!(fs::read_to_string(&fx.settings.run_config).unwrap(), RUN_YAML);
}

#[test]
fn test_missing_local_config_is_error() {
    let fx = fixture(UPSTREAM_SOURCE, RUN_YAML);
    let settings = SyncSettings {
        run_config: fx.settings.run_config.with_file_name("absent.yaml"),
        ..fx.settings.clone()
    };

    let err = validate(&settings).unwrap_err();
    assert!(matches!(err, MaintError::IoError(_)));
}

fn served_by(server: &mockito::Server, mut fx: Fixture) -> Fixture {
    fx.settings.upstream = Upstream::Url(format!("{}/profile.py", server.url()));
    fx
}

#[test]
fn test_http_error_status_fails_without_touching_run_yaml() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/profile.py")
        .with_status(404)
        .with_body("Not Found")
        .create();
    let fx = served_by(&server, fixture("", RUN_YAML));

    let err = update(&fx.settings).unwrap_err();

    mock.assert();
    assert!(matches!(err, MaintError::HttpError(_)), "{err}");
    assert_eq!(err.exit_code(), crate::exit_codes::FAILURE);
    assert_eq!(fs::read_to_string(&fx.settings.run_config).unwrap(), RUN_YAML);
}

#[test]
fn test_http_body_is_extracted_and_compared() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/profile.py")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(UPSTREAM_SOURCE)
        .expect(2)
        .create();
    let fx = served_by(&server, fixture("", RUN_YAML));

    assert_eq!(
        fetch_remote(&fx.settings.upstream).unwrap(),
        extract_prompts(UPSTREAM_SOURCE).unwrap()
    );
    assert_eq!(validate(&fx.settings).unwrap(), SyncOutcome::Valid);
    mock.assert();
}
