//! Implementation of the `stack-maint sync-prompts` command.

use crate::cli::SyncArgs;
use crate::config::{SyncMode, SyncSettings, Upstream};
use crate::error::{MaintError, Result};
use crate::prompt_sync::{self, SyncOutcome};

/// Build settings from defaults and CLI overrides.
pub fn settings_from_args(args: &SyncArgs) -> SyncSettings {
    let defaults = SyncSettings::default();
    let upstream = match (&args.upstream_file, &args.url) {
        (Some(path), _) => Upstream::File(path.clone()),
        (None, Some(url)) => Upstream::Url(url.clone()),
        (None, None) => defaults.upstream,
    };

    SyncSettings {
        upstream,
        run_config: args.config.clone().unwrap_or(defaults.run_config),
        provider_id: defaults.provider_id,
    }
}

/// Execute the `sync-prompts` command.
///
/// A missing or unknown `--type` prints a notice and succeeds without
/// touching anything. `validate` fails with exit code 1 on mismatch.
pub fn cmd_sync_prompts(args: SyncArgs) -> Result<()> {
    let Some(mode) = args.kind.as_deref().and_then(SyncMode::from_str) else {
        tracing::warn!(kind = ?args.kind, "unrecognized sync type");
        println!("Type incorrect.");
        return Ok(());
    };

    let settings = settings_from_args(&args);

    match prompt_sync::run(mode, &settings)? {
        SyncOutcome::Valid => {
            println!("Contents are valid.");
            Ok(())
        }
        SyncOutcome::Invalid { diff } => {
            println!("Contents invalid.");
            print!("{}", diff);
            Err(MaintError::Drift(format!(
                "prompts in '{}' differ from upstream; run with --type update",
                settings.run_config.display()
            )))
        }
        SyncOutcome::Updated => {
            println!("Contents updated.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DEFAULT_UPSTREAM_URL;
    use crate::test_support::{DirGuard, RUN_YAML, UPSTREAM_SOURCE};
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn args(kind: Option<&str>, upstream_file: Option<PathBuf>, config: Option<PathBuf>) -> SyncArgs {
        SyncArgs {
            kind: kind.map(str::to_string),
            url: None,
            upstream_file,
            config,
        }
    }

    #[test]
    fn test_settings_from_args_defaults() {
        let settings = settings_from_args(&args(Some("validate"), None, None));
        assert_eq!(settings.upstream, Upstream::Url(DEFAULT_UPSTREAM_URL.to_string()));
        assert_eq!(settings.run_config, Path::new("../../run.yaml"));
    }

    #[test]
    fn test_settings_from_args_overrides() {
        let mut sync_args = args(Some("update"), None, Some(PathBuf::from("deploy/run.yaml")));
        sync_args.url = Some("https://mirror.example/profile.py".to_string());

        let settings = settings_from_args(&sync_args);

        assert_eq!(
            settings.upstream,
            Upstream::Url("https://mirror.example/profile.py".to_string())
        );
        assert_eq!(settings.run_config, Path::new("deploy/run.yaml"));
    }

    #[test]
    fn test_unknown_type_is_a_successful_no_op() {
        let dir = TempDir::new().unwrap();
        let run_config = dir.path().join("run.yaml");
        fs::write(&run_config, RUN_YAML).unwrap();

        cmd_sync_prompts(args(Some("sync"), None, Some(run_config.clone()))).unwrap();
        cmd_sync_prompts(args(None, None, Some(run_config.clone()))).unwrap();

        assert_eq!(fs::read_to_string(&run_config).unwrap(), RUN_YAML);
    }

    #[test]
    fn test_validate_mismatch_exits_with_out_of_sync() {
        let dir = TempDir::new().unwrap();
        let upstream = dir.path().join("profile.py");
        let run_config = dir.path().join("run.yaml");
        fs::write(&upstream, UPSTREAM_SOURCE.replace("Backstage", "RHDH")).unwrap();
        fs::write(&run_config, RUN_YAML).unwrap();

        let err = cmd_sync_prompts(args(Some("validate"), Some(upstream), Some(run_config)))
            .unwrap_err();

        assert!(matches!(err, MaintError::Drift(_)));
        assert_eq!(err.exit_code(), crate::exit_codes::OUT_OF_SYNC);
    }

    #[test]
    #[serial]
    fn test_default_config_path_is_relative_to_cwd() {
        let dir = TempDir::new().unwrap();
        let scripts = dir.path().join("scripts").join("python-scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(dir.path().join("run.yaml"), RUN_YAML).unwrap();
        let upstream = dir.path().join("profile.py");
        fs::write(&upstream, UPSTREAM_SOURCE).unwrap();

        let _guard = DirGuard::new(&scripts);
        cmd_sync_prompts(args(Some("validate"), Some(upstream), None)).unwrap();
    }
}
