use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::InspectError;

use super::InspectData;

const ATLAS_CLI: &str = "atlas";
const JSON_FORMAT: &str = "{{ json . }}";
const CLI_ERROR_PREFIX: &str = "Error: ";

/// Arguments forwarded to `atlas schema inspect`.
#[derive(Debug, Clone, Default)]
pub struct InspectParams {
    pub url: Option<String>,
    pub dev_url: Option<String>,
    pub schemas: Vec<String>,
    pub exclude: Vec<String>,
    pub env: Option<String>,
    pub config_url: Option<String>,
    pub atlas_path: Option<PathBuf>,
}

impl InspectParams {
    fn args(&self) -> Vec<String> {
        let mut args = vec!["schema".to_string(), "inspect".to_string()];
        let mut push = |flag: &str, value: &str| {
            args.push(flag.to_string());
            args.push(value.to_string());
        };
        if let Some(url) = &self.url {
            push("--url", url);
        }
        if let Some(dev_url) = &self.dev_url {
            push("--dev-url", dev_url);
        }
        if !self.schemas.is_empty() {
            push("--schema", &self.schemas.join(","));
        }
        if !self.exclude.is_empty() {
            push("--exclude", &self.exclude.join(","));
        }
        if let Some(env) = &self.env {
            push("--env", env);
        }
        if let Some(config) = &self.config_url {
            push("--config", config);
        }
        push("--format", JSON_FORMAT);
        args
    }
}

/// Run the atlas CLI and decode its JSON output.
pub async fn inspect(params: &InspectParams) -> Result<InspectData, InspectError> {
    let atlas = resolve_atlas(params.atlas_path.as_deref())?;
    tracing::info!(atlas = %atlas.display(), "inspecting schema");

    let output = Command::new(&atlas)
        .args(params.args())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(InspectError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InspectError::Atlas(cli_error_message(&stderr)));
    }
    parse(&output.stdout)
}

/// Load a previously saved `atlas schema inspect` JSON document.
pub fn load_from_file(path: &Path) -> Result<InspectData, InspectError> {
    let raw = std::fs::read(path).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = raw.len(), "loaded schema file");
    parse(&raw)
}

pub fn parse(raw: &[u8]) -> Result<InspectData, InspectError> {
    let data: InspectData = serde_json::from_slice(raw)?;
    data.validate()?;
    Ok(data)
}

/// Explicit paths must point at a regular file; otherwise search `PATH`.
pub fn resolve_atlas(explicit: Option<&Path>) -> Result<PathBuf, InspectError> {
    match explicit {
        Some(path) => {
            verify_file_exists(path)?;
            Ok(path.to_path_buf())
        }
        None => {
            let paths = std::env::var_os("PATH").ok_or(InspectError::AtlasNotInPath)?;
            std::env::split_paths(&paths)
                .map(|dir| dir.join(ATLAS_CLI))
                .find(|candidate| candidate.is_file())
                .ok_or(InspectError::AtlasNotInPath)
        }
    }
}

fn verify_file_exists(path: &Path) -> Result<(), InspectError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(InspectError::NotARegularFile(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(InspectError::AtlasNotFound(path.to_path_buf()))
        }
        Err(source) => Err(InspectError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn cli_error_message(stderr: &str) -> String {
    let trimmed = stderr.trim();
    trimmed
        .strip_prefix(CLI_ERROR_PREFIX)
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("schemascope_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_args_include_optional_flags() {
        let params = InspectParams {
            url: Some("mysql://root@localhost/shop".to_string()),
            schemas: vec!["a".to_string(), "b".to_string()],
            env: Some("dev".to_string()),
            ..Default::default()
        };
        let args = params.args();
        assert_eq!(&args[..4], ["schema", "inspect", "--url", "mysql://root@localhost/shop"]);
        assert!(args.windows(2).any(|w| w == ["--schema", "a,b"]));
        assert!(args.windows(2).any(|w| w == ["--env", "dev"]));
        assert!(!args.contains(&"--dev-url".to_string()));
        assert_eq!(args[args.len() - 2..], ["--format", JSON_FORMAT]);
    }

    #[test]
    fn test_cli_error_prefix_is_stripped() {
        assert_eq!(cli_error_message("Error: bad url\n"), "bad url");
        assert_eq!(cli_error_message("  panic\n"), "panic");
    }

    #[test]
    fn test_resolve_missing_atlas() {
        let missing = temp_path("missing_atlas");
        let err = resolve_atlas(Some(&missing)).unwrap_err();
        assert!(matches!(err, InspectError::AtlasNotFound(_)));
    }

    #[test]
    fn test_resolve_directory_is_not_regular_file() {
        let dir = std::env::temp_dir();
        let err = resolve_atlas(Some(&dir)).unwrap_err();
        assert!(matches!(err, InspectError::NotARegularFile(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("schema.json");
        std::fs::write(
            &path,
            r#"{"schemas":[{"name":"main","tables":[{"name":"t","columns":[{"name":"c"}]}]}]}"#,
        )
        .unwrap();
        let data = load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data.schemas[0].tables[0].columns[0].name, "c");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse(b"not json"), Err(InspectError::Decode(_))));
    }
}
