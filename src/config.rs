use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OWNER: &str = "Ravi-Chandra24";
pub const DEFAULT_REPOSITORY: &str = "Ask-her-Out";
pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_MESSAGE: &str = "Prepare site for GitHub Pages";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_FILES: &[&str] = &["index.html", "ask_her_out.html", "schedule.html", "git.py"];

/// Optional overrides read from `config.toml`
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub remote: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl Config {
    /// Load from `path`, or from the default location when none is given.
    /// Only an explicitly requested file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::read(p),
            None => {
                let config_path = Self::config_path();
                if !config_path.exists() {
                    return Ok(Self::default());
                }
                Self::read(&config_path)
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("publish-site")
            .join("config.toml")
    }
}

/// Where a missing remote gets pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrigin {
    pub host: String,
    pub owner: String,
    pub repository: String,
}

impl RemoteOrigin {
    pub fn ssh_url(&self) -> String {
        format!("git@{}:{}/{}.git", self.host, self.owner, self.repository)
    }
}

impl Default for RemoteOrigin {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
        }
    }
}

/// Everything one publish run needs, fixed before the first command runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    pub message: String,
    pub files: Vec<String>,
    pub stage_all: bool,
    pub push: bool,
    pub remote: String,
    pub branch: String,
    pub dry_run: bool,
    pub origin: RemoteOrigin,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            stage_all: false,
            push: true,
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            dry_run: false,
            origin: RemoteOrigin::default(),
        }
    }
}

/// Values given on the command line; `None` falls through to the file
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub message: Option<String>,
    pub stage_all: bool,
    pub no_push: bool,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub dry_run: bool,
}

impl PublishConfig {
    /// Resolve CLI flags over file values over built-in defaults
    pub fn resolve(cli: CliOverrides, file: Config) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            message: cli.message.or(file.message).unwrap_or(defaults.message),
            files: file.files.unwrap_or(defaults.files),
            stage_all: cli.stage_all,
            push: !cli.no_push,
            remote: cli.remote.or(file.remote).unwrap_or(defaults.remote),
            branch: cli.branch.or(file.branch).unwrap_or(defaults.branch),
            dry_run: cli.dry_run,
            origin: RemoteOrigin {
                host: file.host.unwrap_or(defaults.origin.host),
                owner: file.owner.unwrap_or(defaults.origin.owner),
                repository: file.repository.unwrap_or(defaults.origin.repository),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("remote", &self.remote),
            ("branch", &self.branch),
            ("host", &self.origin.host),
            ("owner", &self.origin.owner),
            ("repository", &self.origin.repository),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }

        if !self.stage_all {
            if self.files.is_empty() {
                bail!("No files configured to stage. Add `files` to the config or pass --all.");
            }
            if self.files.iter().any(|f| f.trim().is_empty()) {
                bail!("`files` must not contain blank entries");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_ssh_url() {
        assert_eq!(
            RemoteOrigin::default().ssh_url(),
            "git@github.com:Ravi-Chandra24/Ask-her-Out.git"
        );
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = PublishConfig::resolve(CliOverrides::default(), Config::default()).unwrap();
        assert_eq!(config, PublishConfig::default());
        assert_eq!(config.message, "Prepare site for GitHub Pages");
        assert_eq!(config.files.len(), 4);
        assert!(config.push);
    }

    #[test]
    fn test_cli_beats_file() {
        let file = Config {
            message: Some("from file".into()),
            remote: Some("pages".into()),
            branch: Some("gh-pages".into()),
            ..Default::default()
        };
        let cli = CliOverrides {
            message: Some("from cli".into()),
            branch: Some("trunk".into()),
            no_push: true,
            ..Default::default()
        };

        let config = PublishConfig::resolve(cli, file).unwrap();
        assert_eq!(config.message, "from cli");
        assert_eq!(config.remote, "pages");
        assert_eq!(config.branch, "trunk");
        assert!(!config.push);
    }

    #[test]
    fn test_empty_remote_rejected() {
        let cli = CliOverrides {
            remote: Some("  ".into()),
            ..Default::default()
        };
        assert!(PublishConfig::resolve(cli, Config::default()).is_err());
    }

    #[test]
    fn test_empty_file_list_needs_all() {
        let no_files = || Config {
            files: Some(vec![]),
            ..Default::default()
        };
        assert!(PublishConfig::resolve(CliOverrides::default(), no_files()).is_err());

        let cli = CliOverrides {
            stage_all: true,
            ..Default::default()
        };
        assert!(PublishConfig::resolve(cli, no_files()).is_ok());
    }

    #[test]
    fn test_blank_file_entry_rejected() {
        let file = Config {
            files: Some(vec!["index.html".into(), " ".into()]),
            ..Default::default()
        };
        let err = PublishConfig::resolve(CliOverrides::default(), file).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "owner = \"someone\"\nrepository = \"site\"\nfiles = [\"index.html\"]\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.owner.as_deref(), Some("someone"));
        assert_eq!(config.files, Some(vec!["index.html".to_string()]));

        let resolved = PublishConfig::resolve(CliOverrides::default(), config).unwrap();
        assert_eq!(resolved.origin.ssh_url(), "git@github.com:someone/site.git");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "ownr = \"typo\"\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
