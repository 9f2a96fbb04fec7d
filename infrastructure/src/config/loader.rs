//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`LIVE_REPLY_STREAM__TIMEOUT_SECONDS=5`)
pub const ENV_PREFIX: &str = "LIVE_REPLY_";

const PROJECT_FILENAMES: &[&str] = &["live-reply.toml", ".live-reply.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `LIVE_REPLY_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./live-reply.toml` or `./.live-reply.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/live-reply/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();
        if let Some(global_path) = Self::global_config_path() {
            files.push(global_path);
        }
        if let Some(project_path) = Self::project_config_path() {
            files.push(project_path);
        }

        let figment = Self::figment(&files, config_path.map(PathBuf::as_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().map_err(Box::new)
    }

    /// Defaults merged with `files` in order, then the explicit path.
    ///
    /// Missing discovered files are skipped; a missing explicit file is an
    /// error at extraction.
    pub fn figment(files: &[PathBuf], explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in files.iter().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/live-reply/config.toml if set,
    /// otherwise falls back to ~/.config/live-reply/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("live-reply").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./live-reply.toml or ./.live-reply.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", marker, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.stream.timeout_seconds, 30);
        assert_eq!(config.stream.flush_word_threshold, 10);
        assert_eq!(config.slack.max_retries, 2);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("live-reply"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let global = toml_file(
            r#"
[stream]
timeout_seconds = 60
flush_word_threshold = 5
"#,
        );
        let project = toml_file(
            r#"
[stream]
timeout_seconds = 15
"#,
        );

        let config: FileConfig = ConfigLoader::figment(
            &[global.path().to_path_buf(), project.path().to_path_buf()],
            None,
        )
        .extract()
        .unwrap();

        assert_eq!(config.stream.timeout_seconds, 15);
        assert_eq!(config.stream.flush_word_threshold, 5);
        assert!(config.stream.translate_markdown);
    }

    #[test]
    fn test_explicit_path_wins_over_discovered_files() {
        let project = toml_file("[model]\nname = \"gpt-4\"\n");
        let explicit = toml_file("[model]\nname = \"gpt-4o\"\n");

        let config: FileConfig =
            ConfigLoader::figment(&[project.path().to_path_buf()], Some(explicit.path()))
                .extract()
                .unwrap();

        assert_eq!(config.model.name.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_missing_discovered_file_is_skipped() {
        let config: FileConfig =
            ConfigLoader::figment(&[PathBuf::from("/nonexistent/live-reply.toml")], None)
                .extract()
                .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(&[], Some(Path::new("/nonexistent/explicit.toml"))).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let file = toml_file("[stream]\ntimeout_seconds = \"soon\"\n");
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(&[file.path().to_path_buf()], None).extract();
        assert!(result.is_err());
    }
}
