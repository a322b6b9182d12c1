mod document;

use std::path::{Path, PathBuf};
use std::time::Duration;

use document::{ConfigDocument, ParseNode};

use crate::domain::Tool;
use crate::runner::DEFAULT_TIMEOUT;

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE_NAME: &str = ".tf-hooks.kdl";

/// Hook configuration loaded from a KDL file.
///
/// ```kdl
/// timeout 120
/// exclude "examples" "generated"
/// extensions ".tf" ".tofu"
/// ```
///
/// Every node is optional; an absent file means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Per-invocation timeout. `None` means [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Directory names skipped in addition to the built-in set.
    pub exclude: Vec<String>,
    /// Replaces the tool's suffix set when present.
    pub extensions: Option<Vec<String>>,
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    #[diagnostic(
        code(tf_hooks::config::not_found),
        help("--hook-config must point at an existing KDL file")
    )]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(tf_hooks::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(tf_hooks::config::syntax))]
    ParseError(String),
    #[error("invalid config: {0}")]
    #[diagnostic(
        code(tf_hooks::config::invalid),
        help("supported nodes: timeout <seconds>, exclude \"<dir>\"..., extensions \"<suffix>\"...")
    )]
    ValidationError(String),
}

impl Config {
    /// Load a config from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let doc = ConfigDocument::load(path)?;
        Self::from_document(&doc)
    }

    /// Parse a KDL string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc = ConfigDocument::parse(content)?;
        Self::from_document(&doc)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Otherwise [`CONFIG_FILE_NAME`] in `cwd`
    /// is used if present, and defaults if not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config from --hook-config");
            return Self::load(path);
        }
        let implicit = cwd.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "loading config from working directory");
            Self::load(&implicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Suffixes that mark a configuration directory for `tool`.
    pub fn extensions_for(&self, tool: Tool) -> Vec<String> {
        match &self.extensions {
            Some(exts) => exts.clone(),
            None => tool
                .default_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn timeout_or_default(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    fn from_document(doc: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        for node in doc.nodes() {
            match node.name() {
                "timeout" => {
                    if config.timeout.is_some() {
                        return Err(invalid(&node, "timeout given more than once"));
                    }
                    config.timeout = Some(parse_timeout(&node)?);
                }
                "exclude" => config.exclude.extend(parse_names(&node)?),
                "extensions" => config
                    .extensions
                    .get_or_insert_with(Vec::new)
                    .extend(parse_names(&node)?),
                other => return Err(invalid(&node, &format!("unknown node '{other}'"))),
            }
        }
        Ok(config)
    }
}

fn parse_timeout(node: &ParseNode<'_>) -> Result<Duration, ConfigError> {
    let values = node.integers();
    match (node.arity(), values.as_slice()) {
        (1, [secs]) if *secs > 0 => u64::try_from(*secs)
            .map(Duration::from_secs)
            .map_err(|_| invalid(node, "timeout is out of range")),
        _ => Err(invalid(
            node,
            "timeout expects a single positive integer (seconds)",
        )),
    }
}

/// Non-empty string arguments of a list node (`exclude`, `extensions`).
fn parse_names(node: &ParseNode<'_>) -> Result<Vec<String>, ConfigError> {
    let values = node.strings();
    if values.is_empty() || values.len() != node.arity() {
        return Err(invalid(
            node,
            &format!("{} expects one or more strings", node.name()),
        ));
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(invalid(node, &format!("{} contains an empty string", node.name())));
    }
    Ok(values.into_iter().map(String::from).collect())
}

fn invalid(node: &ParseNode<'_>, msg: &str) -> ConfigError {
    ConfigError::ValidationError(format!("line {}: {msg}", node.line()))
}
