//! Configuration discovery, effective settings resolution, and the shared
//! validation context.
//!
//! mypy-config reads `mypy-config.toml|yaml|yml` from the repository root
//! (or closest ancestor) and merges it with CLI flags. Defaults:
//! - `strict_typing_file`: `.strict-typing`
//! - `mypy_ini`: `mypy.ini`
//! - `python_version`: `3.9`
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Issue;
use crate::settings;

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `mypy-config.toml|yaml`.
pub struct FileConfig {
    pub strict_typing_file: Option<String>,
    pub mypy_ini: Option<String>,
    pub python_version: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub strict_typing_file: String,
    pub mypy_ini: String,
    pub python_version: String,
    pub output: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `mypy-config.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("mypy-config.toml").exists()
            || cur.join("mypy-config.yaml").exists()
            || cur.join("mypy-config.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FileConfig` from `mypy-config.toml` or `mypy-config.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<FileConfig> {
    let toml_path = root.join("mypy-config.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: FileConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["mypy-config.yaml", "mypy-config.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: FileConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli_repo_root: Option<&str>, cli_output: Option<&str>) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let strict_typing_file = cfg
        .strict_typing_file
        .unwrap_or_else(|| settings::STRICT_TYPING_FILE.to_string());
    let mypy_ini = cfg
        .mypy_ini
        .unwrap_or_else(|| settings::MYPY_INI.to_string());
    let python_version = cfg
        .python_version
        .unwrap_or_else(|| settings::PYTHON_VERSION.to_string());
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        repo_root,
        strict_typing_file,
        mypy_ini,
        python_version,
        output,
    }
}

/// Shared validation context: root path for relative lookups, an append-only
/// error sink, and a string-keyed cache carrying the rendered document from
/// the validate phase to the generate phase.
pub struct Context {
    pub root: PathBuf,
    pub strict_typing_file: String,
    pub mypy_ini: String,
    pub python_version: String,
    pub errors: Vec<Issue>,
    pub cache: HashMap<String, String>,
}

impl Context {
    pub fn new(eff: &Effective) -> Self {
        Context {
            root: eff.repo_root.clone(),
            strict_typing_file: eff.strict_typing_file.clone(),
            mypy_ini: eff.mypy_ini.clone(),
            python_version: eff.python_version.clone(),
            errors: Vec::new(),
            cache: HashMap::new(),
        }
    }

    pub fn add_error(&mut self, rule: &str, message: String) {
        self.errors.push(Issue {
            plugin: settings::PLUGIN.to_string(),
            rule: rule.to_string(),
            message,
            fixable: false,
        });
    }

    pub fn add_fixable_error(&mut self, rule: &str, message: String) {
        self.errors.push(Issue {
            plugin: settings::PLUGIN.to_string(),
            rule: rule.to_string(),
            message,
            fixable: true,
        });
    }

    /// True when any error tagged for this plugin has been collected.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.plugin == settings::PLUGIN)
    }
}
