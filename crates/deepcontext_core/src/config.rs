use dashmap::DashMap;
use log::trace;
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    constants::TSCONFIG_FILE,
    fs::FileSystem,
    trace::{TraceEvent, Tracer},
};

/// Path alias settings from the nearest `tsconfig.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasConfig {
    /// `compilerOptions.baseUrl`, relative to `config_dir`
    pub base_url: Option<String>,
    /// `compilerOptions.paths` in declaration order
    pub paths: Vec<(String, Vec<String>)>,
    /// Directory containing the config file that was loaded
    pub config_dir: Option<PathBuf>,
}

impl AliasConfig {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory that alias replacements are joined onto.
    pub fn base_dir(&self) -> Option<PathBuf> {
        let dir = self.config_dir.as_ref()?;
        Some(match &self.base_url {
            Some(base_url) => path_clean::clean(dir.join(base_url)),
            None => dir.clone(),
        })
    }
}

/// Walks from `start_dir` toward the filesystem root and returns the first
/// `tsconfig.json` that parses. Missing, unreadable and malformed files are all
/// skipped, so this never fails; it returns an empty config instead.
pub fn load_alias_config(
    fs: &dyn FileSystem,
    start_dir: &Path,
    tracer: &dyn Tracer,
) -> AliasConfig {
    for dir in start_dir.ancestors() {
        let tsconfig_path = dir.join(TSCONFIG_FILE);
        trace!("Checking for tsconfig at: {:?}", tsconfig_path);
        if !fs.exists(&tsconfig_path) {
            continue;
        }
        let Ok(content) = fs.read_to_string(&tsconfig_path) else {
            continue;
        };
        match parse_tsconfig(&content) {
            Ok((base_url, paths)) => {
                tracer.event(TraceEvent::ConfigFound { path: &tsconfig_path });
                return AliasConfig { base_url, paths, config_dir: Some(dir.to_path_buf()) };
            }
            Err(e) => {
                let error = e.to_string();
                tracer.event(TraceEvent::ConfigMalformed { path: &tsconfig_path, error: &error });
            }
        }
    }

    tracer.event(TraceEvent::ConfigMissing { start: start_dir });
    AliasConfig::default()
}

type ParsedPaths = (Option<String>, Vec<(String, Vec<String>)>);

fn parse_tsconfig(content: &str) -> serde_json::Result<ParsedPaths> {
    let cleaned = strip_trailing_commas(&strip_jsonc_comments(content));
    let json: Value = serde_json::from_str(&cleaned)?;

    let compiler_options = json.get("compilerOptions");
    let base_url = compiler_options
        .and_then(|c| c.get("baseUrl"))
        .and_then(|b| b.as_str())
        .map(str::to_string);

    let mut paths = Vec::new();
    if let Some(paths_obj) =
        compiler_options.and_then(|c| c.get("paths")).and_then(|p| p.as_object())
    {
        for (pattern, targets) in paths_obj {
            let replacements: Vec<String> = targets
                .as_array()
                .map(|arr| arr.iter().filter_map(|t| t.as_str()).map(str::to_string).collect())
                .unwrap_or_default();
            if replacements.is_empty() {
                trace!("Dropping tsconfig path '{}' with no usable targets", pattern);
                continue;
            }
            trace!("Found tsconfig path alias: '{}' -> {:?}", pattern, replacements);
            paths.push((pattern.clone(), replacements));
        }
    }

    Ok((base_url, paths))
}

/// Removes `//` and `/* */` comments that sit outside string literals.
fn strip_jsonc_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push('"');
                while let Some(c) = chars.next() {
                    out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if c == '"' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Drops a `,` that is followed only by whitespace before `}` or `]`.
fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = input.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Per-run memo of [`load_alias_config`] keyed by starting directory.
#[derive(Debug, Default)]
pub struct AliasCache {
    entries: DashMap<PathBuf, Arc<AliasConfig>>,
}

impl AliasCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        fs: &dyn FileSystem,
        start_dir: &Path,
        tracer: &dyn Tracer,
    ) -> Arc<AliasConfig> {
        if let Some(cfg) = self.entries.get(start_dir) {
            trace!("Cache hit for tsconfig lookup from {}", start_dir.display());
            return Arc::clone(cfg.value());
        }
        let cfg = Arc::new(load_alias_config(fs, start_dir, tracer));
        self.entries.insert(start_dir.to_path_buf(), Arc::clone(&cfg));
        cfg
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
