use log::trace;
use path_clean::clean;
use std::{
    ffi::OsString,
    path::{self, Path, PathBuf},
};

use crate::{
    config::AliasCache,
    constants::{INDEX_FILES, MAX_ALIAS_REWRITES, RESOLVE_EXTENSIONS},
    fs::FileSystem,
    trace::{ProbeKind, TraceEvent, Tracer},
};

/// Resolves `request` as seen from `current_dir` to an absolute file path.
///
/// Alias-prefixed requests (`@...`) are first rewritten through the `paths` of the
/// nearest `tsconfig.json`. The result is then probed as an exact file, with each of
/// [`RESOLVE_EXTENSIONS`] appended, and as a directory holding one of [`INDEX_FILES`].
/// Resolution never fails: when nothing exists on disk the normalized joined path is
/// returned as a best guess.
pub fn resolve(
    fs: &dyn FileSystem,
    aliases: &AliasCache,
    tracer: &dyn Tracer,
    request: &str,
    current_dir: &Path,
) -> PathBuf {
    let mut base = path::absolute(current_dir).unwrap_or_else(|_| current_dir.to_path_buf());
    let mut specifier = request.to_string();
    tracer.event(TraceEvent::Resolving { specifier: request, from_dir: &base });

    let mut rewrites = 0;
    while specifier.starts_with('@') {
        if rewrites == MAX_ALIAS_REWRITES {
            tracer.event(TraceEvent::AliasLimitReached { specifier: &specifier });
            break;
        }
        let cfg = aliases.get_or_load(fs, &base, tracer);
        let Some(alias_base) = cfg.base_dir().filter(|_| !cfg.is_empty()) else {
            break;
        };

        let rewritten = cfg.paths.iter().find_map(|(pattern, replacements)| {
            let captured = match_pattern(pattern, &specifier)?;
            let replacement = replacements.first()?;
            Some((pattern, replacement, replacement.replacen('*', captured, 1)))
        });
        let Some((pattern, replacement, rewritten)) = rewritten else {
            tracer.event(TraceEvent::AliasUnmatched { specifier: &specifier });
            break;
        };

        // The rewrite stays relative to the alias base so a replacement that is itself
        // alias-prefixed goes through the loop again.
        let target = clean(alias_base.join(&rewritten));
        tracer.event(TraceEvent::AliasMatched { pattern, replacement, rewritten: &target });
        specifier = rewritten;
        base = alias_base;
        rewrites += 1;
    }

    let candidate = clean(base.join(&specifier));
    trace!("Trying path: {}", candidate.display());
    resolve_file(fs, tracer, &specifier, &candidate).unwrap_or_else(|| {
        tracer.event(TraceEvent::Unresolved { specifier: request, fallback: &candidate });
        candidate
    })
}

/// Matches `specifier` against a `paths` pattern with at most one `*`, returning the
/// text captured by the wildcard (empty for a pattern without one).
fn match_pattern<'a>(pattern: &str, specifier: &'a str) -> Option<&'a str> {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => specifier.strip_prefix(prefix)?.strip_suffix(suffix),
        None => (pattern == specifier).then_some(""),
    }
}

/// True when the last path segment carries a `.ext` suffix.
fn has_extension(specifier: &str) -> bool {
    specifier.rfind('.').is_some_and(|idx| {
        let ext = &specifier[idx + 1..];
        !ext.is_empty() && !ext.contains('/')
    })
}

fn resolve_file(
    fs: &dyn FileSystem,
    tracer: &dyn Tracer,
    specifier: &str,
    candidate: &Path,
) -> Option<PathBuf> {
    let probe = |kind: ProbeKind, path: PathBuf| -> Option<PathBuf> {
        if fs.exists(&path) {
            tracer.event(TraceEvent::ProbeHit { kind, path: &path });
            Some(path)
        } else {
            tracer.event(TraceEvent::ProbeMiss { kind, path: &path });
            None
        }
    };

    if has_extension(specifier)
        && let Some(found) = probe(ProbeKind::Exact, candidate.to_path_buf())
    {
        return Some(found);
    }

    for ext in RESOLVE_EXTENSIONS {
        let mut with_ext = OsString::from(candidate.as_os_str());
        with_ext.push(ext);
        if let Some(found) = probe(ProbeKind::Extension, PathBuf::from(with_ext)) {
            return Some(found);
        }
    }

    INDEX_FILES.iter().find_map(|index_file| probe(ProbeKind::Index, candidate.join(index_file)))
}
