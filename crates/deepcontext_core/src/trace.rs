//! Observation hooks for resolution and traversal decisions.
//!
//! The analyzer reports what it tried and what it chose through a [`Tracer`]. Tracers
//! only observe: nothing they do can change a resolution outcome.

use log::debug;
use std::{fmt, path::Path, sync::Arc};

/// Which probing step found a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Exact,
    Extension,
    Index,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Exact => write!(f, "exact match"),
            ProbeKind::Extension => write!(f, "extension"),
            ProbeKind::Index => write!(f, "index file"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    SpecifierFound { file: &'a Path, specifier: &'a str },
    Resolving { specifier: &'a str, from_dir: &'a Path },
    ConfigFound { path: &'a Path },
    ConfigMalformed { path: &'a Path, error: &'a str },
    ConfigMissing { start: &'a Path },
    AliasMatched { pattern: &'a str, replacement: &'a str, rewritten: &'a Path },
    AliasUnmatched { specifier: &'a str },
    AliasLimitReached { specifier: &'a str },
    ProbeHit { kind: ProbeKind, path: &'a Path },
    ProbeMiss { kind: ProbeKind, path: &'a Path },
    Unresolved { specifier: &'a str, fallback: &'a Path },
    EdgeSkipped { from: &'a Path, to: &'a Path },
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::SpecifierFound { file, specifier } => {
                write!(f, "found import '{}' in {}", specifier, file.display())
            }
            TraceEvent::Resolving { specifier, from_dir } => {
                write!(f, "resolving '{}' from {}", specifier, from_dir.display())
            }
            TraceEvent::ConfigFound { path } => write!(f, "found tsconfig at {}", path.display()),
            TraceEvent::ConfigMalformed { path, error } => {
                write!(f, "ignoring malformed tsconfig at {}: {}", path.display(), error)
            }
            TraceEvent::ConfigMissing { start } => {
                write!(f, "no tsconfig.json above {}", start.display())
            }
            TraceEvent::AliasMatched { pattern, replacement, rewritten } => {
                write!(
                    f,
                    "matched pattern {} -> {}, rewritten to {}",
                    pattern,
                    replacement,
                    rewritten.display()
                )
            }
            TraceEvent::AliasUnmatched { specifier } => {
                write!(f, "no tsconfig path pattern matches '{}'", specifier)
            }
            TraceEvent::AliasLimitReached { specifier } => {
                write!(f, "alias rewrite limit reached at '{}'", specifier)
            }
            TraceEvent::ProbeHit { kind, path } => {
                write!(f, "found by {}: {}", kind, path.display())
            }
            TraceEvent::ProbeMiss { kind, path } => {
                write!(f, "not found by {}: {}", kind, path.display())
            }
            TraceEvent::Unresolved { specifier, fallback } => {
                write!(f, "could not resolve '{}', keeping {}", specifier, fallback.display())
            }
            TraceEvent::EdgeSkipped { from, to } => {
                write!(f, "not following {} -> {} (missing on disk)", from.display(), to.display())
            }
        }
    }
}

pub trait Tracer: Send + Sync {
    fn event(&self, event: TraceEvent<'_>);
}

impl<T: Tracer + ?Sized> Tracer for Arc<T> {
    fn event(&self, event: TraceEvent<'_>) {
        (**self).event(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn event(&self, _event: TraceEvent<'_>) {}
}

/// Forwards events to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn event(&self, event: TraceEvent<'_>) {
        debug!("{}", event);
    }
}
