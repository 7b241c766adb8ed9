use anyhow::{Context, Result, bail};
use dashmap::{DashMap, DashSet};
use log::{debug, info, trace, warn};
use path_clean::clean;
use rayon::prelude::*;
use std::{
    path::{self, Path, PathBuf},
    thread,
};

use crate::{
    collector::collect_source_files,
    config::AliasCache,
    fs::{FileSystem, OsFileSystem},
    parser::read_source_file,
    resolver::resolve,
    trace::{LogTracer, NullTracer, TraceEvent, Tracer},
    types::AnalysisResult,
};

/// Traces local imports starting from a file or directory.
pub struct Analyzer {
    fs: Box<dyn FileSystem>,
    tracer: Box<dyn Tracer>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self { fs: Box::new(OsFileSystem), tracer: Box::new(NullTracer) }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    /// Analyzes `path` and follows resolved imports up to `max_depth` hops.
    ///
    /// A directory is expanded to every JS/TS file below it, all at depth 0. Only a
    /// missing root (or an unreadable root file) is an error; unreadable files and
    /// imports that do not exist on disk further down are skipped.
    pub fn analyze(&self, path: &Path, max_depth: usize) -> Result<AnalysisResult> {
        info!("Starting import analysis of {} (max depth {})", path.display(), max_depth);

        let root = clean(
            path::absolute(path)
                .with_context(|| format!("Failed to resolve path {}", path.display()))?,
        );
        if !self.fs.exists(&root) {
            bail!("Path does not exist: {}", root.display());
        }

        let root_is_dir = self.fs.is_dir(&root);
        let initial = if root_is_dir {
            collect_source_files(&*self.fs, &root)?
        } else {
            vec![root]
        };
        info!("Found {} files at depth 0", initial.len());

        let traversal = Traversal::new(&*self.fs, &*self.tracer, max_depth);
        traversal.run(initial, !root_is_dir)?;

        let result = traversal.into_result();
        info!("Import analysis complete. Recorded {} files", result.content.len());
        Ok(result)
    }
}

/// Analyzes `path` on the local file system. With `debug` set, every resolution
/// decision is logged at debug level.
pub fn analyze(path: impl AsRef<Path>, max_depth: usize, debug: bool) -> Result<AnalysisResult> {
    let analyzer =
        if debug { Analyzer::new().with_tracer(LogTracer) } else { Analyzer::new() };
    analyzer.analyze(path.as_ref(), max_depth)
}

/// State owned by a single `analyze` call.
struct Traversal<'a> {
    fs: &'a dyn FileSystem,
    tracer: &'a dyn Tracer,
    max_depth: usize,
    aliases: AliasCache,
    visited: DashSet<PathBuf>,
    content: DashMap<PathBuf, String>,
    imports: DashMap<PathBuf, Vec<PathBuf>>,
}

impl<'a> Traversal<'a> {
    fn new(fs: &'a dyn FileSystem, tracer: &'a dyn Tracer, max_depth: usize) -> Self {
        Self {
            fs,
            tracer,
            max_depth,
            aliases: AliasCache::new(),
            visited: DashSet::new(),
            content: DashMap::new(),
            imports: DashMap::new(),
        }
    }

    /// Processes the traversal one depth level at a time. Files of a level are visited
    /// in parallel and the level is joined before its successors start, so every file
    /// is recorded at its shortest distance from the initial set.
    fn run(&self, initial: Vec<PathBuf>, fail_on_initial_error: bool) -> Result<()> {
        let mut frontier = initial;
        let mut depth = 0;

        while !frontier.is_empty() {
            debug!("Processing {} files at depth {}", frontier.len(), depth);
            let outcomes: Vec<Result<Vec<PathBuf>>> =
                frontier.par_iter().map(|file| self.visit(file, depth)).collect();

            let mut next = Vec::new();
            for (file, outcome) in frontier.iter().zip(outcomes) {
                match outcome {
                    Ok(successors) => next.extend(successors),
                    Err(e) if depth == 0 && fail_on_initial_error => return Err(e),
                    Err(e) => warn!("Skipping {}: {:#}", file.display(), e),
                }
            }

            frontier = next;
            depth += 1;
        }

        debug!(
            "Traversal statistics: visited={}, recorded={}, tsconfig lookups={}",
            self.visited.len(),
            self.content.len(),
            self.aliases.len()
        );
        Ok(())
    }

    /// Reads, records and resolves one file. Returns the imports to follow next.
    fn visit(&self, file: &Path, depth: usize) -> Result<Vec<PathBuf>> {
        if !self.visited.insert(file.to_path_buf()) {
            trace!("Already visited: {}", file.display());
            return Ok(Vec::new());
        }
        debug!("Thread {:?} processing: {}", thread::current().id(), file.display());

        let source = read_source_file(self.fs, file, self.tracer)?;
        let dir = file.parent().unwrap_or(file);
        let resolved: Vec<PathBuf> = source
            .imports
            .iter()
            .map(|specifier| resolve(self.fs, &self.aliases, self.tracer, specifier, dir))
            .collect();
        debug!("Resolved {} imports in {}", resolved.len(), file.display());

        let successors = if depth < self.max_depth {
            resolved
                .iter()
                .filter(|target| {
                    let exists = self.fs.exists(target);
                    if !exists {
                        self.tracer.event(TraceEvent::EdgeSkipped { from: file, to: target });
                    }
                    exists
                })
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        self.content.insert(source.path.clone(), source.content);
        self.imports.insert(source.path, resolved);
        Ok(successors)
    }

    fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            imports: self.imports.into_iter().collect(),
            content: self.content.into_iter().collect(),
        }
    }
}
