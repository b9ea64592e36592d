//! Repo-local architectural lint for enforcing hexagonal boundaries.
//!
//! The Takwin backend is a hexagonal modular monolith and the "hexagon" is
//! drawn at the Rust module level: `domain` (with its ports), `inbound`
//! adapters, and `outbound` adapters. Each layer carries a rule set:
//!
//! - `domain` must not import adapter modules (`inbound`, `outbound`) or
//!   web framework crates
//! - `inbound` must not import `outbound` modules or the async runtime
//!   directly; scheduling and shared state belong to the outbound adapters
//!   and the server shell
//! - `outbound` must not import `inbound` modules or web framework crates
//!
//! Run it with `cargo run -p architecture-lint` from anywhere inside the
//! workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// Rust source parsing failed, or a file path could not be classified.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => write!(
                f,
                "Failed to parse Rust source while linting architecture ({}): {message}",
                file.display()
            ),
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Dependency rules for one architectural layer.
struct LayerRules {
    /// Top-level directory under `backend/src` the rules apply to.
    layer: &'static str,
    /// Backend modules this layer must not reach into.
    banned_modules: &'static [&'static str],
    /// External crate roots this layer must not import.
    banned_crates: &'static [&'static str],
}

const WEB_CRATES: &[&str] = &["actix", "actix_service", "actix_session", "actix_web", "awc"];

static RULES: [LayerRules; 3] = [
    LayerRules {
        layer: "domain",
        banned_modules: &["inbound", "outbound"],
        banned_crates: WEB_CRATES,
    },
    LayerRules {
        layer: "inbound",
        banned_modules: &["outbound"],
        banned_crates: &["tokio"],
    },
    LayerRules {
        layer: "outbound",
        banned_modules: &["inbound"],
        banned_crates: WEB_CRATES,
    },
];

impl LayerRules {
    fn bans_module(&self, root: &str) -> bool {
        self.banned_modules.iter().any(|banned| *banned == root)
    }

    fn bans_crate(&self, root: &str) -> bool {
        self.banned_crates.iter().any(|banned| *banned == root)
    }
}

fn rules_for(relative_path: &Path) -> Option<&'static LayerRules> {
    let root = relative_path
        .components()
        .next()?
        .as_os_str()
        .to_string_lossy();
    RULES.iter().find(|rules| rules.layer == root.as_ref())
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let sources = read_layer_sources(&backend_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let rules = rules_for(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under a recognised layer directory".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(scan_source(&source.file, rules, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn scan_source(file: &Path, rules: &LayerRules, parsed: &syn::File) -> Vec<Violation> {
    let mut scanner = ImportScanner::default();
    scanner.visit_file(parsed);

    // BTreeSet dedupes repeated imports of the same offending root.
    let mut messages = BTreeSet::new();
    for segments in &scanner.paths {
        match path_target(segments) {
            Some(PathTarget::Module(root)) if rules.bans_module(root) => {
                messages.insert(format!(
                    "{} module must not depend on crate::{root}",
                    rules.layer
                ));
            }
            Some(PathTarget::Crate(root)) if rules.bans_crate(root) => {
                messages.insert(format!(
                    "{} module must not depend on external crate `{root}`",
                    rules.layer
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

/// Where a recorded path leads, seen from inside the backend crate.
enum PathTarget<'a> {
    /// A top-level module of the backend crate (`crate::`, `backend::`, or a
    /// bare layer name).
    Module(&'a str),
    /// Any other path root, treated as an external crate candidate.
    Crate(&'a str),
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn path_target(segments: &[String]) -> Option<PathTarget<'_>> {
    let first = segments.first()?.as_str();
    if RULES.iter().any(|rules| rules.layer == first) {
        return Some(PathTarget::Module(first));
    }
    if first == "backend" {
        return segments.get(1).map(|next| PathTarget::Module(next.as_str()));
    }
    if is_relative_segment(first) {
        return segments
            .iter()
            .map(String::as_str)
            .find(|segment| !is_relative_segment(segment))
            .map(PathTarget::Module);
    }
    Some(PathTarget::Crate(first))
}

#[derive(Default)]
struct ImportScanner {
    paths: BTreeSet<Vec<String>>,
}

impl ImportScanner {
    fn record<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = String>,
    {
        let segments: Vec<String> = segments.into_iter().collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
    }
}

/// Expands a `use` tree into the full paths it names, one per leaf.
fn flatten_use_tree(tree: &syn::UseTree, prefix: &[String], scanner: &mut ImportScanner) {
    match tree {
        syn::UseTree::Path(path) => {
            let mut next = prefix.to_vec();
            next.push(path.ident.to_string());
            flatten_use_tree(&path.tree, &next, scanner);
        }
        syn::UseTree::Name(name) => {
            scanner.record(prefix.iter().cloned().chain([name.ident.to_string()]));
        }
        syn::UseTree::Rename(rename) => {
            scanner.record(prefix.iter().cloned().chain([rename.ident.to_string()]));
        }
        syn::UseTree::Glob(_) => {
            scanner.record(prefix.iter().cloned().chain(["*".to_owned()]));
        }
        syn::UseTree::Group(group) => {
            for item in &group.items {
                flatten_use_tree(item, prefix, scanner);
            }
        }
    }
}

impl<'ast> Visit<'ast> for ImportScanner {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        self.record(node.segments.iter().map(|segment| segment.ident.to_string()));
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        flatten_use_tree(&node.tree, &[], self);
    }
}

fn read_layer_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut sources = Vec::new();
    let mut pending: Vec<PathBuf> = RULES
        .iter()
        .map(|rules| src_dir.join(rules.layer))
        .filter(|dir| dir.exists())
        .collect();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let file = path
                .strip_prefix(src_dir)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }

    Ok(sources)
}
