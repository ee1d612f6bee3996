//! JSON API-surface loader
//!
//! A surface file is the serde form of [`AssemblySymbol`]. Loading a set of
//! surfaces also links each assembly's declared references, looking them up
//! first among the surfaces being loaded and then as `<name>.json` in the
//! reference directories. Linking is memoised per load, so every assembly
//! referencing `Contoso.Core` shares one instance.

use crate::result::ResultExt;
use crate::symbols::AssemblySymbol;
use crate::{ApiCompatError, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Loads API surfaces from disk
#[derive(Debug, Clone, Default)]
pub struct SurfaceLoader {
    reference_dirs: Vec<PathBuf>,
}

impl SurfaceLoader {
    pub fn new(reference_dirs: Vec<PathBuf>) -> Self {
        Self { reference_dirs }
    }

    /// Read one surface file
    pub fn read_surface(path: &Path) -> Result<AssemblySymbol> {
        let content = fs::read_to_string(path).map_err(|e| ApiCompatError::io_error(path, e))?;
        let mut assembly: AssemblySymbol = serde_json::from_str(&content)
            .map_err(|e| ApiCompatError::surface_error(path, e.to_string()))?;
        assembly.normalize();
        debug!(
            "Read surface '{}' ({} types) from {}",
            assembly.name(),
            assembly.types().count(),
            path.display()
        );
        Ok(assembly)
    }

    /// Load every surface named by `paths`
    ///
    /// A path is a `.json` file or a directory whose `.json` files are loaded
    /// in file name order (not recursively). Unreadable or malformed inputs
    /// are errors. References are searched in the reference directories,
    /// then in the directory of each input.
    pub fn load_assemblies(&self, paths: &[PathBuf]) -> Result<Vec<Arc<AssemblySymbol>>> {
        let mut surfaces = Vec::new();
        let mut input_dirs = Vec::new();
        for path in paths {
            for file in surface_files(path)? {
                surfaces.push(Self::read_surface(&file)?);
            }
            input_dirs.push(input_dir(path));
        }
        Ok(self.link(surfaces, &input_dirs))
    }

    /// Find the implementation of each `from` assembly in `search_dirs`
    ///
    /// Candidates are `<name>.json` files whose assembly has the same simple
    /// name. With identity validation on, a candidate with a different
    /// identity is skipped in favour of a later exact match; if none matches
    /// exactly, the first same-named candidate is kept so the identity
    /// difference can be reported. Assemblies with no candidate are left out.
    pub fn load_matching(
        &self,
        from: &[Arc<AssemblySymbol>],
        search_dirs: &[PathBuf],
        validate_identity: bool,
    ) -> Result<Vec<Arc<AssemblySymbol>>> {
        for dir in search_dirs {
            if !dir.is_dir() {
                return Err(ApiCompatError::config_error(format!(
                    "Search directory not found: {}",
                    dir.display()
                )));
            }
        }

        let mut matched = Vec::new();
        for left in from {
            match self.find_candidate(left, search_dirs, validate_identity)? {
                Some(candidate) => matched.push(candidate),
                None => debug!("No implementation found for '{}'", left.name()),
            }
        }
        Ok(self.link(matched, search_dirs))
    }

    fn find_candidate(
        &self,
        left: &AssemblySymbol,
        search_dirs: &[PathBuf],
        validate_identity: bool,
    ) -> Result<Option<AssemblySymbol>> {
        let mut fallback = None;
        for dir in search_dirs {
            let path = dir.join(format!("{}.json", left.name()));
            if !path.is_file() {
                continue;
            }

            let candidate = Self::read_surface(&path)?;
            if !candidate.name().eq_ignore_ascii_case(left.name()) {
                warn!(
                    "Skipping {}: it declares assembly '{}', expected '{}'",
                    path.display(),
                    candidate.name(),
                    left.name()
                );
                continue;
            }
            if !validate_identity || candidate.identity == left.identity {
                return Ok(Some(candidate));
            }

            warn!(
                "Skipping {}: identity '{}' does not match '{}'",
                path.display(),
                candidate.identity,
                left.identity
            );
            if fallback.is_none() {
                fallback = Some(candidate);
            }
        }
        Ok(fallback)
    }

    fn link(
        &self,
        surfaces: Vec<AssemblySymbol>,
        input_dirs: &[PathBuf],
    ) -> Vec<Arc<AssemblySymbol>> {
        let mut order = Vec::with_capacity(surfaces.len());
        let mut pending = HashMap::new();
        for surface in surfaces {
            let key = surface.name().to_ascii_lowercase();
            if pending.contains_key(&key) {
                warn!("Duplicate surface for assembly '{}', keeping the first", surface.name());
                continue;
            }
            order.push(surface.name().to_string());
            pending.insert(key, surface);
        }

        let mut search_dirs = self.reference_dirs.clone();
        for dir in input_dirs {
            if !search_dirs.contains(dir) {
                search_dirs.push(dir.clone());
            }
        }

        let mut linker = Linker {
            reference_dirs: &search_dirs,
            pending,
            linked: HashMap::new(),
            in_progress: HashSet::new(),
        };
        order
            .iter()
            .filter_map(|name| linker.link(name))
            .collect()
    }
}

/// Directory searched for references of the surfaces at `path`
fn input_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Surface files named by one input path
fn surface_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ApiCompatError::io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ApiCompatError::io_error(path, e.into()))?;
        let is_json = entry.path().extension().and_then(|e| e.to_str()) == Some("json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

struct Linker<'a> {
    reference_dirs: &'a [PathBuf],
    pending: HashMap<String, AssemblySymbol>,
    linked: HashMap<String, Arc<AssemblySymbol>>,
    in_progress: HashSet<String>,
}

impl Linker<'_> {
    fn link(&mut self, name: &str) -> Option<Arc<AssemblySymbol>> {
        let key = name.to_ascii_lowercase();
        if let Some(done) = self.linked.get(&key) {
            return Some(done.clone());
        }
        if self.in_progress.contains(&key) {
            debug!("Breaking reference cycle at '{}'", name);
            return None;
        }

        let mut assembly = match self.pending.remove(&key) {
            Some(assembly) => assembly,
            None => self.find_reference(name).log_and_continue().flatten()?,
        };

        self.in_progress.insert(key.clone());
        for reference in assembly.reference_names.clone() {
            match self.link(&reference) {
                Some(linked) => assembly.references.push(linked),
                None => debug!(
                    "Reference '{}' of '{}' is not available",
                    reference,
                    assembly.name()
                ),
            }
        }
        self.in_progress.remove(&key);

        let assembly = Arc::new(assembly);
        self.linked.insert(key, assembly.clone());
        Some(assembly)
    }

    fn find_reference(&self, name: &str) -> Result<Option<AssemblySymbol>> {
        for dir in self.reference_dirs {
            let path = dir.join(format!("{name}.json"));
            if path.is_file() {
                return SurfaceLoader::read_surface(&path).map(Some);
            }
        }
        Ok(None)
    }
}
