//! Copying build outputs into `bin/` and `lib/`
//!
//! A missing artifact directory or an empty match is not an error: nothing
//! gets copied and the caller notices downstream.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{ArtifactLocation, HostOs};

/// Files directly inside `dir` whose names end with `suffix`, sorted
fn find_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        suffix
    );
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid artifact pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matches.sort();
    Ok(matches)
}

/// Copy every `*<suffix>` file from `src_dir` into `dst_dir`
fn copy_with_suffix(src_dir: &Path, suffix: &str, dst_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for src in find_with_suffix(src_dir, suffix)? {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dst = dst_dir.join(file_name);
        fs::copy(&src, &dst).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dst.display())
        })?;
        copied.push(dst);
    }
    Ok(copied)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Copy dynamic libraries (and Windows import libraries) into `bin_dir`
pub fn collect_dynamic(
    host: HostOs,
    location: &ArtifactLocation,
    bin_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let src = location.dir();
    let mut copied = Vec::new();
    match host {
        HostOs::Windows => {
            copied.extend(copy_with_suffix(src, ".dll", bin_dir)?);
            copied.extend(copy_with_suffix(src, ".dll.lib", bin_dir)?);
        }
        HostOs::Macos => copied.extend(copy_with_suffix(src, ".dylib", bin_dir)?),
        HostOs::Linux => copied.extend(copy_with_suffix(src, ".so", bin_dir)?),
        HostOs::Other => {}
    }
    Ok(copied)
}

/// Copy static archives into `lib_dir`
///
/// On Windows `*.lib` also matches the `*.dll.lib` import libraries; those
/// are removed from `lib_dir` again since they belong next to the DLLs in
/// `bin_dir`. When both are the same directory the import libraries stay.
/// Debug builds additionally ship their `*.pdb` files.
pub fn collect_static(
    host: HostOs,
    location: &ArtifactLocation,
    bin_dir: &Path,
    lib_dir: &Path,
    release: bool,
) -> Result<Vec<PathBuf>> {
    let src = location.dir();
    let mut copied = Vec::new();
    if host.is_windows() {
        copied.extend(copy_with_suffix(src, ".lib", lib_dir)?);
        let import_libs = if same_dir(bin_dir, lib_dir) {
            Vec::new()
        } else {
            find_with_suffix(lib_dir, ".dll.lib")?
        };
        for import_lib in import_libs {
            fs::remove_file(&import_lib)
                .with_context(|| format!("Failed to remove {}", import_lib.display()))?;
            copied.retain(|path| path != &import_lib);
        }
        if !release {
            copied.extend(copy_with_suffix(src, ".pdb", lib_dir)?);
        }
    } else {
        copied.extend(copy_with_suffix(src, ".a", lib_dir)?);
    }
    Ok(copied)
}
