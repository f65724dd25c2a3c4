//! Version field rewriting for `util upver`
//!
//! Substitutions are line-anchored regexes applied in a single pass. Lines
//! that match no pattern are left byte-for-byte unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::CapiError;

/// One regex replacement applied to a whole file
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    /// Build a multi-line substitution; `pattern` is matched per line
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(&format!("(?m){}", pattern))
            .with_context(|| format!("Invalid substitution pattern: {}", pattern))?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Apply to `content`, replacing every match
    pub fn apply(&self, content: &str) -> String {
        self.pattern
            .replace_all(content, self.replacement.as_str())
            .into_owned()
    }
}

/// Check that `version` is a valid semantic version
pub fn validate_version(version: &str) -> Result<()> {
    semver::Version::parse(version).map_err(|e| {
        CapiError::config_error_with_hint(
            format!("Invalid version '{}': {}", version, e),
            "Use a semantic version such as 1.4.0 or 2.0.0-rc.1.",
        )
    })?;
    Ok(())
}

/// Crate-family prefix derived from the manifest
///
/// Taken from the first `-`/`_` separated segment of `[package].name`, or
/// else of the first `[workspace].members` entry that is not a glob.
/// `mylib-capi` and `crates/mylib_core` both give `mylib`.
pub fn derive_crate_prefix(manifest: &str) -> Option<String> {
    let manifest: toml::Table = toml::from_str(manifest).ok()?;

    let package_name = manifest
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str());

    let member_name = || {
        manifest
            .get("workspace")
            .and_then(|workspace| workspace.get("members"))
            .and_then(|members| members.as_array())?
            .iter()
            .filter_map(|member| member.as_str())
            .filter(|member| !member.contains(['*', '?', '[']))
            .find_map(|member| Path::new(member).file_name().and_then(|n| n.to_str()))
    };

    let name = package_name.or_else(member_name)?;
    name.split(['-', '_'])
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Substitutions for the workspace manifest
///
/// The package `version` line and the exact-pinned dependencies on the
/// workspace's own crates (`<prefix>-foo = { version = "=x.y.z", ... }`)
/// are rewritten.
pub fn manifest_substitutions(version: &str, crate_prefix: &str) -> Result<Vec<Substitution>> {
    // `$` in the version would be read as a capture group reference
    let version = version.replace('$', "$$");
    let escaped = regex::escape(crate_prefix);
    Ok(vec![
        Substitution::new(
            r#"^version = "(.*?)""#,
            format!(r#"version = "{}""#, version),
        )?,
        Substitution::new(
            &format!(r#"^{}(.*)version = "=(.*?)""#, escaped),
            format!(
                r#"{}${{1}}version = "={}""#,
                crate_prefix.replace('$', "$$"),
                version
            ),
        )?,
    ])
}

/// Substitutions for the third-party notice file
///
/// Notice entries for the workspace's own crates look like
/// `<prefix>-foo 1.2.3 (MIT)`; the version column is replaced.
pub fn notice_substitutions(version: &str, crate_prefix: &str) -> Result<Vec<Substitution>> {
    let escaped = regex::escape(crate_prefix);
    Ok(vec![Substitution::new(
        &format!(r"^{}(.*) (.*) \((.*)\)", escaped),
        format!(
            "{}${{1}} {} (${{3}})",
            crate_prefix.replace('$', "$$"),
            version.replace('$', "$$")
        ),
    )?])
}

/// Apply `subs` in order to the file at `path` and write it back
///
/// Returns whether the content changed.
pub fn substitute_in_file(path: &Path, subs: &[Substitution]) -> Result<bool> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let updated = subs
        .iter()
        .fold(original.clone(), |content, sub| sub.apply(&content));

    if updated != original {
        std::fs::write(path, &updated)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(updated != original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"[workspace]
members = ["mylib-capi", "mylib-capi-link"]

[workspace.package]
version = "29.0.0"
edition = "2021"

[workspace.dependencies]
mylib = { version = "=29.0.0", default-features = false }
mylib-driver = { version = "=29.0.0" }
mylib-link-soem = { version = "=29.0.0", features = ["local"] }
anyhow = { version = "1.0.86" }
libc = "=0.2.155"
  version = "1.0.0"
"#;

    fn rewrite_manifest(version: &str, prefix: &str) -> String {
        manifest_substitutions(version, prefix)
            .unwrap()
            .iter()
            .fold(MANIFEST.to_string(), |content, sub| sub.apply(&content))
    }

    #[test]
    fn test_manifest_version_fields() {
        let updated = rewrite_manifest("29.1.0", "mylib");
        assert!(updated.contains("\nversion = \"29.1.0\"\n"));
        assert!(updated.contains("mylib = { version = \"=29.1.0\", default-features = false }"));
        assert!(updated.contains("mylib-driver = { version = \"=29.1.0\" }"));
        assert!(updated.contains("mylib-link-soem = { version = \"=29.1.0\", features = [\"local\"] }"));
    }

    #[test]
    fn test_manifest_other_lines_untouched() {
        let updated = rewrite_manifest("29.1.0", "mylib");
        let before: Vec<&str> = MANIFEST.lines().collect();
        let after: Vec<&str> = updated.lines().collect();
        assert_eq!(before.len(), after.len());

        for (old, new) in before.iter().zip(&after) {
            let rewritable = old.starts_with("version = ") || old.starts_with("mylib");
            if !rewritable {
                assert_eq!(old, new);
            }
        }
        assert!(updated.contains("anyhow = { version = \"1.0.86\" }"));
        assert!(updated.contains("libc = \"=0.2.155\""));
        assert!(updated.contains("\n  version = \"1.0.0\"\n"));
    }

    #[test]
    fn test_derive_prefix_from_workspace_members() {
        assert_eq!(derive_crate_prefix(MANIFEST).as_deref(), Some("mylib"));

        let manifest = "[workspace]\nmembers = [\"crates/*\", \"crates/mylib_core\"]\n";
        assert_eq!(derive_crate_prefix(manifest).as_deref(), Some("mylib"));
    }

    #[test]
    fn test_derive_prefix_prefers_package_name() {
        let manifest = "[package]\nname = \"acme-capi\"\n\n[workspace]\nmembers = [\"mylib-core\"]\n";
        assert_eq!(derive_crate_prefix(manifest).as_deref(), Some("acme"));
    }

    #[test]
    fn test_derive_prefix_without_names() {
        assert_eq!(derive_crate_prefix("[workspace]\nmembers = [\"crates/*\"]\n"), None);
        assert_eq!(derive_crate_prefix("[dependencies]\n"), None);
        assert_eq!(derive_crate_prefix("not toml ["), None);
    }

    #[test]
    fn test_prefix_is_escaped() {
        let subs = manifest_substitutions("2.0.0", "a.b").unwrap();
        let content = "axb = { version = \"=1.0.0\" }\na.b-core = { version = \"=1.0.0\" }\n";
        let updated = subs.iter().fold(content.to_string(), |c, s| s.apply(&c));
        assert_eq!(
            updated,
            "axb = { version = \"=1.0.0\" }\na.b-core = { version = \"=2.0.0\" }\n"
        );
    }

    #[test]
    fn test_notice_substitution() {
        let notice = "\
mylib 29.0.0 (MIT)
https://github.com/example/mylib
mylib-driver 29.0.0 (MIT)
serde 1.0.203 (MIT OR Apache-2.0)
";
        let subs = notice_substitutions("29.1.0", "mylib").unwrap();
        let updated = subs.iter().fold(notice.to_string(), |c, s| s.apply(&c));
        assert_eq!(
            updated,
            "\
mylib 29.1.0 (MIT)
https://github.com/example/mylib
mylib-driver 29.1.0 (MIT)
serde 1.0.203 (MIT OR Apache-2.0)
"
        );
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("1.2.3").is_ok());
        assert!(validate_version("2.0.0-rc.1").is_ok());
        let err = validate_version("1.2").unwrap_err();
        assert!(err.downcast_ref::<CapiError>().is_some());
    }

    #[test]
    fn test_substitute_in_file_reports_change() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Cargo.toml");
        fs::write(&path, MANIFEST).unwrap();

        let subs = manifest_substitutions("29.0.1", "mylib").unwrap();
        assert!(substitute_in_file(&path, &subs).unwrap());
        assert!(!substitute_in_file(&path, &subs).unwrap());
        assert!(fs::read_to_string(&path).unwrap().contains("version = \"29.0.1\""));
    }
}
