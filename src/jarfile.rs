// Local jar inspection: filename version extraction and plugin matching

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::constants::{DISABLED_EXT, JAR_EXT, NAME_SUFFIXES};

lazy_static! {
    /// Ordered most-specific-first; the first capturing match wins, so a
    /// four-part version is never truncated to its last three parts.
    static ref VERSION_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"-([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)$").unwrap(), "hyphenated 4-part"),
        (Regex::new(r"-([0-9]+\.[0-9]+\.[0-9]+)(?:-[A-Za-z].*)?$").unwrap(), "hyphenated 3-part"),
        (Regex::new(r"([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)$").unwrap(), "bare 4-part"),
        (Regex::new(r"([0-9]+\.[0-9]+\.[0-9]+)$").unwrap(), "bare 3-part"),
        (Regex::new(r"-([0-9]+\.[0-9]+)(?:-[A-Za-z].*)?$").unwrap(), "hyphenated 2-part"),
        (Regex::new(r"[vV]([0-9]+\.[0-9]+(?:\.[0-9]+)?)$").unwrap(), "v-prefixed"),
    ];
}

/// Alias substitutions for names whose jar never matches the display name.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("essentialsx", "essentials"),
    ("fastasyncworldedit", "fawe"),
];

/// Pull the version substring out of a jar filename, or return an empty
/// string when no pattern matches. Never errors: "can't tell" is an
/// expected answer.
pub fn extract_version(filename: &str) -> String {
    let name = filename.strip_suffix(JAR_EXT).unwrap_or(filename);

    for (pattern, label) in VERSION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(name) {
            let version = caps[1].to_string();
            debug!("{}: {} pattern matched -> {}", filename, label, version);
            return version;
        }
    }

    debug!("{}: no version pattern matched", filename);
    String::new()
}

/// Display name implied by a jar filename: extension and trailing version
/// stripped.
pub fn plugin_name_from_filename(filename: &str) -> String {
    let base = filename.strip_suffix(JAR_EXT).unwrap_or(filename);
    let version = extract_version(filename);
    if version.is_empty() {
        return base.to_string();
    }

    let mut name = base.strip_suffix(&version).unwrap_or(base).to_string();
    // At most one delimiter comes off: a hyphen, or the 'v' of a vX.Y tag.
    if name.ends_with('-') {
        name.pop();
    } else if name.ends_with(['v', 'V']) && name.len() > 1 {
        name.pop();
        if name.ends_with('-') {
            name.pop();
        }
    }
    name
}

/// Find the file in `files` that belongs to `plugin_name`, if any.
///
/// `files` are plain file names; iteration order decides ties, so callers
/// wanting deterministic results across filesystems should pass a sorted
/// list (which `list_jar_files` produces).
pub fn match_plugin_file<'a>(plugin_name: &str, files: &'a [String]) -> Option<&'a str> {
    let variants = name_variants(plugin_name);
    files
        .iter()
        .find(|f| matches_any_variant(f, &variants))
        .map(String::as_str)
}

fn matches_any_variant(filename: &str, variants: &[String]) -> bool {
    if !filename.ends_with(JAR_EXT) || filename.ends_with(DISABLED_EXT) {
        return false;
    }
    let base = filename[..filename.len() - JAR_EXT.len()].to_lowercase();

    for variant in variants {
        if base == *variant {
            return true;
        }
        if base.starts_with(&format!("{variant}-")) {
            return true;
        }
        if let Some(rest) = base.strip_prefix(variant.as_str()) {
            // A bare prefix only counts at a real boundary; "vault" must
            // not claim a longer plugin's jar.
            if rest.starts_with(|c: char| c == '-' || c == '.' || c.is_ascii_digit()) {
                return true;
            }
        }
    }
    false
}

/// Filename-friendly variants of a plugin's display name.
fn name_variants(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let mut variants = vec![lower.clone()];

    let hyphenated = hyphenate_camel_case(name);
    if hyphenated != lower {
        variants.push(hyphenated);
    }

    for (alias, replacement) in NAME_ALIASES {
        if lower == *alias {
            variants.push((*replacement).to_string());
        }
    }

    // Suffixes come off every variant gathered so far, so "ChairsReloaded"
    // reaches "chairs" through its hyphenated form.
    let mut stripped = Vec::new();
    for variant in &variants {
        for suffix in NAME_SUFFIXES {
            if let Some(base) = variant.strip_suffix(suffix) {
                if !base.is_empty() {
                    stripped.push(base.to_string());
                }
            }
        }
    }
    variants.extend(stripped);

    variants
}

/// "WorldEdit" -> "world-edit", "CMILib" -> "cmi-lib". Acronym runs stay
/// together; the break lands before the run's final capital.
fn hyphenate_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Sorted jar file names (including parked `.jar.DIS` ones) in `dir`.
/// A missing directory reads as empty rather than an error.
pub fn list_jar_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(JAR_EXT) || name.ends_with(DISABLED_EXT) {
                    files.push(name.to_string());
                }
            }
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hyphenated_versions() {
        assert_eq!(extract_version("CoolPlugin-1.2.3.jar"), "1.2.3");
        assert_eq!(extract_version("CoolPlugin-1.2.3.4.jar"), "1.2.3.4");
        assert_eq!(extract_version("Thing-2.0.jar"), "2.0");
    }

    #[test]
    fn test_extract_bare_versions() {
        assert_eq!(extract_version("CMILib1.5.6.3.jar"), "1.5.6.3");
        assert_eq!(extract_version("Jobs5.2.6.jar"), "5.2.6");
    }

    #[test]
    fn test_extract_with_qualifier() {
        assert_eq!(extract_version("Plugin-3.1.0-SNAPSHOT.jar"), "3.1.0");
        assert_eq!(extract_version("Plugin-1.4-beta.jar"), "1.4");
    }

    #[test]
    fn test_extract_v_prefix() {
        assert_eq!(extract_version("somethingv1.2.jar"), "1.2");
        assert_eq!(extract_version("somethingV2.0.1.jar"), "2.0.1");
    }

    #[test]
    fn test_extract_no_version() {
        assert_eq!(extract_version("CoolPlugin.jar"), "");
    }

    #[test]
    fn test_four_part_wins_over_three_part() {
        // The 4-part rule must fire before the 3-part rule would truncate.
        assert_eq!(extract_version("X-1.2.3.4.jar"), "1.2.3.4");
        assert_eq!(extract_version("Y9.8.7.6.jar"), "9.8.7.6");
    }

    #[test]
    fn test_plugin_name_from_filename() {
        assert_eq!(plugin_name_from_filename("CoolPlugin-1.2.3.jar"), "CoolPlugin");
        assert_eq!(plugin_name_from_filename("CMILib1.5.6.3.jar"), "CMILib");
        assert_eq!(plugin_name_from_filename("plain.jar"), "plain");
        assert_eq!(plugin_name_from_filename("somethingv1.2.jar"), "something");
        // A name that happens to end in 'v' keeps it.
        assert_eq!(plugin_name_from_filename("improv-1.2.jar"), "improv");
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_exact_and_versioned() {
        let dir = files(&["vault.jar"]);
        assert_eq!(match_plugin_file("Vault", &dir), Some("vault.jar"));

        let dir = files(&["vault-1.7.jar"]);
        assert_eq!(match_plugin_file("Vault", &dir), Some("vault-1.7.jar"));
    }

    #[test]
    fn test_match_rejects_embedded_name() {
        let dir = files(&["forgetfultrialvault.jar"]);
        assert_eq!(match_plugin_file("Vault", &dir), None);
    }

    #[test]
    fn test_match_rejects_alphabetic_boundary() {
        let dir = files(&["vaultextra-1.0.jar"]);
        assert_eq!(match_plugin_file("Vault", &dir), None);
    }

    #[test]
    fn test_match_digit_boundary() {
        let dir = files(&["cmilib1.5.6.3.jar"]);
        assert_eq!(match_plugin_file("CMILib", &dir), Some("cmilib1.5.6.3.jar"));
    }

    #[test]
    fn test_match_camel_case_hyphenation() {
        let dir = files(&["world-edit-7.2.0.jar"]);
        assert_eq!(match_plugin_file("WorldEdit", &dir), Some("world-edit-7.2.0.jar"));
    }

    #[test]
    fn test_match_suffix_stripped() {
        let dir = files(&["chairs-3.0.jar"]);
        assert_eq!(match_plugin_file("ChairsReloaded", &dir), Some("chairs-3.0.jar"));
    }

    #[test]
    fn test_match_skips_disabled_jars() {
        let dir = files(&["vault-1.7.jar.DIS"]);
        assert_eq!(match_plugin_file("Vault", &dir), None);
    }

    #[test]
    fn test_match_alias() {
        let dir = files(&["essentials-2.20.1.jar"]);
        assert_eq!(
            match_plugin_file("EssentialsX", &dir),
            Some("essentials-2.20.1.jar")
        );
    }

    #[test]
    fn test_hyphenate_camel_case() {
        assert_eq!(hyphenate_camel_case("WorldEdit"), "world-edit");
        assert_eq!(hyphenate_camel_case("CMILib"), "cmi-lib");
        assert_eq!(hyphenate_camel_case("Vault"), "vault");
        assert_eq!(hyphenate_camel_case("already-lower"), "already-lower");
    }
}
