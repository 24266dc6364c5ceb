//! URL -> output file path strategies.
//!
//! Grounded on `original_source/docpull/naming.py`'s four `NamingStrategy`
//! subclasses. Sanitization and the hierarchical prefix list are carried
//! over verbatim; the 200-char truncation now hashes with SHA-256 (via
//! [`crate::cache::manager::compute_checksum`]) rather than MD5, since the
//! crate already depends on `sha2` and has no other use for an MD5 crate.

use crate::config::NamingStrategy;
use crate::imurl::ImUrl;
use std::path::{Path, PathBuf};

const REMOVE_PREFIXES: &[&str] = &[
    "docs",
    "documentation",
    "en",
    "english",
    "v1",
    "v2",
    "latest",
    "stable",
];

/// Sanitize a single path segment: drop characters illegal in filenames,
/// collapse whitespace/hyphen runs, and hash-truncate anything over 200
/// characters.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => {}
            '\\' | '/' => out.push('-'),
            c if c.is_whitespace() => out.push('-'),
            c => out.push(c),
        }
    }
    let collapsed = collapse_hyphens(&out);
    let trimmed = collapsed.trim_matches('-');

    if trimmed.chars().count() > 200 {
        let chars: Vec<char> = trimmed.chars().collect();
        let head: String = chars[..180].iter().collect();
        let overflow: String = chars[180..].iter().collect();
        let hash = crate::cache::manager::compute_checksum(overflow.as_bytes());
        return format!("{head}-{}", &hash[..8]);
    }

    if trimmed.is_empty() {
        "index".to_string()
    } else {
        trimmed.to_string()
    }
}

fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_hyphen = false;
    for c in s.chars() {
        if c == '-' {
            if !last_was_hyphen {
                out.push(c);
            }
            last_was_hyphen = true;
        } else {
            out.push(c);
            last_was_hyphen = false;
        }
    }
    out
}

fn strip_known_extension(path: &str) -> &str {
    for ext in [".html", ".htm", ".php", ".aspx"] {
        if path.len() > ext.len() && path.to_ascii_lowercase().ends_with(ext) {
            return &path[..path.len() - ext.len()];
        }
    }
    path
}

fn strip_base(path: &str, base_url: Option<&ImUrl>) -> String {
    let Some(base) = base_url else {
        return path.to_string();
    };
    let base_path = base.path().trim_matches('/');
    if base_path.is_empty() || !path.starts_with(base_path) {
        return path.to_string();
    }
    path[base_path.len()..].trim_matches('/').to_string()
}

/// Compute the output file path for `url` under `output_dir`, per
/// `strategy`. `base_url` (the crawl seed), when given, is stripped from
/// the front of the path before the strategy-specific transform runs.
#[must_use]
pub fn output_path(
    strategy: NamingStrategy,
    url: &ImUrl,
    base_url: Option<&ImUrl>,
    output_dir: &Path,
) -> PathBuf {
    match strategy {
        NamingStrategy::Full => full_path(url, base_url, output_dir),
        NamingStrategy::Short => short_path(url, base_url, output_dir),
        NamingStrategy::Flat => flat_path(url, base_url, output_dir),
        NamingStrategy::Hierarchical => hierarchical_path(url, base_url, output_dir),
    }
}

fn full_path(url: &ImUrl, base_url: Option<&ImUrl>, output_dir: &Path) -> PathBuf {
    let domain = url.host().unwrap_or_default().replace(['.', ':'], "_");
    let path = strip_base(url.path().trim_matches('/'), base_url);
    let path = if path.is_empty() { "index".to_string() } else { path };
    let path = strip_known_extension(&path);
    let filename = sanitize(&path.replace('/', "_"));
    output_dir.join(domain).join(format!("{filename}.md"))
}

fn short_path(url: &ImUrl, base_url: Option<&ImUrl>, output_dir: &Path) -> PathBuf {
    let raw = url.path().trim_matches('/');
    if raw.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_base(raw, base_url);
    if path.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_known_extension(&path);
    let parts: Vec<String> = path.split('/').map(sanitize).collect();
    build_nested(output_dir, &parts)
}

fn flat_path(url: &ImUrl, base_url: Option<&ImUrl>, output_dir: &Path) -> PathBuf {
    let raw = url.path().trim_matches('/');
    if raw.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_base(raw, base_url);
    if path.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_known_extension(&path);
    let filename = sanitize(&path.replace('/', "-"));
    output_dir.join(format!("{filename}.md"))
}

fn hierarchical_path(url: &ImUrl, base_url: Option<&ImUrl>, output_dir: &Path) -> PathBuf {
    let raw = url.path().trim_matches('/');
    if raw.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_base(raw, base_url);
    if path.is_empty() {
        return output_dir.join("index.md");
    }
    let path = strip_known_extension(&path);

    let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    while parts
        .first()
        .is_some_and(|p| REMOVE_PREFIXES.contains(&p.to_ascii_lowercase().as_str()))
    {
        parts.remove(0);
    }
    if parts.is_empty() {
        return output_dir.join("index.md");
    }

    let sanitized: Vec<String> = parts.iter().map(|p| sanitize(p)).collect();
    build_nested(output_dir, &sanitized)
}

fn build_nested(output_dir: &Path, parts: &[String]) -> PathBuf {
    if parts.len() == 1 {
        return output_dir.join(format!("{}.md", parts[0]));
    }
    let mut dir = output_dir.to_path_buf();
    for part in &parts[..parts.len() - 1] {
        dir.push(part);
    }
    dir.join(format!("{}.md", parts[parts.len() - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> ImUrl {
        ImUrl::parse(s).unwrap()
    }

    #[test]
    fn full_strategy_uses_domain_directory() {
        let path = full_path(&url("https://docs.example.com/en/api/reference.html"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/docs_example_com/en_api_reference.md"));
    }

    #[test]
    fn short_strategy_drops_domain_directory() {
        let path = short_path(&url("https://docs.example.com/en/api/reference.html"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/en/api/reference.md"));
    }

    #[test]
    fn flat_strategy_joins_with_hyphens() {
        let path = flat_path(&url("https://docs.example.com/en/api/reference.html"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/en-api-reference.md"));
    }

    #[test]
    fn hierarchical_strips_known_prefixes() {
        let path = hierarchical_path(&url("https://docs.example.com/en/api/reference.html"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/api/reference.md"));
    }

    #[test]
    fn hierarchical_falls_back_to_index_when_only_prefixes() {
        let path = hierarchical_path(&url("https://docs.example.com/docs/v1/"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/index.md"));
    }

    #[test]
    fn empty_path_becomes_index() {
        let path = output_path(NamingStrategy::Full, &url("https://example.com/"), None, Path::new("out"));
        assert_eq!(path, PathBuf::from("out/example_com/index.md"));
    }

    #[test]
    fn sanitize_truncates_long_segments_with_hash_suffix() {
        let long = "a".repeat(250);
        let sanitized = sanitize(&long);
        assert_eq!(sanitized.chars().count(), 189);
        assert!(sanitized.starts_with(&"a".repeat(180)));
    }

    #[test]
    fn sanitize_collapses_hyphen_runs_and_trims() {
        assert_eq!(sanitize("  foo   bar--baz  "), "foo-bar-baz");
    }

    #[test]
    fn base_url_prefix_is_stripped() {
        let base = url("https://docs.example.com/guide/");
        let path = short_path(&url("https://docs.example.com/guide/intro.html"), Some(&base), Path::new("out"));
        assert_eq!(path, PathBuf::from("out/intro.md"));
    }
}
