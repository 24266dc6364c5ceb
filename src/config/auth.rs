//! Authentication header composition and environment-variable expansion.
//!
//! Grounded on `original_source/src/docpull/http/client.py`'s `auth_headers`
//! merge. Environment references (`$VAR` / `${VAR}`) are expanded exactly
//! once, at [`FetchConfigBuilder::build`](super::builder::FetchConfigBuilder::build)
//! time, never re-read later (§9 design note).

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Auth {
    None,
    Bearer { token: String },
    Basic { username: String, password: String },
    Cookie { value: String },
    Header { name: String, value: String },
}

impl Auth {
    /// Expand `$VAR`/`${VAR}` references in this auth's string fields against
    /// the current process environment.
    #[must_use]
    pub fn expand_env(self) -> Self {
        match self {
            Auth::None => Auth::None,
            Auth::Bearer { token } => Auth::Bearer {
                token: expand_env(&token),
            },
            Auth::Basic { username, password } => Auth::Basic {
                username: expand_env(&username),
                password: expand_env(&password),
            },
            Auth::Cookie { value } => Auth::Cookie {
                value: expand_env(&value),
            },
            Auth::Header { name, value } => Auth::Header {
                name: expand_env(&name),
                value: expand_env(&value),
            },
        }
    }

    /// Merge this auth's header(s) into `headers`. Headers already present
    /// (per-request headers) are not overwritten.
    pub fn merge_into(&self, headers: &mut HeaderMap) -> anyhow::Result<()> {
        match self {
            Auth::None => {}
            Auth::Bearer { token } => {
                insert_if_absent(headers, "authorization", &format!("Bearer {token}"))?;
            }
            Auth::Basic { username, password } => {
                let encoded =
                    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
                insert_if_absent(headers, "authorization", &format!("Basic {encoded}"))?;
            }
            Auth::Cookie { value } => {
                insert_if_absent(headers, "cookie", value)?;
            }
            Auth::Header { name, value } => {
                insert_if_absent(headers, name, value)?;
            }
        }
        Ok(())
    }
}

fn insert_if_absent(headers: &mut HeaderMap, name: &str, value: &str) -> anyhow::Result<()> {
    let name = HeaderName::from_bytes(name.as_bytes())?;
    if headers.contains_key(&name) {
        return Ok(());
    }
    headers.insert(name, HeaderValue::from_str(value)?);
    Ok(())
}

/// Expand `$VAR` and `${VAR}` references against the process environment.
/// Unresolvable references are left verbatim.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    out.push_str(&std::env::var(&name).unwrap_or_else(|_| format!("${{{name}}}")));
                } else {
                    out.push_str(&format!("${{{name}"));
                }
            }
            Some(&(_, c2)) if c2.is_ascii_alphabetic() || c2 == '_' => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&std::env::var(&name).unwrap_or_else(|_| format!("${name}")));
            }
            _ => out.push('$'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_braced_and_bare_vars() {
        // SAFETY: single-threaded test process, no concurrent env access.
        unsafe {
            std::env::set_var("DOCPULL_TEST_TOKEN", "secret123");
        }
        assert_eq!(expand_env("Bearer ${DOCPULL_TEST_TOKEN}"), "Bearer secret123");
        assert_eq!(expand_env("Bearer $DOCPULL_TEST_TOKEN"), "Bearer secret123");
        unsafe {
            std::env::remove_var("DOCPULL_TEST_TOKEN");
        }
    }

    #[test]
    fn leaves_unresolvable_references_verbatim() {
        assert_eq!(expand_env("$DOCPULL_DOES_NOT_EXIST"), "$DOCPULL_DOES_NOT_EXIST");
    }

    #[test]
    fn bearer_merges_into_empty_headers() {
        let auth = Auth::Bearer {
            token: "abc".to_string(),
        };
        let mut headers = HeaderMap::new();
        auth.merge_into(&mut headers).unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn basic_base64_encodes_credentials() {
        let auth = Auth::Basic {
            username: "user".to_string(),
            password: "pass".to_string(),
        };
        let mut headers = HeaderMap::new();
        auth.merge_into(&mut headers).unwrap();
        let value = headers.get("authorization").unwrap().to_str().unwrap();
        assert!(value.starts_with("Basic "));
    }

    #[test]
    fn does_not_overwrite_existing_header() {
        let auth = Auth::Bearer {
            token: "abc".to_string(),
        };
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer existing"));
        auth.merge_into(&mut headers).unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer existing");
    }
}
