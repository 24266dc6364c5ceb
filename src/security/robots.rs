//! robots.txt compliance checking.
//!
//! Grounded on `original_source/src/docpull/security/robots.py`'s
//! `RobotsChecker`: per-domain cache of parsed rules, fail-open on fetch
//! errors or a missing/forbidden robots.txt, longest-match rule selection.
//! `RobotFileParser`'s matching semantics are reimplemented directly (no
//! Rust crate in the teacher's stack parses robots.txt).

use crate::imurl::ImUrl;
use dashmap::DashMap;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct RuleSet {
    // (path_prefix, is_allow), in file order; longest match wins, ties break
    // toward `Allow` per the de-facto convention RobotFileParser follows.
    rules: Vec<(String, bool)>,
    crawl_delay: Option<f64>,
    sitemaps: Vec<String>,
}

impl RuleSet {
    fn allows(&self, path: &str) -> bool {
        let mut best: Option<(usize, bool)> = None;
        for (prefix, allow) in &self.rules {
            if !path.starts_with(prefix.as_str()) {
                continue;
            }
            let len = prefix.len();
            let replace = match best {
                None => true,
                Some((best_len, best_allow)) => len > best_len || (len == best_len && *allow && !best_allow),
            };
            if replace {
                best = Some((len, *allow));
            }
        }
        best.map(|(_, allow)| allow).unwrap_or(true)
    }
}

/// Parse a robots.txt body, keeping only the section(s) that apply to
/// `user_agent` (falling back to `*` if no specific section matches).
fn parse_robots(body: &str, user_agent: &str) -> RuleSet {
    let ua_lower = user_agent.to_ascii_lowercase();
    let mut sections: Vec<(Vec<String>, RuleSet)> = Vec::new();
    let mut current_agents: Vec<String> = Vec::new();
    let mut current_rules = RuleSet::default();
    let mut in_section = false;

    let flush = |sections: &mut Vec<(Vec<String>, RuleSet)>, agents: &mut Vec<String>, rules: &mut RuleSet| {
        if !agents.is_empty() {
            sections.push((std::mem::take(agents), std::mem::take(rules)));
        }
    };

    for line in body.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        match key.as_str() {
            "user-agent" => {
                if !in_section || already_started_new_group(&current_rules) {
                    flush(&mut sections, &mut current_agents, &mut current_rules);
                }
                current_agents.push(value.to_ascii_lowercase());
                in_section = true;
            }
            "disallow" => {
                in_section = false;
                if !value.is_empty() {
                    current_rules.rules.push((value.to_string(), false));
                } else {
                    // Empty Disallow means "allow everything".
                    current_rules.rules.push((String::new(), true));
                }
            }
            "allow" => {
                in_section = false;
                current_rules.rules.push((value.to_string(), true));
            }
            "crawl-delay" => {
                in_section = false;
                current_rules.crawl_delay = value.parse().ok();
            }
            "sitemap" => {
                current_rules.sitemaps.push(value.to_string());
            }
            _ => {}
        }
    }
    flush(&mut sections, &mut current_agents, &mut current_rules);

    let exact = sections
        .iter()
        .find(|(agents, _)| agents.iter().any(|a| a == &ua_lower));
    let wildcard = sections.iter().find(|(agents, _)| agents.iter().any(|a| a == "*"));

    exact.or(wildcard).map(|(_, rules)| rules.clone()).unwrap_or_default()
}

fn already_started_new_group(rules: &RuleSet) -> bool {
    !rules.rules.is_empty() || rules.crawl_delay.is_some()
}

pub struct RobotsChecker {
    client: Client,
    user_agent: String,
    cache: DashMap<String, Option<RuleSet>>,
}

impl RobotsChecker {
    #[must_use]
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            user_agent: user_agent.into(),
            cache: DashMap::new(),
        }
    }

    fn domain_key(url: &ImUrl) -> Option<String> {
        let host = url.host()?;
        Some(match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        })
    }

    async fn rules_for(&self, url: &ImUrl) -> Option<RuleSet> {
        let domain = Self::domain_key(url)?;
        if let Some(cached) = self.cache.get(&domain) {
            return cached.clone();
        }

        let robots_url = format!("{domain}/robots.txt");
        let rules = match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => Some(parse_robots(&body, &self.user_agent)),
                Err(_) => None,
            },
            _ => None,
        };
        self.cache.insert(domain, rules.clone());
        rules
    }

    /// Whether `url` is allowed by its domain's robots.txt. Fails open
    /// (returns `true`) when no robots.txt exists or it cannot be fetched.
    pub async fn is_allowed(&self, url: &ImUrl) -> bool {
        match self.rules_for(url).await {
            Some(rules) => rules.allows(url.path()),
            None => true,
        }
    }

    /// `Crawl-delay` directive for `url`'s domain, if any.
    pub async fn crawl_delay(&self, url: &ImUrl) -> Option<Duration> {
        let rules = self.rules_for(url).await?;
        rules.crawl_delay.map(Duration::from_secs_f64)
    }

    /// `Sitemap:` URLs declared in `url`'s domain's robots.txt.
    pub async fn sitemaps(&self, url: &ImUrl) -> Vec<String> {
        self.rules_for(url).await.map(|r| r.sitemaps).unwrap_or_default()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disallow_blocks_matching_prefix() {
        let rules = parse_robots("User-agent: *\nDisallow: /private\n", "docpull");
        assert!(!rules.allows("/private/data"));
        assert!(rules.allows("/public"));
    }

    #[test]
    fn more_specific_allow_overrides_disallow() {
        let rules = parse_robots(
            "User-agent: *\nDisallow: /private\nAllow: /private/public-page\n",
            "docpull",
        );
        assert!(rules.allows("/private/public-page"));
        assert!(!rules.allows("/private/secret"));
    }

    #[test]
    fn specific_user_agent_section_wins_over_wildcard() {
        let body = "User-agent: docpull\nDisallow: /only-for-docpull\n\nUser-agent: *\nDisallow: /\n";
        let rules = parse_robots(body, "docpull");
        assert!(rules.allows("/anything"));
        assert!(!rules.allows("/only-for-docpull"));
    }

    #[test]
    fn crawl_delay_and_sitemap_are_parsed() {
        let rules = parse_robots(
            "User-agent: *\nCrawl-delay: 2\nSitemap: https://example.com/sitemap.xml\n",
            "docpull",
        );
        assert_eq!(rules.crawl_delay, Some(2.0));
        assert_eq!(rules.sitemaps, vec!["https://example.com/sitemap.xml".to_string()]);
    }

    #[tokio::test]
    async fn missing_robots_txt_fails_open() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/robots.txt").with_status(404).create_async().await;
        let checker = RobotsChecker::new("docpull", Duration::from_secs(5));
        let url = ImUrl::parse(&format!("{}/page", server.url())).unwrap();
        assert!(checker.is_allowed(&url).await);
    }

    #[tokio::test]
    async fn disallowed_path_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(200)
            .with_body("User-agent: *\nDisallow: /secret\n")
            .create_async()
            .await;
        let checker = RobotsChecker::new("docpull", Duration::from_secs(5));
        let url = ImUrl::parse(&format!("{}/secret/page", server.url())).unwrap();
        assert!(!checker.is_allowed(&url).await);
    }
}
