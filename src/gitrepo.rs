// Git origin detection used to pre-fill a project's repository field.
// Walks up from the current directory to find `.git/config` and reduces
// a GitHub/GitLab origin URL to `owner/repo`.

use std::env;
use std::fs;
use std::path::PathBuf;

const HOSTS: [&str; 2] = ["github.com", "gitlab.com"];

/// Detect the `owner/repo` string of the origin remote, if the current
/// directory is inside a git checkout with a recognisable origin URL.
pub fn detect_repo() -> Option<String> {
    let start = env::current_dir().ok()?;
    let config_path = find_git_config(start)?;
    let contents = fs::read_to_string(config_path).ok()?;
    let url = origin_url(&contents)?;
    owner_repo(&url)
}

fn find_git_config(start: PathBuf) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(".git").join("config");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Extract the `url` entry of the `[remote "origin"]` section.
fn origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;

    for raw_line in config.lines() {
        let line = raw_line.trim();

        if line.starts_with('[') && line.ends_with(']') {
            in_origin = line[1..line.len() - 1].split_whitespace().collect::<Vec<_>>()
                == ["remote", "\"origin\""];
            continue;
        }

        if in_origin && line.starts_with("url") {
            if let Some((_, value)) = line.split_once('=') {
                return Some(value.trim().to_string());
            }
        }
    }

    None
}

/// Reduce a remote URL to `owner/repo`. Handles both ssh
/// (`git@github.com:owner/repo.git`) and https
/// (`https://github.com/owner/repo.git`) forms for the known hosts.
fn owner_repo(url: &str) -> Option<String> {
    let clean = url.trim_end_matches(".git");

    for host in HOSTS {
        let Some(pos) = clean.find(host) else {
            continue;
        };
        let rest = &clean[pos + host.len()..];
        let rest = rest.strip_prefix(':').or_else(|| rest.strip_prefix('/'))?;

        let mut segments = rest.split('/');
        let owner = segments.next()?;
        let repo = segments.next()?;
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        return Some(format!("{}/{}", owner, repo));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_remote() {
        assert_eq!(
            owner_repo("git@github.com:acme/widgets.git").as_deref(),
            Some("acme/widgets")
        );
    }

    #[test]
    fn https_remote() {
        assert_eq!(
            owner_repo("https://github.com/acme/widgets.git").as_deref(),
            Some("acme/widgets")
        );
        assert_eq!(
            owner_repo("https://gitlab.com/acme/widgets").as_deref(),
            Some("acme/widgets")
        );
    }

    #[test]
    fn unknown_host_is_ignored() {
        assert_eq!(owner_repo("git@bitbucket.org:acme/widgets.git"), None);
    }

    #[test]
    fn incomplete_path_is_ignored() {
        assert_eq!(owner_repo("https://github.com/acme"), None);
        assert_eq!(owner_repo("git@github.com:"), None);
    }

    #[test]
    fn origin_url_is_found_among_remotes() {
        let config = r#"
[core]
	repositoryformatversion = 0
[remote "upstream"]
	url = git@github.com:other/fork.git
[remote "origin"]
	url = git@github.com:acme/widgets.git
	fetch = +refs/heads/*:refs/remotes/origin/*
"#;
        assert_eq!(
            origin_url(config).as_deref(),
            Some("git@github.com:acme/widgets.git")
        );
    }

    #[test]
    fn missing_origin_yields_none() {
        let config = "[remote \"upstream\"]\n\turl = git@github.com:other/fork.git\n";
        assert_eq!(origin_url(config), None);
    }
}
