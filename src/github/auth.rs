use anyhow::Context;

/// Where the bearer token was found. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Env(&'static str),
    GhCli,
}

#[derive(Debug)]
pub struct Token {
    pub value: String,
    pub source: TokenSource,
}

fn env_keys(host: &str) -> [&'static str; 2] {
    if host.eq_ignore_ascii_case("github.com") {
        ["GH_TOKEN", "GITHUB_TOKEN"]
    } else {
        ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn token_from_env(host: &str) -> Option<Token> {
    env_keys(host).into_iter().find_map(|key| {
        let value = std::env::var(key).ok()?;
        non_empty(&value).map(|value| Token {
            value,
            source: TokenSource::Env(key),
        })
    })
}

fn token_from_gh(host: &str) -> anyhow::Result<Option<String>> {
    let output = match std::process::Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("failed to execute `gh auth token`"),
    };

    if !output.status.success() {
        return Ok(None);
    }
    Ok(non_empty(&String::from_utf8_lossy(&output.stdout)))
}

/// Resolves the token for `host`: explicit value first, then the
/// environment, then the `gh` CLI.
pub fn fetch_token(host: &str, explicit: Option<&str>) -> anyhow::Result<Token> {
    let token = if let Some(value) = explicit.and_then(non_empty) {
        Token {
            value,
            source: TokenSource::Flag,
        }
    } else if let Some(token) = token_from_env(host) {
        token
    } else if let Some(value) = token_from_gh(host)? {
        Token {
            value,
            source: TokenSource::GhCli,
        }
    } else {
        let [primary, _] = env_keys(host);
        anyhow::bail!(
            "token for {host} not found. Please pass `--token`, set `{primary}` or log in with `gh auth login`."
        );
    };

    tracing::debug!(host, source = ?token.source, "resolved GitHub token");
    Ok(token)
}
