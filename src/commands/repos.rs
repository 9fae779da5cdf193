//! Print the repository showcase

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::github::{filter_showcase, showcase, RemoteRepository, RepoFetcher, RepoFilter, RepoSort};
use crate::Portfolio;

/// Fetch, filter and sort the configured user's repositories
pub async fn run(portfolio: &Portfolio, filter: RepoFilter, sort: RepoSort) -> Result<()> {
    let github = &portfolio.config.github;
    if github.username.is_empty() {
        anyhow::bail!("No github.username set in _config.yml");
    }

    let fetcher = RepoFetcher::new(github)?;
    let repos = fetcher.try_fetch(&github.username).await?;
    let repos = selection(repos, filter, sort, Utc::now());
    print!("{}", render(&repos)?);
    Ok(())
}

/// Showcase repositories only, then the requested filter and order
fn selection(
    repos: Vec<RemoteRepository>,
    filter: RepoFilter,
    sort: RepoSort,
    now: DateTime<Utc>,
) -> Vec<RemoteRepository> {
    showcase::select(filter_showcase(repos), filter, sort, now)
}

fn render(repos: &[RemoteRepository]) -> Result<String> {
    let mut out = String::new();
    let totals = showcase::totals(repos);
    writeln!(
        out,
        "Repositories ({}), {} stars, {} forks:",
        totals.repositories, totals.stars, totals.forks
    )?;
    for repo in repos {
        writeln!(
            out,
            "  {} [{}] *{} forks:{}",
            repo.name,
            repo.language.as_deref().unwrap_or("-"),
            repo.star_count,
            repo.fork_count
        )?;
    }

    let languages = showcase::language_stats(repos);
    if !languages.is_empty() {
        writeln!(out, "Languages:")?;
        for stat in languages {
            writeln!(out, "  {} {}%", stat.name, stat.percentage)?;
        }
    }
    Ok(out)
}
