//! Print the merged project list

use anyhow::Result;
use std::fmt::Write;

use crate::aggregate::{Dated, PostRange};
use crate::github::RepoFetcher;
use crate::helpers::format_date;
use crate::merge::{MergedProject, ProjectOrigin};
use crate::Portfolio;

/// Print local work merged with showcase repositories.
///
/// With `offline` set no request is made and only local work is listed.
pub async fn run(portfolio: &Portfolio, range: Option<PostRange>, offline: bool) -> Result<()> {
    let fetcher = if offline || !portfolio.config.github.display {
        None
    } else {
        Some(RepoFetcher::new(&portfolio.config.github)?)
    };

    let projects = portfolio.projects(fetcher.as_ref(), range).await?;
    print!("{}", render(&projects)?);
    Ok(())
}

fn render(projects: &[MergedProject]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Projects ({}):", projects.len())?;
    for project in projects {
        let marker = match project.origin {
            ProjectOrigin::Local => "local",
            ProjectOrigin::Remote => "repo",
        };
        writeln!(
            out,
            "  {} - {} ({}) -> {}",
            format_date(&project.published(), "YYYY-MM-DD"),
            project.metadata.title,
            marker,
            project.href()
        )?;
    }
    Ok(out)
}
