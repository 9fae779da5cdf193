//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::Collection;
use crate::helpers::full_date;
use crate::Portfolio;

/// List site content by type
pub fn run(portfolio: &Portfolio, content_type: &str) -> Result<()> {
    print!("{}", render(portfolio, content_type)?);
    Ok(())
}

fn render(portfolio: &Portfolio, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "work" | "post" | "posts" | "blog" => {
            let collection = if content_type == "blog" {
                Collection::Blog
            } else {
                Collection::Work
            };
            let posts = portfolio.posts(collection)?;
            writeln!(out, "{} ({}):", title(collection), posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    full_date(&post.published()),
                    post.metadata.title,
                    post.slug
                )?;
            }
        }
        "service" | "services" => {
            let services = portfolio.services()?;
            writeln!(out, "Services ({}):", services.len())?;
            for service in services {
                writeln!(out, "  {} [{}]", service.title, service.slug)?;
                if !service.description.is_empty() {
                    writeln!(out, "    {}", service.description)?;
                }
            }
        }
        "route" | "routes" => {
            writeln!(out, "Routes ({}):", portfolio.config.routes.len())?;
            for (path, enabled) in &portfolio.config.routes {
                let state = if *enabled { "on" } else { "off" };
                writeln!(out, "  {} ({})", path, state)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: work, blog, service, route",
                content_type
            );
        }
    }

    Ok(out)
}

fn title(collection: Collection) -> &'static str {
    match collection {
        Collection::Work => "Work",
        Collection::Blog => "Blog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn portfolio(tmp: &TempDir) -> Portfolio {
        let blog = tmp.path().join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(
            blog.join("first.mdx"),
            "---\ntitle: First\npublishedAt: 2024-01-05\n---\n",
        )
        .unwrap();
        fs::write(
            blog.join("second.mdx"),
            "---\ntitle: Second\npublishedAt: 2024-02-10\n---\n",
        )
        .unwrap();
        Portfolio::new(tmp.path()).unwrap()
    }

    #[test]
    fn test_list_blog() {
        let tmp = TempDir::new().unwrap();
        let out = render(&portfolio(&tmp), "blog").unwrap();
        assert_eq!(
            out,
            "Blog (2):\n  February 10, 2024 - Second [second]\n  January 5, 2024 - First [first]\n"
        );
    }

    #[test]
    fn test_list_missing_work_dir() {
        let tmp = TempDir::new().unwrap();
        let out = render(&portfolio(&tmp), "work").unwrap();
        assert_eq!(out, "Work (0):\n");
    }

    #[test]
    fn test_list_routes() {
        let tmp = TempDir::new().unwrap();
        let out = render(&portfolio(&tmp), "routes").unwrap();
        assert!(out.contains("  /blog (on)\n"));
        assert!(out.contains("  /gallery (off)\n"));
    }

    #[test]
    fn test_unknown_type() {
        let tmp = TempDir::new().unwrap();
        assert!(render(&portfolio(&tmp), "tags").is_err());
    }
}
