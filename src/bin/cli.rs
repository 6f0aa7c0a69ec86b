//! TikTok Analytics CLI
//!
//! Command-line client for the analytics API:
//! - Inspect accounts and their stats
//! - Print daily views and top posts
//! - Import scraped posts from CSV
//! - Check server status

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tiktok_analytics::api::routes::posts::MAX_BATCH_SIZE;
use tiktok_analytics::import::CsvPostImporter;
use tiktok_analytics::storage::{AccountStats, DailyViews, Post, SortField};

#[derive(Parser)]
#[command(name = "tiktok-analytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TikTok account analytics from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tracked accounts
    Accounts,

    /// Aggregate stats for every account
    Summary,

    /// Aggregate stats for one account
    Stats {
        /// Account handle
        account: String,
    },

    /// Daily views for an account
    Daily {
        /// Account handle
        account: String,
        /// Days to look back
        #[arg(short, long, default_value = "30")]
        days: i64,
    },

    /// Top posts for an account
    Top {
        /// Account handle
        account: String,
        /// Number of posts
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Ranking field (views, likes, comments, shares)
        #[arg(short, long, default_value = "views")]
        sort_by: String,
    },

    /// Most recent posts for an account
    Posts {
        /// Account handle
        account: String,
        /// Number of posts
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Import posts from CSV
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Posts per request
        #[arg(long, default_value = "500", value_parser = parse_batch_size)]
        batch_size: usize,
        /// Dry run (don't actually import)
        #[arg(long)]
        dry_run: bool,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = ApiBase::new(&cli.api_url);
    let json = cli.format == "json";

    match cli.command {
        Commands::Accounts => {
            let accounts: Vec<String> = get_json(&client, &api.url("accounts")).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&accounts)?);
            } else if accounts.is_empty() {
                println!("No accounts tracked yet.");
                println!();
                println!("Load some posts with:");
                println!("  tiktok-analytics import posts.csv");
            } else {
                for account in accounts {
                    println!("@{}", account);
                }
            }
        }

        Commands::Summary => {
            let summaries: Vec<AccountStats> =
                get_json(&client, &api.url("accounts/summary")).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_summary_table(&summaries);
            }
        }

        Commands::Stats { account } => {
            let stats: AccountStats =
                get_json(&client, &api.account_url("stats", &account)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("@{}", stats.username);
                println!();
                println!("  Posts:          {}", stats.total_posts);
                println!("  Views:          {}", group_thousands(stats.total_views));
                println!("  Likes:          {}", group_thousands(stats.total_likes));
                println!("  Comments:       {}", group_thousands(stats.total_comments));
                println!("  Shares:         {}", group_thousands(stats.total_shares));
                println!("  Avg views/post: {:.2}", stats.avg_views_per_post);
            }
        }

        Commands::Daily { account, days } => {
            let url = format!("{}?days={}", api.account_url("daily-views", &account), days);
            let series: Vec<DailyViews> = get_json(&client, &url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                print_daily_table(&series);
            }
        }

        Commands::Top {
            account,
            limit,
            sort_by,
        } => {
            let sort: SortField = sort_by.parse().map_err(anyhow::Error::msg)?;
            let url = format!(
                "{}?limit={}&sort_by={}",
                api.account_url("top-posts", &account),
                limit,
                sort
            );
            let posts: Vec<Post> = get_json(&client, &url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print_posts_table(&posts);
            }
        }

        Commands::Posts { account, limit } => {
            let url = format!("{}?limit={}", api.account_url("posts", &account), limit);
            let posts: Vec<Post> = get_json(&client, &url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print_posts_table(&posts);
            }
        }

        Commands::Import {
            path,
            batch_size,
            dry_run,
        } => {
            if !path.exists() {
                bail!("File not found: {:?}", path);
            }

            let result = CsvPostImporter::new()
                .import(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            println!("Import results:");
            println!("  Rows processed: {}", result.rows_processed);
            println!("  Rows failed: {}", result.rows_failed);
            println!("  Posts: {}", result.posts.len());

            if !result.errors.is_empty() {
                println!();
                println!("Errors (first 10):");
                for error in result.errors.iter().take(10) {
                    println!("  {}", error);
                }
            }

            if dry_run {
                println!();
                println!("(Dry run - no data was imported)");
            } else if !result.posts.is_empty() {
                println!();
                println!("Importing posts...");

                let mut accepted = 0;
                let mut failed = 0;

                for batch in result.posts.chunks(batch_size) {
                    let body = serde_json::json!({ "posts": batch });

                    match client.post(api.url("posts")).json(&body).send().await {
                        Ok(resp) if resp.status().is_success() => {
                            let reply: serde_json::Value = resp.json().await?;
                            accepted += reply["accepted"].as_u64().unwrap_or(0);
                        }
                        Ok(resp) => {
                            let status = resp.status();
                            let text = resp.text().await.unwrap_or_default();
                            eprintln!("  Batch rejected ({}): {}", status, text);
                            failed += batch.len();
                        }
                        Err(e) => {
                            eprintln!("  Batch failed: {}", e);
                            failed += batch.len();
                        }
                    }
                }

                println!("  Imported: {}", accepted);
                if failed > 0 {
                    println!("  Failed: {}", failed);
                }
            }
        }

        Commands::Status => {
            let response = client.get(api.health_url()).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if json {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!("TikTok Analytics v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Storage:    {}",
                        health["storage"].as_str().unwrap_or("unknown")
                    );
                    if let Some(posts) = health["total_posts"].as_u64() {
                        println!("Posts:      {}", group_thousands(posts));
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    bail!("API returned error: {}", resp.status());
                }
                Err(e) => {
                    eprintln!("Cannot connect to TikTok Analytics API at {}", cli.api_url);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin tiktok-analytics-api");
                    return Err(e.into());
                }
            }
        }

        Commands::Config { output } => {
            let config = tiktok_analytics::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Server root as given on the command line, without a trailing slash
struct ApiBase {
    root: String,
}

impl ApiBase {
    fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.root, path)
    }

    /// `/api/{resource}/{account}` with the handle percent-encoded
    fn account_url(&self, resource: &str, account: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.root,
            resource,
            urlencoding::encode(account)
        )
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.root)
    }
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> anyhow::Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Request failed ({}): {}", status, text);
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

/// 1234567 -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn print_summary_table(summaries: &[AccountStats]) {
    if summaries.is_empty() {
        println!("No accounts tracked yet.");
        return;
    }

    println!(
        "{:<24} {:>6} {:>14} {:>12} {:>14}",
        "Account", "Posts", "Views", "Likes", "Avg views"
    );
    println!("{}", "-".repeat(74));

    for s in summaries {
        println!(
            "{:<24} {:>6} {:>14} {:>12} {:>14.2}",
            format!("@{}", s.username),
            s.total_posts,
            group_thousands(s.total_views),
            group_thousands(s.total_likes),
            s.avg_views_per_post
        );
    }
}

fn print_daily_table(series: &[DailyViews]) {
    if series.is_empty() {
        println!("No data for the selected time range");
        return;
    }

    println!("{:<12} | {:>12}", "Date", "Views");
    println!("{}", "-".repeat(27));
    for point in series {
        println!("{:<12} | {:>12}", point.date, group_thousands(point.views));
    }
}

fn print_posts_table(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found");
        return;
    }

    println!(
        "{:<22} {:>12} {:>10} {:>9} {:>8}  {}",
        "Post", "Views", "Likes", "Comments", "Shares", "Posted"
    );
    println!("{}", "-".repeat(84));

    for post in posts {
        let posted = post
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .or_else(|| post.date.clone())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<22} {:>12} {:>10} {:>9} {:>8}  {}",
            post.post_id,
            group_thousands(post.views),
            group_thousands(post.likes),
            group_thousands(post.comments),
            group_thousands(post.shares),
            posted
        );
    }
}

/// Batch size within what the server accepts per ingest request
fn parse_batch_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if size == 0 || size > MAX_BATCH_SIZE {
        return Err(format!("must be between 1 and {}", MAX_BATCH_SIZE));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_top_command() {
        let cli = Cli::try_parse_from([
            "tiktok-analytics",
            "top",
            "acme",
            "--limit",
            "5",
            "--sort-by",
            "likes",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, "json");
        assert_eq!(cli.api_url, "http://localhost:8000");
        match cli.command {
            Commands::Top {
                account,
                limit,
                sort_by,
            } => {
                assert_eq!(account, "acme");
                assert_eq!(limit, 5);
                assert_eq!(sort_by, "likes");
            }
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_import_batch_size_bounds() {
        let parse = |size: &str| {
            Cli::try_parse_from(["tiktok-analytics", "import", "posts.csv", "--batch-size", size])
        };

        match parse("5000").unwrap().command {
            Commands::Import { batch_size, .. } => assert_eq!(batch_size, MAX_BATCH_SIZE),
            _ => panic!("expected import command"),
        }
        assert!(parse("0").is_err());
        assert!(parse("5001").is_err());
        assert!(parse("lots").is_err());

        let cli = Cli::try_parse_from(["tiktok-analytics", "import", "posts.csv"]).unwrap();
        match cli.command {
            Commands::Import { batch_size, .. } => assert_eq!(batch_size, 500),
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_api_urls() {
        let api = ApiBase::new("http://localhost:8000/");
        assert_eq!(api.url("accounts"), "http://localhost:8000/api/accounts");
        assert_eq!(
            api.account_url("stats", "dance crew"),
            "http://localhost:8000/api/stats/dance%20crew"
        );
        assert_eq!(api.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3_700), "1h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
