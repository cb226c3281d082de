use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{GraphOutput, WeekBucket, SCHEMA_VERSION};
use crate::util::week_key;
use anyhow::Context;
use chrono::{DateTime, Datelike, FixedOffset, Local, Utc};
use console::style;
use std::collections::BTreeMap;

pub fn exec(common: &CommonArgs, year: Option<i32>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let year = year.unwrap_or_else(|| Local::now().year());

    let times = repo
        .commit_times()
        .context("Failed to collect commits from repository")?;
    let buckets = bucket_by_week(&times, year);

    if json {
        output_json(&buckets, &repo, year)?;
    } else if ndjson {
        output_ndjson(&buckets)?;
    } else {
        output_heatmap(&buckets, year)?;
    }

    Ok(())
}

/// Count commits per ISO week, keeping only those dated in `year`.
pub fn bucket_by_week(times: &[DateTime<FixedOffset>], year: i32) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<String, u32> = BTreeMap::new();
    for ts in times.iter().filter(|ts| ts.year() == year) {
        *weeks.entry(week_key(ts)).or_insert(0) += 1;
    }
    weeks
        .into_iter()
        .map(|(week, commit_count)| WeekBucket { week, commit_count })
        .collect()
}

fn output_json(buckets: &[WeekBucket], repo: &GitRepo, year: i32) -> anyhow::Result<()> {
    let output = GraphOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        year,
        total_commits: buckets.iter().map(|b| b.commit_count).sum(),
        buckets: buckets.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(buckets: &[WeekBucket]) -> anyhow::Result<()> {
    for bucket in buckets {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

fn output_heatmap(buckets: &[WeekBucket], year: i32) -> anyhow::Result<()> {
    if buckets.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let max_commits = buckets.iter().map(|b| b.commit_count).max().unwrap_or(1);

    println!("{}", style(format!("Commit Activity {year}")).bold());
    println!("{}", "─".repeat(50));

    for bucket in buckets {
        let glyph = intensity_glyph(bucket.commit_count, max_commits);
        println!(
            "{} {} commits: {:>3}",
            bucket.week,
            style(glyph).green(),
            bucket.commit_count
        );
    }

    let total: u32 = buckets.iter().map(|b| b.commit_count).sum();
    println!("\nTotal commits: {}", style(total).cyan());
    println!("\n{}", style("Legend").bold());
    println!("  {} commits intensity", style("▁▃▅▇█").green());

    Ok(())
}

fn intensity_glyph(count: u32, max: u32) -> &'static str {
    let level = ((count as f64 / max.max(1) as f64) * 5.0) as u32;
    match level {
        0 => " ",
        1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}
