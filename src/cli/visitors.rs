use crate::cli::VisitorsCommand;
use crate::services::visitors::{self, VisitorCounter};
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: &Path, command: VisitorsCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;
    db.migrate()?;
    let counter = VisitorCounter::new(db.clone());

    match command {
        VisitorsCommand::Record {
            key,
            ip,
            user_agent,
            json,
        } => {
            if !config.visitors.enabled {
                anyhow::bail!(
                    "visitor tracking is disabled (set visitors.enabled = true in '{}')",
                    config_path.display()
                );
            }

            let key = match (key, ip, user_agent) {
                (Some(key), _, _) => key,
                (None, Some(ip), Some(user_agent)) => {
                    let salt = visitors::ensure_salt(&db)?;
                    visitors::visitor_key(&ip, &user_agent, &salt)
                }
                _ => anyhow::bail!("provide either --key or both --ip and --user-agent"),
            };

            let snapshot = counter.record(&key)?;
            counter.prune(config.visitors.retention_days as i64)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let kind = if snapshot.new_visitor { "new" } else { "returning" };
                println!("recorded {} ({})", key, kind);
                println!("unique visitors: {}", snapshot.unique_visitors);
                println!("total visits: {}", snapshot.total_visits);
            }
        }
        VisitorsCommand::Stats { days, json } => {
            let stats = counter.stats(days)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("unique visitors: {}", stats.unique_visitors);
                println!("total visits: {}", stats.total_visits);
                if let Some(first) = &stats.first_seen {
                    println!("first seen: {}", first);
                }
                if let Some(last) = &stats.last_seen {
                    println!("last seen: {}", last);
                }
                for day in &stats.daily {
                    println!(
                        "{}  {:>6} unique  {:>6} visits",
                        day.day, day.unique_visitors, day.total_visits
                    );
                }
            }
        }
    }

    Ok(())
}
