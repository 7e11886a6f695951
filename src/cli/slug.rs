use crate::cli::SlugCommand;
use crate::services::slug::{build_slug, extract_fragment, normalize};
use anyhow::Result;

pub fn run(command: SlugCommand) -> Result<()> {
    match command {
        SlugCommand::Make {
            title,
            record_id,
            json,
        } => {
            let slug = build_slug(&title, &record_id);
            if json {
                let out = serde_json::json!({
                    "slug": slug,
                    "token": normalize(&title),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", slug);
            }
        }
        SlugCommand::Parse { slug, json } => match extract_fragment(&slug) {
            Some(fragment) => {
                if json {
                    let out = serde_json::json!({ "fragment": fragment });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    println!("{}", fragment);
                }
            }
            None => {
                // Non-zero exit so shell callers can branch on it.
                anyhow::bail!("no fragment found in '{}'", slug);
            }
        },
    }
    Ok(())
}
