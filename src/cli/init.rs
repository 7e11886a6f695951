use anyhow::Result;
use std::path::PathBuf;

pub fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "My Site".to_string());

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(path.join("data"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "A marketing site"
url = "http://localhost:3000"

[database]
path = "./data/signpost.db"
pool_size = 10

[visitors]
enabled = true
retention_days = 365
"#,
        site_name
    );

    std::fs::write(path.join("signpost.toml"), config)?;

    tracing::info!("Created new Signpost site at {:?}", path);
    tracing::info!("Run 'signpost migrate' to set up the database");

    Ok(())
}
