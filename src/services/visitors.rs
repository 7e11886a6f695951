use crate::Database;
use anyhow::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Result of recording one visit.
#[derive(Debug, Clone, Serialize)]
pub struct VisitSnapshot {
    pub new_visitor: bool,
    pub unique_visitors: i64,
    pub total_visits: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitorStats {
    pub unique_visitors: i64,
    pub total_visits: i64,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub daily: Vec<DayCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCount {
    pub day: String,
    pub unique_visitors: i64,
    pub total_visits: i64,
}

pub struct VisitorCounter {
    db: Database,
}

impl VisitorCounter {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a visit for `visitor_key`. The first sighting of a key counts
    /// as a new unique visitor; later sightings only bump its visit count.
    pub fn record(&self, visitor_key: &str) -> Result<VisitSnapshot> {
        let conn = self.db.get()?;
        let now = chrono::Utc::now();
        let ts = now.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let day = now.format("%Y-%m-%d").to_string();

        let new_visitor = conn.execute(
            "INSERT OR IGNORE INTO visitors (visitor_key, first_seen, last_seen) VALUES (?1, ?2, ?2)",
            rusqlite::params![visitor_key, ts],
        )? == 1;

        if !new_visitor {
            conn.execute(
                "UPDATE visitors SET last_seen = ?2, visit_count = visit_count + 1 WHERE visitor_key = ?1",
                rusqlite::params![visitor_key, ts],
            )?;
        }

        conn.execute(
            r#"
            INSERT INTO visitor_days (day, unique_visitors, total_visits)
            VALUES (?1, ?2, 1)
            ON CONFLICT(day) DO UPDATE SET
                unique_visitors = visitor_days.unique_visitors + excluded.unique_visitors,
                total_visits = visitor_days.total_visits + 1
            "#,
            rusqlite::params![day, new_visitor as i64],
        )?;

        let (unique_visitors, total_visits): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(visit_count), 0) FROM visitors",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        tracing::debug!(
            "Visit recorded: key={}, new={}, uniques={}",
            visitor_key,
            new_visitor,
            unique_visitors
        );

        Ok(VisitSnapshot {
            new_visitor,
            unique_visitors,
            total_visits,
        })
    }

    pub fn stats(&self, days: i64) -> Result<VisitorStats> {
        let conn = self.db.get()?;

        let cutoff = (chrono::Utc::now() - chrono::TimeDelta::days(days))
            .format("%Y-%m-%d")
            .to_string();

        let (unique_visitors, total_visits): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(visit_count), 0) FROM visitors",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap_or((0, 0));

        let first_seen: Option<String> = conn
            .query_row("SELECT MIN(first_seen) FROM visitors", [], |row| row.get(0))
            .ok();

        let last_seen: Option<String> = conn
            .query_row("SELECT MAX(last_seen) FROM visitors", [], |row| row.get(0))
            .ok();

        let mut stmt = conn.prepare(
            r#"
            SELECT day, unique_visitors, total_visits
            FROM visitor_days
            WHERE day >= ?1
            ORDER BY day ASC
            "#,
        )?;
        let daily: Vec<DayCount> = stmt
            .query_map([&cutoff], |row| {
                Ok(DayCount {
                    day: row.get(0)?,
                    unique_visitors: row.get(1)?,
                    total_visits: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(VisitorStats {
            unique_visitors,
            total_visits,
            first_seen,
            last_seen,
            daily,
        })
    }

    /// Drop per-day rows older than the retention window. The visitor set
    /// itself is never pruned; uniqueness is forever.
    pub fn prune(&self, retention_days: i64) -> Result<usize> {
        if retention_days <= 0 {
            return Ok(0);
        }
        let conn = self.db.get()?;
        let cutoff = (chrono::Utc::now() - chrono::TimeDelta::days(retention_days))
            .format("%Y-%m-%d")
            .to_string();
        let removed = conn.execute("DELETE FROM visitor_days WHERE day < ?1", [&cutoff])?;
        if removed > 0 {
            tracing::info!("Visitors: pruned {} daily rows", removed);
        }
        Ok(removed)
    }
}

/// Derive the anonymized identity for a visitor.
///
/// The IP is coarsened before hashing and the user agent reduced to a
/// browser family, so the stored key cannot be reversed into either.
pub fn visitor_key(ip: &str, user_agent: &str, salt: &str) -> String {
    let input = format!("{}|{}|{}", salt, coarsen_ip(ip), browser_family(user_agent));
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Fetch the site salt, creating it on first use. The salt is stable for
/// the lifetime of the site so returning visitors keep the same key.
pub fn ensure_salt(db: &Database) -> Result<String> {
    let conn = db.get()?;

    let existing: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = 'visitor_salt'",
            [],
            |row| row.get(0),
        )
        .ok();

    if let Some(salt) = existing {
        return Ok(salt);
    }

    let salt: String = (0..32)
        .map(|_| format!("{:02x}", rand::random::<u8>()))
        .collect();

    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('visitor_salt', ?1)",
        [&salt],
    )?;

    Ok(salt)
}

fn coarsen_ip(ip: &str) -> String {
    if ip.contains(':') {
        let groups: Vec<&str> = ip.split(':').collect();
        if groups.len() >= 4 {
            return format!("{}:{}:{}:*", groups[0], groups[1], groups[2]);
        }
    } else {
        let octets: Vec<&str> = ip.split('.').collect();
        if octets.len() == 4 {
            return format!("{}.{}.0.0", octets[0], octets[1]);
        }
    }
    "unknown".to_string()
}

pub fn browser_family(user_agent: &str) -> String {
    let ua = user_agent.to_lowercase();
    if ua.contains("firefox") {
        "Firefox".to_string()
    } else if ua.contains("edg/") || ua.contains("edge") {
        "Edge".to_string()
    } else if ua.contains("chrome") || ua.contains("chromium") {
        "Chrome".to_string()
    } else if ua.contains("safari") {
        "Safari".to_string()
    } else if ua.contains("opera") || ua.contains("opr/") {
        "Opera".to_string()
    } else {
        "Other".to_string()
    }
}
