use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::strip_ansi;
use ansi_term::Colour;

/// Colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "check_in" => Colour::Green,
        "check_out" => Colour::Cyan,
        "auto_checkout" | "sweep" => Colour::Yellow,
        "auto_checkout_failed" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        other if other.starts_with("location_") || other.starts_with("employee_") => {
            Colour::RGB(255, 153, 51)
        }
        _ => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::load(pool)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let op = color_for_operation(&e.operation).paint(e.operation.as_str());
                if e.target.is_empty() {
                    op.to_string()
                } else {
                    format!("{op} ({})", e.target)
                }
            })
            .collect();

        let op_w = labels
            .iter()
            .map(|l| strip_ansi(l).chars().count())
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for (entry, label) in entries.iter().zip(labels) {
            let visible = strip_ansi(&label).chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                label,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
