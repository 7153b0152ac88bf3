use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let employees = count(pool, "SELECT COUNT(*) FROM employees")?;
    let locations = count(pool, "SELECT COUNT(*) FROM locations WHERE active = 1")?;
    let sessions = count(pool, "SELECT COUNT(*) FROM attendance")?;
    let open = count(pool, "SELECT COUNT(*) FROM attendance WHERE check_out IS NULL")?;
    let auto = count(pool, "SELECT COUNT(*) FROM attendance WHERE auto_checkout = 1")?;

    println!("{}• Employees:{} {}{}{}", CYAN, RESET, GREEN, employees, RESET);
    println!("{}• Active locations:{} {}{}{}", CYAN, RESET, GREEN, locations, RESET);
    println!(
        "{}• Attendance records:{} {}{}{} ({} open, {} auto-closed)",
        CYAN, RESET, GREEN, sessions, RESET, open, auto
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT check_in FROM attendance ORDER BY check_in ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT check_in FROM attendance ORDER BY check_in DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Check-in range (UTC):{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
