use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_count, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // migrations are run explicitly here, so the raw connection is enough
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            let pending = pending_count(&pool.conn)?;
            if pending == 0 {
                println!("{}✔ Database schema is up to date.{}\n", GREEN, RESET);
            } else {
                println!("{}▶ Running {} migration(s)…{}", CYAN, pending, RESET);
                run_pending_migrations(&pool.conn)?;
                println!("{}✔ Migration completed.{}\n", GREEN, RESET);
            }
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }

            let pending = pending_count(&pool.conn)?;
            if pending > 0 {
                println!(
                    "{}✘ {} pending migration(s): run `rgeoattend db --migrate`{}\n",
                    RED, pending, RESET
                );
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
