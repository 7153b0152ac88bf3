use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::initialize::open_db;
use crate::db::queries::AttendanceFilter;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::parse_range;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, open, all } = &cli.command {
        let (from, to) = match period {
            Some(p) => {
                let (f, t) = parse_range(p)?;
                (Some(f), Some(t))
            }
            None => (None, None),
        };

        let filter = AttendanceFilter {
            employee_id: if *all { None } else { cli.employee },
            open_only: *open,
            from,
            to,
        };

        let pool = open_db(&cfg.database)?;
        let tz = cli.tz.as_deref().or(Some(cfg.default_timezone.as_str()));
        let table = ListLogic::render(&pool, &filter, tz)?;

        if table.is_empty() {
            info("No attendance records found.");
        } else {
            print!("{}", table.render());
        }
    }

    Ok(())
}
