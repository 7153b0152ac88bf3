use crate::cli::parser::{Cli, Commands, EmployeeCmd};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Employee(cmd) = &cli.command else {
        return Ok(());
    };
    let mut pool = open_db(&cfg.database)?;

    match cmd {
        EmployeeCmd::Add { name, timezone } => {
            let company = cli.company.unwrap_or(cfg.company_id);
            let emp = EmployeeLogic::add(&mut pool, name, timezone.as_deref(), company)?;
            success(format!("Employee #{} '{}' created", emp.id, emp.name));
        }
        EmployeeCmd::List => {
            let employees = EmployeeLogic::list(&pool)?;
            if employees.is_empty() {
                info("No employees registered.");
                return Ok(());
            }
            let mut table = Table::new(vec!["ID", "Name", "Company", "Timezone", "Created"]);
            for e in employees {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name,
                    e.company_id.to_string(),
                    e.timezone.unwrap_or_else(|| "--".to_string()),
                    e.created_at,
                ]);
            }
            print!("{}", table.render());
        }
        EmployeeCmd::Tz { id, timezone } => {
            let emp = EmployeeLogic::set_timezone(&mut pool, *id, timezone.as_deref())?;
            success(format!(
                "Employee #{} timezone: {}",
                emp.id,
                emp.timezone.as_deref().unwrap_or("(default)")
            ));
        }
    }

    Ok(())
}
