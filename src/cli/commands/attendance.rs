use crate::cli::parser::{Cli, Commands};
use crate::cli::{now, request_context};
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, StatusResponse, SweepSettings};
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::models::coords::Coordinates;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, RESET, YELLOW};
use crate::utils::formatting::{format_hours, format_km};

/// Handle `checkin`
pub fn handle_checkin(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { lat, lon } = &cli.command {
        let ctx = request_context(cli, cfg);
        let coords = Coordinates::from_parts(*lat, *lon)?;
        let mut pool = open_db(&cfg.database)?;

        let res = AttendanceLogic::check_in(&mut pool, &ctx, coords, now(cli)?)?;

        success(format!(
            "Checked in at {} (attendance #{})",
            res.check_in_time, res.id
        ));
        match (&res.location_name, res.within_geofence) {
            (Some(name), true) => info(format!(
                "Location: {} ({} from center)",
                name,
                format_km(res.distance_km)
            )),
            _ if res.is_admin => warning("Admin check-in: location checks bypassed"),
            _ => {}
        }
    }
    Ok(())
}

/// Handle `checkout`
pub fn handle_checkout(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout { lat, lon } = &cli.command {
        let ctx = request_context(cli, cfg);
        let coords = Coordinates::from_parts(*lat, *lon)?;
        let mut pool = open_db(&cfg.database)?;

        let res = AttendanceLogic::check_out(&mut pool, &ctx, coords, now(cli)?)?;

        success(format!(
            "Checked out at {} (attendance #{})",
            res.check_out_time, res.id
        ));
        info(format!("Worked: {}", format_hours(res.worked_hours)));
    }
    Ok(())
}

/// Handle `status`
pub fn handle_status(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = &cli.command {
        let ctx = request_context(cli, cfg);
        let pool = open_db(&cfg.database)?;

        let status = AttendanceLogic::get_status(&pool, &ctx);

        if *json {
            let out = serde_json::to_string_pretty(&status)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        match status {
            StatusResponse::Status(s) => {
                println!("👤 {}", s.employee_name);
                match (s.attendance_id, s.check_in_time) {
                    (Some(id), Some(at)) => println!(
                        "{}● Checked in{} since {} (attendance #{})",
                        GREEN, RESET, at, id
                    ),
                    _ => println!("{}○ Not checked in{}", YELLOW, RESET),
                }
            }
            StatusResponse::Error { error } => warning(error),
        }
    }
    Ok(())
}

/// Handle `sweep`
pub fn handle_sweep(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let settings = SweepSettings::from(cfg);
    let mut pool = open_db(&cfg.database)?;

    let report = AttendanceLogic::auto_checkout_sweep(&mut pool, &settings, now(cli)?)?;

    if report.closed.is_empty() {
        info("No open session past office end.");
    } else {
        success(format!(
            "Auto-checkout: {} session(s) closed",
            report.closed.len()
        ));
    }
    if !report.still_open.is_empty() {
        info(format!(
            "{} session(s) still within office hours",
            report.still_open.len()
        ));
    }
    for (id, reason) in &report.failed {
        warning(format!("Attendance #{}: {}", id, reason));
    }

    Ok(())
}
