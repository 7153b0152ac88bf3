use crate::cli::parser::{Cli, Commands, LocationCmd};
use crate::config::Config;
use crate::core::location::{LocationInput, LocationLogic, LocationPatch};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::location::format_hour;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Location(cmd) = &cli.command else {
        return Ok(());
    };
    let mut pool = open_db(&cfg.database)?;

    match cmd {
        LocationCmd::Add {
            name,
            lat,
            lon,
            radius_km,
            address,
            office_start,
            office_end,
        } => {
            let loc = LocationLogic::add(
                &mut pool,
                LocationInput {
                    name: name.clone(),
                    latitude: *lat,
                    longitude: *lon,
                    radius_km: radius_km.unwrap_or(cfg.default_radius_km),
                    address: address.clone(),
                    company_id: cli.company.unwrap_or(cfg.company_id),
                    office_start: *office_start,
                    office_end: *office_end,
                },
            )?;
            success(format!(
                "Location #{} '{}' created (radius {:.2} km)",
                loc.id, loc.name, loc.radius_km
            ));
        }
        LocationCmd::Edit {
            id,
            name,
            lat,
            lon,
            radius_km,
            address,
            office_start,
            office_end,
            clear_address,
            clear_office_hours,
        } => {
            let loc = LocationLogic::edit(
                &mut pool,
                *id,
                LocationPatch {
                    name: name.clone(),
                    latitude: *lat,
                    longitude: *lon,
                    radius_km: *radius_km,
                    address: address.clone(),
                    office_start: *office_start,
                    office_end: *office_end,
                    clear_address: *clear_address,
                    clear_office_hours: *clear_office_hours,
                },
            )?;
            success(format!("Location #{} '{}' updated", loc.id, loc.name));
        }
        LocationCmd::List { all } => {
            let locations = LocationLogic::list(&pool, *all)?;
            if locations.is_empty() {
                info("No locations configured.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                "ID", "Name", "Center", "Radius km", "Hours", "Employees", "Active",
            ]);
            for l in locations {
                let scope = if l.is_company_wide() {
                    "all".to_string()
                } else {
                    l.employee_count().to_string()
                };
                table.add_row(vec![
                    l.id.to_string(),
                    l.name.clone(),
                    l.center().to_string(),
                    format!("{:.2}", l.radius_km),
                    format!(
                        "{} - {}",
                        format_hour(l.office_start),
                        format_hour(l.office_end)
                    ),
                    scope,
                    if l.active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        LocationCmd::Assign { location, employee } => {
            if LocationLogic::assign(&mut pool, *location, *employee)? {
                success(format!(
                    "Employee #{} assigned to location #{}",
                    employee, location
                ));
            } else {
                info(format!(
                    "Employee #{} was already assigned to location #{}",
                    employee, location
                ));
            }
        }
        LocationCmd::Unassign { location, employee } => {
            if LocationLogic::unassign(&mut pool, *location, *employee)? {
                success(format!(
                    "Employee #{} removed from location #{}",
                    employee, location
                ));
            } else {
                warning(format!(
                    "Employee #{} is not assigned to location #{}",
                    employee, location
                ));
            }
        }
        LocationCmd::Activate { id } => {
            let loc = LocationLogic::set_active(&mut pool, *id, true)?;
            success(format!("Location #{} '{}' activated", loc.id, loc.name));
        }
        LocationCmd::Deactivate { id } => {
            let loc = LocationLogic::set_active(&mut pool, *id, false)?;
            success(format!("Location #{} '{}' deactivated", loc.id, loc.name));
        }
    }

    Ok(())
}
