pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::context::RequestContext;
use chrono::{DateTime, Utc};
use parser::Cli;

/// Build the explicit caller context from global flags and config.
pub fn request_context(cli: &Cli, cfg: &Config) -> RequestContext {
    RequestContext {
        employee_id: cli.employee,
        is_admin: cli.admin,
        company_id: cli.company.unwrap_or(cfg.company_id),
        timezone: cli.tz.clone(),
    }
}

/// Server clock, unless overridden with `--now`.
pub fn now(cli: &Cli) -> AppResult<DateTime<Utc>> {
    match &cli.now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::InvalidDate(raw.clone())),
        None => Ok(Utc::now()),
    }
}
