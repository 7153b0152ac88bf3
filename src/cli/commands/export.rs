use crate::cli::parser::Cli;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let mut pool = open_db(&cfg.database)?;
        let tz = cli.tz.as_deref().or(Some(cfg.default_timezone.as_str()));
        ExportLogic::export(
            &mut pool,
            *format,
            file,
            range.as_deref(),
            cli.employee,
            tz,
            *force,
        )?;
    }
    Ok(())
}
