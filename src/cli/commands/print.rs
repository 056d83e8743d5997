use crate::cli::commands::{load_session, open_db, open_history, run_print};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::parse_copies;
use crate::errors::AppResult;
use crate::utils::date;

/// One-shot print: search, validate, print.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Print {
        barcode,
        matricula,
        dest,
        copies,
        validity,
    } = cmd
    {
        let mode = dest.unwrap_or(cfg.default_destination);

        //
        // 1. Load reference tables
        //
        let pool = open_db(cfg)?;
        let mut session = load_session(cfg, &pool)?;
        let mut history = open_history(cfg)?;

        //
        // 2. Lookup + resolve (terminal on failure)
        //
        session.search(barcode, matricula, mode)?;

        //
        // 3. Copies and optional validity
        //
        let copies = parse_copies(copies)?;
        let validity = match validity {
            Some(raw) => Some(session.confirm_validity(raw, date::today())?),
            None => None,
        };

        //
        // 4. Print
        //
        run_print(&mut session, &mut history, cfg, &pool, copies, validity.as_deref())?;
    }

    Ok(())
}
