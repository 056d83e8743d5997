use crate::cli::commands::{load_session, open_db, open_history, run_print};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::{HistoryStore, JsonFileRepository};
use crate::core::session::{LabelSession, parse_copies};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::destination::Destination;
use crate::ui::messages::{error, info, success, warning};
use crate::utils::date;
use std::io::{self, BufRead, Write};

/// Interactive workstation loop on stdin.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan {
        matricula,
        dest,
        validity_prompt,
    } = cmd
    {
        if matricula.trim().is_empty() {
            return Err(AppError::MissingMatricula);
        }
        let mode = dest.unwrap_or(cfg.default_destination);

        let pool = open_db(cfg)?;
        let mut session = load_session(cfg, &pool)?;
        let mut history = open_history(cfg)?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let operator = Operator {
            matricula,
            mode,
            validity_prompt: *validity_prompt,
        };
        scan_loop(&mut input, &mut session, &mut history, cfg, &pool, &operator)?;
    }

    Ok(())
}

/// Settings fixed for the whole scan session.
struct Operator<'a> {
    matricula: &'a str,
    mode: Destination,
    validity_prompt: bool,
}

/// Read one trimmed line after showing `label`; None on end of input.
fn prompt<B: BufRead>(input: &mut B, label: &str) -> AppResult<Option<String>> {
    print!("{label}> ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// What the operator answered at the validity prompt.
enum ValidityAnswer {
    Date(String),
    Cancel,
}

fn ask_validity<B: BufRead>(input: &mut B, session: &LabelSession) -> AppResult<ValidityAnswer> {
    loop {
        let Some(raw) = prompt(input, "validity MMAA (empty = cancel)")? else {
            return Ok(ValidityAnswer::Cancel);
        };
        if raw.is_empty() {
            return Ok(ValidityAnswer::Cancel);
        }
        match session.confirm_validity(&raw, date::today()) {
            Ok(v) => return Ok(ValidityAnswer::Date(v)),
            Err(e) => error(e),
        }
    }
}

fn scan_loop<B: BufRead>(
    input: &mut B,
    session: &mut LabelSession,
    history: &mut HistoryStore<JsonFileRepository>,
    cfg: &Config,
    pool: &DbPool,
    operator: &Operator<'_>,
) -> AppResult<()> {
    let mode = operator.mode;
    info(format!(
        "System ready ({}). Scan a product, empty line or 'q' to quit.",
        mode.label()
    ));

    loop {
        let Some(barcode) = prompt(input, "barcode")? else {
            break;
        };
        if barcode.is_empty() || barcode.eq_ignore_ascii_case("q") {
            break;
        }

        match session.search(&barcode, operator.matricula, mode) {
            Ok(req) => info(format!(
                "{} → {}",
                req.product.desc, req.target.source_record.endereco
            )),
            Err(e) => {
                error(e);
                continue;
            }
        }

        // the pending request survives a rejected count
        let copies = loop {
            let Some(raw) = prompt(input, "copies [1]")? else {
                break None;
            };
            match parse_copies(&raw) {
                Ok(n) => break Some(n),
                Err(e) => error(e),
            }
        };
        let Some(copies) = copies else {
            break;
        };

        let validity = if operator.validity_prompt {
            match ask_validity(input, session)? {
                ValidityAnswer::Date(v) => Some(v),
                ValidityAnswer::Cancel => {
                    session.cancel();
                    warning("Print cancelled.");
                    continue;
                }
            }
        } else {
            None
        };

        if let Err(e) = run_print(session, history, cfg, pool, copies, validity.as_deref()) {
            error(e);
        }
    }

    success("Bye.");
    Ok(())
}
