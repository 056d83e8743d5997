//! One `handle()` per subcommand, plus the wiring they share.

pub mod config;
pub mod counter;
pub mod history;
pub mod init;
pub mod log;
pub mod lookup;
pub mod print;
pub mod scan;

use crate::config::Config;
use crate::core::history::{HistoryStore, JsonFileRepository};
use crate::core::printer::{CommandPrinter, LabelCounter, PreviewOnly, PrintTrigger, SqliteCounter};
use crate::core::reference::ReferenceIndex;
use crate::core::render::{LabelSize, print_preview};
use crate::core::resolver::ResolverPolicy;
use crate::core::session::{LabelSession, PrintOutcome, PrintPipeline};
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use chrono::Local;
use std::fs;

/// Open the SQLite database, creating its directory and tables when missing.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let path = cfg.database_path();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let pool = DbPool::new(&path.to_string_lossy())?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Load both reference tables and report what was skipped.
pub(crate) fn load_session(cfg: &Config, pool: &DbPool) -> AppResult<LabelSession> {
    let index = ReferenceIndex::load(&cfg.products_path(), &cfg.addresses_path())?;
    let stats = index.stats().clone();

    if stats.duplicate_barcodes > 0 {
        warning(format!(
            "{} duplicate barcode(s) in {}: the last record wins",
            stats.duplicate_barcodes, cfg.products_file
        ));
    }
    if stats.skipped_products > 0 || stats.skipped_addresses > 0 {
        warning(format!(
            "Skipped {} product(s) without BARRAS and {} address(es) without CODDV",
            stats.skipped_products, stats.skipped_addresses
        ));
    }
    ttlog_quiet(
        &pool.conn,
        "load",
        &cfg.products_file,
        &format!(
            "{} products, {} addresses, {} duplicates, {} skipped",
            stats.products,
            stats.addresses,
            stats.duplicate_barcodes,
            stats.skipped_products + stats.skipped_addresses
        ),
    );

    Ok(LabelSession::new(
        index,
        ResolverPolicy::with_picking(cfg.picking_large_num),
    ))
}

/// Read the history log once for the lifetime of the command.
pub(crate) fn open_history(cfg: &Config) -> AppResult<HistoryStore<JsonFileRepository>> {
    HistoryStore::open(JsonFileRepository::new(cfg.history_path()))
}

/// Execute the pending request of `session` with the configured collaborators.
pub(crate) fn run_print(
    session: &mut LabelSession,
    history: &mut HistoryStore<JsonFileRepository>,
    cfg: &Config,
    pool: &DbPool,
    copies: usize,
    validity: Option<&str>,
) -> AppResult<PrintOutcome> {
    if let Some(req) = session.pending() {
        info(format!(
            "Generating labels for: {} ({})",
            req.product.desc,
            req.destination.label()
        ));
    }

    let mut printer: Box<dyn PrintTrigger> = match &cfg.print_command {
        Some(cmd) if !cmd.trim().is_empty() => Box::new(CommandPrinter::new(cmd)),
        _ => Box::new(PreviewOnly),
    };

    let mut sqlite_counter = SqliteCounter::new(pool);
    let counter: Option<&mut dyn LabelCounter> = if cfg.counter_enabled {
        Some(&mut sqlite_counter)
    } else {
        None
    };

    let mut pipe = PrintPipeline {
        history,
        printer: printer.as_mut(),
        counter,
        audit: Some(&pool.conn),
        label_size: LabelSize {
            width_mm: cfg.label_width_mm,
            height_mm: cfg.label_height_mm,
        },
        output_file: cfg.output_file(),
        counter_category: cfg.counter_category.clone(),
    };

    let outcome = session.execute_print(copies, validity, &mut pipe, Local::now())?;

    print_preview(&outcome.batch);
    match outcome.counter_total {
        Some(total) => success(format!(
            "Labels generated! +{} labels | Total: {}",
            outcome.batch.total_count(),
            total
        )),
        None => success(format!(
            "Labels generated! +{} labels",
            outcome.batch.total_count()
        )),
    }

    Ok(outcome)
}
