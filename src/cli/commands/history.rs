use crate::cli::commands::open_history;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::filter;
use crate::errors::AppResult;
use crate::utils::date::history_timestamp;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { search, field } = cmd {
        let store = open_history(cfg)?;
        let entries = filter(store.entries(), search, *field);

        if entries.is_empty() {
            println!("No records found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE", 20),
            Column::new("MAT", 8),
            Column::new("CODDV", 8),
            Column::new("EAN", 14),
            Column::new("DESCRIPTION", 30),
            Column::new("ADDRESS", 18),
            Column::new("TYPE", 9),
            Column::new("VAL", 5),
        ]);

        for e in &entries {
            table.add_row(vec![
                history_timestamp(e.timestamp),
                e.matricula.clone(),
                e.coddv.clone(),
                if e.barcode.is_empty() {
                    "---".to_string()
                } else {
                    e.barcode.clone()
                },
                e.desc.clone(),
                if e.address.is_empty() {
                    "---".to_string()
                } else {
                    e.address.clone()
                },
                e.kind.to_uppercase(),
                e.validity.clone().unwrap_or_default(),
            ]);
        }

        print!("{}", table.render());
        println!("\n{} record(s)", entries.len());
    }

    Ok(())
}
