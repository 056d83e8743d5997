use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::counter;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Counter { category } = cmd {
        let pool = open_db(cfg)?;

        match category {
            Some(c) => println!("{}: {}", c, counter::total(&pool.conn, c)?),
            None => {
                let rows = counter::list(&pool.conn)?;
                if rows.is_empty() {
                    println!("No labels counted yet.");
                }
                for (category, total, updated_at) in rows {
                    println!("{category}: {total} (updated {updated_at})");
                }
            }
        }
    }

    Ok(())
}
