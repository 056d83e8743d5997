use crate::cli::commands::{load_session, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::composer::format_coddv;
use crate::core::resolver::ResolverPolicy;
use crate::errors::{AppError, AppResult};

/// Show how a barcode resolves, without printing or recording history.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Lookup { barcode, dest } = cmd {
        let mode = dest.unwrap_or(cfg.default_destination);
        let pool = open_db(cfg)?;
        let session = load_session(cfg, &pool)?;
        let index = session.index();

        let product = index
            .lookup_product(barcode.trim())
            .ok_or_else(|| AppError::ProductNotFound(barcode.trim().to_string()))?;
        let addresses = index.lookup_addresses(&product.coddv);

        println!("Product : {}", product.desc);
        println!("CODDV   : {}", format_coddv(&product.coddv));
        println!("Addresses:");
        for a in addresses {
            println!("  - {:<10} {}", a.tipo, a.endereco);
        }

        let resolved =
            ResolverPolicy::with_picking(cfg.picking_large_num).resolve(addresses, mode)?;
        println!();
        println!("Destination : {}", mode.label());
        println!("Address     : {}", resolved.source_record.endereco);
        println!("Large number: {}", resolved.large_num);
        println!("Short addr  : {}", resolved.short_addr);
    }

    Ok(())
}
