//! etiqueta main entrypoint.

use etiqueta::run;
use etiqueta::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
