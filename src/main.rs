//! rGeoAttend main entrypoint.

use rgeoattend::run;
use rgeoattend::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
