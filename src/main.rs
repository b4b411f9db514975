use std::path::PathBuf;

use mc_price_sim::report::{render_report, write_histogram_csv, NumberFormat};
use mc_price_sim::{project_csv, SimulationConfig};

const USAGE: &str = "usage: mc_price_sim <prices.csv> [ticker] [current_price]";

fn main() {
    // Structured logging to stderr so the report owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let ticker = args.next().unwrap_or_else(|| "BTC-USD".to_string());
    let current_price = match args.next().map(|raw| raw.parse::<f64>()) {
        None => None,
        Some(Ok(p)) => Some(p),
        Some(Err(e)) => {
            tracing::error!("current_price: {e}");
            std::process::exit(2);
        }
    };

    let config = match SimulationConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    let report = match project_csv(&path, config, current_price) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("projection failed: {e}");
            std::process::exit(1);
        }
    };

    print!("{}", render_report(&ticker, &report, NumberFormat::default()));

    if let Ok(dir) = std::env::var("MC_EXPORT_DIR") {
        let dir = PathBuf::from(dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::error!("cannot create {}: {e}", dir.display());
            std::process::exit(1);
        }
        for projection in &report.projections {
            let out = dir.join(format!("{}_{}d.csv", ticker, projection.horizon.days()));
            match write_histogram_csv(&out, projection) {
                Ok(()) => tracing::info!("Saved histogram in {}", out.display()),
                Err(e) => tracing::error!("export failed for {}: {e}", out.display()),
            }
        }
    }
}
