#![forbid(unsafe_code)]

use glam::DVec2;
use tracing_subscriber::EnvFilter;

/// Installs a console subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,culture_shapes=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Prints a short summary of seeded positions.
pub fn print_summary(label: &str, positions: &[DVec2]) {
    if positions.is_empty() {
        println!("{label}: no positions");
        return;
    }
    let (min, max) = positions
        .iter()
        .fold((DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });
    let mean = positions.iter().copied().sum::<DVec2>() / positions.len() as f64;
    println!(
        "{label}: {} positions, x in [{:.2}, {:.2}], y in [{:.2}, {:.2}], mean ({:.2}, {:.2})",
        positions.len(),
        min.x,
        max.x,
        min.y,
        max.y,
        mean.x,
        mean.y
    );
}
