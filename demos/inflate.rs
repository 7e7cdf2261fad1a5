//! Offsets a path literal and prints the result.
//!
//! Usage:
//! ```text
//! cargo run --example inflate                                  # default square, delta 1
//! cargo run --example inflate -- "0,0 4,0 4,3 0,3" 0.5 round   # path, delta, join
//! RUST_LOG=polykit=trace cargo run --example inflate           # engine internals
//! ```

use polykit::math::polygon_2d::area_paths;
use polykit::operations::creation::make_path_d;
use polykit::operations::offset::{
    inflate_paths_d, EndType, JoinType, PolylineOffset, DEFAULT_MITER_LIMIT, DEFAULT_PRECISION,
};
use polykit::operations::query::bounds_paths;

fn main() -> polykit::Result<()> {
    // Default: WARN for everything, INFO for polykit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polykit=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("inflate=info".parse().unwrap_or_default())
        .add_directive("polykit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "0,0 10,0 10,10 0,10".to_owned());
    let delta = args.next().and_then(|d| d.parse().ok()).unwrap_or(1.0);
    let join_type = match args.next().as_deref() {
        Some("round") => JoinType::Round,
        Some("square") => JoinType::Square,
        _ => JoinType::Miter,
    };

    let path = make_path_d(&text);
    tracing::info!(vertices = path.len(), delta, ?join_type, "inflating");

    let result = inflate_paths_d::<PolylineOffset>(
        &[path],
        delta,
        join_type,
        EndType::Polygon,
        DEFAULT_MITER_LIMIT,
        DEFAULT_PRECISION,
    )?;

    for (i, path) in result.iter().enumerate() {
        let points: Vec<String> = path.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        println!("path {i}: {}", points.join(" "));
    }
    let rec = bounds_paths(&result);
    tracing::info!(
        paths = result.len(),
        area = area_paths(&result),
        left = rec.left,
        top = rec.top,
        right = rec.right,
        bottom = rec.bottom,
        "done"
    );
    Ok(())
}
