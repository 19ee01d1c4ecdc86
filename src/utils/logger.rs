use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Configures the process-wide logger: timestamped lines, Info by default,
/// overridable through `RUST_LOG`.
pub fn setup_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
