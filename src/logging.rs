use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Installs a global `env_logger` at `Info`, overridable through `RUST_LOG`
///
/// Lap completions log at `Info`, respawns after drifting at `Debug` and every
/// tick at `Trace`.
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "[TRACKRL | {}] {}", record.level(), record.args()))
        .write_style(WriteStyle::Always)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
