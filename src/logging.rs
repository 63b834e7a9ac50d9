use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Installs the crate's logger: `Info` by default, overridable through `RUST_LOG`.
///
/// Fails if another logger was already installed, which callers are free to ignore.
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "[RBD | {}] {}", record.level(), record.args()))
        .write_style(WriteStyle::Always)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
