use std::path::Path;

use log::LevelFilter;

/// Install the global logger: `[HH:MM:SS][target][LEVEL] message` to stderr or `log_file`.
pub fn setup_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for("replicator_bimatrix_rs", level)
        .level_for("replicator_bimatrix", level);

    match log_file {
        None => dispatch.chain(std::io::stderr()),
        Some(f) => dispatch.chain(fern::log_file(f)?),
    }
    .apply()?;
    Ok(())
}
