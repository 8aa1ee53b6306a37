use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Minimal stderr logger for the batch job.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("sprite_")
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[{:<5}] [{}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Map `-v`/`-q` counts onto a level, starting from `Info`.
pub fn level_from_flags(verbose: u8, quiet: u8) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let index = (3 + i16::from(verbose) - i16::from(quiet)).clamp(0, 5);
    LEVELS[index as usize]
}

pub fn initialize(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags() {
        assert_eq!(level_from_flags(0, 0), LevelFilter::Info);
        assert_eq!(level_from_flags(1, 0), LevelFilter::Debug);
        assert_eq!(level_from_flags(9, 0), LevelFilter::Trace);
        assert_eq!(level_from_flags(0, 2), LevelFilter::Error);
        assert_eq!(level_from_flags(0, 7), LevelFilter::Off);
    }
}
