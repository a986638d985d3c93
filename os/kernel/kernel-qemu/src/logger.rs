use crate::qemu_fmt::QemuSink;
use core::fmt::{self, Write};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend writing `[LEVEL] target: message` lines to the UART.
pub struct QemuLogger {
    max_level: LevelFilter,
}

impl QemuLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    #[must_use]
    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Installs this logger. Call once during early init.
    ///
    /// # Errors
    /// Fails if a logger is already installed.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }

    /// Formats `record` into `out` the way it appears on the console.
    ///
    /// # Errors
    /// Propagates errors from `out`.
    pub fn write_record(out: &mut impl Write, record: &Record<'_>) -> fmt::Result {
        writeln!(
            out,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for QemuLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = Self::write_record(&mut QemuSink, record);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, MetadataBuilder};

    #[test]
    fn filters_by_level() {
        let logger = QemuLogger::new(LevelFilter::Info);
        let at = |level| MetadataBuilder::new().level(level).build();
        assert!(logger.enabled(&at(Level::Error)));
        assert!(logger.enabled(&at(Level::Info)));
        assert!(!logger.enabled(&at(Level::Debug)));
        assert!(!logger.enabled(&at(Level::Trace)));
        assert!(!QemuLogger::new(LevelFilter::Off).enabled(&at(Level::Error)));
    }

    #[test]
    fn record_format() {
        let mut out = String::new();
        QemuLogger::write_record(
            &mut out,
            &Record::builder()
                .level(Level::Warn)
                .target("kernel_syscall")
                .args(format_args!("unknown sys call {}", 99))
                .build(),
        )
        .unwrap();
        assert_eq!(out, "[WARN] kernel_syscall: unknown sys call 99\n");
    }

    #[test]
    fn sink_accepts_anything_off_target() {
        // no UART on the host; writes are dropped
        assert!(write!(QemuSink, "héllo {}", 1).is_ok());
        crate::qemu_trace!("trace {}\n", 2);
    }
}
