//! Availability report output

use checker::DomainRegistry;
use std::io::{self, Write};
use tracing::{info, warn};
use types::AvailabilityReport;

/// Prints cumulative availability, one line per domain
pub struct Reporter {
    out: Box<dyn Write + Send>,
}

impl Reporter {
    /// Report to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Report to any writer
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Write the availability of every domain in registry order.
    ///
    /// Output failures are logged and otherwise ignored so a closed stdout
    /// does not stop the checks.
    pub fn emit(&mut self, cycle: u64, registry: &DomainRegistry) -> AvailabilityReport {
        let report = AvailabilityReport::new(cycle, registry.availability());

        if let Err(e) = self.write_report(&report) {
            warn!(cycle, error = %e, "Failed to write availability report");
        }

        info!(
            cycle,
            domains = report.domains.len(),
            generated_at = %report.generated_at.to_rfc3339(),
            "Availability report emitted"
        );

        report
    }

    fn write_report(&mut self, report: &AvailabilityReport) -> io::Result<()> {
        for line in &report.domains {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

/// Cloneable in-memory writer for inspecting report output in tests
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
