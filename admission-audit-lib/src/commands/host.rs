use std::io::Write;

/// Exit status used when a request fails its rules or the configuration is rejected.
pub const EXIT_FAILURE: i32 = 1;

/// Where commands write their results and how they end the process.
pub trait Host: Send + Sync {
    /// Destination for per-request results.
    fn output(&mut self) -> impl Write;

    /// Destination for diagnostics about unreadable files and rejected configuration.
    fn error(&mut self) -> impl Write;

    /// End the process with `code`. Test hosts record the code and return.
    fn exit(&mut self, code: i32);

    /// Print `message` on the error stream and exit with [`EXIT_FAILURE`].
    fn fail(&mut self, message: &str) {
        let _ = writeln!(self.error(), "❌ {message}");
        self.exit(EXIT_FAILURE);
    }
}

/// Records everything a command writes, plus the exit code it asked for.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
