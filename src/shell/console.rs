//! Console, error, and execution output surfaces.

/// One scroll-back text log.
#[derive(Debug)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    fn new(banner: &str) -> Self {
        Self {
            lines: banner.lines().map(str::to_owned).collect(),
        }
    }

    pub fn append(&mut self, text: &str) {
        self.lines.extend(text.lines().map(str::to_owned));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

/// The three logs shown in the console panel.
#[derive(Debug)]
pub struct ConsoleOutputs {
    console: OutputLog,
    errors: OutputLog,
    execution: OutputLog,
}

impl ConsoleOutputs {
    pub fn new() -> Self {
        Self {
            console: OutputLog::new(
                "Welcome to the Steiner shell\nEl Psy Kongroo\nReady to compile...",
            ),
            errors: OutputLog::new("Lexical, syntax and semantic errors appear here."),
            execution: OutputLog::new("Program output appears here."),
        }
    }

    pub fn append_console(&mut self, text: &str) {
        self.console.append(text);
    }

    pub fn append_errors(&mut self, text: &str) {
        self.errors.append(text);
    }

    pub fn append_execution(&mut self, text: &str) {
        self.execution.append(text);
    }

    pub fn clear_all(&mut self) {
        self.console.clear();
        self.errors.clear();
        self.execution.clear();
    }

    pub fn console(&self) -> &OutputLog {
        &self.console
    }

    pub fn errors(&self) -> &OutputLog {
        &self.errors
    }

    pub fn execution(&self) -> &OutputLog {
        &self.execution
    }
}
