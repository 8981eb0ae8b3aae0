//! External Skuld compiler invocation.
//!
//! The compiler is an opaque external program. It is invoked with the
//! configured base command, a phase flag, and the source path, and waited on
//! synchronously; the shell routes the captured output to the matching
//! surface.

use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use anyhow::Context;
use tracing::debug;

/// Environment variable overriding the configured compiler command.
pub const COMPILER_ENV: &str = "SKULD_COMPILER_CMD";

/// Compiler phase selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
    Intermediate,
    Execution,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Lexical,
        Phase::Syntax,
        Phase::Semantic,
        Phase::Intermediate,
        Phase::Execution,
    ];

    /// Flag spelling of the external compiler's CLI.
    pub fn flag(self) -> &'static str {
        match self {
            Phase::Lexical => "--lexico",
            Phase::Syntax => "--sintactico",
            Phase::Semantic => "--semantico",
            Phase::Intermediate => "--intermedio",
            Phase::Execution => "--ejecutar",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Lexical => "lexical",
            Phase::Syntax => "syntax",
            Phase::Semantic => "semantic",
            Phase::Intermediate => "intermediate",
            Phase::Execution => "execution",
        }
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" | "lex" => Ok(Phase::Lexical),
            "syntax" | "syn" => Ok(Phase::Syntax),
            "semantic" | "sem" => Ok(Phase::Semantic),
            "intermediate" | "ir" => Ok(Phase::Intermediate),
            "execution" | "exec" | "run" => Ok(Phase::Execution),
            _ => Err(()),
        }
    }
}

/// Captured result of one compiler run.
#[derive(Debug, Clone)]
pub struct CompilerOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Resolves the compiler base command: the environment override wins, then
/// the configured command. `None` when neither is set.
pub fn resolve_command(config: &steiner_config::Compiler) -> Option<Vec<String>> {
    if let Ok(raw) = std::env::var(COMPILER_ENV) {
        let command: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        if !command.is_empty() {
            return Some(command);
        }
    }

    if config.command.is_empty() {
        None
    } else {
        Some(config.command.clone())
    }
}

/// Runs one phase of the external compiler on `source`.
///
/// A missing command is a configuration error reported to the caller, never
/// a crash; the caller surfaces it without touching panel state.
pub fn run_phase(
    config: &steiner_config::Compiler,
    phase: Phase,
    source: &Path,
) -> anyhow::Result<CompilerOutput> {
    let command = resolve_command(config).with_context(|| {
        format!(
            "no compiler command configured; set a `compiler` line in the \
             config file or the {COMPILER_ENV} environment variable"
        )
    })?;

    debug!("running {} phase: {command:?} on {source:?}", phase.name());

    let output = Command::new(&command[0])
        .args(&command[1..])
        .arg(phase.flag())
        .arg(source)
        .output()
        .with_context(|| format!("error running compiler command {:?}", command[0]))?;

    Ok(CompilerOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
