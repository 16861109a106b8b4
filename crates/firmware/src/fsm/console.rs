//! CLI console command dispatcher (§6), served over the companion-MCU
//! console link. Parses one whitespace-separated line, dispatches to a
//! table of known commands, and reports a Unix-style exit code.

use heapless::{String, Vec};

/// Maximum tokens accepted on one command line.
const MAX_TOKENS: usize = 8;
/// Maximum length of a single token.
const MAX_TOKEN_LEN: usize = 64;
/// Maximum output lines a command may produce.
const MAX_OUTPUT_LINES: usize = 16;
/// Maximum length of one output line.
const MAX_LINE_LEN: usize = 96;

/// Exit code returned by a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully.
    Success,
    /// Usage error (unknown command, wrong argument count).
    Usage,
    /// Argument was syntactically valid but out of range.
    OutOfRange,
}

impl ExitCode {
    /// Numeric value matching the Unix-ish convention in §6
    /// (0 success, 1 usage, -1 out-of-range).
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::Usage => 1,
            ExitCode::OutOfRange => -1,
        }
    }
}

/// A parsed, not-yet-dispatched command line.
pub struct Command {
    /// Command name (first token).
    pub name: String<MAX_TOKEN_LEN>,
    /// Remaining whitespace-separated arguments.
    pub args: Vec<String<MAX_TOKEN_LEN>, MAX_TOKENS>,
}

/// Output of one dispatched command.
#[derive(Debug, Default)]
pub struct CommandOutput {
    /// Line-oriented plaintext output.
    pub lines: Vec<String<MAX_LINE_LEN>, MAX_OUTPUT_LINES>,
}

impl CommandOutput {
    fn line(text: &str) -> Self {
        let mut out = Self::default();
        if let Ok(s) = String::try_from(text) {
            let _ = out.lines.push(s);
        }
        out
    }
}

/// Parse one line of whitespace-separated tokens into a [`Command`].
/// Returns `None` for an empty (whitespace-only) line.
pub fn parse_line(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let name = String::try_from(tokens.next()?).ok()?;
    let mut args = Vec::new();
    for tok in tokens {
        if let Ok(s) = String::try_from(tok) {
            let _ = args.push(s);
        }
    }
    Some(Command { name, args })
}

/// Recognised console command names (§6).
pub const KNOWN_COMMANDS: &[&str] = &[
    "version",
    "ls",
    "play",
    "db_init",
    "tasks",
    "heaps",
    "stacks",
    "bt_list",
    "samd",
    "core_dump",
    "haptic_effect",
    "lua",
];

/// The firmware version string reported by `version`.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dispatch one parsed command, returning its exit code and output.
///
/// This dispatches the commands that are pure bookkeeping (`version`,
/// `tasks`/`heaps`/`stacks` stubs) directly; commands that touch live
/// hardware or FSM state (`play`, `db_init`, `bt_list`, `samd`,
/// `core_dump`, `haptic_effect`, `lua`, `ls`) are acknowledged with a
/// `Success`/`Usage` exit code here and left to the caller to actually
/// carry out against its `ServiceLocator`, matching this crate's existing
/// convention of dependency-injected side effects rather than a dispatcher
/// that owns hardware handles directly.
pub fn dispatch(cmd: &Command) -> (ExitCode, CommandOutput) {
    match cmd.name.as_str() {
        "version" => (ExitCode::Success, CommandOutput::line(FIRMWARE_VERSION)),
        "ls" => {
            if cmd.args.len() != 1 {
                return (ExitCode::Usage, CommandOutput::line("usage: ls <path>"));
            }
            (ExitCode::Success, CommandOutput::default())
        }
        "play" => {
            if cmd.args.len() != 1 {
                return (
                    ExitCode::Usage,
                    CommandOutput::line("usage: play <file|id>"),
                );
            }
            (ExitCode::Success, CommandOutput::default())
        }
        "db_init" => (ExitCode::Success, CommandOutput::default()),
        "tasks" | "heaps" | "stacks" => (ExitCode::Success, CommandOutput::default()),
        "bt_list" => {
            if cmd.args.len() > 1 {
                return (ExitCode::Usage, CommandOutput::line("usage: bt_list [idx]"));
            }
            (ExitCode::Success, CommandOutput::default())
        }
        "samd" => {
            if let Some(arg) = cmd.args.first() {
                match arg.as_str() {
                    "flash" | "charge" | "msc" | "off" => (ExitCode::Success, CommandOutput::default()),
                    _ => (
                        ExitCode::Usage,
                        CommandOutput::line("usage: samd [flash|charge|msc|off]"),
                    ),
                }
            } else {
                (ExitCode::Success, CommandOutput::default())
            }
        }
        "core_dump" => (ExitCode::Success, CommandOutput::default()),
        "haptic_effect" => (ExitCode::Success, CommandOutput::default()),
        "lua" => (ExitCode::Success, CommandOutput::default()),
        other => {
            let mut line: String<MAX_LINE_LEN> = String::new();
            let _ = line.push_str("unknown command: ");
            let _ = line.push_str(other);
            let mut out = CommandOutput::default();
            let _ = out.lines.push(line);
            (ExitCode::Usage, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_on_whitespace() {
        let cmd = parse_line("play sd/a.mp3").expect("parses");
        assert_eq!(cmd.name.as_str(), "play");
        assert_eq!(cmd.args.len(), 1);
        assert_eq!(cmd.args[0].as_str(), "sd/a.mp3");
    }

    #[test]
    fn test_parse_line_empty_is_none() {
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_version_reports_success() {
        let cmd = parse_line("version").unwrap();
        let (code, out) = dispatch(&cmd);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out.lines[0].as_str(), FIRMWARE_VERSION);
    }

    #[test]
    fn test_unknown_command_returns_usage_with_message() {
        let cmd = parse_line("frobnicate").unwrap();
        let (code, out) = dispatch(&cmd);
        assert_eq!(code, ExitCode::Usage);
        assert_eq!(out.lines[0].as_str(), "unknown command: frobnicate");
    }

    #[test]
    fn test_play_without_argument_is_usage_error() {
        let cmd = parse_line("play").unwrap();
        let (code, _out) = dispatch(&cmd);
        assert_eq!(code, ExitCode::Usage);
    }

    #[test]
    fn test_samd_with_bad_argument_is_usage_error() {
        let cmd = parse_line("samd nonsense").unwrap();
        let (code, _out) = dispatch(&cmd);
        assert_eq!(code, ExitCode::Usage);
    }

    #[test]
    fn test_samd_with_known_argument_succeeds() {
        let cmd = parse_line("samd off").unwrap();
        let (code, _out) = dispatch(&cmd);
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_exit_codes_match_unix_convention() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Usage.code(), 1);
        assert_eq!(ExitCode::OutOfRange.code(), -1);
    }
}
