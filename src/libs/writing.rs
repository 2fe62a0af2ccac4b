use std::env;
use std::fmt;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{self, Write};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_CYAN: &str = "\x1b[96m";
}

/// Timestamped, coloured line on stderr, mirrored to the debug log file.
///
/// ```ignore
/// log!(cc::GREEN, "listening: {}", ok);
/// log!("plain");
/// ```
#[macro_export]
macro_rules! log {
    ($fmt:literal $(,)?) => {
        $crate::libs::writing::write_log(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt),
        )
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::libs::writing::write_log(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt, $($arg)+),
        )
    };
    // literal-first arms above, so `log!("{}", 1)` never reads 1 as a format
    ($color:path, $fmt:literal $(,)?) => {
        $crate::libs::writing::write_log($color, format_args!($fmt))
    };
    ($color:path, $fmt:literal, $($arg:tt)+) => {
        $crate::libs::writing::write_log($color, format_args!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::write_log(
            $crate::libs::writing::cc::ORANGE,
            format_args!($($arg)*),
        )
    };
}

pub fn write_log(color: &str, args: fmt::Arguments<'_>) {
    let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
    let msg = args.to_string();
    let mut stderr = io::stderr().lock();
    let _ = writeln!(
        stderr,
        "{}{} | {}{}{}{}",
        cc::LIGHT_GRAY,
        time,
        cc::RESET,
        color,
        msg,
        cc::RESET
    );
    save_log_to_file(&msg);
}

/// Append `log` to `logs/logs_<H-d-m-Y>.txt` when `DEBUG_LOGS=true`.
pub fn save_log_to_file(log: &str) {
    if !is_debug_logs_enabled() {
        return;
    }
    if let Err(e) = create_dir_all("logs") {
        eprintln!("save_log_to_file mkdir error: {e}");
        return;
    }
    let now = chrono::Utc::now();
    let file_name = format!("logs/logs_{}.txt", now.format("%H-%d-%m-%Y"));
    let line = format!("[{}] {log}", now.format("%H:%M:%S%.3f"));
    if let Err(e) = append_line(&file_name, &line) {
        eprintln!("save_log_to_file error: {e}");
    }
}

fn is_debug_logs_enabled() -> bool {
    env::var("DEBUG_LOGS")
        .map(|val| val.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn append_line(path: &str, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Report writer. Colour codes are dropped when `color` is off.
pub struct Colors<W: Write> {
    out: W,
    color: bool,
}

impl<'a> Colors<io::StdoutLock<'a>> {
    pub fn stdout(lock: io::StdoutLock<'a>) -> Self {
        Self::new(lock, *crate::constants::COLOR_OUTPUT)
    }
}

impl<W: Write> Colors<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn cprint(&mut self, text: &str, color: &str) {
        let _ = if self.color {
            writeln!(self.out, "{}{}{}", color, text, cc::RESET)
        } else {
            writeln!(self.out, "{text}")
        };
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
