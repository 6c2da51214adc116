use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Print a value: compact JSON in `--json` mode, pretty JSON otherwise.
pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = if is_json() {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusOut<'a> {
    ok: bool,
    message: &'a str,
}

/// Report a verification outcome.
pub fn status(ok: bool, message: &str) -> anyhow::Result<()> {
    if is_json() {
        return print(&StatusOut { ok, message });
    }

    let mut out = stdout();
    let (label, color) = if ok { ("OK", Color::Green) } else { ("FAIL", Color::Red) };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{label}")?;
    out.reset()?;
    writeln!(out, " {message}")?;
    Ok(())
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
