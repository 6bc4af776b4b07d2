//! Logger setup: a `fern` dispatcher writing `level: message` to stderr.

use std::io;

use ariadne::{Color, Fmt};
use log::{Level, LevelFilter};

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Blue,
        Level::Debug => Color::Magenta,
        Level::Trace => Color::Green,
    }
}

pub(crate) fn init(level: LevelFilter, color: bool) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = record.level();
            let tag = format!("{}:", level.to_string().to_lowercase());
            if color {
                out.finish(format_args!("{} {}", tag.fg(level_color(level)), message))
            } else {
                out.finish(format_args!("{tag} {message}"))
            }
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}
