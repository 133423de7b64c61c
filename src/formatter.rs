//! Log line formatting keyed to the simulation tick.
//!
//! Every line reads `HH:MM:SS.fffff 0xTICK LEVEL span{fields}: target: fields`, where
//! the tick is the number of [`Game::tick`](crate::game::Game::tick) calls so far.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Ticks are printed as four hex digits and wrap around.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Event formatter that prefixes each line with a timestamp and the current tick.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        write_styled(&mut writer, ansi, DIM, timestamp)?;
        writer.write_char(' ')?;
        write_styled(&mut writer, ansi, DIM, format_args!("0x{:04X}", get_tick_count() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        write_level(&mut writer, ansi, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any = false;
            for span in scope.from_root() {
                any = true;
                write_styled(&mut writer, ansi, BOLD, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|fields| !fields.is_empty()) {
                    write_styled(&mut writer, ansi, BOLD, "{")?;
                    write!(writer, "{fields}")?;
                    write_styled(&mut writer, ansi, BOLD, "}")?;
                }
                write_styled(&mut writer, ansi, DIM, ":")?;
            }
            if any {
                writer.write_char(' ')?;
            }
        }

        write_styled(&mut writer, ansi, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn write_level(writer: &mut Writer<'_>, ansi: bool, level: &Level) -> fmt::Result {
    let (color, text) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    write_styled(writer, ansi, color, text)
}

fn write_styled(writer: &mut Writer<'_>, ansi: bool, style: &str, value: impl fmt::Display) -> fmt::Result {
    if ansi {
        write!(writer, "{style}{value}{RESET}")
    } else {
        write!(writer, "{value}")
    }
}

/// Advances the tick shown in log lines. Called once per simulation step.
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
