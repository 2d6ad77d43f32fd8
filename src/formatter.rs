//! Log line formatting with the game tick counter.
//!
//! Every line reads `HH:MM:SS.sssss 0xTICK LEVEL target: fields`, so log output can be lined up with
//! the tick that produced it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Ticks run by the scheduler since startup.
static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits are printed.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Event formatter that prefixes each line with a timestamp and the current tick.
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc()
            .format(&TIMESTAMP_FORMAT)
            .map_err(|_| fmt::Error)?;
        styled(&mut writer, DIM, timestamp)?;
        writer.write_char(' ')?;

        styled(&mut writer, DIM, format_args!("0x{:04X}", get_tick_count() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                styled(&mut writer, BOLD, span.metadata().name())?;
                if let Some(fields) = span.extensions().get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                writer.write_char(':')?;
            }
            writer.write_char(' ')?;
        }

        styled(&mut writer, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Writes the level right-aligned to five columns, colored when the writer supports ANSI.
fn write_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    let color = match *level {
        Level::TRACE => "\x1b[35m",
        Level::DEBUG => "\x1b[34m",
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
    };
    styled(writer, color, format_args!("{:>5}", level.as_str()))
}

fn styled(writer: &mut Writer<'_>, style: &str, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{value}{RESET}")
    } else {
        write!(writer, "{value}")
    }
}

/// Advances the tick counter. Called once per simulated tick.
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
