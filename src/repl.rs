//! Line-oriented command loop
//!
//! Reads one line at a time, tokenizes it, and dispatches to the matching
//! command. Input and output are generic so the loop runs the same way against
//! stdin/stdout and against in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::commands::{Command, Flow, Session};
use crate::input::clean_input;

/// Prompt printed before every line is read
pub const PROMPT: &str = "Pokedex > ";

/// Runs the command loop until `exit` or end of input
///
/// Command failures are reported to `out` and the loop keeps going; only errors
/// reading `input` or writing `out` are returned.
pub async fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Bytes that are not UTF-8 become U+FFFD and fall through as an unknown command
        let line = String::from_utf8_lossy(&buf);
        let words = clean_input(line.trim_end_matches(['\r', '\n']));
        let Some((name, args)) = words.split_first() else {
            writeln!(out, "Please enter a command.")?;
            continue;
        };

        let Some(command) = Command::from_name(name) else {
            writeln!(out, "Unsupported command: {}", name)?;
            continue;
        };

        match session.execute(command, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                warn!(command = command.name(), error = %e, "Command failed");
                writeln!(out, "Encountered an error: {}", e)?;
            }
        }
    }

    Ok(())
}
