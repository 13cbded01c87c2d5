//! Yes/no confirmation read from a line of input.

use std::io::{self, BufRead, Write};

/// Asked before a record is deleted.
pub const DELETE_PROMPT: &str = "¿Estás seguro que deseas eliminar este registro?";

/// Write `question` to `output` and read one answer line from `input`.
///
/// Anything but an explicit yes (`s`, `si`, `sí`, `y`, `yes`, any case)
/// declines, including end of input.
pub fn confirm(
    question: &str,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<bool> {
    write!(output, "{question} [s/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    ))
}
