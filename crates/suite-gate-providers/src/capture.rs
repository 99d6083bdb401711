// crates/suite-gate-providers/src/capture.rs
// ============================================================================
// Module: Bounded Process Capture
// Description: Child process output capture with a per-stream byte bound.
// Purpose: Keep memory use of probe and executor processes bounded.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`run_bounded`] spawns a command and keeps at most `limit + 1` bytes of
//! each piped stream; the extra byte lets callers tell that output was cut.
//! Everything past the bound is drained and discarded so a chatty child never
//! blocks on a full pipe. Stderr is read on a helper thread while stdout is
//! read on the caller's thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Read;
use std::process::Command;
use std::process::ExitStatus;
use std::thread;

// ============================================================================
// SECTION: Capture
// ============================================================================

/// Exit status and bounded output of a finished child process.
#[derive(Debug)]
pub(crate) struct BoundedOutput {
    /// Exit status.
    pub(crate) status: ExitStatus,
    /// Leading stdout bytes (at most `limit + 1`).
    pub(crate) stdout: Vec<u8>,
    /// Leading stderr bytes (at most `limit + 1`).
    pub(crate) stderr: Vec<u8>,
}

/// Spawns `command`, waits for it, and keeps a bounded prefix of its output.
///
/// Streams the command does not pipe are reported as empty.
///
/// # Errors
///
/// Returns an error when the process cannot be spawned, waited on, or read.
pub(crate) fn run_bounded(command: &mut Command, limit: usize) -> io::Result<BoundedOutput> {
    let mut child = command.spawn()?;
    let stderr_reader =
        child.stderr.take().map(|pipe| thread::spawn(move || read_bounded(pipe, limit)));
    let stdout =
        child.stdout.take().map_or_else(|| Ok(Vec::new()), |pipe| read_bounded(pipe, limit));
    let stderr = stderr_reader.map_or_else(
        || Ok(Vec::new()),
        |handle| {
            handle.join().unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")))
        },
    );
    let status = child.wait()?;
    Ok(BoundedOutput {
        status,
        stdout: stdout?,
        stderr: stderr?,
    })
}

/// Keeps the first `limit + 1` bytes of `reader` and discards the rest.
pub(crate) fn read_bounded<R: Read>(mut reader: R, limit: usize) -> io::Result<Vec<u8>> {
    let keep = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut kept = Vec::new();
    (&mut reader).take(keep).read_to_end(&mut kept)?;
    io::copy(&mut reader, &mut io::sink())?;
    Ok(kept)
}

// ============================================================================
// SECTION: Detail Text
// ============================================================================

/// Decodes bytes lossily and truncates to at most `limit` bytes on a char boundary.
pub(crate) fn lossy_truncated(bytes: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= limit {
        return text.into_owned();
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = text[..end].to_string();
    truncated.push_str("...[truncated]");
    truncated
}
