//! Stdin line reader
//!
//! Lines are read on a plain OS thread and forwarded over a channel. The thread is never joined,
//! so a read still blocked at shutdown cannot keep the process alive.

use std::io::{self, BufRead, BufReader};
use std::thread;

use tokio::sync::mpsc;

const LINE_BUFFER: usize = 64;

/// Receiving end of a line reader; `None` once the input is closed
pub type LineReceiver = mpsc::Receiver<io::Result<String>>;

/// Forward every line of `reader` to the returned channel
///
/// The reader thread stops at end of input, after the first read error, or once the receiver
/// is dropped and the next line has been read.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<LineReceiver>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;

    Ok(rx)
}

/// Read stdin on its own thread
pub fn spawn_stdin_reader() -> io::Result<LineReceiver> {
    spawn_line_reader(BufReader::new(io::stdin()))
}
