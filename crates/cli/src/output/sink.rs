//! Shared output sinks
//!
//! A spinner's animation thread and its final status line write to the same
//! stream, so the stream sits behind a mutex both sides can reach.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use console::Term;
use indicatif::TermLike;

/// Width assumed for sinks that are not attached to a terminal
const DEFAULT_WIDTH: u16 = 80;

/// Cloneable handle to a writer shared between threads
pub struct SharedSink<W> {
    inner: Arc<Mutex<W>>,
    term: Option<Term>,
}

impl<W> SharedSink<W> {
    /// Wrap a writer that is not a terminal
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
            term: None,
        }
    }

    /// Column count of the terminal behind this sink
    pub fn width(&self) -> u16 {
        self.term.as_ref().map_or(DEFAULT_WIDTH, |term| term.size().1)
    }

    /// Lock the underlying writer
    ///
    /// A panic while holding the lock does not make the sink unusable.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SharedSink<io::Stdout> {
    /// Standard output, measured as a terminal
    pub fn stdout() -> Self {
        Self {
            inner: Arc::new(Mutex::new(io::stdout())),
            term: Some(Term::stdout()),
        }
    }
}

impl<W> Clone for SharedSink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            term: self.term.clone(),
        }
    }
}

impl<W> fmt::Debug for SharedSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}

impl<W: Write> Write for SharedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Lets indicatif draw onto a [`SharedSink`] instead of a real terminal
pub(crate) struct SinkTerm<W> {
    sink: SharedSink<W>,
    width: u16,
}

impl<W> fmt::Debug for SinkTerm<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkTerm")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl<W> SinkTerm<W> {
    pub(crate) fn new(sink: SharedSink<W>) -> Self {
        let width = sink.width();
        Self { sink, width }
    }

    fn escape(&self, n: usize, code: char) -> io::Result<()>
    where
        W: Write,
    {
        if n == 0 {
            return Ok(());
        }
        self.sink.lock().write_all(format!("\x1b[{n}{code}").as_bytes())
    }
}

impl<W: Write + Send + 'static> TermLike for SinkTerm<W> {
    fn width(&self) -> u16 {
        self.width
    }

    fn move_cursor_up(&self, n: usize) -> io::Result<()> {
        self.escape(n, 'A')
    }

    fn move_cursor_down(&self, n: usize) -> io::Result<()> {
        self.escape(n, 'B')
    }

    fn move_cursor_right(&self, n: usize) -> io::Result<()> {
        self.escape(n, 'C')
    }

    fn move_cursor_left(&self, n: usize) -> io::Result<()> {
        self.escape(n, 'D')
    }

    fn write_line(&self, s: &str) -> io::Result<()> {
        let mut out = self.sink.lock();
        out.write_all(s.as_bytes())?;
        out.write_all(b"\n")
    }

    fn write_str(&self, s: &str) -> io::Result<()> {
        self.sink.lock().write_all(s.as_bytes())
    }

    fn clear_line(&self) -> io::Result<()> {
        self.sink.lock().write_all(b"\r\x1b[2K")
    }

    fn flush(&self) -> io::Result<()> {
        self.sink.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = SharedSink::new(Vec::new());
        let mut a = sink.clone();
        let mut b = sink.clone();
        a.write_all(b"one\n").unwrap();
        b.write_all(b"two\n").unwrap();
        assert_eq!(sink.lock().as_slice(), b"one\ntwo\n");
    }

    #[test]
    fn test_width_follows_sink() {
        let sink = SharedSink::new(Vec::new());
        assert_eq!(sink.width(), DEFAULT_WIDTH);
        assert_eq!(SinkTerm::new(sink).width(), DEFAULT_WIDTH);

        let stdout = SharedSink::stdout();
        assert_eq!(stdout.width(), Term::stdout().size().1);
        assert_eq!(SinkTerm::new(stdout.clone()).width(), stdout.width());
    }

    #[test]
    fn test_sink_term_escapes() {
        let sink = SharedSink::new(Vec::new());
        let term = SinkTerm::new(sink.clone());
        term.move_cursor_up(0).unwrap();
        term.move_cursor_up(2).unwrap();
        term.clear_line().unwrap();
        term.write_line("frame").unwrap();
        assert_eq!(sink.lock().as_slice(), b"\x1b[2A\r\x1b[2Kframe\n");
    }
}
