//! # Startup Log Sink
//!
//! The log file location is itself a config value, but loading config
//! already wants to log. `DeferredLogFile` is handed to simplelog before
//! config is read: records are buffered in memory until `attach()` names
//! the real file, then the buffer is flushed there and later writes go
//! straight through.

use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

enum Sink {
    Buffered(Vec<u8>),
    File(File),
    Discard,
}

/// Cloneable handle; simplelog owns one clone, `main` keeps another.
#[derive(Clone)]
pub struct DeferredLogFile {
    sink: Arc<Mutex<Sink>>,
}

impl DeferredLogFile {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Sink::Buffered(Vec::new()))),
        }
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Sink>> {
        self.sink
            .lock()
            .map_err(|_| io::Error::other("log sink lock poisoned"))
    }

    /// Flush everything buffered so far into `file` and keep writing there.
    pub fn attach(&self, mut file: File) -> io::Result<()> {
        let mut sink = self.lock()?;
        if let Sink::Buffered(pending) = &*sink {
            file.write_all(pending)?;
        }
        *sink = Sink::File(file);
        Ok(())
    }

    /// Drop buffered records and ignore further writes.
    pub fn discard(&self) -> io::Result<()> {
        *self.lock()? = Sink::Discard;
        Ok(())
    }
}

impl Default for DeferredLogFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for DeferredLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut *self.lock()? {
            Sink::Buffered(pending) => {
                pending.extend_from_slice(buf);
                Ok(buf.len())
            }
            Sink::File(file) => file.write(buf),
            Sink::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.lock()? {
            Sink::File(file) => file.flush(),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_buffered_lines_reach_attached_file() {
        let path = std::env::temp_dir().join(format!("reelpick-log-{}.log", std::process::id()));
        let _ = fs::remove_file(&path);

        let sink = DeferredLogFile::new();
        let mut writer = sink.clone();
        writeln!(writer, "max_suggestions = 0, using default").unwrap();

        sink.attach(File::create(&path).unwrap()).unwrap();
        writeln!(writer, "Reelpick starting up").unwrap();
        writer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "max_suggestions = 0, using default\nReelpick starting up\n"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_discard_accepts_writes() {
        let sink = DeferredLogFile::new();
        let mut writer = sink.clone();
        sink.discard().unwrap();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
    }
}
