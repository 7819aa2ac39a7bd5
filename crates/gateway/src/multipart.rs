use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use uuid::Uuid;

/// A multipart/form-data body under construction.
///
/// Parts are copied into an anonymous spool file as they are added, so an
/// upload of arbitrary size never has to sit in memory and the final
/// request can carry an exact `Content-Length`. The spool is unlinked at
/// creation; it is reclaimed on every exit path, success or failure.
pub struct SpooledForm {
    spool: File,
    boundary: String,
}

/// A finished form, rewound and ready to transmit.
pub struct EncodedForm {
    pub file: File,
    pub content_length: u64,
    pub content_type: String,
}

impl SpooledForm {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            spool: tempfile::tempfile()?,
            boundary: format!("sds-form-{}", Uuid::new_v4().simple()),
        })
    }

    /// Append a file part, copying the reader's bytes into the spool.
    ///
    /// The reader is taken by value: whatever OS resource backs it is
    /// released when this call returns, whether or not the copy succeeded.
    pub fn stream_part(
        &mut self,
        name: &str,
        filename: &str,
        mut reader: impl Read,
    ) -> io::Result<u64> {
        write!(
            self.spool,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            self.boundary,
            escape_quotes(name),
            escape_quotes(filename),
        )?;
        let copied = io::copy(&mut reader, &mut self.spool)?;
        self.spool.write_all(b"\r\n")?;
        Ok(copied)
    }

    /// Append a plain text field.
    pub fn text_part(&mut self, name: &str, value: &str) -> io::Result<()> {
        write!(
            self.spool,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            self.boundary,
            escape_quotes(name),
            value,
        )
    }

    /// Terminate the envelope and rewind the spool for transmission.
    pub fn finish(mut self) -> io::Result<EncodedForm> {
        write!(self.spool, "--{}--\r\n", self.boundary)?;
        self.spool.flush()?;
        self.spool.seek(SeekFrom::Start(0))?;

        let content_length = self.spool.metadata()?.len();
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);

        Ok(EncodedForm {
            file: self.spool,
            content_length,
            content_type,
        })
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
