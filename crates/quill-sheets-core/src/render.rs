//! Renderer seam
//!
//! The core never encodes bytes itself. A [`Renderer`] receives the finished
//! document and a sink; whatever it reports is surfaced as
//! [`Error::Write`](crate::Error::Write) without being reinterpreted.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use crate::document::ExcelDocument;
use crate::error::{Error, Result};

/// Encodes a finished document into a file format
pub trait Renderer {
    /// Failure type of this renderer
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write `document` to `sink`
    fn render<W: Write + Seek>(
        &self,
        document: &ExcelDocument,
        sink: W,
    ) -> std::result::Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    type Error = R::Error;

    fn render<W: Write + Seek>(
        &self,
        document: &ExcelDocument,
        sink: W,
    ) -> std::result::Result<(), Self::Error> {
        (**self).render(document, sink)
    }
}

impl ExcelDocument {
    /// Render into any seekable sink
    pub fn render<R, W>(&self, renderer: &R, sink: W) -> Result<()>
    where
        R: Renderer + ?Sized,
        W: Write + Seek,
    {
        renderer.render(self, sink).map_err(Error::write)
    }

    /// Render into an in-memory buffer
    pub fn render_to_vec<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.render(renderer, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Render into a file, creating or truncating it
    pub fn render_to_path<R, P>(&self, renderer: &R, path: P) -> Result<()>
    where
        R: Renderer + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(Error::write)?;
        log::debug!("rendering {} sheets to {}", self.sheet_count(), path.display());
        self.render(renderer, BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    struct Failing;

    impl Renderer for Failing {
        type Error = DiskFull;

        fn render<W: Write + Seek>(
            &self,
            _: &ExcelDocument,
            _: W,
        ) -> std::result::Result<(), DiskFull> {
            Err(DiskFull)
        }
    }

    struct SheetNames;

    impl Renderer for SheetNames {
        type Error = std::io::Error;

        fn render<W: Write + Seek>(
            &self,
            document: &ExcelDocument,
            mut sink: W,
        ) -> std::io::Result<()> {
            for sheet in document.sheets() {
                writeln!(sink, "{}", sheet.name())?;
            }
            Ok(())
        }
    }

    fn document() -> ExcelDocument {
        ExcelDocument::builder()
            .sheet("One", |_| {})
            .sheet("Two", |_| {})
            .build()
            .unwrap()
    }

    #[test]
    fn test_renderer_error_passes_through() {
        let err = document().render_to_vec(&Failing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(err.to_string(), "disk full");

        let Error::Write(inner) = err else {
            panic!("expected write error");
        };
        assert!(inner.downcast_ref::<DiskFull>().is_some());
    }

    #[test]
    fn test_render_to_vec() {
        let bytes = document().render_to_vec(&SheetNames).unwrap();
        assert_eq!(bytes, b"One\nTwo\n");
    }
}
