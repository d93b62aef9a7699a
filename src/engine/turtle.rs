//! Streaming Turtle serializer
//!
//! Wraps `oxttl`'s writer so that serialized output can be collected chunk by
//! chunk while triples keep arriving.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;

use oxrdf::Triple;
use oxttl::TurtleSerializer;
use oxttl::turtle::WriterTurtleSerializer;

/// `io::Write` sink whose bytes can be drained from outside the serializer
#[derive(Debug, Clone, Default)]
struct ChunkSink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl Write for ChunkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct TripleWriter {
    serializer: Option<WriterTurtleSerializer<ChunkSink>>,
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl TripleWriter {
    /// Create a writer declaring the given prefixes
    ///
    /// Prefixes with an invalid IRI are skipped with a warning.
    pub fn new(prefixes: &BTreeMap<String, String>) -> Self {
        let mut serializer = TurtleSerializer::new();
        for (name, iri) in prefixes {
            match serializer.clone().with_prefix(name.as_str(), iri.as_str()) {
                Ok(with_prefix) => serializer = with_prefix,
                Err(e) => log::warn!("Skipping prefix {}: <{}>: {}", name, iri, e),
            }
        }

        let sink = ChunkSink::default();
        let buffer = Rc::clone(&sink.buffer);
        Self {
            serializer: Some(serializer.for_writer(sink)),
            buffer,
        }
    }

    pub fn add_triple(&mut self, triple: &Triple) -> io::Result<()> {
        match self.serializer.as_mut() {
            Some(serializer) => serializer.serialize_triple(triple),
            None => Err(io::Error::other("triple writer already ended")),
        }
    }

    /// Output produced since the last call, if any
    pub fn take_chunk(&mut self) -> Option<String> {
        let mut buffer = self.buffer.borrow_mut();
        if buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut *buffer);
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Finish the document and return the remaining output
    pub fn end(&mut self) -> io::Result<Option<String>> {
        if let Some(serializer) = self.serializer.take() {
            serializer.finish()?;
        }
        Ok(self.take_chunk())
    }
}
