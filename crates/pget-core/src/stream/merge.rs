//! Ordered concatenation of byte streams.
//!
//! Components are consumed strictly front-to-back: output byte order is
//! always component-0-then-component-1-then-..., no matter which component
//! finishes buffering first. An exhausted component is closed immediately,
//! releasing its resources (e.g. a spill file) before the merge advances.

use std::io::{self, Read};

use super::CloseRead;

/// Concatenates an ordered sequence of components into one stream.
pub struct MergedReader<C> {
    components: Vec<Option<C>>,
    current: usize,
    bytes_read: u64,
}

impl<C: CloseRead> MergedReader<C> {
    pub fn new(components: Vec<C>) -> Self {
        MergedReader {
            components: components.into_iter().map(Some).collect(),
            current: 0,
            bytes_read: 0,
        }
    }

    /// Cumulative count of bytes yielded to the caller so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<C: CloseRead> Read for MergedReader<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.current >= self.components.len() {
                return Ok(0);
            }
            let component = match self.components[self.current].as_mut() {
                Some(c) => c,
                None => {
                    self.current += 1;
                    continue;
                }
            };
            let n = component.read(buf)?;
            if n == 0 {
                // Exhausted: free its resources before advancing.
                let mut done = self.components[self.current].take().unwrap();
                done.close()?;
                self.current += 1;
                continue;
            }
            self.bytes_read += n as u64;
            return Ok(n);
        }
    }
}

impl<C: CloseRead> CloseRead for MergedReader<C> {
    /// Close the current component and every not-yet-visited one. Every
    /// close is attempted even when earlier ones fail; the first failure is
    /// the one surfaced.
    fn close(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for slot in &mut self.components {
            if let Some(mut component) = slot.take() {
                if let Err(e) = component.close() {
                    first_error.get_or_insert(e);
                }
            }
        }
        self.current = self.components.len();
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
