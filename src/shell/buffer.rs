use std::sync::{Arc, Mutex, PoisonError};

/// Shared byte accumulator for one output stream.
///
/// Exactly one writer (the stream's drainer) appends; any thread may take
/// the accumulated bytes. Both operations are atomic under the lock, so a
/// take returns every byte appended before the lock was acquired and none
/// appended after it was released.
#[derive(Debug, Clone, Default)]
pub(crate) struct StreamBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl StreamBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a chunk read from the pipe, preserving arrival order.
    pub(crate) fn append(&self, chunk: &[u8]) {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(chunk);
    }

    /// Remove and return everything accumulated since the last take.
    ///
    /// Never waits for new data; empty when nothing is pending.
    pub(crate) fn take(&self) -> Vec<u8> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::StreamBuffer;

    #[test]
    fn take_empties_the_buffer() {
        let buffer = StreamBuffer::new();
        buffer.append(b"hello");
        buffer.append(b" world");

        assert_eq!(buffer.take(), b"hello world");
        assert!(buffer.take().is_empty());
        assert!(buffer.take().is_empty());
    }

    #[test]
    fn appends_preserve_order_across_takes() {
        let buffer = StreamBuffer::new();
        buffer.append(b"first");
        assert_eq!(buffer.take(), b"first");

        buffer.append(b"second");
        buffer.append(b"third");
        assert_eq!(buffer.take(), b"secondthird");
    }

    #[test]
    fn concurrent_takes_never_lose_bytes() {
        let buffer = StreamBuffer::new();
        let writer = {
            let buffer = buffer.clone();
            std::thread::spawn(move || {
                for i in 0..1000u32 {
                    buffer.append(&i.to_le_bytes());
                }
            })
        };

        let mut collected = Vec::new();
        while !writer.is_finished() {
            collected.extend(buffer.take());
        }
        writer.join().unwrap();
        collected.extend(buffer.take());

        let expected: Vec<u8> = (0..1000u32).flat_map(|i| i.to_le_bytes()).collect();
        assert_eq!(collected, expected);
    }
}
