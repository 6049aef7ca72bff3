// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push channel frames.

use tokio::sync::mpsc;

/// One frame received on the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text; empty text is a liveness pulse.
    Text(String),
    /// Raw bytes, expected to hold UTF-8 JSON.
    Binary(Vec<u8>),
    /// The remote end closed the channel.
    Close,
}

/// Receiving end of a push channel.
///
/// Whatever owns the websocket feeds frames into the sending half; the
/// stream ends when every sender is dropped.
///
/// # Examples
///
/// ```
/// use automower_lib::protocol::{Frame, FrameStream};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut stream) = FrameStream::channel(8);
/// tx.send(Frame::Text(String::new())).await.unwrap();
/// drop(tx);
///
/// assert_eq!(stream.next().await, Some(Frame::Text(String::new())));
/// assert_eq!(stream.next().await, None);
/// # }
/// ```
#[derive(Debug)]
pub struct FrameStream {
    rx: mpsc::Receiver<Frame>,
}

impl FrameStream {
    /// Wraps a frame receiver.
    #[must_use]
    pub fn new(rx: mpsc::Receiver<Frame>) -> Self {
        Self { rx }
    }

    /// Creates a bounded channel and returns its sender with the stream.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<Frame>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Waits for the next frame; `None` once the channel is closed.
    pub async fn next(&mut self) -> Option<Frame> {
        self.rx.recv().await
    }
}
