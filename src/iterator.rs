//! Lazy traversal through a background producer.
//!
//! A producer thread walks the set and hands elements one at a time to the
//! consumer over a rendezvous channel (capacity zero). Every hand-off races
//! the send against a stop signal, so a consumer that walks away early never
//! leaves the producer blocked:
//!
//! - [`SetIterator::stop`] (or dropping the iterator) disconnects the stop
//!   channel, which wins the race at the producer's next hand-off.
//! - Dropping the receiver returned by `iter_channel` disconnects the element
//!   channel, which makes the pending send fail.
//!
//! Iterators are single-consumer. Sharing one between consumers is a usage
//! error; the channel stays memory-safe but the split of elements is arbitrary.
//!
//! # Examples
//!
//! ```rust
//! use setalg::ThreadSafeSet;
//!
//! let set: ThreadSafeSet<i32> = (0..100).collect();
//! let mut iterator = set.iterator();
//!
//! assert!(iterator.next().is_some());
//! assert!(iterator.next().is_some());
//!
//! // The producer is released even though 98 elements were never consumed.
//! iterator.stop();
//! set.add(100);
//! assert_eq!(set.cardinality(), 101);
//! ```

use std::panic;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, never, select};
use tracing::trace;

/// Producer side of a hand-off channel.
pub(crate) struct Handoff<T> {
    sender: Sender<T>,
    stop: Receiver<()>,
}

impl<T> Handoff<T> {
    /// Blocks until the consumer takes `value` or stops.
    ///
    /// Returns `false` when the producer should give up: the stop signal
    /// arrived or the consumer dropped its receiver.
    pub(crate) fn offer(&self, value: T) -> bool {
        select! {
            recv(self.stop) -> _ => false,
            send(self.sender, value) -> result => result.is_ok(),
        }
    }
}

/// Offers every element of `elements` until the consumer stops.
pub(crate) fn drain_into<T>(handoff: &Handoff<T>, elements: impl IntoIterator<Item = T>) {
    let mut produced = 0_usize;
    for element in elements {
        if !handoff.offer(element) {
            trace!(produced, "set iterator producer stopped early");
            return;
        }
        produced += 1;
    }
    trace!(produced, "set iterator producer exhausted");
}

/// Starts a producer with no stop channel and returns the consumer end.
///
/// The producer exits once it has handed over everything or the receiver is
/// dropped.
pub(crate) fn spawn_channel<T, F>(produce: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnOnce(&Handoff<T>) + Send + 'static,
{
    let (sender, receiver) = bounded(0);
    thread::spawn(move || {
        let handoff = Handoff {
            sender,
            stop: never(),
        };
        produce(&handoff);
    });
    receiver
}

/// An iterator over a set's elements fed by a background producer.
///
/// Implements [`Iterator`], and also exposes the raw channel through
/// [`channel`](Self::channel) for use with `crossbeam_channel::select!`.
pub struct SetIterator<T> {
    receiver: Receiver<T>,
    stop: Option<Sender<()>>,
    producer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> SetIterator<T> {
    pub(crate) fn spawn<F>(produce: F) -> Self
    where
        F: FnOnce(&Handoff<T>) + Send + 'static,
    {
        let (sender, receiver) = bounded(0);
        let (stop_sender, stop_receiver) = bounded::<()>(0);
        let producer = thread::spawn(move || {
            trace!("set iterator producer started");
            let handoff = Handoff {
                sender,
                stop: stop_receiver,
            };
            produce(&handoff);
        });
        Self {
            receiver,
            stop: Some(stop_sender),
            producer: Some(producer),
        }
    }
}

impl<T> SetIterator<T> {
    /// The channel elements arrive on. It is disconnected once the producer
    /// finishes.
    pub const fn channel(&self) -> &Receiver<T> {
        &self.receiver
    }

    /// Returns `true` once the producer thread has exited.
    pub fn is_finished(&self) -> bool {
        self.producer
            .as_ref()
            .is_none_or(std::thread::JoinHandle::is_finished)
    }

    /// Stops the producer and waits for it to exit.
    ///
    /// Elements not yet consumed are discarded.
    ///
    /// # Panics
    ///
    /// Re-raises a panic that happened on the producer thread.
    pub fn stop(mut self) {
        self.stop.take();
        if let Some(producer) = self.producer.take()
            && let Err(payload) = producer.join()
        {
            panic::resume_unwind(payload);
        }
    }
}

impl<T> Iterator for SetIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

impl<T> std::fmt::Debug for SetIterator<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SetIterator")
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
