//! Bounded lock-free multi-producer/multi-consumer ring buffer.
//!
//! A fixed array of slots, each carrying an atomic sequence counter, plus
//! two monotonically increasing cursors. No locks, no blocking: a full
//! buffer hands the value back, an empty buffer returns `None`, and
//! contention is resolved by CAS retry loops.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                      BoundedQueue<T>  (N = 4)                  │
//!   │                                                                │
//!   │   slots: Box<[Slot<T>; N]>                                     │
//!   │   ┌──────────────┬──────────────┬──────────────┬─────────────┐ │
//!   │   │ seq: 4       │ seq: 2       │ seq: 3       │ seq: 4      │ │
//!   │   │ (vacant)     │ value: B     │ value: C     │ value: D    │ │
//!   │   └──────────────┴──────────────┴──────────────┴─────────────┘ │
//!   │          ▲                ▲                                    │
//!   │          │                │                                    │
//!   │   enqueue_pos = 4   dequeue_pos = 1     (cursors, padded)      │
//!   └────────────────────────────────────────────────────────────────┘
//!
//!   Slot i starts at sequence i.  For ticket t targeting slot t & (N-1):
//!     seq == t      slot is empty and owned by the producer holding t
//!     seq == t + 1  slot is full and owned by the consumer holding t
//!     seq == t + N  slot was consumed and belongs to the next lap
//! ```
//!
//! ## Operation outcomes
//!
//! | State at slot        | `try_enqueue`            | `try_dequeue`        |
//! |----------------------|--------------------------|----------------------|
//! | seq behind ticket    | full -> `Err(value)`     | empty -> `None`      |
//! | seq matches ticket   | CAS cursor, write, publish | CAS cursor, read   |
//! | seq ahead of ticket  | lost race -> retry       | lost race -> retry   |
//!
//! Publishing stores the slot sequence with `Release`; the matching loads
//! use `Acquire`, so a consumer that observes `seq == t + 1` also observes
//! the value written before it. A consumed slot's sequence advances by a
//! full lap (`t + N`, not `t + 2`): anything less would mark the slot
//! writable one cycle early and corrupt the ring.
//!
//! Sequence comparisons use wrapping signed differences, so cursor
//! wraparound on 32-bit targets is handled.

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use crate::error::ConfigError;

struct Slot<T> {
    sequence: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

/// Fixed-capacity lock-free FIFO queue safe for concurrent producers and
/// consumers.
///
/// Capacity must be a power of two so slot indices reduce to a mask.
/// Values are moved in on enqueue and moved out on dequeue.
///
/// # Example
///
/// ```
/// use ringkit::queue::mpmc::BoundedQueue;
///
/// let queue = BoundedQueue::with_capacity(4);
/// assert!(queue.try_enqueue("job").is_ok());
/// assert_eq!(queue.try_dequeue(), Some("job"));
/// assert_eq!(queue.try_dequeue(), None);
/// ```
pub struct BoundedQueue<T> {
    slots: Box<[Slot<T>]>,
    mask: usize,
    enqueue_pos: CachePadded<AtomicUsize>,
    dequeue_pos: CachePadded<AtomicUsize>,
}

// SAFETY: slots are only accessed by the thread that won the cursor CAS
// for that ticket; the sequence protocol hands each slot to exactly one
// owner at a time. T itself crosses threads, hence T: Send.
unsafe impl<T: Send> Send for BoundedQueue<T> {}
unsafe impl<T: Send> Sync for BoundedQueue<T> {}

impl<T> BoundedQueue<T> {
    /// Creates a queue with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not a power of two. Use
    /// [`try_with_capacity`](Self::try_with_capacity) for caller-supplied
    /// configuration.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(queue) => queue,
            Err(err) => panic!("invalid BoundedQueue capacity: {err}"),
        }
    }

    /// Creates a queue with the given capacity, rejecting invalid values.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo { got: capacity });
        }

        let slots = (0..capacity)
            .map(|i| Slot {
                sequence: AtomicUsize::new(i),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect();

        Ok(Self {
            slots,
            mask: capacity - 1,
            enqueue_pos: CachePadded::new(AtomicUsize::new(0)),
            dequeue_pos: CachePadded::new(AtomicUsize::new(0)),
        })
    }

    /// Attempts to enqueue `value` without blocking.
    ///
    /// Returns `Err(value)` if the buffer is full (overproduction); the
    /// rejected value is handed back so the caller can retry or apply
    /// backoff. Never blocks and never drops a value.
    pub fn try_enqueue(&self, value: T) -> Result<(), T> {
        let mut pos = self.enqueue_pos.load(Ordering::Acquire);
        loop {
            let slot = &self.slots[pos & self.mask];
            let seq = slot.sequence.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos) as isize;

            if diff < 0 {
                // Slot still holds the previous lap's value: full.
                return Err(value);
            }
            if diff == 0 {
                match self.enqueue_pos.compare_exchange(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        // The ticket is ours; the slot is invisible to
                        // consumers until the sequence store below.
                        unsafe { (*slot.value.get()).write(value) };
                        slot.sequence.store(pos.wrapping_add(1), Ordering::Release);
                        return Ok(());
                    },
                    Err(current) => pos = current,
                }
            } else {
                // Another producer claimed this ticket first.
                pos = self.enqueue_pos.load(Ordering::Acquire);
            }
        }
    }

    /// Attempts to dequeue a value without blocking.
    ///
    /// Returns `None` if the buffer is empty (overconsumption). Each
    /// successfully enqueued value is returned to exactly one caller.
    pub fn try_dequeue(&self) -> Option<T> {
        let mut pos = self.dequeue_pos.load(Ordering::Acquire);
        loop {
            let slot = &self.slots[pos & self.mask];
            let seq = slot.sequence.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(1)) as isize;

            if diff < 0 {
                // Producer has not published this ticket yet: empty.
                return None;
            }
            if diff == 0 {
                match self.dequeue_pos.compare_exchange(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        let value = unsafe { (*slot.value.get()).assume_init_read() };
                        // Advance a full lap so the slot only becomes
                        // writable again at the next wraparound.
                        slot.sequence
                            .store(pos.wrapping_add(self.slots.len()), Ordering::Release);
                        return Some(value);
                    },
                    Err(current) => pos = current,
                }
            } else {
                // Another consumer claimed this ticket first.
                pos = self.dequeue_pos.load(Ordering::Acquire);
            }
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns an estimate of the number of queued values.
    ///
    /// The two cursors are read independently, so under concurrent
    /// mutation the result may be stale. Treat it as a diagnostic hint,
    /// never as a synchronization primitive.
    pub fn len(&self) -> usize {
        let write = self.enqueue_pos.load(Ordering::SeqCst);
        let read = self.dequeue_pos.load(Ordering::SeqCst);
        write.wrapping_sub(read).min(self.capacity())
    }

    /// Returns `true` if the queue appears empty. Same staleness caveats
    /// as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies out the current contents in FIFO order, for diagnostics.
    ///
    /// Takes `&mut self`: exclusive access guarantees no enqueue or
    /// dequeue is in flight, so every position between the cursors holds
    /// an initialized value.
    pub fn snapshot(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        let write = self.enqueue_pos.load(Ordering::Relaxed);
        let mut pos = self.dequeue_pos.load(Ordering::Relaxed);
        let mut out = Vec::with_capacity(write.wrapping_sub(pos));
        while pos != write {
            let slot = &self.slots[pos & self.mask];
            out.push(unsafe { (*slot.value.get()).assume_init_ref().clone() });
            pos = pos.wrapping_add(1);
        }
        out
    }
}

impl<T> Drop for BoundedQueue<T> {
    fn drop(&mut self) {
        let write = *self.enqueue_pos.get_mut();
        let mut pos = *self.dequeue_pos.get_mut();
        while pos != write {
            let slot = &mut self.slots[pos & self.mask];
            unsafe { (*slot.value.get()).assume_init_drop() };
            pos = pos.wrapping_add(1);
        }
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
