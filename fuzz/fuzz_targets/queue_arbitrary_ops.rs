#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use ringkit::queue::BoundedQueue;

// Fuzz arbitrary single-threaded op sequences on BoundedQueue against a
// VecDeque model
//
// Single-threaded use must behave exactly like a bounded FIFO: rejects at
// capacity, returns None when empty, preserves order, and the snapshot
// mirrors the model at any point.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = 1usize << (data[0] % 7); // 1..=64, power of two
    let mut queue: BoundedQueue<u8> = BoundedQueue::with_capacity(capacity);
    let mut model: VecDeque<u8> = VecDeque::new();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let value = data[idx + 1];

        match op {
            0 => match queue.try_enqueue(value) {
                Ok(()) => {
                    assert!(model.len() < capacity, "accepted a value while full");
                    model.push_back(value);
                }
                Err(rejected) => {
                    assert_eq!(rejected, value);
                    assert_eq!(model.len(), capacity, "rejected a value while not full");
                }
            },
            1 => {
                assert_eq!(queue.try_dequeue(), model.pop_front());
            }
            2 => {
                assert_eq!(queue.len(), model.len());
                assert_eq!(queue.is_empty(), model.is_empty());
            }
            3 => {
                let contents: Vec<u8> = model.iter().copied().collect();
                assert_eq!(queue.snapshot(), contents);
            }
            _ => unreachable!(),
        }

        assert!(queue.len() <= capacity);
        idx += 2;
    }
});
