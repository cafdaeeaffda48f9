pub mod mpmc;

pub use mpmc::BoundedQueue;
