// src/audio/mod.rs
//! Audio data types: sample buffers and fractional timeline regions

pub mod buffer;
pub mod region;

pub use buffer::SampleBuffer;
pub use region::Region;
