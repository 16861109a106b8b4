//! Audio playback engine — FLAC/MP3/WAV decoding, DMA streaming to SAI I²S
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]

pub mod bluetooth_sink;
pub mod decoder;
pub mod engine;
pub mod i2s_sink;
pub mod pcm_buffer;
pub mod sample_converter;
pub mod sink;
pub mod volume;
