// doohickey-text: encoders/decoders, string transforms and text statistics.

pub mod codec;
pub mod stats;
pub mod transform;

pub use codec::{Codec, CodecConversion, Direction};
pub use stats::TextStats;
pub use transform::{replace_all, Transform};
