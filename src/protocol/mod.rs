//! Protocol module - response framing.
//!
//! Both backends receive the same wire format: one varint length prefix
//! followed by one serialized `Document`.
//! - Varint length prefix encoding/decoding
//! - Frame splitting and building

mod frame;
mod wire_format;

pub use frame::{build_frame, split_frame};
pub use wire_format::{
    decode_length_prefix, encode_length_prefix, length_prefix_width, LengthPrefix,
    MAX_VARINT_WIDTH,
};
