pub mod codec;
pub mod error;
pub mod frame;
pub mod range;

pub use codec::{CodecKind, DepthCodec, HardwareColorizer};
pub use error::CodecError;
pub use frame::{DepthFrame, RgbFrame};
pub use range::DepthRange;
