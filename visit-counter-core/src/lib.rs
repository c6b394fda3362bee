pub use crate::{
    envelope::{ResponseEnvelope, ResponseBody},
    record::{KEY_ATTRIBUTE, KEY_VALUE, COUNT_ATTRIBUTE},
};

pub mod envelope;
pub mod record;
