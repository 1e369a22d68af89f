#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use retag_ptr as ptr;
pub use retag_reflect as reflect;
pub use retag_utils as utils;
