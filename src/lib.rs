//! # lsb_marker 库
//!
//! 本库包含以终止标记分帧的 LSB 隐写工具的核心逻辑。
//! `steganography` 是与具体图像格式无关的核心编解码；
//! `carrier` 负责图像文件与像素序列之间的转换。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use carrier::Carrier;
pub use error::StegoError;
pub use steganography::{Pixel, check_capacity, embed, embed_bytes, extract, extract_bytes};
