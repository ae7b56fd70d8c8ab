//! # 错误类型模块
//!
//! 隐写核心与载体读写所返回的结构化错误。核心本身从不打印，
//! 如何向用户展示这些错误由命令处理层决定。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 带终止标记的消息所需的位数超过了载体的通道容量。发生在任何修改之前。
    #[error("Capacity error: the message needs {required} bits but the carrier only holds {available}")]
    Capacity { required: usize, available: usize },

    /// 扫描完整个像素序列也没有找到终止标记。
    #[error("No hidden message found: the terminator was not present in the image")]
    NotFound,

    /// 像素数量与宽高不符。
    #[error("Pixel count {len} does not match the dimensions {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    #[error("Unable to read carrier image: {}", .path.display())]
    CarrierRead {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unable to write carrier image: {}", .path.display())]
    CarrierWrite {
        path: PathBuf,
        source: image::ImageError,
    },
}
