//! # 载体图像模块
//!
//! 负责在图像文件与隐写核心所需的像素序列之间转换。
//! 读取时统一转换为 3 通道 RGB；写入时根据扩展名选择格式。
//!
//! 写出的格式必须是无损的，有损压缩会破坏最低有效位中的数据。
//! 本 crate 只编译了无损格式的支持 (PNG, BMP, TIFF, WebP, QOI)，
//! 因此 `.jpg` 之类的目标路径会以 [`StegoError::CarrierWrite`] 失败。

use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, TERMINATOR};
use crate::error::StegoError;
use crate::steganography::{Pixel, embed_bytes, extract_bytes};
use image::{ImageError, RgbImage};
use std::path::Path;

/// 一幅载体图像：宽、高以及按行优先排列的像素序列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Carrier {
    /// 由宽高和像素序列构造载体。
    ///
    /// # Errors
    ///
    /// 像素数量不等于 `width * height` 时返回 [`StegoError::DimensionMismatch`]。
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, StegoError> {
        if (width as usize).checked_mul(height as usize) != Some(pixels.len()) {
            return Err(StegoError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 打开并解码图像文件，丢弃 alpha 通道。
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| StegoError::CarrierRead {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        Ok(Self::from(image))
    }

    /// 以无损格式保存到 `path`，格式由扩展名决定。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StegoError> {
        let path = path.as_ref();
        let write_error = |source: ImageError| StegoError::CarrierWrite {
            path: path.to_path_buf(),
            source,
        };

        let image = RgbImage::from_raw(self.width, self.height, self.pixels.as_flattened().to_vec())
            .ok_or_else(|| {
                write_error(ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                )))
            })?;

        image.save(path).map_err(write_error)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// 可用于隐写的比特数：每个通道 1 bit。
    pub fn capacity_bits(&self) -> usize {
        self.pixels.len().saturating_mul(CHANNELS_PER_PIXEL)
    }

    /// 扣除终止标记后，最多能隐藏的消息字节数。
    pub fn max_message_len(&self) -> usize {
        (self.capacity_bits() / BITS_PER_BYTE).saturating_sub(TERMINATOR.len())
    }

    /// 返回隐藏了 `message` 的新载体，原载体保持不变。
    pub fn hide(&self, message: &[u8]) -> Result<Self, StegoError> {
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels: embed_bytes(&self.pixels, message)?,
        })
    }

    /// 恢复隐藏的字节。
    pub fn reveal(&self) -> Result<Vec<u8>, StegoError> {
        extract_bytes(&self.pixels)
    }
}

impl From<RgbImage> for Carrier {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.pixels().map(|pixel| pixel.0).collect(),
        }
    }
}
