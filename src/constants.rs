/// 追加在消息末尾的终止标记。
/// 解码时一旦累积的字节以该标记结尾即停止。
pub const TERMINATOR: &[u8; 4] = b"####";

/// 每个像素的通道数 (R, G, B)。每个通道的最低有效位承载 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字符按 `u8` 处理，占用 8 bits，高位在前。
pub const BITS_PER_BYTE: usize = 8;

/// 未指定输出路径时，隐写结果图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 默认输出格式的扩展名。必须是无损格式。
pub const DEFAULT_EXTENSION: &str = "png";
