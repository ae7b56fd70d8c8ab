use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, TERMINATOR};
use crate::error::StegoError;

/// 一个像素的三个通道，依次为 R, G, B。
pub type Pixel = [u8; CHANNELS_PER_PIXEL];

/// 判断 `bit_count` 个比特能否放入 `pixel_count` 个像素中。
///
/// 每个像素提供 3 bits 的容量。乘法溢出时容量必然足够。
pub fn check_capacity(bit_count: usize, pixel_count: usize) -> bool {
    pixel_count
        .checked_mul(CHANNELS_PER_PIXEL)
        .is_none_or(|capacity| bit_count <= capacity)
}

/// 长度为 `message_len` 的消息加上终止标记后所需的比特数。
pub fn required_bits(message_len: usize) -> usize {
    message_len
        .saturating_add(TERMINATOR.len())
        .saturating_mul(BITS_PER_BYTE)
}

/// 在消息末尾追加终止标记。
pub fn frame(message: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(message.len() + TERMINATOR.len());
    framed.extend_from_slice(message);
    framed.extend_from_slice(TERMINATOR);
    framed
}

fn bit_stream(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1))
}

/// 将字符串的字节写入像素通道的最低有效位。参见 [`embed_bytes`]。
pub fn embed(pixels: &[Pixel], message: &str) -> Result<Vec<Pixel>, StegoError> {
    embed_bytes(pixels, message.as_bytes())
}

/// 将 `message` 连同终止标记逐位写入像素序列。
///
/// 比特按像素顺序、像素内按 R, G, B 的顺序写入，每个字节高位在前。
/// 比特流写完后，其余通道原样保留。
///
/// # Errors
///
/// 容量不足时返回 [`StegoError::Capacity`]，此时不会产生任何修改。
pub fn embed_bytes(pixels: &[Pixel], message: &[u8]) -> Result<Vec<Pixel>, StegoError> {
    let framed = frame(message);
    let required = framed.len() * BITS_PER_BYTE;

    if !check_capacity(required, pixels.len()) {
        return Err(StegoError::Capacity {
            required,
            available: pixels.len().saturating_mul(CHANNELS_PER_PIXEL),
        });
    }

    let mut stego = pixels.to_vec();
    stego
        .iter_mut()
        .flatten()
        .zip(bit_stream(&framed))
        .for_each(|(channel, bit)| *channel = (*channel & 0xFE) | bit);

    Ok(stego)
}

/// 从像素序列中恢复隐藏的字节，不含终止标记。
///
/// 通道的最低有效位每 8 个组成一个字节。第一次出现终止标记时停止；
/// 末尾不足 8 位的剩余比特被忽略。
///
/// # Errors
///
/// 扫描完所有通道仍未找到终止标记时返回 [`StegoError::NotFound`]。
pub fn extract_bytes(pixels: &[Pixel]) -> Result<Vec<u8>, StegoError> {
    let mut decoded = Vec::new();

    for chunk in pixels.as_flattened().chunks_exact(BITS_PER_BYTE) {
        decoded.push(
            chunk
                .iter()
                .fold(0u8, |byte, &channel| (byte << 1) | (channel & 1)),
        );

        if decoded.ends_with(TERMINATOR) {
            decoded.truncate(decoded.len() - TERMINATOR.len());
            return Ok(decoded);
        }
    }

    Err(StegoError::NotFound)
}

/// 与 [`extract_bytes`] 相同，但每个字节按其码点直接映射为字符。
/// 对 ASCII 消息这是精确的还原。
pub fn extract(pixels: &[Pixel]) -> Result<String, StegoError> {
    extract_bytes(pixels).map(|bytes| bytes.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(pixel_count: usize) -> Vec<Pixel> {
        (0..pixel_count)
            .map(|i| {
                let v = (i * 37 % 256) as u8;
                [v, v.wrapping_add(85), v.wrapping_add(170)]
            })
            .collect()
    }

    #[test]
    fn capacity_counts_three_bits_per_pixel() {
        assert!(check_capacity(12, 4));
        assert!(!check_capacity(13, 4));
        assert!(check_capacity(0, 0));
        assert!(check_capacity(usize::MAX, usize::MAX));
    }

    #[test]
    fn required_bits_include_terminator() {
        assert_eq!(required_bits(0), 32);
        assert_eq!(required_bits(2), 48);
    }

    #[test]
    fn frame_appends_terminator() {
        assert_eq!(frame(b"HI"), b"HI####");
        assert_eq!(frame(b""), b"####");
    }

    #[test]
    fn bit_stream_is_msb_first() {
        let bits: Vec<u8> = bit_stream(b"A").collect();
        assert_eq!(bits, vec![0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn empty_message_does_not_fit_in_2x2() {
        let pixels = carrier(4);
        match embed(&pixels, "") {
            Err(StegoError::Capacity {
                required,
                available,
            }) => {
                assert_eq!(required, 32);
                assert_eq!(available, 12);
            }
            other => panic!("expected capacity error, got {other:?}"),
        }
        assert_eq!(pixels, carrier(4));
    }

    #[test]
    fn hides_hi_in_first_sixteen_pixels() {
        let pixels = carrier(400);
        let stego = embed(&pixels, "HI").unwrap();

        assert_eq!(stego.len(), pixels.len());
        assert_eq!(&stego[16..], &pixels[16..]);
        assert_eq!(extract(&stego).unwrap(), "HI");
    }

    #[test]
    fn only_least_significant_bits_change() {
        let pixels = carrier(200);
        let stego = embed(&pixels, "The attack will commence at 0300 hours.").unwrap();

        for (old, new) in pixels.as_flattened().iter().zip(stego.as_flattened()) {
            assert!(old ^ new <= 1, "{old} -> {new}");
        }
    }

    #[test]
    fn exact_capacity_boundary() {
        // "####" 加 2 个字节共 48 bits，正好 16 个像素
        let pixels = carrier(16);
        assert_eq!(extract(&embed(&pixels, "ok").unwrap()).unwrap(), "ok");
        assert!(matches!(
            embed(&pixels, "ok!"),
            Err(StegoError::Capacity { required: 56, .. })
        ));

        // 48 bits 放不进 47 个通道
        assert!(!check_capacity(48, 15));
    }

    #[test]
    fn empty_message_round_trips() {
        let pixels = carrier(11);
        let stego = embed(&pixels, "").unwrap();
        assert_eq!(extract(&stego).unwrap(), "");
    }

    #[test]
    fn printable_ascii_round_trips() {
        let message: String = (b' '..=b'~').map(char::from).collect();
        let pixels = carrier(message.len() * 3 + 20);
        let stego = embed(&pixels, &message).unwrap();
        assert_eq!(extract(&stego).unwrap(), message);
    }

    #[test]
    fn utf8_bytes_round_trip_through_extract_bytes() {
        let message = "隐写 test";
        let pixels = carrier(100);
        let stego = embed(&pixels, message).unwrap();
        assert_eq!(extract_bytes(&stego).unwrap(), message.as_bytes());
    }

    #[test]
    fn stops_at_first_terminator_inside_payload() {
        let pixels = carrier(100);
        let stego = embed(&pixels, "ab####cd").unwrap();
        assert_eq!(extract(&stego).unwrap(), "ab");
    }

    #[test]
    fn missing_terminator_is_not_found() {
        let pixels = vec![[0u8; 3]; 64];
        assert!(matches!(extract(&pixels), Err(StegoError::NotFound)));
        assert!(matches!(extract(&[]), Err(StegoError::NotFound)));
    }

    #[test]
    fn extraction_is_repeatable() {
        let stego = embed(&carrier(50), "again").unwrap();
        assert_eq!(extract(&stego).unwrap(), extract(&stego).unwrap());
    }

    #[test]
    fn trailing_partial_byte_is_ignored() {
        // 11 个像素 = 33 个通道，最后 1 bit 不足一个字节
        let stego = embed(&carrier(11), "").unwrap();
        assert_eq!(extract_bytes(&stego).unwrap(), b"");
        assert!(matches!(extract(&carrier(2)), Err(StegoError::NotFound)));
    }
}
