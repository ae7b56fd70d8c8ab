//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::Carrier;
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_EXTENSION, DOCTORED_PREFIX};
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 由载体路径生成默认输出路径：同目录下的 `doctored_<文件名>.png`。
pub fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    image.with_file_name(format!("{DOCTORED_PREFIX}{stem}.{DEFAULT_EXTENSION}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和消息、检查隐写空间是否足够、调用隐写核心函数，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 没有提供消息，或者同时提供了 `message` 和 `text`。
/// * 无法读取载体图像或文本文件。
/// * 目标文件已存在且未指定 `force`。
/// * 图像没有足够的空间来隐藏消息。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let message = match (args.message, &args.text) {
        (Some(message), None) => message.into_bytes(),
        (None, Some(text)) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        _ => anyhow::bail!("Provide exactly one of --message or --text."),
    };

    let dest = args.dest.unwrap_or_else(|| default_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    let carrier = Carrier::open(&args.image)?;

    let stego = match carrier.hide(&message) {
        Ok(stego) => stego,
        Err(StegoError::Capacity {
            required,
            available,
        }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        Err(e) => return Err(e.into()),
    };

    stego.save(&dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件并恢复隐藏的消息。
/// 指定了 `text` 时按原始字节写入该文件，否则直接打印到终端。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中找不到终止标记。
/// * 目标文件已存在且未指定 `force`，或者无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let carrier = Carrier::open(&args.image)?;

    let message = carrier.reveal().with_context(|| {
        format!(
            "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or was saved in a lossy format.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match &args.text {
        Some(text) => {
            fs::write(text, &message).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    text.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "The text has been successfully recovered and saved: {}",
                text.to_string_lossy().green().bold()
            );
        }
        None => println!("{}", String::from_utf8_lossy(&message)),
    }

    Ok(())
}

/// 处理 'Capacity' 命令：报告图像尺寸、可用比特数和最多可隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let carrier = Carrier::open(&args.image)?;

    println!(
        "{}: {}x{} pixels, {} bits available, up to {} bytes of text",
        args.image.to_string_lossy().bold(),
        carrier.width(),
        carrier.height(),
        carrier.capacity_bits().to_string().green(),
        carrier.max_message_len().to_string().green().bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dest_sits_next_to_the_carrier() {
        assert_eq!(
            default_dest(Path::new("/tmp/pics/holiday.bmp")),
            PathBuf::from("/tmp/pics/doctored_holiday.png")
        );
        assert_eq!(
            default_dest(Path::new("cat.png")),
            PathBuf::from("doctored_cat.png")
        );
    }
}
