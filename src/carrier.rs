//! # 载体图像适配模块
//!
//! 使用 `image` 将载体文件解码为 `RasterBuffer`，并在嵌入后以无损格式重新编码。
//!
//! 栅格总是 RGBA8 布局 (每像素 4 个通道)。RGB8 与 RGBA8 图像在保存时保持原有布局；
//! 其他颜色类型 (灰度、16 位、浮点) 会以 RGBA8 写回，因为还原成原格式会破坏嵌入的比特。

use crate::error::StegoError;
use crate::raster::RasterBuffer;
use image::{ColorType, DynamicImage, ImageError, ImageReader, RgbaImage};
use log::{info, warn};
use std::path::Path;

/// 载体在保存时使用的像素布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierLayout {
    Rgb8,
    Rgba8,
}

/// 已解码的载体：栅格以及保存时需要的布局信息。
#[derive(Debug, Clone)]
pub struct Carrier {
    pub raster: RasterBuffer,
    pub layout: CarrierLayout,
}

fn io_or(err: ImageError, other: impl FnOnce(ImageError) -> StegoError) -> StegoError {
    match err {
        ImageError::IoError(io) => StegoError::Io(io),
        err => other(err),
    }
}

impl Carrier {
    /// 读取并解码载体文件。图像格式根据文件内容判断。
    ///
    /// # Errors
    ///
    /// * `Io`: 文件无法读取。
    /// * `MalformedCarrier`: 无法识别或解码图像，或尺寸为 0。
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let path = path.as_ref();
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|err| io_or(err, |err| StegoError::malformed(err.to_string())))?;

        info!(
            "loaded carrier {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Self::from_image(image)
    }

    /// 将内存中的图像展开为 RGBA8 栅格。
    ///
    /// # Errors
    ///
    /// 图像尺寸为 0 时返回 `MalformedCarrier`。
    pub fn from_image(image: DynamicImage) -> Result<Self, StegoError> {
        let layout = match image.color() {
            ColorType::Rgb8 => CarrierLayout::Rgb8,
            ColorType::Rgba8 => CarrierLayout::Rgba8,
            other => {
                warn!("carrier colour type {other:?} will be written back as RGBA8");
                CarrierLayout::Rgba8
            }
        };

        let rgba = image.into_rgba8();
        let (width, height) = rgba.dimensions();
        let raster = RasterBuffer::from_raw(width, height, rgba.into_raw())?;

        Ok(Self { raster, layout })
    }

    /// 按原有布局重新组装图像。
    ///
    /// # Errors
    ///
    /// 栅格数据与其尺寸不一致时返回 `MalformedCarrier`。
    pub fn into_image(self) -> Result<DynamicImage, StegoError> {
        let (width, height) = (self.raster.width(), self.raster.height());
        let rgba = RgbaImage::from_raw(width, height, self.raster.into_raw())
            .ok_or_else(|| StegoError::malformed("raster does not match its dimensions"))?;

        Ok(match self.layout {
            CarrierLayout::Rgba8 => DynamicImage::ImageRgba8(rgba),
            CarrierLayout::Rgb8 => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).into_rgb8())
            }
        })
    }

    /// 将载体保存到 `path`，格式由扩展名决定，仅支持已启用的无损格式。
    ///
    /// # Errors
    ///
    /// * `Io`: 文件无法写入。
    /// * `Encoding`: 扩展名不受支持或编码失败。
    pub fn save(self, path: impl AsRef<Path>) -> Result<(), StegoError> {
        let path = path.as_ref();
        let layout = self.layout;
        self.into_image()?
            .save(path)
            .map_err(|err| io_or(err, StegoError::Encoding))?;

        info!("saved carrier {} as {layout:?}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Coordinate;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn rgb_is_expanded_and_restored() {
        let image = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let mut carrier = Carrier::from_image(DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(carrier.layout, CarrierLayout::Rgb8);
        assert_eq!(carrier.raster.channels_per_row(), 12);
        assert_eq!(&carrier.raster.as_raw()[..4], &[10, 20, 30, 255]);

        carrier.raster.set_lsb(Coordinate { row: 1, channel: 5 }, 1);
        let restored = carrier.into_image().unwrap().into_rgb8();
        assert_eq!(restored.get_pixel(1, 1), &Rgb([10, 21, 30]));
        assert_eq!(restored.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn grey_is_promoted_to_rgba() {
        let image = GrayImage::from_pixel(4, 4, Luma([128]));
        let carrier = Carrier::from_image(DynamicImage::ImageLuma8(image)).unwrap();
        assert_eq!(carrier.layout, CarrierLayout::Rgba8);
        assert_eq!(carrier.into_image().unwrap().color(), ColorType::Rgba8);
    }

    #[test]
    fn save_and_open_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carrier.png");

        let image = RgbaImage::from_fn(5, 7, |x, y| image::Rgba([x as u8, y as u8, 7, 200]));
        let carrier = Carrier::from_image(DynamicImage::ImageRgba8(image)).unwrap();
        let expected = carrier.raster.clone();
        carrier.save(&path).unwrap();

        let reopened = Carrier::open(&path).unwrap();
        assert_eq!(reopened.layout, CarrierLayout::Rgba8);
        assert_eq!(reopened.raster, expected);
    }

    #[test]
    fn garbage_file_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            Carrier::open(&path),
            Err(StegoError::MalformedCarrier { .. })
        ));
        assert!(matches!(
            Carrier::open(dir.path().join("missing.png")),
            Err(StegoError::Io(_))
        ));
    }
}
