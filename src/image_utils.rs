use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};

use crate::constants::{MAX_IMAGE_DIMENSION, MAX_PIXEL_COUNT, THUMBNAIL_HEIGHT};
use crate::error::ThumbnailError;

// 画像サイズ検証（展開爆弾防止）
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), ThumbnailError> {
    if width == 0 || height == 0 {
        return Err(ThumbnailError::InvalidDimensions(
            "無効な画像サイズ: 幅または高さが0".to_string(),
        ));
    }
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(ThumbnailError::InvalidDimensions(format!(
            "画像サイズが大きすぎます: {}x{} (最大: {})",
            width, height, MAX_IMAGE_DIMENSION
        )));
    }
    let pixel_count = (width as u64) * (height as u64);
    if pixel_count > MAX_PIXEL_COUNT {
        return Err(ThumbnailError::InvalidDimensions(format!(
            "ピクセル数が多すぎます: {} (最大: {})",
            pixel_count, MAX_PIXEL_COUNT
        )));
    }
    Ok(())
}

// アスペクト比を保った目標幅（高さはTHUMBNAIL_HEIGHT固定）
pub fn target_width(width: u32, height: u32) -> u32 {
    (THUMBNAIL_HEIGHT as f64 / height as f64 * width as f64).round() as u32
}

// 間引き係数: ソースが目標サイズを超える場合のみ2以上になる
pub fn subsample_factor(width: u32, height: u32) -> u32 {
    // 極端な縦長画像では目標幅が0に丸まるため1を下限とする
    let tw = target_width(width, height).max(1);
    if width > tw {
        ((width as f64 / tw as f64).round() as u32).max(1)
    } else if height > THUMBNAIL_HEIGHT {
        ((height as f64 / THUMBNAIL_HEIGHT as f64).round() as u32).max(1)
    } else {
        1
    }
}

// 両軸を係数nで等間引きする（原点0,0から各n画素目を採用、補間なし）
// 出力サイズは ⌈幅/n⌉×⌈高さ/n⌉ の近似サムネイル
pub fn subsample(img: DynamicImage, factor: u32) -> DynamicImage {
    if factor <= 1 {
        return img;
    }

    let (width, height) = img.dimensions();
    let out_width = width.div_ceil(factor);
    let out_height = height.div_ceil(factor);

    let src = img.to_rgba8();
    let mut out = RgbaImage::new(out_width, out_height);
    for oy in 0..out_height {
        for ox in 0..out_width {
            out.put_pixel(ox, oy, *src.get_pixel(ox * factor, oy * factor));
        }
    }

    DynamicImage::ImageRgba8(out)
}

// PNG形式でエンコード（可逆圧縮で画質劣化なし）
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ThumbnailError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(ThumbnailError::EncodeThumbnail)?;
    Ok(buffer.into_inner())
}

// フロントエンドへそのまま渡せるdata URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn target_width_keeps_aspect_ratio() {
        assert_eq!(target_width(400, 200), 200);
        assert_eq!(target_width(100, 100), 100);
        assert_eq!(target_width(800, 100), 800);
        // 丸めは四捨五入
        assert_eq!(target_width(150, 99), 152);
    }

    #[test]
    fn subsample_factor_for_oversized_width() {
        // 400x200 → 目標200x100、幅比2
        assert_eq!(subsample_factor(400, 200), 2);
        // 100x1000 → 目標10x100、幅比10
        assert_eq!(subsample_factor(100, 1000), 10);
    }

    #[test]
    fn subsample_factor_is_one_at_or_below_target() {
        assert_eq!(subsample_factor(100, 100), 1);
        assert_eq!(subsample_factor(800, 100), 1);
        assert_eq!(subsample_factor(50, 80), 1);
    }

    #[test]
    fn subsample_picks_every_nth_pixel() {
        // 座標を画素値に埋め込んだ4x4画像
        let mut src = RgbaImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                src.put_pixel(x, y, Rgba([x as u8, y as u8, 0, 255]));
            }
        }

        let out = subsample(DynamicImage::ImageRgba8(src), 2);
        assert_eq!(out.dimensions(), (2, 2));
        let out = out.to_rgba8();
        assert_eq!(out.get_pixel(0, 0).0[..2], [0, 0]);
        assert_eq!(out.get_pixel(1, 0).0[..2], [2, 0]);
        assert_eq!(out.get_pixel(0, 1).0[..2], [0, 2]);
        assert_eq!(out.get_pixel(1, 1).0[..2], [2, 2]);
    }

    #[test]
    fn subsample_rounds_output_size_up() {
        let src = RgbaImage::new(5, 5);
        let out = subsample(DynamicImage::ImageRgba8(src), 2);
        assert_eq!(out.dimensions(), (3, 3));
    }

    #[test]
    fn subsample_factor_one_returns_input_unchanged() {
        let src = RgbaImage::new(7, 3);
        let out = subsample(DynamicImage::ImageRgba8(src), 1);
        assert_eq!(out.dimensions(), (7, 3));
    }

    #[test]
    fn validate_dimensions_rejects_degenerate_sizes() {
        assert!(validate_dimensions(0, 100).is_err());
        assert!(validate_dimensions(100, 0).is_err());
        assert!(validate_dimensions(100_000, 10).is_err());
        assert!(validate_dimensions(20_000, 20_000).is_err());
        assert!(validate_dimensions(4000, 6000).is_ok());
    }

    #[test]
    fn png_data_url_has_expected_prefix() {
        let url = png_data_url(&[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
