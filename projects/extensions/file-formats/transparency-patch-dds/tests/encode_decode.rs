//! Files written by `encode_dds` read back through the public API.

use rstest::rstest;
use transparency_patch_bcn::{BlockFormat, EncodeQuality};
use transparency_patch_common::{
    color_8888::Color8888, surface::Surface, texture_format::TextureFormat,
};
use transparency_patch_dds::dds::{
    decode_dds, encode_dds, likely_dds, parse_dds, DdsEncodeOptions, DdsFormat,
};

/// 4x4 tiles of opaque white and black, the black tiles with `dark_alpha`.
fn checkerboard(width: u32, height: u32, dark_alpha: u8) -> Surface {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x / 4 + y / 4) % 2 == 0 {
                    Color8888::new(255, 255, 255, 255)
                } else {
                    Color8888::new(0, 0, 0, dark_alpha)
                }
            })
        })
        .collect();
    Surface::new(width, height, pixels).unwrap()
}

#[rstest]
#[case::dxt1(TextureFormat::Dxt1)]
#[case::dxt5(TextureFormat::Dxt5)]
#[case::luminance(TextureFormat::Luminance)]
#[case::luminance_alpha(TextureFormat::LuminanceAlpha)]
#[case::rgb565(TextureFormat::Rgb565)]
#[case::rgba4444(TextureFormat::Rgba4444)]
#[case::rgb(TextureFormat::Rgb)]
#[case::rgba(TextureFormat::Rgba)]
fn every_format_reads_back(#[case] format: TextureFormat) {
    let dark_alpha = if format.is_alpha_capable() { 0 } else { 255 };
    let surface = checkerboard(16, 8, dark_alpha);
    let dds = encode_dds(&surface, &DdsEncodeOptions::new(format)).unwrap();
    assert!(likely_dds(&dds));

    let info = parse_dds(&dds).unwrap();
    assert_eq!((info.width, info.height), (16, 8));
    assert_eq!(info.mipmap_count, 5);

    let decoded = decode_dds(&dds).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));

    // Pure white, pure black and binary alpha are exact in every format.
    for (source, result) in surface.pixels().iter().zip(decoded.pixels()) {
        assert_eq!(result.a, source.a);
        if source.is_opaque() {
            assert_eq!(result.luminance(), source.luminance());
        }
    }
}

#[test]
fn production_quality_writes_same_layout() {
    let surface = checkerboard(8, 8, 0);
    let options = DdsEncodeOptions {
        format: TextureFormat::Dxt5,
        mipmaps: false,
        quality: EncodeQuality::Production,
    };
    let dds = encode_dds(&surface, &options).unwrap();
    let info = parse_dds(&dds).unwrap();

    assert_eq!(info.format, DdsFormat::Block(BlockFormat::Bc3));
    assert_eq!(info.mipmap_count, 1);
    assert_eq!(dds.len(), info.data_offset + info.data_length);
}

#[test]
fn odd_sized_block_textures_are_rounded() {
    let surface = Surface::filled(13, 2, Color8888::new(0, 128, 255, 255)).unwrap();
    let mut options = DdsEncodeOptions::new(TextureFormat::Dxt1);
    options.mipmaps = false;

    let info = parse_dds(&encode_dds(&surface, &options).unwrap()).unwrap();
    assert_eq!((info.width, info.height), (12, 4));
}
