use image::{Rgba, RgbaImage};

use detroit_anomaly::constants::GLITCH_FRAME_COUNT;
use detroit_anomaly::distortion::{encode_gif, render_glitch_frames, DistortionKind};
use detroit_anomaly::placement::AnomalyRect;

fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([200, 60, 20, 255])
        } else {
            Rgba([20, 60, 200, 255])
        }
    })
}

#[test]
fn test_invert_flips_channels_and_keeps_alpha() {
    let mut region = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]));
    DistortionKind::Invert.apply(&mut region);
    assert_eq!(*region.get_pixel(0, 0), Rgba([245, 235, 225, 128]));
}

#[test]
fn test_channel_shift_rotates_rgb() {
    let mut region = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
    DistortionKind::ChannelShift.apply(&mut region);
    assert_eq!(*region.get_pixel(1, 1), Rgba([2, 3, 1, 255]));
}

#[test]
fn test_mosaic_makes_blocks_uniform() {
    let mut region = checkerboard(32, 32);
    DistortionKind::Mosaic.apply(&mut region);

    // Every pixel of the first block must equal its corner.
    let corner = *region.get_pixel(0, 0);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(*region.get_pixel(x, y), corner);
        }
    }
}

#[test]
fn test_frames_only_touch_the_target_rectangle() {
    let source = checkerboard(100, 100);
    let rect = AnomalyRect::new(20, 30, 40, 25);
    let frames = render_glitch_frames(&source, &rect, GLITCH_FRAME_COUNT);

    assert_eq!(frames.len(), GLITCH_FRAME_COUNT);
    for frame in &frames {
        for (x, y, pixel) in frame.enumerate_pixels() {
            let inside = x >= rect.x && x <= rect.x + rect.w && y >= rect.y && y <= rect.y + rect.h;
            if !inside {
                assert_eq!(pixel, source.get_pixel(x, y), "pixel ({x},{y}) leaked");
            }
        }
    }
}

#[test]
fn test_at_least_one_frame_differs_from_the_source() {
    let source = checkerboard(100, 100);
    let rect = AnomalyRect::new(10, 10, 30, 30);
    let frames = render_glitch_frames(&source, &rect, GLITCH_FRAME_COUNT);

    assert!(
        frames.iter().any(|frame| frame != &source),
        "no frame visibly distorted"
    );
}

#[test]
fn test_rect_outside_image_leaves_frames_untouched() {
    let source = checkerboard(50, 50);
    let rect = AnomalyRect::new(200, 200, 40, 40);
    let frames = render_glitch_frames(&source, &rect, 3);

    assert_eq!(frames.len(), 3);
    for frame in frames {
        assert_eq!(frame, source);
    }
}

#[test]
fn test_encode_gif_emits_a_looping_gif() {
    let source = checkerboard(40, 40);
    let frames = render_glitch_frames(&source, &AnomalyRect::new(5, 5, 20, 20), 3);
    let bytes = encode_gif(&frames, 90).unwrap();

    assert_eq!(&bytes[..6], b"GIF89a");
    // NETSCAPE application extension carries the infinite-loop flag.
    assert!(bytes
        .windows(8)
        .any(|window| window == b"NETSCAPE"));
}

#[test]
fn test_encode_gif_rejects_empty_input() {
    assert!(encode_gif(&[], 90).is_err());
}
