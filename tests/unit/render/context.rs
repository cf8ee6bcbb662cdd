use super::*;

fn px(pixmap: &vello_cpu::Pixmap, x: usize, y: usize) -> [u8; 4] {
    let w = pixmap.width() as usize;
    let d = pixmap.data_as_u8_slice();
    let i = (y * w + x) * 4;
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn allocate_rejects_zero_and_oversized_extents() {
    assert!(DrawContext::allocate(0, 10).is_err());
    assert!(DrawContext::allocate(10, 0).is_err());
    assert!(DrawContext::allocate(70_000, 10).is_err());
    let ctx = DrawContext::allocate(16, 9).unwrap();
    assert_eq!((ctx.width(), ctx.height()), (16, 9));
}

#[test]
fn save_restore_round_trips_transform() {
    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    ctx.save();
    ctx.translate(Vec2::new(10.0, 5.0));
    ctx.scale(2.0);
    assert_eq!(ctx.transform() * Point::new(1.0, 1.0), Point::new(12.0, 7.0));
    ctx.restore();
    assert_eq!(ctx.transform(), Affine::IDENTITY);

    // Unbalanced restore is a no-op.
    ctx.restore();
    assert_eq!(ctx.transform(), Affine::IDENTITY);
}

#[test]
fn translate_composes_in_current_space() {
    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    ctx.scale(2.0);
    ctx.translate(Vec2::new(3.0, 0.0));
    assert_eq!(ctx.transform() * Point::ZERO, Point::new(6.0, 0.0));
}

#[test]
fn fill_rect_honours_transform() {
    let mut ctx = DrawContext::allocate(8, 8).unwrap();
    ctx.translate(Vec2::new(4.0, 4.0));
    ctx.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::rgb(255, 0, 0));
    let pm = ctx.into_pixmap();
    assert_eq!(px(&pm, 5, 5), [255, 0, 0, 255]);
    assert_eq!(px(&pm, 1, 1), [0, 0, 0, 0]);
}

#[test]
fn clear_ignores_transform() {
    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    ctx.translate(Vec2::new(100.0, 100.0));
    ctx.clear(Rgba8::rgb(0, 0, 255));
    let pm = ctx.into_pixmap();
    assert_eq!(px(&pm, 0, 0), [0, 0, 255, 255]);
    assert_eq!(px(&pm, 3, 3), [0, 0, 255, 255]);
}

#[test]
fn draw_pixmap_scales_without_smoothing() {
    let mut src = DrawContext::allocate(4, 4).unwrap();
    src.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), Rgba8::rgb(0, 255, 0));
    let src = src.into_pixmap();

    let mut dst = DrawContext::allocate(8, 8).unwrap();
    dst.scale(2.0);
    dst.draw_pixmap(src, Point::ZERO);
    let pm = dst.into_pixmap();

    assert_eq!(px(&pm, 1, 1), [0, 255, 0, 255]);
    assert_eq!(px(&pm, 2, 4), [0, 255, 0, 255]);
    assert_eq!(px(&pm, 6, 6), [0, 0, 0, 0]);
}

#[test]
fn opacity_layer_scales_alpha() {
    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    ctx.with_opacity(0.5, |ctx| {
        ctx.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::rgb(255, 255, 255));
    });
    let pm = ctx.into_pixmap();
    let a = px(&pm, 2, 2)[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}
