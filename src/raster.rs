// Stroke rasterizer: tiny-skia builds the anti-aliased coverage, the blur and the
// compositing onto the minifb buffer happen here.
// Visual expectation: a path drawn with width W shows up as a smooth, round-capped
// band W pixels wide; with a blur filter the band gets the matching soft glow.
use tiny_skia::{FillRule, LineCap, LineJoin, PathBuilder, Stroke, Transform};

use crate::path::StrokePath;
use crate::types::{BlurFilter, BlurStyle, Color, FrameBuffer, Mask, StrokeStyle};

/// Rasterize `path` with `style` and composite it onto `fb`.
pub fn draw_stroke(fb: &mut FrameBuffer, path: &StrokePath, style: &StrokeStyle) {
    let Some(mut mask) = stroke_mask(path, style, fb.width, fb.height) else { return };
    if let Some(blur) = style.blur {
        apply_blur(&mut mask, &blur, max_box_radius(fb.width, fb.height));
    }
    composite(fb, &mask, style.color);
}

/// Box blur passes needed to look Gaussian; three is the usual trade-off.
const BLUR_PASSES: usize = 3;

/// Blur radius in pixels → Gaussian sigma (same conversion Skia uses).
fn blur_sigma(radius: f32) -> f32 {
    radius * 0.577_35 + 0.5
}

/// A box wider than the target already spreads coverage over all of it.
fn max_box_radius(target_w: usize, target_h: usize) -> usize {
    target_w.max(target_h).max(1)
}

/// Box radius whose `BLUR_PASSES`-fold repetition has roughly the variance of `sigma`,
/// capped at `limit`.
fn box_radius(sigma: f32, limit: usize) -> usize {
    // Variance of 3 box passes of radius r is r(r+1).
    let r = ((sigma * sigma + 0.25).sqrt() - 0.5).round();
    if r.is_finite() && r >= 1.0 { (r as usize).clamp(1, limit.max(1)) } else { 1 }
}

/// How far (pixels) blur can spread coverage outside the sharp stroke.
fn blur_margin(style: &StrokeStyle, limit: usize) -> i32 {
    match style.blur {
        Some(b) if b.radius > 0.0 => (BLUR_PASSES * box_radius(blur_sigma(b.radius), limit)) as i32 + 1,
        _ => 0,
    }
}

/// Round caps and joins, like a finger-painted line.
fn pen(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Filled outline of the stroked path. A tap that never moved becomes a disc.
fn stroke_outline(path: &StrokePath, width: f32) -> Option<tiny_skia::Path> {
    match path.single_point() {
        Some((x, y)) => PathBuilder::from_circle(x, y, width / 2.0),
        None => path.to_skia_path()?.stroke(&pen(width), 1.0),
    }
}

/// Build the anti-aliased coverage mask of a stroked path.
/// Returns None when nothing would be visible (no segments, bad width, off-target).
pub fn stroke_mask(
    path: &StrokePath,
    style: &StrokeStyle,
    target_w: usize,
    target_h: usize,
) -> Option<Mask> {
    if !(style.width > 0.0) || !style.width.is_finite() {
        return None;
    }
    let outline = stroke_outline(path, style.width)?;
    let margin = blur_margin(style, max_box_radius(target_w, target_h));
    let bounds = outline.bounds();

    // Clip to the target, keeping room for blur to pull coverage back in from outside.
    let x0 = ((bounds.left().floor() as i32).saturating_sub(1 + margin)).max(-margin);
    let y0 = ((bounds.top().floor() as i32).saturating_sub(1 + margin)).max(-margin);
    let x1 = ((bounds.right().ceil() as i32).saturating_add(1 + margin)).min(target_w as i32 + margin);
    let y1 = ((bounds.bottom().ceil() as i32).saturating_add(1 + margin)).min(target_h as i32 + margin);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let mut coverage = tiny_skia::Mask::new(w, h)?;
    coverage.fill_path(
        &outline,
        FillRule::Winding,
        true,
        Transform::from_translate(-x0 as f32, -y0 as f32),
    );

    let mut mask = Mask::new(x0, y0, w as usize, h as usize);
    for (dst, &a) in mask.alpha.iter_mut().zip(coverage.data()) {
        *dst = a as f32 / 255.0;
    }
    Some(mask)
}

/// Blur the mask and combine it with the sharp original according to the style.
/// `max_box` caps the box radius (see `max_box_radius`).
pub fn apply_blur(mask: &mut Mask, blur: &BlurFilter, max_box: usize) {
    if !(blur.radius > 0.0) || mask.is_empty() {
        return;
    }
    let sharp = mask.alpha.clone();
    let r = box_radius(blur_sigma(blur.radius), max_box);
    let mut tmp = vec![0.0_f32; mask.alpha.len()];
    for _ in 0..BLUR_PASSES {
        box_blur_mask(&mut mask.alpha, &mut tmp, mask.width, mask.height, r);
    }

    for (b, &m) in mask.alpha.iter_mut().zip(sharp.iter()) {
        let blurred = *b;
        *b = match blur.style {
            BlurStyle::Normal => blurred,
            BlurStyle::Solid => m.max(blurred),
            BlurStyle::Outer => blurred * (1.0 - m),
            BlurStyle::Inner => m * blurred,
        }
        .clamp(0.0, 1.0);
    }
}

/// One horizontal + one vertical box pass, in place (`tmp` is scratch).
/// Outside the mask counts as zero coverage.
fn box_blur_mask(alpha: &mut [f32], tmp: &mut [f32], w: usize, h: usize, radius: usize) {
    let r = radius as i32;
    let win = (2 * r + 1) as f32;
    let (wi, hi) = (w as i32, h as i32);

    /* ---- Pass 1: Horizontal (alpha -> tmp) ---- */
    for y in 0..h {
        let row = y * w;
        // Prime the window [-r..r] around x = 0.
        let mut sum = 0.0_f32;
        for x in 0..=r.min(wi - 1) {
            sum += alpha[row + x as usize];
        }
        for x in 0..wi {
            tmp[row + x as usize] = sum / win;
            let add = x + r + 1;
            let sub = x - r;
            if add < wi { sum += alpha[row + add as usize]; }
            if sub >= 0 { sum -= alpha[row + sub as usize]; }
        }
    }

    /* ---- Pass 2: Vertical (tmp -> alpha) ---- */
    for x in 0..w {
        let mut sum = 0.0_f32;
        for y in 0..=r.min(hi - 1) {
            sum += tmp[y as usize * w + x];
        }
        for y in 0..hi {
            alpha[y as usize * w + x] = (sum / win).max(0.0);
            let add = y + r + 1;
            let sub = y - r;
            if add < hi { sum += tmp[add as usize * w + x]; }
            if sub >= 0 { sum -= tmp[sub as usize * w + x]; }
        }
    }
}

/// Source-over `color` through `mask` onto the framebuffer.
pub fn composite(fb: &mut FrameBuffer, mask: &Mask, color: Color) {
    let ca = color.alpha() as f32 / 255.0;
    if ca <= 0.0 {
        return;
    }
    let (cr, cg, cb) = (color.red() as f32, color.green() as f32, color.blue() as f32);

    for my in 0..mask.height {
        let y = mask.y0 + my as i32;
        if y < 0 || y >= fb.height as i32 { continue; }
        for mx in 0..mask.width {
            let x = mask.x0 + mx as i32;
            if x < 0 || x >= fb.width as i32 { continue; }

            let a = mask.alpha[my * mask.width + mx] * ca;
            if a <= 0.0 { continue; }
            let idx = y as usize * fb.width + x as usize;
            if a >= 1.0 {
                fb.pixels[idx] = color.rgb();
                continue;
            }

            let old = fb.pixels[idx];
            let inv = 1.0 - a;
            let mix = |dst: u32, src: f32| -> u32 { (dst as f32 * inv + src * a).round().clamp(0.0, 255.0) as u32 };
            let r = mix((old >> 16) & 0xFF, cr);
            let g = mix((old >> 8) & 0xFF, cg);
            let b = mix(old & 0xFF, cb);
            fb.pixels[idx] = (r << 16) | (g << 8) | b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_line(width: f32) -> (StrokePath, StrokeStyle) {
        let mut p = StrokePath::new();
        p.move_to(10.0, 20.0);
        p.line_to(50.0, 20.0);
        let style = StrokeStyle { width, color: Color::BLACK, blur: None };
        (p, style)
    }

    fn px(fb: &FrameBuffer, x: usize, y: usize) -> u32 {
        fb.pixels[y * fb.width + x]
    }

    #[test]
    fn solid_stroke_covers_its_band_only() {
        let (p, style) = horizontal_line(6.0);
        let mut fb = FrameBuffer::new(64, 40, Color::WHITE);
        draw_stroke(&mut fb, &p, &style);

        assert_eq!(px(&fb, 30, 19), 0x00_00_00_00); // center row
        assert_eq!(px(&fb, 30, 18), 0x00_00_00_00); // 1.5 px from the line
        assert_eq!(px(&fb, 30, 30), 0x00_FF_FF_FF); // far below
        assert_eq!(px(&fb, 60, 19), 0x00_FF_FF_FF); // past the round cap
    }

    #[test]
    fn round_cap_extends_past_the_endpoint() {
        let (p, style) = horizontal_line(10.0);
        let mut fb = FrameBuffer::new(64, 40, Color::WHITE);
        draw_stroke(&mut fb, &p, &style);
        // Pixel center (52.5, 19.5) is 2.5 px beyond the end: inside the cap.
        assert_eq!(px(&fb, 52, 19), 0x00_00_00_00);
    }

    #[test]
    fn lone_move_to_draws_nothing() {
        let mut p = StrokePath::new();
        p.move_to(10.0, 10.0);
        assert!(stroke_mask(&p, &StrokeStyle::default(), 32, 32).is_none());
    }

    #[test]
    fn zero_length_line_draws_a_dot() {
        let mut p = StrokePath::new();
        p.move_to(10.0, 10.0);
        p.line_to(10.0, 10.0);
        let style = StrokeStyle { width: 6.0, color: Color::BLACK, blur: None };
        let mut fb = FrameBuffer::new(32, 32, Color::WHITE);
        draw_stroke(&mut fb, &p, &style);
        assert_eq!(px(&fb, 10, 10), 0);
        assert_eq!(px(&fb, 20, 20), 0x00_FF_FF_FF);
    }

    #[test]
    fn offscreen_stroke_is_skipped() {
        let mut p = StrokePath::new();
        p.move_to(-500.0, -500.0);
        p.line_to(-400.0, -500.0);
        assert!(stroke_mask(&p, &StrokeStyle::default(), 32, 32).is_none());
    }

    #[test]
    fn non_positive_width_draws_nothing() {
        let (p, _) = horizontal_line(0.0);
        let style = StrokeStyle { width: 0.0, color: Color::BLACK, blur: None };
        assert!(stroke_mask(&p, &style, 64, 40).is_none());
    }

    #[test]
    fn half_alpha_color_blends() {
        let (p, _) = horizontal_line(6.0);
        let style = StrokeStyle { width: 6.0, color: Color::from_argb(0x80, 0, 0, 0), blur: None };
        let mut fb = FrameBuffer::new(64, 40, Color::WHITE);
        draw_stroke(&mut fb, &p, &style);
        let v = px(&fb, 30, 19) & 0xFF;
        assert!((125..=129).contains(&v), "got {v}");
    }

    fn blurred(style: BlurStyle) -> FrameBuffer {
        let (p, mut s) = horizontal_line(10.0);
        s.blur = Some(BlurFilter { radius: 8.0, style });
        let mut fb = FrameBuffer::new(64, 48, Color::WHITE);
        draw_stroke(&mut fb, &p, &s);
        fb
    }

    #[test]
    fn outer_blur_leaves_the_core_empty_and_glows_outside() {
        let fb = blurred(BlurStyle::Outer);
        assert_eq!(px(&fb, 30, 19), 0x00_FF_FF_FF);
        assert!(px(&fb, 30, 28) & 0xFF < 0xFF);
    }

    #[test]
    fn inner_blur_stays_inside_the_band() {
        let fb = blurred(BlurStyle::Inner);
        assert!(px(&fb, 30, 19) & 0xFF < 0xFF);
        assert_eq!(px(&fb, 30, 30), 0x00_FF_FF_FF);
    }

    #[test]
    fn solid_blur_keeps_core_opaque() {
        let fb = blurred(BlurStyle::Solid);
        assert_eq!(px(&fb, 30, 19), 0);
        assert!(px(&fb, 30, 28) & 0xFF < 0xFF);
    }

    #[test]
    fn normal_blur_softens_the_core() {
        let sharp = {
            let (p, s) = horizontal_line(10.0);
            let mut fb = FrameBuffer::new(64, 48, Color::WHITE);
            draw_stroke(&mut fb, &p, &s);
            fb
        };
        let fb = blurred(BlurStyle::Normal);
        assert_eq!(px(&sharp, 30, 28), 0x00_FF_FF_FF);
        assert!(px(&fb, 30, 28) & 0xFF < 0xFF);
    }

    #[test]
    fn huge_blurred_width_keeps_the_mask_near_target_size() {
        let (p, mut s) = horizontal_line(1.0e6);
        s.blur = Some(BlurFilter { radius: 1.0e6, style: BlurStyle::Normal });
        let mask = stroke_mask(&p, &s, 64, 64).unwrap();
        let limit = 64 + 2 * (BLUR_PASSES * 64 + 1);
        assert!(mask.width <= limit && mask.height <= limit, "{}x{}", mask.width, mask.height);

        let mut fb = FrameBuffer::new(64, 64, Color::WHITE);
        draw_stroke(&mut fb, &p, &s);
        assert!(px(&fb, 32, 32) & 0xFF < 0xFF);
    }

    #[test]
    fn box_radius_never_exceeds_its_cap() {
        assert_eq!(box_radius(blur_sigma(1.0e9), 40), 40);
        assert_eq!(box_radius(f32::INFINITY, 40), 1);
        assert!(box_radius(blur_sigma(8.0), 1000) < 10);
    }

    #[test]
    fn box_blur_preserves_mass_away_from_edges() {
        let mut m = Mask::new(0, 0, 21, 21);
        m.alpha[10 * 21 + 10] = 1.0;
        let mut tmp = vec![0.0; m.alpha.len()];
        box_blur_mask(&mut m.alpha, &mut tmp, 21, 21, 2);
        let total: f32 = m.alpha.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!((m.alpha[10 * 21 + 10] - 1.0 / 25.0).abs() < 1e-6);
    }
}
