use persight::{BoundingBox, FrameDimensions, LabelBuffer, OverlayRenderer};

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造全person的标签缓冲区
    fn full_person(width: usize, height: usize) -> LabelBuffer {
        LabelBuffer::new(width, height, vec![1u8; width * height])
    }

    /// 构造全背景的标签缓冲区
    fn all_background(width: usize, height: usize) -> LabelBuffer {
        LabelBuffer::new(width, height, vec![0u8; width * height])
    }

    #[test]
    fn fresh_surface_is_blank() {
        let renderer = OverlayRenderer::new(FrameDimensions::new(16, 16));
        assert!(renderer.is_blank());
    }

    #[test]
    fn clear_empties_painted_surface() {
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(16, 16));
        renderer.paint_mask(&full_person(8, 8), 0.5);
        assert!(!renderer.is_blank());

        renderer.clear();
        assert!(renderer.is_blank());
    }

    #[test]
    fn background_mask_paints_nothing() {
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(16, 16));
        renderer.paint_mask(&all_background(8, 8), 0.5);
        assert!(renderer.is_blank());
    }

    #[test]
    fn coarse_mask_scales_up_to_fill_display() {
        // 标签缓冲区2x2，显示64x32：遮罩应放大铺满整个表面
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(64, 32));
        renderer.paint_mask(&full_person(2, 2), 0.5);

        let pixels = renderer.pixels();
        let center = pixels[16 * 64 + 32];
        assert_ne!(center, 0, "显示中心应被放大后的遮罩覆盖");

        // alpha = round(255 * 0.5) = 128
        assert_eq!(center >> 24, 128);
    }

    #[test]
    fn mask_uses_premultiplied_tint() {
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(8, 8));
        renderer.paint_mask(&full_person(8, 8), 1.0);

        // 不透明度1.0时即为原始色调 #00FF80
        let center = renderer.pixels()[4 * 8 + 4];
        assert_eq!(center, 0xFF00_FF80);
    }

    #[test]
    fn box_stroke_touches_rect_edges() {
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(400, 400));
        renderer.paint_box(&BoundingBox::new(50, 50, 100, 80), "person");

        let pixels = renderer.pixels();
        // 上边中点应落在描边上
        let top_mid = pixels[50 * 400 + 100];
        assert_ne!(top_mid >> 24, 0, "描边应覆盖矩形上边");

        // 框外远处保持透明
        let far_away = pixels[300 * 400 + 300];
        assert_eq!(far_away, 0);
    }

    #[test]
    fn paint_sequence_is_idempotent() {
        // 在刚清除的表面上用相同输入重复整个绘制序列，
        // 两次的结果必须完全一致（没有隐藏的累积状态）
        let buffer = full_person(4, 4);
        let bbox = BoundingBox::new(8, 8, 16, 16);
        let mut renderer = OverlayRenderer::new(FrameDimensions::new(32, 32));

        renderer.clear();
        renderer.paint_mask(&buffer, 0.5);
        renderer.paint_box(&bbox, "person");
        let first: Vec<u32> = renderer.pixels().to_vec();

        renderer.clear();
        renderer.paint_mask(&buffer, 0.5);
        renderer.paint_box(&bbox, "person");
        let second: Vec<u32> = renderer.pixels().to_vec();

        assert_eq!(first, second);
    }
}
