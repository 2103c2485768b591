use persight::{reduce, BoundingBox, FrameDimensions, LabelBuffer};

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造标签缓冲区：给定person像素坐标列表，其余为背景
    fn buffer_with(width: usize, height: usize, person: &[(usize, usize)]) -> LabelBuffer {
        let mut data = vec![0u8; width * height];
        for &(x, y) in person {
            data[y * width + x] = 1;
        }
        LabelBuffer::new(width, height, data)
    }

    #[test]
    fn all_background_returns_empty() {
        let buffer = buffer_with(4, 4, &[]);
        assert_eq!(reduce(&buffer), Vec::<BoundingBox>::new());
    }

    #[test]
    fn four_by_four_square_scenario() {
        // person像素位于 (1,1) (1,2) (2,1) (2,2)
        let buffer = buffer_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(reduce(&buffer), vec![BoundingBox::new(1, 1, 2, 2)]);
    }

    #[test]
    fn single_region_box_is_tight() {
        // 8x6缓冲区中一个 3x2 的连续区域，框必须四边贴紧
        let region = [(2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (4, 4)];
        let buffer = buffer_with(8, 6, &region);

        let boxes = reduce(&buffer);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0], BoundingBox::new(2, 3, 3, 2));
    }

    #[test]
    fn single_pixel_yields_unit_box() {
        let buffer = buffer_with(5, 5, &[(4, 0)]);
        assert_eq!(reduce(&buffer), vec![BoundingBox::new(4, 0, 1, 1)]);
    }

    #[test]
    fn disjoint_regions_collapse_into_one_spanning_box() {
        // 两个不相交的区域：左上角和右下角各一个
        // 归约器不做连通分量分析，应返回横跨两者的单个框
        let buffer = buffer_with(10, 10, &[(1, 1), (2, 1), (8, 8), (8, 9)]);

        let boxes = reduce(&buffer);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0], BoundingBox::new(1, 1, 8, 9));
    }

    #[test]
    fn full_buffer_covers_everything() {
        let person: Vec<(usize, usize)> =
            (0..4).flat_map(|y| (0..6).map(move |x| (x, y))).collect();
        let buffer = buffer_with(6, 4, &person);
        assert_eq!(reduce(&buffer), vec![BoundingBox::new(0, 0, 6, 4)]);
    }

    #[test]
    fn to_display_rescales_by_resolution_ratio() {
        // 标签缓冲区4x4，显示8x8，坐标应整体翻倍
        let buffer = buffer_with(4, 4, &[(1, 1), (2, 2)]);
        let boxes = reduce(&buffer);
        assert_eq!(boxes[0], BoundingBox::new(1, 1, 2, 2));

        let scaled = boxes[0].to_display(&buffer, FrameDimensions::new(8, 8));
        assert_eq!(scaled, BoundingBox::new(2, 2, 4, 4));
    }

    #[test]
    fn to_display_keeps_box_valid_at_extreme_ratios() {
        // 大幅缩小也不能产生零尺寸的框
        let buffer = buffer_with(100, 100, &[(50, 50)]);
        let boxes = reduce(&buffer);

        let scaled = boxes[0].to_display(&buffer, FrameDimensions::new(10, 10));
        assert!(scaled.is_valid());
    }
}
