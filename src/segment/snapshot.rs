use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use raqote::{DrawOptions, DrawTarget};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::error::EngineError;
use crate::segment::overlay::OverlayRenderer;

/// 快照上传请求体
#[derive(Debug, Serialize)]
struct SnapshotRequest {
    /// data-URI编码的PNG图像
    image: String,
}

/// 快照上传响应体
#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    filename: String,
}

/// 合成快照图像
///
/// 在一张与显示尺寸一致的临时表面上，先绘制当前视频帧，再叠加
/// 当前覆盖层（遮罩与标注框），视频在下、覆盖层在上。
///
/// # 参数
/// * `frame` - 当前视频帧
/// * `overlay` - 当前覆盖层渲染器
///
/// # 返回值
/// 返回合成后的RGBA图像
pub fn compose(frame: &DynamicImage, overlay: &OverlayRenderer) -> DynamicImage {
    let dims = overlay.dimensions();
    let mut dt = DrawTarget::new(dims.width as i32, dims.height as i32);

    // 视频帧转换为raqote的预乘ARGB像素（视频不透明，预乘即原值）
    let rgba = frame.to_rgba8();
    let frame_data: Vec<u32> = rgba
        .chunks(4)
        .map(|pixel| {
            let [r, g, b, a] = [pixel[0], pixel[1], pixel[2], pixel[3]];
            u32::from_le_bytes([b, g, r, a])
        })
        .collect();

    let video = raqote::Image {
        width: frame.width() as i32,
        height: frame.height() as i32,
        data: &frame_data,
    };
    dt.draw_image_with_size_at(
        dims.width as f32,
        dims.height as f32,
        0.0,
        0.0,
        &video,
        &DrawOptions::new(),
    );

    // 覆盖层表面本身就是预乘ARGB，直接叠加
    let mask = raqote::Image {
        width: dims.width as i32,
        height: dims.height as i32,
        data: overlay.pixels(),
    };
    dt.draw_image_with_size_at(
        dims.width as f32,
        dims.height as f32,
        0.0,
        0.0,
        &mask,
        &DrawOptions::new(),
    );

    let pixels: Vec<u8> = dt
        .get_data()
        .iter()
        .flat_map(|&pixel| {
            let bytes = pixel.to_le_bytes();
            [bytes[2], bytes[1], bytes[0], bytes[3]] // BGRA to RGBA
        })
        .collect();

    DynamicImage::ImageRgba8(
        image::ImageBuffer::from_raw(dims.width, dims.height, pixels)
            .expect("Failed to create image from rendered data"),
    )
}

/// 把图像编码为无损PNG
///
/// # 错误处理
/// 编码失败时返回 `EngineError::Upload`
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, EngineError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| EngineError::Upload(format!("PNG编码失败: {}", e)))?;
    Ok(buf)
}

/// 上传快照到存储后端
///
/// 以单次请求把data-URI编码的PNG发送到 `POST /save_snapshot`，
/// 失败时不自动重试，由调用方向用户报告。
///
/// # 参数
/// * `client` - HTTP客户端
/// * `endpoint` - 存储后端地址
/// * `png` - PNG图像字节
///
/// # 返回值
/// 返回服务端分配的文件名
///
/// # 错误处理
/// 网络失败或服务端返回非成功状态码时返回 `EngineError::Upload`
pub async fn upload(
    client: &reqwest::Client,
    endpoint: &str,
    png: &[u8],
) -> Result<String, EngineError> {
    let body = SnapshotRequest {
        image: format!("data:image/png;base64,{}", STANDARD.encode(png)),
    };

    let resp = client
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .map_err(|e| EngineError::Upload(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(EngineError::Upload(format!(
            "服务端返回状态码 {}",
            resp.status()
        )));
    }

    let parsed: SnapshotResponse = resp
        .json()
        .await
        .map_err(|e| EngineError::Upload(e.to_string()))?;
    Ok(parsed.filename)
}
