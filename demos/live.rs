use persight::{live_monitor, QualityProfile};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Persight 实时检测示例");
    println!("=====================");

    // 加载均衡档位的分割模型
    let mut monitor = live_monitor(QualityProfile::Balanced).await?;

    // 打开摄像头并启动检测循环
    monitor.start().await?;
    println!("检测循环已启动，运行5秒...");

    for _ in 0..5 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        if let Some(bounds) = monitor.read_bounds() {
            println!("检测到 {} 个目标: {:?}", bounds.len(), bounds);
        } else {
            println!("当前帧未检测到人");
        }
    }

    monitor.stop().await;
    println!("检测循环已停止");
    Ok(())
}
