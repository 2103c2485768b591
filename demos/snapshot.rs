use persight::config::SNAPSHOT_ENDPOINT;
use persight::{live_monitor, QualityProfile};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Persight 快照上传示例");
    println!("=====================");

    let mut monitor = live_monitor(QualityProfile::Fast).await?;
    monitor.start().await?;

    // 等待几个检测周期完成绘制
    tokio::time::sleep(Duration::from_secs(2)).await;

    // 合成当前视频帧与覆盖层并上传
    match monitor.snapshot(SNAPSHOT_ENDPOINT).await {
        Ok(filename) => println!("快照已保存: {}", filename),
        Err(e) => eprintln!("{}", e),
    }

    monitor.stop().await;
    Ok(())
}
