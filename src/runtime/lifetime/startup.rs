use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化成绩册示例数据
/// 如果数据库中没有任何学生，则写入内置的学生与成绩数据集
async fn seed_gradebook(storage: &Arc<dyn Storage>) {
    match storage.count_students().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} student(s), skipping gradebook seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No students found in database, seeding gradebook dataset...");
        }
        Err(e) => {
            warn!("Failed to count students: {}, skipping gradebook seed", e);
            return;
        }
    }

    match storage.seed_gradebook().await {
        Ok(true) => info!("Gradebook dataset seeded successfully"),
        Ok(false) => debug!("Gradebook dataset already present, nothing to do"),
        Err(e) => warn!("Failed to seed gradebook dataset: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化与示例数据写入
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 写入成绩册示例数据（如果需要）
    seed_gradebook(&storage).await;

    StartupContext { storage }
}
