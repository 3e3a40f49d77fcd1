//! 日志基础设施

use std::io;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// - 按日期分割的文件日志，写入 `log_path/file_prefix.yyyy-mm-dd`
    /// - `console_output` 为真时同时输出到控制台
    /// - 设置了 `RUST_LOG` 时以其为准，否则使用配置中的级别
    ///
    /// 返回的 guard 必须在进程存活期间持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
        std::fs::create_dir_all(&config.log_path)?;

        let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

        let console = config
            .console_output
            .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                // 文件中不使用颜色
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_names(true),
            )
            .with(console)
            .try_init()?;

        Ok(guard)
    }
}
