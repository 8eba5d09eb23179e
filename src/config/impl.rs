use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;
use std::sync::OnceLock;

use super::{AppConfig, RESERVED_PUBLIC_PREFIXES, UploadConfig};
use crate::utils::file_naming::public_dir_prefix;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("LOVEYMOJI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers.max(1));
        }

        app_config.upload.validate()?;

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

impl UploadConfig {
    /// 以指定目录构造上传配置，大小上限使用默认值
    pub fn with_dir(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// 上传文件在磁盘上的目录
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }

    /// 对外访问已上传文件的 URL 前缀，例如 `public/uploads` 对应 `/uploads`
    pub fn public_prefix(&self) -> String {
        public_dir_prefix(&self.dir)
    }

    /// 校验上传目录对应的公开路径不会被已有路由遮挡
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = self.public_prefix();
        let reserved = RESERVED_PUBLIC_PREFIXES.iter().find(|reserved| {
            prefix == **reserved
                || prefix
                    .strip_prefix(**reserved)
                    .is_some_and(|rest| rest.starts_with('/'))
        });

        match reserved {
            Some(reserved) => Err(ConfigError::Message(format!(
                "upload.dir '{}' would be served under '{}', which is reserved for '{}'",
                self.dir, prefix, reserved
            ))),
            None => Ok(()),
        }
    }
}
