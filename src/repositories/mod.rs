//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리포지토리는 레지스트리에서 얻은 [`Database`](crate::db::Database) 풀을 감싸며,
//! 서비스 계층에는 trait 객체로 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{MySqlUserRepository, UserRepository};
//!
//! let database: Arc<Database> = registry.resolve("database")?;
//! let repo: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(database));
//! let users = repo.find_all().await?;
//! ```

pub mod users;
