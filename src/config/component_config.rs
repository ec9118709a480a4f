//! 컴포넌트 등록 설정
//!
//! 설정 파일의 `COMPONENTS` 항목을 읽어 레지스트리에 메타데이터와 지연 등록 함수를 채웁니다.
//! 이 단계에서는 어떤 외부 연결도 열지 않습니다.
//!
//! ```json
//! {
//!   "COMPONENTS": {
//!     "mysql": [{"host": "127.0.0.1:3306", "status": "up"}]
//!   }
//! }
//! ```
//!
//! | 컴포넌트 이름 | 등록되는 레지스트리 이름 |
//! |---------------|--------------------------|
//! | `mysql`, `database`, `db` | `"database"` |
//! | 그 외 | 경고 후 건너뜀 |

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use log::{info, warn};

use crate::config::AppConfig;
use crate::core::errors::BoxError;
use crate::core::registry::{ComponentEndpoint, ComponentRegistry, cleanup_fn};
use crate::db::{DATABASE_COMPONENT, Database, DatabaseSettings};
use crate::services::users::{USER_SERVICE_COMPONENT, UserService};

/// 데이터베이스로 취급하는 컴포넌트 이름
const DATABASE_COMPONENT_NAMES: [&str; 3] = ["mysql", "database", "db"];

/// 설정의 컴포넌트 목록을 레지스트리에 등록합니다.
///
/// 모든 컴포넌트의 메타데이터는 상태와 관계없이 저장되어 `/health`에 노출됩니다.
/// `"up"` 항목이 하나도 없는 컴포넌트는 등록하지 않습니다.
pub fn register_components_from_config(
    registry: &ComponentRegistry,
    config: &AppConfig,
    components: &BTreeMap<String, Vec<ComponentEndpoint>>,
) {
    for (component_name, endpoints) in components {
        registry.set_metadata(component_name.clone(), endpoints.clone());

        if !endpoints.iter().any(ComponentEndpoint::is_up) {
            info!(component = component_name.as_str(); "Skipping component, no endpoint is up");
            continue;
        }

        let component_type = component_name.to_ascii_lowercase();
        if DATABASE_COMPONENT_NAMES.contains(&component_type.as_str()) {
            let Some(first) = endpoints.first() else {
                continue;
            };
            register_database(registry, config, component_name, &first.host);
        } else {
            warn!(component = component_name.as_str(); "Unknown component type, skipping registration");
        }
    }
}

/// `"database"` 이름으로 지연 등록 함수를 등록합니다.
///
/// 등록 함수가 실행되면 커넥션 풀 팩토리와 풀을 닫는 정리 콜백을 등록합니다.
/// 풀이 한 번도 만들어지지 않았다면 정리 콜백은 아무것도 하지 않습니다.
fn register_database(registry: &ComponentRegistry, config: &AppConfig, component_name: &str, host: &str) {
    let settings = DatabaseSettings::from_config(config).with_endpoint(host);
    let component_name = component_name.to_string();
    let host = host.to_string();

    registry.register_deferred(DATABASE_COMPONENT, move |registry| {
        let created: Arc<OnceLock<Arc<Database>>> = Arc::new(OnceLock::new());

        let factory_slot = created.clone();
        let settings = settings.clone();
        let component_name = component_name.clone();
        let host = host.clone();
        let factory = move |registry: &ComponentRegistry| -> Result<Arc<Database>, BoxError> {
            let database = Arc::new(Database::connect_lazy(settings.clone()));
            let _ = factory_slot.set(database.clone());
            registry.update_status(&component_name, &host, "up");
            Ok(database)
        };

        let cleanup = cleanup_fn(move || {
            let created = created.clone();
            async move {
                if let Some(database) = created.get() {
                    database.close().await;
                }
                Ok::<(), BoxError>(())
            }
        });

        registry.register_factory(DATABASE_COMPONENT, factory, Some(cleanup));
    });
}

/// 애플리케이션 컴포넌트를 모두 등록합니다.
///
/// `COMPONENTS` 설정이 없으면 `DB_HOST:DB_PORT`의 MySQL 하나를 사용하고,
/// `"user_service"` 팩토리도 함께 등록합니다.
pub fn register_all(registry: &ComponentRegistry, config: &AppConfig) {
    let components = config.components_or_default();
    register_components_from_config(registry, config, &components);

    registry.register_factory(
        USER_SERVICE_COMPONENT,
        |registry| UserService::from_registry(registry).map(Arc::new).map_err(BoxError::from),
        None,
    );

    info!(
        pending_registrars:serde = registry.pending_registrars(),
        pending_factories:serde = registry.pending_factories();
        "Components registered"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(json: &str) -> BTreeMap<String, Vec<ComponentEndpoint>> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_down_component_keeps_metadata_only() {
        let registry = ComponentRegistry::new();
        let config = AppConfig::default();

        register_components_from_config(
            &registry,
            &config,
            &components(r#"{"mysql": [{"host": "127.0.0.1:3306", "status": "down"}]}"#),
        );

        assert!(!registry.has(DATABASE_COMPONENT));
        assert_eq!(
            registry.metadata()["mysql"],
            vec![ComponentEndpoint::new("127.0.0.1:3306", "down")]
        );
    }

    #[test]
    fn test_missing_status_counts_as_down() {
        let registry = ComponentRegistry::new();

        register_components_from_config(
            &registry,
            &AppConfig::default(),
            &components(r#"{"db": [{"host": "127.0.0.1"}]}"#),
        );

        assert!(!registry.has(DATABASE_COMPONENT));
        assert_eq!(registry.metadata()["db"][0].status, "down");
    }

    #[test]
    fn test_up_database_registers_deferred_only() {
        let registry = ComponentRegistry::new();

        register_components_from_config(
            &registry,
            &AppConfig::default(),
            &components(r#"{"MySQL": [{"host": "127.0.0.1:3307", "status": "UP"}]}"#),
        );

        assert_eq!(registry.pending_registrars(), vec![DATABASE_COMPONENT.to_string()]);
        assert!(registry.initialized_names().is_empty());
    }

    #[test]
    fn test_unknown_component_is_skipped() {
        let registry = ComponentRegistry::new();

        register_components_from_config(
            &registry,
            &AppConfig::default(),
            &components(r#"{"redis": [{"host": "127.0.0.1:6379", "status": "up"}]}"#),
        );

        assert!(!registry.has("redis"));
        assert!(registry.pending_registrars().is_empty());
        assert!(registry.metadata().contains_key("redis"));
    }

    #[actix_web::test]
    async fn test_resolving_database_creates_pool_and_marks_up() {
        let registry = ComponentRegistry::new();
        let config = AppConfig::default();
        register_components_from_config(
            &registry,
            &config,
            &components(r#"{"mysql": [{"host": "127.0.0.1:3307", "status": "up"}, {"host": "10.0.0.9", "status": "down"}]}"#),
        );

        let database: Arc<Database> = registry.resolve(DATABASE_COMPONENT).unwrap();

        assert_eq!(database.settings().port, 3307);
        assert_eq!(database.pool().size(), 0);
        assert_eq!(registry.initialized_names(), vec![DATABASE_COMPONENT.to_string()]);
        assert_eq!(registry.metadata()["mysql"][1].status, "down");
        assert_eq!(registry.cleanup_all().await, 0);
        assert!(database.pool().is_closed());
    }

    #[actix_web::test]
    async fn test_cleanup_without_pool_is_noop() {
        let registry = ComponentRegistry::new();
        register_all(&registry, &AppConfig::default());

        assert_eq!(registry.pending_factories(), vec![USER_SERVICE_COMPONENT.to_string()]);
        assert_eq!(registry.pending_registrars(), vec![DATABASE_COMPONENT.to_string()]);
        assert_eq!(registry.cleanup_all().await, 0);
    }

    #[actix_web::test]
    async fn test_user_service_resolves_database_lazily() {
        let registry = ComponentRegistry::new();
        register_all(&registry, &AppConfig::default());

        let _service: Arc<UserService> = registry.resolve(USER_SERVICE_COMPONENT).unwrap();

        assert_eq!(
            registry.initialized_names(),
            vec![DATABASE_COMPONENT.to_string(), USER_SERVICE_COMPONENT.to_string()]
        );
    }
}
