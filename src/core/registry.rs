//! # Component Registry - 지연 초기화 의존성 주입 컨테이너
//!
//! 데이터베이스 커넥션 풀처럼 생성 비용이 크거나 외부 시스템에 연결되는 컴포넌트를
//! **실제로 처음 사용될 때** 한 번만 생성하기 위한 이름 기반 레지스트리입니다.
//! Spring의 `ApplicationContext` + `@Lazy` 조합과 비슷한 역할을 하지만,
//! 전역 싱글톤이 아니라 명시적으로 생성해서 `Arc`로 공유하는 객체입니다.
//!
//! ## 등록 계층
//!
//! 이름 하나마다 [`ComponentSlot`] 하나가 있고, 해석(resolve) 과정에서
//! 왼쪽으로만 상태가 전이됩니다.
//!
//! ```text
//! DeferredRegistrar ──(registrar 실행)──▶ Factory ──(factory 성공)──▶ Instance
//! ```
//!
//! | 계층 | 의미 | 해석 시 동작 |
//! |------|------|--------------|
//! | `Instance` | 이미 만들어진 컴포넌트 | 그대로 반환 (부수효과 없음) |
//! | `Factory` | 컴포넌트를 만드는 함수 | 실행 후 결과를 `Instance`로 캐시, 실패는 캐시하지 않음 |
//! | `DeferredRegistrar` | 팩토리를 등록하는 함수 | 실행 후 같은 이름의 `Factory`로 계속 진행 |
//!
//! 한번 `Factory`나 `Instance`가 된 이름에 registrar가 다시 들어오는 일은 없습니다.
//!
//! ## 동시성
//!
//! Actix 워커는 여러 OS 스레드에서 동시에 `resolve`를 호출할 수 있습니다.
//! 이름별 초기화 뮤텍스로 팩토리 실행 구간을 감싸고, 뮤텍스를 얻은 뒤 인스턴스를
//! 다시 확인(더블 체크)하여 "정확히 한 번 생성"을 보장합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = Arc::new(ComponentRegistry::new());
//!
//! registry.register_factory("database", |_| {
//!     Ok(Arc::new(Database::connect_lazy(settings.clone())?))
//! }, None);
//!
//! // 첫 호출에서만 팩토리가 실행됩니다.
//! let db: Arc<Database> = registry.resolve("database")?;
//! ```

use std::any::{Any, type_name};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures_util::future::BoxFuture;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::errors::{BoxError, RegistryError};

/// 타입이 지워진 컴포넌트 핸들
pub type Component = Arc<dyn Any + Send + Sync>;

/// 컴포넌트 생성 함수. 자신의 의존성을 해석할 수 있도록 레지스트리를 전달받습니다.
pub type FactoryFn = Arc<dyn Fn(&ComponentRegistry) -> Result<Component, BoxError> + Send + Sync>;

/// 팩토리 등록 함수. 실행되면 같은 이름으로 `register_factory`를 호출해야 합니다.
pub type RegistrarFn = Arc<dyn Fn(&ComponentRegistry) + Send + Sync>;

/// 종료 시 실행되는 비동기 정리 함수
pub type CleanupFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// 비동기 클로저를 [`CleanupFn`]으로 감쌉니다.
pub fn cleanup_fn<F, Fut>(f: F) -> CleanupFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// 이름 하나에 대한 등록 상태
#[derive(Clone)]
pub enum ComponentSlot {
    Instance(Component),
    Factory(FactoryFn),
    DeferredRegistrar(RegistrarFn),
}

impl ComponentSlot {
    fn tier(&self) -> &'static str {
        match self {
            ComponentSlot::Instance(_) => "instance",
            ComponentSlot::Factory(_) => "factory",
            ComponentSlot::DeferredRegistrar(_) => "deferred registrar",
        }
    }
}

/// 컴포넌트 메타데이터 항목 (`/health`에 그대로 노출)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEndpoint {
    #[serde(default)]
    pub host: String,
    /// 상태 문자열. 누락되면 `"down"`으로 취급합니다.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "down".to_string()
}

impl ComponentEndpoint {
    pub fn new(host: impl Into<String>, status: impl Into<String>) -> Self {
        Self { host: host.into(), status: status.into() }
    }

    /// 대소문자 구분 없이 `"up"`인지 확인합니다.
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

thread_local! {
    /// 현재 스레드에서 팩토리를 실행 중인 (레지스트리 주소, 이름) 스택
    static RESOLVING: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// 팩토리 실행 구간을 표시하는 가드. drop 시 스택에서 제거됩니다.
struct ResolvingGuard {
    registry: usize,
    name: String,
}

impl ResolvingGuard {
    fn enter(registry: usize, name: &str) -> Result<Self, RegistryError> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.iter().any(|(id, n)| *id == registry && n == name) {
                return Err(RegistryError::CircularDependency { name: name.to_string() });
            }
            stack.push((registry, name.to_string()));
            Ok(Self { registry, name: name.to_string() })
        })
    }
}

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack
                .iter()
                .rposition(|(id, n)| *id == self.registry && *n == self.name)
            {
                stack.remove(pos);
            }
        });
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 이름 기반 지연 초기화 컴포넌트 레지스트리
///
/// # 주요 기능
///
/// - **지연 생성**: 팩토리는 첫 `resolve` 시점에만 실행됩니다.
/// - **한 번만 생성**: 성공한 결과는 캐시되고, 실패는 캐시되지 않아 다음 호출에서 재시도합니다.
/// - **메타데이터**: 인스턴스 유무와 무관하게 `{host, status}` 목록을 보관합니다.
/// - **정리 콜백**: 종료 시 [`cleanup_all`](Self::cleanup_all)로 한 번씩 실행됩니다.
pub struct ComponentRegistry {
    slots: RwLock<HashMap<String, ComponentSlot>>,
    cleanups: Mutex<HashMap<String, CleanupFn>>,
    metadata: RwLock<BTreeMap<String, Vec<ComponentEndpoint>>>,
    /// 이름별 초기화 뮤텍스 (팩토리 실행 구간 직렬화)
    init_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            cleanups: Mutex::new(HashMap::new()),
            metadata: RwLock::new(BTreeMap::new()),
            init_locks: Mutex::new(HashMap::new()),
        }
    }

    /// 팩토리를 등록합니다.
    ///
    /// 기존 팩토리나 대기 중인 registrar는 덮어씁니다(팩토리 덮어쓰기는 경고).
    /// 이미 인스턴스가 만들어진 이름이면 인스턴스를 유지하고 등록을 무시합니다.
    /// 팩토리는 여기서 실행되지 않습니다.
    pub fn register_factory<T, F>(&self, name: impl Into<String>, factory: F, cleanup: Option<CleanupFn>)
    where
        T: Any + Send + Sync,
        F: Fn(&ComponentRegistry) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move |registry| factory(registry).map(|c| c as Component));
        self.register_factory_fn(name.into(), factory, cleanup);
    }

    /// 타입이 지워진 팩토리를 등록합니다. [`register_factory`](Self::register_factory) 참고.
    pub fn register_factory_fn(&self, name: String, factory: FactoryFn, cleanup: Option<CleanupFn>) {
        {
            let mut slots = write(&self.slots);
            match slots.get(&name) {
                Some(ComponentSlot::Instance(_)) => {
                    warn!(component = name.as_str(); "Component already instantiated, ignoring factory registration");
                    return;
                }
                Some(ComponentSlot::Factory(_)) => {
                    warn!(component = name.as_str(); "Overwriting existing factory");
                }
                _ => {}
            }
            slots.insert(name.clone(), ComponentSlot::Factory(factory));
        }

        if let Some(cleanup) = cleanup {
            lock(&self.cleanups).insert(name.clone(), cleanup);
        }
        debug!(component = name.as_str(); "Registered factory");
    }

    /// 지연 등록 함수를 등록합니다.
    ///
    /// 경고 없이 저장합니다. 이미 팩토리나 인스턴스가 있는 이름이면 무시합니다.
    pub fn register_deferred<F>(&self, name: impl Into<String>, registrar: F)
    where
        F: Fn(&ComponentRegistry) + Send + Sync + 'static,
    {
        let name = name.into();
        let mut slots = write(&self.slots);
        if let Some(slot @ (ComponentSlot::Instance(_) | ComponentSlot::Factory(_))) = slots.get(&name) {
            debug!(component = name.as_str(), tier = slot.tier(); "Skipping deferred registrar");
            return;
        }
        slots.insert(name, ComponentSlot::DeferredRegistrar(Arc::new(registrar)));
    }

    /// 미리 만들어진 인스턴스를 등록합니다. 기존 항목을 덮어쓰면 경고를 남깁니다.
    pub fn register_instance<T>(&self, name: impl Into<String>, instance: Arc<T>, cleanup: Option<CleanupFn>)
    where
        T: Any + Send + Sync,
    {
        let name = name.into();
        {
            let mut slots = write(&self.slots);
            if let Some(previous) = slots.get(&name) {
                warn!(component = name.as_str(), previous = previous.tier(); "Overwriting existing component with instance");
            }
            slots.insert(name.clone(), ComponentSlot::Instance(instance as Component));
        }

        if let Some(cleanup) = cleanup {
            lock(&self.cleanups).insert(name, cleanup);
        }
    }

    /// 이름으로 컴포넌트를 해석하고 `T`로 다운캐스트합니다.
    ///
    /// ## 처리 과정
    ///
    /// 1. 인스턴스가 있으면 그대로 반환
    /// 2. 팩토리가 있으면 실행하고 성공 시 캐시 (실패는 `Initialization`, 캐시 안 함)
    /// 3. registrar가 있으면 실행한 뒤 새로 등록된 팩토리로 2단계 진행
    ///    (등록하지 않았으면 `RegistrationInvariant`)
    /// 4. 어디에도 없으면 `NotFound` (모든 계층의 이름 목록 포함)
    pub fn resolve<T>(&self, name: &str) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        self.resolve_component(name)?
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// 타입을 지정하지 않고 컴포넌트를 해석합니다.
    pub fn resolve_component(&self, name: &str) -> Result<Component, RegistryError> {
        if let Some(instance) = self.cached_instance(name) {
            return Ok(instance);
        }

        // 같은 스레드에서 재귀적으로 같은 이름을 해석하면 아래 뮤텍스에서 교착되므로 먼저 검사
        let _resolving = ResolvingGuard::enter(self as *const Self as usize, name)?;

        let init_lock = self.init_lock(name);
        let _init = lock(&init_lock);

        let factory = match self.slot(name) {
            Some(ComponentSlot::Instance(instance)) => return Ok(instance),
            Some(ComponentSlot::Factory(factory)) => factory,
            Some(ComponentSlot::DeferredRegistrar(registrar)) => {
                debug!(component = name; "Running deferred registrar");
                registrar(self);
                match self.slot(name) {
                    Some(ComponentSlot::Factory(factory)) => factory,
                    Some(ComponentSlot::Instance(instance)) => return Ok(instance),
                    _ => {
                        return Err(RegistryError::RegistrationInvariant { name: name.to_string() });
                    }
                }
            }
            None => return Err(self.not_found(name)),
        };

        let instance = factory(self).map_err(|source| {
            error!(component = name, error:% = source; "Component initialization failed");
            RegistryError::Initialization { name: name.to_string(), source }
        })?;

        write(&self.slots).insert(name.to_string(), ComponentSlot::Instance(instance.clone()));
        info!(component = name; "Component initialized");
        Ok(instance)
    }

    /// 세 계층 중 어디에든 이름이 있으면 `true`
    pub fn has(&self, name: &str) -> bool {
        read(&self.slots).contains_key(name)
    }

    /// 메타데이터 목록을 저장합니다 (덮어쓰기).
    pub fn set_metadata(&self, name: impl Into<String>, endpoints: Vec<ComponentEndpoint>) {
        write(&self.metadata).insert(name.into(), endpoints);
    }

    /// 메타데이터 전체의 복사본을 반환합니다.
    pub fn metadata(&self) -> BTreeMap<String, Vec<ComponentEndpoint>> {
        read(&self.metadata).clone()
    }

    /// `host`가 일치하는 메타데이터 항목의 상태를 바꿉니다.
    /// 바뀐 항목이 하나라도 있으면 `true`를 반환합니다.
    pub fn update_status(&self, name: &str, host: &str, status: &str) -> bool {
        let mut metadata = write(&self.metadata);
        let Some(endpoints) = metadata.get_mut(name) else {
            return false;
        };

        let mut updated = false;
        for endpoint in endpoints.iter_mut().filter(|e| e.host == host) {
            endpoint.status = status.to_string();
            updated = true;
        }
        updated
    }

    /// 등록된 모든 정리 콜백을 한 번씩 실행합니다.
    ///
    /// 콜백은 실행 전에 레지스트리에서 제거되므로 두 번 호출해도 다시 실행되지 않습니다.
    /// 한 콜백의 실패는 로그만 남기고 나머지 콜백 실행을 막지 않습니다.
    /// 실패한 콜백 수를 반환합니다.
    pub async fn cleanup_all(&self) -> usize {
        let cleanups: Vec<(String, CleanupFn)> = lock(&self.cleanups).drain().collect();
        let mut failures = 0;

        for (name, cleanup) in cleanups {
            info!(component = name.as_str(); "Cleaning up component");
            match cleanup().await {
                Ok(()) => debug!(component = name.as_str(); "Cleanup finished"),
                Err(e) => {
                    failures += 1;
                    error!(component = name.as_str(), error:% = e; "Cleanup failed");
                }
            }
        }
        failures
    }

    /// 정리 콜백을 실행한 뒤 레지스트리를 비웁니다.
    pub async fn shutdown(&self) {
        let failures = self.cleanup_all().await;
        self.clear();
        info!(failures = failures; "Component registry shut down");
    }

    /// 모든 맵을 비웁니다. 정리 콜백은 실행하지 않습니다 (테스트용 초기화).
    pub fn clear(&self) {
        write(&self.slots).clear();
        lock(&self.cleanups).clear();
        write(&self.metadata).clear();
        lock(&self.init_locks).clear();
    }

    /// 이미 생성된 컴포넌트 이름 목록
    pub fn initialized_names(&self) -> Vec<String> {
        self.names_where(|slot| matches!(slot, ComponentSlot::Instance(_)))
    }

    /// 아직 실행되지 않은 팩토리 이름 목록
    pub fn pending_factories(&self) -> Vec<String> {
        self.names_where(|slot| matches!(slot, ComponentSlot::Factory(_)))
    }

    /// 아직 실행되지 않은 registrar 이름 목록
    pub fn pending_registrars(&self) -> Vec<String> {
        self.names_where(|slot| matches!(slot, ComponentSlot::DeferredRegistrar(_)))
    }

    fn names_where(&self, predicate: impl Fn(&ComponentSlot) -> bool) -> Vec<String> {
        let names: BTreeSet<String> = read(&self.slots)
            .iter()
            .filter(|(_, slot)| predicate(slot))
            .map(|(name, _)| name.clone())
            .collect();
        names.into_iter().collect()
    }

    fn slot(&self, name: &str) -> Option<ComponentSlot> {
        read(&self.slots).get(name).cloned()
    }

    fn cached_instance(&self, name: &str) -> Option<Component> {
        match read(&self.slots).get(name) {
            Some(ComponentSlot::Instance(instance)) => Some(instance.clone()),
            _ => None,
        }
    }

    fn init_lock(&self, name: &str) -> Arc<Mutex<()>> {
        lock(&self.init_locks)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn not_found(&self, name: &str) -> RegistryError {
        let available: BTreeSet<String> = read(&self.slots).keys().cloned().collect();
        RegistryError::NotFound {
            name: name.to_string(),
            available: available.into_iter().collect(),
        }
    }
}
