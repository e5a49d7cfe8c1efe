use std::sync::Arc;

use futures::future::{FutureExt, Shared};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use super::MapProvider;
use crate::error::FacilityMapError;

#[cfg(not(target_arch = "wasm32"))]
type LoadFuture = futures::future::BoxFuture<'static, Result<(), LoadFailure>>;
#[cfg(target_arch = "wasm32")]
type LoadFuture = futures::future::LocalBoxFuture<'static, Result<(), LoadFailure>>;

/// Loading state of a map provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    /// Loading has not started yet.
    Idle,
    /// The script is being loaded or the provider is being initialized.
    Loading,
    /// The provider can be used to render the map.
    Ready,
    /// Loading failed. Use [`ProviderBootstrap::retry`] to try again.
    Failed(LoadFailure),
}

/// Step of the provider loading that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    /// The script could not be fetched or executed.
    #[error("failed to load map provider: {0}")]
    Script(String),
    /// The script was loaded, but the SDK initialization failed.
    #[error("failed to initialize map provider: {0}")]
    Init(String),
}

impl LoadFailure {
    fn script(err: FacilityMapError) -> Self {
        match err {
            FacilityMapError::ProviderLoad(message) => Self::Script(message),
            other => Self::Script(other.to_string()),
        }
    }

    fn init(err: FacilityMapError) -> Self {
        match err {
            FacilityMapError::ProviderInit(message) => Self::Init(message),
            other => Self::Init(other.to_string()),
        }
    }
}

impl From<LoadFailure> for FacilityMapError {
    fn from(value: LoadFailure) -> Self {
        match value {
            LoadFailure::Script(message) => Self::ProviderLoad(message),
            LoadFailure::Init(message) => Self::ProviderInit(message),
        }
    }
}

enum LoadStep {
    Settled(Result<(), FacilityMapError>),
    Wait(Shared<LoadFuture>),
}

/// Makes sure a [`MapProvider`] is loaded exactly once.
///
/// The bootstrap can be shared between several map components on the same page. Whichever calls
/// [`ProviderBootstrap::load`] first starts loading the provider; the others join the same load
/// and get the same result. The load belongs to the bootstrap, not to the caller that started
/// it, so a caller that gives up waiting does not cancel it for the others.
pub struct ProviderBootstrap<P> {
    provider: Arc<P>,
    state: RwLock<BootstrapState>,
    in_flight: Mutex<Option<Shared<LoadFuture>>>,
}

impl<P: MapProvider> ProviderBootstrap<P> {
    /// Creates a new bootstrap for the provider. Loading starts on the first
    /// [`ProviderBootstrap::load`] call.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            state: RwLock::new(BootstrapState::Idle),
            in_flight: Mutex::new(None),
        }
    }

    /// The provider.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Current loading state.
    pub fn state(&self) -> BootstrapState {
        self.state.read().clone()
    }

    /// Returns true if the provider is ready to render.
    pub fn is_ready(&self) -> bool {
        *self.state.read() == BootstrapState::Ready
    }

    /// Loads the provider if it is not loaded yet.
    ///
    /// If the provider reports it is already loaded, completes immediately without loading the
    /// script. A failed load is not retried by this method: it returns the stored error until
    /// [`ProviderBootstrap::retry`] is called.
    ///
    /// Dropping the returned future before it completes (e.g. when the component is unmounted)
    /// leaves the load in flight. The next call continues it instead of loading the script again.
    pub async fn load(&self) -> Result<(), FacilityMapError> {
        if let Some(result) = self.settled() {
            return result;
        }

        let load = match self.join_load() {
            LoadStep::Settled(result) => return result,
            LoadStep::Wait(load) => load,
        };

        let result = load.clone().await;
        self.finish(&load, &result);

        result.map_err(FacilityMapError::from)
    }

    /// Clears a failed state and loads the provider again.
    pub async fn retry(&self) -> Result<(), FacilityMapError> {
        {
            let mut state = self.state.write();
            if let BootstrapState::Failed(_) = *state {
                log::info!("Retrying map provider load");
                *state = BootstrapState::Idle;
            }
        }

        self.load().await
    }

    fn settled(&self) -> Option<Result<(), FacilityMapError>> {
        match &*self.state.read() {
            BootstrapState::Ready => Some(Ok(())),
            BootstrapState::Failed(failure) => Some(Err(failure.clone().into())),
            BootstrapState::Idle | BootstrapState::Loading => None,
        }
    }

    fn join_load(&self) -> LoadStep {
        let mut in_flight = self.in_flight.lock();
        if let Some(load) = &*in_flight {
            log::debug!("Joining map provider load in flight");
            return LoadStep::Wait(load.clone());
        }

        // Another caller may have finished the load since the last check.
        if let Some(result) = self.settled() {
            return LoadStep::Settled(result);
        }

        if self.provider.is_loaded() {
            log::info!("Map provider is already loaded");
            *self.state.write() = BootstrapState::Ready;
            return LoadStep::Settled(Ok(()));
        }

        log::info!("Loading map provider");
        *self.state.write() = BootstrapState::Loading;

        let provider = self.provider.clone();
        let load = async move {
            provider.load_script().await.map_err(LoadFailure::script)?;
            provider.initialize().await.map_err(LoadFailure::init)
        };

        #[cfg(not(target_arch = "wasm32"))]
        let load: LoadFuture = load.boxed();
        #[cfg(target_arch = "wasm32")]
        let load: LoadFuture = load.boxed_local();

        let load = load.shared();
        *in_flight = Some(load.clone());

        LoadStep::Wait(load)
    }

    fn finish(&self, load: &Shared<LoadFuture>, result: &Result<(), LoadFailure>) {
        let mut in_flight = self.in_flight.lock();
        if !in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(load))
        {
            // Settled by another caller of the same load.
            return;
        }

        *in_flight = None;
        match result {
            Ok(()) => {
                log::info!("Map provider is ready");
                *self.state.write() = BootstrapState::Ready;
            }
            Err(failure) => {
                log::warn!("Map provider failed to load: {failure}");
                *self.state.write() = BootstrapState::Failed(failure.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use futures::FutureExt;

    use super::*;
    use crate::tests::{LoadBehavior, TestProvider};

    fn bootstrap(behavior: LoadBehavior) -> ProviderBootstrap<TestProvider> {
        ProviderBootstrap::new(Arc::new(TestProvider::new(behavior)))
    }

    #[test]
    fn starts_idle() {
        let bootstrap = bootstrap(LoadBehavior::Succeeds);
        assert_eq!(bootstrap.state(), BootstrapState::Idle);
        assert!(!bootstrap.is_ready());
    }

    #[test]
    fn already_loaded_provider_skips_script() {
        let bootstrap = bootstrap(LoadBehavior::AlreadyLoaded);
        tokio_test::block_on(bootstrap.load()).unwrap();

        assert!(bootstrap.is_ready());
        assert_eq!(bootstrap.provider().script_loads(), 0);
        assert_eq!(bootstrap.provider().initializations(), 0);
    }

    #[test]
    fn loads_script_then_initializes() {
        let bootstrap = bootstrap(LoadBehavior::Succeeds);
        tokio_test::block_on(bootstrap.load()).unwrap();

        assert_eq!(bootstrap.state(), BootstrapState::Ready);
        assert_eq!(bootstrap.provider().script_loads(), 1);
        assert_eq!(bootstrap.provider().initializations(), 1);
    }

    #[test]
    fn repeated_load_is_idempotent() {
        let bootstrap = bootstrap(LoadBehavior::Succeeds);
        tokio_test::block_on(async {
            bootstrap.load().await.unwrap();
            bootstrap.load().await.unwrap();
        });

        assert_eq!(bootstrap.provider().script_loads(), 1);
    }

    #[test]
    fn concurrent_loads_share_one_script_load() {
        let bootstrap = bootstrap(LoadBehavior::Succeeds);
        let (first, second) =
            tokio_test::block_on(futures::future::join(bootstrap.load(), bootstrap.load()));

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(bootstrap.provider().script_loads(), 1);
    }

    #[test]
    fn script_failure_is_reported_and_kept() {
        let bootstrap = bootstrap(LoadBehavior::ScriptFails);
        let result = tokio_test::block_on(bootstrap.load());

        assert_matches!(result, Err(FacilityMapError::ProviderLoad(_)));
        assert_matches!(bootstrap.state(), BootstrapState::Failed(_));
        assert_eq!(bootstrap.provider().initializations(), 0);

        let result = tokio_test::block_on(bootstrap.load());
        assert_matches!(result, Err(FacilityMapError::ProviderLoad(_)));
        assert_eq!(bootstrap.provider().script_loads(), 1);
    }

    #[test]
    fn init_failure_is_reported_and_kept() {
        let bootstrap = bootstrap(LoadBehavior::InitFails);
        let result = tokio_test::block_on(bootstrap.load());

        assert_matches!(result, Err(FacilityMapError::ProviderInit(_)));
        assert_eq!(
            bootstrap.state(),
            BootstrapState::Failed(LoadFailure::Init("sdk is not responding".into()))
        );

        let result = tokio_test::block_on(bootstrap.load());
        assert_matches!(
            result,
            Err(FacilityMapError::ProviderInit(message)) if message == "sdk is not responding"
        );
        assert_eq!(bootstrap.provider().initializations(), 1);
    }

    #[test]
    fn retry_loads_again_after_failure() {
        let bootstrap = bootstrap(LoadBehavior::ScriptFails);
        assert!(tokio_test::block_on(bootstrap.load()).is_err());

        bootstrap.provider().set_behavior(LoadBehavior::Succeeds);
        tokio_test::block_on(bootstrap.retry()).unwrap();

        assert!(bootstrap.is_ready());
        assert_eq!(bootstrap.provider().script_loads(), 2);
    }

    #[test]
    fn pending_load_stays_loading() {
        let bootstrap = bootstrap(LoadBehavior::NeverCompletes);
        let mut load = Box::pin(bootstrap.load());

        assert!(load.as_mut().now_or_never().is_none());
        assert_eq!(bootstrap.state(), BootstrapState::Loading);
    }

    #[test]
    fn dropped_load_is_continued_by_next_caller() {
        let bootstrap = bootstrap(LoadBehavior::NeverCompletes);
        {
            let mut load = Box::pin(bootstrap.load());
            assert!(load.as_mut().now_or_never().is_none());
        }
        assert_eq!(bootstrap.state(), BootstrapState::Loading);

        let mut load = Box::pin(bootstrap.load());
        assert!(load.as_mut().now_or_never().is_none());
        assert_eq!(bootstrap.provider().script_loads(), 1);
    }

    #[test]
    fn waiter_keeps_load_after_starter_is_dropped() {
        let bootstrap = bootstrap(LoadBehavior::NeverCompletes);
        let mut waiter = Box::pin(bootstrap.load());
        {
            let mut starter = Box::pin(bootstrap.load());
            assert!(starter.as_mut().now_or_never().is_none());
            assert!(waiter.as_mut().now_or_never().is_none());
        }

        assert!(waiter.as_mut().now_or_never().is_none());
        assert_eq!(bootstrap.provider().script_loads(), 1);
        assert_eq!(bootstrap.state(), BootstrapState::Loading);
    }
}
