//! Hardware back-button routing
//!
//! Telegram exposes a single hardware back button; the logical "previous
//! screen" rarely matches the browser history. A process-wide router owns
//! the one event subscription: page-local handlers form an explicit stack
//! (push on mount, pop on drop), and when the stack is empty an ordered
//! route table decides. Exactly one handler is consulted per press.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use crate::routes::Route;
use crate::telegram::{OutgoingEvent, TelegramBridge};

/// What a back press should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackAction {
    /// Navigate to an explicit destination
    Navigate(Route),
    /// Go back one browser-history entry
    HistoryBack,
    /// Ask the buyer to confirm cancelling the order on step 1;
    /// confirmation cancels the order and returns to the catalog
    ConfirmCancelOrder { order_id: Uuid },
    /// Stay on the current screen
    Stay,
}

/// Router navigation state carried alongside the pathname
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Set when the catalog was reached from a product detail page
    pub from_product_detail: bool,
}

type BackHandler = Arc<dyn Fn() -> BackAction + Send + Sync>;

struct RouterInner {
    handlers: Vec<(u64, BackHandler)>,
    path: String,
    route: Option<Route>,
    state: NavState,
}

/// Singleton back-button router, mounted once at the app root
pub struct BackRouter<B: TelegramBridge> {
    bridge: Arc<B>,
    inner: Arc<Mutex<RouterInner>>,
    next_id: AtomicU64,
}

impl<B: TelegramBridge> BackRouter<B> {
    pub fn new(bridge: Arc<B>) -> Self {
        let router = Self {
            bridge,
            inner: Arc::new(Mutex::new(RouterInner {
                handlers: Vec::new(),
                path: "/".to_string(),
                route: Some(Route::Root),
                state: NavState::default(),
            })),
            next_id: AtomicU64::new(0),
        };
        router.announce_visibility("/");
        router
    }

    /// Record a location change and re-announce button visibility.
    ///
    /// The button is hidden only on the root route.
    pub fn on_location_change(&self, path: &str, state: NavState) {
        {
            let mut inner = self.inner.lock().expect("router poisoned");
            inner.path = path.to_string();
            inner.route = Route::parse(path);
            inner.state = state;
        }
        self.announce_visibility(path);
    }

    fn announce_visibility(&self, path: &str) {
        self.bridge.post_event(OutgoingEvent::SetupBackButton {
            is_visible: path != "/",
        });
    }

    /// Push a page-local handler; it takes priority until the guard drops
    pub fn push_handler(
        &self,
        handler: impl Fn() -> BackAction + Send + Sync + 'static,
    ) -> HandlerGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .lock()
            .expect("router poisoned")
            .handlers
            .push((id, Arc::new(handler)));
        HandlerGuard {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Resolve one hardware back press.
    ///
    /// The top handler is invoked with the router lock released, so handlers
    /// are free to call back into the router.
    pub fn handle_press(&self) -> BackAction {
        let top = self
            .inner
            .lock()
            .expect("router poisoned")
            .handlers
            .last()
            .map(|(_, handler)| Arc::clone(handler));
        if let Some(handler) = top {
            return handler();
        }

        let inner = self.inner.lock().expect("router poisoned");
        let action = match &inner.route {
            Some(route) => resolve(route, &inner.state),
            None => BackAction::HistoryBack,
        };
        debug!(path = %inner.path, ?action, "back press resolved");
        action
    }
}

/// Guard that removes a page-local handler when the page unmounts
pub struct HandlerGuard {
    inner: Arc<Mutex<RouterInner>>,
    id: u64,
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// The global back-destination table; first match wins
pub fn resolve(route: &Route, state: &NavState) -> BackAction {
    use BackAction::*;

    match route {
        Route::MyOrders => Navigate(Route::Root),
        Route::SellerReports => Navigate(Route::SellerCabinet),
        Route::ProductStep1 { order_id } => ConfirmCancelOrder {
            order_id: *order_id,
        },
        Route::Catalog if state.from_product_detail => HistoryBack,
        Route::Catalog | Route::About => Navigate(Route::Root),
        Route::ProductDetail { .. } => Navigate(Route::Catalog),
        Route::Requirements | Route::Question => Navigate(Route::About),
        Route::Moderator => Navigate(Route::Root),
        Route::ModeratorUsers | Route::ModeratorProducts | Route::ModeratorPushes => {
            Navigate(Route::Moderator)
        }
        Route::PushNew => Navigate(Route::ModeratorPushes),
        Route::PushEdit { push_id } => Navigate(Route::PushDetail { push_id: *push_id }),
        Route::PushDetail { .. } => Navigate(Route::ModeratorPushes),
        Route::ProductSeller { .. } => Navigate(Route::MyProducts),
        _ => HistoryBack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingBridge {
        events: Mutex<Vec<OutgoingEvent>>,
    }

    impl RecordingBridge {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        fn last_visibility(&self) -> Option<bool> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find_map(|event| match event {
                    OutgoingEvent::SetupBackButton { is_visible } => Some(*is_visible),
                    _ => None,
                })
        }
    }

    impl TelegramBridge for RecordingBridge {
        fn post_event(&self, event: OutgoingEvent) {
            self.events.lock().unwrap().push(event);
        }

        async fn init_data(&self) -> Result<String, common::error::AuthError> {
            Ok(String::new())
        }
    }

    fn uuid() -> Uuid {
        Uuid::parse_str("6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e6f").unwrap()
    }

    fn router() -> (Arc<RecordingBridge>, BackRouter<RecordingBridge>) {
        let bridge = Arc::new(RecordingBridge::new());
        let router = BackRouter::new(Arc::clone(&bridge));
        (bridge, router)
    }

    #[test]
    fn button_hidden_only_on_root() {
        let (bridge, router) = router();
        assert_eq!(bridge.last_visibility(), Some(false));

        router.on_location_change("/catalog", NavState::default());
        assert_eq!(bridge.last_visibility(), Some(true));

        router.on_location_change("/", NavState::default());
        assert_eq!(bridge.last_visibility(), Some(false));
    }

    #[test]
    fn push_detail_goes_to_push_list_not_history() {
        let (_, router) = router();
        router.on_location_change(&format!("/moderator/pushes/{}", uuid()), NavState::default());
        assert_eq!(
            router.handle_press(),
            BackAction::Navigate(Route::ModeratorPushes)
        );
    }

    #[test]
    fn unmapped_path_falls_back_to_history() {
        let (_, router) = router();
        router.on_location_change("/some/unmapped/path", NavState::default());
        assert_eq!(router.handle_press(), BackAction::HistoryBack);
    }

    #[test]
    fn catalog_respects_from_product_detail_state() {
        let (_, router) = router();

        router.on_location_change("/catalog", NavState::default());
        assert_eq!(router.handle_press(), BackAction::Navigate(Route::Root));

        router.on_location_change(
            "/catalog",
            NavState {
                from_product_detail: true,
            },
        );
        assert_eq!(router.handle_press(), BackAction::HistoryBack);
    }

    #[test]
    fn step_1_asks_for_cancel_confirmation() {
        let (_, router) = router();
        router.on_location_change(&format!("/product/{}/step-1", uuid()), NavState::default());
        assert_eq!(
            router.handle_press(),
            BackAction::ConfirmCancelOrder { order_id: uuid() }
        );
    }

    #[test]
    fn page_local_handler_takes_priority_and_pops_on_drop() {
        let (_, router) = router();
        router.on_location_change("/user/orders", NavState::default());

        let guard = router.push_handler(|| BackAction::Navigate(Route::SellerCabinet));
        assert_eq!(
            router.handle_press(),
            BackAction::Navigate(Route::SellerCabinet)
        );

        drop(guard);
        assert_eq!(router.handle_press(), BackAction::Navigate(Route::Root));
    }

    #[test]
    fn handlers_may_call_back_into_the_router() {
        let bridge = Arc::new(RecordingBridge::new());
        let router = Arc::new(BackRouter::new(Arc::clone(&bridge)));
        router.on_location_change("/about", NavState::default());

        // A confirmation dialog typically navigates from inside its handler.
        let reentrant = Arc::clone(&router);
        let guard = router.push_handler(move || {
            reentrant.on_location_change("/catalog", NavState::default());
            BackAction::Stay
        });

        assert_eq!(router.handle_press(), BackAction::Stay);

        drop(guard);
        assert_eq!(router.handle_press(), BackAction::Navigate(Route::Root));
    }

    #[test]
    fn most_recent_handler_wins() {
        let (_, router) = router();
        let _outer = router.push_handler(|| BackAction::HistoryBack);
        let inner = router.push_handler(|| BackAction::Stay);
        assert_eq!(router.handle_press(), BackAction::Stay);

        drop(inner);
        assert_eq!(router.handle_press(), BackAction::HistoryBack);
    }

    #[test]
    fn global_table_covers_the_static_rows() {
        let cases = [
            ("/user/orders", BackAction::Navigate(Route::Root)),
            (
                "/seller-cabinet/reports",
                BackAction::Navigate(Route::SellerCabinet),
            ),
            ("/about", BackAction::Navigate(Route::Root)),
            ("/requirements", BackAction::Navigate(Route::About)),
            ("/question", BackAction::Navigate(Route::About)),
            ("/moderator", BackAction::Navigate(Route::Root)),
            ("/moderator/users", BackAction::Navigate(Route::Moderator)),
            ("/moderator/products", BackAction::Navigate(Route::Moderator)),
            ("/moderator/pushes", BackAction::Navigate(Route::Moderator)),
            (
                "/moderator/pushes/new",
                BackAction::Navigate(Route::ModeratorPushes),
            ),
        ];

        let (_, router) = router();
        for (path, expected) in cases {
            router.on_location_change(path, NavState::default());
            assert_eq!(router.handle_press(), expected, "path {path}");
        }
    }

    #[test]
    fn product_routes_resolve_per_table() {
        let (_, router) = router();
        let id = uuid();

        router.on_location_change(&format!("/product/{id}"), NavState::default());
        assert_eq!(router.handle_press(), BackAction::Navigate(Route::Catalog));

        router.on_location_change(&format!("/product/{id}/seller"), NavState::default());
        assert_eq!(
            router.handle_press(),
            BackAction::Navigate(Route::MyProducts)
        );

        router.on_location_change(&format!("/moderator/pushes/{id}/edit"), NavState::default());
        assert_eq!(
            router.handle_press(),
            BackAction::Navigate(Route::PushDetail { push_id: id })
        );
    }
}
