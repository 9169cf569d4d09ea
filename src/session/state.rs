use super::checkout::REQUIRED_FIELDS_MESSAGE;
use super::command::{
    CartSummary, LoadingFlags, SessionCommand, SessionEvent, SessionReply, SessionSnapshot,
};
use super::context::SessionContext;
use super::error::{Pending, SessionError};
use super::view::View;
use crate::alert::AlertChannel;
use crate::cart::CartLedger;
use crate::model::{ConfirmedOrder, MenuItem, MenuItemId, OrderDraft, Restaurant, RestaurantId};
use crate::pipeline::{OrderPipeline, PipelineError};
use crate::services::{GenerationService, OrderSink, ServiceError};
use event_actor::{ActorState, Step};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const ORDER_SUCCESS_MESSAGE: &str = "訂單成功提交！";
pub const INTERRUPTED_MESSAGE: &str = "處理過程中發生錯誤，請再試一次。";

/// Dependencies handed to the session actor when it starts.
#[derive(Clone)]
pub struct SessionDeps {
    pub service: Arc<dyn GenerationService>,
    pub pipeline: OrderPipeline,
}

impl SessionDeps {
    pub fn new(service: Arc<dyn GenerationService>, sink: Arc<dyn OrderSink>) -> Self {
        let pipeline = OrderPipeline::new(service.clone(), sink);
        Self { service, pipeline }
    }
}

/// Tunables for a new session.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub shipping_fee: u64,
    pub alert_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            shipping_fee: CartLedger::DEFAULT_SHIPPING_FEE,
            alert_ttl: AlertChannel::DEFAULT_TTL,
        }
    }
}

/// One customer's storefront session.
#[derive(Debug)]
pub struct Session {
    view: View,
    restaurants: Vec<Restaurant>,
    context: SessionContext,
    loading: LoadingFlags,
    alerts: AlertChannel,
    settings: SessionSettings,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            view: View::Listing,
            restaurants: Vec::new(),
            context: SessionContext::new(settings.shipping_fee),
            loading: LoadingFlags::default(),
            alerts: AlertChannel::new(settings.alert_ttl),
            settings,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    pub fn alerts(&mut self) -> &mut AlertChannel {
        &mut self.alerts
    }

    pub fn snapshot(&mut self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view,
            restaurants: self.restaurants.clone(),
            selected: self.context.selected.clone(),
            menu: self.context.menu.clone(),
            cart: self.cart_summary(),
            checkout: self.context.checkout.clone(),
            confirmed: self.context.confirmed.clone(),
            loading: self.loading,
            alert: self.alerts.current().cloned(),
        }
    }

    fn cart_summary(&self) -> CartSummary {
        let cart = &self.context.cart;
        CartSummary {
            lines: cart.snapshot(),
            subtotal: cart.subtotal(),
            shipping_fee: cart.shipping_fee(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }

    fn pending(&self) -> Option<Pending> {
        if self.loading.submitting {
            Some(Pending::Order)
        } else if self.loading.menu {
            Some(Pending::Menu)
        } else if self.loading.restaurants {
            Some(Pending::Restaurants)
        } else {
            None
        }
    }

    fn invalid(&self, command: &SessionCommand) -> SessionError {
        SessionError::InvalidTransition {
            from: self.view,
            action: command.name(),
        }
    }

    fn go_to(&mut self, view: View) -> Result<SessionReply, SessionError> {
        if view == View::Listing {
            self.context.clear_selection();
        }
        self.view = view;
        Ok(SessionReply::View(view))
    }

    fn reset(&mut self) -> Result<SessionReply, SessionError> {
        info!("Starting a new order");
        self.context = SessionContext::new(self.settings.shipping_fee);
        self.go_to(View::Listing)
    }

    fn load_restaurants(&mut self, deps: &SessionDeps) -> Step<Self> {
        self.loading.restaurants = true;
        let service = deps.service.clone();
        Step::defer(async move {
            SessionEvent::RestaurantsLoaded(service.list_restaurants().await)
        })
    }

    fn select_restaurant(&mut self, id: RestaurantId, deps: &SessionDeps) -> Step<Self> {
        let Some(restaurant) = self.restaurants.iter().find(|r| r.id == id).cloned() else {
            return Step::reject(SessionError::UnknownRestaurant(id));
        };

        let name = restaurant.name.clone();
        self.context.selected = Some(restaurant);
        self.context.menu.clear();
        self.view = View::Menu;
        self.loading.menu = true;

        let service = deps.service.clone();
        Step::defer(async move {
            let result = service.fetch_menu(&name).await;
            SessionEvent::MenuLoaded {
                restaurant: id,
                result,
            }
        })
    }

    fn add_to_cart(&mut self, id: &MenuItemId) -> Result<SessionReply, SessionError> {
        let item: &MenuItem = self
            .context
            .menu
            .iter()
            .find(|item| &item.id == id)
            .ok_or_else(|| SessionError::UnknownMenuItem(id.clone()))?;

        let name = item.name.clone();
        self.context.cart.add_item(item);
        self.alerts.success(format!("「{name}」已加入購物車"));
        Ok(SessionReply::Cart(self.cart_summary()))
    }

    fn proceed_to_checkout(&mut self) -> Result<SessionReply, SessionError> {
        if self.context.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }
        self.context.checkout = Default::default();
        self.go_to(View::Checkout)
    }

    fn submit_checkout(&mut self, deps: &SessionDeps) -> Step<Self> {
        if self.context.cart.is_empty() {
            return Step::reject(SessionError::EmptyCart);
        }
        let Some(restaurant) = &self.context.selected else {
            return Step::reject(SessionError::NoRestaurantSelected);
        };
        let details = match self.context.checkout.validate() {
            Ok(details) => details,
            Err(e) => {
                self.alerts.error(REQUIRED_FIELDS_MESSAGE);
                return Step::reject(e.into());
            }
        };

        let draft = OrderDraft::new(&self.context.cart, details, restaurant.name.clone());
        let issued = self.context.reusable_confirmation(&draft);
        self.loading.submitting = true;
        info!(
            restaurant = %draft.restaurant_name,
            total = draft.total,
            reuse = issued.is_some(),
            "Submitting order"
        );

        let pipeline = deps.pipeline.clone();
        Step::defer(async move {
            let outcome = pipeline.submit(draft.clone(), issued).await;
            SessionEvent::OrderSettled { draft, outcome }
        })
    }

    fn restaurants_loaded(
        &mut self,
        result: Result<Vec<Restaurant>, ServiceError>,
    ) -> Result<SessionReply, SessionError> {
        self.loading.restaurants = false;
        match result {
            Ok(restaurants) => {
                info!(count = restaurants.len(), "Restaurants loaded");
                self.restaurants = restaurants.clone();
                Ok(SessionReply::Restaurants(restaurants))
            }
            Err(e) => {
                warn!(error = %e, "Restaurant listing failed");
                self.alerts.error(e.to_string());
                Err(e.into())
            }
        }
    }

    fn menu_loaded(
        &mut self,
        restaurant: RestaurantId,
        result: Result<Vec<MenuItem>, ServiceError>,
    ) -> Result<SessionReply, SessionError> {
        self.loading.menu = false;
        match result {
            Ok(menu) => {
                info!(%restaurant, items = menu.len(), "Menu loaded");
                self.context.menu = menu.clone();
                Ok(SessionReply::Menu(menu))
            }
            Err(e) => {
                warn!(%restaurant, error = %e, "Menu failed, back to listing");
                self.context.clear_selection();
                self.view = View::Listing;
                self.alerts.error(e.to_string());
                Err(e.into())
            }
        }
    }

    fn order_settled(
        &mut self,
        draft: OrderDraft,
        outcome: Result<ConfirmedOrder, PipelineError>,
    ) -> Result<SessionReply, SessionError> {
        self.loading.submitting = false;
        match outcome {
            Ok(order) => {
                self.context.cart.clear();
                self.context.issued = None;
                self.context.confirmed = Some(order.clone());
                self.view = View::Confirmation;
                self.alerts.success(ORDER_SUCCESS_MESSAGE);
                Ok(SessionReply::Order(Box::new(order)))
            }
            Err(e) => {
                if let Some(confirmation) = e.issued_confirmation() {
                    self.context.issued = Some((draft, confirmation.clone()));
                }
                self.alerts.error(e.to_string());
                Err(e.into())
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl ActorState for Session {
    type Command = SessionCommand;
    type Reply = SessionReply;
    type Event = SessionEvent;
    type Context = SessionDeps;
    type Error = SessionError;

    fn handle_command(&mut self, command: SessionCommand, deps: &SessionDeps) -> Step<Self> {
        if !command.is_passive() {
            if let Some(pending) = self.pending() {
                return Step::reject(SessionError::Busy(pending));
            }
        }

        match command {
            SessionCommand::LoadRestaurants => self.load_restaurants(deps),
            SessionCommand::SelectRestaurant(id) => {
                if self.view != View::Listing {
                    return Step::reject(self.invalid(&SessionCommand::SelectRestaurant(id)));
                }
                self.select_restaurant(id, deps)
            }
            SessionCommand::AddToCart(id) => {
                if self.view != View::Menu {
                    return Step::reject(self.invalid(&SessionCommand::AddToCart(id)));
                }
                self.add_to_cart(&id).into()
            }
            SessionCommand::UpdateQuantity { item, quantity } => {
                self.context.cart.update_quantity(&item, quantity);
                Step::reply(SessionReply::Cart(self.cart_summary()))
            }
            SessionCommand::RemoveItem(item) => {
                self.context.cart.remove_item(&item);
                Step::reply(SessionReply::Cart(self.cart_summary()))
            }
            SessionCommand::OpenCart => self.go_to(View::Cart).into(),
            ref command @ SessionCommand::Back => match self.view {
                View::Menu => self.go_to(View::Listing).into(),
                View::Cart if self.context.selected.is_some() => self.go_to(View::Menu).into(),
                View::Cart => self.go_to(View::Listing).into(),
                View::Checkout => self.go_to(View::Cart).into(),
                View::Listing | View::Confirmation => Step::reject(self.invalid(command)),
            },
            SessionCommand::GoHome => match self.view {
                View::Confirmation => self.reset().into(),
                _ => self.go_to(View::Listing).into(),
            },
            ref command @ SessionCommand::ProceedToCheckout => {
                if self.view != View::Cart {
                    return Step::reject(self.invalid(command));
                }
                self.proceed_to_checkout().into()
            }
            SessionCommand::EditCheckout { field, value } => {
                if self.view != View::Checkout {
                    return Step::reject(SessionError::InvalidTransition {
                        from: self.view,
                        action: "edit_checkout",
                    });
                }
                self.context.checkout.set(field, value);
                Step::reply(SessionReply::Checkout(self.context.checkout.clone()))
            }
            ref command @ SessionCommand::SubmitCheckout => {
                if self.view != View::Checkout {
                    return Step::reject(self.invalid(command));
                }
                self.submit_checkout(deps)
            }
            ref command @ SessionCommand::NewOrder => {
                if self.view != View::Confirmation {
                    return Step::reject(self.invalid(command));
                }
                self.reset().into()
            }
            SessionCommand::DismissAlert => {
                self.alerts.dismiss();
                Step::reply(SessionReply::Done)
            }
            SessionCommand::Snapshot => {
                Step::reply(SessionReply::Snapshot(Box::new(self.snapshot())))
            }
        }
    }

    fn on_event(
        &mut self,
        event: SessionEvent,
        _deps: &SessionDeps,
    ) -> Result<SessionReply, SessionError> {
        match event {
            SessionEvent::RestaurantsLoaded(result) => self.restaurants_loaded(result),
            SessionEvent::MenuLoaded { restaurant, result } => self.menu_loaded(restaurant, result),
            SessionEvent::OrderSettled { draft, outcome } => self.order_settled(draft, outcome),
        }
    }

    fn on_abandoned(&mut self, _deps: &SessionDeps) -> SessionError {
        // Commands are gated while anything is pending, so at most one flag is set.
        let pending = self.pending();
        warn!(?pending, "Pending work was lost");
        self.loading = LoadingFlags::default();
        if pending == Some(Pending::Menu) {
            self.context.clear_selection();
            self.view = View::Listing;
        }
        self.alerts.error(INTERRUPTED_MESSAGE);
        SessionError::Interrupted
    }
}
