use std::sync::Arc;
use std::time::Duration;
use storefront::alert::Severity;
use storefront::cart::CartLedger;
use storefront::clients::SessionClient;
use storefront::lifecycle::StorefrontSystem;
use storefront::model::{payment, MenuItemId, OrderConfirmation};
use storefront::services::mock::{MockGenerationService, MockOrderSink};
use storefront::services::{LogSink, OfflineCatalog, ProxyFailure, ServiceError, SinkError};
use storefront::session::{CheckoutField, Pending, SessionError, SessionSettings, View};

const PIZZA: &str = "模擬披薩屋 (Mock Pizza)";

async fn offline_system() -> StorefrontSystem {
    StorefrontSystem::start_with(
        Arc::new(OfflineCatalog::with_seed(2024)),
        Arc::new(LogSink::new(Duration::ZERO)),
        SessionSettings::default(),
    )
    .await
}

/// A mocked service that has already served the listing and the pizza menu.
fn scripted_service() -> MockGenerationService {
    let service = MockGenerationService::new();
    service
        .expect_list_restaurants()
        .return_ok(OfflineCatalog::restaurants());
    service
        .expect_fetch_menu(PIZZA)
        .return_ok(OfflineCatalog::menu(PIZZA));
    service
}

fn main_dish() -> MenuItemId {
    MenuItemId(format!("{PIZZA}-menu-1"))
}

async fn fill_in(client: &SessionClient, name: &str) {
    client
        .edit_checkout(CheckoutField::CustomerName, name)
        .await
        .unwrap();
    client
        .edit_checkout(CheckoutField::CustomerPhone, "0912345678")
        .await
        .unwrap();
    client
        .edit_checkout(CheckoutField::DeliveryAddress, "台北市信義區松高路 1 號")
        .await
        .unwrap();
    client
        .edit_checkout(CheckoutField::PaymentMethod, payment::CREDIT_CARD)
        .await
        .unwrap();
}

/// Drives the session from the listing to a filled-in checkout form with
/// two main dishes in the cart.
async fn checkout_two_mains(client: &SessionClient, name: &str) {
    client.select_restaurant("mock-1".into()).await.unwrap();
    client.add_to_cart(main_dish()).await.unwrap();
    client.add_to_cart(main_dish()).await.unwrap();
    client.open_cart().await.unwrap();
    client.proceed_to_checkout().await.unwrap();
    fill_in(client, name).await;
}

#[tokio::test]
async fn test_offline_listing_menu_and_cart() {
    let system = offline_system().await;
    let client = &system.client;

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.view, View::Listing);
    assert_eq!(snapshot.restaurants.len(), 4);
    assert!(!snapshot.loading.restaurants);

    let menu = client.select_restaurant("mock-1".into()).await.unwrap();
    assert_eq!(menu.len(), 5);
    assert!(menu.iter().all(|item| item.id.0.starts_with(PIZZA)));

    client.add_to_cart(main_dish()).await.unwrap();
    let cart = client.add_to_cart(main_dish()).await.unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 2);
    assert_eq!(cart.subtotal, 500);
    assert_eq!(cart.total, 560);
    assert_eq!(cart.item_count, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_huge_quantities_keep_session_alive() {
    let system = offline_system().await;
    let client = &system.client;
    let drink = MenuItemId(format!("{PIZZA}-menu-2"));

    client.select_restaurant("mock-1".into()).await.unwrap();
    client.add_to_cart(main_dish()).await.unwrap();
    client.add_to_cart(drink.clone()).await.unwrap();

    client.update_quantity(main_dish(), 3_000_000_000).await.unwrap();
    let cart = client.update_quantity(drink, 3_000_000_000).await.unwrap();
    assert!(cart
        .lines
        .iter()
        .all(|line| line.quantity == CartLedger::MAX_QUANTITY));
    assert_eq!(cart.item_count, 2 * CartLedger::MAX_QUANTITY);
    assert_eq!(cart.total, cart.subtotal + 60);

    assert_eq!(client.snapshot().await.unwrap().view, View::Menu);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_panicking_service_does_not_leave_session_busy() {
    let service = MockGenerationService::new();
    service
        .expect_list_restaurants()
        .return_ok(OfflineCatalog::restaurants());
    // No menu scripted: the fetch panics inside the deferred work.
    let system = StorefrontSystem::start_with(
        Arc::new(service),
        Arc::new(MockOrderSink::new()),
        SessionSettings::default(),
    )
    .await;
    let client = &system.client;

    let err = client.select_restaurant("mock-1".into()).await.unwrap_err();
    assert_eq!(err, SessionError::Interrupted);

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.view, View::Listing);
    assert!(snapshot.selected.is_none());
    assert!(!snapshot.loading.any());
    assert_eq!(snapshot.alert.map(|a| a.severity), Some(Severity::Error));

    // The session takes commands again.
    assert_eq!(client.open_cart().await.unwrap(), View::Cart);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_blank_name_does_not_reach_pipeline() {
    let service = Arc::new(scripted_service());
    let sink = Arc::new(MockOrderSink::new());
    let system =
        StorefrontSystem::start_with(service.clone(), sink.clone(), SessionSettings::default())
            .await;
    let client = &system.client;

    checkout_two_mains(client, "").await;
    let err = client.submit_checkout().await.unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.view, View::Checkout);
    assert_eq!(snapshot.cart.item_count, 2);
    assert_eq!(
        snapshot.alert.map(|a| a.message).as_deref(),
        Some("請填寫所有必填欄位 (*)")
    );
    assert!(service.confirmed_drafts().is_empty());
    assert!(sink.records().is_empty());

    system.shutdown().await.unwrap();
    service.verify();
}

#[tokio::test]
async fn test_confirmation_failure_keeps_cart() {
    let service = Arc::new(scripted_service());
    service
        .expect_confirm_order()
        .return_err(ServiceError::Confirmation(ProxyFailure::Rejected(
            "Quota exceeded".into(),
        )));
    let sink = Arc::new(MockOrderSink::new());
    let system =
        StorefrontSystem::start_with(service.clone(), sink.clone(), SessionSettings::default())
            .await;
    let client = &system.client;

    checkout_two_mains(client, "王小明").await;
    let err = client.submit_checkout().await.unwrap_err();
    assert_eq!(err.to_string(), "訂單提交失敗：Quota exceeded");

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.view, View::Checkout);
    assert_eq!(snapshot.cart.item_count, 2);
    assert!(!snapshot.loading.submitting);
    let alert = snapshot.alert.unwrap();
    assert_eq!(alert.severity, Severity::Error);
    assert!(alert.message.contains("Quota exceeded"));
    assert!(sink.records().is_empty());

    system.shutdown().await.unwrap();
    service.verify();
}

#[tokio::test]
async fn test_successful_order_freezes_total_and_clears_cart() {
    let system = offline_system().await;
    let client = &system.client;

    checkout_two_mains(client, "王小明").await;
    let before = client.snapshot().await.unwrap().cart.total;

    let order = client.submit_checkout().await.unwrap();
    assert_eq!(order.total, before);
    assert_eq!(order.total, 560);
    assert!(order.order_number.starts_with("MOCK-"));
    assert_eq!(order.estimated_delivery_time, "25-35 分鐘");
    assert_eq!(order.restaurant_name, PIZZA);
    assert_eq!(order.details.customer_name, "王小明");

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.view, View::Confirmation);
    assert!(snapshot.cart.lines.is_empty());
    assert_eq!(snapshot.confirmed.as_ref().map(|o| o.total), Some(560));
    assert_eq!(
        snapshot.alert.map(|a| a.message).as_deref(),
        Some("訂單成功提交！")
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_new_order_resets_session() {
    let system = offline_system().await;
    let client = &system.client;

    checkout_two_mains(client, "王小明").await;
    client.submit_checkout().await.unwrap();
    assert_eq!(client.new_order().await.unwrap(), View::Listing);

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.selected.is_none());
    assert!(snapshot.menu.is_empty());
    assert!(snapshot.confirmed.is_none());
    assert_eq!(snapshot.cart.item_count, 0);
    assert_eq!(snapshot.checkout, Default::default());
    // The listing is catalog data and stays.
    assert_eq!(snapshot.restaurants.len(), 4);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_home_clears_selection_but_keeps_cart() {
    let system = offline_system().await;
    let client = &system.client;

    client.select_restaurant("mock-3".into()).await.unwrap();
    client
        .add_to_cart(MenuItemId("模擬塔可卡車 (Mock Tacos)-menu-5".into()))
        .await
        .unwrap();
    assert_eq!(client.go_home().await.unwrap(), View::Listing);

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.selected.is_none());
    assert_eq!(snapshot.cart.item_count, 1);
    assert_eq!(snapshot.cart.total, 120);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_second_submit_while_outstanding_is_busy() {
    let service = Arc::new(scripted_service().with_latency(Duration::from_millis(100)));
    service.expect_confirm_order().return_ok(OrderConfirmation {
        order_number: "GEM-1234-5678".into(),
        estimated_delivery_time: "30-45 分鐘".into(),
    });
    let sink = Arc::new(MockOrderSink::new());
    sink.expect_record().return_ok(());
    let system =
        StorefrontSystem::start_with(service.clone(), sink.clone(), SessionSettings::default())
            .await;
    let client = &system.client;

    checkout_two_mains(client, "王小明").await;
    let (first, second) = tokio::join!(client.submit_checkout(), client.submit_checkout());

    assert_eq!(first.unwrap().order_number, "GEM-1234-5678");
    assert_eq!(second.unwrap_err(), SessionError::Busy(Pending::Order));
    assert_eq!(service.confirmed_drafts().len(), 1);
    assert_eq!(sink.records().len(), 1);

    system.shutdown().await.unwrap();
    service.verify();
    sink.verify();
}

#[tokio::test]
async fn test_resubmit_after_record_failure_reuses_order_number() {
    let service = Arc::new(scripted_service());
    service.expect_confirm_order().return_ok(OrderConfirmation {
        order_number: "GEM-9999-0000".into(),
        estimated_delivery_time: "30-45 分鐘".into(),
    });
    service.expect_confirm_order().return_ok(OrderConfirmation {
        order_number: "GEM-9999-0001".into(),
        estimated_delivery_time: "30-45 分鐘".into(),
    });
    let sink = Arc::new(MockOrderSink::new());
    sink.expect_record().return_err(SinkError::new("sheet unavailable"));
    sink.expect_record().return_err(SinkError::new("sheet unavailable"));
    sink.expect_record().return_ok(());
    let system =
        StorefrontSystem::start_with(service.clone(), sink.clone(), SessionSettings::default())
            .await;
    let client = &system.client;

    checkout_two_mains(client, "王小明").await;
    let err = client.submit_checkout().await.unwrap_err();
    assert_eq!(err.to_string(), "無法儲存訂單記錄。");

    // Identical draft: the issued number is reused.
    let err = client.submit_checkout().await.unwrap_err();
    assert_eq!(err.to_string(), "無法儲存訂單記錄。");
    assert_eq!(service.confirmed_drafts().len(), 1);

    // A changed draft needs a fresh confirmation.
    client
        .edit_checkout(CheckoutField::OrderNotes, "放在管理室")
        .await
        .unwrap();
    let order = client.submit_checkout().await.unwrap();
    assert_eq!(order.order_number, "GEM-9999-0001");
    assert_eq!(service.confirmed_drafts().len(), 2);

    let numbers: Vec<_> = sink.records().into_iter().map(|r| r.order_number).collect();
    assert_eq!(numbers, ["GEM-9999-0000", "GEM-9999-0000", "GEM-9999-0001"]);

    system.shutdown().await.unwrap();
    service.verify();
    sink.verify();
}

#[tokio::test]
async fn test_failed_initial_load_can_be_retried() {
    let service = Arc::new(MockGenerationService::new());
    service
        .expect_list_restaurants()
        .return_err(ServiceError::Restaurants(ProxyFailure::Transport(
            "connection refused".into(),
        )));
    service
        .expect_list_restaurants()
        .return_ok(OfflineCatalog::restaurants());
    let system = StorefrontSystem::start_with(
        service.clone(),
        Arc::new(MockOrderSink::new()),
        SessionSettings::default(),
    )
    .await;
    let client = &system.client;

    let snapshot = client.snapshot().await.unwrap();
    assert!(snapshot.restaurants.is_empty());
    assert_eq!(
        snapshot.alert.map(|a| a.message).as_deref(),
        Some("無法獲取餐廳列表：connection refused")
    );

    client.dismiss_alert().await.unwrap();
    assert!(client.snapshot().await.unwrap().alert.is_none());

    let restaurants = client.load_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 4);

    system.shutdown().await.unwrap();
    service.verify();
}

#[tokio::test(start_paused = true)]
async fn test_alert_expires_inside_running_session() {
    let system = offline_system().await;
    let client = &system.client;

    client.select_restaurant("mock-1".into()).await.unwrap();
    client.add_to_cart(main_dish()).await.unwrap();
    assert!(client.snapshot().await.unwrap().alert.is_some());

    tokio::time::advance(Duration::from_secs(3)).await;
    assert!(client.snapshot().await.unwrap().alert.is_none());

    system.shutdown().await.unwrap();
}
