//! Walks one scripted storefront session: listing, menu, cart, checkout and
//! confirmation, logging every screen on the way.

use event_actor::tracing::setup_tracing;
use storefront::clients::SessionClient;
use storefront::config::{DemoCustomer, StorefrontConfig};
use storefront::lifecycle::StorefrontSystem;
use storefront::session::{CheckoutField, SessionError};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::load()?;
    setup_tracing("storefront=info,event_actor=info");

    info!(offline = !config.proxy.is_configured(), "Starting storefront");
    let system = StorefrontSystem::start(&config).await?;

    let span = tracing::info_span!("demo_order");
    let outcome = demo_order(&system.client, &config.demo)
        .instrument(span)
        .await;
    match outcome {
        Ok(()) => info!("Demo session completed"),
        Err(e) => error!(error = %e, "Demo session failed"),
    }

    system.shutdown().await?;
    Ok(())
}

async fn demo_order(client: &SessionClient, customer: &DemoCustomer) -> Result<(), SessionError> {
    let snapshot = client.snapshot().await?;
    info!(view = %snapshot.view, restaurants = snapshot.restaurants.len(), "Listing");
    for restaurant in &snapshot.restaurants {
        info!(
            id = %restaurant.id,
            name = %restaurant.name,
            category = %restaurant.category,
            rating = restaurant.rating,
            delivery_time = %restaurant.delivery_time,
            "Restaurant"
        );
    }

    let restaurants = if snapshot.restaurants.is_empty() {
        client.load_restaurants().await?
    } else {
        snapshot.restaurants
    };
    let Some(restaurant) = restaurants.first() else {
        info!("No restaurants available");
        return Ok(());
    };

    let menu = client.select_restaurant(restaurant.id.clone()).await?;
    info!(restaurant = %restaurant.name, items = menu.len(), "Menu");
    for item in &menu {
        info!(id = %item.id, name = %item.name, price = item.price, "Menu item");
    }

    for item in menu.iter().take(2) {
        client.add_to_cart(item.id.clone()).await?;
    }
    if let Some(first) = menu.first() {
        client.add_to_cart(first.id.clone()).await?;
    }

    client.open_cart().await?;
    let cart = client.snapshot().await?.cart;
    for line in &cart.lines {
        info!(
            name = %line.item.name,
            quantity = line.quantity,
            line_total = line.line_total(),
            "Cart line"
        );
    }
    info!(
        subtotal = cart.subtotal,
        shipping_fee = cart.shipping_fee,
        total = cart.total,
        badge = cart.item_count,
        "Cart"
    );

    client.proceed_to_checkout().await?;
    client
        .edit_checkout(CheckoutField::CustomerName, customer.customer_name.clone())
        .await?;
    client
        .edit_checkout(CheckoutField::CustomerPhone, customer.customer_phone.clone())
        .await?;
    client
        .edit_checkout(CheckoutField::DeliveryAddress, customer.delivery_address.clone())
        .await?;
    client
        .edit_checkout(CheckoutField::PaymentMethod, customer.payment_method.clone())
        .await?;
    if let Some(notes) = &customer.order_notes {
        client
            .edit_checkout(CheckoutField::OrderNotes, notes.clone())
            .await?;
    }

    let order = client.submit_checkout().await?;
    info!(
        order_number = %order.order_number,
        estimated_delivery_time = %order.estimated_delivery_time,
        total = order.total,
        restaurant = %order.restaurant_name,
        "Confirmation"
    );
    if let Some(alert) = client.snapshot().await?.alert {
        info!(severity = ?alert.severity, message = %alert.message, "Alert");
    }

    client.new_order().await?;
    Ok(())
}
