//! Fixed demo data used when no proxy endpoint is configured.
use super::error::ServiceError;
use super::generation::GenerationService;
use crate::model::{MenuItem, OrderConfirmation, OrderDraft, Restaurant};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::warn;

pub const OFFLINE_DELIVERY_ESTIMATE: &str = "25-35 分鐘";

const MENU: [(&str, &str, u32); 5] = [
    ("menu-1", "模擬主餐", 250),
    ("menu-2", "模擬配菜", 180),
    ("menu-3", "模擬沙拉", 120),
    ("menu-4", "模擬甜點", 90),
    ("menu-5", "模擬飲料", 60),
];

/// Generation service that never touches the network.
///
/// Every call logs a warning so an unconfigured deployment is obvious.
#[derive(Debug)]
pub struct OfflineCatalog {
    rng: Mutex<StdRng>,
}

impl OfflineCatalog {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic order numbers, for tests and demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn restaurants() -> Vec<Restaurant> {
        vec![
            mock_restaurant(
                "mock-1",
                "模擬披薩屋 (Mock Pizza)",
                "義式料理",
                "https://images.unsplash.com/photo-1513104890138-7c749659a591?q=80&w=2070&auto=format&fit=crop",
                4.5,
                150,
                "20-30 分鐘",
                150,
            ),
            mock_restaurant(
                "mock-2",
                "模擬壽司吧 (Mock Sushi)",
                "日式料理",
                "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?q=80&w=1974&auto=format&fit=crop",
                4.8,
                250,
                "30-40 分鐘",
                300,
            ),
            mock_restaurant(
                "mock-3",
                "模擬塔可卡車 (Mock Tacos)",
                "墨西哥料理",
                "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?q=80&w=1981&auto=format&fit=crop",
                4.2,
                95,
                "15-25 分鐘",
                100,
            ),
            mock_restaurant(
                "mock-4",
                "模擬漢堡店 (Mock Burgers)",
                "美式料理",
                "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?q=80&w=1998&auto=format&fit=crop",
                4.6,
                320,
                "25-35 分鐘",
                200,
            ),
        ]
    }

    /// The five-item menu, with ids prefixed by the restaurant name.
    pub fn menu(restaurant_name: &str) -> Vec<MenuItem> {
        MENU.iter()
            .map(|(id, name, price)| {
                MenuItem::new(format!("{restaurant_name}-{id}"), *name, *price)
            })
            .collect()
    }

    fn order_number(&self) -> String {
        let n: u32 = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(1000..=9999),
            Err(poisoned) => poisoned.into_inner().gen_range(1000..=9999),
        };
        format!("MOCK-{n}")
    }
}

impl Default for OfflineCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn mock_restaurant(
    id: &str,
    name: &str,
    category: &str,
    image: &str,
    rating: f64,
    reviews: u32,
    delivery_time: &str,
    min_order: u32,
) -> Restaurant {
    Restaurant {
        id: id.into(),
        name: name.to_string(),
        category: category.to_string(),
        image: image.to_string(),
        rating,
        reviews,
        delivery_time: delivery_time.to_string(),
        min_order,
    }
}

#[async_trait]
impl GenerationService for OfflineCatalog {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        warn!("Proxy not configured, returning offline restaurants. Set STOREFRONT_PROXY_URL to use the generation proxy");
        Ok(Self::restaurants())
    }

    async fn fetch_menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, ServiceError> {
        warn!(restaurant_name, "Proxy not configured, returning offline menu");
        Ok(Self::menu(restaurant_name))
    }

    async fn confirm_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError> {
        warn!(total = draft.total, "Proxy not configured, returning offline confirmation");
        Ok(OrderConfirmation {
            order_number: self.order_number(),
            estimated_delivery_time: OFFLINE_DELIVERY_ESTIMATE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLedger;
    use crate::model::CustomerDetails;
    use crate::services::proxy::{check_menu, check_restaurants};

    #[tokio::test]
    async fn test_offline_restaurants() {
        let catalog = OfflineCatalog::new();
        let restaurants = catalog.list_restaurants().await.unwrap();
        let ids: Vec<_> = restaurants.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, ["mock-1", "mock-2", "mock-3", "mock-4"]);
        assert_eq!(restaurants[1].name, "模擬壽司吧 (Mock Sushi)");
        assert_eq!(restaurants[3].min_order, 200);
        assert!(check_restaurants(&restaurants).is_ok());
    }

    #[tokio::test]
    async fn test_offline_menu_is_prefixed() {
        let catalog = OfflineCatalog::new();
        let menu = catalog.fetch_menu("模擬披薩屋 (Mock Pizza)").await.unwrap();
        assert_eq!(menu.len(), 5);
        assert_eq!(menu[0].id.0, "模擬披薩屋 (Mock Pizza)-menu-1");
        assert_eq!(menu[0].name, "模擬主餐");
        assert_eq!(menu[0].price, 250);
        assert_eq!(menu[4].price, 60);
        assert!(check_menu(&menu).is_ok());
    }

    #[tokio::test]
    async fn test_offline_confirmation_numbers() {
        let mut cart = CartLedger::default();
        cart.add_item(&MenuItem::new("m", "模擬主餐", 250));
        let draft = OrderDraft::new(
            &cart,
            CustomerDetails {
                customer_name: "A".into(),
                customer_phone: "1".into(),
                delivery_address: "B".into(),
                payment_method: "貨到付款".into(),
                order_notes: None,
            },
            "模擬披薩屋 (Mock Pizza)",
        );

        let catalog = OfflineCatalog::with_seed(7);
        for _ in 0..20 {
            let confirmation = catalog.confirm_order(&draft).await.unwrap();
            let digits = confirmation.order_number.strip_prefix("MOCK-").unwrap();
            let n: u32 = digits.parse().unwrap();
            assert!((1000..=9999).contains(&n));
            assert_eq!(confirmation.estimated_delivery_time, "25-35 分鐘");
        }

        let first = OfflineCatalog::with_seed(42).confirm_order(&draft).await.unwrap();
        let again = OfflineCatalog::with_seed(42).confirm_order(&draft).await.unwrap();
        assert_eq!(first, again);
    }
}
