//! Prompts and response schemas sent through the generation proxy.
use crate::model::OrderDraft;
use serde_json::{json, Value};

pub fn restaurants_prompt() -> String {
    "Generate a list of 12 diverse, fictional restaurants for a food delivery app. \
     Provide details like name, category (e.g., 'Italian', 'Sushi', 'Mexican'), a realistic \
     image URL from a food-related image source like Unsplash, rating (between 3.5 and 5.0), \
     number of reviews (between 50 and 500), estimated delivery time, and minimum order \
     amount in TWD."
        .to_string()
}

pub fn menu_prompt(restaurant_name: &str) -> String {
    format!(
        "Generate a sample menu with about 10-15 items for a restaurant called \
         \"{restaurant_name}\". For each item, provide a name and a price in TWD."
    )
}

pub fn confirmation_prompt(draft: &OrderDraft) -> String {
    format!(
        "A customer has placed a food delivery order.\n\
         - Restaurant: {}\n\
         - Items: {}\n\
         - Total: TWD {}\n\
         - Customer: {}\n\
         - Address: {}\n\
         Generate a fictional order number (e.g., \"GEM-xxxx-xxxx\") and an estimated \
         delivery time (e.g., \"30-45 分鐘\").",
        draft.restaurant_name,
        draft.prompt_summary(),
        draft.total,
        draft.details.customer_name,
        draft.details.delivery_address,
    )
}

pub fn restaurants_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "category": { "type": "STRING" },
                "image": {
                    "type": "STRING",
                    "description": "A URL to an image of the restaurant or its food."
                },
                "rating": { "type": "NUMBER" },
                "reviews": { "type": "INTEGER" },
                "deliveryTime": {
                    "type": "STRING",
                    "description": "Estimated delivery time, e.g., \"25-35 min\""
                },
                "minOrder": { "type": "INTEGER" }
            },
            "required": [
                "id", "name", "category", "image", "rating", "reviews", "deliveryTime", "minOrder"
            ]
        }
    })
}

pub fn menu_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "price": { "type": "INTEGER" }
            },
            "required": ["id", "name", "price"]
        }
    })
}

pub fn confirmation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "orderNumber": { "type": "STRING" },
            "estimatedDeliveryTime": { "type": "STRING" }
        },
        "required": ["orderNumber", "estimatedDeliveryTime"]
    })
}
