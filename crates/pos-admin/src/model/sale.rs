use live_collections::PushKey;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How the buyer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Online => write!(f, "online"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "online" => Ok(PaymentMethod::Online),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// A record of one product being sold.
///
/// The product's name, price and description are copied at sale time so the
/// record stays meaningful on its own. Unlike [`Product`](super::Product), the
/// key is also embedded in the body as `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: PushKey,
    pub product_id: PushKey,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub payment_method: PaymentMethod,
    pub sold_at: String,
}

/// Everything a sale needs except its key.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub product_id: PushKey,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub phone_number: Option<String>,
    pub payment_method: PaymentMethod,
    pub sold_at: String,
}

impl SaleDraft {
    /// Copies the product's details into a new draft.
    ///
    /// An empty phone number is stored as absent.
    pub fn for_product(
        product: &super::Product,
        phone_number: &str,
        payment_method: PaymentMethod,
        sold_at: String,
    ) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            phone_number: (!phone_number.is_empty()).then(|| phone_number.to_string()),
            payment_method,
            sold_at,
        }
    }
}

impl Sale {
    pub fn new(id: PushKey, draft: SaleDraft) -> Self {
        Self {
            id,
            product_id: draft.product_id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            phone_number: draft.phone_number,
            payment_method: draft.payment_method,
            sold_at: draft.sold_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn widget() -> Product {
        Product {
            id: PushKey::from("-Prod0001"),
            name: "Widget".into(),
            description: "Blue".into(),
            price: 49.5,
            created_at: "2024-05-01T09:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_sale_serializes_camel_case_without_empty_phone() {
        let draft = SaleDraft::for_product(
            &widget(),
            "",
            PaymentMethod::default(),
            "2024-05-01T10:00:00.000Z".into(),
        );
        let sale = Sale::new(PushKey::from("-Sale0001"), draft);
        let json = serde_json::to_value(&sale).unwrap();

        assert_eq!(json["id"], "-Sale0001");
        assert_eq!(json["productId"], "-Prod0001");
        assert_eq!(json["paymentMethod"], "cash");
        assert_eq!(json["soldAt"], "2024-05-01T10:00:00.000Z");
        assert!(json.get("phoneNumber").is_none());
    }

    #[test]
    fn test_sale_keeps_phone_when_present() {
        let draft = SaleDraft::for_product(
            &widget(),
            "9876543210",
            PaymentMethod::Online,
            "2024-05-01T10:00:00.000Z".into(),
        );
        let sale = Sale::new(PushKey::from("-Sale0002"), draft);
        let json = serde_json::to_value(&sale).unwrap();

        assert_eq!(json["phoneNumber"], "9876543210");
        assert_eq!(json["paymentMethod"], "online");
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("online".parse::<PaymentMethod>(), Ok(PaymentMethod::Online));
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
