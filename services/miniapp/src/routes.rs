//! Client-visible route table
//!
//! Every navigable screen has a `Route` variant; `parse` and `Display`
//! round-trip between variants and path strings. Paths the app does not
//! know about parse to `None` and fall through to plain history navigation.

use std::fmt;

use uuid::Uuid;

/// A logical screen of the Mini App
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Catalog,
    ProductDetail { product_id: Uuid },
    ProductInstruction { product_id: Uuid },
    /// First step of the buyback flow, keyed by the freshly created order
    ProductStep1 { order_id: Uuid },
    /// Seller's own view of a listing
    ProductSeller { product_id: Uuid },
    /// Steps 2..=7 of the buyback flow
    OrderStep { order_id: Uuid, step: u8 },
    /// Terminal read-only deal summary
    OrderInfo { order_id: Uuid },
    SellerCabinet,
    SellerReports,
    SellerReport { order_id: Uuid },
    MyProducts,
    CreateProduct { product_id: Option<Uuid> },
    MyOrders,
    Moderator,
    ModeratorUsers,
    ModeratorProducts,
    ModeratorPushes,
    PushNew,
    PushDetail { push_id: Uuid },
    PushEdit { push_id: Uuid },
    Blacklist { nickname: String },
    About,
    Instruction,
    Requirements,
    Question,
    Invite,
}

impl Route {
    /// Parse a pathname into a route; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match segments.as_slice() {
            [""] => Some(Route::Root),
            ["catalog"] => Some(Route::Catalog),
            ["about"] => Some(Route::About),
            ["instruction"] => Some(Route::Instruction),
            ["requirements"] => Some(Route::Requirements),
            ["question"] => Some(Route::Question),
            ["invite"] => Some(Route::Invite),
            ["my-products"] => Some(Route::MyProducts),
            ["user", "orders"] => Some(Route::MyOrders),
            ["seller-cabinet"] => Some(Route::SellerCabinet),
            ["seller-cabinet", "reports"] => Some(Route::SellerReports),
            ["seller-cabinet", "reports", id] => Some(Route::SellerReport {
                order_id: parse_id(id)?,
            }),
            ["create-product"] => Some(Route::CreateProduct { product_id: None }),
            ["create-product", id] => Some(Route::CreateProduct {
                product_id: Some(parse_id(id)?),
            }),
            ["black-list", nickname] => Some(Route::Blacklist {
                nickname: (*nickname).to_string(),
            }),
            ["product", id] => Some(Route::ProductDetail {
                product_id: parse_id(id)?,
            }),
            ["product", id, "instruction"] => Some(Route::ProductInstruction {
                product_id: parse_id(id)?,
            }),
            ["product", id, "step-1"] => Some(Route::ProductStep1 {
                order_id: parse_id(id)?,
            }),
            ["product", id, "seller"] => Some(Route::ProductSeller {
                product_id: parse_id(id)?,
            }),
            ["order", id, "order-info"] => Some(Route::OrderInfo {
                order_id: parse_id(id)?,
            }),
            ["order", id, step] => {
                let step = step.strip_prefix("step-")?.parse().ok()?;
                if !(2..=7).contains(&step) {
                    return None;
                }
                Some(Route::OrderStep {
                    order_id: parse_id(id)?,
                    step,
                })
            }
            ["moderator"] => Some(Route::Moderator),
            ["moderator", "users"] => Some(Route::ModeratorUsers),
            ["moderator", "products"] => Some(Route::ModeratorProducts),
            ["moderator", "pushes"] => Some(Route::ModeratorPushes),
            ["moderator", "pushes", "new"] => Some(Route::PushNew),
            ["moderator", "pushes", id] => Some(Route::PushDetail {
                push_id: parse_id(id)?,
            }),
            ["moderator", "pushes", id, "edit"] => Some(Route::PushEdit {
                push_id: parse_id(id)?,
            }),
            _ => None,
        }
    }
}

fn parse_id(segment: &str) -> Option<Uuid> {
    Uuid::parse_str(segment).ok()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Catalog => write!(f, "/catalog"),
            Route::ProductDetail { product_id } => write!(f, "/product/{product_id}"),
            Route::ProductInstruction { product_id } => {
                write!(f, "/product/{product_id}/instruction")
            }
            Route::ProductStep1 { order_id } => write!(f, "/product/{order_id}/step-1"),
            Route::ProductSeller { product_id } => write!(f, "/product/{product_id}/seller"),
            Route::OrderStep { order_id, step } => write!(f, "/order/{order_id}/step-{step}"),
            Route::OrderInfo { order_id } => write!(f, "/order/{order_id}/order-info"),
            Route::SellerCabinet => write!(f, "/seller-cabinet"),
            Route::SellerReports => write!(f, "/seller-cabinet/reports"),
            Route::SellerReport { order_id } => write!(f, "/seller-cabinet/reports/{order_id}"),
            Route::MyProducts => write!(f, "/my-products"),
            Route::CreateProduct { product_id: None } => write!(f, "/create-product"),
            Route::CreateProduct {
                product_id: Some(id),
            } => write!(f, "/create-product/{id}"),
            Route::MyOrders => write!(f, "/user/orders"),
            Route::Moderator => write!(f, "/moderator"),
            Route::ModeratorUsers => write!(f, "/moderator/users"),
            Route::ModeratorProducts => write!(f, "/moderator/products"),
            Route::ModeratorPushes => write!(f, "/moderator/pushes"),
            Route::PushNew => write!(f, "/moderator/pushes/new"),
            Route::PushDetail { push_id } => write!(f, "/moderator/pushes/{push_id}"),
            Route::PushEdit { push_id } => write!(f, "/moderator/pushes/{push_id}/edit"),
            Route::Blacklist { nickname } => write!(f, "/black-list/{nickname}"),
            Route::About => write!(f, "/about"),
            Route::Instruction => write!(f, "/instruction"),
            Route::Requirements => write!(f, "/requirements"),
            Route::Question => write!(f, "/question"),
            Route::Invite => write!(f, "/invite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid() -> Uuid {
        Uuid::parse_str("6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e6f").unwrap()
    }

    #[test]
    fn root_parses() {
        assert_eq!(Route::parse("/"), Some(Route::Root));
    }

    #[test]
    fn display_and_parse_round_trip() {
        let routes = [
            Route::Root,
            Route::Catalog,
            Route::ProductDetail { product_id: uuid() },
            Route::ProductStep1 { order_id: uuid() },
            Route::ProductSeller { product_id: uuid() },
            Route::OrderStep {
                order_id: uuid(),
                step: 5,
            },
            Route::OrderInfo { order_id: uuid() },
            Route::SellerReports,
            Route::SellerReport { order_id: uuid() },
            Route::CreateProduct { product_id: None },
            Route::CreateProduct {
                product_id: Some(uuid()),
            },
            Route::MyOrders,
            Route::ModeratorPushes,
            Route::PushNew,
            Route::PushDetail { push_id: uuid() },
            Route::PushEdit { push_id: uuid() },
            Route::Blacklist {
                nickname: "seller42".to_string(),
            },
            Route::Invite,
        ];

        for route in routes {
            let path = route.to_string();
            assert_eq!(Route::parse(&path), Some(route), "path {path}");
        }
    }

    #[test]
    fn step_routes_outside_2_to_7_are_unknown() {
        let id = uuid();
        assert_eq!(Route::parse(&format!("/order/{id}/step-1")), None);
        assert_eq!(Route::parse(&format!("/order/{id}/step-8")), None);
        assert!(Route::parse(&format!("/order/{id}/step-7")).is_some());
    }

    #[test]
    fn unknown_paths_parse_to_none() {
        assert_eq!(Route::parse("/some/unmapped/path"), None);
        assert_eq!(Route::parse("/product/not-a-uuid"), None);
    }

    #[test]
    fn push_new_is_not_mistaken_for_a_push_id() {
        assert_eq!(Route::parse("/moderator/pushes/new"), Some(Route::PushNew));
    }
}
