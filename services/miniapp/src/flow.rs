//! The 8-step buyback flow
//!
//! One `StepForm` variant per evidence-collecting step, each with its own
//! readiness predicate and multipart payload. The engine submits a step,
//! bumps the order's `step` counter and returns the next logical route.
//! The predicates are UX affordances only; the server re-validates every
//! transition and remains authoritative.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use common::error::ApiError;

use crate::api::{ApiClient, FilePart, FormData, Transport};
use crate::models::{Order, OrderStatus};
use crate::routes::Route;
use crate::telegram::TelegramBridge;

/// Bank selection on the payout-details step, with a free-text fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bank {
    Sber,
    Tinkoff,
    Alfa,
    Vtb,
    Other(String),
}

impl Bank {
    pub fn as_str(&self) -> &str {
        match self {
            Bank::Sber => "Сбербанк",
            Bank::Tinkoff => "Тинькофф",
            Bank::Alfa => "Альфа-Банк",
            Bank::Vtb => "ВТБ",
            Bank::Other(name) => name,
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Bank::Other(name) => !name.trim().is_empty(),
            _ => true,
        }
    }
}

/// Article comparison rule for step 2: the entered string is trimmed, the
/// stored article is used verbatim. Deliberately no further normalization.
pub fn article_matches(entered: &str, stored: &str) -> bool {
    entered.trim() == stored
}

/// Per-step collected evidence
#[derive(Debug, Clone)]
pub enum StepForm {
    /// Step 1: search-query and cart screenshots
    ProductSearch {
        search_screenshot: Option<FilePart>,
        cart_screenshot: Option<FilePart>,
    },
    /// Step 2: the buyer re-enters the product article
    ArticleCheck {
        entered_article: String,
        product_article: String,
    },
    /// Step 3: manual "added to favorites" confirmation
    Favorites { added_to_favorites: bool },
    /// Step 4: payout details
    PaymentDetails {
        card_number: String,
        phone_number: String,
        name: String,
        bank: Option<Bank>,
        confirmed: bool,
    },
    /// Step 5: order placed, with the final cart screenshot
    OrderPlacement {
        order_placed: bool,
        final_cart_screenshot: Option<FilePart>,
        order_date: Option<NaiveDate>,
    },
    /// Step 6: delivery status and cut-barcode photos
    Pickup {
        picked_up: bool,
        delivery_screenshot: Option<FilePart>,
        barcodes_screenshot: Option<FilePart>,
    },
    /// Step 7: review and receipt evidence
    ReviewReport {
        review_left: bool,
        review_screenshot: Option<FilePart>,
        receipt_screenshot: Option<FilePart>,
        receipt_number: String,
    },
}

impl StepForm {
    /// The step this form completes
    pub fn step(&self) -> u8 {
        match self {
            StepForm::ProductSearch { .. } => 1,
            StepForm::ArticleCheck { .. } => 2,
            StepForm::Favorites { .. } => 3,
            StepForm::PaymentDetails { .. } => 4,
            StepForm::OrderPlacement { .. } => 5,
            StepForm::Pickup { .. } => 6,
            StepForm::ReviewReport { .. } => 7,
        }
    }

    /// Whether the "continue" action may be enabled
    pub fn is_ready(&self) -> bool {
        match self {
            StepForm::ProductSearch {
                search_screenshot,
                cart_screenshot,
            } => search_screenshot.is_some() && cart_screenshot.is_some(),

            StepForm::ArticleCheck {
                entered_article,
                product_article,
            } => article_matches(entered_article, product_article),

            StepForm::Favorites { added_to_favorites } => *added_to_favorites,

            StepForm::PaymentDetails {
                card_number,
                phone_number,
                name,
                bank,
                confirmed,
            } => {
                !card_number.trim().is_empty()
                    && !phone_number.trim().is_empty()
                    && !name.trim().is_empty()
                    && bank.as_ref().is_some_and(Bank::is_complete)
                    && *confirmed
            }

            StepForm::OrderPlacement {
                order_placed,
                final_cart_screenshot,
                ..
            } => *order_placed && final_cart_screenshot.is_some(),

            StepForm::Pickup {
                picked_up,
                delivery_screenshot,
                barcodes_screenshot,
            } => *picked_up && delivery_screenshot.is_some() && barcodes_screenshot.is_some(),

            StepForm::ReviewReport {
                review_left,
                review_screenshot,
                receipt_screenshot,
                receipt_number,
            } => {
                *review_left
                    && review_screenshot.is_some()
                    && receipt_screenshot.is_some()
                    && !receipt_number.trim().is_empty()
            }
        }
    }

    /// Multipart payload: the new step number plus the collected fields
    pub fn form_data(&self) -> FormData {
        let mut form = FormData::new().text("step", self.step().to_string());

        match self {
            StepForm::ProductSearch {
                search_screenshot,
                cart_screenshot,
            } => {
                if let Some(part) = search_screenshot {
                    form = form.file("search_screenshot", part.clone());
                }
                if let Some(part) = cart_screenshot {
                    form = form.file("cart_screenshot", part.clone());
                }
            }

            StepForm::ArticleCheck {
                entered_article, ..
            } => {
                form = form.text("article", entered_article.trim());
            }

            StepForm::Favorites { .. } => {}

            StepForm::PaymentDetails {
                card_number,
                phone_number,
                name,
                bank,
                ..
            } => {
                form = form
                    .text("card_number", card_number.trim())
                    .text("phone_number", phone_number.trim())
                    .text("name", name.trim());
                if let Some(bank) = bank {
                    form = form.text("bank", bank.as_str());
                }
            }

            StepForm::OrderPlacement {
                final_cart_screenshot,
                order_date,
                ..
            } => {
                if let Some(part) = final_cart_screenshot {
                    form = form.file("final_cart_screenshot", part.clone());
                }
                if let Some(date) = order_date {
                    form = form.text("order_date", date.format("%Y-%m-%d").to_string());
                }
            }

            StepForm::Pickup {
                delivery_screenshot,
                barcodes_screenshot,
                ..
            } => {
                if let Some(part) = delivery_screenshot {
                    form = form.file("delivery_screenshot", part.clone());
                }
                if let Some(part) = barcodes_screenshot {
                    form = form.file("barcodes_screenshot", part.clone());
                }
            }

            StepForm::ReviewReport {
                review_screenshot,
                receipt_screenshot,
                receipt_number,
                ..
            } => {
                if let Some(part) = review_screenshot {
                    form = form.file("review_screenshot", part.clone());
                }
                if let Some(part) = receipt_screenshot {
                    form = form.file("receipt_screenshot", part.clone());
                }
                form = form.text("receipt_number", receipt_number.trim());
            }
        }

        form
    }
}

/// Errors of the step engine
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("step {step} requirements are not met")]
    NotReady { step: u8 },

    #[error("step 1 creates the order; submit it via start_order")]
    StartRequired,

    #[error("orders can be cancelled only on step 1 (current step {step})")]
    CancelNotAllowed { step: u8 },

    #[error("payment can be confirmed only on step 7 of an unpaid order")]
    ConfirmNotAllowed,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives one order through the purchase-and-proof workflow
pub struct OrderFlow<'a, T: Transport, B: TelegramBridge> {
    api: &'a ApiClient<T, B>,
}

impl<'a, T: Transport, B: TelegramBridge> OrderFlow<'a, T, B> {
    pub fn new(api: &'a ApiClient<T, B>) -> Self {
        Self { api }
    }

    /// Step 1: create the order with the first two screenshots
    pub async fn start_order(
        &self,
        product_id: Uuid,
        form: &StepForm,
    ) -> Result<(Order, Route), FlowError> {
        let StepForm::ProductSearch { .. } = form else {
            return Err(FlowError::NotReady { step: form.step() });
        };
        if !form.is_ready() {
            return Err(FlowError::NotReady { step: 1 });
        }

        let payload = form.form_data().text("product_id", product_id.to_string());
        let order = self.api.create_order(payload).await?;
        let route = Route::OrderStep {
            order_id: order.id,
            step: 2,
        };
        Ok((order, route))
    }

    /// Steps 2..=7: persist the step's evidence and move on.
    ///
    /// On failure the step is not advanced and the caller stays where it is.
    pub async fn advance(&self, order_id: Uuid, form: &StepForm) -> Result<Route, FlowError> {
        let step = form.step();
        if step == 1 {
            return Err(FlowError::StartRequired);
        }
        if !form.is_ready() {
            return Err(FlowError::NotReady { step });
        }

        self.api.update_order(order_id, form.form_data()).await?;
        Ok(next_route(order_id, step))
    }

    /// Cancellation is a status mutation, distinct from step advancement,
    /// and is allowed only while the order is on step 1.
    pub async fn cancel(&self, order: &Order) -> Result<Route, FlowError> {
        if order.step != 1 {
            return Err(FlowError::CancelNotAllowed { step: order.step });
        }
        self.api
            .update_order_status(order.id, OrderStatus::Cancelled)
            .await?;
        Ok(Route::Catalog)
    }

    /// The buyer may self-mark the payout received only on step 7 and only
    /// while the order is not already in a paid state.
    pub async fn confirm_payment(&self, order: &Order) -> Result<Order, FlowError> {
        if order.step != 7 || order.status.is_paid() {
            return Err(FlowError::ConfirmNotAllowed);
        }
        let updated = self
            .api
            .update_order_status(order.id, OrderStatus::PaymentConfirmed)
            .await?;
        Ok(updated)
    }
}

/// Route shown after completing `step`
fn next_route(order_id: Uuid, step: u8) -> Route {
    if step < 7 {
        Route::OrderStep {
            order_id,
            step: step + 1,
        }
    } else {
        Route::OrderInfo { order_id }
    }
}

/// Where the "my orders" list resumes an order.
///
/// Stored `step` N means steps 1..=N are complete, so resumption targets
/// N+1; step 8 is the terminal summary reached via the order-info route.
pub fn resume_route(order: &Order) -> Route {
    match order.step {
        1..=6 => Route::OrderStep {
            order_id: order.id,
            step: order.step + 1,
        },
        7 => Route::OrderInfo { order_id: order.id },
        _ => Route::OrderInfo { order_id: order.id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn uuid() -> Uuid {
        Uuid::parse_str("6f2e9d1c-8a3b-4f5e-9c7d-1a2b3c4d5e6f").unwrap()
    }

    fn shot(name: &str) -> FilePart {
        FilePart::png(name, vec![0u8; 4])
    }

    fn order_at(step: u8, status: OrderStatus) -> Order {
        let ts: NaiveDateTime = "2024-01-01T10:00:00".parse().unwrap();
        Order {
            id: uuid(),
            user_id: uuid(),
            product_id: uuid(),
            seller_id: None,
            step,
            search_screenshot_path: None,
            cart_screenshot_path: None,
            card_number: None,
            phone_number: None,
            name: None,
            bank: None,
            final_cart_screenshot_path: None,
            order_date: None,
            delivery_screenshot_path: None,
            barcodes_screenshot_path: None,
            review_screenshot_path: None,
            receipt_screenshot_path: None,
            receipt_number: None,
            status,
            product: None,
            user: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn resume_targets_step_plus_one() {
        for step in 1..=6u8 {
            let route = resume_route(&order_at(step, OrderStatus::CashbackNotPaid));
            assert_eq!(
                route,
                Route::OrderStep {
                    order_id: uuid(),
                    step: step + 1
                },
                "step {step}"
            );
        }
    }

    #[test]
    fn resume_after_step_seven_is_the_terminal_summary() {
        for step in [7u8, 8, 9, 0] {
            let route = resume_route(&order_at(step, OrderStatus::CashbackNotPaid));
            assert_eq!(route, Route::OrderInfo { order_id: uuid() }, "step {step}");
        }
    }

    #[test]
    fn step_one_needs_both_screenshots() {
        let mut form = StepForm::ProductSearch {
            search_screenshot: Some(shot("search.png")),
            cart_screenshot: None,
        };
        assert!(!form.is_ready());

        if let StepForm::ProductSearch {
            cart_screenshot, ..
        } = &mut form
        {
            *cart_screenshot = Some(shot("cart.png"));
        }
        assert!(form.is_ready());
    }

    #[test]
    fn article_rule_trims_input_but_not_the_stored_value() {
        assert!(article_matches("12345", "12345"));
        assert!(article_matches("  12345  ", "12345"));
        // Stored article with a trailing space never matches trimmed input.
        assert!(!article_matches("12345", "12345 "));
        assert!(!article_matches("12346", "12345"));
    }

    #[test]
    fn payment_details_need_all_five_conditions() {
        let complete = StepForm::PaymentDetails {
            card_number: "4276 1234 5678 9010".to_string(),
            phone_number: "+79991112233".to_string(),
            name: "Сергеева Анастасия".to_string(),
            bank: Some(Bank::Tinkoff),
            confirmed: true,
        };
        assert!(complete.is_ready());

        let missing_each: [StepForm; 5] = [
            StepForm::PaymentDetails {
                card_number: String::new(),
                phone_number: "+79991112233".to_string(),
                name: "Сергеева Анастасия".to_string(),
                bank: Some(Bank::Tinkoff),
                confirmed: true,
            },
            StepForm::PaymentDetails {
                card_number: "4276 1234 5678 9010".to_string(),
                phone_number: "   ".to_string(),
                name: "Сергеева Анастасия".to_string(),
                bank: Some(Bank::Tinkoff),
                confirmed: true,
            },
            StepForm::PaymentDetails {
                card_number: "4276 1234 5678 9010".to_string(),
                phone_number: "+79991112233".to_string(),
                name: String::new(),
                bank: Some(Bank::Tinkoff),
                confirmed: true,
            },
            StepForm::PaymentDetails {
                card_number: "4276 1234 5678 9010".to_string(),
                phone_number: "+79991112233".to_string(),
                name: "Сергеева Анастасия".to_string(),
                bank: None,
                confirmed: true,
            },
            StepForm::PaymentDetails {
                card_number: "4276 1234 5678 9010".to_string(),
                phone_number: "+79991112233".to_string(),
                name: "Сергеева Анастасия".to_string(),
                bank: Some(Bank::Tinkoff),
                confirmed: false,
            },
        ];

        for form in &missing_each {
            assert!(!form.is_ready());
        }
    }

    #[test]
    fn other_bank_requires_a_name() {
        let form = StepForm::PaymentDetails {
            card_number: "4276".to_string(),
            phone_number: "8999".to_string(),
            name: "x".to_string(),
            bank: Some(Bank::Other("  ".to_string())),
            confirmed: true,
        };
        assert!(!form.is_ready());
    }

    #[test]
    fn review_step_needs_receipt_number_and_both_shots() {
        let form = StepForm::ReviewReport {
            review_left: true,
            review_screenshot: Some(shot("review.png")),
            receipt_screenshot: Some(shot("receipt.png")),
            receipt_number: "  ".to_string(),
        };
        assert!(!form.is_ready());
    }

    #[test]
    fn payloads_carry_the_step_number_and_fields() {
        let form = StepForm::ArticleCheck {
            entered_article: "  12345 ".to_string(),
            product_article: "12345".to_string(),
        };
        let payload = form.form_data();
        assert_eq!(payload.get_text("step"), Some("2"));
        assert_eq!(payload.get_text("article"), Some("12345"));

        let form = StepForm::Pickup {
            picked_up: true,
            delivery_screenshot: Some(shot("delivery.png")),
            barcodes_screenshot: Some(shot("barcodes.png")),
        };
        let payload = form.form_data();
        assert_eq!(payload.get_text("step"), Some("6"));
        assert!(payload.contains("delivery_screenshot"));
        assert!(payload.contains("barcodes_screenshot"));
    }

    #[test]
    fn placement_payload_includes_the_order_date() {
        let form = StepForm::OrderPlacement {
            order_placed: true,
            final_cart_screenshot: Some(shot("final.png")),
            order_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        };
        let payload = form.form_data();
        assert_eq!(payload.get_text("order_date"), Some("2024-01-01"));
    }
}
