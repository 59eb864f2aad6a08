//! # Order Form Commands
//!
//! ## Submission Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  submit_order                                                           │
//! │       │                                                                 │
//! │       ▼  lock                                                           │
//! │  begin_submit ── invalid ──► errors kept on the form, back to Idle      │
//! │       │ valid (Submitting, control disabled)                            │
//! │       ▼  unlock                                                         │
//! │  sink.deliver(&order).await     ◄── other commands keep working         │
//! │       │                                                                 │
//! │       ▼  lock                                                           │
//! │  finish(sent) ── Failed ──► generic notice, form stays open             │
//! │       │ Succeeded                                                       │
//! │       ▼                                                                 │
//! │  success modal, form closed, order kept as last_order                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Local, Utc};
use tracing::{debug, info};

use firewood_core::pdf::to_pdf;
use firewood_core::receipt::order_confirmation;
use firewood_core::sanitize::{FieldEvent, FieldFeedback, Key, KeyDecision, KeyPress};
use firewood_core::view::{render_order_form, OrderFormView, SuccessModalView};
use firewood_core::{generate_order_number, CoreError, FormField, OrderFormSession};
use firewood_sync::OrderSink;

use crate::commands::today;
use crate::error::ApiError;
use crate::state::{ConfigState, DbState, Shop, ShopState};

fn open_form(shop: &mut Shop) -> Result<&mut OrderFormSession, CoreError> {
    shop.form.as_mut().ok_or(CoreError::NoOpenForm)
}

fn parse_field(field: &str) -> Result<FormField, ApiError> {
    Ok(FormField::from_str(field)?)
}

/// Opens a fresh order form with a new order number.
///
/// Any previous success modal is dismissed. Refused while the current
/// form has a submit in flight, so the pending delivery always lands on
/// the session that sent it.
pub fn open_order_form(shop: &ShopState, config: &ConfigState) -> Result<OrderFormView, ApiError> {
    let order_number = generate_order_number(&mut rand::thread_rng());
    debug!(order_number = %order_number, "open_order_form command");

    let session = OrderFormSession::open(order_number, config.form_rules());
    let view = render_order_form(&session, today());
    shop.with_shop_mut(|s| {
        if let Some(form) = s.form.as_ref().filter(|f| f.flow().in_flight()) {
            return Err(CoreError::InvalidTransition {
                state: form.state(),
                action: "open a new order form",
            }
            .into());
        }
        s.form = Some(session);
        s.success = None;
        Ok(view)
    })
}

pub fn get_order_form(shop: &ShopState) -> Result<OrderFormView, ApiError> {
    shop.with_shop(|s| {
        let form = s.form.as_ref().ok_or(CoreError::NoOpenForm)?;
        Ok(render_order_form(form, today()))
    })
}

/// Feeds an input, paste, focus or blur event to a field.
pub fn field_event(
    shop: &ShopState,
    field: &str,
    event: FieldEvent,
) -> Result<FieldFeedback, ApiError> {
    let field = parse_field(field)?;
    debug!(?field, ?event, "field_event command");
    shop.with_shop_mut(|s| Ok(open_form(s)?.apply(field, event)?))
}

/// Asks whether a key press should reach the field.
pub fn key_down(shop: &ShopState, field: &str, key: &str, ctrl: bool) -> Result<KeyDecision, ApiError> {
    let field = parse_field(field)?;
    let key = Key::from_name(key);
    let press = if ctrl {
        KeyPress::ctrl(key)
    } else {
        KeyPress::plain(key)
    };
    shop.with_shop(|s| {
        let form = s.form.as_ref().ok_or(CoreError::NoOpenForm)?;
        Ok(form.key_down(field, &press))
    })
}

/// Closes the form without submitting. Refused while a submit is in flight.
pub fn cancel_order_form(shop: &ShopState) -> Result<(), ApiError> {
    debug!("cancel_order_form command");
    shop.with_shop_mut(|s| {
        let form = open_form(s)?;
        if form.flow().in_flight() {
            return Err(CoreError::InvalidTransition {
                state: form.state(),
                action: "cancel",
            }
            .into());
        }
        s.form = None;
        Ok(())
    })
}

/// Validates the open form and delivers it through `sink`.
///
/// ## Returns
/// - `Ok(SuccessModalView)` once the order went out
/// - `Err` with code `VALIDATION_ERROR` when rules failed; the form view
///   then carries the messages
/// - `Err` with code `SUBMISSION_FAILED` and the generic notice when
///   delivery failed
pub async fn submit_order<S: OrderSink>(
    shop: &ShopState,
    sink: &S,
) -> Result<SuccessModalView, ApiError> {
    let order = shop.with_shop_mut(|s| open_form(s)?.begin_submit(today(), Utc::now()))?;
    debug!(order_number = %order.order_number, "submit_order dispatched");

    let outcome = sink.deliver(&order).await;

    shop.with_shop_mut(|s| {
        open_form(s)?.finish(outcome.is_ok())?;
        match outcome {
            Ok(delivery) => {
                info!(
                    order_number = %order.order_number,
                    status = delivery.status,
                    "Order submitted"
                );
                let modal = SuccessModalView::new(order.order_number.clone());
                s.success = Some(modal.clone());
                s.last_order = Some(order);
                s.form = None;
                Ok(modal)
            }
            Err(err) => Err(ApiError::from(err)),
        }
    })
}

pub fn dismiss_success(shop: &ShopState) {
    shop.with_shop_mut(|s| s.success = None);
}

/// Writes the confirmation PDF for the last submitted order.
pub async fn download_order_pdf(shop: &ShopState, db: &DbState) -> Result<PathBuf, ApiError> {
    debug!("download_order_pdf command");
    let order = shop
        .with_shop(|s| s.last_order.clone())
        .ok_or(CoreError::NoOrderData)?;

    let doc = order_confirmation(&order, Local::now().fixed_offset());
    let path = db.documents().save(&doc.filename, &to_pdf(&doc)).await?;

    info!(order_number = %order.order_number, path = %path.display(), "Order PDF saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::Days;
    use firewood_core::submission::{SUBMITTING_LABEL, SUBMIT_LABEL};
    use firewood_core::OrderSubmission;
    use firewood_store::{Database, DbConfig, DocumentStore};
    use firewood_sync::{
        Delivery, DeliveryMode, SyncError, SyncResult, WebhookClient, WebhookConfig,
    };
    use tokio::sync::Notify;

    use crate::error::ErrorCode;

    /// Records deliveries; optionally fails or waits for a release signal.
    #[derive(Default)]
    struct FakeSink {
        fail: bool,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl OrderSink for FakeSink {
        async fn deliver(&self, _order: &OrderSubmission) -> SyncResult<Delivery> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                Err(SyncError::Transport("connection refused".into()))
            } else {
                Ok(Delivery {
                    status: 200,
                    mode: DeliveryMode::Opaque,
                })
            }
        }
    }

    fn fill_valid(shop: &ShopState) {
        let tomorrow = today()
            .checked_add_days(Days::new(1))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        for (field, value) in [
            ("storeId", "S-12"),
            ("storeName", "Lincoln Mart"),
            ("city", "Springfield"),
            ("quantity", "3"),
            ("dateNeeded", tomorrow.as_str()),
            ("managerName", "Mary Todd"),
            ("contactNo", "5551234567"),
        ] {
            field_event(shop, field, FieldEvent::Input(value.into())).unwrap();
        }
    }

    fn opened() -> ShopState {
        let shop = ShopState::default();
        open_order_form(&shop, &ConfigState::default()).unwrap();
        shop
    }

    #[test]
    fn test_open_form_assigns_order_number() {
        let shop = ShopState::default();
        let view = open_order_form(&shop, &ConfigState::default()).unwrap();
        let number = &view.fields[0].value;
        assert!(number.starts_with("WEB_"));
        assert_eq!(number.len(), 11);
        assert!(view.fields[0].read_only);
        assert_eq!(view.submit.label, SUBMIT_LABEL);
    }

    #[test]
    fn test_form_commands_need_open_form() {
        let shop = ShopState::default();
        let err = field_event(&shop, "city", FieldEvent::Focus).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert!(get_order_form(&shop).is_err());
    }

    #[test]
    fn test_paste_into_phone_is_sanitized() {
        let shop = opened();
        let feedback =
            field_event(&shop, "contactNo", FieldEvent::Paste("(555) 123-4567".into())).unwrap();
        assert_eq!(feedback.value, "5551234567");

        let feedback = field_event(&shop, "quantity", FieldEvent::Input("0".into())).unwrap();
        assert_eq!(feedback.value, "1");
    }

    #[test]
    fn test_key_down_filters_phone_only() {
        let shop = opened();
        assert_eq!(key_down(&shop, "contactNo", "a", false).unwrap(), KeyDecision::Block);
        assert_eq!(key_down(&shop, "contactNo", "7", false).unwrap(), KeyDecision::Allow);
        assert_eq!(key_down(&shop, "contactNo", "v", true).unwrap(), KeyDecision::Allow);
        assert_eq!(key_down(&shop, "city", "a", false).unwrap(), KeyDecision::Allow);
        assert_eq!(key_down(&shop, "nickname", "a", false).unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_sink() {
        let shop = opened();
        field_event(&shop, "storeName", FieldEvent::Input("Lincoln Mart".into())).unwrap();
        let sink = FakeSink::default();

        let err = submit_order(&shop, &sink).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);

        let view = get_order_form(&shop).unwrap();
        let errors = view.errors.unwrap();
        assert_eq!(errors.messages[0], "Store ID is required");
        assert!(view.fields.iter().any(|f| f.invalid));
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert!(!view.submit.disabled);
    }

    #[tokio::test]
    async fn test_past_date_message() {
        let shop = opened();
        fill_valid(&shop);
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        field_event(
            &shop,
            "dateNeeded",
            FieldEvent::Input(yesterday.format("%Y-%m-%d").to_string()),
        )
        .unwrap();

        submit_order(&shop, &FakeSink::default()).await.unwrap_err();
        let messages = get_order_form(&shop).unwrap().errors.unwrap().messages;
        assert_eq!(messages, vec!["Date needed must be today or in the future".to_string()]);
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let shop = opened();
        fill_valid(&shop);
        let number = get_order_form(&shop).unwrap().fields[0].value.clone();

        let modal = submit_order(&shop, &FakeSink::default()).await.unwrap();
        assert_eq!(modal.order_number, number);
        assert_eq!(modal.download_label, "Download Order PDF");

        shop.with_shop(|s| {
            assert!(s.form.is_none());
            assert_eq!(s.success.as_ref(), Some(&modal));
            let order = s.last_order.as_ref().unwrap();
            assert_eq!(order.order_number, number);
            assert_eq!(order.current_stock, "Not specified");
        });
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_open() {
        let shop = opened();
        fill_valid(&shop);
        let sink = FakeSink {
            fail: true,
            ..FakeSink::default()
        };

        let err = submit_order(&shop, &sink).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionFailed);
        assert_eq!(
            err.message,
            "There was an error submitting your order. Please try again."
        );

        let view = get_order_form(&shop).unwrap();
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert!(!view.submit.disabled);
        assert!(shop.with_shop(|s| s.last_order.is_none()));
    }

    #[tokio::test]
    async fn test_state_usable_while_in_flight() {
        let shop = opened();
        fill_valid(&shop);
        let gate = Arc::new(Notify::new());
        let sink = Arc::new(FakeSink {
            gate: Some(gate.clone()),
            ..FakeSink::default()
        });

        let task = {
            let shop = shop.clone();
            let sink = sink.clone();
            tokio::spawn(async move { submit_order(&shop, sink.as_ref()).await })
        };

        while sink.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let view = get_order_form(&shop).unwrap();
        assert_eq!(view.submit.label, SUBMITTING_LABEL);
        assert!(view.submit.disabled);

        let again = submit_order(&shop, &FakeSink::default()).await.unwrap_err();
        assert_eq!(again.code, ErrorCode::InvalidState);
        assert_eq!(cancel_order_form(&shop).unwrap_err().code, ErrorCode::InvalidState);

        // Cart commands are not blocked by the pending request.
        shop.with_shop_mut(|s| s.cart.increment(0)).unwrap();

        gate.notify_one();
        task.await.unwrap().unwrap();
        assert!(shop.with_shop(|s| s.form.is_none()));
    }

    #[tokio::test]
    async fn test_reopen_refused_while_in_flight() {
        let shop = opened();
        fill_valid(&shop);
        let number = get_order_form(&shop).unwrap().fields[0].value.clone();
        let gate = Arc::new(Notify::new());
        let sink = Arc::new(FakeSink {
            gate: Some(gate.clone()),
            ..FakeSink::default()
        });

        let task = {
            let shop = shop.clone();
            let sink = sink.clone();
            tokio::spawn(async move { submit_order(&shop, sink.as_ref()).await })
        };
        while sink.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let err = open_order_form(&shop, &ConfigState::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(
            err.message,
            "Cannot open a new order form while submission is submitting"
        );
        assert_eq!(get_order_form(&shop).unwrap().fields[0].value, number);

        gate.notify_one();
        let modal = task.await.unwrap().unwrap();
        assert_eq!(modal.order_number, number);
        shop.with_shop(|s| {
            assert_eq!(s.last_order.as_ref().unwrap().order_number, number);
            assert_eq!(s.success.as_ref(), Some(&modal));
        });

        // Settled, so a new form opens again.
        let view = open_order_form(&shop, &ConfigState::default()).unwrap();
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert!(shop.with_shop(|s| s.success.is_none()));
    }

    #[tokio::test]
    async fn test_unconfigured_webhook_fails_without_losing_form() {
        let shop = opened();
        fill_valid(&shop);
        let client = WebhookClient::new(WebhookConfig::default()).unwrap();

        let err = submit_order(&shop, &client).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionFailed);
        assert_eq!(
            err.message,
            "There was an error submitting your order. Please try again."
        );
        let view = get_order_form(&shop).unwrap();
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert_eq!(view.fields[1].value, "S-12");
    }

    #[test]
    fn test_cancel_discards_form() {
        let shop = opened();
        cancel_order_form(&shop).unwrap();
        assert!(shop.with_shop(|s| s.form.is_none()));
        assert_eq!(cancel_order_form(&shop).unwrap_err().code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_download_order_pdf() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbState::new(
            Database::new(DbConfig::in_memory()).await.unwrap(),
            DocumentStore::new(tmp.path()),
        );
        let shop = opened();

        let err = download_order_pdf(&shop, &db).await.unwrap_err();
        assert_eq!(err.message, "No order data available for PDF generation.");

        fill_valid(&shop);
        let modal = submit_order(&shop, &FakeSink::default()).await.unwrap();

        let path = download_order_pdf(&shop, &db).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&format!("Order_{}_", modal.order_number)));
        assert!(name.ends_with(".pdf"));
        assert!(tokio::fs::read(&path).await.unwrap().starts_with(b"%PDF-"));
    }
}
