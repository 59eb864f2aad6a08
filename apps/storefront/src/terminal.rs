//! # Terminal Adapter
//!
//! Reads one command per line from stdin and prints the resulting view
//! model as JSON on stdout. Logs go to stderr.
//!
//! ## Command Reference
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ Line                         │ Effect                                   │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ shop                         │ product panel + summary                  │
//! │ add <product> [n]            │ stepper up (n times)                     │
//! │ remove <product> [n]         │ stepper down, clamped at zero            │
//! │ cart                         │ open / close the cart modal              │
//! │ promo [code]                 │ apply a promo code, empty clears         │
//! │ address <text>               │ delivery address                         │
//! │ checkout                     │ save receipt PDF, reset cart             │
//! │ order                        │ open the order form                      │
//! │ form                         │ show the order form                      │
//! │ set <field> <value>          │ type into a field                        │
//! │ paste <field> <value>        │ paste into a field                       │
//! │ focus <field> / blur <field> │ focus or leave a field                   │
//! │ key <field> <key> [ctrl]     │ would this key press be accepted         │
//! │ submit                       │ validate and send (runs in background)   │
//! │ cancel                       │ close the order form                     │
//! │ download                     │ save the last order's PDF                │
//! │ dismiss                      │ close the success dialog                 │
//! │ hero                         │ current hero image                       │
//! │ scroll <y>                   │ sticky header visibility                 │
//! │ menu <n> / menu close        │ toggle a dropdown / click outside        │
//! │ help / quit                  │                                          │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use firewood_core::sanitize::FieldEvent;
use firewood_sync::OrderSink;

use crate::commands::{cart, order, page};
use crate::error::ApiError;
use crate::Storefront;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Shop,
    Adjust { product: String, delta: i64 },
    ToggleCart,
    Promo(String),
    Address(String),
    Checkout,
    OpenForm,
    ShowForm,
    Field { field: String, event: FieldEvent },
    Key { field: String, key: String, ctrl: bool },
    Submit,
    Cancel,
    Download,
    Dismiss,
    Hero,
    Scroll(f64),
    Menu(usize),
    CloseMenus,
    Help,
    Quit,
}

/// What to print for a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    View(Value),
    Notice(String),
    /// Work continues in the background; its outcome prints when done.
    Pending,
    Quit,
}

fn view<T: Serialize>(value: &T) -> Result<Reply, ApiError> {
    serde_json::to_value(value)
        .map(Reply::View)
        .map_err(|e| ApiError::internal(e.to_string()))
}

fn usage(message: &str) -> ApiError {
    ApiError::validation(format!("Usage: {}", message))
}

/// Splits off the first word; the rest keeps its inner spacing.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

pub fn parse(line: &str) -> Result<Command, ApiError> {
    let (verb, rest) = split_word(line.trim());

    let command = match verb.to_lowercase().as_str() {
        "shop" => Command::Shop,
        "add" | "remove" => {
            let (product, count) = split_word(rest);
            if product.is_empty() {
                return Err(usage("add|remove <product> [count]"));
            }
            let count: i64 = if count.is_empty() {
                1
            } else {
                count.parse().map_err(|_| usage("add|remove <product> [count]"))?
            };
            let delta = if verb.eq_ignore_ascii_case("add") {
                count
            } else {
                count
                    .checked_neg()
                    .ok_or_else(|| usage("add|remove <product> [count]"))?
            };
            Command::Adjust {
                product: product.to_string(),
                delta,
            }
        }
        "cart" => Command::ToggleCart,
        "promo" => Command::Promo(rest.to_string()),
        "address" => Command::Address(rest.to_string()),
        "checkout" => Command::Checkout,
        "order" => Command::OpenForm,
        "form" => Command::ShowForm,
        "set" | "paste" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(usage("set|paste <field> <value>"));
            }
            let event = if verb.eq_ignore_ascii_case("set") {
                FieldEvent::Input(value.to_string())
            } else {
                FieldEvent::Paste(value.to_string())
            };
            Command::Field {
                field: field.to_string(),
                event,
            }
        }
        "focus" | "blur" => {
            if rest.is_empty() {
                return Err(usage("focus|blur <field>"));
            }
            let event = if verb.eq_ignore_ascii_case("focus") {
                FieldEvent::Focus
            } else {
                FieldEvent::Blur
            };
            Command::Field {
                field: rest.to_string(),
                event,
            }
        }
        "key" => {
            let (field, rest) = split_word(rest);
            let (key, modifier) = split_word(rest);
            if field.is_empty() || key.is_empty() {
                return Err(usage("key <field> <key> [ctrl]"));
            }
            Command::Key {
                field: field.to_string(),
                key: key.to_string(),
                ctrl: modifier.eq_ignore_ascii_case("ctrl"),
            }
        }
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "download" => Command::Download,
        "dismiss" => Command::Dismiss,
        "hero" => Command::Hero,
        "scroll" => Command::Scroll(rest.parse().map_err(|_| usage("scroll <y>"))?),
        "menu" if rest.eq_ignore_ascii_case("close") => Command::CloseMenus,
        "menu" => Command::Menu(rest.parse().map_err(|_| usage("menu <index>|close"))?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ApiError::not_found("Command", other)),
    };
    Ok(command)
}

impl<S: OrderSink + 'static> Storefront<S> {
    /// Runs one command against the app state.
    ///
    /// `submit` is spawned so the prompt stays usable while the request is
    /// in flight. Nothing prints up front: validation errors, the failure
    /// notice or the success modal print when the task ends.
    pub async fn execute(&self, command: Command) -> Result<Reply, ApiError> {
        debug!(?command, "Executing");
        match command {
            Command::Shop => view(&cart::get_shop(&self.shop)),
            Command::Adjust { product, delta } => {
                view(&cart::adjust_quantity(&self.shop, &product, delta)?)
            }
            Command::ToggleCart => view(&cart::toggle_cart(&self.shop)),
            Command::Promo(code) => view(&cart::apply_promo(&self.shop, &code)),
            Command::Address(text) => view(&cart::set_address(&self.shop, &text)),
            Command::Checkout => view(&cart::place_order(&self.shop, &self.db).await?),
            Command::OpenForm => view(&order::open_order_form(&self.shop, &self.config)?),
            Command::ShowForm => view(&order::get_order_form(&self.shop)?),
            Command::Field { field, event } => {
                let feedback = order::field_event(&self.shop, &field, event)?;
                view(&json!({ "value": feedback.value, "invalid": feedback.invalid }))
            }
            Command::Key { field, key, ctrl } => {
                let decision = order::key_down(&self.shop, &field, &key, ctrl)?;
                Ok(Reply::Notice(format!("{:?}", decision)))
            }
            Command::Submit => {
                let shop = self.shop.clone();
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    match order::submit_order(&shop, sink.as_ref()).await {
                        Ok(modal) => print_reply(&view(&modal)),
                        Err(err) => print_reply(&Err(err)),
                    }
                });
                Ok(Reply::Pending)
            }
            Command::Cancel => {
                order::cancel_order_form(&self.shop)?;
                Ok(Reply::Notice("Order form closed.".to_string()))
            }
            Command::Download => {
                let path = order::download_order_pdf(&self.shop, &self.db).await?;
                Ok(Reply::Notice(format!("Saved {}", path.display())))
            }
            Command::Dismiss => {
                order::dismiss_success(&self.shop);
                Ok(Reply::Notice("Closed.".to_string()))
            }
            Command::Hero => Ok(Reply::Notice(page::hero_image(&self.hero).to_string())),
            Command::Scroll(y) => {
                let visible = page::scroll(&self.shop, y);
                view(&json!({ "headerVisible": visible }))
            }
            Command::Menu(index) => view(&page::toggle_dropdown(&self.shop, index)),
            Command::CloseMenus => view(&page::close_dropdowns(&self.shop)),
            Command::Help => Ok(Reply::Notice(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }
}

const HELP: &str = "shop | add/remove <product> [n] | cart | promo [code] | address <text> | \
checkout | order | form | set/paste <field> <value> | focus/blur <field> | \
key <field> <key> [ctrl] | submit | cancel | download | dismiss | hero | \
scroll <y> | menu <n>|close | quit";

fn print_reply(reply: &Result<Reply, ApiError>) {
    match reply {
        Ok(Reply::View(value)) => match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!("Could not render view: {}", e),
        },
        Ok(Reply::Notice(text)) => println!("{}", text),
        Ok(Reply::Pending) | Ok(Reply::Quit) => {}
        Err(err) => match serde_json::to_string(err) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", err),
        },
    }
}

/// Reads stdin until `quit` or end of input.
pub async fn run<S: OrderSink + 'static>(app: &Storefront<S>) -> Result<(), ApiError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{} - type 'help' for commands", app.config.store_name);

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
    {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match parse(&line) {
            Ok(command) => app.execute(command).await,
            Err(err) => Err(err),
        };
        if matches!(reply, Ok(Reply::Quit)) {
            break;
        }
        print_reply(&reply);
    }
    Ok(())
}
