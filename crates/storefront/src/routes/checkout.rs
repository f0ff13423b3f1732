//! Checkout route handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use delicious_bites_core::{DeliveryType, PaymentMethod};

use crate::error::{AppError, add_breadcrumb};
use crate::middleware::OptionalIdentity;
use crate::routes::cart::CartView;
use crate::services::checkout::{CheckoutError, CheckoutForm, CheckoutRequest, PriceBreakdown};
use crate::services::payment::CardDetails;
use crate::state::AppState;

/// Where an empty-cart checkout is sent.
const CART_PATH: &str = "/cart";

/// Delivery type selector.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteQuery {
    pub delivery_type: DeliveryType,
}

/// Price breakdown with its lead time.
#[derive(Debug, Serialize)]
pub struct QuoteView {
    pub delivery_type: DeliveryType,
    pub lead_time: &'static str,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
}

impl QuoteView {
    fn new(breakdown: PriceBreakdown, delivery_type: DeliveryType) -> Self {
        Self {
            delivery_type,
            lead_time: delivery_type.lead_time(),
            breakdown,
        }
    }
}

/// Contact details filled in from the signed-in identity.
#[derive(Debug, Default, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
}

/// Checkout page data.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub cart: CartView,
    pub quote: QuoteView,
    pub prefill: Prefill,
}

/// Checkout submission body.
#[derive(Deserialize)]
pub struct CheckoutBody {
    #[serde(default)]
    pub customer: CheckoutForm,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

/// Checkout page. An empty cart redirects back to the cart.
#[instrument(skip(state, identity))]
pub async fn show(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Query(query): Query<QuoteQuery>,
) -> Response {
    let cart = state.cart().snapshot().await;
    if cart.is_empty() {
        return Redirect::to(CART_PATH).into_response();
    }

    let breakdown = PriceBreakdown::compute(cart.subtotal(), query.delivery_type);
    let prefill = identity.map_or_else(Prefill::default, |identity| Prefill {
        name: identity.name,
        email: identity.email.to_string(),
    });

    Json(CheckoutView {
        cart: CartView::from(&cart),
        quote: QuoteView::new(breakdown, query.delivery_type),
        prefill,
    })
    .into_response()
}

/// Price the cart for a delivery type.
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Json<QuoteView> {
    let breakdown = state.checkout().quote(query.delivery_type).await;
    Json(QuoteView::new(breakdown, query.delivery_type))
}

/// Pay and place the order.
///
/// Returns 201 with the confirmation, or redirects to the cart if it is
/// empty. Validation and payment failures leave everything unchanged.
#[instrument(skip(state, body), fields(delivery_type = %body.delivery_type))]
pub async fn place_order(State(state): State<AppState>, Json(body): Json<CheckoutBody>) -> Response {
    add_breadcrumb("checkout", "Submitted checkout", None);

    let request = CheckoutRequest {
        form: body.customer,
        delivery_type: body.delivery_type,
        payment_method: body.payment_method,
        card: body.card,
    };

    match state.checkout().place_order(request).await {
        Ok(confirmation) => {
            let order_id = confirmation.order.id.to_string();
            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("order_id", order_id.as_str())]),
            );
            (StatusCode::CREATED, Json(confirmation)).into_response()
        }
        Err(CheckoutError::EmptyCart) => Redirect::to(CART_PATH).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
