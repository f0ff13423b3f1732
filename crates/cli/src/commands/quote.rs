//! Basket pricing.

use delicious_bites_core::{DeliveryType, MenuItemId};
use delicious_bites_storefront::state::AppState;
use delicious_bites_storefront::stores::MAX_LINE_QUANTITY;

/// Parse an `ID` or `ID=QTY` basket line.
///
/// # Errors
///
/// Returns a message if the ID or quantity is not a number, or the quantity is
/// zero or above what one cart line holds.
pub fn parse_line(raw: &str) -> Result<(MenuItemId, u32), String> {
    let (id, quantity) = raw.split_once('=').unwrap_or((raw, "1"));

    let id = id
        .parse::<MenuItemId>()
        .map_err(|e| format!("invalid menu item ID {id:?}: {e}"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity {quantity:?}: {e}"))?;

    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(format!("quantity must be at most {MAX_LINE_QUANTITY}"));
    }
    Ok((id, quantity))
}

/// Fill a cart with `lines` and log its price breakdown.
///
/// # Errors
///
/// Returns an error if a line names an item that is not on the menu.
pub async fn run(
    state: &AppState,
    lines: &[(MenuItemId, u32)],
    pickup: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for &(id, quantity) in lines {
        let item = state
            .catalog()
            .get(id)
            .await
            .ok_or_else(|| format!("Unknown menu item: {id}"))?;
        let cart = state.cart().add_item(&item).await;
        let held = cart.line(id).map_or(1, |line| line.quantity);
        state
            .cart()
            .update_quantity(id, i64::from(held) + i64::from(quantity) - 1)
            .await;
    }

    let delivery_type = if pickup {
        DeliveryType::Pickup
    } else {
        DeliveryType::Delivery
    };

    let cart = state.cart().snapshot().await;
    for line in cart.lines() {
        tracing::info!("  {} x {:<28} {}", line.quantity, line.name, line.line_total());
    }

    let breakdown = state.checkout().quote(delivery_type).await;
    tracing::info!("Subtotal:     {}", breakdown.subtotal);
    tracing::info!("Delivery fee: {}", breakdown.delivery_fee);
    tracing::info!("Tax:          {}", breakdown.tax);
    tracing::info!("Total:        {}", breakdown.total);
    tracing::info!("Ready in {} ({delivery_type})", delivery_type.lead_time());

    Ok(())
}
