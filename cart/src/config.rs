// shopcart/src/config.rs

use crate::errors::{CartError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Catalog, order and shopping-cart settings consulted by the cart rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSettings {
  /// Reduce the quantity of required products when the product requiring them is removed.
  pub remove_required_products: bool,
  /// Render required-product warnings with a link to the product page.
  pub use_links_in_required_product_warnings: bool,
  /// Administrators impersonating a customer may buy "call for price" products.
  pub allow_admins_to_buy_call_for_price_products: bool,
  pub allow_out_of_stock_items_to_be_added_to_wishlist: bool,
  pub maximum_shopping_cart_items: usize,
  pub maximum_wishlist_items: usize,
  /// Offset of the default store time zone from UTC, in minutes.
  pub store_utc_offset_minutes: i32,
  /// Currency code appended to formatted prices in warnings.
  pub primary_currency_code: String,
}

impl Default for CartSettings {
  fn default() -> Self {
    Self {
      remove_required_products: false,
      use_links_in_required_product_warnings: true,
      allow_admins_to_buy_call_for_price_products: true,
      allow_out_of_stock_items_to_be_added_to_wishlist: false,
      maximum_shopping_cart_items: 1000,
      maximum_wishlist_items: 1000,
      store_utc_offset_minutes: 0,
      primary_currency_code: "USD".to_string(),
    }
  }
}

impl CartSettings {
  /// Loads settings from `CART_*` environment variables (and a `.env` file if
  /// present). Unset variables keep their defaults.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let defaults = Self::default();
    let settings = Self {
      remove_required_products: env_or("CART_REMOVE_REQUIRED_PRODUCTS", defaults.remove_required_products)?,
      use_links_in_required_product_warnings: env_or(
        "CART_USE_LINKS_IN_REQUIRED_PRODUCT_WARNINGS",
        defaults.use_links_in_required_product_warnings,
      )?,
      allow_admins_to_buy_call_for_price_products: env_or(
        "CART_ALLOW_ADMINS_TO_BUY_CALL_FOR_PRICE_PRODUCTS",
        defaults.allow_admins_to_buy_call_for_price_products,
      )?,
      allow_out_of_stock_items_to_be_added_to_wishlist: env_or(
        "CART_ALLOW_OUT_OF_STOCK_ITEMS_IN_WISHLIST",
        defaults.allow_out_of_stock_items_to_be_added_to_wishlist,
      )?,
      maximum_shopping_cart_items: env_or("CART_MAXIMUM_SHOPPING_CART_ITEMS", defaults.maximum_shopping_cart_items)?,
      maximum_wishlist_items: env_or("CART_MAXIMUM_WISHLIST_ITEMS", defaults.maximum_wishlist_items)?,
      store_utc_offset_minutes: env_or("CART_STORE_UTC_OFFSET_MINUTES", defaults.store_utc_offset_minutes)?,
      primary_currency_code: env::var("CART_PRIMARY_CURRENCY_CODE").unwrap_or(defaults.primary_currency_code),
    };

    if !(-14 * 60..=14 * 60).contains(&settings.store_utc_offset_minutes) {
      return Err(CartError::Config(format!(
        "CART_STORE_UTC_OFFSET_MINUTES out of range: {}",
        settings.store_utc_offset_minutes
      )));
    }

    tracing::info!("Cart settings loaded.");
    tracing::debug!(settings = ?settings, "Loaded cart settings");
    Ok(settings)
  }
}

fn env_or<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| CartError::Config(format!("Invalid {}: {}", var_name, e))),
    Err(_) => Ok(default),
  }
}
