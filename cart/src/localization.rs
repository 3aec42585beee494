// shopcart/src/localization.rs

//! Resource keys used by the cart rules and their default English texts.

use std::collections::HashMap;

use crate::ports::Localizer;

pub mod keys {
  pub const PRODUCT_DELETED: &str = "ShoppingCart.ProductDeleted";
  pub const PRODUCT_UNPUBLISHED: &str = "ShoppingCart.ProductUnpublished";
  pub const BUYING_DISABLED: &str = "ShoppingCart.BuyingDisabled";
  pub const WISHLIST_DISABLED: &str = "ShoppingCart.WishlistDisabled";
  pub const CALL_FOR_PRICE: &str = "Products.CallForPrice";
  pub const CUSTOMER_ENTERED_PRICE_RANGE: &str = "ShoppingCart.CustomerEnteredPrice.RangeError";
  pub const MINIMUM_QUANTITY: &str = "ShoppingCart.MinimumQuantity";
  pub const MAXIMUM_QUANTITY: &str = "ShoppingCart.MaximumQuantity";
  pub const ALLOWED_QUANTITIES: &str = "ShoppingCart.AllowedQuantities";
  pub const OUT_OF_STOCK: &str = "ShoppingCart.OutOfStock";
  pub const AVAILABILITY_RANGE: &str = "ShoppingCart.AvailabilityRange";
  pub const QUANTITY_EXCEEDS_STOCK: &str = "ShoppingCart.QuantityExceedsStock";
  pub const NOT_AVAILABLE: &str = "ShoppingCart.NotAvailable";
  pub const SELECT_ATTRIBUTE: &str = "ShoppingCart.SelectAttribute";
  pub const TEXTBOX_MINIMUM_LENGTH: &str = "ShoppingCart.TextboxMinimumLength";
  pub const TEXTBOX_MAXIMUM_LENGTH: &str = "ShoppingCart.TextboxMaximumLength";
  pub const ASSOCIATED_ATTRIBUTE_WARNING: &str = "ShoppingCart.AssociatedAttributeWarning";
  pub const RECIPIENT_NAME_ERROR: &str = "ShoppingCart.RecipientNameError";
  pub const RECIPIENT_EMAIL_ERROR: &str = "ShoppingCart.RecipientEmailError";
  pub const SENDER_NAME_ERROR: &str = "ShoppingCart.SenderNameError";
  pub const SENDER_EMAIL_ERROR: &str = "ShoppingCart.SenderEmailError";
  pub const RENTAL_ENTER_START_DATE: &str = "ShoppingCart.Rental.EnterStartDate";
  pub const RENTAL_ENTER_END_DATE: &str = "ShoppingCart.Rental.EnterEndDate";
  pub const RENTAL_START_DATE_LESS_END_DATE: &str = "ShoppingCart.Rental.StartDateLessEndDate";
  pub const RENTAL_START_DATE_SHOULD_BE_FUTURE: &str = "ShoppingCart.Rental.StartDateShouldBeFuture";
  pub const REQUIRED_PRODUCT_WARNING: &str = "ShoppingCart.RequiredProductWarning";
  pub const REQUIRED_PRODUCT_UPDATE_WARNING: &str = "ShoppingCart.RequiredProductUpdateWarning";
  pub const CANNOT_LOAD_PRODUCT: &str = "ShoppingCart.CannotLoadProduct";
  pub const CANNOT_MIX_STANDARD_AND_AUTOSHIP: &str = "ShoppingCart.CannotMixStandardAndAutoshipProducts";
  pub const CONFLICTING_SHIPMENT_SCHEDULES: &str = "ShoppingCart.ConflictingShipmentSchedules";
  pub const QUANTITY_SHOULD_BE_POSITIVE: &str = "ShoppingCart.QuantityShouldPositive";
  pub const MAXIMUM_SHOPPING_CART_ITEMS: &str = "ShoppingCart.MaximumShoppingCartItems";
  pub const MAXIMUM_WISHLIST_ITEMS: &str = "ShoppingCart.MaximumWishlistItems";
}

/// Fixed texts that are not looked up through the localizer.
pub mod fixed {
  pub const NOT_SIMPLE_PRODUCT: &str = "This is not simple product";
  pub const ATTRIBUTE_ERROR: &str = "Attribute error";
  pub const READ_ONLY_VALUES_CHANGED: &str = "You cannot change read-only values";
  pub const SHOPPING_CART_DISABLED: &str = "Shopping cart is disabled";
  pub const WISHLIST_DISABLED: &str = "Wishlist is disabled";
  pub const SEARCH_ENGINE: &str = "Search engine can't add to cart";
  pub const ASSOCIATED_PRODUCT_MISSING: &str = "Associated product cannot be loaded - {0}";
}

const DEFAULT_RESOURCES: &[(&str, &str)] = &[
  (keys::PRODUCT_DELETED, "Product is deleted"),
  (keys::PRODUCT_UNPUBLISHED, "Product is not published"),
  (keys::BUYING_DISABLED, "Buying is disabled for this product"),
  (keys::WISHLIST_DISABLED, "Wishlist is disabled for this product"),
  (keys::CALL_FOR_PRICE, "Call for price"),
  (keys::CUSTOMER_ENTERED_PRICE_RANGE, "The price must be from {0} to {1}"),
  (keys::MINIMUM_QUANTITY, "The minimum quantity allowed for purchase is {0}."),
  (keys::MAXIMUM_QUANTITY, "The maximum quantity allowed for purchase is {0}."),
  (keys::ALLOWED_QUANTITIES, "Allowed quantities for this product: {0}"),
  (keys::OUT_OF_STOCK, "Out of stock"),
  (keys::AVAILABILITY_RANGE, "Available in {0}"),
  (
    keys::QUANTITY_EXCEEDS_STOCK,
    "Your quantity exceeds stock on hand. The maximum quantity that can be added is {0}.",
  ),
  (keys::NOT_AVAILABLE, "This product is not available"),
  (keys::SELECT_ATTRIBUTE, "Please select {0}"),
  (keys::TEXTBOX_MINIMUM_LENGTH, "{0} : minimum length is {1} chars"),
  (keys::TEXTBOX_MAXIMUM_LENGTH, "{0} : maximum length is {1} chars"),
  (keys::ASSOCIATED_ATTRIBUTE_WARNING, "{0}. {1}. {2}"),
  (keys::RECIPIENT_NAME_ERROR, "Enter valid recipient name"),
  (keys::RECIPIENT_EMAIL_ERROR, "Enter valid recipient email"),
  (keys::SENDER_NAME_ERROR, "Enter valid sender name"),
  (keys::SENDER_EMAIL_ERROR, "Enter valid sender email"),
  (keys::RENTAL_ENTER_START_DATE, "Enter rental start date"),
  (keys::RENTAL_ENTER_END_DATE, "Enter rental end date"),
  (keys::RENTAL_START_DATE_LESS_END_DATE, "Rental start date should be less than end date"),
  (keys::RENTAL_START_DATE_SHOULD_BE_FUTURE, "Rental start date should be the future date"),
  (
    keys::REQUIRED_PRODUCT_WARNING,
    "This product requires the following product is added to the cart in the quantity of {1}: {0}",
  ),
  (keys::REQUIRED_PRODUCT_UPDATE_WARNING, "This product is required in the quantity of {0}"),
  (keys::CANNOT_LOAD_PRODUCT, "Product (Id={0}) cannot be loaded"),
  (
    keys::CANNOT_MIX_STANDARD_AND_AUTOSHIP,
    "Your cart has standard and autoship (recurring) items. Only one product type is allowed per order.",
  ),
  (
    keys::CONFLICTING_SHIPMENT_SCHEDULES,
    "Your cart has auto-ship (recurring) items with conflicting shipment schedules. Only one auto-ship schedule is allowed per order.",
  ),
  (keys::QUANTITY_SHOULD_BE_POSITIVE, "Quantity should be positive"),
  (
    keys::MAXIMUM_SHOPPING_CART_ITEMS,
    "The maximum number of distinct products allowed in the cart is {0}.",
  ),
  (
    keys::MAXIMUM_WISHLIST_ITEMS,
    "The maximum number of distinct products allowed in the wishlist is {0}.",
  ),
];

/// English resources, with per-key overrides.
#[derive(Debug, Clone)]
pub struct DefaultLocalizer {
  resources: HashMap<String, String>,
}

impl DefaultLocalizer {
  pub fn new() -> Self {
    Self {
      resources: DEFAULT_RESOURCES
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect(),
    }
  }

  pub fn with_resource(mut self, key: &str, text: &str) -> Self {
    self.resources.insert(key.to_string(), text.to_string());
    self
  }
}

impl Default for DefaultLocalizer {
  fn default() -> Self {
    Self::new()
  }
}

impl Localizer for DefaultLocalizer {
  fn resource(&self, key: &str) -> String {
    match self.resources.get(key) {
      Some(text) => text.clone(),
      None => {
        tracing::warn!(%key, "Missing localization resource.");
        key.to_string()
      }
    }
  }
}

/// Replaces `{0}`, `{1}`... with the given arguments.
pub fn format_template(template: &str, args: &[&dyn std::fmt::Display]) -> String {
  args
    .iter()
    .enumerate()
    .fold(template.to_string(), |text, (idx, arg)| {
      text.replace(&format!("{{{}}}", idx), &arg.to_string())
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_key_falls_back_to_key() {
    let loc = DefaultLocalizer::new();
    assert_eq!(loc.resource("Nope.Missing"), "Nope.Missing");
    assert_eq!(loc.resource(keys::OUT_OF_STOCK), "Out of stock");
  }

  #[test]
  fn overrides_replace_defaults() {
    let loc = DefaultLocalizer::new().with_resource(keys::OUT_OF_STOCK, "Sold out");
    assert_eq!(loc.resource(keys::OUT_OF_STOCK), "Sold out");
  }

  #[test]
  fn template_positions() {
    let text = format_template("{1} then {0}, again {1}", &[&"a", &2]);
    assert_eq!(text, "2 then a, again 2");
  }
}
