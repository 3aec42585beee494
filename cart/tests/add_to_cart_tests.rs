// tests/add_to_cart_tests.rs
mod common;

use chrono::NaiveDate;
use common::*;
use rust_decimal::Decimal;
use shopcart::models::{
  AttributeControlType, AttributeSelection, AvailabilityRange, BackorderMode, CartEvent, CartType, Customer,
  GiftCardInfo, GiftCardType, ManageInventoryMethod, Product, ProductAttribute, ProductAttributeMapping,
  ProductAttributeValue,
};
use shopcart::{AddToCartRequest, CartError, CartSettings};

fn stocked(id: u32, name: &str, stock: i32) -> Product {
  let mut p = Product::new(id, name);
  p.manage_inventory_method = ManageInventoryMethod::ManageStock;
  p.backorder_mode = BackorderMode::NoBackorders;
  p.stock_quantity = stock;
  p
}

fn add_accepted(h: &Harness, request: AddToCartRequest) {
  let warnings = h.service.add_to_cart(request).unwrap();
  assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn test_quantity_below_minimum_is_rejected_without_mutation() {
  let h = Harness::new();
  let customer = h.customer();
  let mut product = Product::new(1, "Pencil");
  product.order_minimum_quantity = 2;
  let product = h.product(product);

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(1))
    .unwrap();

  assert_eq!(warnings, vec!["The minimum quantity allowed for purchase is 2.".to_string()]);
  assert!(h.cart_items.is_empty());
  assert!(h.events.events().is_empty());
  assert!(!h.stored_customer(&customer).has_cart_items);
}

#[test]
fn test_out_of_stock_without_backorders_is_rejected() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.product(stocked(1, "Lamp", 0));

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE))
    .unwrap();

  assert_eq!(warnings, vec!["Out of stock".to_string()]);
  assert!(h.cart(&customer).is_empty());
}

#[test]
fn test_out_of_stock_reports_availability_range_when_configured() {
  let h = Harness::new();
  let customer = h.customer();
  h.catalog.add_availability_range(AvailabilityRange {
    id: 4,
    name: "2-3 weeks".to_string(),
  });
  let mut product = stocked(1, "Lamp", 0);
  product.availability_range_id = Some(4);
  let product = h.product(product);

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE))
    .unwrap();

  assert_eq!(warnings, vec!["Available in 2-3 weeks".to_string()]);
}

#[test]
fn test_quantity_above_stock_reports_what_is_left() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.product(stocked(1, "Lamp", 3));

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(5))
    .unwrap();

  assert_eq!(
    warnings,
    vec!["Your quantity exceeds stock on hand. The maximum quantity that can be added is 3.".to_string()]
  );
}

#[test]
fn test_backorders_allow_adding_beyond_stock() {
  let h = Harness::new();
  let customer = h.customer();
  let mut product = stocked(1, "Lamp", 0);
  product.backorder_mode = BackorderMode::AllowQtyBelowZero;
  let product = h.product(product);

  h.add_ok(&customer, &product, 4);
  assert_eq!(h.cart(&customer)[0].quantity, 4);
}

#[test]
fn test_new_item_is_inserted_and_flag_set() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.simple_product(1, "Notebook");

  h.add_ok(&customer, &product, 2);

  let cart = h.cart(&customer);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart[0].product_id, 1);
  assert_eq!(cart[0].quantity, 2);
  assert_eq!(cart[0].created_at, test_now());
  assert!(h.stored_customer(&customer).has_cart_items);
  assert_eq!(h.customers.checkout_resets(customer.id), 1);

  let events = h.events.events();
  assert_eq!(events.len(), 1);
  assert!(matches!(&events[0], CartEvent::Inserted(item) if item.id == cart[0].id));
}

#[test]
fn test_equal_item_is_merged() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.simple_product(1, "Notebook");

  h.add_ok(&customer, &product, 2);
  h.clock.advance(chrono::Duration::minutes(5));
  h.add_ok(&customer, &product, 3);

  let cart = h.cart(&customer);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart[0].quantity, 5);
  assert_eq!(cart[0].updated_at, test_now() + chrono::Duration::minutes(5));

  let events = h.events.events();
  assert_eq!(events.len(), 2);
  assert!(matches!(&events[1], CartEvent::Updated(item) if item.quantity == 5));
}

#[test]
fn test_merge_is_validated_with_summed_quantity() {
  let h = Harness::new();
  let customer = h.customer();
  let mut product = Product::new(1, "Notebook");
  product.order_maximum_quantity = 4;
  let product = h.product(product);

  h.add_ok(&customer, &product, 3);
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(2))
    .unwrap();

  assert_eq!(warnings, vec!["The maximum quantity allowed for purchase is 4.".to_string()]);
  assert_eq!(h.cart(&customer)[0].quantity, 3);
}

#[test]
fn test_different_attributes_make_separate_lines() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.simple_product(10, "T-shirt");
  h.catalog.add_attribute(ProductAttribute {
    id: 100,
    name: "Color".to_string(),
  });
  h.catalog
    .add_mapping(ProductAttributeMapping::new(1, 10, 100, AttributeControlType::DropdownList));
  h.catalog.add_value(ProductAttributeValue::new(11, 1, "Red"));
  h.catalog.add_value(ProductAttributeValue::new(12, 1, "Blue"));

  for value in ["11", "12", "11"] {
    let warnings = h
      .service
      .add_to_cart(
        AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE)
          .attributes(AttributeSelection::new().with_value(1, value)),
      )
      .unwrap();
    assert!(warnings.is_empty(), "{:?}", warnings);
  }

  let cart = h.cart(&customer);
  assert_eq!(cart.len(), 2);
  assert_eq!(cart[0].attributes.values(1), vec!["11"]);
  assert_eq!(cart[0].quantity, 2);
  assert_eq!(cart[1].quantity, 1);
}

#[test]
fn test_permission_checks_return_single_warning() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.simple_product(1, "Notebook");

  h.authorization.deny_cart_type(CartType::Wishlist);
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::Wishlist, STORE))
    .unwrap();
  assert_eq!(warnings, vec!["Wishlist is disabled".to_string()]);

  h.authorization.deny_cart_type(CartType::ShoppingCart);
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(0))
    .unwrap();
  assert_eq!(warnings, vec!["Shopping cart is disabled".to_string()]);
  assert_eq!(h.customers.checkout_resets(customer.id), 0);
}

#[test]
fn test_search_engines_and_non_positive_quantities_are_refused() {
  let h = Harness::new();
  let mut bot = h.customer();
  bot.is_search_engine_account = true;
  let customer = h.customer();
  let product = h.simple_product(1, "Notebook");

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&bot, &product, CartType::ShoppingCart, STORE))
    .unwrap();
  assert_eq!(warnings, vec!["Search engine can't add to cart".to_string()]);

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(-1))
    .unwrap();
  assert_eq!(warnings, vec!["Quantity should be positive".to_string()]);
  assert!(h.cart_items.is_empty());
}

#[test]
fn test_maximum_distinct_items_is_enforced() {
  let h = Harness::with_settings(CartSettings {
    maximum_shopping_cart_items: 2,
    ..CartSettings::default()
  });
  let customer = h.customer();
  for id in 1..=2 {
    let product = h.simple_product(id, &format!("Item {}", id));
    h.add_ok(&customer, &product, 1);
  }
  let third = h.simple_product(3, "Item 3");

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &third, CartType::ShoppingCart, STORE))
    .unwrap();
  assert_eq!(
    warnings,
    vec!["The maximum number of distinct products allowed in the cart is 2.".to_string()]
  );

  // merging into an existing line is still fine
  let first = h.simple_product(1, "Item 1");
  h.add_ok(&customer, &first, 1);
  assert_eq!(h.cart(&customer).len(), 2);
}

#[test]
fn test_wishlist_stock_check_follows_setting() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.product(stocked(1, "Lamp", 0));
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::Wishlist, STORE))
    .unwrap();
  assert_eq!(warnings, vec!["Out of stock".to_string()]);

  let h = Harness::with_settings(CartSettings {
    allow_out_of_stock_items_to_be_added_to_wishlist: true,
    ..CartSettings::default()
  });
  let customer = h.customer();
  let product = h.product(stocked(1, "Lamp", 0));
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::Wishlist, STORE))
    .unwrap();
  assert!(warnings.is_empty());
  assert_eq!(h.wishlist(&customer).len(), 1);
  assert!(h.cart(&customer).is_empty());
}

#[test]
fn test_lines_are_kept_per_store() {
  let h = Harness::new();
  let customer = h.customer();
  let product = h.simple_product(1, "Notebook");

  h.add_ok(&customer, &product, 1);
  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, 2))
    .unwrap();
  assert!(warnings.is_empty());

  assert_eq!(h.cart(&customer).len(), 1);
  assert_eq!(h.service.cart(customer.id, CartType::ShoppingCart, None).unwrap().len(), 2);
}

#[test]
fn test_merge_overflowing_quantity_reports_maximum() {
  let h = Harness::new();
  let customer = h.customer();
  let mut product = Product::new(1, "Bolt");
  product.order_maximum_quantity = i32::MAX;
  let product = h.product(product);
  h.add_ok(&customer, &product, 1);

  let warnings = h
    .service
    .add_to_cart(AddToCartRequest::new(&customer, &product, CartType::ShoppingCart, STORE).quantity(i32::MAX))
    .unwrap();

  assert_eq!(
    warnings,
    vec![format!("The maximum quantity allowed for purchase is {}.", i32::MAX)]
  );
  assert_eq!(h.cart(&customer)[0].quantity, 1);
}

#[test]
fn test_unknown_customer_fails_before_anything_is_stored() {
  let h = Harness::new();
  let stranger = Customer::new();
  let product = h.simple_product(1, "Notebook");

  let result = h
    .service
    .add_to_cart(AddToCartRequest::new(&stranger, &product, CartType::ShoppingCart, STORE));

  assert!(matches!(result, Err(CartError::CustomerNotFound(id)) if id == stranger.id));
  assert!(h.cart_items.is_empty());
  assert!(h.events.events().is_empty());
  assert_eq!(h.customers.checkout_resets(stranger.id), 0);
}

#[test]
fn test_gift_cards_merge_when_names_differ_only_in_case() {
  let h = Harness::new();
  let customer = h.customer();
  let mut card = Product::new(40, "Gift card");
  card.is_gift_card = true;
  card.gift_card_type = GiftCardType::Physical;
  let card = h.product(card);
  let add = |recipient: &str, sender: &str| {
    let selection = AttributeSelection::new().with_gift_card(GiftCardInfo {
      recipient_name: recipient.to_string(),
      sender_name: sender.to_string(),
      ..GiftCardInfo::default()
    });
    add_accepted(
      &h,
      AddToCartRequest::new(&customer, &card, CartType::ShoppingCart, STORE).attributes(selection),
    );
  };

  add("Ann", "Bob");
  add("ANN", "bob");
  add("Carl", "Bob");

  let cart = h.cart(&customer);
  assert_eq!(cart.len(), 2);
  assert_eq!(cart[0].quantity, 2);
  assert_eq!(cart[1].quantity, 1);
}

#[test]
fn test_customer_prices_merge_when_equal_to_the_cent() {
  let h = Harness::new();
  let customer = h.customer();
  let mut donation = Product::new(41, "Donation");
  donation.customer_enters_price = true;
  let donation = h.product(donation);
  let add = |price: Decimal| {
    add_accepted(
      &h,
      AddToCartRequest::new(&customer, &donation, CartType::ShoppingCart, STORE).customer_entered_price(price),
    );
  };

  add(Decimal::new(10001, 3));
  add(Decimal::new(10004, 3));
  add(Decimal::new(1001, 2));

  let cart = h.cart(&customer);
  assert_eq!(cart.len(), 2);
  assert_eq!(cart[0].quantity, 2);
  assert_eq!(cart[0].customer_entered_price, Decimal::new(10001, 3));
  assert_eq!(cart[1].customer_entered_price, Decimal::new(1001, 2));
}

#[test]
fn test_rentals_merge_only_for_the_same_period() {
  let h = Harness::new();
  let customer = h.customer();
  let mut bike = Product::new(50, "Bike");
  bike.is_rental = true;
  let bike = h.product(bike);
  let day = |d: u32| NaiveDate::from_ymd_opt(2024, 6, d);
  let add = |start, end| {
    add_accepted(
      &h,
      AddToCartRequest::new(&customer, &bike, CartType::ShoppingCart, STORE).rental(start, end),
    );
  };

  add(day(20), day(22));
  add(day(20), day(22));
  add(day(20), day(23));
  add(day(21), day(22));

  let cart = h.cart(&customer);
  assert_eq!(
    cart
      .iter()
      .map(|i| (i.rental_start, i.rental_end, i.quantity))
      .collect::<Vec<_>>(),
    vec![(day(20), day(22), 2), (day(20), day(23), 1), (day(21), day(22), 1)]
  );
}
