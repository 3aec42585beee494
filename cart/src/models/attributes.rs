// shopcart/src/models/attributes.rs

use serde::{Deserialize, Serialize};

use super::selection::AttributeSelection;
use super::ProductId;

/// How an attribute is rendered, which decides how its selected values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeControlType {
  #[default]
  DropdownList,
  RadioList,
  Checkboxes,
  TextBox,
  MultilineTextbox,
  Datepicker,
  FileUpload,
  ColorSquares,
  ImageSquares,
  ReadonlyCheckboxes,
}

impl AttributeControlType {
  /// Option based controls select predefined values; the others carry free input.
  pub fn should_have_values(self) -> bool {
    !matches!(
      self,
      Self::TextBox | Self::MultilineTextbox | Self::Datepicker | Self::FileUpload
    )
  }

  pub fn validation_rules_allowed(self) -> bool {
    matches!(self, Self::TextBox | Self::MultilineTextbox | Self::FileUpload)
  }

  /// Free-input attributes never take part in attribute combinations.
  pub fn is_non_combinable(self) -> bool {
    !self.should_have_values()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
  pub id: u32,
  pub name: String,
}

/// The mapping is shown only when the selected values of `mapping_id` are exactly `value_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCondition {
  pub mapping_id: u32,
  pub value_ids: Vec<u32>,
}

/// An attribute as attached to one product (or, for checkout attributes, to the checkout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeMapping {
  pub id: u32,
  pub product_id: ProductId,
  pub attribute_id: u32,
  pub text_prompt: Option<String>,
  pub is_required: bool,
  pub control_type: AttributeControlType,
  pub validation_min_length: Option<usize>,
  pub validation_max_length: Option<usize>,
  pub condition: Option<AttributeCondition>,
}

impl ProductAttributeMapping {
  pub fn new(id: u32, product_id: ProductId, attribute_id: u32, control_type: AttributeControlType) -> Self {
    Self {
      id,
      product_id,
      attribute_id,
      text_prompt: None,
      is_required: false,
      control_type,
      validation_min_length: None,
      validation_max_length: None,
      condition: None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeValueType {
  #[default]
  Simple,
  /// Selecting the value bundles another product into the line item.
  AssociatedToProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeValue {
  pub id: u32,
  pub mapping_id: u32,
  pub name: String,
  pub value_type: AttributeValueType,
  pub associated_product_id: Option<ProductId>,
  /// Units of the associated product bundled per unit of the main product.
  pub quantity: i32,
  pub is_pre_selected: bool,
}

impl ProductAttributeValue {
  pub fn new(id: u32, mapping_id: u32, name: impl Into<String>) -> Self {
    Self {
      id,
      mapping_id,
      name: name.into(),
      value_type: AttributeValueType::Simple,
      associated_product_id: None,
      quantity: 1,
      is_pre_selected: false,
    }
  }
}

/// Stock tracked for one combination of attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeCombination {
  pub product_id: ProductId,
  pub attributes: AttributeSelection,
  pub stock_quantity: i32,
  pub allow_out_of_stock_orders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRange {
  pub id: u32,
  pub name: String,
}

#[cfg(test)]
mod tests {
  use super::AttributeControlType::*;

  #[test]
  fn free_input_controls_are_non_combinable() {
    for control in [TextBox, MultilineTextbox, Datepicker, FileUpload] {
      assert!(!control.should_have_values());
      assert!(control.is_non_combinable());
    }
    for control in [DropdownList, RadioList, Checkboxes, ColorSquares, ImageSquares, ReadonlyCheckboxes] {
      assert!(control.should_have_values());
      assert!(!control.validation_rules_allowed());
    }
    assert!(TextBox.validation_rules_allowed());
    assert!(!Datepicker.validation_rules_allowed());
  }
}
