// shopcart/src/models/selection.rs

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Values chosen for one attribute mapping. Option based controls carry value
/// identifiers, free-input controls carry the entered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAttribute {
  pub mapping_id: u32,
  #[serde(default)]
  pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCardInfo {
  pub recipient_name: String,
  pub recipient_email: String,
  pub sender_name: String,
  pub sender_email: String,
  pub message: String,
}

/// The attribute choices of a cart line (or of the checkout), stored as a JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub attributes: Vec<SelectedAttribute>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gift_card: Option<GiftCardInfo>,
}

impl AttributeSelection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a value for `mapping_id`, appending to the values already selected for it.
  pub fn with_value(mut self, mapping_id: u32, value: impl Into<String>) -> Self {
    self.add_value(mapping_id, value);
    self
  }

  pub fn with_gift_card(mut self, info: GiftCardInfo) -> Self {
    self.gift_card = Some(info);
    self
  }

  pub fn add_value(&mut self, mapping_id: u32, value: impl Into<String>) {
    let value = value.into();
    match self.attributes.iter_mut().find(|a| a.mapping_id == mapping_id) {
      Some(attr) => attr.values.push(value),
      None => self.attributes.push(SelectedAttribute {
        mapping_id,
        values: vec![value],
      }),
    }
  }

  pub fn remove_mapping(&mut self, mapping_id: u32) {
    self.attributes.retain(|a| a.mapping_id != mapping_id);
  }

  pub fn mapping_ids(&self) -> Vec<u32> {
    self.attributes.iter().map(|a| a.mapping_id).collect()
  }

  /// Values selected for `mapping_id`; empty when the mapping is absent.
  pub fn values(&self, mapping_id: u32) -> Vec<&str> {
    self
      .attributes
      .iter()
      .filter(|a| a.mapping_id == mapping_id)
      .flat_map(|a| a.values.iter().map(String::as_str))
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty() && self.gift_card.is_none()
  }

  pub fn to_json(&self) -> Result<String> {
    if self.is_empty() {
      return Ok(String::new());
    }
    Ok(serde_json::to_string(self)?)
  }

  /// Blank text parses to an empty selection.
  pub fn from_json(raw: &str) -> Result<Self> {
    if raw.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_json::from_str(raw)?)
  }
}
