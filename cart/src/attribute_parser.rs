// shopcart/src/attribute_parser.rs

//! Reads attribute selections against the catalog: which mappings and values
//! they refer to, whether conditional attributes apply, and whether two
//! selections describe the same configured product.

use tracing::trace;

use crate::errors::Result;
use crate::models::{
  AttributeCondition, AttributeSelection, GiftCardInfo, Product, ProductAttributeCombination, ProductAttributeMapping,
  ProductAttributeValue,
};
use crate::ports::Catalog;

/// A mapping referenced by a selection. `None` when the catalog does not know the id.
pub type ResolvedMapping = (u32, Option<ProductAttributeMapping>);

pub struct AttributeParser<'a> {
  catalog: &'a dyn Catalog,
}

impl<'a> AttributeParser<'a> {
  pub fn new(catalog: &'a dyn Catalog) -> Self {
    Self { catalog }
  }

  /// Resolves every mapping id of the selection, in selection order.
  pub fn selected_mappings(&self, selection: &AttributeSelection) -> Result<Vec<ResolvedMapping>> {
    let mut resolved = Vec::with_capacity(selection.attributes.len());
    for mapping_id in selection.mapping_ids() {
      resolved.push((mapping_id, self.catalog.attribute_mapping(mapping_id)?));
    }
    Ok(resolved)
  }

  /// Option values picked in the selection. Text input and ids that do not
  /// belong to their mapping are skipped.
  pub fn selected_values(&self, selection: &AttributeSelection) -> Result<Vec<ProductAttributeValue>> {
    let mut values = Vec::new();
    for (mapping_id, mapping) in self.selected_mappings(selection)? {
      let Some(mapping) = mapping else { continue };
      if !mapping.control_type.should_have_values() {
        continue;
      }
      for raw in selection.values(mapping_id) {
        let Ok(value_id) = raw.trim().parse::<u32>() else {
          trace!(mapping_id, raw, "Ignoring non numeric attribute value.");
          continue;
        };
        if let Some(value) = self.catalog.attribute_value(value_id)? {
          if value.mapping_id == mapping_id {
            values.push(value);
          }
        }
      }
    }
    Ok(values)
  }

  /// Compares two selections mapping by mapping. Option values must match
  /// exactly, entered text is compared trimmed and case-insensitively.
  pub fn attributes_equal(
    &self,
    a: &AttributeSelection,
    b: &AttributeSelection,
    ignore_non_combinable: bool,
  ) -> Result<bool> {
    let left = self.comparable_mappings(a, ignore_non_combinable)?;
    let right = self.comparable_mappings(b, ignore_non_combinable)?;
    if left.len() != right.len() {
      return Ok(false);
    }

    for mapping in &left {
      if !right.iter().any(|m| m.id == mapping.id) {
        return Ok(false);
      }
      let values_a = non_blank_values(a, mapping.id);
      let values_b = non_blank_values(b, mapping.id);
      if values_a.len() != values_b.len() {
        return Ok(false);
      }
      let same = if mapping.control_type.should_have_values() {
        values_a.iter().all(|va| values_b.iter().any(|vb| va == vb))
      } else {
        values_a
          .iter()
          .all(|va| values_b.iter().any(|vb| va.to_lowercase() == vb.to_lowercase()))
      };
      if !same {
        return Ok(false);
      }
    }
    Ok(true)
  }

  fn comparable_mappings(
    &self,
    selection: &AttributeSelection,
    ignore_non_combinable: bool,
  ) -> Result<Vec<ProductAttributeMapping>> {
    Ok(
      self
        .selected_mappings(selection)?
        .into_iter()
        .filter_map(|(_, mapping)| mapping)
        .filter(|m| !(ignore_non_combinable && m.control_type.is_non_combinable()))
        .collect(),
    )
  }

  /// The stock-tracking combination matching the selection, ignoring free-input attributes.
  pub fn find_combination(
    &self,
    product: &Product,
    selection: &AttributeSelection,
  ) -> Result<Option<ProductAttributeCombination>> {
    for combination in self.catalog.combinations_for_product(product.id)? {
      if self.attributes_equal(&combination.attributes, selection, true)? {
        return Ok(Some(combination));
      }
    }
    Ok(None)
  }
}

/// `None` when there is no condition. Otherwise the values selected for the
/// depended-on attribute must be exactly the condition's values.
pub fn is_condition_met(condition: Option<&AttributeCondition>, selection: &AttributeSelection) -> Option<bool> {
  let condition = condition?;
  let selected = non_blank_values(selection, condition.mapping_id);
  if selected.len() != condition.value_ids.len() {
    return Some(false);
  }
  Some(
    condition
      .value_ids
      .iter()
      .all(|expected| selected.iter().any(|s| s.parse::<u32>().ok() == Some(*expected))),
  )
}

/// Gift card details of a selection; blank fields when none were entered.
pub fn gift_card_info(selection: &AttributeSelection) -> GiftCardInfo {
  selection.gift_card.clone().unwrap_or_default()
}

fn non_blank_values(selection: &AttributeSelection, mapping_id: u32) -> Vec<String> {
  selection
    .values(mapping_id)
    .into_iter()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::InMemoryCatalog;
  use crate::models::AttributeControlType;

  fn catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.add_mapping(ProductAttributeMapping::new(1, 10, 100, AttributeControlType::DropdownList));
    catalog.add_mapping(ProductAttributeMapping::new(2, 10, 101, AttributeControlType::TextBox));
    catalog.add_mapping(ProductAttributeMapping::new(3, 10, 102, AttributeControlType::Checkboxes));
    catalog.add_value(ProductAttributeValue::new(11, 1, "Red"));
    catalog.add_value(ProductAttributeValue::new(12, 1, "Blue"));
    catalog.add_value(ProductAttributeValue::new(31, 3, "Gift wrap"));
    catalog.add_value(ProductAttributeValue::new(32, 3, "Card"));
    catalog
  }

  #[test]
  fn text_compares_case_insensitively() {
    let catalog = catalog();
    let parser = AttributeParser::new(&catalog);
    let a = AttributeSelection::new().with_value(1, "11").with_value(2, " Happy Birthday ");
    let b = AttributeSelection::new().with_value(2, "happy birthday").with_value(1, "11");
    assert!(parser.attributes_equal(&a, &b, false).unwrap());

    let c = AttributeSelection::new().with_value(1, "12").with_value(2, "happy birthday");
    assert!(!parser.attributes_equal(&a, &c, false).unwrap());
  }

  #[test]
  fn non_combinable_can_be_ignored() {
    let catalog = catalog();
    let parser = AttributeParser::new(&catalog);
    let a = AttributeSelection::new().with_value(1, "11").with_value(2, "engraving");
    let b = AttributeSelection::new().with_value(1, "11");
    assert!(!parser.attributes_equal(&a, &b, false).unwrap());
    assert!(parser.attributes_equal(&a, &b, true).unwrap());
  }

  #[test]
  fn checkbox_values_compare_as_sets() {
    let catalog = catalog();
    let parser = AttributeParser::new(&catalog);
    let a = AttributeSelection::new().with_value(3, "31").with_value(3, "32");
    let b = AttributeSelection::new().with_value(3, "32").with_value(3, "31");
    let c = AttributeSelection::new().with_value(3, "32");
    assert!(parser.attributes_equal(&a, &b, false).unwrap());
    assert!(!parser.attributes_equal(&a, &c, false).unwrap());
  }

  #[test]
  fn selected_values_skip_foreign_and_unknown_ids() {
    let catalog = catalog();
    let parser = AttributeParser::new(&catalog);
    let sel = AttributeSelection::new()
      .with_value(1, "12")
      .with_value(1, "31")
      .with_value(1, "999")
      .with_value(2, "11")
      .with_value(77, "11");
    let values = parser.selected_values(&sel).unwrap();
    assert_eq!(values.iter().map(|v| v.id).collect::<Vec<_>>(), vec![12]);

    let mappings = parser.selected_mappings(&sel).unwrap();
    assert_eq!(mappings.len(), 3);
    assert!(mappings[2].1.is_none());
  }

  #[test]
  fn condition_requires_exact_value_set() {
    let condition = AttributeCondition {
      mapping_id: 3,
      value_ids: vec![31],
    };
    assert_eq!(is_condition_met(None, &AttributeSelection::new()), None);
    assert_eq!(
      is_condition_met(Some(&condition), &AttributeSelection::new().with_value(3, "31")),
      Some(true)
    );
    assert_eq!(
      is_condition_met(
        Some(&condition),
        &AttributeSelection::new().with_value(3, "31").with_value(3, "32")
      ),
      Some(false)
    );
    assert_eq!(is_condition_met(Some(&condition), &AttributeSelection::new()), Some(false));
  }
}
