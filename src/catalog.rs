// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::attention::normalize;
use crate::error::{DeskError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub label: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// Ordered category -> subcategory mapping with the price of each service.
///
/// Used to build selections and to turn normalized keys back into display
/// names. It never validates attention text: rows mentioning services that
/// are not listed still take part in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCatalog {
    categories: Vec<CategoryEntry>,
}

fn entry(name: &str, subs: &[(&str, i64)]) -> CategoryEntry {
    CategoryEntry {
        name: name.to_string(),
        subcategories: subs
            .iter()
            .map(|(label, price)| Subcategory {
                label: label.to_string(),
                price: Decimal::from(*price),
            })
            .collect(),
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(vec![
            entry(
                "Control de Embarazo",
                &[("Consulta", 10), ("Ultrasonido", 150), ("Monitoreo Fetal", 100)],
            ),
            entry(
                "Examenes de laboratorio",
                &[
                    ("Paquete de Examenes Laboratorio Embarazos", 400),
                    ("General Orina", 80),
                    ("General Heces", 80),
                    ("Glicemia", 80),
                    ("Hemograma", 80),
                    ("Colesterol", 80),
                    ("Trigliceridos", 80),
                    ("Acido Urico", 80),
                    ("TGO", 80),
                    ("TGP", 80),
                    ("Otros", 80),
                ],
            ),
            entry(
                "Odontologia",
                &[("Consulta", 20), ("Extraccion", 50), ("Limpieza", 200), ("Tapones", 200)],
            ),
            entry(
                "Planificacion Familiar",
                &[
                    ("Citologia", 20),
                    ("Colocacion DIU", 20),
                    ("Colocacion de Implante", 50),
                    ("Retiro de implante", 100),
                ],
            ),
            entry(
                "Gratis",
                &[("Partos", 0), ("Servicio de Ambulancia", 0), ("Psicologia", 0)],
            ),
        ])
    }
}

impl CategoryCatalog {
    pub fn new(categories: Vec<CategoryEntry>) -> Self {
        Self { categories }
    }

    /// Reads a catalog from a JSON array of `{name, subcategories: [{label, price}]}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog: CategoryCatalog = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), categories = catalog.categories.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn subcategories(&self, category: &str) -> &[Subcategory] {
        self.find(category)
            .map(|c| c.subcategories.as_slice())
            .unwrap_or(&[])
    }

    /// Looks a category up by its normalized form.
    pub fn find(&self, category: &str) -> Option<&CategoryEntry> {
        let key = normalize(category);
        self.categories.iter().find(|c| normalize(&c.name) == key)
    }

    /// Display name for a normalized category key, if the catalog knows it.
    pub fn resolve_category(&self, normalized: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| normalize(&c.name) == normalized)
            .map(|c| c.name.as_str())
    }

    /// Display name for a normalized subcategory key within `category`.
    pub fn resolve_subcategory(&self, category: &str, normalized: &str) -> Option<&str> {
        self.subcategories(category)
            .iter()
            .find(|s| normalize(&s.label) == normalized)
            .map(|s| s.label.as_str())
    }

    /// Every `(category, subcategory)` pair in catalog order.
    pub fn all_pairs(&self) -> Vec<(String, String)> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.subcategories
                    .iter()
                    .map(move |s| (c.name.clone(), s.label.clone()))
            })
            .collect()
    }

    /// Catalog price of a service, zero when it is not listed.
    pub fn price_of(&self, category: &str, subcategory: &str) -> Decimal {
        self.lookup(category, subcategory)
            .map(|s| s.price)
            .unwrap_or(Decimal::ZERO)
    }

    /// Resolves a pair to its canonical names, failing on unknown entries.
    pub fn canonical_pair(&self, category: &str, subcategory: &str) -> Result<(String, String)> {
        let cat = self
            .find(category)
            .ok_or_else(|| DeskError::UnknownCategory(category.to_string()))?;
        let sub = self.lookup(category, subcategory).ok_or_else(|| {
            DeskError::UnknownSubcategory(cat.name.clone(), subcategory.to_string())
        })?;
        Ok((cat.name.clone(), sub.label.clone()))
    }

    fn lookup(&self, category: &str, subcategory: &str) -> Option<&Subcategory> {
        let key = normalize(subcategory);
        self.subcategories(category)
            .iter()
            .find(|s| normalize(&s.label) == key)
    }
}
