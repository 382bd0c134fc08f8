//! Prefab catalog and round-robin variant sequencing

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::constants::DEFAULT_OBJECT_SCALE;

fn default_scale() -> f32 {
    DEFAULT_OBJECT_SCALE
}

/// One placeable object variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    pub name: String,
    /// Local bounding box min, relative to the object's pivot
    pub bbox_min: [f32; 3],
    /// Local bounding box max, relative to the object's pivot
    pub bbox_max: [f32; 3],
    /// Uniform scale applied on placement
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl VariantDescriptor {
    /// Unit cube centred on its pivot
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bbox_min: [-0.5; 3],
            bbox_max: [0.5; 3],
            scale: DEFAULT_OBJECT_SCALE,
        }
    }

    pub fn with_bounds(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.bbox_min = min;
        self.bbox_max = max;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(Vec3::from(self.bbox_min), Vec3::from(self.bbox_max))
    }

    pub fn scale_vec(&self) -> Vec3 {
        Vec3::splat(self.scale)
    }
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Prefab catalog is empty")]
    Empty,
}

/// Variants sorted by priority, selected round-robin
#[derive(Debug, Clone)]
pub struct PrefabCatalog {
    variants: Vec<VariantDescriptor>,
    cursor: usize,
}

impl PrefabCatalog {
    /// Sort `variants` by their index in `priority`. Unlisted variants keep
    /// their input order after all listed ones.
    pub fn load<S: AsRef<str>>(
        mut variants: Vec<VariantDescriptor>,
        priority: &[S],
    ) -> Result<Self, CatalogError> {
        if variants.is_empty() {
            return Err(CatalogError::Empty);
        }

        let rank = |name: &str| {
            priority
                .iter()
                .position(|p| p.as_ref() == name)
                .unwrap_or(usize::MAX)
        };
        variants.sort_by_key(|v| rank(&v.name));

        Ok(Self { variants, cursor: 0 })
    }

    /// Variant at the cursor; advances the cursor
    pub fn next(&mut self) -> &VariantDescriptor {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.variants.len();
        &self.variants[index]
    }

    /// Variant that the next call to [`Self::next`] will return
    pub fn peek(&self) -> &VariantDescriptor {
        &self.variants[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }
}
