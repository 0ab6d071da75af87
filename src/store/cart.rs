use super::catalog::Product;

/// Ordered list of products the shopper has added.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<&'static Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: &'static Product) {
        self.items.push(product);
    }

    /// Removes the item at `index`; out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<&'static Product> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn items(&self) -> &[&'static Product] {
        &self.items
    }

    pub fn total_usd(&self) -> f64 {
        self.items.iter().map(|p| p.price_usd).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
